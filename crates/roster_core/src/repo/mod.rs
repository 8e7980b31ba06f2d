//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the store session contract the mutation pipeline depends on.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Every value reaches SQLite as a bound parameter.

pub mod roster_repo;
