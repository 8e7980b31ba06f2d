//! Roster domain model.
//!
//! # Responsibility
//! - Define one record type per league roster table.
//! - Expose each record's text fields through a static field list so the
//!   mutation pipeline never needs runtime type inspection.
//!
//! # Invariants
//! - Every text field of a record type appears exactly once in its
//!   `TEXT_FIELDS` list, in the same order as `text_fields()`.
//! - Numeric columns are not text fields and are never scanned or normalized.

pub mod roster;
