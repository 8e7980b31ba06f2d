//! Process-wide security and normalization policy.
//!
//! # Responsibility
//! - Hold the signature rules used to detect injected markup/script.
//! - Map field names to a sanitization level and a semantic rule.
//!
//! # Invariants
//! - Both registries are built once on first use and never mutated.
//! - Unknown fields resolve to `SanitizationLevel::Moderate`, never to "no
//!   checks".

pub mod fields;
pub mod patterns;
