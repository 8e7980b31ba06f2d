//! Core use-case services and the mutation security pipeline.
//!
//! # Responsibility
//! - Scan, validate and normalize untrusted roster values.
//! - Gate update/delete on row existence.
//! - Keep callers decoupled from storage details.

pub mod existence_gate;
pub mod field_validator;
pub mod mutation_pipeline;
pub mod normalizer;
pub mod roster_service;
pub mod threat_scanner;
