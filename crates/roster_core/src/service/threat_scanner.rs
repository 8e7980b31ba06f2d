//! Markup/script threat scanner.
//!
//! # Responsibility
//! - Test every non-empty text field of a record, text primary key included,
//!   against every signature rule and report each match.
//!
//! # Invariants
//! - Scanning has no side effects; callers decide what to log.
//! - One violation is produced per (field, matching rule) pair.

use crate::model::roster::RosterRecord;
use crate::policy::patterns::{PatternRegistry, ThreatCategory};
use std::fmt::{Display, Formatter};

/// One signature match in one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field_name: &'static str,
    pub message: String,
    pub category: ThreatCategory,
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of scanning one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub violations: Vec<Violation>,
}

impl ScanReport {
    /// `true` when no field matched any rule.
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violation messages in detection order.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }

    /// Distinct names of fields that produced a violation.
    pub fn flagged_fields(&self) -> Vec<&'static str> {
        let mut fields: Vec<&'static str> = Vec::new();
        for violation in &self.violations {
            if !fields.contains(&violation.field_name) {
                fields.push(violation.field_name);
            }
        }
        fields
    }
}

/// Scans all text fields of `record` against the process-wide registry.
pub fn validate_text_fields<R: RosterRecord>(record: &R) -> ScanReport {
    let registry = PatternRegistry::global();
    let mut violations = Vec::new();

    for (field_name, value) in record.scanned_fields() {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            continue;
        };
        for rule in registry.matching_rules(value) {
            violations.push(Violation {
                field_name,
                message: format!(
                    "XSS pattern detected in field '{field_name}' ({}): {value}. Update is rejected.",
                    rule.category
                ),
                category: rule.category,
            });
        }
    }

    ScanReport { violations }
}

/// Returns whether a single value matches any signature rule.
pub fn contains_threat(value: &str) -> bool {
    PatternRegistry::global().contains_threat(value)
}
