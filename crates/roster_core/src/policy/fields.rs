//! Field policy table.
//!
//! # Responsibility
//! - Map each known field name to its sanitization level and semantic rule.
//! - Build per-record field descriptors from a record type's static field
//!   list.
//!
//! # Invariants
//! - Lookups are case-insensitive (`PlayerId` and `playerID` are one entry).
//! - Unmapped fields get `SanitizationLevel::Moderate` and no semantic rule.

use crate::model::roster::RosterRecord;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Normalization strength, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SanitizationLevel {
    /// Value is stored as received.
    None,
    /// Whitespace, Unicode punctuation and weak SQL-keyword cleanup.
    Minimal,
    /// `Minimal` plus control-character removal.
    Moderate,
    /// `Moderate` plus invisible-character removal and length cap.
    Strict,
}

impl SanitizationLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Minimal => "minimal",
            Self::Moderate => "moderate",
            Self::Strict => "strict",
        }
    }
}

/// Domain rule applied by the semantic validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRule {
    Height,
    Weight,
    Age,
    JerseyNumber,
    Position,
    Handedness,
}

impl FieldRule {
    /// Descriptor kind implied by this rule.
    pub fn kind(self) -> FieldKind {
        match self {
            Self::Height => FieldKind::Pattern,
            Self::Weight | Self::Age | Self::JerseyNumber => FieldKind::Numeric,
            Self::Position | Self::Handedness => FieldKind::Enum,
        }
    }
}

/// Shape of the values a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Numeric,
    Enum,
    Pattern,
}

/// Policy bound to one field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPolicy {
    pub level: SanitizationLevel,
    pub rule: Option<FieldRule>,
}

impl FieldPolicy {
    const DEFAULT: Self = Self {
        level: SanitizationLevel::Moderate,
        rule: None,
    };
}

/// Resolved policy for one text field of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    pub level: SanitizationLevel,
}

const POLICY_ENTRIES: &[(&str, SanitizationLevel, Option<FieldRule>)] = &[
    ("FirstName", SanitizationLevel::Minimal, None),
    ("LastName", SanitizationLevel::Minimal, None),
    ("Name", SanitizationLevel::Minimal, None),
    ("Team", SanitizationLevel::Moderate, None),
    ("Position", SanitizationLevel::Strict, Some(FieldRule::Position)),
    (
        "FantasyPosition",
        SanitizationLevel::Strict,
        Some(FieldRule::Position),
    ),
    ("PositionCategory", SanitizationLevel::Strict, None),
    (
        "Number",
        SanitizationLevel::Strict,
        Some(FieldRule::JerseyNumber),
    ),
    ("PlayerId", SanitizationLevel::Strict, None),
    // Height keeps its quote marks, so it is never rewritten.
    ("Height", SanitizationLevel::None, Some(FieldRule::Height)),
    ("Weight", SanitizationLevel::Moderate, Some(FieldRule::Weight)),
    ("Age", SanitizationLevel::Strict, Some(FieldRule::Age)),
    ("CurrentStatus", SanitizationLevel::Moderate, None),
    ("CurrentStatusColor", SanitizationLevel::Strict, None),
    ("College", SanitizationLevel::Moderate, None),
    ("BirthPlace", SanitizationLevel::Moderate, None),
    ("BirthCountry", SanitizationLevel::Moderate, None),
    ("DateOfBirth", SanitizationLevel::Strict, None),
    ("BirthDateShortString", SanitizationLevel::Strict, None),
    (
        "Handed",
        SanitizationLevel::Strict,
        Some(FieldRule::Handedness),
    ),
    ("Drafted", SanitizationLevel::Strict, None),
];

static TABLE: Lazy<FieldPolicyTable> = Lazy::new(FieldPolicyTable::build);

/// Immutable field name → policy mapping.
#[derive(Debug)]
pub struct FieldPolicyTable {
    policies: HashMap<String, FieldPolicy>,
}

impl FieldPolicyTable {
    /// Returns the process-wide table, building it on first access.
    pub fn global() -> &'static FieldPolicyTable {
        &TABLE
    }

    fn build() -> Self {
        let policies = POLICY_ENTRIES
            .iter()
            .map(|(name, level, rule)| {
                (
                    name.to_ascii_lowercase(),
                    FieldPolicy {
                        level: *level,
                        rule: *rule,
                    },
                )
            })
            .collect();
        Self { policies }
    }

    /// Policy for `field`, falling back to the moderate default.
    pub fn policy_for(&self, field: &str) -> FieldPolicy {
        self.policies
            .get(&field.to_ascii_lowercase())
            .copied()
            .unwrap_or(FieldPolicy::DEFAULT)
    }

    /// Sanitization level for `field`.
    pub fn level_for(&self, field: &str) -> SanitizationLevel {
        self.policy_for(field).level
    }

    /// Semantic rule for `field`, if any.
    pub fn rule_for(&self, field: &str) -> Option<FieldRule> {
        self.policy_for(field).rule
    }

    /// Builds one descriptor per text field of `R`, text key first.
    pub fn descriptors<R: RosterRecord>(&self) -> Vec<FieldDescriptor> {
        R::TEXT_KEY
            .iter()
            .chain(R::TEXT_FIELDS)
            .map(|&name| {
                let policy = self.policy_for(name);
                FieldDescriptor {
                    name,
                    kind: policy.rule.map_or(FieldKind::Text, FieldRule::kind),
                    level: policy.level,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldKind, FieldPolicyTable, FieldRule, SanitizationLevel};
    use crate::model::roster::{MlbRoster, NhlRoster, RosterRecord};

    #[test]
    fn lookup_ignores_case() {
        let table = FieldPolicyTable::global();
        assert_eq!(table.level_for("playerID"), SanitizationLevel::Strict);
        assert_eq!(table.level_for("PLAYERID"), SanitizationLevel::Strict);
        assert_eq!(table.rule_for("height"), Some(FieldRule::Height));
    }

    #[test]
    fn unknown_field_defaults_to_moderate() {
        let policy = FieldPolicyTable::global().policy_for("ShirtSponsor");
        assert_eq!(policy.level, SanitizationLevel::Moderate);
        assert_eq!(policy.rule, None);
    }

    #[test]
    fn levels_are_ordered_by_strength() {
        assert!(SanitizationLevel::None < SanitizationLevel::Minimal);
        assert!(SanitizationLevel::Minimal < SanitizationLevel::Moderate);
        assert!(SanitizationLevel::Moderate < SanitizationLevel::Strict);
    }

    #[test]
    fn descriptors_cover_every_text_field() {
        let descriptors = FieldPolicyTable::global().descriptors::<NhlRoster>();
        assert_eq!(descriptors.len(), NhlRoster::TEXT_FIELDS.len());

        let handed = descriptors.iter().find(|d| d.name == "Handed").unwrap();
        assert_eq!(handed.kind, FieldKind::Enum);
        assert_eq!(handed.level, SanitizationLevel::Strict);

        let birth_place = descriptors.iter().find(|d| d.name == "BirthPlace").unwrap();
        assert_eq!(birth_place.kind, FieldKind::Text);
        assert_eq!(birth_place.level, SanitizationLevel::Moderate);
    }

    #[test]
    fn text_key_gets_a_strict_descriptor() {
        let descriptors = FieldPolicyTable::global().descriptors::<MlbRoster>();
        assert_eq!(descriptors.len(), MlbRoster::TEXT_FIELDS.len() + 1);
        assert_eq!(descriptors[0].name, "PlayerID");
        assert_eq!(descriptors[0].kind, FieldKind::Text);
        assert_eq!(descriptors[0].level, SanitizationLevel::Strict);
    }
}
