//! Semantic field validator.
//!
//! # Responsibility
//! - Check height, weight, age, jersey number, position and handedness
//!   values against roster domain rules.
//! - Aggregate every failing field into one report.
//!
//! # Invariants
//! - Empty or absent values are always valid, except a text primary key,
//!   which must not be blank.
//! - Fields without a semantic rule are not validated.
//! - Validation runs on the value as received, before normalization.

use crate::model::roster::{RosterRecord, Sport};
use crate::policy::fields::{FieldPolicyTable, FieldRule};
use once_cell::sync::Lazy;
use regex::Regex;

static HEIGHT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^(\d+)'(\d{1,2})"?$"#).expect("valid height regex"));

const NBA_POSITIONS: &[&str] = &["C", "F", "G", "PF", "PG", "SF", "SG"];
const NFL_POSITIONS: &[&str] = &[
    "C", "CB", "DB", "DE", "DL", "DT", "FB", "G", "ILB", "K", "LB", "LS", "NT", "OL", "OLB", "OT",
    "P", "QB", "RB", "S", "TE", "WR",
];
const NHL_POSITIONS: &[&str] = &["C", "D", "F", "G", "LW", "RW"];
const MLB_POSITIONS: &[&str] = &[
    "1B", "2B", "3B", "C", "CF", "DH", "IF", "LF", "OF", "P", "RF", "RP", "SP", "SS",
];
const HANDEDNESS_VALUES: &[&str] = &["L", "R", "B"];

static ALL_POSITIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut positions: Vec<&'static str> = Vec::new();
    for code in NBA_POSITIONS
        .iter()
        .chain(NFL_POSITIONS)
        .chain(NHL_POSITIONS)
        .chain(MLB_POSITIONS)
    {
        if !positions.contains(code) {
            positions.push(*code);
        }
    }
    positions
});

/// Outcome of a single-field check: `Err` carries the reason.
pub type FieldCheck = Result<(), String>;

/// How position codes are matched against whitelists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionScope {
    /// Any code from any supported league is accepted.
    #[default]
    Union,
    /// Only codes of the record's own league are accepted.
    Sport,
}

/// Aggregated result of validating one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// `true` when no field failed.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validator bound to a position-matching scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldValidator {
    scope: PositionScope,
}

impl FieldValidator {
    pub fn new(scope: PositionScope) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> PositionScope {
        self.scope
    }

    /// Validates every text field of `record` that carries a semantic rule.
    pub fn validate_model<R: RosterRecord>(&self, record: &R) -> ValidationReport {
        let table = FieldPolicyTable::global();
        let mut errors = Vec::new();

        if let Some(key_name) = R::TEXT_KEY {
            if let Err(reason) = validate_text_key(record.text_key().unwrap_or_default()) {
                errors.push(format!("Field '{key_name}': {reason}"));
            }
        }

        for (field_name, value) in record.scanned_fields() {
            let Some(value) = value.filter(|v| !v.is_empty()) else {
                continue;
            };
            let Some(rule) = table.rule_for(field_name) else {
                continue;
            };
            if let Err(reason) = self.check(rule, value, R::SPORT) {
                errors.push(format!("Field '{field_name}': {reason}"));
            }
        }

        ValidationReport { errors }
    }

    fn check(&self, rule: FieldRule, value: &str, sport: Sport) -> FieldCheck {
        match rule {
            FieldRule::Height => validate_height(value),
            FieldRule::Weight => validate_weight(value),
            FieldRule::Age => validate_age(value),
            FieldRule::JerseyNumber => validate_player_number(value),
            FieldRule::Position => match self.scope {
                PositionScope::Union => validate_position(value),
                PositionScope::Sport => validate_position_for_sport(value, sport.code()),
            },
            FieldRule::Handedness => validate_handed(value),
        }
    }
}

/// Validates `record` with the default (union) position scope.
pub fn validate_model<R: RosterRecord>(record: &R) -> ValidationReport {
    FieldValidator::default().validate_model(record)
}

/// Height as `feet'inches"`, feet in 4..=8 and inches in 0..=11.
///
/// The closing `"` is optional.
pub fn validate_height(input: &str) -> FieldCheck {
    if input.is_empty() {
        return Ok(());
    }

    let Some(caps) = HEIGHT_RE.captures(input.trim()) else {
        return Err("Height must be in format: feet'inches\" (e.g., 5'8\", 6'9\")".to_string());
    };
    let feet = parse_digits(&caps[1]);
    let inches = parse_digits(&caps[2]);

    if !matches!(feet, Some(4..=8)) {
        return Err("Height feet must be between 4 and 8".to_string());
    }
    if !matches!(inches, Some(0..=11)) {
        return Err("Height inches must be between 0 and 11".to_string());
    }
    Ok(())
}

/// Weight in pounds, 50..=400, after stripping non-digits.
pub fn validate_weight(input: &str) -> FieldCheck {
    validate_numeric(input, "Weight", 50, 400)
}

/// Age in years, 16..=80, after stripping non-digits.
pub fn validate_age(input: &str) -> FieldCheck {
    validate_numeric(input, "Age", 16, 80)
}

/// Jersey number, 0..=99, after stripping non-digits.
pub fn validate_player_number(input: &str) -> FieldCheck {
    validate_numeric(input, "Player number", 0, 99)
}

/// Position code from any supported league.
pub fn validate_position(input: &str) -> FieldCheck {
    if input.is_empty() {
        return Ok(());
    }

    let code = input.trim().to_ascii_uppercase();
    if ALL_POSITIONS.contains(&code.as_str()) {
        return Ok(());
    }
    Err(format!(
        "Position '{input}' is not a valid position code. Valid codes: {}",
        ALL_POSITIONS.join(", ")
    ))
}

/// Position code from the whitelist of `sport`; unknown sports are rejected.
pub fn validate_position_for_sport(input: &str, sport: &str) -> FieldCheck {
    if input.is_empty() {
        return Ok(());
    }

    let Some(positions) = positions_for(sport) else {
        return Err(format!(
            "Unknown sport '{sport}'. Valid sports: NBA, NFL, NHL, MLB"
        ));
    };
    let code = input.trim().to_ascii_uppercase();
    if positions.contains(&code.as_str()) {
        return Ok(());
    }
    Err(format!(
        "Position '{input}' is not valid for {sport}. Valid {sport} positions: {}",
        positions.join(", ")
    ))
}

/// Text primary key: required, non-blank.
pub fn validate_text_key(input: &str) -> FieldCheck {
    if input.trim().is_empty() {
        return Err("Player id is required".to_string());
    }
    Ok(())
}

/// Handedness: `L`, `R` or `B`.
pub fn validate_handed(input: &str) -> FieldCheck {
    if input.is_empty() {
        return Ok(());
    }

    let code = input.trim().to_ascii_uppercase();
    if HANDEDNESS_VALUES.contains(&code.as_str()) {
        return Ok(());
    }
    Err(format!(
        "Handed value '{input}' is not valid. Valid values: L, R, B (Left, Right, Both)"
    ))
}

/// Position whitelist for a league code; `None` for unknown leagues.
pub fn positions_for(sport: &str) -> Option<&'static [&'static str]> {
    match Sport::parse(sport)? {
        Sport::Nba => Some(NBA_POSITIONS),
        Sport::Nfl => Some(NFL_POSITIONS),
        Sport::Nhl => Some(NHL_POSITIONS),
        Sport::Mlb => Some(MLB_POSITIONS),
    }
}

fn validate_numeric(input: &str, label: &str, min: u64, max: u64) -> FieldCheck {
    if input.is_empty() {
        return Ok(());
    }

    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(format!("{label} must contain numeric values"));
    }

    match parse_digits(&digits) {
        Some(value) if (min..=max).contains(&value) => Ok(()),
        _ => Err(format!("{label} must be between {min} and {max}")),
    }
}

/// Parses an ASCII digit run; values too large for `u64` yield `None`.
fn parse_digits(digits: &str) -> Option<u64> {
    digits.parse().ok()
}
