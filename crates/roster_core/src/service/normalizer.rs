//! Field value normalizer.
//!
//! # Responsibility
//! - Apply the level-dependent text transform chain to each text field.
//! - Log every field whose stored value differs from the received one.
//!
//! # Invariants
//! - `sanitize_value(sanitize_value(s, l), l) == sanitize_value(s, l)`.
//! - Fields are transformed independently; one field never affects another.
//! - Transform order per pass: whitespace, control characters, invisible
//!   characters, Unicode punctuation, SQL keywords, length cap.
//!
//! SQL keyword stripping is a secondary control only. Stores must still bind
//! values as parameters.

use crate::model::roster::RosterRecord;
use crate::policy::fields::{FieldPolicyTable, SanitizationLevel};
use log::info;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Maximum stored length, in characters, for `Strict` fields.
pub const STRICT_MAX_CHARS: usize = 50;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

static SQL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b(SELECT|INSERT|UPDATE|DELETE|DROP|CREATE|ALTER|EXEC|EXECUTE|UNION|SCRIPT)\b",
        r"(--|/\*|\*/|;|xp_|sp_)",
        r"\b(OR|AND)\b\s+\d+\s*=\s*\d+",
        r#"\b(OR|AND)\b\s+['"]\w+['"]\s*=\s*['"]\w+['"]"#,
    ]
    .iter()
    .map(|pattern| {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .expect("valid sql keyword regex")
    })
    .collect()
});

/// Normalizes every text field of `record` according to the policy table.
///
/// # Side effects
/// - Emits one `field_normalized` info event per changed field.
pub fn sanitize_model<R: RosterRecord>(mut record: R) -> R {
    let table = FieldPolicyTable::global();
    let sport = R::SPORT;
    let key = record.key();

    for (field_name, slot) in record.text_fields_mut() {
        let Some(original) = slot.as_deref().filter(|v| !v.is_empty()) else {
            continue;
        };
        let level = table.level_for(field_name);
        let sanitized = sanitize_value(original, level);
        if sanitized != original {
            info!(
                "event=field_normalized module=service status=ok sport={} key={} field={} level={} before={:?} after={:?}",
                sport,
                key,
                field_name,
                level.as_str(),
                original,
                sanitized
            );
            *slot = Some(sanitized);
        }
    }

    record
}

/// Normalizes one value at `level`, repeating the transform chain until it
/// reaches a fixed point.
///
/// After the first pass no replaceable punctuation remains, so any further
/// change strictly shortens the value and the loop terminates.
pub fn sanitize_value(input: &str, level: SanitizationLevel) -> String {
    let mut current = apply_pass(input, level);
    loop {
        let next = apply_pass(&current, level);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn apply_pass(input: &str, level: SanitizationLevel) -> String {
    if level == SanitizationLevel::None || input.is_empty() {
        return input.to_string();
    }

    let mut value = normalize_whitespace(input);
    if level >= SanitizationLevel::Moderate {
        value = remove_control_characters(&value);
    }
    if level >= SanitizationLevel::Strict {
        value = remove_invisible_characters(&value);
    }
    value = normalize_unicode_punctuation(&value);
    value = strip_sql_keywords(&value);
    if level >= SanitizationLevel::Strict {
        value = truncate_chars(&value, STRICT_MAX_CHARS);
    }
    value
}

/// Collapses whitespace runs to one space and trims both ends.
pub fn normalize_whitespace(input: &str) -> String {
    WHITESPACE_RE.replace_all(input, " ").trim().to_string()
}

/// Removes C0 (U+0000..U+001F), DEL and C1 (U+0080..U+009F) controls.
pub fn remove_control_characters(input: &str) -> String {
    input.chars().filter(|c| !is_control(*c)).collect()
}

/// Removes zero-width, separator, formatting and bidi control characters.
pub fn remove_invisible_characters(input: &str) -> String {
    input
        .chars()
        .filter(|c| !is_control(*c) && !is_invisible(*c))
        .collect()
}

/// Maps typographic punctuation to plain ASCII equivalents.
pub fn normalize_unicode_punctuation(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\u{201C}' | '\u{201D}' => output.push('"'),
            '\u{2018}' | '\u{2019}' => output.push('\''),
            '\u{2013}' | '\u{2014}' => output.push('-'),
            '\u{2026}' => output.push_str("..."),
            '\u{00B0}' => output.push_str(" degrees"),
            '\u{00D7}' => output.push('x'),
            '\u{00F7}' => output.push('/'),
            other => output.push(other),
        }
    }
    output
}

/// Removes SQL keywords, comment markers, separators, stored-procedure
/// prefixes and simple tautologies.
pub fn strip_sql_keywords(input: &str) -> String {
    let mut value = input.to_string();
    for pattern in SQL_PATTERNS.iter() {
        value = pattern.replace_all(&value, "").into_owned();
    }
    value
}

fn truncate_chars(input: &str, max_chars: usize) -> String {
    input.chars().take(max_chars).collect()
}

fn is_control(c: char) -> bool {
    matches!(c, '\u{0000}'..='\u{001F}' | '\u{007F}'..='\u{009F}')
}

fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200F}'
            | '\u{2028}'..='\u{202F}'
            | '\u{205F}'..='\u{206F}'
            | '\u{FEFF}'
    )
}
