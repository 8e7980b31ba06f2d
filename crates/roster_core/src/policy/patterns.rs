//! Signature rule registry for markup/script injection detection.
//!
//! # Responsibility
//! - Define the canonical signature rule set and its categories.
//! - Compile every rule once for the process lifetime.
//!
//! # Invariants
//! - Matching is case-insensitive for every rule.
//! - Rule order carries no meaning; callers evaluate all rules.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::fmt::{Display, Formatter};

/// Family a signature rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreatCategory {
    /// Bare `<` or `>`.
    AngleBracket,
    /// `<script>` openers and full script blocks.
    ScriptTag,
    /// Other active-content tags (`<iframe>`, `<object>`, ...).
    ActiveTag,
    /// Inline event-handler attributes such as `onerror=`.
    EventHandler,
    /// `javascript:` / `vbscript:` protocol strings.
    ScriptProtocol,
    /// `data:text/html` URLs.
    DataUrl,
    /// CSS `expression()` and `eval()` calls.
    ScriptExpression,
    /// Percent-encoded bytes, single or double encoded.
    PercentEncoded,
    /// Numeric HTML entities and `&lt;` / `&gt;`.
    EntityEncoded,
}

impl ThreatCategory {
    /// Stable snake_case id used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AngleBracket => "angle_bracket",
            Self::ScriptTag => "script_tag",
            Self::ActiveTag => "active_tag",
            Self::EventHandler => "event_handler",
            Self::ScriptProtocol => "script_protocol",
            Self::DataUrl => "data_url",
            Self::ScriptExpression => "script_expression",
            Self::PercentEncoded => "percent_encoded",
            Self::EntityEncoded => "entity_encoded",
        }
    }
}

impl Display for ThreatCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One compiled signature rule.
#[derive(Debug)]
pub struct SignatureRule {
    pub id: &'static str,
    pub pattern: Regex,
    pub category: ThreatCategory,
}

impl SignatureRule {
    /// Returns whether this rule matches anywhere in `value`.
    pub fn is_match(&self, value: &str) -> bool {
        self.pattern.is_match(value)
    }
}

struct RuleSource {
    id: &'static str,
    pattern: &'static str,
    category: ThreatCategory,
}

/// Expanded rule set: bare brackets, script and active tags, handlers,
/// protocols, CSS expressions, and single/double encoded variants.
const RULE_SOURCES: &[RuleSource] = &[
    RuleSource {
        id: "lt",
        pattern: r"<",
        category: ThreatCategory::AngleBracket,
    },
    RuleSource {
        id: "gt",
        pattern: r">",
        category: ThreatCategory::AngleBracket,
    },
    RuleSource {
        id: "script_block",
        pattern: r"(?s)<script[^>]*>.*?</script>",
        category: ThreatCategory::ScriptTag,
    },
    RuleSource {
        id: "script_open",
        pattern: r"<script[^>]*>",
        category: ThreatCategory::ScriptTag,
    },
    RuleSource {
        id: "active_tag_open",
        pattern: r"<(iframe|object|embed|form|style|link|meta|svg|img|base|applet)\b",
        category: ThreatCategory::ActiveTag,
    },
    RuleSource {
        id: "event_handler",
        pattern: r"on\w+\s*=",
        category: ThreatCategory::EventHandler,
    },
    RuleSource {
        id: "javascript_protocol",
        pattern: r"javascript:",
        category: ThreatCategory::ScriptProtocol,
    },
    RuleSource {
        id: "vbscript_protocol",
        pattern: r"vbscript:",
        category: ThreatCategory::ScriptProtocol,
    },
    RuleSource {
        id: "data_html",
        pattern: r"data:text/html",
        category: ThreatCategory::DataUrl,
    },
    RuleSource {
        id: "css_expression",
        pattern: r"expression\s*\(",
        category: ThreatCategory::ScriptExpression,
    },
    RuleSource {
        id: "eval_call",
        pattern: r"eval\s*\(",
        category: ThreatCategory::ScriptExpression,
    },
    RuleSource {
        id: "numeric_entity",
        pattern: r"&#x?[0-9a-f]+;",
        category: ThreatCategory::EntityEncoded,
    },
    RuleSource {
        id: "named_bracket_entity",
        pattern: r"&(lt|gt);",
        category: ThreatCategory::EntityEncoded,
    },
    RuleSource {
        id: "percent_byte",
        pattern: r"%[0-9a-f]{2}",
        category: ThreatCategory::PercentEncoded,
    },
    RuleSource {
        id: "percent_script",
        pattern: r"%3cscript",
        category: ThreatCategory::PercentEncoded,
    },
    RuleSource {
        id: "double_percent_script",
        pattern: r"%253cscript",
        category: ThreatCategory::PercentEncoded,
    },
];

static REGISTRY: Lazy<PatternRegistry> = Lazy::new(PatternRegistry::build);

/// Immutable set of compiled signature rules.
#[derive(Debug)]
pub struct PatternRegistry {
    rules: Vec<SignatureRule>,
}

impl PatternRegistry {
    /// Returns the process-wide registry, compiling it on first access.
    pub fn global() -> &'static PatternRegistry {
        &REGISTRY
    }

    fn build() -> Self {
        let rules = RULE_SOURCES
            .iter()
            .map(|source| SignatureRule {
                id: source.id,
                pattern: RegexBuilder::new(source.pattern)
                    .case_insensitive(true)
                    .build()
                    .expect("valid signature rule regex"),
                category: source.category,
            })
            .collect();
        Self { rules }
    }

    /// All rules, in declaration order.
    pub fn rules(&self) -> &[SignatureRule] {
        &self.rules
    }

    /// Returns every rule matching `value`; never stops at the first hit.
    pub fn matching_rules<'a>(&'a self, value: &'a str) -> impl Iterator<Item = &'a SignatureRule> {
        self.rules.iter().filter(move |rule| rule.is_match(value))
    }

    /// Returns whether any rule matches `value`.
    pub fn contains_threat(&self, value: &str) -> bool {
        !value.is_empty() && self.rules.iter().any(|rule| rule.is_match(value))
    }
}
