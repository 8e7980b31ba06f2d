use roster_core::{sanitize_model, sanitize_value, MlbRoster, NhlRoster, SanitizationLevel};

const LEVELS: [SanitizationLevel; 4] = [
    SanitizationLevel::None,
    SanitizationLevel::Minimal,
    SanitizationLevel::Moderate,
    SanitizationLevel::Strict,
];

const SAMPLES: &[&str] = &[
    "",
    "   ",
    "  Los   Angeles  ",
    "Bob ; DROP Smith",
    "SEL;ECT",
    "a \u{0000} b",
    "tab\tand\nnewline",
    "\u{201C}Quoted\u{201D} \u{2014} 5\u{00B0} \u{2026}",
    "x' OR 1=1 --",
    "name' AND 'a'='a'",
    "zero\u{200B}width\u{FEFF} bidi\u{202E}",
    "ctrl\u{0085}next\u{009F}",
    "exec sp_who; xp_cmdshell",
    "DROPDROP",
    "/**/SELECT/**/",
    "a very long value that easily exceeds the fifty character cap for strict",
    "ends with a keyword just past the cap xxxxxxxxx SELECTED",
    "6'2\"",
    "3\u{00D7}4 \u{00F7} 2",
];

#[test]
fn normalization_is_idempotent_for_every_level() {
    for level in LEVELS {
        for sample in SAMPLES {
            let once = sanitize_value(sample, level);
            let twice = sanitize_value(&once, level);
            assert_eq!(once, twice, "level {level:?} sample {sample:?}");
        }
    }
}

#[test]
fn strict_output_never_exceeds_cap() {
    for sample in SAMPLES {
        let value = sanitize_value(sample, SanitizationLevel::Strict);
        assert!(value.chars().count() <= 50, "{value:?}");
    }
}

#[test]
fn fields_follow_their_policy_levels() {
    let record = NhlRoster {
        player_id: 9,
        name: Some("  Wayne\u{0007}  Gretzky ".to_string()),
        team: Some(" Edmonton\u{0007} Oilers ".to_string()),
        position: Some(" c\u{200B} ".to_string()),
        birth_place: Some("Brantford, ON".to_string()),
        ..NhlRoster::default()
    };

    let sanitized = sanitize_model(record);

    // Name is minimal: whitespace collapsed, control kept.
    assert_eq!(sanitized.name.as_deref(), Some("Wayne\u{0007} Gretzky"));
    // Team is moderate: control removed.
    assert_eq!(sanitized.team.as_deref(), Some("Edmonton Oilers"));
    // Position is strict: zero-width removed.
    assert_eq!(sanitized.position.as_deref(), Some("c"));
    assert_eq!(sanitized.birth_place.as_deref(), Some("Brantford, ON"));
}

#[test]
fn height_is_never_rewritten_and_unmapped_fields_use_moderate() {
    let record = MlbRoster {
        player_id: "ohtansh01".to_string(),
        height: Some(" 6'4\" ".to_string()),
        league: Some("American\u{0001} League".to_string()),
        ..MlbRoster::default()
    };

    let sanitized = sanitize_model(record);
    assert_eq!(sanitized.height.as_deref(), Some(" 6'4\" "));
    assert_eq!(sanitized.league.as_deref(), Some("American League"));
    assert_eq!(sanitized.player_id, "ohtansh01");
}

#[test]
fn absent_fields_stay_absent() {
    let sanitized = sanitize_model(NhlRoster {
        player_id: 1,
        ..NhlRoster::default()
    });
    assert_eq!(sanitized, NhlRoster {
        player_id: 1,
        ..NhlRoster::default()
    });
}
