use roster_core::service::field_validator::{
    validate_age, validate_handed, validate_height, validate_player_number, validate_position,
    validate_position_for_sport, validate_weight,
};
use roster_core::{validate_model, FieldValidator, MlbRoster, NbaRoster, NhlRoster, PositionScope};

#[test]
fn height_bounds() {
    assert!(validate_height("6'2\"").is_ok());
    assert!(validate_height("4'0\"").is_ok());
    assert!(validate_height("8'11\"").is_ok());

    let feet = validate_height("9'2\"").unwrap_err();
    assert!(feet.contains("feet"));
    let inches = validate_height("5'13\"").unwrap_err();
    assert!(inches.contains("inches"));
    let format = validate_height("tall").unwrap_err();
    assert!(format.contains("format"));
}

#[test]
fn weight_bounds_are_inclusive() {
    assert!(validate_weight("50").is_ok());
    assert!(validate_weight("400").is_ok());
    assert!(validate_weight("215 lbs").is_ok());
    assert!(validate_weight("49").is_err());
    assert!(validate_weight("401").is_err());
    assert!(validate_weight("heavy").is_err());
}

#[test]
fn age_bounds_are_inclusive() {
    assert!(validate_age("16").is_ok());
    assert!(validate_age("80").is_ok());
    assert!(validate_age("15").is_err());
    assert!(validate_age("81").is_err());
}

#[test]
fn jersey_number_bounds_are_inclusive() {
    assert!(validate_player_number("0").is_ok());
    assert!(validate_player_number("99").is_ok());
    assert!(validate_player_number("#23").is_ok());
    assert!(validate_player_number("100").is_err());
}

#[test]
fn position_union_and_sport_scope() {
    assert!(validate_position("qb").is_ok());
    assert!(validate_position(" LW ").is_ok());
    assert!(validate_position("ZZ").is_err());

    assert!(validate_position_for_sport("QB", "NFL").is_ok());
    assert!(validate_position_for_sport("ZZ", "NFL").is_err());
    let wrong_league = validate_position_for_sport("QB", "NBA").unwrap_err();
    assert!(wrong_league.contains("not valid for NBA"));
    let unknown = validate_position_for_sport("QB", "PGA").unwrap_err();
    assert!(unknown.contains("Unknown sport"));
}

#[test]
fn handedness_accepts_left_right_both() {
    for value in ["L", "r", " B "] {
        assert!(validate_handed(value).is_ok(), "{value}");
    }
    assert!(validate_handed("X").is_err());
}

#[test]
fn empty_values_always_pass() {
    assert!(validate_height("").is_ok());
    assert!(validate_weight("").is_ok());
    assert!(validate_age("").is_ok());
    assert!(validate_player_number("").is_ok());
    assert!(validate_position("").is_ok());
    assert!(validate_position_for_sport("", "PGA").is_ok());
    assert!(validate_handed("").is_ok());
}

#[test]
fn model_validation_aggregates_every_failing_field() {
    let record = NhlRoster {
        player_id: 99,
        name: Some("anything goes here".to_string()),
        number: Some("100".to_string()),
        position: Some("QB".to_string()),
        handed: Some("X".to_string()),
        age: Some("12".to_string()),
        ..NhlRoster::default()
    };

    let report = validate_model(&record);
    assert!(!report.is_ok());
    assert_eq!(report.errors.len(), 3);
    assert!(report.errors[0].starts_with("Field 'Number':"));
    assert!(report.errors[1].starts_with("Field 'Handed':"));
    assert!(report.errors[2].starts_with("Field 'Age':"));
}

#[test]
fn sport_scope_uses_record_league() {
    let record = NbaRoster {
        player_id: 30,
        position: Some("QB".to_string()),
        ..NbaRoster::default()
    };

    assert!(validate_model(&record).is_ok());

    let scoped = FieldValidator::new(PositionScope::Sport).validate_model(&record);
    assert_eq!(scoped.errors.len(), 1);
    assert!(scoped.errors[0].contains("not valid for NBA"));
}

#[test]
fn baseball_positions_pass_in_both_scopes() {
    for position in ["SS", "1B", "CF", "SP", "DH"] {
        let record = MlbRoster {
            player_id: "troutmi01".to_string(),
            position: Some(position.to_string()),
            ..MlbRoster::default()
        };
        assert!(validate_model(&record).is_ok(), "{position}");
        let scoped = FieldValidator::new(PositionScope::Sport).validate_model(&record);
        assert!(scoped.is_ok(), "{position}");
    }
    assert!(validate_position_for_sport("QB", "MLB").is_err());
}

#[test]
fn blank_text_key_is_rejected() {
    let record = MlbRoster {
        player_id: "  ".to_string(),
        first_name: Some("Mike".to_string()),
        ..MlbRoster::default()
    };

    let report = validate_model(&record);
    assert_eq!(
        report.errors,
        vec!["Field 'PlayerID': Player id is required".to_string()]
    );
}
