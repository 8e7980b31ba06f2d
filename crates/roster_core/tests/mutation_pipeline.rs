use roster_core::db::open_db_in_memory;
use roster_core::{
    FieldValidator, MlbRoster, MutationKind, MutationOutcome, MutationPipeline, MutationRejection,
    NbaRoster, NflRoster, PipelineStage, PositionScope, RecordKey, RejectionClass, RepoResult,
    RosterService, RosterStore, RosterTable, SqliteRosterStore,
};
use std::cell::Cell;

#[derive(Default)]
struct CountingStore {
    lookups: Cell<usize>,
    writes: Cell<usize>,
}

impl RosterStore for CountingStore {
    fn get_by_key<R: RosterTable>(&self, _key: &RecordKey) -> RepoResult<Option<R>> {
        self.lookups.set(self.lookups.get() + 1);
        Ok(None)
    }

    fn insert<R: RosterTable>(&self, record: &R) -> RepoResult<RecordKey> {
        self.writes.set(self.writes.get() + 1);
        Ok(record.key())
    }

    fn update<R: RosterTable>(&self, _record: &R) -> RepoResult<()> {
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn delete<R: RosterTable>(&self, _key: &RecordKey) -> RepoResult<()> {
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

fn quarterback(player_id: i64) -> NflRoster {
    NflRoster {
        player_id,
        name: Some("Tom Brady".to_string()),
        first_name: Some("  Tom  ".to_string()),
        last_name: Some(" Brady".to_string()),
        team: Some("Tampa  Bay".to_string()),
        position: Some("QB".to_string()),
        height: Some("6'2\"".to_string()),
        weight: Some(215),
        number: Some(12),
        ..NflRoster::default()
    }
}

fn expect_rejection<R>(outcome: MutationOutcome<R>) -> MutationRejection {
    match outcome {
        MutationOutcome::Persisted(_) => panic!("expected a rejection"),
        MutationOutcome::Rejected(rejection) => rejection,
    }
}

#[test]
fn clean_create_is_persisted_sanitized() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);

    let outcome = service.create(quarterback(12));
    let MutationOutcome::Persisted(record) = outcome else {
        panic!("expected persisted record");
    };
    assert_eq!(record.first_name.as_deref(), Some("Tom"));
    assert_eq!(record.last_name.as_deref(), Some("Brady"));
    assert_eq!(record.team.as_deref(), Some("Tampa Bay"));
    assert_eq!(record.height.as_deref(), Some("6'2\""));

    let stored: NflRoster = service.get(&RecordKey::Id(12)).unwrap().unwrap();
    assert_eq!(stored, record);
    assert_eq!(stored.weight, Some(215));
}

#[test]
fn script_payload_is_blocked_before_any_store_access() {
    let store = CountingStore::default();
    let pipeline = MutationPipeline::new(&store);

    let mut record = quarterback(12);
    record.first_name = Some("<script>alert(1)</script>".to_string());

    let rejection = expect_rejection(pipeline.run(record, MutationKind::Update));
    assert_eq!(rejection.stage(), PipelineStage::Scan);
    assert_eq!(rejection.class(), RejectionClass::Blocked);
    assert!(rejection.messages()[0].contains("field 'FirstName'"));
    assert_eq!(store.lookups.get(), 0);
    assert_eq!(store.writes.get(), 0);
}

#[test]
fn invalid_structured_value_is_a_bad_request() {
    let store = CountingStore::default();
    let pipeline = MutationPipeline::new(&store);

    let mut record = quarterback(12);
    record.position = Some("ZZ".to_string());
    record.age = Some("12".to_string());

    let rejection = expect_rejection(pipeline.run(record, MutationKind::Create));
    assert_eq!(rejection.stage(), PipelineStage::Validate);
    assert_eq!(rejection.class(), RejectionClass::BadRequest);
    let messages = rejection.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].starts_with("Field 'Position':"));
    assert!(messages[1].starts_with("Field 'Age':"));
    assert_eq!(store.writes.get(), 0);
}

#[test]
fn validation_sees_the_received_value() {
    let store = CountingStore::default();
    let pipeline = MutationPipeline::new(&store);

    let mut record = quarterback(12);
    record.position = Some("Q\u{200B}B".to_string());

    let rejection = expect_rejection(pipeline.run(record, MutationKind::Create));
    assert_eq!(rejection.stage(), PipelineStage::Validate);
}

#[test]
fn create_skips_the_existence_check() {
    let store = CountingStore::default();
    let pipeline = MutationPipeline::new(&store);

    assert!(pipeline.run(quarterback(12), MutationKind::Create).is_persisted());
    assert_eq!(store.lookups.get(), 0);
    assert_eq!(store.writes.get(), 1);
}

#[test]
fn update_of_missing_row_is_not_found() {
    let store = CountingStore::default();
    let pipeline = MutationPipeline::new(&store);

    let rejection = expect_rejection(pipeline.run(quarterback(77), MutationKind::Update));
    assert_eq!(rejection, MutationRejection::NotFound { key: RecordKey::Id(77) });
    assert_eq!(rejection.stage(), PipelineStage::ExistenceCheck);
    assert_eq!(rejection.class(), RejectionClass::NotFound);
    assert_eq!(store.lookups.get(), 1);
    assert_eq!(store.writes.get(), 0);
}

#[test]
fn update_and_delete_existing_rows() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);
    assert!(service.create(quarterback(12)).is_persisted());

    let mut changed = quarterback(12);
    changed.team = Some(" New England ".to_string());
    assert!(service.update(changed).is_persisted());
    let stored: NflRoster = service.get(&RecordKey::Id(12)).unwrap().unwrap();
    assert_eq!(stored.team.as_deref(), Some("New England"));

    assert!(service.delete(quarterback(12)).is_persisted());
    assert!(service.get::<NflRoster>(&RecordKey::Id(12)).unwrap().is_none());

    let again = expect_rejection(service.delete(quarterback(12)));
    assert_eq!(again.class(), RejectionClass::NotFound);
}

#[test]
fn duplicate_create_is_an_operation_failure() {
    let conn = open_db_in_memory().unwrap();
    let pipeline = MutationPipeline::new(SqliteRosterStore::new(&conn));
    assert!(pipeline.run(quarterback(7), MutationKind::Create).is_persisted());

    let rejection = expect_rejection(pipeline.run(quarterback(7), MutationKind::Create));
    assert_eq!(rejection.stage(), PipelineStage::Persist);
    assert_eq!(rejection.class(), RejectionClass::NotFound);
    assert_eq!(
        rejection.messages(),
        vec!["could not create nfl_roster row 7".to_string()]
    );
}

#[test]
fn into_parts_populates_exactly_one_side() {
    let store = CountingStore::default();
    let pipeline = MutationPipeline::new(&store);

    let (record, messages) = pipeline.run(quarterback(3), MutationKind::Create).into_parts();
    assert!(record.is_some());
    assert!(messages.is_empty());

    let mut bad = quarterback(3);
    bad.team = Some("javascript:void(0)".to_string());
    let (record, messages) = pipeline.run(bad, MutationKind::Create).into_parts();
    assert!(record.is_none());
    assert_eq!(messages.len(), 1);
}

#[test]
fn sport_scope_rejects_positions_from_other_leagues() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::with_validator(&conn, FieldValidator::new(PositionScope::Sport));

    let record = NbaRoster {
        player_id: 23,
        position: Some("QB".to_string()),
        ..NbaRoster::default()
    };
    let rejection = expect_rejection(service.create(record));
    assert_eq!(rejection.class(), RejectionClass::BadRequest);

    let record = NbaRoster {
        player_id: 23,
        position: Some("sf".to_string()),
        ..NbaRoster::default()
    };
    assert!(service.create(record).is_persisted());
}

#[test]
fn mlb_rows_use_text_keys() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);

    let record = MlbRoster {
        player_id: "poseybu01".to_string(),
        first_name: Some(" Buster ".to_string()),
        team_name: Some("San Francisco Giants".to_string()),
        position: Some("C".to_string()),
        throws: Some("R".to_string()),
        ..MlbRoster::default()
    };
    assert!(service.apply(record, MutationKind::Create).is_persisted());

    let stored: MlbRoster = service
        .get(&RecordKey::Code("poseybu01".to_string()))
        .unwrap()
        .unwrap();
    assert_eq!(stored.first_name.as_deref(), Some("Buster"));

    let missing = MlbRoster {
        player_id: "nobody01".to_string(),
        ..MlbRoster::default()
    };
    let rejection = expect_rejection(service.update(missing));
    assert_eq!(
        rejection,
        MutationRejection::NotFound {
            key: RecordKey::Code("nobody01".to_string())
        }
    );
}

#[test]
fn script_in_text_key_is_blocked_at_scan() {
    let store = CountingStore::default();
    let pipeline = MutationPipeline::new(&store);

    let record = MlbRoster {
        player_id: "<script>alert(1)</script>".to_string(),
        ..MlbRoster::default()
    };
    let rejection = expect_rejection(pipeline.run(record, MutationKind::Create));
    assert_eq!(rejection.stage(), PipelineStage::Scan);
    assert!(rejection.messages()[0].contains("field 'PlayerID'"));
    assert_eq!(store.writes.get(), 0);
}

#[test]
fn baseball_positions_are_persisted() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);

    for (player_id, position) in [("troutmi01", "CF"), ("lindofr01", "SS"), ("colege01", "SP")] {
        let record = MlbRoster {
            player_id: player_id.to_string(),
            position: Some(position.to_string()),
            ..MlbRoster::default()
        };
        assert!(service.create(record).is_persisted(), "{position}");
    }

    let stored = service.list::<MlbRoster>().unwrap();
    let positions: Vec<_> = stored.iter().map(|row| row.position.as_deref()).collect();
    assert_eq!(positions, vec![Some("SP"), Some("SS"), Some("CF")]);
}

#[test]
fn blank_text_key_never_reaches_the_table() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);
    let valid = MlbRoster {
        player_id: "troutmi01".to_string(),
        ..MlbRoster::default()
    };
    assert!(service.create(valid).is_persisted());

    let blank = MlbRoster {
        player_id: "  ".to_string(),
        first_name: Some("Nobody".to_string()),
        ..MlbRoster::default()
    };
    let rejection = expect_rejection(service.create(blank));
    assert_eq!(rejection.class(), RejectionClass::BadRequest);

    assert_eq!(service.list::<MlbRoster>().unwrap().len(), 1);
}
