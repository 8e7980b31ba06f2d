//! Roster use-case service.
//!
//! # Responsibility
//! - Provide stable create/update/delete/get/list entry points for callers.
//! - Route every write through the mutation pipeline.
//!
//! # Invariants
//! - Write APIs never bypass the pipeline.
//! - Reads go straight to the store.

use crate::model::roster::{RecordKey, RosterRecord, Sport};
use crate::repo::roster_repo::{
    PositionCode, RepoResult, RosterStore, RosterTable, SqliteRosterStore,
};
use crate::service::field_validator::FieldValidator;
use crate::service::mutation_pipeline::{MutationKind, MutationOutcome, MutationPipeline};
use rusqlite::Connection;

/// Use-case service over a SQLite connection.
pub struct RosterService<'conn> {
    pipeline: MutationPipeline<SqliteRosterStore<'conn>>,
}

impl<'conn> RosterService<'conn> {
    /// Creates a service with the default (union) position scope.
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_validator(conn, FieldValidator::default())
    }

    pub fn with_validator(conn: &'conn Connection, validator: FieldValidator) -> Self {
        Self {
            pipeline: MutationPipeline::with_validator(SqliteRosterStore::new(conn), validator),
        }
    }

    pub fn create<R: RosterTable>(&self, record: R) -> MutationOutcome<R> {
        self.pipeline.run(record, MutationKind::Create)
    }

    pub fn update<R: RosterTable>(&self, record: R) -> MutationOutcome<R> {
        self.pipeline.run(record, MutationKind::Update)
    }

    pub fn delete<R: RosterTable>(&self, record: R) -> MutationOutcome<R> {
        self.pipeline.run(record, MutationKind::Delete)
    }

    /// Applies `kind` to `record`.
    pub fn apply<R: RosterTable>(&self, record: R, kind: MutationKind) -> MutationOutcome<R> {
        self.pipeline.run(record, kind)
    }

    /// Gets one row by primary key.
    pub fn get<R: RosterTable>(&self, key: &RecordKey) -> RepoResult<Option<R>> {
        self.pipeline.store().get_by_key(key)
    }

    /// Lists every row of `R`'s roster ordered by primary key.
    pub fn list<R: RosterTable>(&self) -> RepoResult<Vec<R>> {
        self.pipeline.store().list()
    }

    /// Lists the position codes stored for the league of `R`.
    pub fn position_codes<R: RosterRecord>(&self) -> RepoResult<Vec<PositionCode>> {
        self.position_codes_for(R::SPORT)
    }

    pub fn position_codes_for(&self, sport: Sport) -> RepoResult<Vec<PositionCode>> {
        self.pipeline.store().position_codes(sport)
    }
}
