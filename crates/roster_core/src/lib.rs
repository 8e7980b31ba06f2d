//! Core data-access layer for sports rosters.
//! Every roster write passes the mutation security pipeline in this crate.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod policy;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::roster::{MlbRoster, NbaRoster, NflRoster, NhlRoster, RecordKey, RosterRecord, Sport};
pub use policy::fields::{FieldDescriptor, FieldKind, FieldPolicyTable, FieldRule, SanitizationLevel};
pub use policy::patterns::{PatternRegistry, ThreatCategory};
pub use repo::roster_repo::{
    PositionCode, RepoError, RepoResult, RosterStore, RosterTable, SqliteRosterStore,
};
pub use service::existence_gate::ExistenceGate;
pub use service::field_validator::{validate_model, FieldValidator, PositionScope, ValidationReport};
pub use service::mutation_pipeline::{
    MutationKind, MutationOutcome, MutationPipeline, MutationRejection, PipelineStage,
    RejectionClass,
};
pub use service::normalizer::{sanitize_model, sanitize_value};
pub use service::roster_service::RosterService;
pub use service::threat_scanner::{contains_threat, validate_text_fields, ScanReport, Violation};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
