//! Mutation request pipeline.
//!
//! # Responsibility
//! - Run Scan → Validate → Sanitize → Existence check → Persist for one
//!   write request.
//! - Map every stage outcome to a caller-visible result.
//!
//! # Invariants
//! - Stages run strictly in order; the first rejection is terminal.
//! - Validation sees the received value; the sanitized value is persisted.
//! - The existence check runs for update and delete only.
//! - Store failures are logged and downgraded, never propagated.

use crate::model::roster::RecordKey;
use crate::repo::roster_repo::{RepoError, RosterStore, RosterTable};
use crate::service::existence_gate::ExistenceGate;
use crate::service::field_validator::FieldValidator;
use crate::service::normalizer::sanitize_model;
use crate::service::threat_scanner::{validate_text_fields, Violation};
use log::{error, info, warn};
use std::fmt::{Display, Formatter};

/// Kind of write request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Parses `create`, `update` or `delete`, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "create" => Some(Self::Create),
            "update" => Some(Self::Update),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    fn requires_existing_row(self) -> bool {
        matches!(self, Self::Update | Self::Delete)
    }
}

/// Pipeline stage that produced a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Scan,
    Validate,
    ExistenceCheck,
    Persist,
}

/// Client-visible response class for a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionClass {
    /// Request blocked for security reasons.
    Blocked,
    /// Request carried invalid structured values.
    BadRequest,
    /// Target missing or the operation could not be completed.
    NotFound,
}

/// Why a write request did not reach (or complete) persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationRejection {
    Blocked { violations: Vec<Violation> },
    Invalid { errors: Vec<String> },
    NotFound { key: RecordKey },
    OperationFailed { message: String },
}

impl MutationRejection {
    pub fn stage(&self) -> PipelineStage {
        match self {
            Self::Blocked { .. } => PipelineStage::Scan,
            Self::Invalid { .. } => PipelineStage::Validate,
            Self::NotFound { .. } => PipelineStage::ExistenceCheck,
            Self::OperationFailed { .. } => PipelineStage::Persist,
        }
    }

    pub fn class(&self) -> RejectionClass {
        match self {
            Self::Blocked { .. } => RejectionClass::Blocked,
            Self::Invalid { .. } => RejectionClass::BadRequest,
            Self::NotFound { .. } | Self::OperationFailed { .. } => RejectionClass::NotFound,
        }
    }

    /// Caller-facing detail messages.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Blocked { violations } => violations.iter().map(|v| v.message.clone()).collect(),
            Self::Invalid { errors } => errors.clone(),
            Self::NotFound { key } => vec![format!("record not found: {key}")],
            Self::OperationFailed { message } => vec![message.clone()],
        }
    }
}

impl Display for MutationRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blocked { violations } => write!(
                f,
                "request blocked: {} security violation(s)",
                violations.len()
            ),
            Self::Invalid { errors } => write!(f, "validation failed: {}", errors.join("; ")),
            Self::NotFound { key } => write!(f, "record not found: {key}"),
            Self::OperationFailed { message } => write!(f, "operation failed: {message}"),
        }
    }
}

/// Final result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome<R> {
    /// The sanitized record that was handed to the store.
    Persisted(R),
    Rejected(MutationRejection),
}

impl<R> MutationOutcome<R> {
    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted(_))
    }

    pub fn rejection(&self) -> Option<&MutationRejection> {
        match self {
            Self::Persisted(_) => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }

    /// Splits into `(record, messages)`; exactly one side is populated.
    pub fn into_parts(self) -> (Option<R>, Vec<String>) {
        match self {
            Self::Persisted(record) => (Some(record), Vec::new()),
            Self::Rejected(rejection) => (None, rejection.messages()),
        }
    }
}

/// Orchestrates the security stages in front of a store session.
pub struct MutationPipeline<S: RosterStore> {
    store: S,
    validator: FieldValidator,
}

impl<S: RosterStore> MutationPipeline<S> {
    /// Creates a pipeline with the default (union) position scope.
    pub fn new(store: S) -> Self {
        Self::with_validator(store, FieldValidator::default())
    }

    pub fn with_validator(store: S, validator: FieldValidator) -> Self {
        Self { store, validator }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs every stage for `record`, stopping at the first rejection.
    pub fn run<R: RosterTable>(&self, record: R, kind: MutationKind) -> MutationOutcome<R> {
        let op = kind.as_str();
        let table = R::TABLE;
        let key = record.key();

        let scan = validate_text_fields(&record);
        if !scan.is_ok() {
            warn!(
                "event=mutation_rejected module=service status=rejected stage=scan op={} table={} key={} fields={} violations={}",
                op,
                table,
                key,
                scan.flagged_fields().join(","),
                scan.violations.len()
            );
            return MutationOutcome::Rejected(MutationRejection::Blocked {
                violations: scan.violations,
            });
        }

        let validation = self.validator.validate_model(&record);
        if !validation.is_ok() {
            warn!(
                "event=mutation_rejected module=service status=rejected stage=validate op={} table={} key={} errors={:?}",
                op, table, key, validation.errors
            );
            return MutationOutcome::Rejected(MutationRejection::Invalid {
                errors: validation.errors,
            });
        }

        let record = sanitize_model(record);

        if kind.requires_existing_row()
            && !ExistenceGate::new(&self.store).exists::<R>(&key)
        {
            warn!(
                "event=mutation_rejected module=service status=rejected stage=existence_check op={} table={} key={}",
                op, table, key
            );
            return MutationOutcome::Rejected(MutationRejection::NotFound { key });
        }

        let persisted = match kind {
            MutationKind::Create => self.store.insert(&record).map(|_| ()),
            MutationKind::Update => self.store.update(&record),
            MutationKind::Delete => self.store.delete::<R>(&key),
        };

        match persisted {
            Ok(()) => {
                info!(
                    "event=mutation_applied module=service status=ok op={} table={} key={}",
                    op, table, key
                );
                MutationOutcome::Persisted(record)
            }
            Err(RepoError::NotFound { key, .. }) => {
                warn!(
                    "event=mutation_rejected module=service status=rejected stage=persist op={} table={} key={} reason=row_vanished",
                    op, table, key
                );
                MutationOutcome::Rejected(MutationRejection::NotFound { key })
            }
            Err(err) => {
                error!(
                    "event=mutation_failed module=service status=error stage=persist op={} table={} key={} error={}",
                    op, table, key, err
                );
                MutationOutcome::Rejected(MutationRejection::OperationFailed {
                    message: format!("could not {op} {table} row {key}"),
                })
            }
        }
    }
}
