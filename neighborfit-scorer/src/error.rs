//! Errors surfaced by [`MatchingService`](crate::MatchingService).

use std::error::Error;

use neighborfit_core::{AreaId, UserId, ValidationError};
use thiserror::Error;

/// A referenced user or area does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFound {
    /// No account for this user.
    #[error("user {0} not found")]
    User(UserId),
    /// No area with this identity.
    #[error("area {0} not found")]
    Area(AreaId),
    /// Some of the requested areas do not exist.
    #[error("one or more areas not found: {missing:?}")]
    Areas {
        /// Identities with no matching area.
        missing: Vec<AreaId>,
    },
}

/// Failure of an engine operation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Input was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A referenced entity is missing.
    #[error(transparent)]
    NotFound(#[from] NotFound),
    /// A collaborator failed; the original error is kept as the source.
    #[error("{operation} failed")]
    Collaborator {
        /// What the engine was doing.
        operation: &'static str,
        /// The collaborator's own error.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl EngineError {
    /// Wrap a collaborator error raised during `operation`.
    pub fn collaborator<E>(operation: &'static str) -> impl FnOnce(E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        move |source| Self::Collaborator {
            operation,
            source: Box::new(source),
        }
    }
}
