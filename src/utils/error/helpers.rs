//! Helper functions for creating and classifying errors

use super::types::SweepError;

impl SweepError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_options<S: Into<String>>(message: S) -> Self {
        Self::InvalidOptions(message.into())
    }

    pub fn entity_not_found<S: ToString + ?Sized>(id: &S) -> Self {
        Self::EntityNotFound { id: id.to_string() }
    }

    pub fn unit_of_work<S: ToString + ?Sized>(
        id: &S,
        label: impl Into<String>,
        source: anyhow::Error,
    ) -> Self {
        Self::UnitOfWork {
            id: id.to_string(),
            label: label.into(),
            source,
        }
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Whether this error ends a batch run without a report
    pub fn is_fatal_to_run(&self) -> bool {
        matches!(
            self,
            Self::EntityNotFound { .. } | Self::UnitOfWork { .. } | Self::Cancelled
        )
    }

    /// Whether items already admitted may finish before this error is returned
    ///
    /// Fail-fast unit-of-work errors and cancellation drain the pool; anything
    /// else (a missing entity, a storage failure) aborts the run at once.
    pub fn drains_in_flight(&self) -> bool {
        matches!(self, Self::UnitOfWork { .. } | Self::Cancelled)
    }

    /// Identifier of the item that caused the error, if any
    pub fn offending_id(&self) -> Option<&str> {
        match self {
            Self::EntityNotFound { id } | Self::UnitOfWork { id, .. } => Some(id),
            _ => None,
        }
    }
}
