use thiserror::Error;

use crate::service::ServiceError;

/// Errors returned by [`Supervisor::execute`](crate::Supervisor::execute).
///
/// Attempt failures are handled by each service's restart policy and never
/// show up here.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SupervisorError {
    /// A service failed its pre-flight check; no service was started.
    #[error("validate[{id}] {source}")]
    Validate { id: String, source: ServiceError },

    /// An attempt failed after the run's token was cancelled. Only the first
    /// one across all services is kept.
    #[error("cancelled[{id}] {source}")]
    Cancelled { id: String, source: ServiceError },
}

impl SupervisorError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            SupervisorError::Validate { .. } => "service_invalid",
            SupervisorError::Cancelled { .. } => "service_cancelled",
        }
    }

    /// Identity of the service the error came from.
    pub fn service_id(&self) -> &str {
        match self {
            SupervisorError::Validate { id, .. } | SupervisorError::Cancelled { id, .. } => id,
        }
    }
}
