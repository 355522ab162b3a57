use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::SupervisorError;

#[derive(Debug, Error)]
pub enum SupervisorHandleError {
    #[error(transparent)]
    Supervisor(#[from] SupervisorError),
    #[error("supervisor task failed: {0}")]
    Join(#[from] JoinError),
}

/// Controls a supervisor started with [`Supervisor::run`](crate::Supervisor::run).
#[derive(Debug)]
pub struct SupervisorHandle {
    join_handle: JoinHandle<Result<(), SupervisorError>>,
    token: CancellationToken,
}

impl SupervisorHandle {
    pub(crate) fn new(
        join_handle: JoinHandle<Result<(), SupervisorError>>,
        token: CancellationToken,
    ) -> Self {
        Self { join_handle, token }
    }

    /// Cancels the run's token. Services wind down cooperatively; any service
    /// sleeping before a restart finishes its delay first.
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    /// The token shared by every service of this run.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Whether every supervision loop has terminated.
    pub fn is_finished(&self) -> bool {
        self.join_handle.is_finished()
    }

    /// Waits for the supervisor to finish and returns its result.
    pub async fn wait(self) -> Result<(), SupervisorHandleError> {
        self.join_handle.await??;
        Ok(())
    }
}
