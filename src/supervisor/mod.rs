pub(crate) mod builder;
pub(crate) mod error;
pub(crate) mod handle;
mod slot;

use std::{fmt, sync::Arc};

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::{
    service::{DynServiceBox, Restart},
    supervisor::{handle::SupervisorHandle, slot::ErrorSlot},
    SupervisorError,
};

/// How a supervision loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Exit {
    /// The attempt returned `Ok(())`.
    Clean,
    /// The restart policy declined another attempt.
    Stopped,
    /// The run's token was cancelled.
    Cancelled,
}

impl fmt::Display for Exit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clean => write!(f, "clean"),
            Self::Stopped => write!(f, "stopped"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Runs a fixed set of services concurrently and restarts them on failure.
///
/// Every service is validated before any of them starts. Each one then gets
/// its own supervision loop: a failed attempt is followed by a wait and a new
/// attempt for as long as the service's restart policy allows it, and a
/// successful attempt ends that service for good. All loops share one
/// cancellation token; the first attempt that fails after it was cancelled
/// provides the error returned by [`execute`](Supervisor::execute).
pub struct Supervisor {
    services: Vec<DynServiceBox>,
}

impl Supervisor {
    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Spawns [`execute`](Supervisor::execute) on the runtime and returns a
    /// handle to stop and await it.
    pub fn run(self, token: CancellationToken) -> SupervisorHandle {
        let run_token = token.clone();
        let join_handle = tokio::spawn(async move { self.execute(run_token).await });
        SupervisorHandle::new(join_handle, token)
    }

    /// Validates every service, then supervises them all until each loop has
    /// terminated.
    ///
    /// Returns `Ok(())` when no attempt failed because of cancellation. This
    /// includes services that were retired by their restart policy.
    ///
    /// # Panics
    ///
    /// A panic inside a service is resumed here once its loop is joined.
    pub async fn execute(self, token: CancellationToken) -> Result<(), SupervisorError> {
        self.validate()?;

        let slot = Arc::new(ErrorSlot::default());
        let mut loops = JoinSet::new();
        for service in self.services {
            loops.spawn(supervise(service, token.clone(), Arc::clone(&slot)));
        }

        while let Some(joined) = loops.join_next().await {
            match joined {
                Ok(_exit) => {}
                Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
                Err(err) => error!(error = %err, "supervision loop aborted"),
            }
        }

        match slot.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Checks every service in order, stopping at the first failure.
    fn validate(&self) -> Result<(), SupervisorError> {
        for service in &self.services {
            service
                .validate()
                .map_err(|source| SupervisorError::Validate {
                    id: service.id().to_string(),
                    source,
                })?;
        }
        Ok(())
    }
}

/// Supervision loop of a single service.
///
/// The wait before a restart always runs to completion: cancellation is only
/// observed at the top of the next iteration.
async fn supervise(
    mut service: DynServiceBox,
    token: CancellationToken,
    slot: Arc<ErrorSlot>,
) -> Exit {
    let exit = loop {
        if token.is_cancelled() {
            info!(id = service.id(), "exiting");
            break Exit::Cancelled;
        }

        debug!(id = service.id(), "starting");
        let err = match service.run_boxed(token.clone()).await {
            Ok(()) => break Exit::Clean,
            Err(err) => err,
        };
        error!(id = service.id(), error = %err, "attempt failed");

        if token.is_cancelled() {
            let kept = slot.offer(SupervisorError::Cancelled {
                id: service.id().to_string(),
                source: err,
            });
            debug!(id = service.id(), kept, "recorded shutdown error");
            break Exit::Cancelled;
        }

        match service.restart_policy(&err) {
            Restart::After(delay) => {
                warn!(id = service.id(), restart_after = ?delay, "waiting to restart");
                tokio::time::sleep(delay).await;
            }
            Restart::Never => {
                warn!(id = service.id(), "restart declined");
                break Exit::Stopped;
            }
        }
    };

    debug!(id = service.id(), %exit, "supervision loop finished");
    exit
}
