pub(crate) mod subprocess;

use std::{future::Future, pin::Pin, time::Duration};

use tokio_util::sync::CancellationToken;

pub type ServiceError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type ServiceResult = Result<(), ServiceError>;

/// What the supervisor does after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restart {
    /// Run one more attempt once the delay has fully elapsed.
    After(Duration),
    /// Retire the service. Nothing is reported to the caller of `execute`.
    Never,
}

/// The trait users implement for services managed by the supervisor.
///
/// # Attempt semantics
///
/// The supervisor keeps a single instance per service and calls
/// [`run`](Service::run) on it once per attempt, so state stored in `&mut self`
/// survives restarts.
///
/// * `Ok(())` means the service is done for good. It is never restarted,
///   even though the other services keep running.
/// * `Err(_)` is an abnormal exit. If the token was cancelled by then, the
///   error is the run's shutdown error; otherwise
///   [`restart_policy`](Service::restart_policy) decides what happens next.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use service_supervisor::{CancellationToken, Restart, Service, ServiceError, ServiceResult};
///
/// struct Ticker {
///     name: String,
///     period: Duration,
/// }
///
/// impl Service for Ticker {
///     fn id(&self) -> &str {
///         &self.name
///     }
///
///     fn validate(&self) -> ServiceResult {
///         if self.period.is_zero() {
///             return Err("period must be non-zero".into());
///         }
///         Ok(())
///     }
///
///     async fn run(&mut self, token: CancellationToken) -> ServiceResult {
///         loop {
///             tokio::select! {
///                 _ = token.cancelled() => return Err("cancelled".into()),
///                 _ = tokio::time::sleep(self.period) => println!("tick"),
///             }
///         }
///     }
///
///     fn restart_policy(&self, _error: &ServiceError) -> Restart {
///         Restart::After(Duration::from_secs(1))
///     }
/// }
/// ```
pub trait Service: Send + 'static {
    /// Label used in diagnostics. Uniqueness is up to the caller.
    fn id(&self) -> &str;

    /// Pre-flight check, run for every service before any of them starts.
    fn validate(&self) -> ServiceResult;

    /// Runs one attempt.
    ///
    /// Must watch `token` and return promptly once it is cancelled; the
    /// supervisor has no way to stop an attempt that ignores it.
    fn run(&mut self, token: CancellationToken) -> impl Future<Output = ServiceResult> + Send;

    /// Consulted after a failed attempt that was not caused by cancellation.
    fn restart_policy(&self, error: &ServiceError) -> Restart;
}

/// Dyn-compatible wrapper for `Service`. Not user-facing.
pub(crate) trait DynService: Send + 'static {
    fn id(&self) -> &str;
    fn validate(&self) -> ServiceResult;
    fn run_boxed(
        &mut self,
        token: CancellationToken,
    ) -> Pin<Box<dyn Future<Output = ServiceResult> + Send + '_>>;
    fn restart_policy(&self, error: &ServiceError) -> Restart;
}

impl<T> DynService for T
where
    T: Service,
{
    fn id(&self) -> &str {
        Service::id(self)
    }

    fn validate(&self) -> ServiceResult {
        Service::validate(self)
    }

    fn run_boxed(
        &mut self,
        token: CancellationToken,
    ) -> Pin<Box<dyn Future<Output = ServiceResult> + Send + '_>> {
        Box::pin(Service::run(self, token))
    }

    fn restart_policy(&self, error: &ServiceError) -> Restart {
        Service::restart_policy(self, error)
    }
}

pub(crate) type DynServiceBox = Box<dyn DynService>;
