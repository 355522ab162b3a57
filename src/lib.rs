//! # service-supervisor
//!
//! `service-supervisor` runs a fixed set of long-lived Tokio services side by side.
//! Every service is validated up front, restarted on failure according to its own
//! policy, and stopped together with the others through a shared `CancellationToken`.
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use service_supervisor::{CancellationToken, Subprocess, SupervisorBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let token = CancellationToken::new();
//!     let supervisor = SupervisorBuilder::new()
//!         .with_service(Subprocess::new("web", ["python3", "-m", "http.server"]))
//!         .with_service(Subprocess::new("ticker", ["sh", "-c", "while true; do date; sleep 1; done"]))
//!         .build();
//!
//!     let handle = supervisor.run(token);
//!     tokio::signal::ctrl_c().await?;
//!     handle.shutdown();
//!     handle.wait().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Behaviour
//!
//! * **Validation first** – if any service fails [`Service::validate`], nothing is started
//!   and the error is returned as `validate[<id>] <reason>`.
//! * **Independent restarts** – a failed attempt is retried after the delay returned by
//!   [`Service::restart_policy`]. That wait is not cut short by cancellation.
//! * **One-shot success** – a service whose attempt returns `Ok(())` is never restarted.
//! * **Single error** – only the first attempt failing after cancellation is reported.
//!   Services retired by their restart policy are only visible in the logs.
//!
//! Diagnostics are emitted through `tracing`; install a subscriber to see them.

pub use service::{
    subprocess::{Subprocess, SUBPROCESS_RESTART_DELAY},
    Restart, Service, ServiceError, ServiceResult,
};
pub use supervisor::{
    builder::SupervisorBuilder,
    error::SupervisorError,
    handle::{SupervisorHandle, SupervisorHandleError},
    Supervisor,
};
pub use tokio_util::sync::CancellationToken;

mod service;
mod supervisor;
