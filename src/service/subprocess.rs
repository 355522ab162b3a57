use std::{process::Stdio, time::Duration};

use anyhow::anyhow;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use crate::service::{Restart, Service, ServiceError, ServiceResult};

/// Delay before a failed subprocess is launched again.
pub const SUBPROCESS_RESTART_DELAY: Duration = Duration::from_secs(5);

/// A service that runs an external command.
///
/// The child inherits the caller's stdout and stderr. It is killed when the
/// run is cancelled, and relaunched after [`SUBPROCESS_RESTART_DELAY`]
/// whenever it exits with a failure.
#[derive(Debug, Clone)]
pub struct Subprocess {
    name: String,
    cmd: Vec<String>,
}

impl Subprocess {
    /// `cmd[0]` is the program, the rest are its arguments.
    pub fn new<I, S>(name: impl Into<String>, cmd: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            cmd: cmd.into_iter().map(Into::into).collect(),
        }
    }

    pub fn command(&self) -> &[String] {
        &self.cmd
    }
}

impl Service for Subprocess {
    fn id(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> ServiceResult {
        if self.cmd.is_empty() {
            return Err(anyhow!("no command was given").into());
        }
        Ok(())
    }

    async fn run(&mut self, token: CancellationToken) -> ServiceResult {
        let Some((program, args)) = self.cmd.split_first() else {
            return Err(anyhow!("no command was given").into());
        };

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()?;

        let exited = tokio::select! {
            status = child.wait() => Some(status),
            _ = token.cancelled() => None,
        };

        let Some(status) = exited else {
            child.kill().await?;
            return Err(anyhow!("{program} killed on shutdown").into());
        };

        let status = status?;
        if !status.success() {
            return Err(anyhow!("{program} exited with {status}").into());
        }
        Ok(())
    }

    fn restart_policy(&self, _error: &ServiceError) -> Restart {
        Restart::After(SUBPROCESS_RESTART_DELAY)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn empty_command_fails_validation() {
        let service = Subprocess::new("empty", Vec::<String>::new());
        let err = Service::validate(&service).unwrap_err();
        assert_eq!(err.to_string(), "no command was given");
    }

    #[test]
    fn always_restarts_after_fixed_delay() {
        let service = Subprocess::new("sh", ["true"]);
        assert_eq!(service.id(), "sh");
        assert!(Service::validate(&service).is_ok());
        let err: ServiceError = "boom".into();
        assert_eq!(
            service.restart_policy(&err),
            Restart::After(SUBPROCESS_RESTART_DELAY)
        );
    }

    #[tokio::test]
    async fn successful_command_returns_ok() {
        let mut service = Subprocess::new("true", ["true"]);
        assert!(service.run(CancellationToken::new()).await.is_ok());
    }

    #[tokio::test]
    async fn failing_command_reports_exit_status() {
        let mut service = Subprocess::new("false", ["false"]);
        let err = service.run(CancellationToken::new()).await.unwrap_err();
        assert!(err.to_string().contains("false exited with"));
    }

    #[tokio::test]
    async fn missing_program_is_an_error() {
        let mut service = Subprocess::new("missing", ["/nonexistent/definitely-not-here"]);
        assert!(service.run(CancellationToken::new()).await.is_err());
    }

    #[tokio::test]
    async fn cancellation_kills_the_child() {
        let mut service = Subprocess::new("sleeper", ["sleep", "30"]);
        let token = CancellationToken::new();

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            canceller.cancel();
        });

        let result = tokio::time::timeout(Duration::from_secs(10), service.run(token))
            .await
            .expect("child was not killed on cancellation");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("killed on shutdown"));
    }
}
