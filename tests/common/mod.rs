use std::sync::{Arc, Mutex};
use std::time::Duration;

use service_supervisor::{CancellationToken, Restart, Service, ServiceError, ServiceResult};
use tokio::time::Instant;

/// What every attempt of a [`RecordingService`] does.
#[allow(unused)]
#[derive(Clone, Copy)]
pub enum Behaviour {
    Succeed,
    Fail,
    BlockUntilCancelled,
}

/// Test service that records the start time of every attempt.
#[derive(Clone)]
pub struct RecordingService {
    pub id: String,
    pub invalid: Option<String>,
    pub behaviour: Behaviour,
    pub restart: Restart,
    pub attempts: Arc<Mutex<Vec<Instant>>>,
}

#[allow(unused)]
impl RecordingService {
    pub fn new(id: &str, behaviour: Behaviour) -> Self {
        Self {
            id: id.to_string(),
            invalid: None,
            behaviour,
            restart: Restart::Never,
            attempts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn restarting_after(mut self, delay: Duration) -> Self {
        self.restart = Restart::After(delay);
        self
    }

    pub fn invalid(mut self, reason: &str) -> Self {
        self.invalid = Some(reason.to_string());
        self
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }

    pub fn attempt_times(&self) -> Vec<Instant> {
        self.attempts.lock().unwrap().clone()
    }
}

impl Service for RecordingService {
    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> ServiceResult {
        match &self.invalid {
            Some(reason) => Err(reason.clone().into()),
            None => Ok(()),
        }
    }

    async fn run(&mut self, token: CancellationToken) -> ServiceResult {
        self.attempts.lock().unwrap().push(Instant::now());
        match self.behaviour {
            Behaviour::Succeed => Ok(()),
            Behaviour::Fail => Err(format!("{} failed", self.id).into()),
            Behaviour::BlockUntilCancelled => {
                token.cancelled().await;
                Err("context cancelled".into())
            }
        }
    }

    fn restart_policy(&self, _error: &ServiceError) -> Restart {
        self.restart
    }
}
