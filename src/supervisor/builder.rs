use crate::{
    service::{DynServiceBox, Service},
    Supervisor,
};

/// Builds a `Supervisor` from an ordered list of services.
///
/// Order only affects validation: services are validated in insertion order
/// and the first failure is reported. Once started they all run concurrently.
pub struct SupervisorBuilder {
    services: Vec<DynServiceBox>,
}

impl SupervisorBuilder {
    /// Creates a builder with no services.
    pub fn new() -> Self {
        Self {
            services: Vec::new(),
        }
    }

    /// Adds a service to the supervisor.
    pub fn with_service(mut self, service: impl Service) -> Self {
        self.services.push(Box::new(service));
        self
    }

    /// Adds several services of the same type.
    pub fn with_services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Service,
    {
        for service in services {
            self = self.with_service(service);
        }
        self
    }

    /// Constructs the `Supervisor`.
    pub fn build(self) -> Supervisor {
        Supervisor {
            services: self.services,
        }
    }
}

impl Default for SupervisorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
