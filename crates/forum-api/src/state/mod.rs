//! Shared handler state: the service context and the loaded configuration.

use std::fmt;
use std::sync::Arc;

use forum_common::AppConfig;
use forum_service::ServiceContext;

/// Cheap to clone; axum clones it into every request.
#[derive(Clone)]
pub struct AppState {
    services: Arc<ServiceContext>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(services: ServiceContext, config: AppConfig) -> Self {
        Self {
            services: Arc::new(services),
            config: Arc::new(config),
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.services
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("services", &self.services)
            .field("app", &self.config.app.name)
            .field("env", &self.config.app.env)
            .finish()
    }
}
