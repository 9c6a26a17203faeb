use std::sync::Arc;

use fest_db::registry::Registry;
use fest_registration::RegistrationWorkflow;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Storage backing, Postgres or in-memory.
    pub registry: Arc<dyn Registry>,
    /// Code issuance and program enrollment over `registry`.
    pub workflow: Arc<RegistrationWorkflow>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(registry: Arc<dyn Registry>, config: ServerConfig) -> Self {
        let workflow = RegistrationWorkflow::new(Arc::clone(&registry))
            .with_max_code_attempts(config.code_issue_max_attempts);
        Self {
            registry,
            workflow: Arc::new(workflow),
            config: Arc::new(config),
        }
    }
}
