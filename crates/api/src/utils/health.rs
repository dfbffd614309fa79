//! Health report returned by `GET /health`

use chrono::Utc;
use serde::Serialize;

/// Aggregated health of the server's dependencies.
///
/// `status` is `"ok"` only when every component is healthy, otherwise
/// `"degraded"`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub components: Vec<ComponentHealth>,
    /// Unix timestamp when the check ran
    pub timestamp: i64,
}

impl HealthStatus {
    pub fn new() -> Self {
        Self { status: "ok", components: Vec::new(), timestamp: Utc::now().timestamp() }
    }

    /// Add a component check; one unhealthy component degrades the whole report.
    pub fn add_component(mut self, component: ComponentHealth) -> Self {
        if !component.is_healthy {
            self.status = "degraded";
        }
        self.components.push(component);
        self
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "ok"
    }
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Health status of an individual component
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub is_healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: true, message: None }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: false, message: Some(message.into()) }
    }
}
