//! Endpoint configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::request::Service;

/// Default core banking API
pub const DEFAULT_CORE_URL: &str = "http://localhost:8000";

/// Default investment service API
pub const DEFAULT_INVESTMENT_URL: &str = "http://localhost:8002";

/// Pause before a confirmed creation dismisses its modal
pub const DEFAULT_CONFIRM_DELAY_MS: u64 = 2000;

/// View opened after a successful investor access check
pub const DEFAULT_PORTAL_VIEW: &str = "portal_investidor";

/// Bridge configuration, injected into the builder and the transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Core banking API base URL
    pub core_url: String,
    /// Investment service base URL
    pub investment_url: String,
    /// Confirmation delay in milliseconds
    pub confirm_delay_ms: u64,
    /// How the credit score endpoint takes the document
    pub score_route: ScoreRoute,
    /// Guarded view name
    pub portal_view: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            core_url: DEFAULT_CORE_URL.into(),
            investment_url: DEFAULT_INVESTMENT_URL.into(),
            confirm_delay_ms: DEFAULT_CONFIRM_DELAY_MS,
            score_route: ScoreRoute::Path,
            portal_view: DEFAULT_PORTAL_VIEW.into(),
        }
    }
}

impl ApiConfig {
    /// Base URL for a service
    pub fn base_url(&self, service: Service) -> &str {
        match service {
            Service::Core => &self.core_url,
            Service::Investment => &self.investment_url,
        }
    }

    /// Confirmation delay
    pub fn confirm_delay(&self) -> Duration {
        Duration::from_millis(self.confirm_delay_ms)
    }
}

/// Credit score route shape.
///
/// Both shapes exist on deployed servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreRoute {
    /// `/contas/score/{doc}`
    Path,
    /// `/contas/score?id_cliente={doc}`
    Query,
}
