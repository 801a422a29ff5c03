use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// The external collaborators a skill can delegate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Trends,
    Script,
    Video,
    Publish,
}

impl Service {
    /// Environment variable holding the service's base URL.
    #[must_use]
    pub fn url_var(self) -> &'static str {
        match self {
            Service::Trends => "TRENDCAST_TRENDS_API_URL",
            Service::Script => "TRENDCAST_SCRIPT_API_URL",
            Service::Video => "TRENDCAST_VIDEO_API_URL",
            Service::Publish => "TRENDCAST_PUBLISH_API_URL",
        }
    }

    /// Environment variable holding the service's bearer token.
    #[must_use]
    pub fn key_var(self) -> &'static str {
        match self {
            Service::Trends => "TRENDCAST_TRENDS_API_KEY",
            Service::Script => "TRENDCAST_SCRIPT_API_KEY",
            Service::Video => "TRENDCAST_VIDEO_API_KEY",
            Service::Publish => "TRENDCAST_PUBLISH_API_KEY",
        }
    }
}

/// Base URL and optional credential for one collaborator.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl std::fmt::Debug for ServiceEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceEndpoint")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub trends: Option<ServiceEndpoint>,
    pub script: Option<ServiceEndpoint>,
    pub video: Option<ServiceEndpoint>,
    pub publish: Option<ServiceEndpoint>,
}

impl AppConfig {
    /// Returns the configured endpoint for `service`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] naming the service's URL variable
    /// when no base URL was configured.
    pub fn endpoint(&self, service: Service) -> Result<&ServiceEndpoint, ConfigError> {
        let endpoint = match service {
            Service::Trends => self.trends.as_ref(),
            Service::Script => self.script.as_ref(),
            Service::Video => self.video.as_ref(),
            Service::Publish => self.publish.as_ref(),
        };
        endpoint.ok_or_else(|| ConfigError::MissingEnvVar(service.url_var().to_string()))
    }
}
