use crate::app_config::{AppConfig, Environment, Service, ServiceEndpoint};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let endpoint = |service: Service| -> Result<Option<ServiceEndpoint>, ConfigError> {
        let Ok(raw) = lookup(service.url_var()) else {
            return Ok(None);
        };
        let base_url = raw.trim().to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidEnvVar {
                var: service.url_var().to_string(),
                reason: format!("expected an http(s) URL, got \"{base_url}\""),
            });
        }
        let api_key = lookup(service.key_var())
            .ok()
            .filter(|key| !key.trim().is_empty());
        Ok(Some(ServiceEndpoint { base_url, api_key }))
    };

    let env = parse_environment(&or_default("TRENDCAST_ENV", "development"))?;
    let log_level = or_default("TRENDCAST_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("TRENDCAST_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TRENDCAST_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("TRENDCAST_USER_AGENT", "trendcast/0.1 (content-pipeline)");

    Ok(AppConfig {
        env,
        log_level,
        request_timeout_secs,
        user_agent,
        trends: endpoint(Service::Trends)?,
        script: endpoint(Service::Script)?,
        video: endpoint(Service::Video)?,
        publish: endpoint(Service::Publish)?,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TRENDCAST_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
