use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the real environment so tests
/// can drive them with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("WCSDK_ENV", "development"))?;
    let log_level = or_default("WCSDK_LOG_LEVEL", "info");

    let consumer_key = lookup("WC_CONSUMER_KEY").ok().filter(|v| !v.is_empty());
    let consumer_secret = lookup("WC_CONSUMER_SECRET")
        .ok()
        .filter(|v| !v.is_empty());

    let db_max_connections = parse_u32("WCSDK_DB_MAX_CONNECTIONS", "5")?;
    let db_min_connections = parse_u32("WCSDK_DB_MIN_CONNECTIONS", "1")?;
    if db_min_connections > db_max_connections {
        return Err(ConfigError::InvalidEnvVar {
            var: "WCSDK_DB_MIN_CONNECTIONS".to_string(),
            reason: format!(
                "{db_min_connections} exceeds WCSDK_DB_MAX_CONNECTIONS ({db_max_connections})"
            ),
        });
    }
    let db_acquire_timeout_secs = parse_u64("WCSDK_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let api_request_timeout_secs = parse_u64("WCSDK_API_REQUEST_TIMEOUT_SECS", "30")?;
    let api_user_agent = or_default("WCSDK_API_USER_AGENT", "wcsdk/0.1 (store-data)");

    Ok(AppConfig {
        database_url,
        env,
        log_level,
        consumer_key,
        consumer_secret,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        api_request_timeout_secs,
        api_user_agent,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "WCSDK_ENV".to_string(),
            reason: format!("expected development, test or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
