use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but holds an invalid value.
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
/// Returns `ConfigError` if a variable is present but holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// config. Only malformed values are rejected.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

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

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected a boolean, got '{other}'"),
            }),
        }
    };

    let env = parse_environment(&or_default("YYSK_ENV", "development"))?;
    let log_level = or_default("YYSK_LOG_LEVEL", "info");

    let service_base_url = parse_base_url(&or_default(
        "YYSK_SERVICE_BASE_URL",
        "https://api.yyskweb.com",
    ))?;
    let access_key = or_default("YYSK_ACCESS_KEY", "");
    let presets_path = lookup("YYSK_PRESETS_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let prewarm_enabled = parse_bool("YYSK_PREWARM_ENABLED", "true")?;
    let prewarm_timeout_secs = parse_u64("YYSK_PREWARM_TIMEOUT_SECS", "30")?;
    let prewarm_user_agent = or_default(
        "YYSK_PREWARM_USER_AGENT",
        "YYSK-RSSHUB/1.0 (yysk.mygo@gmail.com)",
    );
    let prewarm_max_retries = parse_u32("YYSK_PREWARM_MAX_RETRIES", "0")?;
    let prewarm_backoff_base_secs = parse_u64("YYSK_PREWARM_BACKOFF_BASE_SECS", "1")?;
    let warm_ttl_secs = parse_u64("YYSK_WARM_TTL_SECS", "3600")?;

    Ok(AppConfig {
        env,
        log_level,
        service_base_url,
        access_key,
        presets_path,
        prewarm_enabled,
        prewarm_timeout_secs,
        prewarm_user_agent,
        prewarm_max_retries,
        prewarm_backoff_base_secs,
        warm_ttl_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "YYSK_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Checks that the service base URL is absolute http(s) and strips trailing slashes.
fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty());

    if !has_host {
        return Err(ConfigError::InvalidEnvVar {
            var: "YYSK_SERVICE_BASE_URL".to_string(),
            reason: format!("expected an absolute http(s) URL, got '{raw}'"),
        });
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
