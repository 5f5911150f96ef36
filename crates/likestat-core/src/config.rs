use crate::app_config::{AppConfig, DEFAULT_API_BASE_URL, DEFAULT_API_VERSION, VK_MAX_PAGE_SIZE};
use crate::ConfigError;

/// Load run configuration from environment variables.
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

/// Load run configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build run configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(ConfigError::MissingEnvVar(var.to_string())),
        }
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim().parse::<i64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_page_limit = |var: &str| -> Result<usize, ConfigError> {
        let value = parse_usize(var, "1000")?;
        if value == 0 || value > VK_MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("must be between 1 and {VK_MAX_PAGE_SIZE}, got {value}"),
            });
        }
        Ok(value)
    };

    let vk_token = require("VK_TOKEN")?;
    let api_version = or_default("LIKESTAT_API_VERSION", DEFAULT_API_VERSION);
    let api_base_url = or_default("LIKESTAT_API_BASE_URL", DEFAULT_API_BASE_URL);

    let owner_id = parse_i64("LIKESTAT_OWNER_ID", "-48632629")?;
    let post_id = parse_u64("LIKESTAT_POST_ID", "12829")?;

    let page_size = parse_page_limit("LIKESTAT_PAGE_SIZE")?;
    let batch_size = parse_page_limit("LIKESTAT_BATCH_SIZE")?;

    let request_timeout_secs = parse_u64("LIKESTAT_REQUEST_TIMEOUT_SECS", "30")?;
    let inter_request_delay_ms = parse_u64("LIKESTAT_INTER_REQUEST_DELAY_MS", "350")?;
    let max_concurrent_batches = parse_usize("LIKESTAT_MAX_CONCURRENT_BATCHES", "1")?;

    let output_dir = PathBuf::from(or_default("LIKESTAT_OUTPUT_DIR", "data"));
    let log_level = or_default("LIKESTAT_LOG_LEVEL", "info");

    Ok(AppConfig {
        vk_token,
        api_version,
        api_base_url,
        owner_id,
        post_id,
        page_size,
        batch_size,
        request_timeout_secs,
        inter_request_delay_ms,
        max_concurrent_batches: max_concurrent_batches.max(1),
        output_dir,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
