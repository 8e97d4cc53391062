use crate::app_config::{AppConfig, Environment, ResultsLayout};
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
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.is_empty()) };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let base_url = require("STOREFRONT_BASE_URL")?;
    let community_id = require("STOREFRONT_COMMUNITY_ID")?;
    let effective_account_id = optional("STOREFRONT_EFFECTIVE_ACCOUNT_ID");

    let env = parse_environment(&or_default("STOREFRONT_ENV", "development"))?;
    let log_level = or_default("STOREFRONT_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("STOREFRONT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("STOREFRONT_USER_AGENT", "storefront/0.1 (search-session)");
    let results_layout = parse_results_layout(&or_default("STOREFRONT_RESULTS_LAYOUT", "grid"))?;

    let comparison_cap = parse_usize("STOREFRONT_COMPARISON_CAP", "3")?;
    if comparison_cap == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOREFRONT_COMPARISON_CAP".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let landing_category_id = optional("STOREFRONT_LANDING_CATEGORY_ID");
    let field_mapping_path = optional("STOREFRONT_FIELD_MAPPING_PATH").map(PathBuf::from);

    Ok(AppConfig {
        env,
        base_url,
        community_id,
        effective_account_id,
        log_level,
        request_timeout_secs,
        user_agent,
        results_layout,
        comparison_cap,
        landing_category_id,
        field_mapping_path,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOREFRONT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_results_layout(s: &str) -> Result<ResultsLayout, ConfigError> {
    match s {
        "grid" => Ok(ResultsLayout::Grid),
        "list" => Ok(ResultsLayout::List),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOREFRONT_RESULTS_LAYOUT".to_string(),
            reason: format!("expected 'grid' or 'list', got '{other}'"),
        }),
    }
}
