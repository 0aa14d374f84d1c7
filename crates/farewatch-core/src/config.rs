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
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

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
        match raw.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected true/false, got '{other}'"),
            }),
        }
    };

    let amadeus_api_key = require("AMADEUS_API_KEY")?;
    let amadeus_api_secret = require("AMADEUS_API_SECRET")?;
    let sheet_endpoint = require("FAREWATCH_SHEET_ENDPOINT")?;
    let sheet_username = require("FAREWATCH_SHEET_USERNAME")?;
    let sheet_password = require("FAREWATCH_SHEET_PASSWORD")?;

    let env = parse_environment(&or_default("FAREWATCH_ENV", "development"));
    let log_level = or_default("FAREWATCH_LOG_LEVEL", "info");

    let origin_iata = or_default("FAREWATCH_ORIGIN_IATA", "LON").to_uppercase();
    let currency = or_default("FAREWATCH_CURRENCY", "GBP").to_uppercase();
    let non_stop_only = parse_bool("FAREWATCH_NON_STOP_ONLY", "false")?;
    let search_max_offers = parse_u32("FAREWATCH_SEARCH_MAX_OFFERS", "10")?;

    let amadeus_base_url = or_default("AMADEUS_BASE_URL", "https://test.api.amadeus.com");

    let chat_webhook_url = lookup("FAREWATCH_CHAT_WEBHOOK_URL").ok();
    let email_api_key = lookup("FAREWATCH_EMAIL_API_KEY").ok();
    let email_from = lookup("FAREWATCH_EMAIL_FROM").ok();
    let email_recipients = lookup("FAREWATCH_EMAIL_RECIPIENTS")
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let request_timeout_secs = parse_u64("FAREWATCH_REQUEST_TIMEOUT_SECS", "30")?;
    let max_retries = parse_u32("FAREWATCH_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("FAREWATCH_RETRY_BACKOFF_BASE_MS", "1000")?;
    let inter_request_delay_ms = parse_u64("FAREWATCH_INTER_REQUEST_DELAY_MS", "2000")?;
    let watch_cron = or_default("FAREWATCH_WATCH_CRON", "0 0 8 * * *");

    Ok(AppConfig {
        env,
        log_level,
        origin_iata,
        currency,
        non_stop_only,
        search_max_offers,
        amadeus_api_key,
        amadeus_api_secret,
        amadeus_base_url,
        sheet_endpoint,
        sheet_username,
        sheet_password,
        chat_webhook_url,
        email_api_key,
        email_from,
        email_recipients,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        inter_request_delay_ms,
        watch_cron,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
