#[derive(Debug, Clone, PartialEq, Eq)]
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

/// Runtime configuration for the farewatch binary and its client crates.
///
/// Loaded once at startup via [`crate::load_app_config`]; everything is plain
/// data so it can be cloned into background jobs.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,

    /// IATA code all searches depart from.
    pub origin_iata: String,
    /// Currency code the provider should quote prices in.
    pub currency: String,
    /// Restrict searches to non-stop itineraries.
    pub non_stop_only: bool,
    /// Maximum offers requested per search.
    pub search_max_offers: u32,

    pub amadeus_api_key: String,
    pub amadeus_api_secret: String,
    pub amadeus_base_url: String,

    pub sheet_endpoint: String,
    pub sheet_username: String,
    pub sheet_password: String,

    pub chat_webhook_url: Option<String>,
    pub email_api_key: Option<String>,
    pub email_from: Option<String>,
    pub email_recipients: Vec<String>,

    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    /// Courtesy delay between provider calls in the destination loop.
    pub inter_request_delay_ms: u64,
    /// Cron expression for the `watch` command's recurring check.
    pub watch_cron: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("origin_iata", &self.origin_iata)
            .field("currency", &self.currency)
            .field("non_stop_only", &self.non_stop_only)
            .field("search_max_offers", &self.search_max_offers)
            .field("amadeus_api_key", &"[redacted]")
            .field("amadeus_api_secret", &"[redacted]")
            .field("amadeus_base_url", &self.amadeus_base_url)
            .field("sheet_endpoint", &self.sheet_endpoint)
            .field("sheet_username", &"[redacted]")
            .field("sheet_password", &"[redacted]")
            .field("chat_webhook_url", &self.chat_webhook_url.as_ref().map(|_| "[redacted]"))
            .field("email_api_key", &self.email_api_key.as_ref().map(|_| "[redacted]"))
            .field("email_from", &self.email_from)
            .field("email_recipients", &self.email_recipients.len())
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("watch_cron", &self.watch_cron)
            .finish()
    }
}
