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

impl Environment {
    /// Log filter used when `PARCEL_LOG_LEVEL` is unset.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Environment::Development => "info",
            Environment::Test | Environment::Production => "warn",
        }
    }

    /// Colored log output is for interactive development only.
    #[must_use]
    pub fn ansi_logs(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Total SevenEleven submissions allowed per lookup, first try included.
    pub seven_eleven_max_attempts: u32,
    pub tesseract_bin: String,
    pub lsa_base_url: String,
    pub batch_concurrency: usize,
}

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
pub const DEFAULT_SEVEN_ELEVEN_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_TESSERACT_BIN: &str = "tesseract";
pub const DEFAULT_LSA_BASE_URL: &str = "http://localhost:8000";
