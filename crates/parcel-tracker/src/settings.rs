use parcel_core::{
    AppConfig, DEFAULT_LSA_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SEVEN_ELEVEN_MAX_ATTEMPTS, DEFAULT_TESSERACT_BIN, DEFAULT_USER_AGENT,
};

/// Knobs shared by every tracker built through [`crate::create_tracker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// SevenEleven CAPTCHA ceiling, first submission included.
    pub seven_eleven_max_attempts: u32,
    pub tesseract_bin: String,
    pub lsa_base_url: String,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            seven_eleven_max_attempts: DEFAULT_SEVEN_ELEVEN_MAX_ATTEMPTS,
            tesseract_bin: DEFAULT_TESSERACT_BIN.to_owned(),
            lsa_base_url: DEFAULT_LSA_BASE_URL.to_owned(),
        }
    }
}

impl TrackerSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            seven_eleven_max_attempts: config.seven_eleven_max_attempts,
            tesseract_bin: config.tesseract_bin.clone(),
            lsa_base_url: config.lsa_base_url.clone(),
        }
    }
}
