use crate::app_config::{
    AppConfig, Environment, DEFAULT_LSA_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SEVEN_ELEVEN_MAX_ATTEMPTS, DEFAULT_TESSERACT_BIN, DEFAULT_USER_AGENT,
};
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
/// Every variable has a default; only malformed values are errors.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("PARCEL_ENV", "development"));
    let log_level = or_default("PARCEL_LOG_LEVEL", env.default_log_level());

    let request_timeout_secs = parse_u64(
        "PARCEL_REQUEST_TIMEOUT_SECS",
        &DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
    )?;
    let user_agent = or_default("PARCEL_USER_AGENT", DEFAULT_USER_AGENT);

    let seven_eleven_max_attempts = parse_u32(
        "PARCEL_SEVEN_ELEVEN_MAX_ATTEMPTS",
        &DEFAULT_SEVEN_ELEVEN_MAX_ATTEMPTS.to_string(),
    )?;
    if seven_eleven_max_attempts == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PARCEL_SEVEN_ELEVEN_MAX_ATTEMPTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let tesseract_bin = or_default("PARCEL_TESSERACT_BIN", DEFAULT_TESSERACT_BIN);
    let lsa_base_url = or_default("PARCEL_LSA_BASE_URL", DEFAULT_LSA_BASE_URL);

    let batch_concurrency = parse_usize("PARCEL_BATCH_CONCURRENCY", "4")?;
    if batch_concurrency == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PARCEL_BATCH_CONCURRENCY".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        request_timeout_secs,
        user_agent,
        seven_eleven_max_attempts,
        tesseract_bin,
        lsa_base_url,
        batch_concurrency,
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

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_uses_defaults_for_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(cfg.seven_eleven_max_attempts, 5);
        assert_eq!(cfg.tesseract_bin, "tesseract");
        assert_eq!(cfg.lsa_base_url, "http://localhost:8000");
        assert_eq!(cfg.batch_concurrency, 4);
    }

    #[test]
    fn build_app_config_reads_overrides() {
        let mut map = HashMap::new();
        map.insert("PARCEL_ENV", "production");
        map.insert("PARCEL_REQUEST_TIMEOUT_SECS", "5");
        map.insert("PARCEL_SEVEN_ELEVEN_MAX_ATTEMPTS", "2");
        map.insert("PARCEL_TESSERACT_BIN", "/opt/ocr/tesseract");
        map.insert("PARCEL_LSA_BASE_URL", "http://lsa.internal:9000");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Production);
        assert_eq!(cfg.request_timeout_secs, 5);
        assert_eq!(cfg.seven_eleven_max_attempts, 2);
        assert_eq!(cfg.tesseract_bin, "/opt/ocr/tesseract");
        assert_eq!(cfg.lsa_base_url, "http://lsa.internal:9000");
    }

    #[test]
    fn log_level_defaults_follow_environment() {
        for (name, level) in [("development", "info"), ("test", "warn"), ("production", "warn")] {
            let map = HashMap::from([("PARCEL_ENV", name)]);
            let cfg = build_app_config(lookup_from_map(&map)).unwrap();
            assert_eq!(cfg.log_level, level, "PARCEL_ENV={name}");
        }
    }

    #[test]
    fn explicit_log_level_beats_environment_default() {
        let map = HashMap::from([("PARCEL_ENV", "production"), ("PARCEL_LOG_LEVEL", "debug")]);
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.log_level, "debug");
    }

    #[test]
    fn ansi_logs_only_in_development() {
        assert!(Environment::Development.ansi_logs());
        assert!(!Environment::Test.ansi_logs());
        assert!(!Environment::Production.ansi_logs());
    }

    #[test]
    fn build_app_config_rejects_non_numeric_timeout() {
        let mut map = HashMap::new();
        map.insert("PARCEL_REQUEST_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PARCEL_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(PARCEL_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_zero_attempts() {
        let mut map = HashMap::new();
        map.insert("PARCEL_SEVEN_ELEVEN_MAX_ATTEMPTS", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PARCEL_SEVEN_ELEVEN_MAX_ATTEMPTS"),
            "expected InvalidEnvVar(PARCEL_SEVEN_ELEVEN_MAX_ATTEMPTS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_zero_batch_concurrency() {
        let mut map = HashMap::new();
        map.insert("PARCEL_BATCH_CONCURRENCY", "0");
        assert!(build_app_config(lookup_from_map(&map)).is_err());
    }
}
