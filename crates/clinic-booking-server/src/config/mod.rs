// SPDX-License-Identifier: Apache-2.0

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use clinic_booking_core::{ENV_CLINIC_DB_PATH, ENV_CLINIC_TOKEN_SECRET};

pub const MIN_TOKEN_SECRET_BYTES: usize = 16;

#[derive(Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub db_path: PathBuf,
    pub token_secret: String,
    pub token_ttl: Duration,
    pub max_body_bytes: usize,
    pub request_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
    pub enable_audit_log: bool,
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            db_path: PathBuf::from("clinic.db"),
            token_secret: String::new(),
            token_ttl: Duration::from_secs(24 * 60 * 60),
            max_body_bytes: 16 * 1024,
            request_timeout: Duration::from_millis(5000),
            cors_allowed_origins: Vec::new(),
            enable_audit_log: false,
            log_json: true,
        }
    }
}

// The token secret is never printed.
impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("db_path", &self.db_path)
            .field("token_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("request_timeout", &self.request_timeout)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("enable_audit_log", &self.enable_audit_log)
            .field("log_json", &self.log_json)
            .finish()
    }
}

pub(crate) fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_list(name: &str) -> Vec<String> {
    env::var(name)
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl ServerConfig {
    /// Reads every `CLINIC_*` variable once; unset or unparsable values fall
    /// back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: env::var("CLINIC_BIND").unwrap_or(defaults.bind_addr),
            db_path: env::var(ENV_CLINIC_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            token_secret: env::var(ENV_CLINIC_TOKEN_SECRET).unwrap_or_default(),
            token_ttl: Duration::from_secs(env_u64(
                "CLINIC_TOKEN_TTL_SECS",
                defaults.token_ttl.as_secs(),
            )),
            max_body_bytes: env_usize("CLINIC_MAX_BODY_BYTES", defaults.max_body_bytes),
            request_timeout: Duration::from_millis(env_u64("CLINIC_REQUEST_TIMEOUT_MS", 5000)),
            cors_allowed_origins: env_list("CLINIC_CORS_ALLOWED_ORIGINS"),
            enable_audit_log: env_bool("CLINIC_ENABLE_AUDIT_LOG", false),
            log_json: env_bool("CLINIC_LOG_JSON", true),
        }
    }
}

pub fn validate_startup_config_contract(cfg: &ServerConfig) -> Result<(), String> {
    if cfg.token_secret.len() < MIN_TOKEN_SECRET_BYTES {
        return Err(format!(
            "{ENV_CLINIC_TOKEN_SECRET} must be set to at least {MIN_TOKEN_SECRET_BYTES} bytes"
        ));
    }
    if cfg.token_ttl.is_zero() {
        return Err("token ttl must be > 0".to_string());
    }
    if cfg.max_body_bytes == 0 {
        return Err("max body bytes must be > 0".to_string());
    }
    if cfg.request_timeout.is_zero() {
        return Err("request timeout must be > 0".to_string());
    }
    if cfg.db_path.as_os_str().is_empty() {
        return Err("database path must not be empty".to_string());
    }
    if let Some(bad) = cfg
        .cors_allowed_origins
        .iter()
        .find(|o| !(o.starts_with("http://") || o.starts_with("https://")))
    {
        return Err(format!("cors origin must be an http(s) origin: {bad}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ServerConfig {
        ServerConfig {
            token_secret: "0123456789abcdef".to_string(),
            ..ServerConfig::default()
        }
    }

    #[test]
    fn startup_config_requires_a_long_enough_secret() {
        let err = validate_startup_config_contract(&ServerConfig::default())
            .expect_err("missing secret");
        assert!(err.contains(ENV_CLINIC_TOKEN_SECRET));

        let short = ServerConfig {
            token_secret: "short".to_string(),
            ..ServerConfig::default()
        };
        assert!(validate_startup_config_contract(&short).is_err());
        validate_startup_config_contract(&valid()).expect("valid config");
    }

    #[test]
    fn startup_config_rejects_zero_limits_and_bad_origins() {
        let zero_body = ServerConfig {
            max_body_bytes: 0,
            ..valid()
        };
        assert!(validate_startup_config_contract(&zero_body).is_err());

        let zero_timeout = ServerConfig {
            request_timeout: Duration::ZERO,
            ..valid()
        };
        assert!(validate_startup_config_contract(&zero_timeout).is_err());

        let origin = ServerConfig {
            cors_allowed_origins: vec!["clinic.example".to_string()],
            ..valid()
        };
        let err = validate_startup_config_contract(&origin).expect_err("bad origin");
        assert!(err.contains("clinic.example"));
    }

    #[test]
    fn debug_output_redacts_the_secret() {
        let rendered = format!("{:?}", valid());
        assert!(!rendered.contains("0123456789abcdef"));
        assert!(rendered.contains("<redacted>"));
    }
}
