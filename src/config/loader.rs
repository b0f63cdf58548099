//! Configuration loading from disk and environment.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ClientConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("configuration invalid: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ClientConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides on top of a loaded configuration.
///
/// `ENDPOINT_URL` replaces the endpoint and `TLS_VERIFY` toggles
/// certificate verification ("false", "no" or "0" disable it).
pub fn apply_env_overrides(config: &mut ClientConfig) {
    if let Ok(url) = env::var("ENDPOINT_URL") {
        if !url.is_empty() {
            config.endpoint.url = url;
        }
    }
    if let Ok(verify) = env::var("TLS_VERIFY") {
        config.tls.verify = !matches!(verify.to_ascii_lowercase().as_str(), "false" | "no" | "0");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_file() {
        let path = env::temp_dir().join("client-balancer-loader-test.toml");
        fs::write(&path, "[endpoint]\nurl = \"http://files.example.com\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.endpoint.url, "http://files.example.com");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_config(Path::new("/definitely/not/a/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_invalid_config_is_rejected_with_all_errors() {
        let path = env::temp_dir().join("client-balancer-loader-invalid.toml");
        fs::write(
            &path,
            "[timeouts]\nconnect_secs = 0\nrequest_secs = 0\n",
        )
        .unwrap();

        match load_config(&path) {
            Err(ConfigError::Validation(errors)) => assert!(errors.len() >= 3),
            other => panic!("expected validation failure, got {other:?}"),
        }

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_env_overrides() {
        env::set_var("ENDPOINT_URL", "http://env.example.com:9000");
        env::set_var("TLS_VERIFY", "false");

        let mut config = ClientConfig::default();
        apply_env_overrides(&mut config);
        assert_eq!(config.endpoint.url, "http://env.example.com:9000");
        assert!(!config.tls.verify);

        env::remove_var("ENDPOINT_URL");
        env::remove_var("TLS_VERIFY");
    }
}
