use std::{env, fmt, fs::read_to_string, net::IpAddr, str::FromStr, time::Duration};

use tracing::{info, warn};

use crate::{country::DEFAULT_COUNTRY_PATTERN, error::ConfigError};

const SECRETS_DIR: &str = "/run/secrets";

pub struct Config {
    pub bind: IpAddr,
    pub port: u16,
    pub password: String,
    pub csv_url: String,
    pub fetch_timeout: Duration,
    pub country_pattern: String,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            bind: try_load("ATLAS_BIND", "0.0.0.0")?,
            port: try_load("RUST_PORT", "8080")?,
            password: read_secret("ATLAS_PASSWORD")?,
            csv_url: read_secret("ATLAS_CSV_URL")?,
            fetch_timeout: Duration::from_secs(try_load("ATLAS_FETCH_TIMEOUT_SECS", "30")?),
            country_pattern: try_load("ATLAS_COUNTRY_PATTERN", DEFAULT_COUNTRY_PATTERN)?,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind", &self.bind)
            .field("port", &self.port)
            .field("password", &"<redacted>")
            .field("csv_url", &self.csv_url)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("country_pattern", &self.country_pattern)
            .finish()
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: fmt::Display,
{
    let raw = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key: key.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Secrets come from the container secret mount first, then the environment.
fn read_secret(secret_name: &str) -> Result<String, ConfigError> {
    let path = format!("{SECRETS_DIR}/{secret_name}");

    match read_to_string(&path) {
        Ok(contents) if !contents.trim().is_empty() => return Ok(contents.trim().to_string()),
        Ok(_) => warn!("{path} is empty, falling back to environment"),
        Err(e) => info!("Could not read {secret_name} from {path} ({e}), falling back to environment"),
    }

    var(secret_name)
        .map(|value| value.trim().to_string())
        .ok_or_else(|| {
            warn!("{secret_name} is not configured");
            ConfigError::Missing(secret_name.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            bind: "127.0.0.1".parse().unwrap(),
            port: 8080,
            password: "hunter2".to_string(),
            csv_url: "https://example.com/addresses.csv".to_string(),
            fetch_timeout: Duration::from_secs(30),
            country_pattern: DEFAULT_COUNTRY_PATTERN.to_string(),
        }
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", sample());

        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("addresses.csv"));
    }

    #[test]
    fn test_default_used_for_unset_key() {
        let port: u16 = try_load("ATLAS_TEST_UNSET_PORT_KEY", "4242").unwrap();
        assert_eq!(port, 4242);
    }

    #[test]
    fn test_invalid_default_is_an_error() {
        let result: Result<u16, _> = try_load("ATLAS_TEST_UNSET_PORT_KEY", "not-a-port");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_missing_secret() {
        let result = read_secret("ATLAS_TEST_SECRET_THAT_DOES_NOT_EXIST");
        assert!(matches!(result, Err(ConfigError::Missing(name)) if name == "ATLAS_TEST_SECRET_THAT_DOES_NOT_EXIST"));
    }
}
