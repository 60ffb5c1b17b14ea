use std::borrow::Cow;
use std::time::Duration;

use crate::error::{ClientError, ClientResult};

/// Connection settings for the operations backend
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig<'a> {
    pub base_url: Cow<'a, str>,
    pub timeout_secs: u64,
    pub refresh_interval_secs: u64,
}

impl<'a> ClientConfig<'a> {
    pub fn new(base_url: impl Into<Cow<'a, str>>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Interval of background dashboard refreshes
    pub fn with_refresh_interval_secs(mut self, secs: u64) -> Self {
        self.refresh_interval_secs = secs.max(1);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Read `OPS_API_URL`, `OPS_API_TIMEOUT_SECS` and `OPS_REFRESH_SECS`,
    /// falling back to the defaults for unset variables.
    pub fn from_env() -> ClientResult<Self> {
        let defaults = Self::default();
        let base_url = std::env::var("OPS_API_URL")
            .map(Cow::Owned)
            .unwrap_or(defaults.base_url);
        let timeout_secs = env_secs("OPS_API_TIMEOUT_SECS", defaults.timeout_secs)?;
        let refresh_interval_secs = env_secs("OPS_REFRESH_SECS", defaults.refresh_interval_secs)?;

        Ok(Self::new(base_url)
            .with_timeout_secs(timeout_secs)
            .with_refresh_interval_secs(refresh_interval_secs))
    }
}

fn env_secs(name: &str, default: u64) -> ClientResult<u64> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| {
                ClientError::Config(format!(
                    "{name} must be a whole number of seconds, got {raw:?}"
                ))
            }),
        Err(_) => Ok(default),
    }
}

impl Default for ClientConfig<'_> {
    fn default() -> Self {
        Self {
            base_url: Cow::Borrowed("http://localhost:8000/api"),
            timeout_secs: 30,
            refresh_interval_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("https://ops.example/api")
            .with_timeout_secs(5)
            .with_refresh_interval_secs(0);

        assert_eq!(config.base_url, "https://ops.example/api");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.refresh_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_env_secs_rejects_garbage() {
        std::env::set_var("OPS_TEST_BAD_SECS", "ten");
        assert!(matches!(
            env_secs("OPS_TEST_BAD_SECS", 30),
            Err(ClientError::Config(_))
        ));
        assert_eq!(env_secs("OPS_TEST_UNSET_SECS", 30).unwrap(), 30);
    }
}
