use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Connection settings for the tax service.
///
/// | key            | default                   |
/// |----------------|---------------------------|
/// | `base_url`     | `http://127.0.0.1:8000`   |
/// | `timeout_secs` | `30`                      |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Address the `/profile` and `/calculate` endpoints hang off.
    pub base_url: String,
    /// Whole-request timeout, connect included.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(
        mut self,
        base_url: impl Into<String>,
    ) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_keys_take_defaults() {
        let config: ClientConfig = serde_json::from_str(r#"{"timeout_secs": 5}"#).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn misspelt_key_is_rejected() {
        let err = serde_json::from_str::<ClientConfig>(r#"{"timeout": 5}"#).unwrap_err();
        assert!(err.to_string().contains("unknown field `timeout`"));
    }
}
