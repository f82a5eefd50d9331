use serde::Deserialize;

use crate::validate::{ValidationError, Validator};
use crate::UA;

pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Construction parameters for a [`Client`](crate::Client). Both settings fall
/// back to the English Wikipedia endpoint and the crate's user agent.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    #[serde(alias = "baseURL")]
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        Validator::default()
            .non_blank("base_url", self.base_url.as_deref())
            .non_blank("user_agent", self.user_agent.as_deref())
            .finish()
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(UA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert!(config.user_agent().starts_with("wikimedia-rs/"));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn from_json() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"baseURL": "https://de.wikipedia.org/w/api.php", "userAgent": "MyBot/1.0"}"#,
        )
        .unwrap();
        assert_eq!(config.base_url(), "https://de.wikipedia.org/w/api.php");
        assert_eq!(config.user_agent(), "MyBot/1.0");
    }

    #[test]
    fn empty_strings_are_rejected() {
        let config = ClientConfig {
            base_url: Some(String::new()),
            user_agent: Some(String::new()),
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.fields().collect::<Vec<_>>(), ["base_url", "user_agent"]);
    }
}
