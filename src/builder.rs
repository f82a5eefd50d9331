use std::borrow::Cow;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Url;
use tracing::debug;

use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::pageviews::METRICS_URL;
use crate::validate::{Constraint, Validator};
use crate::{Client, Result, UA};

pub struct ClientBuilder {
    url: String,
    metrics_url: String,
    client: reqwest::ClientBuilder,
    user_agent: Option<Cow<'static, str>>,
}

impl ClientBuilder {
    pub fn new(api_url: &str) -> Self {
        Self {
            url: api_url.to_owned(),
            metrics_url: METRICS_URL.to_owned(),
            client: reqwest::Client::builder(),
            user_agent: None,
        }
    }

    pub fn enwiki() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let mut this = Self::new(config.base_url());
        if let Some(ua) = &config.user_agent {
            this = this.user_agent(ua.clone());
        }
        Ok(this)
    }

    pub fn user_agent(mut self, ua: impl Into<Cow<'static, str>>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Where pageview requests go, without the trailing `/{access}/...` path.
    pub fn metrics_url(mut self, url: impl Into<String>) -> Self {
        self.metrics_url = url.into();
        self
    }

    /// Starts from a preconfigured transport, e.g. one with timeouts or a proxy.
    pub fn http(mut self, client: reqwest::ClientBuilder) -> Self {
        self.client = client;
        self
    }

    pub fn build(self) -> Result<Client> {
        let url: Url = self.url.parse()?;
        let metrics_url: Url = self.metrics_url.parse()?;
        let ua = self.user_agent.as_deref().unwrap_or(UA);

        Validator::default()
            .non_blank("user_agent", Some(ua))
            .check(
                "base_url",
                url.query().is_none(),
                Constraint::Format("a URL without a query string"),
                &url,
            )
            .finish()?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(ua)?);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        debug!(%url, user_agent = ua, "building client");

        Ok(Client {
            client: self.client.default_headers(headers).build()?,
            url,
            metrics_url,
        })
    }
}

