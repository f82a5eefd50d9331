//! Typed client for the Wikipedia Action API and the Wikimedia pageview
//! metrics.
//!
//! ```no_run
//! # async fn run() -> wikimedia::Result<()> {
//! let client = wikimedia::Client::default_client()?;
//! let res = client.search("TypeScript", Some(5)).await?;
//! for hit in &res.query.search {
//!     println!("{}", hit.title);
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;

use reqwest::header::InvalidHeaderValue;
use reqwest::Url;

extern crate self as wikimedia;

pub mod api;
mod boring_impls;
pub mod builder;
pub mod config;
pub mod pageviews;
pub mod req;
pub mod res;
pub mod url;
pub mod util;
pub mod validate;

#[doc(hidden)]
pub mod macro_support {
    pub use crate::req::HasValue;
    pub use crate::url::{
        BufferedName, NamedEnum, PrependAdaptor, TriStr, UrlParamWriter, WriteUrlParams,
        WriteUrlValue,
    };
}

pub use builder::ClientBuilder;
pub use config::ClientConfig;
pub use req::PageRef;
pub use validate::ValidationError;

#[derive(Clone)]
pub struct Client {
    client: reqwest::Client,
    url: Url,
    metrics_url: Url,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("client", &self.client)
            .field("url", &self.url)
            .field("metrics_url", &self.metrics_url)
            .finish()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    InvalidUrl(#[from] ::url::ParseError),
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidHeaderValue(#[from] InvalidHeaderValue),
    #[error("MediaWiki API returned error: {0}")]
    MediaWiki(serde_json::Value),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub const UA: &str = concat!("wikimedia-rs", "/", env!("CARGO_PKG_VERSION"));

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        ClientBuilder::from_config(&config)?.build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::enwiki()
    }

    /// English Wikipedia with the default user agent.
    pub fn default_client() -> Result<Self> {
        Self::builder().build()
    }

    pub fn base_url(&self) -> &Url {
        &self.url
    }
}
