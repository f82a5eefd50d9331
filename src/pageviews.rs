//! Per-article pageview statistics from the Wikimedia REST metrics API.
//!
//! Unlike the Action API these requests carry everything in the path:
//! `{access}/{agent}/{title}/{granularity}/{start}/{end}`.

use chrono::NaiveDate;
use reqwest::Url;
use serde::Deserialize;

use crate::validate::{Constraint, ValidationError, Validator};

pub const METRICS_URL: &str =
    "https://wikimedia.org/api/rest_v1/metrics/pageviews/per-article/en.wikipedia";

/// Days covered when no start date is given.
pub const DEFAULT_SPAN_DAYS: i64 = 30;

const DATE_FORMAT: &str = "%Y%m%d";

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Granularity {
    #[default]
    Daily,
    Monthly,
}

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Access {
    #[default]
    AllAccess,
    Desktop,
    MobileApp,
    MobileWeb,
}

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Agent {
    #[default]
    AllAgents,
    User,
    Spider,
    Bot,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
        }
    }
}

impl Access {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllAccess => "all-access",
            Self::Desktop => "desktop",
            Self::MobileApp => "mobile-app",
            Self::MobileWeb => "mobile-web",
        }
    }
}

impl Agent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllAgents => "all-agents",
            Self::User => "user",
            Self::Spider => "spider",
            Self::Bot => "bot",
        }
    }
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageViewsOptions {
    /// `YYYYMMDD` or `YYYYMMDDHH`.
    pub start: Option<String>,
    /// `YYYYMMDD` or `YYYYMMDDHH`.
    pub end: Option<String>,
    #[serde(default)]
    pub granularity: Granularity,
    #[serde(default)]
    pub access: Access,
    #[serde(default)]
    pub agent: Agent,
}

fn is_timestamp(s: &str) -> bool {
    matches!(s.len(), 8 | 10) && s.bytes().all(|b| b.is_ascii_digit())
}

impl PageViewsOptions {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::default();
        for (field, value) in [("start", &self.start), ("end", &self.end)] {
            if let Some(value) = value {
                v.check(
                    field,
                    is_timestamp(value),
                    Constraint::Format("YYYYMMDD or YYYYMMDDHH"),
                    format_args!("{value:?}"),
                );
            }
        }
        v.finish()
    }
}

/// A resolved pageviews request, every default filled in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageViewsRequest {
    pub title: String,
    pub start: String,
    pub end: String,
    pub granularity: Granularity,
    pub access: Access,
    pub agent: Agent,
}

impl PageViewsRequest {
    /// Missing dates are filled relative to `today`.
    pub fn new(
        title: &str,
        options: PageViewsOptions,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        options.validate()?;
        let start = options.start.unwrap_or_else(|| {
            (today - chrono::Duration::days(DEFAULT_SPAN_DAYS))
                .format(DATE_FORMAT)
                .to_string()
        });
        let end = options
            .end
            .unwrap_or_else(|| today.format(DATE_FORMAT).to_string());
        Ok(Self {
            title: title.to_owned(),
            start,
            end,
            granularity: options.granularity,
            access: options.access,
            agent: options.agent,
        })
    }

    pub fn path(&self) -> String {
        format!(
            "{}/{}/{}/{}/{}/{}",
            self.access.as_str(),
            self.agent.as_str(),
            encode_title(&self.title),
            self.granularity.as_str(),
            self.start,
            self.end,
        )
    }

    pub fn url(&self, base: &Url) -> Result<Url, ::url::ParseError> {
        format!("{}/{}", base.as_str().trim_end_matches('/'), self.path()).parse()
    }
}

/// Escapes everything but `A-Z a-z 0-9 - _ . ~`, so `/` and `! ' ( ) *` in
/// titles never reach the path raw.
pub fn encode_title(title: &str) -> String {
    urlencoding::encode(title).into_owned()
}
