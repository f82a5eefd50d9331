use serde::Deserialize;
use wikiproc::WriteUrl;

use crate::validate::{ValidationError, Validator};

#[derive(WriteUrl, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LinkDirection {
    Ascending,
    Descending,
}

#[derive(WriteUrl, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AllLinksProp {
    Ids,
    Title,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AllLinksOptions {
    pub from: Option<String>,
    pub to: Option<String>,
    pub prefix: Option<String>,
    #[serde(default)]
    pub unique: bool,
    /// Defaults to `title`. An empty list is sent as an empty `alprop`.
    pub properties: Option<Vec<AllLinksProp>>,
    pub namespace: Option<i32>,
    pub limit: Option<u32>,
    pub direction: Option<LinkDirection>,
}

impl AllLinksOptions {
    pub fn validate(&self) -> Result<(), ValidationError> {
        Validator::default()
            .range("namespace", self.namespace, -2, 5501)
            .range("limit", self.limit, 1, 500)
            .finish()
    }
}

#[derive(WriteUrl, Clone, Debug)]
#[wp(prepend_all = "al")]
pub struct ListAllLinks {
    pub from: Option<String>,
    pub to: Option<String>,
    pub prefix: Option<String>,
    pub unique: bool,
    pub prop: Vec<AllLinksProp>,
    pub namespace: Option<i32>,
    pub limit: Option<u32>,
    #[wp(name = "aldir")]
    pub direction: Option<LinkDirection>,
}

impl ListAllLinks {
    pub fn new(options: AllLinksOptions) -> Result<Self, ValidationError> {
        options.validate()?;
        Ok(Self {
            from: options.from,
            to: options.to,
            prefix: options.prefix,
            unique: options.unique,
            prop: options.properties.unwrap_or_else(|| vec![AllLinksProp::Title]),
            namespace: options.namespace,
            limit: options.limit,
            direction: options.direction,
        })
    }
}
