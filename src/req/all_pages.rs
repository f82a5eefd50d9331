use serde::Deserialize;
use wikiproc::WriteUrl;

use super::all_links::LinkDirection;
use crate::validate::{ValidationError, Validator};

#[derive(WriteUrl, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RedirectFilter {
    All,
    NonRedirects,
    Redirects,
}

#[derive(WriteUrl, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LangLinksFilter {
    All,
    WithLangLinks,
    WithoutLangLinks,
}

#[derive(WriteUrl, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProtectionType {
    Edit,
    Move,
    Upload,
}

#[derive(WriteUrl, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProtectionLevel {
    AutoConfirmed,
    Sysop,
}

#[derive(WriteUrl, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CascadeFilter {
    All,
    Cascading,
    NonCascading,
}

#[derive(WriteUrl, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProtectionExpiry {
    All,
    Definite,
    Indefinite,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AllPagesOptions {
    pub from: Option<String>,
    pub to: Option<String>,
    pub prefix: Option<String>,
    pub namespace: Option<i32>,
    pub filter_redirects: Option<RedirectFilter>,
    pub filter_lang_links: Option<LangLinksFilter>,
    pub min_size: Option<u32>,
    pub max_size: Option<u32>,
    pub protection_type: Option<Vec<ProtectionType>>,
    pub protection_level: Option<Vec<ProtectionLevel>>,
    pub protection_cascade: Option<CascadeFilter>,
    pub protection_expiry: Option<ProtectionExpiry>,
    pub limit: Option<u32>,
    pub direction: Option<LinkDirection>,
}

impl AllPagesOptions {
    pub fn validate(&self) -> Result<(), ValidationError> {
        Validator::default()
            .range("namespace", self.namespace, 0, 5501)
            .at_least("min_size", self.min_size, 1)
            .at_least("max_size", self.max_size, 1)
            .range("limit", self.limit, 1, 500)
            .finish()
    }
}

#[derive(WriteUrl, Clone, Debug)]
#[wp(prepend_all = "ap")]
pub struct ListAllPages {
    pub from: Option<String>,
    pub to: Option<String>,
    pub prefix: Option<String>,
    pub namespace: Option<i32>,
    #[wp(name = "apfilterredir")]
    pub filter_redirects: Option<RedirectFilter>,
    #[wp(name = "apfilterlanglinks")]
    pub filter_lang_links: Option<LangLinksFilter>,
    #[wp(name = "apminsize")]
    pub min_size: Option<u32>,
    #[wp(name = "apmaxsize")]
    pub max_size: Option<u32>,
    #[wp(name = "apprtype")]
    pub protection_type: Option<Vec<ProtectionType>>,
    #[wp(name = "apprlevel")]
    pub protection_level: Option<Vec<ProtectionLevel>>,
    #[wp(name = "apprfiltercascade")]
    pub protection_cascade: Option<CascadeFilter>,
    #[wp(name = "apprexpiry")]
    pub protection_expiry: Option<ProtectionExpiry>,
    pub limit: Option<u32>,
    #[wp(name = "apdir")]
    pub direction: Option<LinkDirection>,
}

impl ListAllPages {
    pub fn new(options: AllPagesOptions) -> Result<Self, ValidationError> {
        options.validate()?;
        let AllPagesOptions {
            from,
            to,
            prefix,
            namespace,
            filter_redirects,
            filter_lang_links,
            min_size,
            max_size,
            protection_type,
            protection_level,
            protection_cascade,
            protection_expiry,
            limit,
            direction,
        } = options;
        Ok(Self {
            from,
            to,
            prefix,
            namespace,
            filter_redirects,
            filter_lang_links,
            min_size,
            max_size,
            protection_type,
            protection_level,
            protection_cascade,
            protection_expiry,
            limit,
            direction,
        })
    }
}
