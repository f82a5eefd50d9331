use serde::Deserialize;
use wikiproc::WriteUrl;

use crate::validate::{ValidationError, Validator};

/// Section heading format a caller may ask for.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExtractFormat {
    Plain,
    Wiki,
}

#[derive(WriteUrl, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionFormat {
    Plain,
    Wiki,
    Raw,
}

impl From<ExtractFormat> for SectionFormat {
    fn from(f: ExtractFormat) -> Self {
        match f {
            ExtractFormat::Plain => Self::Plain,
            ExtractFormat::Wiki => Self::Wiki,
        }
    }
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractOptions {
    #[serde(default)]
    pub plain_text: bool,
    pub section_format: Option<ExtractFormat>,
    pub sentences: Option<u32>,
    pub chars: Option<u32>,
    pub limit: Option<u32>,
    #[serde(default)]
    pub intro_only: bool,
    /// Sends section headings raw, overriding `section_format`.
    #[serde(default)]
    pub single_section: bool,
}

impl ExtractOptions {
    pub fn validate(&self) -> Result<(), ValidationError> {
        Validator::default()
            .range("sentences", self.sentences, 1, 10)
            .at_least("chars", self.chars, 1)
            .range("limit", self.limit, 1, 20)
            .finish()
    }
}

#[derive(WriteUrl, Clone, Debug)]
#[wp(prepend_all = "ex")]
pub struct PropExtracts {
    #[wp(name = "explaintext")]
    pub plain_text: bool,
    pub sentences: Option<u32>,
    pub chars: Option<u32>,
    pub limit: Option<u32>,
    pub intro: bool,
    pub sectionformat: Option<SectionFormat>,
}

impl PropExtracts {
    pub fn new(options: ExtractOptions) -> Result<Self, ValidationError> {
        options.validate()?;
        let sectionformat = if options.single_section {
            Some(SectionFormat::Raw)
        } else {
            options.section_format.map(Into::into)
        };
        Ok(Self {
            plain_text: options.plain_text,
            sentences: options.sentences,
            chars: options.chars,
            limit: options.limit,
            intro: options.intro_only,
            sectionformat,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_section_wins() {
        let prop = PropExtracts::new(ExtractOptions {
            section_format: Some(ExtractFormat::Wiki),
            single_section: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(prop.sectionformat, Some(SectionFormat::Raw));

        let prop = PropExtracts::new(ExtractOptions {
            section_format: Some(ExtractFormat::Wiki),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(prop.sectionformat, Some(SectionFormat::Wiki));
    }

    #[test]
    fn bounds() {
        for options in [
            ExtractOptions { sentences: Some(11), ..Default::default() },
            ExtractOptions { sentences: Some(0), ..Default::default() },
            ExtractOptions { chars: Some(0), ..Default::default() },
            ExtractOptions { limit: Some(21), ..Default::default() },
        ] {
            assert!(PropExtracts::new(options).is_err());
        }
        assert!(PropExtracts::new(ExtractOptions {
            sentences: Some(10),
            chars: Some(1),
            limit: Some(20),
            ..Default::default()
        })
        .is_ok());
    }

    #[test]
    fn raw_is_not_a_caller_format() {
        let res = serde_json::from_value::<ExtractOptions>(serde_json::json!({ "sectionFormat": "raw" }));
        assert!(res.is_err());
        let res = serde_json::from_value::<ExtractOptions>(serde_json::json!({ "sectionFormat": "invalid" }));
        assert!(res.is_err());
    }
}
