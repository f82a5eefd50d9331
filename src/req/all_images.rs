use serde::Deserialize;
use wikiproc::WriteUrl;

use crate::validate::{ValidationError, Validator};

/// `aiprop` when the caller does not choose properties.
pub const DEFAULT_PROPS: &[ImageProp] = &[
    ImageProp::Timestamp,
    ImageProp::User,
    ImageProp::Size,
    ImageProp::Url,
    ImageProp::Mime,
    ImageProp::MediaType,
    ImageProp::BitDepth,
];

#[derive(WriteUrl, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageSort {
    Name,
    Timestamp,
}

#[derive(WriteUrl, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
    Newer,
    Older,
}

#[derive(WriteUrl, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BotFilter {
    All,
    Bots,
    NoBots,
}

/// File information properties, shared by `aiprop` and `iiprop`.
#[derive(WriteUrl, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageProp {
    Timestamp,
    User,
    UserId,
    Comment,
    ParsedComment,
    CanonicalTitle,
    Url,
    Size,
    Dimensions,
    Sha1,
    Mime,
    MediaType,
    Metadata,
    CommonMetadata,
    ExtMetadata,
    BitDepth,
    BadFile,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageSearchOptions {
    pub sort: Option<ImageSort>,
    pub direction: Option<SortDirection>,
    /// Only used when sorting by name.
    pub from: Option<String>,
    /// Only used when sorting by name.
    pub to: Option<String>,
    /// Only used when sorting by timestamp.
    pub start: Option<String>,
    /// Only used when sorting by timestamp.
    pub end: Option<String>,
    pub min_size: Option<u32>,
    pub max_size: Option<u32>,
    /// Only used when sorting by timestamp.
    pub user: Option<String>,
    /// Only used when sorting by timestamp.
    pub filter_bots: Option<BotFilter>,
    pub sha1: Option<String>,
    pub properties: Option<Vec<ImageProp>>,
    pub limit: Option<u32>,
}

impl ImageSearchOptions {
    pub fn validate(&self) -> Result<(), ValidationError> {
        Validator::default()
            .at_least("min_size", self.min_size, 1)
            .at_least("max_size", self.max_size, 1)
            .range("limit", self.limit, 1, 500)
            .finish()
    }
}

/// Enumerates files, optionally filtered by a search string.
#[derive(WriteUrl, Clone, Debug)]
#[wp(prepend_all = "ai")]
pub struct ListAllImages {
    pub search: Option<String>,
    pub sort: Option<ImageSort>,
    #[wp(name = "aidir")]
    pub direction: Option<SortDirection>,
    #[wp(flatten)]
    pub range: ImageRange,
    #[wp(name = "aiminsize")]
    pub min_size: Option<u32>,
    #[wp(name = "aimaxsize")]
    pub max_size: Option<u32>,
    pub sha1: Option<String>,
    pub prop: Vec<ImageProp>,
    pub limit: Option<u32>,
}

/// The bounds that apply to the chosen sort order. The API rejects bounds
/// of the other order, so only one group is ever sent.
#[derive(WriteUrl, Clone, Debug, PartialEq, Eq)]
#[wp(unnamed)]
pub enum ImageRange {
    Name {
        from: Option<String>,
        to: Option<String>,
    },
    Timestamp {
        start: Option<String>,
        end: Option<String>,
        user: Option<String>,
        filterbots: Option<BotFilter>,
    },
}

impl ListAllImages {
    pub fn new(query: &str, options: ImageSearchOptions) -> Result<Self, ValidationError> {
        options.validate()?;
        let ImageSearchOptions {
            sort,
            direction,
            from,
            to,
            start,
            end,
            min_size,
            max_size,
            user,
            filter_bots,
            sha1,
            properties,
            limit,
        } = options;

        let range = match sort {
            None | Some(ImageSort::Name) => ImageRange::Name { from, to },
            Some(ImageSort::Timestamp) => ImageRange::Timestamp {
                start,
                end,
                user,
                filterbots: filter_bots,
            },
        };

        Ok(Self {
            search: Some(query.to_owned()).filter(|q| !q.is_empty()),
            sort,
            direction,
            range,
            min_size,
            max_size,
            sha1,
            prop: properties.unwrap_or_else(|| DEFAULT_PROPS.to_vec()),
            limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_selects_range_group() {
        let options = ImageSearchOptions {
            from: Some("A".into()),
            start: Some("2024-01-01".into()),
            user: Some("TestUser".into()),
            ..Default::default()
        };

        let by_name = ListAllImages::new("x", options.clone()).unwrap();
        assert_eq!(
            by_name.range,
            ImageRange::Name {
                from: Some("A".into()),
                to: None
            }
        );

        let by_time = ListAllImages::new(
            "x",
            ImageSearchOptions {
                sort: Some(ImageSort::Timestamp),
                ..options
            },
        )
        .unwrap();
        assert_eq!(
            by_time.range,
            ImageRange::Timestamp {
                start: Some("2024-01-01".into()),
                end: None,
                user: Some("TestUser".into()),
                filterbots: None,
            }
        );
    }

    #[test]
    fn options_from_json() {
        let options: ImageSearchOptions = serde_json::from_value(serde_json::json!({
            "sort": "timestamp",
            "filterBots": "nobots",
            "minSize": 1000,
            "properties": ["timestamp", "mediatype", "extmetadata"],
        }))
        .unwrap();
        assert_eq!(options.sort, Some(ImageSort::Timestamp));
        assert_eq!(options.filter_bots, Some(BotFilter::NoBots));
        assert_eq!(options.min_size, Some(1000));
        assert_eq!(
            options.properties.as_deref(),
            Some(&[ImageProp::Timestamp, ImageProp::MediaType, ImageProp::ExtMetadata][..])
        );
    }

    #[test]
    fn unknown_sort_is_rejected() {
        let res = serde_json::from_value::<ImageSearchOptions>(serde_json::json!({ "sort": "invalid" }));
        assert!(res.is_err());
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let err = ListAllImages::new(
            "x",
            ImageSearchOptions {
                min_size: Some(0),
                max_size: Some(0),
                limit: Some(0),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.fields().collect::<Vec<_>>(), ["min_size", "max_size", "limit"]);
    }
}
