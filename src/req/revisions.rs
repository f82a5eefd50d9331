use serde::Deserialize;
use wikiproc::WriteUrl;

use crate::validate::{ValidationError, Validator};

/// `rvprop` when the caller does not choose properties. Covers every field a
/// decoded [`Revision`](crate::res::Revision) requires.
pub const DEFAULT_PROPS: &[RvProp] = &[
    RvProp::Ids,
    RvProp::Timestamp,
    RvProp::Flags,
    RvProp::Comment,
    RvProp::Size,
    RvProp::User,
];

#[derive(WriteUrl, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RvProp {
    Ids,
    Timestamp,
    Flags,
    Comment,
    ParsedComment,
    Size,
    Sha1,
    Roles,
    Tags,
    User,
    UserId,
    Content,
}

#[derive(WriteUrl, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RvSlot {
    Main,
    #[wp(name = "*")]
    All,
}

#[derive(WriteUrl, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RevisionDirection {
    Newer,
    Older,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RevisionOptions {
    pub limit: Option<u32>,
    /// Timestamp to start listing from.
    pub start: Option<String>,
    /// Timestamp to stop listing at.
    pub end: Option<String>,
    pub direction: Option<RevisionDirection>,
    pub user: Option<String>,
    pub exclude_user: Option<String>,
    pub tag: Option<String>,
    pub properties: Option<Vec<RvProp>>,
}

impl RevisionOptions {
    pub fn validate(&self) -> Result<(), ValidationError> {
        Validator::default()
            .range("limit", self.limit, 1, 500)
            .finish()
    }
}

#[derive(WriteUrl, Clone, Debug)]
#[wp(prepend_all = "rv")]
pub struct PropRevisions {
    pub prop: Vec<RvProp>,
    pub slots: Option<Vec<RvSlot>>,
    pub limit: Option<u32>,
    pub start: Option<String>,
    pub end: Option<String>,
    #[wp(name = "rvdir")]
    pub direction: Option<RevisionDirection>,
    pub user: Option<String>,
    #[wp(name = "rvexcludeuser")]
    pub exclude_user: Option<String>,
    pub tag: Option<String>,
}

impl PropRevisions {
    /// Content of the latest revision across all slots.
    pub fn content() -> Self {
        Self {
            prop: vec![RvProp::Content],
            slots: Some(vec![RvSlot::All]),
            limit: None,
            start: None,
            end: None,
            direction: None,
            user: None,
            exclude_user: None,
            tag: None,
        }
    }

    pub fn new(options: RevisionOptions) -> Result<Self, ValidationError> {
        options.validate()?;
        Ok(Self {
            prop: options.properties.unwrap_or_else(|| DEFAULT_PROPS.to_vec()),
            slots: None,
            limit: options.limit,
            start: options.start,
            end: options.end,
            direction: options.direction,
            user: options.user,
            exclude_user: options.exclude_user,
            tag: options.tag,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_are_rejected() {
        let res = serde_json::from_value::<RevisionOptions>(serde_json::json!({
            "limit": 5,
            "rvlimit": 5,
        }));
        assert!(res.is_err());
    }

    #[test]
    fn options_from_json() {
        let options: RevisionOptions = serde_json::from_value(serde_json::json!({
            "limit": 5,
            "direction": "newer",
            "excludeUser": "Bot",
            "properties": ["ids", "userid", "parsedcomment"],
        }))
        .unwrap();
        let prop = PropRevisions::new(options).unwrap();
        assert_eq!(prop.limit, Some(5));
        assert_eq!(prop.direction, Some(RevisionDirection::Newer));
        assert_eq!(prop.exclude_user.as_deref(), Some("Bot"));
        assert_eq!(prop.prop, [RvProp::Ids, RvProp::UserId, RvProp::ParsedComment]);
    }

    #[test]
    fn limit_bounds() {
        for limit in [0, 501] {
            let err = PropRevisions::new(RevisionOptions {
                limit: Some(limit),
                ..Default::default()
            })
            .unwrap_err();
            assert!(err.has_field("limit"));
        }
    }
}
