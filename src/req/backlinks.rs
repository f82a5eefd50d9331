use wikiproc::WriteUrl;

use crate::validate::{ValidationError, Validator};

pub const DEFAULT_LIMIT: u32 = 10;

/// Pages linking to `title`.
#[derive(WriteUrl, Clone, Debug)]
#[wp(prepend_all = "bl")]
pub struct ListBacklinks {
    pub title: String,
    pub limit: u32,
}

impl ListBacklinks {
    pub fn new(title: &str, limit: u32) -> Result<Self, ValidationError> {
        Validator::default()
            .range("limit", Some(limit), 1, 500)
            .finish()?;
        Ok(Self {
            title: title.to_owned(),
            limit,
        })
    }
}
