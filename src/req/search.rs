use wikiproc::WriteUrl;

use crate::validate::{ValidationError, Validator};

pub const DEFAULT_LIMIT: u32 = 10;

#[derive(WriteUrl, Clone, Debug)]
#[wp(prepend_all = "sr")]
pub struct ListSearch {
    pub search: String,
    pub limit: u32,
}

impl ListSearch {
    pub fn new(search: &str, limit: u32) -> Result<Self, ValidationError> {
        Validator::default()
            .range("limit", Some(limit), 1, 500)
            .finish()?;
        Ok(Self {
            search: search.to_owned(),
            limit,
        })
    }
}
