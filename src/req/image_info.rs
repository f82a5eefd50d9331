use wikiproc::WriteUrl;

use super::all_images::{ImageProp, DEFAULT_PROPS};

#[derive(WriteUrl, Clone, Debug)]
#[wp(prepend_all = "ii")]
pub struct PropImageInfo {
    pub prop: Vec<ImageProp>,
}

impl Default for PropImageInfo {
    fn default() -> Self {
        Self {
            prop: DEFAULT_PROPS.to_vec(),
        }
    }
}
