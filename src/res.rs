//! Response shapes.
//!
//! Deserializing into these types is the shape check: a missing required
//! field, a wrong primitive type or an unknown variant fails with a decode
//! error. Unknown fields are ignored.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::util::flag;

/// The envelope every Action API query answers with.
#[derive(Deserialize, Debug, Clone)]
pub struct QueryResponse<Q> {
    #[serde(default, deserialize_with = "flag")]
    pub batchcomplete: bool,
    /// Continuation parameters. Passed through, never followed.
    #[serde(rename = "continue")]
    pub cont: Option<Map<String, Value>>,
    pub limits: Option<Map<String, Value>>,
    pub warnings: Option<Map<String, Value>>,
    pub query: Q,
}

/// `query` of a prop request. Keys are page ids as strings, `"-1"` and below
/// for pages that do not exist.
#[derive(Deserialize, Debug, Clone)]
pub struct Pages<P> {
    pub pages: HashMap<String, P>,
    pub normalized: Option<Vec<Normalized>>,
}

impl<P> Pages<P> {
    pub fn values(&self) -> impl Iterator<Item = &P> {
        self.pages.values()
    }
}

impl<Ext> Pages<PageEntry<Ext>> {
    /// The entry for `title`, following title normalization.
    pub fn by_title(&self, title: &str) -> Option<&PageEntry<Ext>> {
        let title = self
            .normalized
            .iter()
            .flatten()
            .find(|n| n.from == title)
            .map_or(title, |n| n.to.as_str());
        self.values().find(|p| p.title == title)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub from: String,
    pub to: String,
}

/// One entry of `query.pages`. Pages that do not exist carry `missing` and
/// no page id.
#[derive(Deserialize, Debug, Clone)]
#[serde(
    try_from = "RawPageEntry<Ext>",
    bound(deserialize = "Ext: Deserialize<'de> + PageProps")
)]
pub struct PageEntry<Ext> {
    pub page_id: Option<u64>,
    pub ns: i64,
    pub title: String,
    pub missing: bool,
    pub known: bool,
    pub ext: Ext,
}

/// Per-operation page data.
pub trait PageProps {
    /// Whether an existing page must come with its `pageid`.
    const REQUIRES_ID: bool = false;
}

#[derive(Deserialize)]
struct RawPageEntry<Ext> {
    pageid: Option<u64>,
    ns: i64,
    title: String,
    #[serde(default, deserialize_with = "flag")]
    missing: bool,
    #[serde(default, deserialize_with = "flag")]
    known: bool,
    #[serde(flatten)]
    ext: Ext,
}

impl<Ext: PageProps> TryFrom<RawPageEntry<Ext>> for PageEntry<Ext> {
    type Error = String;

    fn try_from(raw: RawPageEntry<Ext>) -> Result<Self, String> {
        if Ext::REQUIRES_ID && raw.pageid.is_none() && !raw.missing {
            return Err(format!("page {:?} has no pageid", raw.title));
        }
        Ok(PageEntry {
            page_id: raw.pageid,
            ns: raw.ns,
            title: raw.title,
            missing: raw.missing,
            known: raw.known,
            ext: raw.ext,
        })
    }
}

macro_rules! page_props {
    ($($Name:ty $(=> $req:literal)?),* $(,)?) => {$(
        impl PageProps for $Name {
            $(const REQUIRES_ID: bool = $req;)?
        }
    )*};
}

macro_rules! page_lists {
    ($($Name:ident { $field:ident: $Item:ty })*) => {$(
        #[derive(Deserialize, Debug, Clone, Default)]
        pub struct $Name {
            pub $field: Option<Vec<$Item>>,
        }

        impl $Name {
            /// Empty when the page has none.
            pub fn $field(&self) -> &[$Item] {
                self.$field.as_deref().unwrap_or_default()
            }
        }
    )*};
}

page_lists! {
    WithCategories { categories: Category }
    WithLinks { links: Link }
    WithImages { images: PageImage }
    WithFileUsage { fileusage: FileUsage }
    WithGlobalUsage { globalusage: GlobalUsage }
    WithRevisions { revisions: Revision }
    WithContent { revisions: ContentRevision }
}

page_props! {
    WithCategories,
    WithLinks,
    WithImages,
    WithFileUsage,
    WithGlobalUsage,
    WithContent,
    WithImageInfo,
    WithExtract,
    WithRevisions => true,
    PageInfo => true,
}

impl WithContent {
    /// Wikitext of the main slot of the latest revision.
    pub fn content(&self) -> Option<&str> {
        self.revisions().first().and_then(ContentRevision::main)
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct WithImageInfo {
    pub imageinfo: Option<Vec<ImageInfo>>,
    pub imagerepository: Option<String>,
}

impl WithImageInfo {
    pub fn imageinfo(&self) -> &[ImageInfo] {
        self.imageinfo.as_deref().unwrap_or_default()
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct WithExtract {
    pub extract: Option<String>,
}

/// `prop=info`. Pages that do not exist have no touched time, revision or
/// length.
#[derive(Deserialize, Debug, Clone)]
pub struct PageInfo {
    pub contentmodel: String,
    pub pagelanguage: String,
    pub pagelanguagehtmlcode: Option<String>,
    pub pagelanguagedir: Option<String>,
    pub touched: Option<String>,
    pub lastrevid: Option<u64>,
    pub length: Option<u64>,
    pub fullurl: Option<String>,
    pub editurl: Option<String>,
    pub canonicalurl: Option<String>,
    pub displaytitle: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Category {
    pub ns: i64,
    pub title: String,
    pub sortkey: Option<String>,
    pub sortkeyprefix: Option<String>,
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub hidden: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Link {
    pub ns: i64,
    pub title: String,
    #[serde(default, deserialize_with = "flag")]
    pub exists: bool,
    #[serde(rename = "pageid")]
    pub page_id: Option<u64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SearchQuery {
    pub search: Vec<SearchResult>,
    pub searchinfo: Option<SearchInfo>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SearchResult {
    pub ns: i64,
    pub title: String,
    #[serde(rename = "pageid")]
    pub page_id: u64,
    pub size: u64,
    pub wordcount: u64,
    pub snippet: String,
    pub timestamp: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SearchInfo {
    pub totalhits: u64,
    pub suggestion: Option<String>,
    pub rewrittenquery: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BacklinksQuery {
    pub backlinks: Vec<Link>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ImageInfo {
    pub timestamp: String,
    pub user: String,
    pub userid: Option<u64>,
    pub size: u64,
    pub width: u64,
    pub height: u64,
    pub url: String,
    pub descriptionurl: String,
    pub descriptionshorturl: Option<String>,
    pub mime: String,
    pub mediatype: String,
    pub bitdepth: u32,
    pub metadata: Option<Vec<Value>>,
    pub commonmetadata: Option<Vec<Value>>,
    pub extmetadata: Option<Map<String, Value>>,
    pub sha1: Option<String>,
    pub canonicaltitle: Option<String>,
    pub comment: Option<String>,
    pub parsedcomment: Option<String>,
    pub html: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PageImage {
    pub ns: i64,
    pub title: String,
    pub imagerepository: Option<String>,
    pub imageinfo: Option<Vec<ImageInfo>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AllImagesQuery {
    pub allimages: Vec<AllImage>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AllImage {
    pub ns: i64,
    pub title: String,
    pub name: Option<String>,
    #[serde(flatten)]
    pub info: ImageInfo,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FileUsage {
    pub ns: i64,
    pub title: String,
    #[serde(rename = "pageid")]
    pub page_id: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GlobalUsage {
    pub title: String,
    pub wiki: String,
    pub url: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AllLinksQuery {
    pub alllinks: Vec<AllLink>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AllLink {
    pub ns: Option<i64>,
    pub title: String,
    #[serde(rename = "fromid")]
    pub from_id: Option<u64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AllPagesQuery {
    pub allpages: Vec<AllPage>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AllPage {
    #[serde(rename = "pageid")]
    pub page_id: u64,
    pub ns: i64,
    pub title: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Revision {
    pub revid: u64,
    pub parentid: u64,
    #[serde(default, deserialize_with = "flag")]
    pub minor: bool,
    pub user: String,
    pub userid: Option<u64>,
    pub timestamp: String,
    pub size: u64,
    pub sha1: Option<String>,
    pub roles: Option<Vec<String>>,
    pub comment: Option<String>,
    pub parsedcomment: Option<String>,
    pub tags: Option<Vec<String>>,
    /// Only with `rvprop=content`.
    #[serde(alias = "*")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub anon: bool,
}

/// A revision fetched with `rvslots`, content keyed by slot role.
#[derive(Deserialize, Debug, Clone)]
pub struct ContentRevision {
    pub slots: HashMap<String, Slot>,
}

impl ContentRevision {
    pub fn main(&self) -> Option<&str> {
        self.slots.get("main").map(|s| &*s.content)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Slot {
    #[serde(rename = "contentmodel")]
    pub content_model: String,
    #[serde(rename = "contentformat")]
    pub content_format: String,
    #[serde(rename = "*")]
    pub content: String,
}

/// Answer of the per-article pageviews endpoint.
#[derive(Deserialize, Debug, Clone)]
pub struct PageViews {
    pub items: Vec<PageViewItem>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PageViewItem {
    pub project: String,
    pub article: String,
    pub granularity: String,
    pub timestamp: String,
    pub access: String,
    pub agent: String,
    pub views: u64,
}

pub type PageContentResponse = QueryResponse<Pages<PageEntry<WithContent>>>;
pub type SearchResponse = QueryResponse<SearchQuery>;
pub type PageInfoResponse = QueryResponse<Pages<PageEntry<PageInfo>>>;
pub type CategoriesResponse = QueryResponse<Pages<PageEntry<WithCategories>>>;
pub type LinksResponse = QueryResponse<Pages<PageEntry<WithLinks>>>;
pub type BacklinksResponse = QueryResponse<BacklinksQuery>;
pub type PageImagesResponse = QueryResponse<Pages<PageEntry<WithImages>>>;
pub type ImageInfoResponse = QueryResponse<Pages<PageEntry<WithImageInfo>>>;
pub type AllImagesResponse = QueryResponse<AllImagesQuery>;
pub type FileUsageResponse = QueryResponse<Pages<PageEntry<WithFileUsage>>>;
pub type GlobalUsageResponse = QueryResponse<Pages<PageEntry<WithGlobalUsage>>>;
pub type AllLinksResponse = QueryResponse<AllLinksQuery>;
pub type AllPagesResponse = QueryResponse<AllPagesQuery>;
pub type ExtractsResponse = QueryResponse<Pages<PageEntry<WithExtract>>>;
pub type RevisionsResponse = QueryResponse<Pages<PageEntry<WithRevisions>>>;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn search_requires_results() {
        let res = serde_json::from_value::<SearchResponse>(json!({
            "batchcomplete": "",
            "query": { "searchinfo": { "totalhits": 0 } },
        }));
        assert!(res.is_err());

        let res: SearchResponse = serde_json::from_value(json!({
            "batchcomplete": "",
            "continue": { "sroffset": 5, "continue": "-||" },
            "query": {
                "searchinfo": { "totalhits": 1234 },
                "search": [{
                    "ns": 0,
                    "title": "TypeScript",
                    "pageid": 8157205,
                    "size": 71234,
                    "wordcount": 5402,
                    "snippet": "<span class=\"searchmatch\">TypeScript</span> is",
                    "timestamp": "2024-01-01T00:00:00Z",
                }],
            },
        }))
        .unwrap();
        assert!(res.batchcomplete);
        assert_eq!(res.cont.unwrap()["sroffset"], 5);
        assert_eq!(res.query.search[0].page_id, 8157205);
        assert_eq!(res.query.searchinfo.unwrap().totalhits, 1234);
    }

    #[test]
    fn page_without_categories() {
        let res: CategoriesResponse = serde_json::from_value(json!({
            "batchcomplete": "",
            "query": { "pages": { "12345": { "pageid": 12345, "ns": 0, "title": "Stub" } } },
        }))
        .unwrap();
        let page = &res.query.pages["12345"];
        assert_eq!(page.title, "Stub");
        assert!(page.ext.categories().is_empty());
        assert!(!page.missing);
    }

    #[test]
    fn category_shape_is_checked() {
        let res = serde_json::from_value::<CategoriesResponse>(json!({
            "query": { "pages": { "1": { "pageid": 1, "ns": 0, "title": "A", "categories": [{ "ns": 14 }] } } },
        }));
        assert!(res.is_err());
    }

    #[test]
    fn page_entries_need_title_and_namespace() {
        let res = serde_json::from_value::<CategoriesResponse>(json!({
            "query": { "pages": { "1": { "pageid": 1, "categories": [] } } },
        }));
        assert!(res.is_err());
    }

    #[test]
    fn existing_pages_need_an_id() {
        let res = serde_json::from_value::<RevisionsResponse>(json!({
            "query": { "pages": { "1": { "revisions": [] } } },
        }));
        assert!(res.is_err());
        let res = serde_json::from_value::<RevisionsResponse>(json!({
            "query": { "pages": { "1": { "ns": 0, "title": "A", "revisions": [] } } },
        }));
        assert!(res.is_err());

        let res = serde_json::from_value::<PageInfoResponse>(json!({
            "query": { "pages": { "1": { "contentmodel": "wikitext", "pagelanguage": "en" } } },
        }));
        assert!(res.is_err());
        let res = serde_json::from_value::<PageInfoResponse>(json!({
            "query": { "pages": { "1": { "ns": 0, "title": "A", "contentmodel": "wikitext", "pagelanguage": "en" } } },
        }));
        assert!(res.is_err());

        let res: PageInfoResponse = serde_json::from_value(json!({
            "query": { "pages": { "-1": {
                "ns": 0,
                "title": "Nope",
                "missing": "",
                "contentmodel": "wikitext",
                "pagelanguage": "en",
            } } },
        }))
        .unwrap();
        assert!(res.query.pages["-1"].missing);
    }

    #[test]
    fn missing_page_is_flagged() {
        let res: FileUsageResponse = serde_json::from_value(json!({
            "batchcomplete": "",
            "query": {
                "normalized": [{ "from": "File:nope.jpg", "to": "File:Nope.jpg" }],
                "pages": { "-1": { "ns": 6, "title": "File:Nope.jpg", "missing": "", "known": "" } },
            },
        }))
        .unwrap();
        let page = res.query.by_title("File:nope.jpg").unwrap();
        assert!(page.missing);
        assert!(page.known);
        assert_eq!(page.page_id, None);
        assert!(page.ext.fileusage().is_empty());
    }

    #[test]
    fn page_content_from_main_slot() {
        let res: PageContentResponse = serde_json::from_value(json!({
            "query": { "pages": { "736": { "pageid": 736, "ns": 0, "title": "Albert Einstein", "revisions": [{
                "slots": { "main": { "contentmodel": "wikitext", "contentformat": "text/x-wiki", "*": "{{Short description}}" } }
            }] } } },
        }))
        .unwrap();
        assert_eq!(res.query.pages["736"].ext.content(), Some("{{Short description}}"));
    }

    #[test]
    fn revision_flags() {
        let res: RevisionsResponse = serde_json::from_value(json!({
            "query": { "pages": { "1": { "pageid": 1, "ns": 0, "title": "A", "revisions": [
                { "revid": 2, "parentid": 1, "minor": "", "user": "127.0.0.1", "anon": "", "timestamp": "2024-01-02T00:00:00Z", "size": 10, "comment": "" },
                { "revid": 1, "parentid": 0, "user": "Someone", "timestamp": "2024-01-01T00:00:00Z", "size": 4, "tags": ["mobile edit"] },
            ] } } },
        }))
        .unwrap();
        let revs = res.query.pages["1"].ext.revisions();
        assert!(revs[0].minor && revs[0].anon);
        assert!(!revs[1].minor && !revs[1].anon);
        assert_eq!(revs[1].tags.as_deref(), Some(&["mobile edit".to_owned()][..]));
    }

    #[test]
    fn all_images_flatten_image_info() {
        let res: AllImagesResponse = serde_json::from_value(json!({
            "query": { "allimages": [{
                "name": "Cat.jpg",
                "ns": 6,
                "title": "File:Cat.jpg",
                "timestamp": "2024-01-01T00:00:00Z",
                "user": "Uploader",
                "size": 1000,
                "width": 20,
                "height": 10,
                "url": "https://upload.wikimedia.org/cat.jpg",
                "descriptionurl": "https://commons.wikimedia.org/wiki/File:Cat.jpg",
                "mime": "image/jpeg",
                "mediatype": "BITMAP",
                "bitdepth": 8,
            }] },
        }))
        .unwrap();
        let img = &res.query.allimages[0];
        assert_eq!(img.name.as_deref(), Some("Cat.jpg"));
        assert_eq!(img.info.width, 20);
        assert_eq!(img.info.mediatype, "BITMAP");
    }
}
