//! Typed requests for the Action API.
//!
//! A request is a tree of [`WriteUrl`] types rooted at [`Main`]. Writing it
//! through a [`UrlParamWriter`](crate::url::UrlParamWriter) yields the flat
//! parameter mapping sent in the query string. Each constructor on `Main`
//! validates its options first and never produces a partial request.

use wikiproc::WriteUrl;

use crate::url::{Params, WriteUrlParams};
use crate::validate::{ValidationError, Validator};

pub mod all_images;
pub mod all_links;
pub mod all_pages;
pub mod backlinks;
pub mod extracts;
pub mod image_info;
pub mod revisions;
pub mod search;

use all_images::{ImageSearchOptions, ListAllImages};
use all_links::{AllLinksOptions, ListAllLinks};
use all_pages::{AllPagesOptions, ListAllPages};
use backlinks::ListBacklinks;
use extracts::{ExtractOptions, PropExtracts};
use image_info::PropImageInfo;
use revisions::{PropRevisions, RevisionOptions};
use search::ListSearch;

pub trait HasValue {
    const CAUTIOUS: bool;
    fn value<F: FnOnce(&str) -> R, R>(&self, accept: F) -> R;
}

impl HasValue for String {
    const CAUTIOUS: bool = true;
    fn value<F: FnOnce(&str) -> R, R>(&self, accept: F) -> R {
        accept(self)
    }
}

/// Joins values with `|`, or with the unit separator `\x1f` (which MediaWiki
/// also accepts) when a free-form value itself contains a pipe.
#[must_use]
pub fn encode_multivalue<'a, T: HasValue + 'a, V: IntoIterator<Item = &'a T> + Clone>(
    values: V,
) -> String {
    let mut sep = '|';
    let mut s = String::new();
    if T::CAUTIOUS {
        for item in values.clone() {
            if item.value(|v| v.contains('|')) {
                sep = '\u{1F}';
                s.push(sep);
                break;
            }
        }
    }
    for (i, item) in values.into_iter().enumerate() {
        if i != 0 {
            s.push(sep);
        }
        item.value(|v| {
            s.push_str(v);
        });
    }
    s
}

/// One or more pages, addressed by title.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageRef {
    Title(String),
    Titles(Vec<String>),
}

impl PageRef {
    pub fn into_titles(self) -> Result<Vec<String>, ValidationError> {
        match self {
            Self::Title(title) => Ok(vec![title]),
            Self::Titles(titles) => {
                Validator::default().non_empty("titles", &titles).finish()?;
                Ok(titles)
            }
        }
    }
}

#[derive(WriteUrl, Clone, Debug)]
pub struct Main {
    pub action: Action,
    pub format: Format,
}

impl Main {
    pub fn action(action: Action) -> Self {
        Self {
            action,
            format: Format::Json,
        }
    }

    pub fn query(q: Query) -> Self {
        Self::action(Action::Query(q))
    }

    /// The flat parameter mapping this request sends.
    pub fn params(&self) -> Params {
        let mut p = Params::default();
        if let Err(e) = self.ser(&mut p) {
            match e {}
        }
        p
    }

    fn prop(prop: QueryProp, titles: Vec<String>) -> Self {
        Self::query(Query {
            prop: Some(prop),
            titles: Some(titles),
            ..Default::default()
        })
    }

    fn list(list: QueryList) -> Self {
        Self::query(Query {
            list: Some(list),
            ..Default::default()
        })
    }

    /// Current wikitext of a page, from all revision slots.
    pub fn page(title: &str) -> Self {
        Self::prop(
            QueryProp::Revisions(PropRevisions::content()),
            vec![title.to_owned()],
        )
    }

    pub fn search(query: &str, limit: u32) -> Result<Self, ValidationError> {
        Ok(Self::list(QueryList::Search(ListSearch::new(query, limit)?)))
    }

    pub fn page_info(title: &str) -> Self {
        Self::prop(QueryProp::Info, vec![title.to_owned()])
    }

    pub fn categories(title: &str) -> Self {
        Self::prop(QueryProp::Categories, vec![title.to_owned()])
    }

    pub fn links(title: &str) -> Self {
        Self::prop(QueryProp::Links, vec![title.to_owned()])
    }

    pub fn backlinks(title: &str, limit: u32) -> Result<Self, ValidationError> {
        Ok(Self::list(QueryList::Backlinks(ListBacklinks::new(title, limit)?)))
    }

    pub fn page_images(title: &str) -> Self {
        Self::prop(QueryProp::Images, vec![title.to_owned()])
    }

    pub fn image_info(titles: impl Into<PageRef>) -> Result<Self, ValidationError> {
        let titles = titles.into().into_titles()?;
        Ok(Self::prop(QueryProp::ImageInfo(PropImageInfo::default()), titles))
    }

    pub fn all_images(query: &str, options: ImageSearchOptions) -> Result<Self, ValidationError> {
        Ok(Self::list(QueryList::AllImages(ListAllImages::new(query, options)?)))
    }

    pub fn file_usage(filename: &str) -> Self {
        Self::prop(QueryProp::FileUsage, vec![file_title(filename)])
    }

    pub fn global_usage(filename: &str) -> Self {
        Self::prop(QueryProp::GlobalUsage, vec![file_title(filename)])
    }

    pub fn all_links(options: AllLinksOptions) -> Result<Self, ValidationError> {
        Ok(Self::list(QueryList::AllLinks(ListAllLinks::new(options)?)))
    }

    pub fn all_pages(options: AllPagesOptions) -> Result<Self, ValidationError> {
        Ok(Self::list(QueryList::AllPages(ListAllPages::new(options)?)))
    }

    pub fn extracts(
        titles: impl Into<PageRef>,
        options: ExtractOptions,
    ) -> Result<Self, ValidationError> {
        // check both before reporting, so one error names every bad field
        let titles = titles.into().into_titles();
        let prop = PropExtracts::new(options);
        match (titles, prop) {
            (Ok(titles), Ok(prop)) => Ok(Self::prop(QueryProp::Extracts(prop), titles)),
            (Err(mut a), Err(b)) => {
                a.violations.extend(b.violations);
                Err(a)
            }
            (Err(e), _) | (_, Err(e)) => Err(e),
        }
    }

    pub fn revisions(title: &str, options: RevisionOptions) -> Result<Self, ValidationError> {
        Ok(Self::prop(
            QueryProp::Revisions(PropRevisions::new(options)?),
            vec![title.to_owned()],
        ))
    }
}

/// Files live in the `File:` namespace; bare file names get the prefix.
fn file_title(filename: &str) -> String {
    if filename.starts_with("File:") {
        filename.to_owned()
    } else {
        format!("File:{filename}")
    }
}

#[derive(WriteUrl, Clone, Debug)]
pub enum Action {
    Query(Query),
}

#[derive(WriteUrl, Clone, Debug, Default)]
pub struct Query {
    pub list: Option<QueryList>,
    /// Which properties to get for the queried pages.
    pub prop: Option<QueryProp>,
    pub titles: Option<Vec<String>>,
}

#[derive(WriteUrl, Clone, Debug)]
pub enum QueryList {
    Search(ListSearch),
    Backlinks(ListBacklinks),
    AllImages(ListAllImages),
    AllLinks(ListAllLinks),
    AllPages(ListAllPages),
}

#[derive(WriteUrl, Clone, Debug)]
pub enum QueryProp {
    Info,
    Categories,
    Links,
    Images,
    Revisions(PropRevisions),
    ImageInfo(PropImageInfo),
    FileUsage,
    GlobalUsage,
    Extracts(PropExtracts),
}

#[derive(WriteUrl, Clone, Copy, Debug)]
pub enum Format {
    Json,
}
