use std::future::Future;
use std::pin::Pin;

use chrono::Utc;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::pageviews::{PageViewsOptions, PageViewsRequest};
use crate::req::all_images::ImageSearchOptions;
use crate::req::all_links::AllLinksOptions;
use crate::req::all_pages::AllPagesOptions;
use crate::req::extracts::ExtractOptions;
use crate::req::revisions::RevisionOptions;
use crate::req::{backlinks, search, Main, PageRef};
use crate::res::*;
use crate::url::WriteUrlParams;
use crate::{Client, Error, Result};

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = Result<T>> + Send>>;

pub fn mkurl(mut url: Url, m: Main) -> Url {
    let mut q = crate::url::Simple::default();
    if let Err(e) = m.ser(&mut q) {
        match e {}
    }
    url.set_query(Some(&q.0));
    debug!(%url, "GET");
    url
}

pub trait RequestBuilderExt: Sized {
    /// Sends the request and returns the JSON body, turning HTTP failures
    /// and MediaWiki `error` objects into errors.
    fn send_and_report_err(self) -> BoxFuture<Value>;
    fn send_parse<D: DeserializeOwned + Send + 'static>(self) -> BoxFuture<D>
    where
        Self: Send + 'static,
    {
        Box::pin(async move {
            let v = self.send_and_report_err().await?;
            let d = serde_json::from_value(v)?;
            trace!(ty = std::any::type_name::<D>(), "decoded response");
            Ok(d)
        })
    }
}

impl RequestBuilderExt for reqwest::RequestBuilder {
    fn send_and_report_err(self) -> BoxFuture<Value> {
        Box::pin(async {
            let r = self.send().await?;
            debug!(status = %r.status(), url = %r.url(), "response");
            let body = r.error_for_status()?.bytes().await?;
            let mut v: Value = serde_json::from_slice(&body)?;
            if let Some(v) = v.get_mut("error") {
                return Err(Error::MediaWiki(v.take()));
            }
            if let Some(w) = v.get("warnings") {
                warn!(warnings = %w, "MediaWiki API returned warnings");
            }
            Ok(v)
        })
    }
}

impl Client {
    pub fn mkurl(&self, m: Main) -> Url {
        mkurl(self.url.clone(), m)
    }

    /// Sends any query and decodes the answer into `D`.
    pub fn query<D: DeserializeOwned + Send + 'static>(&self, m: Main) -> BoxFuture<D> {
        self.client.get(self.mkurl(m)).send_parse()
    }

    /// Wikitext of the latest revision.
    pub async fn get_page(&self, title: &str) -> Result<PageContentResponse> {
        self.query(Main::page(title)).await
    }

    /// Full-text search. `limit` defaults to 10.
    pub async fn search(&self, query: &str, limit: Option<u32>) -> Result<SearchResponse> {
        let limit = limit.unwrap_or(search::DEFAULT_LIMIT);
        self.query(Main::search(query, limit)?).await
    }

    pub async fn get_page_info(&self, title: &str) -> Result<PageInfoResponse> {
        self.query(Main::page_info(title)).await
    }

    pub async fn get_categories(&self, title: &str) -> Result<CategoriesResponse> {
        self.query(Main::categories(title)).await
    }

    pub async fn get_links(&self, title: &str) -> Result<LinksResponse> {
        self.query(Main::links(title)).await
    }

    /// Pages linking to `title`. `limit` defaults to 10.
    pub async fn get_backlinks(&self, title: &str, limit: Option<u32>) -> Result<BacklinksResponse> {
        let limit = limit.unwrap_or(backlinks::DEFAULT_LIMIT);
        self.query(Main::backlinks(title, limit)?).await
    }

    pub async fn get_page_images(&self, title: &str) -> Result<PageImagesResponse> {
        self.query(Main::page_images(title)).await
    }

    pub async fn get_image_info(&self, titles: impl Into<PageRef>) -> Result<ImageInfoResponse> {
        self.query(Main::image_info(titles)?).await
    }

    /// Enumerates files. An empty `query` lists without a search filter.
    pub async fn search_images(
        &self,
        query: &str,
        options: ImageSearchOptions,
    ) -> Result<AllImagesResponse> {
        self.query(Main::all_images(query, options)?).await
    }

    pub async fn get_file_usage(&self, filename: &str) -> Result<FileUsageResponse> {
        self.query(Main::file_usage(filename)).await
    }

    pub async fn get_global_usage(&self, filename: &str) -> Result<GlobalUsageResponse> {
        self.query(Main::global_usage(filename)).await
    }

    pub async fn get_all_links(&self, options: AllLinksOptions) -> Result<AllLinksResponse> {
        self.query(Main::all_links(options)?).await
    }

    pub async fn get_all_pages(&self, options: AllPagesOptions) -> Result<AllPagesResponse> {
        self.query(Main::all_pages(options)?).await
    }

    pub async fn get_extracts(
        &self,
        titles: impl Into<PageRef>,
        options: ExtractOptions,
    ) -> Result<ExtractsResponse> {
        self.query(Main::extracts(titles, options)?).await
    }

    pub async fn get_revisions(
        &self,
        title: &str,
        options: RevisionOptions,
    ) -> Result<RevisionsResponse> {
        self.query(Main::revisions(title, options)?).await
    }

    /// Pageview counts from the metrics API. Dates default to the 30 days
    /// ending today (UTC).
    pub async fn get_page_views(&self, title: &str, options: PageViewsOptions) -> Result<PageViews> {
        let req = PageViewsRequest::new(title, options, Utc::now().date_naive())?;
        let url = req.url(&self.metrics_url)?;
        debug!(%url, "GET");
        self.client.get(url).send_parse().await
    }
}
