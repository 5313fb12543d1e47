//! Docker Hub repository tag listing
//!
//! Walks the paginated `/v2/repositories/<name>/tags` endpoint and flattens
//! every page into one list of tag names, in the order the registry returned
//! them.

use crate::{DimgError, Result};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, info};

/// Default registry serving the tag listing API
pub const DEFAULT_REGISTRY: &str = "https://registry.hub.docker.com";

/// Largest page size Docker Hub accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// One page of the tag listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagPage {
    /// Total number of tags the registry reports for the repository
    #[serde(default)]
    pub count: u64,
    /// Absolute URL of the following page
    #[serde(default)]
    pub next: Option<String>,
    pub results: Vec<TagEntry>,
}

/// Tag entry inside a page; everything but the name is ignored
#[derive(Debug, Clone, Deserialize)]
pub struct TagEntry {
    pub name: String,
}

impl TagPage {
    /// URL of the following page, if there is one.
    ///
    /// Docker Hub uses `null` for the last page, other registries an empty string.
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref().filter(|next| !next.is_empty())
    }

    /// Decode a page body
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| DimgError::Decode(format!("malformed tag page: {}", e)))
    }
}

/// Something that can hand out tag pages by URL.
///
/// `Ok(None)` means the registry does not know the URL (404).
pub(crate) trait PageSource {
    async fn fetch_page(&self, url: &str) -> Result<Option<TagPage>>;
}

/// Registry client listing a repository's tags
pub struct TagFetcher {
    client: reqwest::Client,
    registry: Url,
    page_size: u32,
}

impl TagFetcher {
    /// Create a new fetcher against `registry` (scheme + host)
    pub fn new(registry: &str, page_size: u32) -> Result<Self> {
        let registry = Url::parse(registry)
            .map_err(|e| DimgError::Fetch(format!("invalid registry URL {}: {}", registry, e)))?;
        if registry.cannot_be_a_base() {
            return Err(DimgError::Fetch(format!(
                "invalid registry URL {}",
                registry
            )));
        }

        let client = reqwest::Client::builder()
            .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
            .build()?;

        Ok(Self {
            client,
            registry,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        })
    }

    /// URL of the first tag page for a normalized repository name.
    ///
    /// Each name segment is percent-encoded, so `?` or `#` stay part of the name.
    pub fn tags_url(&self, repository: &str) -> Result<String> {
        let mut url = self.registry.clone();
        url.path_segments_mut()
            .map_err(|_| DimgError::Fetch(format!("invalid registry URL {}", self.registry)))?
            .pop_if_empty()
            .extend(["v2", "repositories"])
            .extend(repository.split('/'))
            .push("tags");
        url.query_pairs_mut()
            .append_pair("page", "1")
            .append_pair("page_size", &self.page_size.to_string());
        Ok(url.into())
    }

    /// Fetch every tag of `repository`.
    ///
    /// A repository the registry does not know yields an empty list.
    pub async fn fetch_tags(&self, repository: &str) -> Result<Vec<String>> {
        collect_tags(self, &self.tags_url(repository)?).await
    }
}

impl PageSource for TagFetcher {
    async fn fetch_page(&self, url: &str) -> Result<Option<TagPage>> {
        debug!(url, "GET tag page");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(DimgError::Fetch(format!("{} returned {}", url, status)));
        }

        let body = response.text().await?;
        TagPage::from_json(&body).map(Some)
    }
}

/// Follow `next` links from `first_url` until the last page, concatenating results
pub(crate) async fn collect_tags<S: PageSource>(source: &S, first_url: &str) -> Result<Vec<String>> {
    let mut tags = Vec::new();
    let mut visited = HashSet::new();
    let mut url = first_url.to_string();

    loop {
        if !visited.insert(url.clone()) {
            return Err(DimgError::Fetch(format!(
                "pagination loops back to {}",
                url
            )));
        }

        let page = match source.fetch_page(&url).await? {
            Some(page) => page,
            None if visited.len() == 1 => {
                debug!(url = %url, "repository not found");
                return Ok(Vec::new());
            }
            None => {
                return Err(DimgError::Fetch(format!("{} returned 404 Not Found", url)));
            }
        };

        let next = page.next_url().map(str::to_owned);
        tags.extend(page.results.into_iter().map(|entry| entry.name));
        info!(fetched = tags.len(), total = page.count, "fetched tag page");

        match next {
            Some(next) => url = next,
            None => return Ok(tags),
        }
    }
}
