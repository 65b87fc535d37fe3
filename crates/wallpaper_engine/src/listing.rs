use std::time::Duration;

use engine_logging::engine_debug;
use serde::Deserialize;
use thiserror::Error;

use crate::fetch::{map_reqwest_error, USER_AGENT};

/// Maximum number of posts requested from the listing endpoint.
pub const TOP_LIMIT: usize = 20;

/// A post as returned by the content source, in rank order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedPost {
    pub url: String,
    pub score: i64,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("content source unavailable: {0}")]
    Unavailable(String),
    #[error("content source returned an unexpected payload: {0}")]
    Malformed(String),
}

#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    /// Top posts of `channel` over `window`, best first, at most [`TOP_LIMIT`].
    async fn top_posts(&self, channel: &str, window: &str) -> Result<Vec<ListedPost>, SourceError>;
}

#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Overrides the default `User-Agent` when set.
    pub user_agent: Option<String>,
    pub limit: usize,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.reddit.com".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            user_agent: None,
            limit: TOP_LIMIT,
        }
    }
}

/// Reads `/r/<channel>/top.json` listings.
#[derive(Debug, Clone)]
pub struct RedditSource {
    settings: SourceSettings,
}

impl RedditSource {
    pub fn new(settings: SourceSettings) -> Self {
        Self { settings }
    }

    fn listing_url(&self, channel: &str, window: &str) -> Result<reqwest::Url, SourceError> {
        let base = self.settings.base_url.trim_end_matches('/');
        let mut url = reqwest::Url::parse(&format!("{base}/r/{channel}/top.json"))
            .map_err(|err| SourceError::Unavailable(format!("bad listing url: {err}")))?;
        url.query_pairs_mut()
            .append_pair("t", window)
            .append_pair("limit", &self.limit().to_string())
            .append_pair("raw_json", "1");
        Ok(url)
    }

    fn limit(&self) -> usize {
        self.settings.limit.min(TOP_LIMIT)
    }

    fn user_agent(&self, channel: &str) -> String {
        self.settings
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("{USER_AGENT} (r/{channel})"))
    }
}

#[async_trait::async_trait]
impl ContentSource for RedditSource {
    async fn top_posts(&self, channel: &str, window: &str) -> Result<Vec<ListedPost>, SourceError> {
        let url = self.listing_url(channel, window)?;
        engine_debug!("Listing {url}");

        let client = reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .user_agent(self.user_agent(channel))
            .build()
            .map_err(|err| SourceError::Unavailable(err.to_string()))?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|err| SourceError::Unavailable(map_reqwest_error(err).to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Unavailable(format!("http status {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| SourceError::Unavailable(map_reqwest_error(err).to_string()))?;

        parse_listing(&body, self.limit())
    }
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: PostData,
}

#[derive(Debug, Deserialize)]
struct PostData {
    url: Option<String>,
    #[serde(default)]
    score: i64,
    title: Option<String>,
}

fn parse_listing(body: &[u8], limit: usize) -> Result<Vec<ListedPost>, SourceError> {
    let listing: Listing =
        serde_json::from_slice(body).map_err(|err| SourceError::Malformed(err.to_string()))?;

    Ok(listing
        .data
        .children
        .into_iter()
        .filter_map(|child| {
            let PostData { url, score, title } = child.data;
            url.filter(|u| !u.is_empty())
                .map(|url| ListedPost { url, score, title })
        })
        .take(limit)
        .collect())
}
