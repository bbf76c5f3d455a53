//! Query builders for the newsapi.org v2 endpoints.
//!
//! Two request values exist:
//! - [`NewsRequest`] targets `everything` or `top-headlines`, depending on its [`Endpoint`]
//! - [`SourcesRequest`] targets `top-headlines/sources`
//!
//! Both are plain values. Building a URL is pure and always yields the same
//! string for the same input, with parameters in a fixed order:
//!
//! ```text
//! https://newsapi.org/v2/everything?from=2024-14-3&q=rust&language=en&pageSize=20&apikey=KEY
//! https://newsapi.org/v2/top-headlines/sources?apikey=KEY&country=us
//! ```
//!
//! Values are percent-encoded, so a query like `rust & go` can't corrupt the
//! query string.

use chrono::{DateTime, Duration, Utc};

/// See <https://newsapi.org/docs/endpoints>.
pub const DEFAULT_URL_BASE: &str = "https://newsapi.org/v2";

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// How far back a full-text search reaches.
pub const SEARCH_WINDOW_DAYS: i64 = 10;

/// Year, day, month, unpadded: 2024-03-14 becomes `2024-14-3`.
///
/// Kept as-is from the first release of this client; newsapi.org documents
/// ISO 8601, so this is most likely a latent bug in the `from` filter.
const FROM_DATE_FORMAT: &str = "%Y-%-d-%-m";

/// The two shapes of article query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Full-text search, optionally bounded to articles published after `from`.
    Everything { from: Option<DateTime<Utc>> },
    /// Current top headlines, optionally filtered.
    Headlines {
        country: Option<String>,
        category: Option<String>,
    },
}

impl Endpoint {
    /// Pick the shape for a search.
    ///
    /// A free-text query or a source filter needs `everything`, limited to the
    /// last [`SEARCH_WINDOW_DAYS`] days. Otherwise we list top headlines.
    pub fn for_search(query: Option<&str>, sources: Option<&str>, now: DateTime<Utc>) -> Self {
        if query.is_some() || sources.is_some() {
            Endpoint::Everything {
                from: Some(now - Duration::days(SEARCH_WINDOW_DAYS)),
            }
        } else {
            Endpoint::Headlines {
                country: None,
                category: None,
            }
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Everything { .. } => "everything",
            Endpoint::Headlines { .. } => "top-headlines",
        }
    }

    fn push_pairs(&self, pairs: &mut Vec<(&'static str, String)>) {
        match self {
            Endpoint::Everything { from } => {
                if let Some(from) = from {
                    pairs.push(("from", from.format(FROM_DATE_FORMAT).to_string()));
                }
            }
            Endpoint::Headlines { country, category } => {
                if let Some(country) = country {
                    pairs.push(("country", country.clone()));
                }
                if let Some(category) = category {
                    pairs.push(("category", category.clone()));
                }
            }
        }
    }
}

/// An article query against `everything` or `top-headlines`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsRequest {
    endpoint: Endpoint,
    apikey: String,
    sources: Option<String>,
    q: Option<String>,
    page_size: u32,
    language: String,
}

impl NewsRequest {
    pub fn new(endpoint: Endpoint, apikey: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            endpoint,
            apikey: apikey.into(),
            sources: None,
            q: None,
            page_size: DEFAULT_PAGE_SIZE,
            language: language.into(),
        }
    }

    /// Comma-separated source ids, e.g. `bbc-news,cnn`.
    pub fn sources(mut self, sources: Option<String>) -> Self {
        self.sources = sources;
        self
    }

    pub fn query(mut self, q: Option<String>) -> Self {
        self.q = q;
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Unencoded `(name, value)` pairs in the order they appear in the URL.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        self.endpoint.push_pairs(&mut pairs);
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        if let Some(sources) = &self.sources {
            pairs.push(("sources", sources.clone()));
        }
        pairs.push(("language", self.language.clone()));
        pairs.push(("pageSize", self.page_size.to_string()));
        pairs.push(("apikey", self.apikey.clone()));
        pairs
    }

    #[cfg(test)]
    pub fn url(&self) -> String {
        self.url_with_base(DEFAULT_URL_BASE)
    }

    pub fn url_with_base(&self, base: &str) -> String {
        build_url(base, self.endpoint.path(), &self.query_pairs())
    }
}

/// A listing of the sources newsapi.org knows about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcesRequest {
    apikey: String,
    country: Option<String>,
}

impl SourcesRequest {
    pub fn new(apikey: impl Into<String>, country: Option<String>) -> Self {
        Self {
            apikey: apikey.into(),
            country,
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("apikey", self.apikey.clone())];
        if let Some(country) = &self.country {
            pairs.push(("country", country.clone()));
        }
        pairs
    }

    #[cfg(test)]
    pub fn url(&self) -> String {
        self.url_with_base(DEFAULT_URL_BASE)
    }

    pub fn url_with_base(&self, base: &str) -> String {
        build_url(base, "top-headlines/sources", &self.query_pairs())
    }
}

fn build_url(base: &str, path: &str, pairs: &[(&'static str, String)]) -> String {
    let query = pairs
        .iter()
        .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}/{}?{}", base.trim_end_matches('/'), path, query)
}
