//! Response payloads returned by newsapi.org.
//!
//! Only the fields the client renders are modelled. Everything else in the
//! upstream JSON (`author`, `urlToImage`, `content`, ...) is ignored by serde.
//!
//! newsapi.org sends `null` for item fields it doesn't have. A `null` or missing
//! string field decodes as `""` so one sparse item doesn't fail the whole page.

use serde::{Deserialize, Deserializer, Serialize};

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of an `everything` or `top-headlines` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct News {
    /// Total matches upstream; only the first page is ever fetched.
    #[serde(rename = "totalResults", default, skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
}

/// Body of a `top-headlines/sources` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Sources {
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Source {
    /// The id to pass to `--source`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

/// The envelope newsapi.org wraps every response in.
///
/// On failure the body is `{"status":"error","code":...,"message":...}` and
/// carries no payload.
#[derive(Debug, Default, Deserialize)]
pub struct ApiStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiStatus {
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }
}
