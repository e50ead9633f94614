//! Client for the DuoCortex posts API.

use serde::Deserialize;

use crate::config::Config;
use crate::error::FetchError;

/// User-agent sent on outbound metadata requests.
const USER_AGENT: &str = concat!("duocortex-preview/", env!("CARGO_PKG_VERSION"));

/// Post metadata as served by `GET {api_base}/posts/post/{id}`.
///
/// Every field is optional; unknown fields are ignored and explicit nulls
/// are tolerated everywhere.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<PostImage>,
    #[serde(default, rename = "createdBy")]
    pub created_by: Option<PostAuthor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostImage {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostAuthor {
    #[serde(default)]
    pub name: Option<String>,
}

/// Shared HTTP client for the posts API.
#[derive(Debug, Clone)]
pub struct PostClient {
    http: reqwest::Client,
    api_base: String,
}

impl PostClient {
    /// Build the client with the configured request timeout.
    ///
    /// The timeout bounds every request made through this client.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base_url.clone(),
        })
    }

    /// Fetch metadata for a post. No auth, single attempt, no retry.
    ///
    /// `Ok(None)` means the upstream answered with a non-success status; the
    /// caller falls back to the regular page without treating it as an error.
    pub async fn fetch_post(&self, post_id: &str) -> Result<Option<PostRecord>, FetchError> {
        let url = format!(
            "{}/posts/post/{}",
            self.api_base,
            urlencoding::encode(post_id)
        );

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, post_id, "upstream returned non-success status");
            return Ok(None);
        }

        let record = response.json::<PostRecord>().await.map_err(|err| {
            if err.is_decode() {
                FetchError::Malformed(err)
            } else {
                FetchError::Transport(err)
            }
        })?;

        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_payload() {
        let record: PostRecord = serde_json::from_str(
            r#"{
                "title": "Exam Tips",
                "description": "How to prepare",
                "image": {"url": "https://cdn.duocortex.in/p/1.png"},
                "createdBy": {"name": "Jane"}
            }"#,
        )
        .unwrap();
        assert_eq!(record.title.as_deref(), Some("Exam Tips"));
        assert_eq!(record.description.as_deref(), Some("How to prepare"));
        assert_eq!(
            record.image.unwrap().url.as_deref(),
            Some("https://cdn.duocortex.in/p/1.png")
        );
        assert_eq!(record.created_by.unwrap().name.as_deref(), Some("Jane"));
    }

    #[test]
    fn deserializes_empty_object() {
        let record: PostRecord = serde_json::from_str("{}").unwrap();
        assert!(record.title.is_none());
        assert!(record.description.is_none());
        assert!(record.image.is_none());
        assert!(record.created_by.is_none());
    }

    #[test]
    fn tolerates_explicit_nulls() {
        let record: PostRecord = serde_json::from_str(
            r#"{"title": null, "description": null, "image": null, "createdBy": null}"#,
        )
        .unwrap();
        assert!(record.title.is_none());
        assert!(record.image.is_none());
    }

    #[test]
    fn tolerates_nested_missing_fields() {
        let record: PostRecord =
            serde_json::from_str(r#"{"image": {}, "createdBy": {}}"#).unwrap();
        assert!(record.image.unwrap().url.is_none());
        assert!(record.created_by.unwrap().name.is_none());
    }

    #[test]
    fn ignores_unknown_fields() {
        let record: PostRecord = serde_json::from_str(
            r#"{"title": "T", "likes": 42, "comments": [{"id": 1}]}"#,
        )
        .unwrap();
        assert_eq!(record.title.as_deref(), Some("T"));
    }
}
