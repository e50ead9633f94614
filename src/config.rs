//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::crawler;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080").
    pub bind_addr: String,

    /// Base URL of the posts API, without trailing slash.
    pub api_base_url: String,

    /// Public base URL of the site, used for canonical URLs, without
    /// trailing slash.
    pub site_base_url: String,

    /// Site name shown in OG tags, page titles, and the fallback body.
    pub site_name: String,

    /// Twitter handle for the `twitter:site` card tag.
    pub twitter_site: String,

    /// Route prefix intercepted by the preview gate (e.g., "/post").
    pub route_prefix: String,

    /// Image URL used when a post has none, and as the favicon.
    pub default_image_url: String,

    /// Title used when a post has neither title nor description.
    pub fallback_title: String,

    /// Description used when a post has none.
    pub fallback_description: String,

    /// Author label used when a post has no author name.
    pub fallback_author: String,

    /// User-agent substrings that classify a request as a crawler.
    pub crawler_signatures: Vec<String>,

    /// Character limit for titles derived from the description.
    pub title_max_chars: usize,

    /// Character limit for rendered descriptions.
    pub description_max_chars: usize,

    /// Timeout for the outbound metadata fetch.
    pub fetch_timeout: Duration,

    /// `max-age` (seconds) sent on crawler-served responses.
    pub cache_max_age: u32,

    /// Directory holding the built single-page app.
    pub spa_dir: PathBuf,

    /// Entry document served for paths with no matching file.
    pub spa_index: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            api_base_url: "https://api.duocortex.com".to_string(),
            site_base_url: "https://duocortex.in".to_string(),
            site_name: "DuoCortex".to_string(),
            twitter_site: "@duocortex".to_string(),
            route_prefix: "/post".to_string(),
            default_image_url: "https://duocortex.in/assets/img/logo-1.png".to_string(),
            fallback_title: "DuoCortex Post".to_string(),
            fallback_description: "View this post on DuoCortex - Every Medico's Digital Campus"
                .to_string(),
            fallback_author: "DuoCortex User".to_string(),
            crawler_signatures: crawler::DEFAULT_SIGNATURES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            title_max_chars: 60,
            description_max_chars: 160,
            fetch_timeout: Duration::from_secs(5),
            cache_max_age: 300,
            spa_dir: PathBuf::from("dist"),
            spa_index: "index.html".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - None (all have defaults for local development)
    ///
    /// Optional:
    /// - `PREVIEW_BIND_ADDR`: Server bind address (default: "0.0.0.0:8080")
    /// - `PREVIEW_API_BASE_URL`: Posts API base URL
    /// - `PREVIEW_SITE_BASE_URL`: Public site base URL for canonical links
    /// - `PREVIEW_SITE_NAME`: Site name (default: "DuoCortex")
    /// - `PREVIEW_TWITTER_SITE`: Twitter handle for card tags
    /// - `PREVIEW_ROUTE_PREFIX`: Intercepted route prefix (default: "/post")
    /// - `PREVIEW_DEFAULT_IMAGE_URL`: Fallback OG image / favicon URL
    /// - `PREVIEW_FALLBACK_TITLE` / `PREVIEW_FALLBACK_DESCRIPTION` /
    ///   `PREVIEW_FALLBACK_AUTHOR`: Fallback strings for absent fields
    /// - `PREVIEW_CRAWLER_SIGNATURES`: Comma-separated user-agent substrings
    ///   replacing the built-in crawler list
    /// - `PREVIEW_TITLE_MAX_CHARS` / `PREVIEW_DESCRIPTION_MAX_CHARS`:
    ///   Truncation limits (defaults: 60 / 160)
    /// - `PREVIEW_FETCH_TIMEOUT_SECS`: Outbound fetch timeout (default: 5)
    /// - `PREVIEW_CACHE_MAX_AGE`: Cache-Control max-age (default: 300)
    /// - `PREVIEW_SPA_DIR` / `PREVIEW_SPA_INDEX`: App files served when the
    ///   gate delegates (defaults: "dist" / "index.html")
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let bind_addr = env_or("PREVIEW_BIND_ADDR", defaults.bind_addr);
        let api_base_url =
            strip_trailing_slash(&env_or("PREVIEW_API_BASE_URL", defaults.api_base_url));
        let site_base_url =
            strip_trailing_slash(&env_or("PREVIEW_SITE_BASE_URL", defaults.site_base_url));
        let site_name = env_or("PREVIEW_SITE_NAME", defaults.site_name);
        let twitter_site = env_or("PREVIEW_TWITTER_SITE", defaults.twitter_site);
        let route_prefix = normalize_prefix(&env_or("PREVIEW_ROUTE_PREFIX", defaults.route_prefix));
        let default_image_url = env_or("PREVIEW_DEFAULT_IMAGE_URL", defaults.default_image_url);
        let fallback_title = env_or("PREVIEW_FALLBACK_TITLE", defaults.fallback_title);
        let fallback_description =
            env_or("PREVIEW_FALLBACK_DESCRIPTION", defaults.fallback_description);
        let fallback_author = env_or("PREVIEW_FALLBACK_AUTHOR", defaults.fallback_author);

        let crawler_signatures = match std::env::var("PREVIEW_CRAWLER_SIGNATURES") {
            Ok(raw) => {
                let list: Vec<String> = raw
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if list.is_empty() {
                    defaults.crawler_signatures
                } else {
                    list
                }
            }
            Err(_) => defaults.crawler_signatures,
        };

        let title_max_chars = env_parse_or("PREVIEW_TITLE_MAX_CHARS", defaults.title_max_chars);
        let description_max_chars = env_parse_or(
            "PREVIEW_DESCRIPTION_MAX_CHARS",
            defaults.description_max_chars,
        );
        let fetch_timeout = Duration::from_secs(env_parse_or(
            "PREVIEW_FETCH_TIMEOUT_SECS",
            defaults.fetch_timeout.as_secs(),
        ));
        let cache_max_age = env_parse_or("PREVIEW_CACHE_MAX_AGE", defaults.cache_max_age);

        let spa_dir = PathBuf::from(env_or(
            "PREVIEW_SPA_DIR",
            defaults.spa_dir.display().to_string(),
        ));
        let spa_index = env_or("PREVIEW_SPA_INDEX", defaults.spa_index);

        tracing::info!(
            bind_addr = %bind_addr,
            api_base_url = %api_base_url,
            site_base_url = %site_base_url,
            route_prefix = %route_prefix,
            signature_count = crawler_signatures.len(),
            spa_dir = %spa_dir.display(),
            "preview configuration loaded"
        );

        Ok(Self {
            bind_addr,
            api_base_url,
            site_base_url,
            site_name,
            twitter_site,
            route_prefix,
            default_image_url,
            fallback_title,
            fallback_description,
            fallback_author,
            crawler_signatures,
            title_max_chars,
            description_max_chars,
            fetch_timeout,
            cache_max_age,
            spa_dir,
            spa_index,
        })
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn strip_trailing_slash(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Ensure a leading slash and no trailing slash, e.g. "post/" -> "/post".
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/').trim_start_matches('/');
    format!("/{trimmed}")
}
