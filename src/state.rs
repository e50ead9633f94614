//! Application state shared across all requests.

use std::sync::Arc;

use crate::config::Config;
use crate::crawler::CrawlerClassifier;
use crate::matcher::PathMatcher;
use crate::upstream::PostClient;

/// Shared application state available to the preview gate and handlers.
///
/// Everything here is immutable after startup; requests share it read-only.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,

    /// Matches request paths against the preview route prefix.
    pub matcher: PathMatcher,

    /// Classifies user-agents as crawlers.
    pub classifier: Arc<CrawlerClassifier>,

    /// Client for the posts API.
    pub posts: PostClient,
}

impl AppState {
    /// Create application state from configuration.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let matcher = PathMatcher::new(config.route_prefix.clone());
        let classifier = Arc::new(CrawlerClassifier::new(config.crawler_signatures.iter()));
        let posts = PostClient::new(&config)?;

        tracing::info!(
            route_prefix = %config.route_prefix,
            signature_count = config.crawler_signatures.len(),
            fetch_timeout_secs = config.fetch_timeout.as_secs(),
            "application state initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            matcher,
            classifier,
            posts,
        })
    }
}
