//! The preview gate: serves crawlers a pre-rendered post document and
//! passes everyone else through to the app.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::preview::PostPreview;
use crate::render;
use crate::state::AppState;

/// Content-Security-Policy for rendered preview pages.
///
/// Inline styles and https images only; no scripts, no frames.
const CSP_HEADER: &str = "default-src 'none'; style-src 'unsafe-inline'; \
     img-src https: data:; form-action 'none'; frame-ancestors 'none'";

/// Outcome of the preview pipeline for an in-scope request.
#[derive(Debug)]
pub enum PreviewOutcome {
    /// Hand the request to the inner service unchanged.
    Delegate,
    /// Respond with a fully rendered HTML document.
    Respond(String),
}

/// Middleware layered over the whole router.
///
/// Three-way branch: path out of scope or non-crawler user-agent runs the
/// inner service; a crawler request gets a rendered preview, with any
/// upstream failure also falling back to the inner service.
pub async fn preview_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(post_id) = state.matcher.post_id(request.uri().path()) else {
        return next.run(request).await;
    };

    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if !state.classifier.is_crawler(user_agent) {
        return next.run(request).await;
    }

    tracing::debug!(post_id = %post_id, user_agent, "crawler request, rendering preview");

    match preview_outcome(&state, &post_id).await {
        PreviewOutcome::Respond(html) => build_response(&html, &state),
        PreviewOutcome::Delegate => next.run(request).await,
    }
}

/// Fetch post metadata and render the preview document.
///
/// Every failure maps to [`PreviewOutcome::Delegate`]; the preview is a
/// best-effort enhancement, never a reason to show an error page.
pub async fn preview_outcome(state: &AppState, post_id: &str) -> PreviewOutcome {
    match state.posts.fetch_post(post_id).await {
        Ok(Some(record)) => {
            let preview = PostPreview::from_record(&record, post_id, &state.config);
            PreviewOutcome::Respond(render::post_page(&preview, &state.config).into_string())
        }
        Ok(None) => PreviewOutcome::Delegate,
        Err(err) => {
            tracing::error!(error = %err, post_id, "failed to fetch post metadata");
            PreviewOutcome::Delegate
        }
    }
}

/// Build the crawler-facing HTTP response with content, cache, and security
/// headers.
fn build_response(html: &str, state: &AppState) -> Response {
    let mut headers = HeaderMap::new();

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );

    let cache_value = format!("public, max-age={}", state.config.cache_max_age);
    if let Ok(val) = HeaderValue::from_str(&cache_value) {
        headers.insert(header::CACHE_CONTROL, val);
    }

    // ETag (xxHash of the body)
    let hash = xxhash_rust::xxh3::xxh3_64(html.as_bytes());
    let etag = format!("\"{}\"", hex_fmt::HexFmt(&hash.to_be_bytes()));
    if let Ok(val) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, val);
    }

    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(CSP_HEADER),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));

    (StatusCode::OK, headers, html.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn state() -> AppState {
        AppState::new(Config::default()).unwrap()
    }

    #[test]
    fn response_carries_content_cache_and_security_headers() {
        let response = build_response("<html></html>", &state());
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        assert_eq!(
            headers.get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
        assert_eq!(
            headers.get(header::CACHE_CONTROL).unwrap(),
            "public, max-age=300"
        );
        assert_eq!(
            headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
            "nosniff"
        );
        assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");

        let etag = headers.get(header::ETAG).unwrap().to_str().unwrap();
        assert!(etag.starts_with('"') && etag.ends_with('"'));
    }

    #[test]
    fn etag_is_stable_per_body() {
        let a = build_response("<html>a</html>", &state());
        let b = build_response("<html>a</html>", &state());
        let c = build_response("<html>b</html>", &state());
        assert_eq!(a.headers().get(header::ETAG), b.headers().get(header::ETAG));
        assert_ne!(a.headers().get(header::ETAG), c.headers().get(header::ETAG));
    }

    #[tokio::test]
    async fn unreachable_upstream_delegates() {
        let config = Config {
            // Nothing listens here; loopback connects fail fast.
            api_base_url: "http://127.0.0.1:1".to_string(),
            ..Config::default()
        };
        let state = AppState::new(config).unwrap();

        let outcome = preview_outcome(&state, "abc").await;
        assert!(matches!(outcome, PreviewOutcome::Delegate));
    }
}
