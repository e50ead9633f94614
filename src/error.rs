//! Error types for the preview pipeline.
//!
//! Nothing here ever reaches the client as an error status: every failure
//! degrades to serving the regular app page. The variants exist so the log
//! line says what actually went wrong upstream.

use thiserror::Error;

/// Failure fetching or decoding post metadata from the upstream API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a usable response (DNS, connect, timeout).
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body was not the JSON shape we expect.
    #[error("upstream returned malformed JSON: {0}")]
    Malformed(#[source] reqwest::Error),
}
