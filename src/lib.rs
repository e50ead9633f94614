//! DuoCortex Preview - crawler-facing HTML preview pages for posts.
//!
//! This crate provides a lightweight HTTP server that sits in front of the
//! DuoCortex single-page app. Requests for `/post/{id}` coming from known
//! social-media and link-preview crawlers get a pre-rendered HTML document
//! with Open Graph and Twitter Card tags; every other request falls through
//! to the regular app files.
//!
//! # Architecture
//!
//! - **Gate**: middleware matches the post route and sniffs the
//!   `User-Agent` against a crawler signature list
//! - **Fetch**: post metadata comes from the DuoCortex API over HTTP with a
//!   bounded timeout
//! - **Render**: maud generates the static document; a zero-delay meta
//!   refresh forwards any non-crawler client to the canonical URL
//!
//! Preview rendering is best effort: upstream failures fall back to serving
//! the app unchanged, never an error page.

pub mod config;
pub mod crawler;
pub mod error;
pub mod matcher;
pub mod preview;
pub mod render;
pub mod routes;
pub mod state;
pub mod upstream;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
