//! The preview model and its field-fallback mapping.

use crate::config::Config;
use crate::upstream::PostRecord;

/// Appended when text is cut at a character limit.
const ELLIPSIS: &str = "...";

/// Everything the rendered document needs, with safe textual defaults for
/// any field the upstream payload omits.
///
/// Request-scoped; building it twice from the same inputs yields identical
/// values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPreview {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub author_name: String,
    pub canonical_url: String,
}

impl PostPreview {
    /// Map an upstream record onto a preview.
    ///
    /// Fallbacks: title comes from the description (truncated) and then the
    /// configured fallback title; description, image, and author fall back
    /// to their configured defaults. The canonical URL is derived from the
    /// site base URL and the post identifier.
    pub fn from_record(record: &PostRecord, post_id: &str, config: &Config) -> Self {
        let description_src = record
            .description
            .as_deref()
            .map(collapse_whitespace)
            .filter(|s| !s.is_empty());

        let title = record
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| {
                description_src
                    .as_deref()
                    .map(|d| truncate_chars(d, config.title_max_chars))
            })
            .unwrap_or_else(|| config.fallback_title.clone());

        let description = truncate_chars(
            &description_src
                .unwrap_or_else(|| collapse_whitespace(&config.fallback_description)),
            config.description_max_chars,
        );

        let image_url = record
            .image
            .as_ref()
            .and_then(|img| img.url.as_deref())
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| config.default_image_url.clone());

        let author_name = record
            .created_by
            .as_ref()
            .and_then(|author| author.name.as_deref())
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| config.fallback_author.clone());

        let canonical_url = format!(
            "{}{}/{}",
            config.site_base_url, config.route_prefix, post_id
        );

        Self {
            title,
            description,
            image_url,
            author_name,
            canonical_url,
        }
    }
}

/// Collapse runs of whitespace (including newlines) into single spaces and
/// trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to `max_chars` characters, replacing the tail with an ellipsis
/// so the result is exactly `max_chars` characters when truncation happens.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::{PostAuthor, PostImage};

    fn config() -> Config {
        Config::default()
    }

    #[test]
    fn maps_complete_record() {
        let record = PostRecord {
            title: Some("Exam Tips".to_string()),
            description: Some("A".repeat(200)),
            image: Some(PostImage {
                url: Some("https://x/y.png".to_string()),
            }),
            created_by: Some(PostAuthor {
                name: Some("Jane".to_string()),
            }),
        };

        let preview = PostPreview::from_record(&record, "abc123", &config());
        assert_eq!(preview.title, "Exam Tips");
        assert_eq!(preview.description.chars().count(), 160);
        assert!(preview.description.ends_with("..."));
        assert!(preview.description.starts_with(&"A".repeat(157)));
        assert_eq!(preview.image_url, "https://x/y.png");
        assert_eq!(preview.author_name, "Jane");
        assert_eq!(preview.canonical_url, "https://duocortex.in/post/abc123");
    }

    #[test]
    fn short_description_becomes_title() {
        let record = PostRecord {
            description: Some("Short note".to_string()),
            created_by: Some(PostAuthor::default()),
            ..PostRecord::default()
        };

        let preview = PostPreview::from_record(&record, "p1", &config());
        assert_eq!(preview.title, "Short note");
        assert_eq!(preview.description, "Short note");
        assert_eq!(
            preview.image_url,
            "https://duocortex.in/assets/img/logo-1.png"
        );
        assert_eq!(preview.author_name, "DuoCortex User");
    }

    #[test]
    fn long_description_is_truncated_into_title() {
        let record = PostRecord {
            description: Some("B".repeat(100)),
            ..PostRecord::default()
        };

        let preview = PostPreview::from_record(&record, "p1", &config());
        assert_eq!(preview.title.chars().count(), 60);
        assert!(preview.title.ends_with("..."));
    }

    #[test]
    fn empty_record_uses_all_fallbacks() {
        let preview = PostPreview::from_record(&PostRecord::default(), "p1", &config());
        assert_eq!(preview.title, "DuoCortex Post");
        assert_eq!(
            preview.description,
            "View this post on DuoCortex - Every Medico's Digital Campus"
        );
        assert_eq!(
            preview.image_url,
            "https://duocortex.in/assets/img/logo-1.png"
        );
        assert_eq!(preview.author_name, "DuoCortex User");
        assert_eq!(preview.canonical_url, "https://duocortex.in/post/p1");
    }

    #[test]
    fn whitespace_only_fields_count_as_absent() {
        let record = PostRecord {
            title: Some("   ".to_string()),
            description: Some(" \n\t ".to_string()),
            image: Some(PostImage {
                url: Some("".to_string()),
            }),
            created_by: Some(PostAuthor {
                name: Some("  ".to_string()),
            }),
        };

        let preview = PostPreview::from_record(&record, "p1", &config());
        assert_eq!(preview.title, "DuoCortex Post");
        assert_eq!(preview.author_name, "DuoCortex User");
        assert_eq!(
            preview.image_url,
            "https://duocortex.in/assets/img/logo-1.png"
        );
    }

    #[test]
    fn description_whitespace_is_collapsed() {
        let record = PostRecord {
            title: Some("T".to_string()),
            description: Some("  line one\n\nline   two\t end  ".to_string()),
            ..PostRecord::default()
        };

        let preview = PostPreview::from_record(&record, "p1", &config());
        assert_eq!(preview.description, "line one line two end");
    }

    #[test]
    fn mapping_is_deterministic() {
        let record = PostRecord {
            title: Some("T".to_string()),
            description: Some("D".repeat(300)),
            ..PostRecord::default()
        };

        let a = PostPreview::from_record(&record, "p1", &config());
        let b = PostPreview::from_record(&record, "p1", &config());
        assert_eq!(a, b);
    }

    // -- collapse_whitespace() --

    #[test]
    fn collapse_whitespace_empty() {
        assert_eq!(collapse_whitespace(""), "");
        assert_eq!(collapse_whitespace("   \n\t "), "");
    }

    #[test]
    fn collapse_whitespace_mixed_runs() {
        assert_eq!(collapse_whitespace("a  b\nc\t\td"), "a b c d");
    }

    // -- truncate_chars() --

    #[test]
    fn truncate_chars_under_limit() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
    }

    #[test]
    fn truncate_chars_over_limit() {
        assert_eq!(truncate_chars("hello world", 8), "hello...");
        assert_eq!(truncate_chars("hello world", 8).chars().count(), 8);
    }

    #[test]
    fn truncate_chars_counts_characters_not_bytes() {
        let cjk = "你".repeat(100);
        let out = truncate_chars(&cjk, 60);
        assert_eq!(out.chars().count(), 60);
        assert!(out.ends_with("..."));
        assert!(out.starts_with(&"你".repeat(57)));
    }

    #[test]
    fn truncate_chars_tiny_limit() {
        assert_eq!(truncate_chars("hello", 3), "...");
        assert_eq!(truncate_chars("hello", 2), "...");
    }
}
