//! Crawler classification from the `User-Agent` header.
//!
//! Link-preview crawlers announce themselves with well-known substrings.
//! Unknown or spoofed agents classify as regular users and fall through to
//! the app; no attempt is made to catch them.

/// Known content-preview crawler signatures, matched case-insensitively.
///
/// Covers the major social networks, search engines, messaging apps, and
/// link-preview services.
pub const DEFAULT_SIGNATURES: &[&str] = &[
    "facebookexternalhit",
    "Facebot",
    "WhatsApp",
    "Twitterbot",
    "LinkedInBot",
    "Pinterest",
    "Slackbot",
    "TelegramBot",
    "Discordbot",
    "Googlebot",
    "bingbot",
    "Embedly",
    "Quora Link Preview",
    "Showyoubot",
    "outbrain",
    "vkShare",
    "W3C_Validator",
];

/// Classifies requests as crawler or regular user from the `User-Agent`.
#[derive(Debug, Clone)]
pub struct CrawlerClassifier {
    /// Signature substrings, lowercased at construction.
    signatures: Vec<String>,
}

impl CrawlerClassifier {
    /// Build a classifier from signature substrings.
    pub fn new<I, S>(signatures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            signatures: signatures
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// True if the user-agent contains any known crawler signature.
    ///
    /// An absent header is passed as an empty string and never matches.
    pub fn is_crawler(&self, user_agent: &str) -> bool {
        if user_agent.is_empty() {
            return false;
        }
        let ua = user_agent.to_lowercase();
        self.signatures.iter().any(|sig| ua.contains(sig.as_str()))
    }
}

impl Default for CrawlerClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_SIGNATURES.iter().copied())
    }
}
