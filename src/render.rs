//! HTML rendering for crawler-served preview pages.
//!
//! The document is assembled with [maud](https://maud.lambda.xyz/). Every
//! dynamic value goes through [`Escaped`], which escapes all five reserved
//! HTML characters - including single quotes - before insertion into text
//! nodes or attributes, so upstream content can never break out of the
//! markup.

use maud::{DOCTYPE, Markup, PreEscaped, Render, html};

use crate::config::Config;
use crate::preview::PostPreview;

/// Fixed Open Graph image dimensions expected by most crawlers.
const OG_IMAGE_WIDTH: &str = "1200";
const OG_IMAGE_HEIGHT: &str = "630";

/// Inline CSS for the visible fallback body.
const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;color:#111;background:#fafafa;display:flex;justify-content:center;padding:2rem 1rem}
main{max-width:640px;width:100%}
h1{font-size:1.5rem;margin-bottom:.75rem;line-height:1.3}
p{margin-bottom:.75rem;color:#444}
img{max-width:100%;height:auto;border-radius:8px;margin:.75rem 0}
a{color:#4f46e5;text-decoration:none}
a:hover{text-decoration:underline}
"#;

/// Text escaped for the five reserved HTML/attribute characters.
struct Escaped<'a>(&'a str);

impl Render for Escaped<'_> {
    fn render_to(&self, buffer: &mut String) {
        for ch in self.0.chars() {
            match ch {
                '&' => buffer.push_str("&amp;"),
                '<' => buffer.push_str("&lt;"),
                '>' => buffer.push_str("&gt;"),
                '"' => buffer.push_str("&quot;"),
                '\'' => buffer.push_str("&#039;"),
                _ => buffer.push(ch),
            }
        }
    }
}

/// Render the complete preview document for a post.
///
/// Pure function of its inputs: the same preview renders to byte-identical
/// HTML every time.
pub fn post_page(preview: &PostPreview, config: &Config) -> Markup {
    let document_title = format!("{} | {}", preview.title, config.site_name);
    let refresh = format!("0;url={}", preview.canonical_url);

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";

                title { (Escaped(&document_title)) }
                meta name="description" content=(Escaped(&preview.description));

                // Open Graph / Facebook / WhatsApp
                meta property="og:type" content="article";
                meta property="og:site_name" content=(Escaped(&config.site_name));
                meta property="og:title" content=(Escaped(&preview.title));
                meta property="og:description" content=(Escaped(&preview.description));
                meta property="og:image" content=(Escaped(&preview.image_url));
                meta property="og:image:width" content=(OG_IMAGE_WIDTH);
                meta property="og:image:height" content=(OG_IMAGE_HEIGHT);
                meta property="og:url" content=(Escaped(&preview.canonical_url));
                meta property="article:author" content=(Escaped(&preview.author_name));

                // Twitter Card
                meta name="twitter:card" content="summary_large_image";
                meta name="twitter:site" content=(Escaped(&config.twitter_site));
                meta name="twitter:title" content=(Escaped(&preview.title));
                meta name="twitter:description" content=(Escaped(&preview.description));
                meta name="twitter:image" content=(Escaped(&preview.image_url));

                // Anything that slipped past crawler classification is
                // forwarded straight to the real page.
                meta http-equiv="refresh" content=(Escaped(&refresh));

                link rel="icon" href=(Escaped(&config.default_image_url)) type="image/png";
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                main {
                    h1 { (Escaped(&preview.title)) }
                    p { (Escaped(&preview.description)) }
                    p {
                        "Posted by " (Escaped(&preview.author_name))
                        " on " (Escaped(&config.site_name))
                    }
                    img src=(Escaped(&preview.image_url)) alt="Post image";
                    a href=(Escaped(&preview.canonical_url)) {
                        "View on " (Escaped(&config.site_name))
                    }
                }
            }
        }
    }
}
