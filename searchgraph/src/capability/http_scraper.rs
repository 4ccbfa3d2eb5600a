//! Page scraping over HTTP.
//!
//! GETs the page with `reqwest` (5 s timeout by default), keeps the text of
//! every `<p>` element joined by single spaces, and caps the result at
//! 1000 characters.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use super::{CapabilityError, PageScraper};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_CHARS: usize = 1000;

fn paragraph_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<p(?:\s[^>]*)?>(.*?)</p\s*>").expect("paragraph pattern is valid")
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern is valid"))
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Text of all `<p>` elements, tags stripped and whitespace collapsed,
/// joined by a single space. Empty paragraphs are dropped.
pub fn extract_paragraph_text(html: &str) -> String {
    paragraph_re()
        .captures_iter(html)
        .filter_map(|c| c.get(1))
        .map(|m| {
            let text = decode_entities(&tag_re().replace_all(m.as_str(), ""));
            text.split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// `reqwest`-backed [`PageScraper`].
pub struct HttpPageScraper {
    client: reqwest::Client,
    max_chars: usize,
}

impl HttpPageScraper {
    /// Scraper with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, CapabilityError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CapabilityError::Transport(e.to_string()))?;
        Ok(Self::with_client(client))
    }

    /// Uses a caller-configured client (timeouts, proxies).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }
}

#[async_trait]
impl PageScraper for HttpPageScraper {
    async fn fetch(&self, url: &str) -> Result<String, CapabilityError> {
        let res = self.client.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(CapabilityError::Status {
                status: status.as_u16(),
                body: truncate_chars(&body, 200),
            });
        }
        let html = res.text().await?;
        let text = truncate_chars(&extract_paragraph_text(&html), self.max_chars);
        debug!(url = %url, chars = text.chars().count(), "page scraped");
        Ok(text)
    }
}
