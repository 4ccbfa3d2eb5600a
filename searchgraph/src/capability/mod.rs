//! External capabilities the pipeline nodes call through: text correction,
//! web search, page scraping, summarization and report persistence.
//!
//! Each capability is an `async_trait` object injected into the node that uses
//! it, so tests swap in doubles and the CLI wires real clients.
//!
//! Implementations shipped here:
//! - [`LlmCorrector`], [`LlmSummarizer`]: prompt an [`LlmClient`](crate::llm::LlmClient).
//! - [`ExaSearcher`]: Exa search API.
//! - [`HttpPageScraper`]: `reqwest` GET plus `<p>` text extraction.
//! - [`FileReportSink`]: plain-text report file.

mod exa;
mod file_report;
mod http_scraper;
mod llm_text;

pub use exa::ExaSearcher;
pub use file_report::{format_report, FileReportSink, DEFAULT_REPORT_PATH, REPORT_HEADER};
pub use http_scraper::{extract_paragraph_text, HttpPageScraper, DEFAULT_MAX_CHARS, DEFAULT_TIMEOUT};
pub use llm_text::{LlmCorrector, LlmSummarizer};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Text recorded in `scraped_content` when a page could not be fetched.
pub const SCRAPE_FAILED_SENTINEL: &str = "content unavailable";

/// Summary recorded when there is nothing worth summarizing.
pub const NO_USEFUL_CONTENT: &str = "No useful content available for summarization.";

/// Failure of an external capability.
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// Network or client-level failure (connect, timeout, TLS, body read).
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote answered with a non-success HTTP status.
    #[error("http status {status}: {body}")]
    Status { status: u16, body: String },

    /// The remote answered but the payload was unusable (no choices, bad JSON).
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Local I/O failure (report file).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A required credential is not configured.
    #[error("missing credential: {0}")]
    MissingCredential(String),
}

impl From<reqwest::Error> for CapabilityError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => CapabilityError::Status {
                status: status.as_u16(),
                body: e.to_string(),
            },
            None => CapabilityError::Transport(e.to_string()),
        }
    }
}

/// Fixes spelling and grammar of a piece of text.
#[async_trait]
pub trait TextCorrector: Send + Sync {
    async fn correct(&self, text: &str) -> Result<String, CapabilityError>;
}

/// Finds result urls for a query, best match first.
#[async_trait]
pub trait WebSearcher: Send + Sync {
    async fn search(&self, query: &str, max_results: usize)
        -> Result<Vec<String>, CapabilityError>;
}

/// Fetches a page and returns its readable text.
#[async_trait]
pub trait PageScraper: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, CapabilityError>;
}

/// Produces a short summary of a piece of text.
#[async_trait]
pub trait TextSummarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, CapabilityError>;
}

/// One line item of the final report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub url: String,
    pub summary: String,
}

/// Persists the final report and mirrors it to the console/log.
///
/// Entries arrive in search-rank order.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn write(&self, entries: &[ReportEntry]) -> Result<(), CapabilityError>;
}
