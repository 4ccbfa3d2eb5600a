//! Pipeline nodes of the search workflow.
//!
//! Each node holds the capability it calls and implements `Node<ResearchState>`.
//! Capability failures are handled locally: search and scrape always degrade,
//! correction and summarization follow the node's [`FailurePolicy`].

mod correct;
mod report;
mod scrape;
mod search;
mod summarize;

pub use correct::{CorrectNode, CorrectionMode};
pub use report::ReportNode;
pub use scrape::ScrapeNode;
pub use search::{SearchNode, DEFAULT_MAX_RESULTS};
pub use summarize::{SummarizeNode, DEFAULT_MIN_SUMMARY_CHARS};

use crate::error::AgentError;
use crate::state::StateError;

pub const CORRECTOR: &str = "Corrector";
pub const WEB_SEARCH: &str = "WebSearch";
pub const WEB_SCRAPER: &str = "WebScraper";
pub const CORRECTOR_CONTENT: &str = "CorrectorContent";
pub const SUMMARIZER: &str = "Summarizer";
pub const FINAL_REPORT: &str = "FinalReport";

/// What a node does when its correction or summarization capability fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Record a fallback value and keep going.
    #[default]
    Degrade,
    /// Fail the node with `AgentError::Capability`.
    Propagate,
}

/// Maps a state write violation to the node that caused it.
fn state_error(node: &str) -> impl Fn(StateError) -> AgentError + '_ {
    move |e| AgentError::InvalidState {
        node: node.to_string(),
        reason: e.to_string(),
    }
}
