//! Summarize node: one summary per corrected page.
//!
//! Short texts and texts carrying the scrape-failure marker get
//! `NO_USEFUL_CONTENT` without a summarizer call.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::capability::{TextSummarizer, NO_USEFUL_CONTENT, SCRAPE_FAILED_SENTINEL};
use crate::error::AgentError;
use crate::graph::Node;
use crate::state::ResearchState;

use super::{state_error, FailurePolicy, SUMMARIZER};

pub const DEFAULT_MIN_SUMMARY_CHARS: usize = 50;

pub struct SummarizeNode {
    summarizer: Arc<dyn TextSummarizer>,
    min_chars: usize,
    policy: FailurePolicy,
}

impl SummarizeNode {
    pub fn new(summarizer: Arc<dyn TextSummarizer>) -> Self {
        Self {
            summarizer,
            min_chars: DEFAULT_MIN_SUMMARY_CHARS,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// True when `text` is too short or carries the scrape-failure marker.
    pub fn is_unusable(&self, text: &str) -> bool {
        text.chars().count() < self.min_chars
            || text
                .to_lowercase()
                .contains(&SCRAPE_FAILED_SENTINEL.to_lowercase())
    }
}

#[async_trait]
impl Node<ResearchState> for SummarizeNode {
    fn id(&self) -> &str {
        SUMMARIZER
    }

    async fn run(&self, mut state: ResearchState) -> Result<ResearchState, AgentError> {
        let pages: Vec<(String, String)> = state
            .corrected_content
            .iter()
            .map(|(url, text)| (url.clone(), text.clone()))
            .collect();
        for (url, text) in pages {
            let summary = if self.is_unusable(&text) {
                debug!(url = %url, chars = text.chars().count(), "no useful content");
                NO_USEFUL_CONTENT.to_string()
            } else {
                match self.summarizer.summarize(&text).await {
                    Ok(summary) => summary,
                    Err(e) if self.policy == FailurePolicy::Degrade => {
                        warn!(url = %url, error = %e, "summarization failed");
                        NO_USEFUL_CONTENT.to_string()
                    }
                    Err(e) => return Err(e.into()),
                }
            };
            state
                .record_summary(url, summary)
                .map_err(state_error(SUMMARIZER))?;
        }
        info!(count = state.summaries.len(), "summaries complete");
        Ok(state)
    }
}
