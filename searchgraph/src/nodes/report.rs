//! Report node: hands the summaries to the report sink in search-rank order.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::capability::{ReportEntry, ReportSink};
use crate::error::AgentError;
use crate::graph::Node;
use crate::state::ResearchState;

use super::FINAL_REPORT;

pub struct ReportNode {
    sink: Arc<dyn ReportSink>,
}

impl ReportNode {
    pub fn new(sink: Arc<dyn ReportSink>) -> Self {
        Self { sink }
    }

    /// Summaries ordered by the rank of their url; each url appears once.
    pub fn entries(state: &ResearchState) -> Vec<ReportEntry> {
        let mut seen = std::collections::HashSet::new();
        state
            .urls
            .iter()
            .filter(|url| seen.insert(url.as_str()))
            .filter_map(|url| {
                state.summaries.get(url).map(|summary| ReportEntry {
                    url: url.clone(),
                    summary: summary.clone(),
                })
            })
            .collect()
    }
}

#[async_trait]
impl Node<ResearchState> for ReportNode {
    fn id(&self) -> &str {
        FINAL_REPORT
    }

    async fn run(&self, state: ResearchState) -> Result<ResearchState, AgentError> {
        let entries = Self::entries(&state);
        self.sink.write(&entries).await?;
        info!(entries = entries.len(), "final report written");
        Ok(state)
    }
}
