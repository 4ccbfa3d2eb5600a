//! Search node: corrected query (or the raw query) to ranked urls.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::capability::WebSearcher;
use crate::error::AgentError;
use crate::graph::Node;
use crate::state::ResearchState;

use super::{state_error, WEB_SEARCH};

pub const DEFAULT_MAX_RESULTS: usize = 10;

pub struct SearchNode {
    searcher: Arc<dyn WebSearcher>,
    max_results: usize,
}

impl SearchNode {
    pub fn new(searcher: Arc<dyn WebSearcher>, max_results: usize) -> Self {
        Self {
            searcher,
            max_results,
        }
    }
}

#[async_trait]
impl Node<ResearchState> for SearchNode {
    fn id(&self) -> &str {
        WEB_SEARCH
    }

    async fn run(&self, mut state: ResearchState) -> Result<ResearchState, AgentError> {
        let query = state
            .corrected_query
            .clone()
            .unwrap_or_else(|| state.query.clone());
        let urls = match self.searcher.search(&query, self.max_results).await {
            Ok(mut urls) => {
                urls.truncate(self.max_results);
                urls
            }
            Err(e) => {
                warn!(query = %query, error = %e, "search failed, continuing with no urls");
                Vec::new()
            }
        };
        info!(query = %query, count = urls.len(), "search complete");
        state.set_urls(urls).map_err(state_error(WEB_SEARCH))?;
        Ok(state)
    }
}
