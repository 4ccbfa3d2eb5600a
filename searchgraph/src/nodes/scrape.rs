//! Scrape node: fetches every valid url; failures record the sentinel text.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::capability::{PageScraper, SCRAPE_FAILED_SENTINEL};
use crate::error::AgentError;
use crate::graph::Node;
use crate::state::{is_valid_url, ResearchState};

use super::{state_error, WEB_SCRAPER};

pub struct ScrapeNode {
    scraper: Arc<dyn PageScraper>,
}

impl ScrapeNode {
    pub fn new(scraper: Arc<dyn PageScraper>) -> Self {
        Self { scraper }
    }
}

#[async_trait]
impl Node<ResearchState> for ScrapeNode {
    fn id(&self) -> &str {
        WEB_SCRAPER
    }

    async fn run(&self, mut state: ResearchState) -> Result<ResearchState, AgentError> {
        let urls = state.urls.clone();
        for url in urls {
            if !is_valid_url(&url) {
                debug!(url = %url, "skipping url without network scheme");
                continue;
            }
            // Duplicate urls from the searcher are fetched once.
            if state.scraped_content.contains_key(&url) {
                continue;
            }
            let text = match self.scraper.fetch(&url).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(url = %url, error = %e, "scrape failed");
                    SCRAPE_FAILED_SENTINEL.to_string()
                }
            };
            debug!(url = %url, chars = text.chars().count(), "scraped");
            state
                .record_scraped(url, text)
                .map_err(state_error(WEB_SCRAPER))?;
        }
        info!(count = state.scraped_content.len(), "scrape complete");
        Ok(state)
    }
}
