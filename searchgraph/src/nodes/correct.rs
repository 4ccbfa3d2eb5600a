//! Correction node: fixes the query or the scraped page texts.
//!
//! One helper serves both pipeline positions; [`CorrectionMode`] picks the role.
//! `Auto` infers it from the state: no corrected query yet means query mode.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::capability::TextCorrector;
use crate::error::AgentError;
use crate::graph::Node;
use crate::state::ResearchState;

use super::{state_error, FailurePolicy, CORRECTOR, CORRECTOR_CONTENT};

/// Role of a [`CorrectNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionMode {
    /// Read `query`, write `corrected_query`.
    Query,
    /// Read `scraped_content`, write `corrected_content`.
    Content,
    /// `Query` while `corrected_query` is unset, `Content` afterwards.
    Auto,
}

pub struct CorrectNode {
    corrector: Arc<dyn TextCorrector>,
    mode: CorrectionMode,
    policy: FailurePolicy,
}

impl CorrectNode {
    pub fn new(corrector: Arc<dyn TextCorrector>, mode: CorrectionMode) -> Self {
        Self {
            corrector,
            mode,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Role for this state; `Auto` resolves by whether `corrected_query` is set.
    pub fn resolve_mode(&self, state: &ResearchState) -> CorrectionMode {
        match self.mode {
            CorrectionMode::Auto if state.corrected_query.is_none() => CorrectionMode::Query,
            CorrectionMode::Auto => CorrectionMode::Content,
            explicit => explicit,
        }
    }

    async fn correct_query(&self, mut state: ResearchState) -> Result<ResearchState, AgentError> {
        let corrected = match self.corrector.correct(&state.query).await {
            Ok(text) => text,
            Err(e) if self.policy == FailurePolicy::Degrade => {
                warn!(error = %e, "query correction failed, keeping original query");
                state.query.clone()
            }
            Err(e) => return Err(e.into()),
        };
        info!(query = %state.query, corrected = %corrected, "query corrected");
        state
            .set_corrected_query(corrected)
            .map_err(state_error(self.id()))?;
        Ok(state)
    }

    async fn correct_content(&self, mut state: ResearchState) -> Result<ResearchState, AgentError> {
        let pages: Vec<(String, String)> = state
            .scraped_content
            .iter()
            .map(|(url, text)| (url.clone(), text.clone()))
            .collect();
        for (url, text) in pages {
            match self.corrector.correct(&text).await {
                Ok(corrected) => state
                    .record_corrected(url, corrected)
                    .map_err(state_error(self.id()))?,
                Err(e) if self.policy == FailurePolicy::Degrade => {
                    warn!(url = %url, error = %e, "content correction failed, skipping url");
                }
                Err(e) => return Err(e.into()),
            }
        }
        info!(count = state.corrected_content.len(), "content corrected");
        Ok(state)
    }
}

#[async_trait]
impl Node<ResearchState> for CorrectNode {
    fn id(&self) -> &str {
        match self.mode {
            CorrectionMode::Content => CORRECTOR_CONTENT,
            CorrectionMode::Query | CorrectionMode::Auto => CORRECTOR,
        }
    }

    async fn run(&self, state: ResearchState) -> Result<ResearchState, AgentError> {
        match self.resolve_mode(&state) {
            CorrectionMode::Query => self.correct_query(state).await,
            _ => self.correct_content(state).await,
        }
    }
}
