//! LLM-backed correction and summarization.
//!
//! Both send a single user message (`"Correct: <text>"` / `"Summarize: <text>"`)
//! and return the trimmed assistant reply.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::{CapabilityError, TextCorrector, TextSummarizer};
use crate::llm::LlmClient;
use crate::message::Message;

const CORRECT_PREFIX: &str = "Correct: ";
const SUMMARIZE_PREFIX: &str = "Summarize: ";

async fn complete(
    llm: &dyn LlmClient,
    prefix: &str,
    text: &str,
) -> Result<String, CapabilityError> {
    let messages = [Message::user(format!("{}{}", prefix, text))];
    let response = llm.invoke(&messages).await?;
    if let Some(usage) = &response.usage {
        debug!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "llm text completion"
        );
    }
    Ok(response.content.trim().to_string())
}

/// Spelling/grammar correction through an [`LlmClient`].
pub struct LlmCorrector {
    llm: Arc<dyn LlmClient>,
}

impl LlmCorrector {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl TextCorrector for LlmCorrector {
    async fn correct(&self, text: &str) -> Result<String, CapabilityError> {
        complete(self.llm.as_ref(), CORRECT_PREFIX, text).await
    }
}

/// Summarization through an [`LlmClient`].
pub struct LlmSummarizer {
    llm: Arc<dyn LlmClient>,
}

impl LlmSummarizer {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl TextSummarizer for LlmSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, CapabilityError> {
        complete(self.llm.as_ref(), SUMMARIZE_PREFIX, text).await
    }
}
