//! Mock LLM for tests and offline runs.
//!
//! Replies from a script (one reply per call, last reply repeated), or fails
//! every call. Records the messages it was given so tests can inspect prompts.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::capability::CapabilityError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;

/// Mock LLM: scripted assistant replies.
///
/// **Interaction**: Implements `LlmClient`; used by `LlmCorrector` /
/// `LlmSummarizer` in tests.
pub struct MockLlm {
    replies: Mutex<VecDeque<String>>,
    /// Reply repeated once the script runs out.
    last: Mutex<Option<String>>,
    /// When set, every call fails with this transport message.
    failure: Option<String>,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl MockLlm {
    /// Creates a mock that always answers `content`.
    pub fn with_reply(content: impl Into<String>) -> Self {
        Self::with_replies([content.into()])
    }

    /// Creates a mock that answers each call with the next reply; the last one repeats.
    pub fn with_replies<I, T>(replies: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            last: Mutex::new(None),
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock whose every call fails with `CapabilityError::Transport(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::with_replies(Vec::<String>::new())
        }
    }

    /// Message lists received so far, one entry per call.
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, CapabilityError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(messages.to_vec());
        }
        if let Some(message) = &self.failure {
            return Err(CapabilityError::Transport(message.clone()));
        }
        let next = self.replies.lock().ok().and_then(|mut r| r.pop_front());
        let content = match next {
            Some(reply) => {
                if let Ok(mut last) = self.last.lock() {
                    *last = Some(reply.clone());
                }
                reply
            }
            None => self
                .last
                .lock()
                .ok()
                .and_then(|l| l.clone())
                .ok_or_else(|| CapabilityError::InvalidResponse("mock has no reply".into()))?,
        };
        Ok(LlmResponse {
            content,
            usage: None,
        })
    }
}
