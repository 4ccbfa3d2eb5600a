//! Logging middleware that records node enter/exit around each node.run call.
//!
//! Installed by the CLI under `--verbose`. Interacts with [`NodeMiddleware`](super::NodeMiddleware).

use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Instant;

use crate::error::AgentError;

use super::{NodeCall, NodeMiddleware};

/// Middleware that logs node enter/exit and elapsed time at `info`.
///
/// Generic over state type `S`; only the node name is logged.
pub struct LoggingNodeMiddleware<S> {
    _phantom: std::marker::PhantomData<fn() -> S>,
}

impl<S> Default for LoggingNodeMiddleware<S> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

#[async_trait]
impl<S> NodeMiddleware<S> for LoggingNodeMiddleware<S>
where
    S: Send + Sync + Debug + 'static,
{
    async fn around_run(
        &self,
        node_id: &str,
        state: S,
        inner: NodeCall<S>,
    ) -> Result<S, AgentError> {
        tracing::info!(node = node_id, "enter node");
        let started = Instant::now();
        let result = inner(state).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => tracing::info!(node = node_id, elapsed_ms, "exit node"),
            Err(e) => tracing::warn!(node = node_id, elapsed_ms, error = %e, "exit node with error"),
        }
        result
    }
}
