//! Node middleware: wrap node.run with external async logic (around pattern).
//!
//! Set via `StateGraph::with_middleware`.

use async_trait::async_trait;
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;

use crate::error::AgentError;

/// The wrapped node call handed to middleware; must be called to execute the node.
pub type NodeCall<S> = Box<
    dyn FnOnce(S) -> Pin<Box<dyn Future<Output = Result<S, AgentError>> + Send>> + Send,
>;

/// Async middleware that wraps node.run; implemented externally.
///
/// Can decide when to call `inner`, observe or modify the result.
#[async_trait]
pub trait NodeMiddleware<S>: Send + Sync
where
    S: Send + Sync + Debug + 'static,
{
    /// - `node_id`: registration name of the current node
    /// - `state`: state passed to the node
    /// - `inner`: actual node.run logic
    async fn around_run(&self, node_id: &str, state: S, inner: NodeCall<S>)
        -> Result<S, AgentError>;
}
