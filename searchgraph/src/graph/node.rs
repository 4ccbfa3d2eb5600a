//! Graph node trait: one step in a StateGraph.
//!
//! Receives state `S` by value and returns the updated `S`. Routing is decided
//! by the graph's edges, never by the node.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::AgentError;

/// One step in a graph: state in, state out.
///
/// Nodes are registered as `Arc<dyn Node<S>>`, so the same node value may sit
/// behind several graph names. `id` is the node's own label for logs; the graph
/// addresses it by registration name.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: Send + Sync + Debug + 'static,
{
    /// Node label (e.g. `"corrector"`).
    fn id(&self) -> &str;

    /// One step. The returned state replaces the one passed in.
    async fn run(&self, state: S) -> Result<S, AgentError>;
}
