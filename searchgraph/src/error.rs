//! Run-time error types.
//!
//! Returned by `Node::run` and `CompiledStateGraph::invoke`. Build-time graph
//! misuse has its own types in [`crate::graph`].

use thiserror::Error;

use crate::capability::CapabilityError;

/// Error raised while a compiled graph is running.
///
/// Capability failures that a node chose not to degrade arrive here as
/// `Capability`; everything else is an engine-level failure.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. a node rejected its input).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The run visited more nodes than the step guard allows.
    #[error("execution limit of {limit} steps exceeded at node {node}")]
    ExecutionLimitExceeded { limit: usize, node: String },

    /// A conditional router returned a name that is not a registered node.
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// The state validator rejected the state a node returned.
    #[error("invalid state after node {node}: {reason}")]
    InvalidState { node: String, reason: String },

    /// A capability failed and the node propagated the failure.
    #[error("capability error: {0}")]
    Capability(#[from] CapabilityError),
}
