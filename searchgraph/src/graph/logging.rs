//! Logging utilities for graph execution.
//!
//! Structured `tracing` events for graph start/complete/error, node execution
//! and conditional routing.

use std::fmt::Debug;

/// Log node execution start.
pub fn log_node_start(node_id: &str) {
    tracing::debug!(node_id = node_id, "Starting node execution");
}

/// Log the state a node is about to receive (trace level; states can be large).
pub fn log_node_state<S: Debug>(node_id: &str, state: &S) {
    tracing::trace!(node_id = node_id, state = ?state, "Node execution: state");
}

/// Log node execution completion.
pub fn log_node_complete(node_id: &str) {
    tracing::debug!(node_id = node_id, "Node execution complete");
}

/// Log the target a conditional router picked.
pub fn log_routing(from: &str, to: &str) {
    tracing::debug!(from = from, to = to, "conditional routing");
}

/// Log graph execution start.
pub fn log_graph_start(entry_point: &str) {
    tracing::info!(entry_point = entry_point, "Starting graph execution");
}

/// Log graph execution completion.
pub fn log_graph_complete(steps: usize) {
    tracing::info!(steps = steps, "Graph execution complete");
}

/// Log graph execution error.
pub fn log_graph_error(error: &crate::error::AgentError) {
    tracing::error!(%error, "Graph execution error");
}
