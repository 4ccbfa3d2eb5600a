//! Graph construction and compilation errors.
//!
//! `GraphBuildError` is returned eagerly by `StateGraph::add_node`, `add_edge`,
//! `add_conditional_edges` and `set_entry_point`. `CompilationError` is returned
//! by `StateGraph::compile` when the registered topology cannot be run.

use thiserror::Error;

/// Misuse while registering nodes and edges.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphBuildError {
    /// A node with this name is already registered.
    #[error("duplicate node: {0}")]
    DuplicateNode(String),

    /// An edge, conditional edge or entry point refers to a name never passed to `add_node`.
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// The node already has conditional edges; a second router would replace the first.
    #[error("conditional edges already registered for node: {0}")]
    DuplicateConditionalEdge(String),
}

/// Error when compiling a state graph. Every variant names the offending node.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompilationError {
    /// No entry point was set (neither `set_entry_point` nor `add_edge(START, ..)`).
    #[error("graph has no entry point")]
    MissingEntryPoint,

    /// A node has more than one unconditional outgoing edge.
    #[error("node has more than one outgoing edge: {0}")]
    MultipleEdges(String),

    /// A node has both an outgoing edge and conditional edges; it must have exactly one.
    #[error("node has both edge and conditional edges: {0}")]
    NodeHasBothEdgeAndConditional(String),

    /// A value in a conditional path_map is not a registered node nor END.
    #[error("conditional path_map of {node} targets unknown node {target}")]
    InvalidConditionalPathMap { node: String, target: String },
}

impl CompilationError {
    /// The node the error is about, when there is one.
    pub fn node(&self) -> Option<&str> {
        match self {
            CompilationError::MissingEntryPoint => None,
            CompilationError::MultipleEdges(id)
            | CompilationError::NodeHasBothEdgeAndConditional(id) => Some(id),
            CompilationError::InvalidConditionalPathMap { node, .. } => Some(node),
        }
    }
}
