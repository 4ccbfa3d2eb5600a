//! State graph: named nodes + edges + conditional edges, compile and invoke.
//!
//! StateGraph: add nodes and edges, compile, then invoke with state.

mod compile_error;
mod compiled;
mod conditional;
mod fn_node;
mod logging;
mod logging_middleware;
mod node;
mod node_middleware;
mod state_graph;
mod visualization;

pub use compile_error::{CompilationError, GraphBuildError};
pub use compiled::{CompiledStateGraph, StateValidatorFn};
pub use conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
pub use fn_node::FnNode;
pub use logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_routing,
};
pub use logging_middleware::LoggingNodeMiddleware;
pub use node::Node;
pub use node_middleware::{NodeCall, NodeMiddleware};
pub use state_graph::{StateGraph, END, START};
pub use visualization::{generate_dot, generate_text};
