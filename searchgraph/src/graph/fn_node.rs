//! Function node: a plain closure registered as a graph node.
//!
//! `StateGraph::add_node(name, Arc::new(FnNode::new(name, |s| Ok(s))))` turns any
//! `Fn(S) -> Result<S, AgentError>` into a `Node<S>`.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::AgentError;

use super::Node;

/// Node backed by a synchronous closure over the state.
pub struct FnNode<F> {
    name: String,
    f: F,
}

impl<F> FnNode<F> {
    /// Creates a node labelled `name` that runs `f`.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

#[async_trait]
impl<S, F> Node<S> for FnNode<F>
where
    S: Send + Sync + Debug + 'static,
    F: Fn(S) -> Result<S, AgentError> + Send + Sync,
{
    fn id(&self) -> &str {
        &self.name
    }

    async fn run(&self, state: S) -> Result<S, AgentError> {
        (self.f)(state)
    }
}
