//! Compiled state graph: immutable, supports invoke only.
//!
//! Built by `StateGraph::compile`. Holds the nodes, the entry point and the
//! per-node successor map. `invoke` walks the graph one node at a time until a
//! terminal node, guarded by a step limit.

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::AgentError;

use super::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_node_state, log_routing,
};
use super::node_middleware::{NodeCall, NodeMiddleware};
use super::state_graph::END;
use super::{NextEntry, Node};

/// Validator called with the state after each node; `Err(reason)` stops the run.
pub type StateValidatorFn<S> = Arc<dyn Fn(&S) -> Result<(), String> + Send + Sync>;

/// Compiled graph: immutable structure, supports invoke only.
///
/// Created by `StateGraph::compile()`. Runs from the entry point; after each
/// node follows its unconditional edge, or evaluates its conditional router,
/// and stops at a node with no successor (or a successor of `END`).
pub struct CompiledStateGraph<S> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Node names in registration order.
    pub(super) order: Vec<String>,
    pub(super) entry_point: String,
    /// Map from node id to how to get next. Nodes absent here are terminal.
    pub(super) next_map: HashMap<String, NextEntry<S>>,
    pub(super) middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    /// Maximum number of node executions in one `invoke`.
    pub(super) max_steps: usize,
    pub(super) validator: Option<StateValidatorFn<S>>,
}

impl<S> CompiledStateGraph<S>
where
    S: Send + Sync + Debug + 'static,
{
    /// Name of the node every run starts at.
    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    /// Registered node names in registration order.
    pub fn node_ids(&self) -> &[String] {
        &self.order
    }

    /// Step guard for `invoke`.
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Replaces the step guard on an already compiled graph.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    async fn execute_node(
        &self,
        node_id: &str,
        node: Arc<dyn Node<S>>,
        state: S,
    ) -> Result<S, AgentError> {
        match &self.middleware {
            Some(middleware) => {
                let inner: NodeCall<S> = Box::new(
                    move |s: S| -> Pin<Box<dyn Future<Output = Result<S, AgentError>> + Send>> {
                        Box::pin(async move { node.run(s).await })
                    },
                );
                middleware.around_run(node_id, state, inner).await
            }
            None => node.run(state).await,
        }
    }

    /// Resolves the node to run after `current_id`, or `None` when the run ends.
    fn next_node(&self, current_id: &str, state: &S) -> Result<Option<String>, AgentError> {
        let target = match self.next_map.get(current_id) {
            None => return Ok(None),
            Some(NextEntry::Unconditional(to)) => to.clone(),
            Some(NextEntry::Conditional(router)) => {
                let to = router.resolve_next(state);
                log_routing(current_id, &to);
                to
            }
        };
        if target == END {
            return Ok(None);
        }
        if !self.nodes.contains_key(&target) {
            return Err(AgentError::UnknownNode(target));
        }
        Ok(Some(target))
    }

    /// Shared run loop: steps through nodes until a terminal node. Returns the
    /// final state and the number of nodes that ran.
    async fn run_loop(&self, state: S) -> Result<(S, usize), AgentError> {
        let mut state = state;
        let mut current_id = self.entry_point.clone();
        let mut steps = 0usize;

        loop {
            if steps >= self.max_steps {
                return Err(AgentError::ExecutionLimitExceeded {
                    limit: self.max_steps,
                    node: current_id,
                });
            }
            steps += 1;

            let node = self
                .nodes
                .get(&current_id)
                .cloned()
                .ok_or_else(|| AgentError::UnknownNode(current_id.clone()))?;

            log_node_start(&current_id);
            log_node_state(&current_id, &state);

            state = self.execute_node(&current_id, node, state).await?;

            if let Some(validator) = &self.validator {
                validator(&state).map_err(|reason| AgentError::InvalidState {
                    node: current_id.clone(),
                    reason,
                })?;
            }

            log_node_complete(&current_id);

            match self.next_node(&current_id, &state)? {
                Some(next) => current_id = next,
                None => return Ok((state, steps)),
            }
        }
    }

    /// Runs the graph with the given state and returns the final state.
    ///
    /// Nodes run strictly one after another. Fails with
    /// `ExecutionLimitExceeded` when more than `max_steps` nodes would run,
    /// `UnknownNode` when a router names an unregistered node,
    /// `InvalidState` when the validator rejects a node's output, or with the
    /// first error a node returns.
    pub async fn invoke(&self, state: S) -> Result<S, AgentError> {
        log_graph_start(&self.entry_point);
        match self.run_loop(state).await {
            Ok((state, steps)) => {
                log_graph_complete(steps);
                Ok(state)
            }
            Err(e) => {
                log_graph_error(&e);
                Err(e)
            }
        }
    }
}
