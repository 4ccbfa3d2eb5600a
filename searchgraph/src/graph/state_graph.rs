//! State graph: named nodes, explicit edges (from → to) and conditional edges.
//!
//! Register nodes with `add_node`, pick the entry with `set_entry_point` (or
//! `add_edge(START, first)`), wire successors with `add_edge(from, to)` and
//! `add_conditional_edges`. A node without an outgoing edge is terminal; `END`
//! may be used as an explicit edge target for the same effect. Then `compile`
//! to get a `CompiledStateGraph`.
//!
//! # Conditional edges
//!
//! From a source node, a routing function `(state) -> key` is called after the
//! node runs; the key is used as the next node id, or looked up in an optional
//! path map. A node must have either one outgoing `add_edge` or
//! `add_conditional_edges`, not both.
//!
//! # Registration errors
//!
//! Registration methods check names eagerly and return `GraphBuildError`, so
//! calls chain with `?`:
//!
//! ```rust,ignore
//! graph.add_node("a", a)?.add_node("b", b)?;
//! graph.set_entry_point("a")?.add_edge("a", "b")?;
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use crate::graph::compile_error::{CompilationError, GraphBuildError};
use crate::graph::compiled::{CompiledStateGraph, StateValidatorFn};
use crate::graph::conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
use crate::graph::node::Node;
use crate::graph::node_middleware::NodeMiddleware;

/// Sentinel for graph entry: `add_edge(START, first_node_id)` sets the entry point.
pub const START: &str = "__start__";

/// Sentinel for graph exit: `add_edge(last_node_id, END)` marks a node terminal.
/// A conditional router may also return `END` to stop the run.
pub const END: &str = "__end__";

/// State graph: nodes plus explicit edges and optional conditional edges.
///
/// Generic over state type `S`. Nodes are held as `Arc<dyn Node<S>>`; the same
/// `Arc` may be registered under several names.
///
/// **Interaction**: produces `CompiledStateGraph<S>`. Middleware, step limit and
/// state validator attach fluently (`with_*`) before `compile`.
pub struct StateGraph<S> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Registration order of node names; used for stable diagnostics.
    order: Vec<String>,
    /// Unconditional edges (from_id, to_id) in insertion order.
    edges: Vec<(String, String)>,
    /// Conditional edges: source node id -> router.
    conditional_edges: HashMap<String, ConditionalRouter<S>>,
    entry_point: Option<String>,
    middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    /// Step guard; `None` means twice the node count.
    max_steps: Option<usize>,
    validator: Option<StateValidatorFn<S>>,
}

impl<S> Default for StateGraph<S>
where
    S: Send + Sync + Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: Send + Sync + Debug + 'static,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            order: Vec::new(),
            edges: Vec::new(),
            conditional_edges: HashMap::new(),
            entry_point: None,
            middleware: None,
            max_steps: None,
            validator: None,
        }
    }

    /// Attaches node middleware. Every node.run in `invoke` goes through it.
    pub fn with_middleware(self, middleware: Arc<dyn NodeMiddleware<S>>) -> Self {
        Self {
            middleware: Some(middleware),
            ..self
        }
    }

    /// Overrides the step guard: `invoke` fails with `ExecutionLimitExceeded`
    /// once more than `max_steps` nodes have run. Default is twice the node count.
    pub fn with_max_steps(self, max_steps: usize) -> Self {
        Self {
            max_steps: Some(max_steps),
            ..self
        }
    }

    /// Attaches a validator that checks the state after every node.
    ///
    /// A rejection stops the run with `AgentError::InvalidState` naming the node.
    pub fn with_validator(self, validator: StateValidatorFn<S>) -> Self {
        Self {
            validator: Some(validator),
            ..self
        }
    }

    /// Registers `node` under `id`. Fails if the name is taken.
    ///
    /// The node is stored as `Arc<dyn Node<S>>`; passing a clone of an already
    /// registered `Arc` under another name aliases the same node.
    pub fn add_node(
        &mut self,
        id: impl Into<String>,
        node: Arc<dyn Node<S>>,
    ) -> Result<&mut Self, GraphBuildError> {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            return Err(GraphBuildError::DuplicateNode(id));
        }
        self.order.push(id.clone());
        self.nodes.insert(id, node);
        Ok(self)
    }

    /// Sets the node the run starts at.
    pub fn set_entry_point(&mut self, id: impl Into<String>) -> Result<&mut Self, GraphBuildError> {
        let id = id.into();
        self.require_node(&id)?;
        self.entry_point = Some(id);
        Ok(self)
    }

    /// Adds an edge from `from_id` to `to_id`.
    ///
    /// `START` as `from_id` sets the entry point; `END` as `to_id` marks
    /// `from_id` terminal. Both real ids must already be registered.
    pub fn add_edge(
        &mut self,
        from_id: impl Into<String>,
        to_id: impl Into<String>,
    ) -> Result<&mut Self, GraphBuildError> {
        let from_id = from_id.into();
        let to_id = to_id.into();
        if from_id == START {
            return self.set_entry_point(to_id);
        }
        self.require_node(&from_id)?;
        if to_id != END {
            self.require_node(&to_id)?;
        }
        self.edges.push((from_id, to_id));
        Ok(self)
    }

    /// Adds a conditional edge from `source`: after it runs, `path(state)` names the next node.
    ///
    /// - When `path_map` is `None`, the return value of `path` is the next node id (or END).
    /// - When `path_map` is `Some(map)`, the return value is the key; next node is
    ///   `map[key]` if present, otherwise the key itself.
    ///
    /// Targets returned at run time must be registered nodes (or END); otherwise
    /// the run fails with `AgentError::UnknownNode`. Path map targets are checked
    /// by `compile`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// graph.add_conditional_edges(
    ///     "summarize",
    ///     Arc::new(|s: &State| if s.summaries.is_empty() { "retry".into() } else { "report".into() }),
    ///     None,
    /// )?;
    /// ```
    pub fn add_conditional_edges(
        &mut self,
        source: impl Into<String>,
        path: ConditionalRouterFn<S>,
        path_map: Option<HashMap<String, String>>,
    ) -> Result<&mut Self, GraphBuildError> {
        let source = source.into();
        self.require_node(&source)?;
        if self.conditional_edges.contains_key(&source) {
            return Err(GraphBuildError::DuplicateConditionalEdge(source));
        }
        self.conditional_edges
            .insert(source, ConditionalRouter::new(path, path_map));
        Ok(self)
    }

    /// Shorthand for `add_conditional_edges(source, path, None)`.
    pub fn add_conditional_edge(
        &mut self,
        source: impl Into<String>,
        path: ConditionalRouterFn<S>,
    ) -> Result<&mut Self, GraphBuildError> {
        self.add_conditional_edges(source, path, None)
    }

    fn require_node(&self, id: &str) -> Result<(), GraphBuildError> {
        if self.nodes.contains_key(id) {
            Ok(())
        } else {
            Err(GraphBuildError::UnknownNode(id.to_string()))
        }
    }

    /// Builds the executable graph.
    ///
    /// Validates that an entry point is set, that no node has two unconditional
    /// edges, that no node has both an edge and conditional edges, and that
    /// every path map target is a registered node or END. On success the graph
    /// is immutable and ready for `invoke`.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        let entry = self
            .entry_point
            .clone()
            .ok_or(CompilationError::MissingEntryPoint)?;

        let mut edge_froms = HashSet::new();
        for (from, _) in &self.edges {
            if !edge_froms.insert(from.as_str()) {
                return Err(CompilationError::MultipleEdges(from.clone()));
            }
        }

        // Iterate in registration order so the reported node is deterministic.
        for id in &self.order {
            let Some(router) = self.conditional_edges.get(id) else {
                continue;
            };
            if edge_froms.contains(id.as_str()) {
                return Err(CompilationError::NodeHasBothEdgeAndConditional(id.clone()));
            }
            if let Some(ref path_map) = router.path_map {
                let mut targets: Vec<&String> = path_map.values().collect();
                targets.sort();
                for target in targets {
                    if target != END && !self.nodes.contains_key(target) {
                        return Err(CompilationError::InvalidConditionalPathMap {
                            node: id.clone(),
                            target: target.clone(),
                        });
                    }
                }
            }
        }

        let mut next_map: HashMap<String, NextEntry<S>> = self
            .edges
            .into_iter()
            .map(|(f, t)| (f, NextEntry::Unconditional(t)))
            .collect();
        for (source, router) in self.conditional_edges {
            next_map.insert(source, NextEntry::Conditional(router));
        }

        let max_steps = self
            .max_steps
            .unwrap_or_else(|| (self.nodes.len() * 2).max(1));

        Ok(CompiledStateGraph {
            nodes: self.nodes,
            order: self.order,
            entry_point: entry,
            next_map,
            middleware: self.middleware,
            max_steps,
            validator: self.validator,
        })
    }
}
