//! The search workflow: builds the fixed six-node graph and runs it.
//!
//! ```text
//! Corrector -> WebSearch -> WebScraper -> CorrectorContent -> Summarizer ?-> FinalReport
//! ```
//!
//! `Summarizer` reaches `FinalReport` through a conditional router, evaluated on
//! every visit. Capabilities are injected through [`Capabilities`].

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::capability::{PageScraper, ReportSink, TextCorrector, TextSummarizer, WebSearcher};
use crate::error::AgentError;
use crate::graph::{
    CompilationError, CompiledStateGraph, ConditionalRouterFn, GraphBuildError, NodeMiddleware,
    StateGraph, StateValidatorFn, END,
};
use crate::nodes::{
    CorrectNode, CorrectionMode, FailurePolicy, ReportNode, ScrapeNode, SearchNode,
    SummarizeNode, CORRECTOR, CORRECTOR_CONTENT, DEFAULT_MAX_RESULTS, DEFAULT_MIN_SUMMARY_CHARS,
    FINAL_REPORT, SUMMARIZER, WEB_SCRAPER, WEB_SEARCH,
};
use crate::state::ResearchState;

/// Error building the workflow graph.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("graph build failed: {0}")]
    Build(#[from] GraphBuildError),
    #[error("graph compilation failed: {0}")]
    Compile(#[from] CompilationError),
}

/// External collaborators used by the workflow nodes.
#[derive(Clone)]
pub struct Capabilities {
    pub corrector: Arc<dyn TextCorrector>,
    pub searcher: Arc<dyn WebSearcher>,
    pub scraper: Arc<dyn PageScraper>,
    pub summarizer: Arc<dyn TextSummarizer>,
    pub report: Arc<dyn ReportSink>,
}

/// Tunables for [`build_search_graph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowOptions {
    pub max_results: usize,
    pub min_summary_chars: usize,
    pub failure_policy: FailurePolicy,
    /// Step guard override; `None` keeps the graph default.
    pub max_steps: Option<usize>,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            min_summary_chars: DEFAULT_MIN_SUMMARY_CHARS,
            failure_policy: FailurePolicy::Degrade,
            max_steps: None,
        }
    }
}

fn wire(
    caps: Capabilities,
    options: &WorkflowOptions,
    graph: &mut StateGraph<ResearchState>,
) -> Result<(), GraphBuildError> {
    let policy = options.failure_policy;
    graph
        .add_node(
            CORRECTOR,
            Arc::new(
                CorrectNode::new(caps.corrector.clone(), CorrectionMode::Query).with_policy(policy),
            ),
        )?
        .add_node(
            WEB_SEARCH,
            Arc::new(SearchNode::new(caps.searcher, options.max_results)),
        )?
        .add_node(WEB_SCRAPER, Arc::new(ScrapeNode::new(caps.scraper)))?
        .add_node(
            CORRECTOR_CONTENT,
            Arc::new(
                CorrectNode::new(caps.corrector, CorrectionMode::Content).with_policy(policy),
            ),
        )?
        .add_node(
            SUMMARIZER,
            Arc::new(
                SummarizeNode::new(caps.summarizer)
                    .with_min_chars(options.min_summary_chars)
                    .with_policy(policy),
            ),
        )?
        .add_node(FINAL_REPORT, Arc::new(ReportNode::new(caps.report)))?;

    let to_report: ConditionalRouterFn<ResearchState> =
        Arc::new(|_: &ResearchState| FINAL_REPORT.to_string());
    graph
        .set_entry_point(CORRECTOR)?
        .add_edge(CORRECTOR, WEB_SEARCH)?
        .add_edge(WEB_SEARCH, WEB_SCRAPER)?
        .add_edge(WEB_SCRAPER, CORRECTOR_CONTENT)?
        .add_edge(CORRECTOR_CONTENT, SUMMARIZER)?
        .add_conditional_edge(SUMMARIZER, to_report)?
        .add_edge(FINAL_REPORT, END)?;
    Ok(())
}

fn graph_for(
    options: &WorkflowOptions,
    middleware: Option<Arc<dyn NodeMiddleware<ResearchState>>>,
) -> StateGraph<ResearchState> {
    let validator: StateValidatorFn<ResearchState> =
        Arc::new(|s: &ResearchState| s.validate().map_err(|e| e.to_string()));
    let mut graph = StateGraph::new().with_validator(validator);
    if let Some(m) = middleware {
        graph = graph.with_middleware(m);
    }
    if let Some(n) = options.max_steps {
        graph = graph.with_max_steps(n);
    }
    graph
}

/// Builds and compiles the search workflow graph.
pub fn build_search_graph(
    caps: Capabilities,
    options: &WorkflowOptions,
) -> Result<CompiledStateGraph<ResearchState>, WorkflowError> {
    build_with_middleware(caps, options, None)
}

fn build_with_middleware(
    caps: Capabilities,
    options: &WorkflowOptions,
    middleware: Option<Arc<dyn NodeMiddleware<ResearchState>>>,
) -> Result<CompiledStateGraph<ResearchState>, WorkflowError> {
    let mut graph = graph_for(options, middleware);
    wire(caps, options, &mut graph)?;
    Ok(graph.compile()?)
}

/// Runs the compiled search workflow for one query at a time.
pub struct SearchRunner {
    compiled: CompiledStateGraph<ResearchState>,
}

impl SearchRunner {
    pub fn new(caps: Capabilities, options: WorkflowOptions) -> Result<Self, WorkflowError> {
        Ok(Self {
            compiled: build_search_graph(caps, &options)?,
        })
    }

    /// Like [`SearchRunner::new`], with every node wrapped by `middleware`.
    pub fn with_middleware(
        caps: Capabilities,
        options: WorkflowOptions,
        middleware: Arc<dyn NodeMiddleware<ResearchState>>,
    ) -> Result<Self, WorkflowError> {
        Ok(Self {
            compiled: build_with_middleware(caps, &options, Some(middleware))?,
        })
    }

    pub fn graph(&self) -> &CompiledStateGraph<ResearchState> {
        &self.compiled
    }

    /// Runs the workflow on a fresh state for `query` and returns the final state.
    pub async fn run(&self, query: impl Into<String>) -> Result<ResearchState, AgentError> {
        let state = ResearchState::new(query);
        info!(query = %state.query, "search workflow start");
        self.compiled.invoke(state).await
    }
}
