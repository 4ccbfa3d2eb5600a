//! # searchgraph
//!
//! A small state-graph engine and the web research workflow built on it. One
//! state value (`ResearchState`) is moved through a fixed chain of nodes:
//! correct the query, search, scrape, correct the scraped text, summarize,
//! write the report.
//!
//! ## Design principles
//!
//! - **State in, state out**: every [`Node`] takes the state by value and returns it.
//! - **Fixed topology**: the graph is wired and validated by [`StateGraph::compile`];
//!   only conditional routers decide at run time.
//! - **Step guard**: [`CompiledStateGraph::invoke`] stops with
//!   [`AgentError::ExecutionLimitExceeded`] after `max_steps` node runs.
//! - **Injected capabilities**: correction, search, scraping, summarization and the
//!   report sink are trait objects passed in through [`Capabilities`].
//!
//! ## Main modules
//!
//! - [`graph`]: [`StateGraph`], [`CompiledStateGraph`], [`Node`], [`FnNode`], middleware, visualization.
//! - [`state`]: [`ResearchState`] and its write rules.
//! - [`capability`]: capability traits and the shipped implementations
//!   ([`ExaSearcher`], [`HttpPageScraper`], [`LlmCorrector`], [`LlmSummarizer`], [`FileReportSink`]).
//! - [`llm`]: [`LlmClient`] trait, [`MockLlm`], [`ChatOpenAI`].
//! - [`nodes`]: the six workflow nodes.
//! - [`workflow`]: [`build_search_graph`] and [`SearchRunner`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use searchgraph::{
//!     Capabilities, ChatOpenAI, ExaSearcher, FileReportSink, HttpPageScraper, LlmCorrector,
//!     LlmSummarizer, SearchRunner, WorkflowOptions,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = Arc::new(ChatOpenAI::from_env("gpt-4o-mini")?);
//! let caps = Capabilities {
//!     corrector: Arc::new(LlmCorrector::new(llm.clone())),
//!     searcher: Arc::new(ExaSearcher::from_env()?),
//!     scraper: Arc::new(HttpPageScraper::new(std::time::Duration::from_secs(5))?),
//!     summarizer: Arc::new(LlmSummarizer::new(llm)),
//!     report: Arc::new(FileReportSink::default()),
//! };
//! let runner = SearchRunner::new(caps, WorkflowOptions::default())?;
//! let state = runner.run("pythn programing").await?;
//! println!("{} summaries", state.summaries.len());
//! # Ok(())
//! # }
//! ```

pub mod capability;
pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod nodes;
pub mod state;
pub mod workflow;

pub use capability::{
    CapabilityError, ExaSearcher, FileReportSink, HttpPageScraper, LlmCorrector, LlmSummarizer,
    PageScraper, ReportEntry, ReportSink, TextCorrector, TextSummarizer, WebSearcher,
    NO_USEFUL_CONTENT, SCRAPE_FAILED_SENTINEL,
};
pub use error::AgentError;
pub use graph::{
    generate_dot, generate_text, CompilationError, CompiledStateGraph, ConditionalRouterFn,
    FnNode, GraphBuildError, LoggingNodeMiddleware, Node, NodeMiddleware, StateGraph,
    StateValidatorFn, END, START,
};
pub use llm::{ChatOpenAI, LlmClient, LlmResponse, LlmUsage, MockLlm};
pub use message::Message;
pub use nodes::{CorrectNode, CorrectionMode, FailurePolicy};
pub use state::{is_valid_url, ResearchState, StateError};
pub use workflow::{build_search_graph, Capabilities, SearchRunner, WorkflowError, WorkflowOptions};
