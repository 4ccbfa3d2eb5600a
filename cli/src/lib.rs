//! searchgraph CLI library: argument parsing, query resolution and capability
//! wiring for the `searchgraph` binary.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use searchgraph::capability::{DEFAULT_MAX_CHARS, DEFAULT_REPORT_PATH};
use searchgraph::{
    generate_text, AgentError, Capabilities, CapabilityError, ChatOpenAI, ExaSearcher,
    FailurePolicy, FileReportSink, HttpPageScraper, LlmClient, LlmCorrector, LlmSummarizer,
    LoggingNodeMiddleware, ResearchState, SearchRunner, WorkflowError, WorkflowOptions,
};
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
const QUERY_PROMPT: &str = "Enter your search query: ";

#[derive(Parser, Debug, Clone)]
#[command(name = "searchgraph")]
#[command(about = "searchgraph: correct a query, search the web, summarize the results")]
pub struct Args {
    /// Search query (or pass as positional words; read from stdin when absent)
    #[arg(short, long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Positional args: query words when -q/--query is not used
    #[arg(trailing_var_arg = true)]
    pub rest: Vec<String>,

    /// Chat model used for correction and summarization
    #[arg(long, env = "SEARCHGRAPH_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Maximum number of search results
    #[arg(long, env = "SEARCHGRAPH_MAX_RESULTS", default_value_t = 10)]
    pub max_results: usize,

    /// Texts shorter than this many chars are not summarized
    #[arg(long, default_value_t = 50)]
    pub min_summary_chars: usize,

    /// Report file path
    #[arg(long, env = "SEARCHGRAPH_REPORT", value_name = "PATH", default_value = DEFAULT_REPORT_PATH)]
    pub report: PathBuf,

    /// Per-page fetch timeout in seconds
    #[arg(long, default_value_t = 5)]
    pub scrape_timeout_secs: u64,

    /// Maximum chars kept per scraped page
    #[arg(long, default_value_t = DEFAULT_MAX_CHARS)]
    pub scrape_max_chars: usize,

    /// Step guard for the workflow graph (default: twice the node count)
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Fail the run when correction or summarization fails instead of degrading
    #[arg(long)]
    pub fail_fast: bool,

    /// Verbose: log node enter/exit and print the graph to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the final state as JSON instead of echoing the report
    #[arg(long)]
    pub json: bool,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("empty query")]
    EmptyQuery,
    #[error(transparent)]
    Capability(#[from] CapabilityError),
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    #[error(transparent)]
    Run(#[from] AgentError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl Args {
    /// Query from `--query` or positional words, if given on the command line.
    pub fn inline_query(&self) -> Option<String> {
        self.query
            .clone()
            .or_else(|| (!self.rest.is_empty()).then(|| self.rest.join(" ")))
    }

    pub fn workflow_options(&self) -> WorkflowOptions {
        WorkflowOptions {
            max_results: self.max_results,
            min_summary_chars: self.min_summary_chars,
            failure_policy: if self.fail_fast {
                FailurePolicy::Propagate
            } else {
                FailurePolicy::Degrade
            },
            max_steps: self.max_steps,
        }
    }
}

/// Inline query, or one line read from `input` after writing the prompt to `prompt`.
pub fn resolve_query(
    args: &Args,
    input: &mut impl BufRead,
    prompt: &mut impl Write,
) -> Result<String, CliError> {
    let raw = match args.inline_query() {
        Some(q) => q,
        None => {
            write!(prompt, "{}", QUERY_PROMPT)?;
            prompt.flush()?;
            let mut line = String::new();
            input.read_line(&mut line)?;
            line
        }
    };
    let query = raw.trim();
    if query.is_empty() {
        return Err(CliError::EmptyQuery);
    }
    Ok(query.to_string())
}

/// Real capabilities from the environment: OpenAI-compatible chat, Exa, HTTP, report file.
///
/// Fails with `MissingCredential` when `OPENAI_API_KEY` or `EXA_API_KEY` is unset.
pub fn build_capabilities(args: &Args) -> Result<Capabilities, CliError> {
    let llm: Arc<dyn LlmClient> = Arc::new(ChatOpenAI::from_env(&args.model)?.with_temperature(0.0));
    let searcher = ExaSearcher::from_env()?;
    let scraper = HttpPageScraper::new(Duration::from_secs(args.scrape_timeout_secs))?
        .with_max_chars(args.scrape_max_chars);
    let report = build_report_sink(args);
    Ok(Capabilities {
        corrector: Arc::new(LlmCorrector::new(llm.clone())),
        searcher: Arc::new(searcher),
        scraper: Arc::new(scraper),
        summarizer: Arc::new(LlmSummarizer::new(llm)),
        report: Arc::new(report),
    })
}

/// Report file at `--report`; echoes to stdout unless `--json` owns stdout.
pub fn build_report_sink(args: &Args) -> FileReportSink {
    FileReportSink::new(&args.report).with_echo(!args.json)
}

/// Builds the runner for `args`, with node logging under `--verbose`.
pub fn build_runner(args: &Args, caps: Capabilities) -> Result<SearchRunner, CliError> {
    let options = args.workflow_options();
    let runner = if args.verbose {
        let runner = SearchRunner::with_middleware(
            caps,
            options,
            Arc::new(LoggingNodeMiddleware::<ResearchState>::default()),
        )?;
        eprintln!("{}", generate_text(runner.graph()));
        runner
    } else {
        SearchRunner::new(caps, options)?
    };
    Ok(runner)
}

/// Runs the workflow once and returns the final state.
pub async fn run(args: &Args, query: &str) -> Result<ResearchState, CliError> {
    let caps = build_capabilities(args)?;
    let runner = build_runner(args, caps)?;
    tracing::info!(query = %query, model = %args.model, "searchgraph run");
    Ok(runner.run(query).await?)
}
