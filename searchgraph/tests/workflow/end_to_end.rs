//! Full workflow runs through SearchRunner with in-memory capabilities.

use std::sync::Arc;

use searchgraph::{
    build_search_graph, generate_text, AgentError, FailurePolicy, ResearchState, SearchRunner,
    WorkflowOptions, NO_USEFUL_CONTENT, SCRAPE_FAILED_SENTINEL,
};

use crate::common::{
    long_text, CountingSummarizer, Doubles, FixedSearcher, MapScraper, MemoryReport,
    ScriptedCorrector,
};

fn doubles(searcher: FixedSearcher, scraper: MapScraper, summarizer: CountingSummarizer) -> Doubles {
    Doubles {
        corrector: Arc::new(
            ScriptedCorrector::identity().with_rewrite("pythn programing", "python programming"),
        ),
        searcher: Arc::new(searcher),
        scraper: Arc::new(scraper),
        summarizer: Arc::new(summarizer),
        report: Arc::new(MemoryReport::default()),
    }
}

fn assert_key_chain(state: &ResearchState) {
    assert!(state.validate().is_ok(), "{:?}", state.validate());
    for key in state.summaries.keys() {
        assert!(state.corrected_content.contains_key(key));
    }
    for key in state.corrected_content.keys() {
        assert!(state.scraped_content.contains_key(key));
    }
}

/// **Scenario**: The reference run yields exactly one report entry with the summary.
#[tokio::test]
async fn python_programming_scenario() {
    let page = long_text("Python is great.");
    let d = doubles(
        FixedSearcher::returning(&["http://ex.test/1"]),
        MapScraper::default().with_page("http://ex.test/1", &page),
        CountingSummarizer::replying("Python is a popular programming language."),
    );
    let runner = SearchRunner::new(d.capabilities(), WorkflowOptions::default()).unwrap();
    let state = runner.run("pythn programing").await.unwrap();

    assert_eq!(state.corrected_query.as_deref(), Some("python programming"));
    assert_eq!(
        d.searcher.queries.lock().unwrap()[0].0,
        "python programming"
    );
    assert_eq!(state.corrected_content["http://ex.test/1"], page);
    let entries = d.report.last().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].url, "http://ex.test/1");
    assert_eq!(entries[0].summary, "Python is a popular programming language.");
    // query, urls, then one scraped, corrected and summary entry
    assert_eq!(state.version(), 5);
    assert_key_chain(&state);
}

/// **Scenario**: A search failure still reaches the report node with an empty report.
#[tokio::test]
async fn search_failure_reaches_terminal_node() {
    let d = doubles(
        FixedSearcher::failing(),
        MapScraper::default(),
        CountingSummarizer::replying("unused"),
    );
    let runner = SearchRunner::new(d.capabilities(), WorkflowOptions::default()).unwrap();
    let state = runner.run("anything").await.unwrap();

    assert!(state.urls.is_empty());
    assert!(state.scraped_content.is_empty() && state.summaries.is_empty());
    assert_eq!(d.report.last(), Some(vec![]));
    assert_eq!(d.summarizer.calls(), 0);
}

/// **Scenario**: Mixed valid, invalid and failing urls keep the key chain intact.
#[tokio::test]
async fn mixed_urls_keep_key_subsets() {
    let d = doubles(
        FixedSearcher::returning(&["http://a.test", "not-a-url", "http://down.test"]),
        MapScraper::default().with_page("http://a.test", &long_text("Alpha.")),
        CountingSummarizer::replying("alpha summary"),
    );
    let runner = SearchRunner::new(d.capabilities(), WorkflowOptions::default()).unwrap();
    let state = runner.run("q").await.unwrap();

    assert_eq!(state.urls.len(), 3);
    assert_eq!(state.scraped_content.len(), 2);
    assert_eq!(state.scraped_content["http://down.test"], SCRAPE_FAILED_SENTINEL);
    assert_eq!(state.summaries["http://a.test"], "alpha summary");
    assert_eq!(state.summaries["http://down.test"], NO_USEFUL_CONTENT);
    assert_eq!(d.summarizer.calls(), 1);
    assert_key_chain(&state);

    let urls: Vec<String> = d.report.last().unwrap().into_iter().map(|e| e.url).collect();
    assert_eq!(urls, vec!["http://a.test", "http://down.test"]);
}

/// **Scenario**: With fail-fast, a summarizer outage aborts the run before the report.
#[tokio::test]
async fn propagate_policy_aborts_run() {
    let d = doubles(
        FixedSearcher::returning(&["http://a.test"]),
        MapScraper::default().with_page("http://a.test", &long_text("Alpha.")),
        CountingSummarizer::failing(),
    );
    let options = WorkflowOptions {
        failure_policy: FailurePolicy::Propagate,
        ..WorkflowOptions::default()
    };
    let runner = SearchRunner::new(d.capabilities(), options).unwrap();
    let err = runner.run("q").await.unwrap_err();
    assert!(matches!(err, AgentError::Capability(_)));
    assert!(d.report.last().is_none());
}

/// **Scenario**: A report sink failure is returned to the caller.
#[tokio::test]
async fn report_failure_fails_run() {
    let mut d = doubles(
        FixedSearcher::returning(&[]),
        MapScraper::default(),
        CountingSummarizer::replying("x"),
    );
    d.report = Arc::new(MemoryReport::failing());
    let runner = SearchRunner::new(d.capabilities(), WorkflowOptions::default()).unwrap();
    assert!(matches!(
        runner.run("q").await,
        Err(AgentError::Capability(_))
    ));
}

/// **Scenario**: The compiled workflow has six nodes wired in pipeline order.
#[test]
fn workflow_topology() {
    let d = doubles(
        FixedSearcher::returning(&[]),
        MapScraper::default(),
        CountingSummarizer::replying("x"),
    );
    let compiled = build_search_graph(d.capabilities(), &WorkflowOptions::default()).unwrap();
    assert_eq!(compiled.entry_point(), "Corrector");
    assert_eq!(
        compiled.node_ids(),
        &[
            "Corrector",
            "WebSearch",
            "WebScraper",
            "CorrectorContent",
            "Summarizer",
            "FinalReport"
        ]
    );
    assert_eq!(compiled.max_steps(), 12);
    let text = generate_text(&compiled);
    assert!(text.contains("Corrector -> WebSearch"), "{}", text);
    assert!(text.contains("Summarizer -> ?(router)"), "{}", text);
    assert!(text.contains("FinalReport -> (terminal)"), "{}", text);
}

/// **Scenario**: A step limit below the pipeline length stops the run.
#[tokio::test]
async fn tight_step_limit_stops_workflow() {
    let d = doubles(
        FixedSearcher::returning(&[]),
        MapScraper::default(),
        CountingSummarizer::replying("x"),
    );
    let options = WorkflowOptions {
        max_steps: Some(3),
        ..WorkflowOptions::default()
    };
    let runner = SearchRunner::new(d.capabilities(), options).unwrap();
    match runner.run("q").await {
        Err(AgentError::ExecutionLimitExceeded { limit, node }) => {
            assert_eq!(limit, 3);
            assert_eq!(node, "CorrectorContent");
        }
        _ => panic!("expected ExecutionLimitExceeded"),
    }
}
