//! SummarizeNode: short-circuit on short or failed content, failure policy.

use std::sync::Arc;

use searchgraph::nodes::SummarizeNode;
use searchgraph::{
    AgentError, FailurePolicy, Node, ResearchState, NO_USEFUL_CONTENT, SCRAPE_FAILED_SENTINEL,
};

use crate::common::{long_text, CountingSummarizer};

fn with_corrected(pages: &[(&str, &str)]) -> ResearchState {
    let mut s = ResearchState::new("q");
    s.set_urls(pages.iter().map(|(u, _)| u.to_string()).collect())
        .unwrap();
    for (url, text) in pages {
        s.record_scraped(*url, *text).unwrap();
        s.record_corrected(*url, *text).unwrap();
    }
    s
}

/// **Scenario**: Content of 10 chars gets NO_USEFUL_CONTENT without a summarizer call.
#[tokio::test]
async fn short_content_short_circuits() {
    let summarizer = Arc::new(CountingSummarizer::replying("never"));
    let node = SummarizeNode::new(summarizer.clone());

    let out = node
        .run(with_corrected(&[("http://a.test", "0123456789")]))
        .await
        .unwrap();
    assert_eq!(out.summaries["http://a.test"], NO_USEFUL_CONTENT);
    assert_eq!(summarizer.calls(), 0);
}

/// **Scenario**: The failure marker short-circuits regardless of case or length.
#[tokio::test]
async fn failure_marker_short_circuits() {
    let summarizer = Arc::new(CountingSummarizer::replying("never"));
    let node = SummarizeNode::new(summarizer.clone());
    let text = long_text(&SCRAPE_FAILED_SENTINEL.to_uppercase());
    assert!(node.is_unusable(&text));

    let out = node
        .run(with_corrected(&[("http://a.test", text.as_str())]))
        .await
        .unwrap();
    assert_eq!(out.summaries["http://a.test"], NO_USEFUL_CONTENT);
    assert_eq!(summarizer.calls(), 0);
}

/// **Scenario**: Long content is summarized; the threshold is configurable.
#[tokio::test]
async fn long_content_is_summarized() {
    let summarizer = Arc::new(CountingSummarizer::replying("summary"));
    let text = long_text("Rust is a systems language.");
    let out = SummarizeNode::new(summarizer.clone())
        .run(with_corrected(&[("http://a.test", text.as_str())]))
        .await
        .unwrap();
    assert_eq!(out.summaries["http://a.test"], "summary");

    let strict = SummarizeNode::new(summarizer.clone()).with_min_chars(10_000);
    let out = strict
        .run(with_corrected(&[("http://a.test", text.as_str())]))
        .await
        .unwrap();
    assert_eq!(out.summaries["http://a.test"], NO_USEFUL_CONTENT);
    assert_eq!(summarizer.calls(), 1);
}

/// **Scenario**: Degrade records NO_USEFUL_CONTENT; Propagate fails the node.
#[tokio::test]
async fn summarizer_failure_follows_policy() {
    let text = long_text("Some page.");
    let degraded = SummarizeNode::new(Arc::new(CountingSummarizer::failing()))
        .run(with_corrected(&[("http://a.test", text.as_str())]))
        .await
        .unwrap();
    assert_eq!(degraded.summaries["http://a.test"], NO_USEFUL_CONTENT);

    let err = SummarizeNode::new(Arc::new(CountingSummarizer::failing()))
        .with_policy(FailurePolicy::Propagate)
        .run(with_corrected(&[("http://a.test", text.as_str())]))
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::Capability(_)));
}
