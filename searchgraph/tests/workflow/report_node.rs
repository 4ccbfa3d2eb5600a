//! ReportNode: entries in rank order; sink failures propagate.

use std::sync::Arc;

use searchgraph::nodes::ReportNode;
use searchgraph::{AgentError, CapabilityError, FileReportSink, Node, ResearchState};

use crate::common::MemoryReport;

fn summarized(urls: &[&str]) -> ResearchState {
    let mut s = ResearchState::new("q");
    s.set_urls(urls.iter().map(|u| u.to_string()).collect())
        .unwrap();
    for url in urls {
        s.record_scraped(*url, "t").unwrap();
        s.record_corrected(*url, "t").unwrap();
        s.record_summary(*url, format!("about {}", url)).unwrap();
    }
    s
}

/// **Scenario**: The sink receives one entry per summary in search-rank order.
#[tokio::test]
async fn writes_entries_in_rank_order() {
    let sink = Arc::new(MemoryReport::default());
    let node = ReportNode::new(sink.clone());
    node.run(summarized(&["http://z.test", "http://a.test"]))
        .await
        .unwrap();

    let entries = sink.last().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].url, "http://z.test");
    assert_eq!(entries[0].summary, "about http://z.test");
    assert_eq!(entries[1].url, "http://a.test");
}

/// **Scenario**: A failing sink fails the node with the capability error.
#[tokio::test]
async fn sink_failure_propagates() {
    let node = ReportNode::new(Arc::new(MemoryReport::failing()));
    let err = node.run(summarized(&["http://a.test"])).await.unwrap_err();
    assert!(matches!(err, AgentError::Capability(CapabilityError::Io(_))));
}

/// **Scenario**: FileReportSink writes the header and one block per entry.
#[tokio::test]
async fn file_sink_writes_report_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("search_results.txt");
    let node = ReportNode::new(Arc::new(FileReportSink::new(&path)));
    node.run(summarized(&["http://a.test"])).await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "=== Final Report ===\n\nURL: http://a.test\nSummary: about http://a.test\n"
    );
}
