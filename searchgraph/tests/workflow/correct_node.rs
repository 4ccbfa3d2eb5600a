//! CorrectNode: explicit modes, Auto dispatch by state shape, failure policy.

use std::sync::Arc;

use searchgraph::{
    AgentError, CorrectNode, CorrectionMode, FailurePolicy, FnNode, Node, ResearchState,
    StateGraph,
};

use crate::common::ScriptedCorrector;

fn scraped_state() -> ResearchState {
    let mut s = ResearchState::new("pythn");
    s.set_corrected_query("python").unwrap();
    s.set_urls(vec!["http://a.test".into(), "http://b.test".into()])
        .unwrap();
    s.record_scraped("http://a.test", "teh text").unwrap();
    s.record_scraped("http://b.test", "other").unwrap();
    s
}

/// **Scenario**: Auto with corrected_query unset corrects the query and leaves content alone.
#[tokio::test]
async fn auto_without_corrected_query_corrects_query() {
    let corrector = Arc::new(ScriptedCorrector::identity().with_rewrite("pythn", "python"));
    let node = CorrectNode::new(corrector, CorrectionMode::Auto);
    let state = ResearchState::new("pythn");
    assert_eq!(node.resolve_mode(&state), CorrectionMode::Query);

    let out = node.run(state).await.unwrap();
    assert_eq!(out.corrected_query.as_deref(), Some("python"));
    assert!(out.corrected_content.is_empty());
}

/// **Scenario**: Auto with corrected_query set fills corrected_content, one key per scraped key.
#[tokio::test]
async fn auto_with_corrected_query_corrects_content() {
    let corrector = Arc::new(ScriptedCorrector::identity().with_rewrite("teh text", "the text"));
    let node = CorrectNode::new(corrector, CorrectionMode::Auto);
    let state = scraped_state();
    assert_eq!(node.resolve_mode(&state), CorrectionMode::Content);

    let out = node.run(state).await.unwrap();
    assert_eq!(out.corrected_query.as_deref(), Some("python"));
    let keys: Vec<&String> = out.corrected_content.keys().collect();
    let scraped: Vec<&String> = out.scraped_content.keys().collect();
    assert_eq!(keys, scraped);
    assert_eq!(out.corrected_content["http://a.test"], "the text");
}

/// **Scenario**: One Auto node registered under two names plays both roles.
#[tokio::test]
async fn aliased_auto_node_serves_both_positions() {
    let corrector = Arc::new(ScriptedCorrector::identity().with_rewrite("q", "Q"));
    let shared: Arc<dyn Node<ResearchState>> =
        Arc::new(CorrectNode::new(corrector.clone(), CorrectionMode::Auto));
    let fill = FnNode::new(
        "fill",
        |mut s: ResearchState| -> Result<ResearchState, AgentError> {
            s.set_urls(vec!["http://a.test".into()]).unwrap();
            s.record_scraped("http://a.test", "page").unwrap();
            Ok(s)
        },
    );
    let mut graph = StateGraph::<ResearchState>::new();
    graph
        .add_node("query", shared.clone())
        .unwrap()
        .add_node("fill", Arc::new(fill))
        .unwrap()
        .add_node("content", shared)
        .unwrap();
    graph
        .set_entry_point("query")
        .unwrap()
        .add_edge("query", "fill")
        .unwrap()
        .add_edge("fill", "content")
        .unwrap();

    let out = graph
        .compile()
        .unwrap()
        .invoke(ResearchState::new("q"))
        .await
        .unwrap();
    assert_eq!(out.corrected_query.as_deref(), Some("Q"));
    assert_eq!(out.corrected_content["http://a.test"], "page");
    assert_eq!(corrector.calls(), 2);
}

/// **Scenario**: Content mode never touches corrected_query, even when unset.
#[tokio::test]
async fn content_mode_ignores_query() {
    let node = CorrectNode::new(Arc::new(ScriptedCorrector::identity()), CorrectionMode::Content);
    let mut state = ResearchState::new("q");
    state.set_urls(vec!["http://a.test".into()]).unwrap();
    state.record_scraped("http://a.test", "x").unwrap();

    let out = node.run(state).await.unwrap();
    assert!(out.corrected_query.is_none());
    assert_eq!(out.corrected_content.len(), 1);
    assert_eq!(node.id(), "CorrectorContent");
}

/// **Scenario**: Query mode on an already corrected state is a state error, not an overwrite.
#[tokio::test]
async fn query_mode_twice_is_invalid_state() {
    let node = CorrectNode::new(Arc::new(ScriptedCorrector::identity()), CorrectionMode::Query);
    let state = node.run(ResearchState::new("q")).await.unwrap();
    let err = node.run(state).await.unwrap_err();
    assert!(matches!(err, AgentError::InvalidState { node, .. } if node == "Corrector"));
}

/// **Scenario**: Degrade keeps the original query; content failures omit the url.
#[tokio::test]
async fn degrade_policy_falls_back() {
    let corrector = Arc::new(ScriptedCorrector::failing());
    let query_node = CorrectNode::new(corrector.clone(), CorrectionMode::Query);
    let out = query_node.run(ResearchState::new("raw")).await.unwrap();
    assert_eq!(out.corrected_query.as_deref(), Some("raw"));

    let content_node = CorrectNode::new(corrector, CorrectionMode::Content);
    let out = content_node.run(scraped_state()).await.unwrap();
    assert!(out.corrected_content.is_empty());
    assert_eq!(out.scraped_content.len(), 2);
}

/// **Scenario**: Propagate turns a corrector failure into AgentError::Capability.
#[tokio::test]
async fn propagate_policy_fails_node() {
    let node = CorrectNode::new(Arc::new(ScriptedCorrector::failing()), CorrectionMode::Query)
        .with_policy(FailurePolicy::Propagate);
    let err = node.run(ResearchState::new("raw")).await.unwrap_err();
    assert!(matches!(err, AgentError::Capability(_)));
}
