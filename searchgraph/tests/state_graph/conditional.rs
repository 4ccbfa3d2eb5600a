//! Conditional edges: routers are evaluated on every visit against the current state.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use searchgraph::{AgentError, ConditionalRouterFn, StateGraph, END};

use crate::common::{trace, TraceState};

/// Graph `start ?-> {left, right}`; both branches are terminal.
fn branching(router: ConditionalRouterFn<TraceState>) -> StateGraph<TraceState> {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("start", trace("start"))
        .unwrap()
        .add_node("left", trace("left"))
        .unwrap()
        .add_node("right", trace("right"))
        .unwrap();
    graph.set_entry_point("start").unwrap();
    graph.add_conditional_edge("start", router).unwrap();
    graph
}

/// **Scenario**: The router's answer depends on state content.
#[tokio::test]
async fn router_reads_state() {
    let router: ConditionalRouterFn<TraceState> = Arc::new(|s: &TraceState| {
        if s.visited.len() > 1 {
            "left".to_string()
        } else {
            "right".to_string()
        }
    });
    let compiled = branching(router).compile().unwrap();

    let state = compiled.invoke(TraceState::default()).await.unwrap();
    assert_eq!(state.visited, vec!["start", "right"]);

    let seeded = TraceState {
        visited: vec!["seed".into()],
    };
    let state = compiled.invoke(seeded).await.unwrap();
    assert_eq!(state.visited, vec!["seed", "start", "left"]);
}

/// **Scenario**: The router is called once per visit, never cached across runs.
#[tokio::test]
async fn router_is_called_on_every_visit() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let router: ConditionalRouterFn<TraceState> = Arc::new(move |_: &TraceState| {
        counter.fetch_add(1, Ordering::SeqCst);
        "left".to_string()
    });
    let compiled = branching(router).compile().unwrap();
    for _ in 0..3 {
        compiled.invoke(TraceState::default()).await.unwrap();
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

/// **Scenario**: A path_map translates routing keys; END ends the run.
#[tokio::test]
async fn path_map_translates_keys() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("start", trace("start"))
        .unwrap()
        .add_node("report", trace("report"))
        .unwrap();
    graph.set_entry_point("start").unwrap();
    let map = HashMap::from([
        ("go".to_string(), "report".to_string()),
        ("stop".to_string(), END.to_string()),
    ]);
    let router: ConditionalRouterFn<TraceState> = Arc::new(|_: &TraceState| "go".to_string());
    graph
        .add_conditional_edges("start", router, Some(map))
        .unwrap();

    let state = graph
        .compile()
        .unwrap()
        .invoke(TraceState::default())
        .await
        .unwrap();
    assert_eq!(state.visited, vec!["start", "report"]);
}

/// **Scenario**: A router naming an unregistered node fails the run with UnknownNode.
#[tokio::test]
async fn router_to_unknown_node_fails() {
    let router: ConditionalRouterFn<TraceState> =
        Arc::new(|_: &TraceState| "nowhere".to_string());
    let err = branching(router)
        .compile()
        .unwrap()
        .invoke(TraceState::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::UnknownNode(n) if n == "nowhere"));
}
