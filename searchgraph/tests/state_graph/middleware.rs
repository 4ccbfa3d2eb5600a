//! Middleware wraps every node run; validators reject bad states.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use searchgraph::graph::NodeCall;
use searchgraph::{AgentError, LoggingNodeMiddleware, NodeMiddleware, StateValidatorFn};

use crate::common::{linear_abc, TraceState};

/// Middleware that records node ids and tags the state after each run.
struct RecordingMiddleware {
    seen: Mutex<Vec<String>>,
}

#[async_trait]
impl NodeMiddleware<TraceState> for RecordingMiddleware {
    async fn around_run(
        &self,
        node_id: &str,
        state: TraceState,
        inner: NodeCall<TraceState>,
    ) -> Result<TraceState, AgentError> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(node_id.to_string());
        }
        let mut out = inner(state).await?;
        out.visited.push(format!("after:{}", node_id));
        Ok(out)
    }
}

/// **Scenario**: with_middleware wraps each node run with the registration name.
#[tokio::test]
async fn middleware_wraps_each_node() {
    let mw = Arc::new(RecordingMiddleware {
        seen: Mutex::new(Vec::new()),
    });
    let compiled = linear_abc().with_middleware(mw.clone()).compile().unwrap();
    let state = compiled.invoke(TraceState::default()).await.unwrap();

    assert_eq!(*mw.seen.lock().unwrap(), vec!["a", "b", "c"]);
    assert_eq!(
        state.visited,
        vec!["a", "after:a", "b", "after:b", "c", "after:c"]
    );
}

/// **Scenario**: LoggingNodeMiddleware passes state through unchanged.
#[tokio::test]
async fn logging_middleware_is_transparent() {
    let compiled = linear_abc()
        .with_middleware(Arc::new(LoggingNodeMiddleware::<TraceState>::default()))
        .compile()
        .unwrap();
    let state = compiled.invoke(TraceState::default()).await.unwrap();
    assert_eq!(state.visited, vec!["a", "b", "c"]);
}

/// **Scenario**: A validator rejection stops the run with InvalidState naming the node.
#[tokio::test]
async fn validator_rejects_state() {
    let validator: StateValidatorFn<TraceState> = Arc::new(|s: &TraceState| {
        if s.visited.iter().any(|v| v == "b") {
            Err("b is not allowed".to_string())
        } else {
            Ok(())
        }
    });
    let compiled = linear_abc().with_validator(validator).compile().unwrap();
    match compiled.invoke(TraceState::default()).await {
        Err(AgentError::InvalidState { node, reason }) => {
            assert_eq!(node, "b");
            assert_eq!(reason, "b is not allowed");
        }
        _ => panic!("expected InvalidState"),
    }
}
