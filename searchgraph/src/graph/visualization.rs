//! Graph visualization utilities.
//!
//! Renders a compiled graph as Graphviz DOT or as plain text for `--verbose`
//! output and debugging.

use std::fmt::Write;

use super::{CompiledStateGraph, NextEntry, END};

fn describe_next<S>(graph: &CompiledStateGraph<S>, id: &str) -> String {
    match graph.next_map.get(id) {
        None => "(terminal)".to_string(),
        Some(NextEntry::Unconditional(to)) if to == END => "(terminal)".to_string(),
        Some(NextEntry::Unconditional(to)) => to.clone(),
        Some(NextEntry::Conditional(router)) => match &router.path_map {
            Some(map) => {
                let mut targets: Vec<&str> = map.values().map(String::as_str).collect();
                targets.sort_unstable();
                targets.dedup();
                format!("?{{{}}}", targets.join(", "))
            }
            None => "?(router)".to_string(),
        },
    }
}

/// Generate Graphviz DOT format representation of the graph.
///
/// Unconditional edges are solid; conditional edges are dashed and only drawn
/// when a path map lists their targets.
pub fn generate_dot<S>(graph: &CompiledStateGraph<S>) -> String {
    let mut dot = String::from("digraph {\n  rankdir=LR;\n  node [shape=box];\n\n");
    let _ = writeln!(dot, "  \"{}\" [style=bold];", graph.entry_point);
    for id in &graph.order {
        match graph.next_map.get(id) {
            Some(NextEntry::Unconditional(to)) if to != END => {
                let _ = writeln!(dot, "  \"{}\" -> \"{}\";", id, to);
            }
            Some(NextEntry::Conditional(router)) => {
                if let Some(map) = &router.path_map {
                    let mut targets: Vec<&String> = map.values().collect();
                    targets.sort();
                    targets.dedup();
                    for to in targets {
                        let _ = writeln!(dot, "  \"{}\" -> \"{}\" [style=dashed];", id, to);
                    }
                } else {
                    let _ = writeln!(dot, "  \"{}\" [peripheries=2];", id);
                }
            }
            _ => {
                let _ = writeln!(dot, "  \"{}\";", id);
            }
        }
    }
    dot.push_str("}\n");
    dot
}

/// Generate a simple text representation of the graph structure.
pub fn generate_text<S>(graph: &CompiledStateGraph<S>) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "Graph Structure:");
    let _ = writeln!(text, "Nodes: {}", graph.order.len());
    let _ = writeln!(text, "Entry: {}", graph.entry_point);
    let _ = writeln!(text, "Max steps: {}", graph.max_steps);
    let _ = writeln!(text, "\nEdges:");
    for id in &graph.order {
        let _ = writeln!(text, "  {} -> {}", id, describe_next(graph, id));
    }
    text
}
