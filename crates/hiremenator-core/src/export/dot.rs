// ABOUTME: Exports the agent registry as a Graphviz digraph of delegation edges.
// ABOUTME: Nodes are shaped by agent kind; the search leaf is a single shared node.

use std::fmt::Write;

use crate::agent::{AgentKind, SEARCH_TOOL_NAME, ToolRef};
use crate::registry::AgentRegistry;

/// Export the delegation tree as DOT.
///
/// Every registered agent becomes a node labelled with its name and output
/// key. The search tool appears once no matter how many agents call it.
pub fn export_dot(registry: &AgentRegistry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph hiremenator {{");
    let _ = writeln!(out, "rankdir=LR");
    let _ = writeln!(out, "node [fontname=\"Helvetica\"]");
    let _ = writeln!(out);

    for spec in registry.iter() {
        let _ = writeln!(
            out,
            "{} [shape={}, label=\"{}\\n{}\"]",
            node_id(&spec.name),
            shape_for(spec.kind),
            escape_dot_string(&spec.name),
            escape_dot_string(&spec.output_key)
        );
    }

    let edges = registry.edges();
    if edges.iter().any(|e| e.child == ToolRef::Search) {
        let _ = writeln!(
            out,
            "{} [shape=cylinder, label=\"{}\"]",
            node_id(SEARCH_TOOL_NAME),
            SEARCH_TOOL_NAME
        );
    }

    let _ = writeln!(out);
    for edge in &edges {
        let style = match edge.child {
            ToolRef::Agent(_) => "",
            ToolRef::Search => " [style=dashed]",
        };
        let _ = writeln!(
            out,
            "{} -> {}{}",
            node_id(&edge.parent),
            node_id(edge.child.name()),
            style
        );
    }

    out.push_str("}\n");
    out
}

fn shape_for(kind: AgentKind) -> &'static str {
    match kind {
        AgentKind::Root => "doubleoctagon",
        AgentKind::Domain => "box",
        AgentKind::Tool => "ellipse",
    }
}

/// Agent names are snake_case identifiers, but quote anyway so any name is valid DOT.
fn node_id(name: &str) -> String {
    format!("\"{}\"", escape_dot_string(name))
}

fn escape_dot_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}
