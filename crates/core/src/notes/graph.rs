//! Graphviz DOT and Markdown table rendering for note payloads.

use rk_protocol::notes_models::{CorpusEntity, Entity, MindMap, WordGraph};
use std::fmt::Write;

/// Directed left-to-right graph with labeled edges.
pub fn mind_map_to_dot(map: &MindMap) -> String {
    let mut dot = String::from("digraph G {\nrankdir=LR;\n");
    for node in &map.nodes {
        let label = if node.label.is_empty() {
            &node.id
        } else {
            &node.label
        };
        let _ = writeln!(dot, "  \"{}\" [label=\"{}\"];", escape(&node.id), escape(label));
    }
    for edge in &map.edges {
        let _ = writeln!(
            dot,
            "  \"{}\" -> \"{}\" [label=\"{}\"];",
            escape(&edge.source),
            escape(&edge.target),
            escape(&edge.relation)
        );
    }
    dot.push('}');
    dot
}

/// Undirected term graph. Font size grows with term frequency and pen
/// width with edge weight.
pub fn word_graph_to_dot(graph: &WordGraph) -> String {
    let mut dot = String::from("graph G {\n");
    for node in &graph.nodes {
        let label = if node.label.is_empty() {
            &node.id
        } else {
            &node.label
        };
        let _ = writeln!(
            dot,
            "  \"{}\" [label=\"{}\", fontsize={}];",
            escape(&node.id),
            escape(label),
            node.frequency.saturating_mul(2).saturating_add(10)
        );
    }
    for edge in &graph.edges {
        let _ = writeln!(
            dot,
            "  \"{}\" -- \"{}\" [label=\"{}\", penwidth={}];",
            escape(&edge.source),
            escape(&edge.target),
            escape(&edge.note),
            edge.weight.saturating_add(1)
        );
    }
    dot.push('}');
    dot
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn cell(value: &str) -> String {
    value.replace('|', "/")
}

pub fn entity_table(entities: &[Entity]) -> String {
    let mut table = String::from(
        "| id | name | type | description | source_snippet |\n|---|------|------|-------------|----------------|\n",
    );
    for entity in entities {
        let _ = writeln!(
            table,
            "| {} | {} | {} | {} | {} |",
            cell(&entity.id.to_string()),
            entity.name,
            entity.kind,
            cell(&entity.description),
            cell(&entity.source_snippet)
        );
    }
    table
}

pub fn corpus_entity_table(entities: &[CorpusEntity]) -> String {
    let mut table = String::from(
        "| id | name | type | description | source_files | context_snippet |\n|---|------|------|-------------|--------------|-----------------|\n",
    );
    for entity in entities {
        let _ = writeln!(
            table,
            "| {} | {} | {} | {} | {} | {} |",
            cell(&entity.id.to_string()),
            entity.name,
            entity.kind,
            cell(&entity.description),
            entity.source_files.join(", "),
            cell(&entity.context_snippet)
        );
    }
    table
}
