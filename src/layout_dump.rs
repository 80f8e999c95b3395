use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::config::RenderConfig;
use crate::ir::{FlatGraph, Position};
use crate::theme::Theme;

/// Machine-readable mirror of the positioned graph, the surface a rendering
/// collaborator consumes instead of the SVG.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
    pub agents: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub x: f32,
    pub y: f32,
    /// False when the node was unreachable from any root and sits at the
    /// fallback position.
    pub placed: bool,
    pub agent: String,
    pub color: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl LayoutDump {
    pub fn from_graph(
        graph: &FlatGraph,
        positions: &BTreeMap<String, Position>,
        theme: &Theme,
        config: &RenderConfig,
    ) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .map(|node| {
                let position = positions.get(&node.path);
                let (x, y) = match position {
                    Some(p) => (p.x, p.y),
                    None => (config.fallback_x, config.fallback_y),
                };
                NodeDump {
                    id: node.path.clone(),
                    x,
                    y,
                    placed: position.is_some(),
                    agent: node.record.agent.clone(),
                    color: theme.color_for_path(&node.path).to_string(),
                    content: node.record.content.clone(),
                }
            })
            .collect();

        let edges = graph
            .edges
            .iter()
            .map(|edge| EdgeDump {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
            })
            .collect();

        LayoutDump {
            nodes,
            edges,
            agents: graph
                .agents
                .iter()
                .filter(|a| !a.is_empty())
                .cloned()
                .collect(),
        }
    }
}

pub fn write_layout_dump(
    path: &Path,
    graph: &FlatGraph,
    positions: &BTreeMap<String, Position>,
    theme: &Theme,
    config: &RenderConfig,
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_graph(graph, positions, theme, config);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::flatten::flatten_tree;
    use crate::layout::compute_layout;
    use crate::parser::parse_structure;

    #[test]
    fn dump_marks_unplaced_nodes() {
        let config = Config::default();
        let root = parse_structure(
            r#"
src:
  a.ts:
    content: x
    dependency:
      - src/missing.ts
    agent: A
    api: []
  b.ts:
    content: y
    dependency: []
    agent: ""
    api: []
"#,
        )
        .unwrap();
        let graph = flatten_tree(&root, &config.flatten);
        let positions = compute_layout(&graph.node_ids(), &graph.edges, &config.layout);
        let dump = LayoutDump::from_graph(&graph, &positions, &config.theme, &config.render);

        let a = dump.nodes.iter().find(|n| n.id == "src/a.ts").unwrap();
        let b = dump.nodes.iter().find(|n| n.id == "src/b.ts").unwrap();
        // a.ts depends only on a missing file, so it never gets a level.
        assert!(!a.placed);
        assert_eq!(a.x, config.render.fallback_x);
        assert!(b.placed);
        assert_eq!(b.y, 0.0);

        // Empty agents are filtered from the dump, dangling edges are kept.
        assert_eq!(dump.agents, ["A"]);
        assert_eq!(dump.edges.len(), 1);
        assert_eq!(dump.edges[0].source, "src/missing.ts");
    }

    #[test]
    fn dump_serializes_to_json() {
        let config = Config::default();
        let root = parse_structure(
            r#"
src:
  a.ts:
    content: x
    dependency: []
    agent: A
    api: []
"#,
        )
        .unwrap();
        let graph = flatten_tree(&root, &config.flatten);
        let positions = compute_layout(&graph.node_ids(), &graph.edges, &config.layout);
        let dump = LayoutDump::from_graph(&graph, &positions, &config.theme, &config.render);
        let json = serde_json::to_value(&dump).unwrap();
        assert_eq!(json["nodes"][0]["id"], "src/a.ts");
        assert_eq!(json["nodes"][0]["color"], "#3178C6");
        assert_eq!(json["agents"][0], "A");
    }
}
