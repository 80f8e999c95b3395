use crate::config::FlattenConfig;
use crate::ir::{DependencyEdge, FileTreeNode, FlatGraph, FlatNode};

/// Flatten the nested structure tree into flat node and edge lists plus the
/// set of distinct agents.
///
/// Depth-first, mapping keys in their iteration order; each step appends the
/// key to the accumulated slash-delimited path, starting from the configured
/// root label (empty by default, so top-level keys become the first path
/// segment). One node per leaf, one edge per declared dependency with the
/// dependency as source and the declaring file as target. `Other` values
/// (malformed leaves) are skipped without reporting.
///
/// Pure function of its input: every call allocates fresh containers and no
/// state survives between calls.
pub fn flatten_tree(root: &FileTreeNode, config: &FlattenConfig) -> FlatGraph {
    let mut graph = FlatGraph::default();
    walk(root, &config.root_label, &mut graph);
    graph
}

fn walk(node: &FileTreeNode, path: &str, graph: &mut FlatGraph) {
    match node {
        FileTreeNode::Leaf(record) => {
            graph.agents.insert(record.agent.clone());
            for dependency in &record.dependency {
                graph.edges.push(DependencyEdge::new(dependency, path));
            }
            graph.nodes.push(FlatNode {
                path: path.to_string(),
                record: record.clone(),
            });
        }
        FileTreeNode::Branch(children) => {
            for (key, child) in children {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}/{key}")
                };
                walk(child, &child_path, graph);
            }
        }
        // Not a record and not a mapping: skipped, never reported.
        FileTreeNode::Other(_) => {}
    }
}
