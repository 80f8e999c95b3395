use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// One file entry of the structure document.
///
/// The leaf/branch discrimination of the input format is by shape: a mapping
/// is a file iff it carries all of `content`, `dependency`, `agent` and
/// `api`. The four fields are therefore required here; `dependencyWait` is
/// parsed and kept but consumed by nothing downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub content: String,
    pub dependency: Vec<String>,
    pub agent: String,
    pub api: Vec<String>,
    #[serde(rename = "dependencyWait", skip_serializing_if = "Option::is_none")]
    pub dependency_wait: Option<bool>,
}

/// A node of the nested structure tree, decided once at parse time.
///
/// Untagged deserialization tries the variants in order, which reproduces the
/// source format's lenient shape probing: a mapping missing one of the four
/// record fields falls through to `Branch` and is recursed into, and anything
/// that is neither a record nor a mapping (a bare string, a number) lands in
/// `Other` and is skipped by the flattener instead of failing the parse.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FileTreeNode {
    Leaf(FileRecord),
    Branch(BTreeMap<String, FileTreeNode>),
    Other(serde_yaml::Value),
}

/// Flattened file node: the slash-delimited root-relative path is the id.
#[derive(Debug, Clone, Serialize)]
pub struct FlatNode {
    pub path: String,
    #[serde(flatten)]
    pub record: FileRecord,
}

/// Directed dependency edge.
///
/// Direction convention, held across the whole flatten pass: `source` is the
/// dependency, `target` is the file that declared it. Under this convention
/// "root node" (no incoming edge) means a file that depends on nothing, so
/// dependencies always level above their dependents. The id is not
/// guaranteed unique when the same pair is declared twice.
#[derive(Debug, Clone, Serialize)]
pub struct DependencyEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl DependencyEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("{source}-{target}"),
            source,
            target,
        }
    }
}

/// Output of the flattener: flat nodes, directed edges and the distinct
/// agent identifiers encountered. Empty agent strings are kept here and
/// filtered at render time.
#[derive(Debug, Clone, Default)]
pub struct FlatGraph {
    pub nodes: Vec<FlatNode>,
    pub edges: Vec<DependencyEdge>,
    pub agents: BTreeSet<String>,
}

impl FlatGraph {
    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.path.clone()).collect()
    }
}

/// A computed 2-D position. Presentation derivative only, recomputed whenever
/// the node/edge set changes; never part of a node's identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}
