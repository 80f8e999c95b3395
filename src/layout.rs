use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::LayoutConfig;
use crate::ir::{DependencyEdge, Position};

/// Breadth-first leveling with centered, staggered placement.
///
/// Roots are the node ids that never appear as an edge target. Every node
/// reached from a root gets a level equal to the maximum depth over all
/// incoming paths, so a dependent never sits above one of its dependencies
/// when paths converge. Levels become rows: y grows by `vertical_spacing`
/// per level, nodes within a row are evenly spaced and centered on x = 0,
/// and odd rows are shifted right by `stagger_offset` to reduce edge
/// overlap.
///
/// The map is not guaranteed total: nodes unreachable from any root (pure
/// cycles, targets of dangling edges) get no entry and the caller supplies a
/// default position. Cyclic input terminates but the levels inside the cycle
/// are unspecified.
pub fn compute_layout(
    node_ids: &[String],
    edges: &[DependencyEdge],
    config: &LayoutConfig,
) -> BTreeMap<String, Position> {
    let levels = assign_levels(node_ids, edges);

    let mut rows: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for id in node_ids {
        if let Some(level) = levels.get(id) {
            rows.entry(*level).or_default().push(id.clone());
        }
    }

    let mut positions = BTreeMap::new();
    for (level, row) in &rows {
        let total_width = (row.len() - 1) as f32 * config.horizontal_spacing;
        let start_x = -total_width / 2.0;
        let stagger = if level % 2 == 1 {
            config.stagger_offset
        } else {
            0.0
        };
        for (index, id) in row.iter().enumerate() {
            positions.insert(
                id.clone(),
                Position {
                    x: start_x + index as f32 * config.horizontal_spacing + stagger,
                    y: *level as f32 * config.vertical_spacing,
                },
            );
        }
    }
    positions
}

/// Level assignment: depth-first from each root along outgoing edges,
/// keeping the maximum depth seen per node.
fn assign_levels(node_ids: &[String], edges: &[DependencyEdge]) -> HashMap<String, usize> {
    let targets: HashSet<&str> = edges.iter().map(|e| e.target.as_str()).collect();
    let roots: Vec<&str> = node_ids
        .iter()
        .map(String::as_str)
        .filter(|id| !targets.contains(id))
        .collect();

    let mut outgoing: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        outgoing
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }

    let mut levels: HashMap<String, usize> = HashMap::new();
    let mut on_path: HashSet<&str> = HashSet::new();
    for root in roots {
        descend(root, 0, &outgoing, &mut levels, &mut on_path);
    }
    levels
}

fn descend<'a>(
    id: &'a str,
    depth: usize,
    outgoing: &HashMap<&'a str, Vec<&'a str>>,
    levels: &mut HashMap<String, usize>,
    on_path: &mut HashSet<&'a str>,
) {
    // Cycle guard: an id already on the current path is not re-entered.
    if !on_path.insert(id) {
        return;
    }
    match levels.get(id) {
        // A recorded level at or beyond this depth cannot be raised by
        // walking in from a shallower path, so the subtree is skipped. This
        // keeps converging-path graphs linear instead of exponential while
        // still settling every node at its deepest incoming path.
        Some(existing) if *existing >= depth => {
            on_path.remove(id);
            return;
        }
        _ => {}
    }
    levels.insert(id.to_string(), depth);
    if let Some(next) = outgoing.get(id) {
        for &target in next {
            descend(target, depth + 1, outgoing, levels, on_path);
        }
    }
    on_path.remove(id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::DependencyEdge;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn edge(a: &str, b: &str) -> DependencyEdge {
        DependencyEdge::new(a, b)
    }

    fn level_of(positions: &BTreeMap<String, Position>, id: &str, config: &LayoutConfig) -> usize {
        (positions[id].y / config.vertical_spacing).round() as usize
    }

    #[test]
    fn roots_sit_at_level_zero() {
        let config = LayoutConfig::default();
        let positions = compute_layout(
            &ids(&["root", "child"]),
            &[edge("root", "child")],
            &config,
        );
        assert_eq!(positions["root"].y, 0.0);
        assert_eq!(level_of(&positions, "child", &config), 1);
    }

    #[test]
    fn levels_are_monotonic_along_edges() {
        let config = LayoutConfig::default();
        let edges = vec![
            edge("a", "b"),
            edge("a", "c"),
            edge("b", "d"),
            edge("c", "d"),
            edge("d", "e"),
        ];
        let positions = compute_layout(&ids(&["a", "b", "c", "d", "e"]), &edges, &config);
        for e in &edges {
            assert!(
                positions[&e.target].y > positions[&e.source].y,
                "{} must sit below {}",
                e.target,
                e.source
            );
        }
    }

    #[test]
    fn converging_paths_take_the_maximum_depth() {
        // a -> b -> c and a -> c: c must land at level 2, not 1.
        let config = LayoutConfig::default();
        let positions = compute_layout(
            &ids(&["a", "b", "c"]),
            &[edge("a", "b"), edge("b", "c"), edge("a", "c")],
            &config,
        );
        assert_eq!(level_of(&positions, "c", &config), 2);
    }

    #[test]
    fn deep_path_discovered_last_still_wins() {
        // The direct a -> d edge is walked first; the long chain must still
        // push d down to level 3.
        let config = LayoutConfig::default();
        let positions = compute_layout(
            &ids(&["a", "b", "c", "d"]),
            &[edge("a", "d"), edge("a", "b"), edge("b", "c"), edge("c", "d")],
            &config,
        );
        assert_eq!(level_of(&positions, "d", &config), 3);
    }

    #[test]
    fn rows_are_centered_and_distinct() {
        let config = LayoutConfig::default();
        let positions = compute_layout(
            &ids(&["r", "a", "b", "c"]),
            &[edge("r", "a"), edge("r", "b"), edge("r", "c")],
            &config,
        );
        let mut xs: Vec<f32> = ["a", "b", "c"]
            .iter()
            .map(|id| positions[*id].x - config.stagger_offset)
            .collect();
        xs.sort_by(f32::total_cmp);
        assert_eq!(xs.len(), 3);
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
        // Symmetric about zero before the stagger shift.
        assert_eq!(xs[0] + xs[2], 0.0);
        assert_eq!(xs[1], 0.0);
    }

    #[test]
    fn odd_levels_are_staggered() {
        let config = LayoutConfig::default();
        let positions = compute_layout(
            &ids(&["root", "child"]),
            &[edge("root", "child")],
            &config,
        );
        assert_eq!(positions["root"].x, 0.0);
        assert_eq!(positions["child"].x, config.stagger_offset);
    }

    #[test]
    fn two_roots_share_the_top_row() {
        let config = LayoutConfig::default();
        let positions = compute_layout(
            &ids(&["r1", "r2", "a", "b"]),
            &[edge("r1", "a"), edge("r2", "b")],
            &config,
        );
        assert_eq!(positions["r1"].y, 0.0);
        assert_eq!(positions["r2"].y, 0.0);
        assert_eq!(positions["r1"].x + positions["r2"].x, 0.0);
    }

    #[test]
    fn cyclic_input_terminates_without_entries_for_pure_cycles() {
        let config = LayoutConfig::default();
        // No root at all: every node is somebody's target.
        let positions = compute_layout(
            &ids(&["a", "b"]),
            &[edge("a", "b"), edge("b", "a")],
            &config,
        );
        assert!(positions.is_empty());
    }

    #[test]
    fn cycle_reachable_from_root_terminates() {
        let config = LayoutConfig::default();
        let positions = compute_layout(
            &ids(&["r", "a", "b"]),
            &[edge("r", "a"), edge("a", "b"), edge("b", "a")],
            &config,
        );
        assert_eq!(positions["r"].y, 0.0);
        assert!(positions.contains_key("a"));
        assert!(positions.contains_key("b"));
    }

    #[test]
    fn dangling_edge_leaves_no_position_for_missing_target() {
        let config = LayoutConfig::default();
        let positions = compute_layout(
            &ids(&["a.ts"]),
            &[edge("missing.ts", "a.ts")],
            &config,
        );
        // a.ts has an incoming edge so it is not a root; missing.ts is not a
        // node at all. Nothing is placed and nothing panics.
        assert!(!positions.contains_key("missing.ts"));
        assert!(positions.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_map() {
        let positions = compute_layout(&[], &[], &LayoutConfig::default());
        assert!(positions.is_empty());
    }
}
