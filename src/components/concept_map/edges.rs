use super::expansion::ExpansionSet;
use super::layout::{Position, PositionMap};
use crate::types::ConceptNode;

/// A parent→child connector in layout space. Derived from the position
/// map on demand, never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
	pub from: Position,
	pub to: Position,
}

/// One edge per (open parent, positioned child) pair, in depth-first
/// order. Ids missing from the position map are skipped rather than
/// treated as errors; a stale reference degrades to a missing connector.
pub fn connectors(
	root: &ConceptNode,
	expansion: &ExpansionSet,
	positions: &PositionMap,
) -> Vec<Edge> {
	let mut edges = Vec::new();
	collect(root, expansion, positions, &mut edges);
	edges
}

fn collect(
	node: &ConceptNode,
	expansion: &ExpansionSet,
	positions: &PositionMap,
	edges: &mut Vec<Edge>,
) {
	if !expansion.is_open(&node.id) {
		return;
	}
	let parent = positions.get(&node.id);
	for child in &node.children {
		if let (Some(&from), Some(&to)) = (parent, positions.get(&child.id)) {
			edges.push(Edge { from, to });
		}
		collect(child, expansion, positions, edges);
	}
}

#[cfg(test)]
mod tests {
	use super::super::layout::{LayoutConfig, layout};
	use super::*;

	fn node(id: &str, children: Vec<ConceptNode>) -> ConceptNode {
		ConceptNode {
			id: id.to_string(),
			label: id.to_uppercase(),
			children,
		}
	}

	fn sample_tree() -> ConceptNode {
		node(
			"root",
			vec![
				node("a", vec![]),
				node("b", vec![node("b1", vec![]), node("b2", vec![])]),
			],
		)
	}

	#[test]
	fn one_edge_per_visible_parent_child_pair() {
		let tree = sample_tree();
		let mut expansion = ExpansionSet::new("root");
		expansion.toggle(&tree, "b");
		let positions = layout(&tree, &expansion, &LayoutConfig::default());

		let edges = connectors(&tree, &expansion, &positions);
		assert_eq!(edges.len(), 4);
		assert_eq!(edges[0].from, positions["root"]);
		assert_eq!(edges[0].to, positions["a"]);
		assert_eq!(edges[2].from, positions["b"]);
		assert_eq!(edges[2].to, positions["b1"]);
	}

	#[test]
	fn closed_parents_emit_nothing() {
		let tree = sample_tree();
		let expansion = ExpansionSet::new("root");
		let positions = layout(&tree, &expansion, &LayoutConfig::default());
		// b is closed: only root's two edges remain.
		assert_eq!(connectors(&tree, &expansion, &positions).len(), 2);
	}

	#[test]
	fn missing_positions_are_skipped() {
		let tree = sample_tree();
		let mut expansion = ExpansionSet::new("root");
		expansion.toggle(&tree, "b");
		let mut positions = layout(&tree, &expansion, &LayoutConfig::default());
		positions.remove("b1");

		let edges = connectors(&tree, &expansion, &positions);
		assert_eq!(edges.len(), 3);
	}

	#[test]
	fn fully_collapsed_root_emits_nothing() {
		let tree = sample_tree();
		let mut expansion = ExpansionSet::new("root");
		expansion.toggle(&tree, "root");
		let positions = layout(&tree, &expansion, &LayoutConfig::default());
		assert!(connectors(&tree, &expansion, &positions).is_empty());
	}
}
