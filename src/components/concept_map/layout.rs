//! Proportional-subdivision tree layout.
//!
//! A single depth-first pass assigns every visible node a layout-space
//! position: x from depth, y from a recursive subdivision of the parent's
//! vertical band weighted by visible-leaf counts. Pure function of
//! (tree, expansion set, config); the renderer applies pan/zoom afterward.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::expansion::ExpansionSet;
use crate::types::ConceptNode;

/// Layout-space coordinates, not screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

/// One entry per node reachable through a chain of open ancestors.
/// Recomputed wholesale whenever the tree or the expansion set changes.
pub type PositionMap = HashMap<String, Position>;

/// Spacing constants. These are configuration, never derived from labels
/// or rendering size.
#[derive(Clone, Copy, Debug)]
pub struct LayoutConfig {
	/// Horizontal distance added per depth level.
	pub horizontal_spacing: f64,
	/// Minimum vertical separation between sibling leaf units.
	pub vertical_spacing: f64,
	/// X of the root column.
	pub base_x: f64,
	/// Canvas height floor; small trees are centered within it.
	pub min_height: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			horizontal_spacing: 300.0,
			vertical_spacing: 100.0,
			base_x: 150.0,
			min_height: 800.0,
		}
	}
}

/// A malformed concept tree. This is a data-contract violation from the
/// content service, so layout refuses to run rather than degrade.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TreeError {
	#[error("duplicate node id `{0}` in concept tree")]
	DuplicateId(String),
}

/// Rejects trees the layout's invariants cannot hold for. The owned tree
/// type cannot represent cycles, so uniqueness of ids is the one check.
pub fn validate(root: &ConceptNode) -> Result<(), TreeError> {
	fn walk<'a>(node: &'a ConceptNode, seen: &mut HashSet<&'a str>) -> Result<(), TreeError> {
		if !seen.insert(&node.id) {
			return Err(TreeError::DuplicateId(node.id.clone()));
		}
		for child in &node.children {
			walk(child, seen)?;
		}
		Ok(())
	}
	walk(root, &mut HashSet::new())
}

/// Visible leaf units under `node`: a closed or childless node counts as a
/// single unit regardless of hidden descendants.
pub fn visible_leaves(node: &ConceptNode, expansion: &ExpansionSet) -> usize {
	if node.is_leaf() || !expansion.is_open(&node.id) {
		return 1;
	}
	node.children
		.iter()
		.map(|c| visible_leaves(c, expansion))
		.sum()
}

/// Computes the full position map for the visible part of the tree.
///
/// Sibling sub-bands are contiguous and allocated in child order, so no
/// two sibling subtrees can overlap. Identical inputs always produce an
/// identical map.
pub fn layout(root: &ConceptNode, expansion: &ExpansionSet, cfg: &LayoutConfig) -> PositionMap {
	let total_leaves = visible_leaves(root, expansion);
	let total_height = cfg
		.min_height
		.max(total_leaves as f64 * cfg.vertical_spacing);

	let mut positions = PositionMap::new();
	place(root, expansion, cfg, 0, 0.0, total_height, &mut positions);
	positions
}

/// Lays out `node` over the band `[min_y, max_y]` and returns its
/// representative y.
fn place(
	node: &ConceptNode,
	expansion: &ExpansionSet,
	cfg: &LayoutConfig,
	depth: usize,
	min_y: f64,
	max_y: f64,
	positions: &mut PositionMap,
) -> f64 {
	let x = cfg.base_x + depth as f64 * cfg.horizontal_spacing;

	if node.is_leaf() || !expansion.is_open(&node.id) {
		let y = (min_y + max_y) / 2.0;
		positions.insert(node.id.clone(), Position { x, y });
		return y;
	}

	let leaves = visible_leaves(node, expansion) as f64;
	let per_leaf = cfg.vertical_spacing.max((max_y - min_y) / leaves);

	let mut cursor = min_y;
	let mut y_sum = 0.0;
	for child in &node.children {
		let child_band = visible_leaves(child, expansion) as f64 * per_leaf;
		y_sum += place(
			child,
			expansion,
			cfg,
			depth + 1,
			cursor,
			cursor + child_band,
			positions,
		);
		cursor += child_band;
	}

	let y = y_sum / node.children.len() as f64;
	positions.insert(node.id.clone(), Position { x, y });
	y
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

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

	fn assert_near(actual: f64, expected: f64) {
		assert!(
			(actual - expected).abs() < 1e-9,
			"expected {expected}, got {actual}"
		);
	}

	#[test]
	fn validate_accepts_unique_ids() {
		assert_eq!(validate(&sample_tree()), Ok(()));
	}

	#[test]
	fn validate_rejects_duplicate_id() {
		let tree = node("root", vec![node("a", vec![]), node("a", vec![])]);
		assert_eq!(
			validate(&tree),
			Err(TreeError::DuplicateId("a".to_string()))
		);
	}

	#[test]
	fn leaf_counts() {
		let tree = sample_tree();
		let mut expansion = ExpansionSet::new("root");
		// b closed: the whole subtree is one unit.
		assert_eq!(visible_leaves(&tree, &expansion), 2);
		assert_eq!(visible_leaves(&tree.children[1], &expansion), 1);
		expansion.toggle(&tree, "b");
		assert_eq!(visible_leaves(&tree, &expansion), 3);
		assert_eq!(visible_leaves(&tree.children[0], &expansion), 1);
	}

	#[test]
	fn closed_subtrees_have_no_entries() {
		let tree = sample_tree();
		let expansion = ExpansionSet::new("root");
		let positions = layout(&tree, &expansion, &LayoutConfig::default());
		assert_eq!(positions.len(), 3);
		assert!(positions.contains_key("b"));
		assert!(!positions.contains_key("b1"));
		assert!(!positions.contains_key("b2"));
	}

	#[test]
	fn expanded_scenario_bands_and_averages() {
		let tree = sample_tree();
		let cfg = LayoutConfig::default();
		let mut expansion = ExpansionSet::new("root");
		expansion.toggle(&tree, "b");

		let positions = layout(&tree, &expansion, &cfg);
		assert_eq!(positions.len(), 5);

		// Band [0, 800], 3 leaf units, 266.67 per unit.
		let a = positions["a"];
		let b = positions["b"];
		let b1 = positions["b1"];
		let b2 = positions["b2"];
		assert_near(a.x, 450.0);
		assert_near(a.y, 800.0 / 6.0);
		assert_near(b1.y, 400.0);
		assert_near(b2.y, 2000.0 / 3.0);
		// b sits at the average of its children, root at the average of a and b.
		assert_near(b.y, (b1.y + b2.y) / 2.0);
		assert_near(positions["root"].y, (a.y + b.y) / 2.0);
		// Sibling bands are disjoint and order-preserving.
		assert!(a.y < b1.y && b1.y < b2.y);
	}

	#[test]
	fn single_node_sits_at_canvas_midpoint() {
		let tree = node("root", vec![]);
		let cfg = LayoutConfig::default();
		let positions = layout(&tree, &ExpansionSet::new("root"), &cfg);
		assert_eq!(positions.len(), 1);
		assert_near(positions["root"].x, cfg.base_x);
		assert_near(positions["root"].y, cfg.min_height / 2.0);
	}

	#[test]
	fn single_child_node_sits_at_its_childs_y() {
		let tree = node("root", vec![node("only", vec![])]);
		let positions = layout(&tree, &ExpansionSet::new("root"), &LayoutConfig::default());
		assert_near(positions["root"].y, positions["only"].y);
	}

	#[test]
	fn wide_trees_grow_the_canvas_and_keep_minimum_spacing() {
		// 16 leaves outgrow the 800px floor; every unit still gets the
		// full 100px minimum separation.
		let children: Vec<ConceptNode> = (0..16)
			.map(|i| node(&format!("c{i}"), vec![]))
			.collect();
		let tree = node("root", children);
		let cfg = LayoutConfig::default();
		let positions = layout(&tree, &ExpansionSet::new("root"), &cfg);
		for i in 1..16 {
			let prev = positions[&format!("c{}", i - 1)].y;
			let cur = positions[&format!("c{i}")].y;
			assert_near(cur - prev, cfg.vertical_spacing);
		}
	}

	#[test]
	fn layout_is_deterministic() {
		let tree = sample_tree();
		let mut expansion = ExpansionSet::new("root");
		expansion.toggle(&tree, "b");
		let cfg = LayoutConfig::default();
		assert_eq!(layout(&tree, &expansion, &cfg), layout(&tree, &expansion, &cfg));
	}

	#[test]
	fn x_comes_from_depth_alone() {
		let tree = sample_tree();
		let cfg = LayoutConfig::default();
		let mut expansion = ExpansionSet::new("root");
		expansion.toggle(&tree, "b");
		let positions = layout(&tree, &expansion, &cfg);
		assert_near(positions["root"].x, cfg.base_x);
		assert_near(positions["a"].x, cfg.base_x + cfg.horizontal_spacing);
		assert_near(positions["b1"].x, cfg.base_x + 2.0 * cfg.horizontal_spacing);
	}
}
