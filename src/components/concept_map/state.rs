use super::edges::{Edge, connectors};
use super::expansion::ExpansionSet;
use super::layout::{LayoutConfig, PositionMap, TreeError, layout, validate};
use super::viewport::Viewport;
use crate::types::ConceptNode;

/// Card footprint in layout space; positions are the card's top-left.
pub const NODE_WIDTH: f64 = 220.0;
pub const NODE_HEIGHT: f64 = 70.0;

/// Everything the concept-map view owns: the read-only tree, the
/// expansion set, the viewport, and the current position map. Layout is
/// recomputed synchronously after every expansion change; the map is
/// replaced wholesale, never patched.
pub struct ConceptMapState {
	tree: ConceptNode,
	pub expansion: ExpansionSet,
	pub viewport: Viewport,
	positions: PositionMap,
	config: LayoutConfig,
	pub width: f64,
	pub height: f64,
}

impl ConceptMapState {
	/// Validates the tree up front; a malformed bundle is a contract
	/// violation from the content service and produces no state at all.
	pub fn new(tree: &ConceptNode, width: f64, height: f64) -> Result<Self, TreeError> {
		validate(tree)?;
		let expansion = ExpansionSet::new(&tree.id);
		let config = LayoutConfig::default();
		let positions = layout(tree, &expansion, &config);
		Ok(Self {
			tree: tree.clone(),
			expansion,
			viewport: Viewport::default(),
			positions,
			config,
			width,
			height,
		})
	}

	pub fn tree(&self) -> &ConceptNode {
		&self.tree
	}

	pub fn positions(&self) -> &PositionMap {
		&self.positions
	}

	pub fn edges(&self) -> Vec<Edge> {
		connectors(&self.tree, &self.expansion, &self.positions)
	}

	pub fn visible_count(&self) -> usize {
		self.positions.len()
	}

	pub fn total_count(&self) -> usize {
		self.tree.count()
	}

	pub fn toggle(&mut self, id: &str) {
		self.expansion.toggle(&self.tree, id);
		self.relayout();
	}

	pub fn expand_all(&mut self) {
		self.expansion.expand_all(&self.tree);
		self.relayout();
	}

	pub fn collapse_all(&mut self) {
		self.expansion.collapse_all();
		self.relayout();
	}

	fn relayout(&mut self) {
		self.positions = layout(&self.tree, &self.expansion, &self.config);
	}

	/// The visible card under a screen point, topmost (deepest drawn)
	/// first. Cards are hit in layout space so they scale with zoom.
	pub fn node_at(&self, screen_x: f64, screen_y: f64) -> Option<String> {
		let p = self.viewport.screen_to_layout(screen_x, screen_y);
		let mut found = None;
		self.visit_visible(&self.tree, &mut |node| {
			if let Some(pos) = self.positions.get(&node.id) {
				if p.x >= pos.x
					&& p.x <= pos.x + NODE_WIDTH
					&& p.y >= pos.y
					&& p.y <= pos.y + NODE_HEIGHT
				{
					found = Some(node.id.clone());
				}
			}
		});
		found
	}

	/// Depth-first walk over the nodes that currently have a position,
	/// in draw order.
	pub fn visit_visible<'a>(&'a self, node: &'a ConceptNode, f: &mut impl FnMut(&'a ConceptNode)) {
		f(node);
		if self.expansion.is_open(&node.id) {
			for child in &node.children {
				self.visit_visible(child, f);
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
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
	fn rejects_malformed_tree() {
		let tree = node("root", vec![node("x", vec![]), node("x", vec![])]);
		assert!(ConceptMapState::new(&tree, 1200.0, 700.0).is_err());
	}

	#[test]
	fn toggle_relayouts_synchronously() {
		let mut state = ConceptMapState::new(&sample_tree(), 1200.0, 700.0).unwrap();
		assert_eq!(state.visible_count(), 3);
		state.toggle("b");
		assert_eq!(state.visible_count(), 5);
		assert_eq!(state.edges().len(), 4);
		state.toggle("b");
		assert_eq!(state.visible_count(), 3);
	}

	#[test]
	fn expand_and_collapse_all() {
		let mut state = ConceptMapState::new(&sample_tree(), 1200.0, 700.0).unwrap();
		state.expand_all();
		assert_eq!(state.visible_count(), state.total_count());
		state.collapse_all();
		assert_eq!(state.visible_count(), 3);
	}

	#[test]
	fn hit_test_respects_the_view_transform() {
		let state = ConceptMapState::new(&node("root", vec![]), 1200.0, 700.0).unwrap();
		let pos = state.positions()["root"];
		let vp = &state.viewport;
		let sx = vp.pan_x + vp.zoom * (pos.x + 10.0);
		let sy = vp.pan_y + vp.zoom * (pos.y + 10.0);
		assert_eq!(state.node_at(sx, sy), Some("root".to_string()));
		// Just above the card misses.
		let sy_out = vp.pan_y + vp.zoom * (pos.y - 5.0);
		assert_eq!(state.node_at(sx, sy_out), None);
	}

	#[test]
	fn expansion_changes_leave_viewport_alone() {
		let mut state = ConceptMapState::new(&sample_tree(), 1200.0, 700.0).unwrap();
		state.viewport.begin_drag(0.0, 0.0);
		state.viewport.continue_drag(25.0, 35.0);
		state.viewport.end_drag();
		let vp = state.viewport.clone();
		state.toggle("b");
		state.expand_all();
		state.collapse_all();
		assert_eq!(state.viewport, vp);
	}
}
