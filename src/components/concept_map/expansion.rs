use std::collections::HashSet;

use crate::types::ConceptNode;

/// The set of node ids whose children are currently visible.
///
/// Membership only affects layout and visibility; the tree itself is never
/// touched. Closing a node hides its subtree without clearing the
/// descendants' own membership, so re-opening restores their prior state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpansionSet {
	open: HashSet<String>,
	root: String,
}

impl ExpansionSet {
	/// Starts with just the root open.
	pub fn new(root_id: &str) -> Self {
		Self {
			open: HashSet::from([root_id.to_string()]),
			root: root_id.to_string(),
		}
	}

	pub fn is_open(&self, id: &str) -> bool {
		self.open.contains(id)
	}

	pub fn open_count(&self) -> usize {
		self.open.len()
	}

	/// Flips `id` between open and closed. Ids not present in `tree` are
	/// ignored.
	pub fn toggle(&mut self, tree: &ConceptNode, id: &str) {
		if !tree.contains(id) {
			return;
		}
		if !self.open.remove(id) {
			self.open.insert(id.to_string());
		}
	}

	/// Opens every node in the tree.
	pub fn expand_all(&mut self, tree: &ConceptNode) {
		self.open = tree.ids().into_iter().collect();
	}

	/// Back to just the root.
	pub fn collapse_all(&mut self) {
		self.open = HashSet::from([self.root.clone()]);
	}
}
