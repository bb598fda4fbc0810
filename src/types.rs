//! Wire types for the content bundle returned by the study service.

use serde::{Deserialize, Serialize};

/// One entry in the concept tree: an id, a display label and ordered
/// children. Ids are unique across the tree; the structure is a strict
/// tree (the service never emits shared descendants).
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ConceptNode {
	pub id: String,
	pub label: String,
	#[serde(default)]
	pub children: Vec<ConceptNode>,
}

impl ConceptNode {
	pub fn is_leaf(&self) -> bool {
		self.children.is_empty()
	}

	pub fn contains(&self, id: &str) -> bool {
		self.id == id || self.children.iter().any(|c| c.contains(id))
	}

	/// Every id in the tree, depth-first in document order.
	pub fn ids(&self) -> Vec<String> {
		let mut out = Vec::new();
		self.collect_ids(&mut out);
		out
	}

	fn collect_ids(&self, out: &mut Vec<String>) {
		out.push(self.id.clone());
		for child in &self.children {
			child.collect_ids(out);
		}
	}

	/// Total node count, expanded or not.
	pub fn count(&self) -> usize {
		1 + self.children.iter().map(ConceptNode::count).sum::<usize>()
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct Flashcard {
	pub id: String,
	pub question: String,
	pub answer: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
	pub id: String,
	pub question: String,
	pub options: Vec<String>,
	pub correct_answer: usize,
	pub explanation: String,
}

/// Everything the service generates for one document.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
	pub document_id: String,
	pub mind_map: ConceptNode,
	pub audio_overview: String,
	pub video_overview: String,
	pub flashcards: Vec<Flashcard>,
	pub quiz: Vec<QuizQuestion>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
	User,
	Assistant,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
	pub role: ChatRole,
	pub content: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tree_helpers() {
		let tree: ConceptNode = serde_json::from_str(
			r#"{"id":"root","label":"R","children":[
				{"id":"a","label":"A"},
				{"id":"b","label":"B","children":[{"id":"b1","label":"B1"}]}
			]}"#,
		)
		.unwrap();
		assert_eq!(tree.count(), 4);
		assert!(tree.contains("b1"));
		assert!(!tree.contains("zzz"));
		assert_eq!(tree.ids(), ["root", "a", "b", "b1"]);
		assert!(!tree.is_leaf());
		assert!(tree.children[0].is_leaf());
	}

	#[test]
	fn bundle_deserializes_camel_case() {
		let json = r#"{
			"documentId": "doc-1",
			"mindMap": {"id": "root", "label": "Topic"},
			"audioOverview": "summary",
			"videoOverview": "Scene 1: intro",
			"flashcards": [{"id": "f1", "question": "q", "answer": "a"}],
			"quiz": [{
				"id": "q1",
				"question": "pick one",
				"options": ["x", "y"],
				"correctAnswer": 1,
				"explanation": "because"
			}]
		}"#;
		let content: GeneratedContent = serde_json::from_str(json).unwrap();
		assert_eq!(content.document_id, "doc-1");
		assert_eq!(content.mind_map.label, "Topic");
		assert_eq!(content.quiz[0].correct_answer, 1);
	}
}
