//! Layout-ready node/edge sets derived from backend responses or legacy
//! concept data.
//!
//! The view-model owns identity and dedup; positions belong to the force
//! simulation in [`super::state`]. Expansion merges are monotonic: they
//! only ever add nodes and edges, and never touch fields of nodes that
//! are already present, so the simulation keeps its continuity.

use std::collections::HashSet;

use crate::api::graph::{DEFAULT_EDGE_WEIGHT, ExpandResponse, GraphResponse};
use crate::model::Concept;

/// Readiness color band for a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadinessBand {
	High,
	Medium,
	Low,
	/// No direct measurement; rendered neutral regardless of any value.
	Unobserved,
}

/// Band a node's readiness: `>= 0.7` high, `>= 0.5` medium, below low.
/// Unobserved nodes are neutral even when a numeric value is present.
pub fn readiness_band(readiness: Option<f64>, observed: bool) -> ReadinessBand {
	if !observed {
		return ReadinessBand::Unobserved;
	}
	match readiness {
		Some(r) if r >= 0.7 => ReadinessBand::High,
		Some(r) if r >= 0.5 => ReadinessBand::Medium,
		Some(_) => ReadinessBand::Low,
		None => ReadinessBand::Unobserved,
	}
}

/// A renderable node.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewNode {
	pub id: String,
	pub label: String,
	pub readiness: Option<f64>,
	pub observed: bool,
	pub depth: u32,
	/// Whether this node has already been expanded by the user.
	pub expanded: bool,
}

impl ViewNode {
	pub fn band(&self) -> ReadinessBand {
		readiness_band(self.readiness, self.observed)
	}
}

/// A renderable directed edge; `source` is prerequisite of `target`.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewEdge {
	pub source: String,
	pub target: String,
	pub weight: f64,
}

/// The node/edge set backing one mounted graph view.
#[derive(Clone, Debug, Default)]
pub struct GraphViewModel {
	nodes: Vec<ViewNode>,
	edges: Vec<ViewEdge>,
	ids: HashSet<String>,
	edge_keys: HashSet<(String, String)>,
}

impl GraphViewModel {
	/// Build from a live graph response. Returns `None` when the response
	/// is a soft failure (`status != "ok"` or zero nodes), in which case
	/// the caller falls back to legacy concept data.
	pub fn from_response(resp: &GraphResponse) -> Option<Self> {
		if !resp.is_usable() {
			return None;
		}
		let mut vm = Self::default();
		for node in &resp.nodes {
			vm.push_node(ViewNode {
				id: node.id.clone(),
				label: node.label.clone(),
				readiness: node.readiness,
				observed: node.observed,
				depth: node.depth,
				expanded: false,
			});
		}
		for edge in &resp.edges {
			vm.push_edge(&edge.source, &edge.target, edge.weight);
		}
		Some(vm)
	}

	/// Synthesize from a legacy concept array: every concept becomes an
	/// observed node, every resolvable prerequisite relationship a
	/// directed edge with the default weight.
	pub fn from_concepts(concepts: &[Concept]) -> Self {
		let mut vm = Self::default();
		for concept in concepts {
			vm.push_node(ViewNode {
				id: concept.id.clone(),
				label: concept.name.clone(),
				readiness: concept.readiness,
				observed: true,
				depth: concept.depth,
				expanded: false,
			});
		}
		for concept in concepts {
			for prereq in &concept.prerequisites {
				vm.push_edge(prereq, &concept.id, DEFAULT_EDGE_WEIGHT);
			}
		}
		vm
	}

	/// Union an expansion response into this view-model.
	///
	/// Nodes are keyed by id and edges by (source, target); entries
	/// already present are skipped untouched, so applying the same
	/// response twice is a no-op after the first application.
	pub fn merge_expansion(&mut self, resp: &ExpandResponse) {
		for node in &resp.new_nodes {
			self.push_node(ViewNode {
				id: node.id.clone(),
				label: node.label.clone(),
				readiness: node.readiness,
				observed: node.observed,
				depth: node.depth,
				expanded: false,
			});
		}
		for edge in &resp.new_edges {
			self.push_edge(&edge.source, &edge.target, edge.weight);
		}
	}

	/// Record that the user expanded `id`. The only field mutation the
	/// view-model performs after construction.
	pub fn mark_expanded(&mut self, id: &str) {
		if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
			node.expanded = true;
		}
	}

	pub fn node(&self, id: &str) -> Option<&ViewNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn nodes(&self) -> &[ViewNode] {
		&self.nodes
	}

	pub fn edges(&self) -> &[ViewEdge] {
		&self.edges
	}

	pub fn max_depth(&self) -> u32 {
		self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
	}

	fn push_node(&mut self, node: ViewNode) {
		if self.ids.contains(&node.id) {
			return;
		}
		self.ids.insert(node.id.clone());
		self.nodes.push(node);
	}

	// Edges with an endpoint that resolves to no known node are dropped
	// silently; a renderable graph beats a hard failure.
	fn push_edge(&mut self, source: &str, target: &str, weight: f64) {
		if !self.ids.contains(source) || !self.ids.contains(target) {
			return;
		}
		let key = (source.to_string(), target.to_string());
		if self.edge_keys.contains(&key) {
			return;
		}
		self.edge_keys.insert(key);
		self.edges.push(ViewEdge {
			source: source.to_string(),
			target: target.to_string(),
			weight,
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::graph::{WireEdge, WireNode};

	fn wire_node(id: &str, depth: u32, readiness: Option<f64>, observed: bool) -> WireNode {
		WireNode {
			id: id.to_string(),
			label: id.to_uppercase(),
			readiness,
			observed,
			depth,
		}
	}

	fn wire_edge(source: &str, target: &str) -> WireEdge {
		WireEdge {
			source: source.to_string(),
			target: target.to_string(),
			weight: 0.7,
		}
	}

	fn live_response() -> GraphResponse {
		GraphResponse {
			status: "ok".into(),
			nodes: vec![
				wire_node("c1", 0, Some(0.9), true),
				wire_node("c2", 1, Some(0.4), true),
			],
			edges: vec![wire_edge("c1", "c2")],
		}
	}

	fn expansion() -> ExpandResponse {
		ExpandResponse {
			status: "ok".into(),
			new_nodes: vec![wire_node("c3", 2, None, false)],
			new_edges: vec![wire_edge("c2", "c3")],
		}
	}

	#[test]
	fn failed_or_empty_response_is_rejected() {
		let failed = GraphResponse {
			status: "error".into(),
			nodes: vec![wire_node("c1", 0, None, true)],
			edges: vec![],
		};
		assert!(GraphViewModel::from_response(&failed).is_none());

		let empty = GraphResponse {
			status: "ok".into(),
			nodes: vec![],
			edges: vec![],
		};
		assert!(GraphViewModel::from_response(&empty).is_none());
	}

	#[test]
	fn legacy_fallback_mirrors_concepts() {
		let concepts = vec![
			Concept {
				id: "c1".into(),
				name: "Limits".into(),
				depth: 0,
				prerequisites: vec![],
				readiness: Some(0.8),
			},
			Concept {
				id: "c2".into(),
				name: "Derivatives".into(),
				depth: 1,
				prerequisites: vec!["c1".into()],
				readiness: None,
			},
		];
		let vm = GraphViewModel::from_concepts(&concepts);
		assert_eq!(vm.nodes().len(), 2);
		assert_eq!(vm.edges().len(), 1);
		assert_eq!(vm.edges()[0].source, "c1");
		assert_eq!(vm.edges()[0].target, "c2");
		assert_eq!(vm.edges()[0].weight, DEFAULT_EDGE_WEIGHT);
		assert!(vm.nodes().iter().all(|n| n.observed));
	}

	#[test]
	fn unresolvable_prerequisites_are_dropped() {
		let concepts = vec![Concept {
			id: "c2".into(),
			name: "Derivatives".into(),
			depth: 1,
			prerequisites: vec!["ghost".into()],
			readiness: None,
		}];
		let vm = GraphViewModel::from_concepts(&concepts);
		assert_eq!(vm.nodes().len(), 1);
		assert!(vm.edges().is_empty());
	}

	#[test]
	fn dangling_wire_edges_are_dropped() {
		let resp = GraphResponse {
			status: "ok".into(),
			nodes: vec![wire_node("c1", 0, None, true)],
			edges: vec![wire_edge("c1", "missing"), wire_edge("missing", "c1")],
		};
		let vm = GraphViewModel::from_response(&resp).unwrap();
		assert!(vm.edges().is_empty());
	}

	#[test]
	fn merge_is_idempotent() {
		let mut vm = GraphViewModel::from_response(&live_response()).unwrap();
		vm.merge_expansion(&expansion());
		let nodes_after_first = vm.nodes().to_vec();
		let edges_after_first = vm.edges().to_vec();

		vm.merge_expansion(&expansion());
		assert_eq!(vm.nodes(), nodes_after_first.as_slice());
		assert_eq!(vm.edges(), edges_after_first.as_slice());
	}

	#[test]
	fn merge_is_monotonic_and_preserves_existing_fields() {
		let mut vm = GraphViewModel::from_response(&live_response()).unwrap();
		let (n0, e0) = (vm.nodes().len(), vm.edges().len());
		let original_c2 = vm.node("c2").cloned().unwrap();

		// The expansion re-sends c2 with different fields; they must not win.
		let resp = ExpandResponse {
			status: "ok".into(),
			new_nodes: vec![
				wire_node("c2", 7, Some(0.1), false),
				wire_node("c3", 2, None, false),
			],
			new_edges: vec![wire_edge("c2", "c3")],
		};
		vm.merge_expansion(&resp);

		assert!(vm.nodes().len() >= n0);
		assert!(vm.edges().len() >= e0);
		assert_eq!(vm.node("c2"), Some(&original_c2));
		assert!(vm.node("c3").is_some());
	}

	#[test]
	fn expansion_nodes_without_measurement_are_unobserved() {
		let mut vm = GraphViewModel::from_response(&live_response()).unwrap();
		vm.merge_expansion(&expansion());
		let c3 = vm.node("c3").unwrap();
		assert!(!c3.observed);
		assert_eq!(c3.band(), ReadinessBand::Unobserved);
	}

	#[test]
	fn band_thresholds() {
		assert_eq!(readiness_band(Some(0.7), true), ReadinessBand::High);
		assert_eq!(readiness_band(Some(0.69), true), ReadinessBand::Medium);
		assert_eq!(readiness_band(Some(0.5), true), ReadinessBand::Medium);
		assert_eq!(readiness_band(Some(0.49), true), ReadinessBand::Low);
		assert_eq!(readiness_band(None, true), ReadinessBand::Unobserved);
		// Numeric value present but never directly measured: still neutral.
		assert_eq!(readiness_band(Some(0.9), false), ReadinessBand::Unobserved);
	}

	#[test]
	fn mark_expanded_flags_only_the_target() {
		let mut vm = GraphViewModel::from_response(&live_response()).unwrap();
		vm.mark_expanded("c2");
		assert!(vm.node("c2").unwrap().expanded);
		assert!(!vm.node("c1").unwrap().expanded);
	}
}
