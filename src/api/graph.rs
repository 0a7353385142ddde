//! Graph retrieval and incremental expansion endpoints.

use serde::{Deserialize, Serialize};

use super::client::{ApiClient, ApiError};

/// Default edge weight when the backend omits one.
pub const DEFAULT_EDGE_WEIGHT: f64 = 0.5;

fn default_weight() -> f64 {
	DEFAULT_EDGE_WEIGHT
}

/// A graph node as sent by the backend.
#[derive(Clone, Debug, Deserialize)]
pub struct WireNode {
	pub id: String,
	pub label: String,
	#[serde(default)]
	pub readiness: Option<f64>,
	/// Whether the node has a directly measured readiness from uploaded
	/// scores, as opposed to one introduced by AI expansion.
	#[serde(default, rename = "is_csv_observed")]
	pub observed: bool,
	#[serde(default)]
	pub depth: u32,
}

/// A directed prerequisite edge: `source` is prerequisite of `target`.
#[derive(Clone, Debug, Deserialize)]
pub struct WireEdge {
	pub source: String,
	pub target: String,
	#[serde(default = "default_weight")]
	pub weight: f64,
}

/// Response of `GET /api/v1/exams/{exam_id}/graph`.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphResponse {
	pub status: String,
	#[serde(default)]
	pub nodes: Vec<WireNode>,
	#[serde(default)]
	pub edges: Vec<WireEdge>,
}

impl GraphResponse {
	/// A usable response: `status == "ok"` and at least one node.
	/// Anything else is a soft failure that triggers the legacy fallback.
	pub fn is_usable(&self) -> bool {
		self.status == "ok" && !self.nodes.is_empty()
	}
}

#[derive(Debug, Serialize)]
struct ExpandRequest<'a> {
	concept_id: &'a str,
	max_depth: u32,
}

/// Response of `POST /api/v1/exams/{exam_id}/graph/expand`.
#[derive(Clone, Debug, Deserialize)]
pub struct ExpandResponse {
	pub status: String,
	#[serde(default)]
	pub new_nodes: Vec<WireNode>,
	#[serde(default)]
	pub new_edges: Vec<WireEdge>,
}

/// Fetch the full concept graph for an exam.
pub async fn get_graph(client: &ApiClient, exam_id: &str) -> Result<GraphResponse, ApiError> {
	client.get(&format!("/api/v1/exams/{exam_id}/graph")).await
}

/// Request AI expansion beneath `concept_id`, bounded to `max_depth`
/// levels of newly discovered prerequisites.
pub async fn expand_node(
	client: &ApiClient,
	exam_id: &str,
	concept_id: &str,
	max_depth: u32,
) -> Result<ExpandResponse, ApiError> {
	client
		.post(
			&format!("/api/v1/exams/{exam_id}/graph/expand"),
			&ExpandRequest {
				concept_id,
				max_depth,
			},
		)
		.await
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn graph_response_decodes_wire_names() {
		let json = r#"{
			"status": "ok",
			"nodes": [
				{"id": "c1", "label": "Limits", "readiness": 0.8, "is_csv_observed": true, "depth": 0},
				{"id": "c2", "label": "Derivatives", "depth": 1}
			],
			"edges": [{"source": "c1", "target": "c2", "weight": 0.7}]
		}"#;
		let resp: GraphResponse = serde_json::from_str(json).unwrap();
		assert!(resp.is_usable());
		assert_eq!(resp.nodes[0].readiness, Some(0.8));
		assert!(resp.nodes[0].observed);
		assert_eq!(resp.nodes[1].readiness, None);
		assert!(!resp.nodes[1].observed);
		assert_eq!(resp.edges[0].weight, 0.7);
	}

	#[test]
	fn missing_weight_defaults() {
		let json = r#"{"source": "a", "target": "b"}"#;
		let edge: WireEdge = serde_json::from_str(json).unwrap();
		assert_eq!(edge.weight, DEFAULT_EDGE_WEIGHT);
	}

	#[test]
	fn error_status_is_not_usable() {
		let resp: GraphResponse =
			serde_json::from_str(r#"{"status": "error", "nodes": [], "edges": []}"#).unwrap();
		assert!(!resp.is_usable());
		let empty: GraphResponse = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
		assert!(!empty.is_usable());
	}

	#[test]
	fn expand_request_serializes_snake_case() {
		let body = ExpandRequest {
			concept_id: "c2",
			max_depth: 2,
		};
		let json = serde_json::to_value(&body).unwrap();
		assert_eq!(json["concept_id"], "c2");
		assert_eq!(json["max_depth"], 2);
	}
}
