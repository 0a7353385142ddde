//! Student report retrieval.
//!
//! Two access paths: token-based links handed to students (no auth) and
//! instructor-side lookups by exam and student id (authenticated).

use serde::Deserialize;

use super::client::{ApiClient, ApiError};

/// Per-concept readiness entry of a student report.
#[derive(Clone, Debug, Deserialize)]
pub struct ConceptReadiness {
	pub concept_id: String,
	pub concept_label: String,
	#[serde(default)]
	pub direct_readiness: Option<f64>,
	pub final_readiness: f64,
	pub confidence: String,
}

/// One of the report's weakest concepts.
#[derive(Clone, Debug, Deserialize)]
pub struct WeakConcept {
	pub concept_id: String,
	pub concept_label: String,
	pub readiness: f64,
	pub confidence: String,
}

/// A backend-built study plan entry, with the human-readable reasoning
/// the server attaches.
#[derive(Clone, Debug, Deserialize)]
pub struct ReportPlanItem {
	pub concept_id: String,
	pub concept_label: String,
	pub readiness: f64,
	pub confidence: String,
	pub reason: String,
	pub explanation: String,
}

/// A full student report payload.
#[derive(Clone, Debug, Deserialize)]
pub struct StudentReport {
	pub student_id: String,
	pub exam_id: String,
	#[serde(default)]
	pub readiness: Vec<ConceptReadiness>,
	#[serde(default)]
	pub top_weak_concepts: Vec<WeakConcept>,
	#[serde(default)]
	pub study_plan: Vec<ReportPlanItem>,
}

/// Fetch a report through a student's share token. Deliberately
/// unauthenticated: the token is the credential.
pub async fn get_report_by_token(
	client: &ApiClient,
	token: &str,
) -> Result<StudentReport, ApiError> {
	client.get_public(&format!("/api/v1/reports/{token}")).await
}

/// List the report tokens issued for an exam.
pub async fn list_report_tokens(
	client: &ApiClient,
	exam_id: &str,
) -> Result<Vec<String>, ApiError> {
	client
		.get(&format!("/api/v1/exams/{exam_id}/reports/tokens"))
		.await
}

/// List student ids with computed results for an exam.
pub async fn list_students(client: &ApiClient, exam_id: &str) -> Result<Vec<String>, ApiError> {
	client.get(&format!("/api/v1/exams/{exam_id}/students")).await
}

/// Instructor-side report lookup for one student.
pub async fn get_student_report(
	client: &ApiClient,
	exam_id: &str,
	student_id: &str,
) -> Result<StudentReport, ApiError> {
	client
		.get(&format!("/api/v1/exams/{exam_id}/students/{student_id}/report"))
		.await
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn report_decodes_with_optional_sections_absent() {
		let json = r#"{"student_id": "s1", "exam_id": "e1"}"#;
		let report: StudentReport = serde_json::from_str(json).unwrap();
		assert_eq!(report.student_id, "s1");
		assert!(report.readiness.is_empty());
		assert!(report.study_plan.is_empty());
	}

	#[test]
	fn report_decodes_full_payload() {
		let json = r#"{
			"student_id": "s1",
			"exam_id": "e1",
			"readiness": [
				{"concept_id": "c1", "concept_label": "Limits",
				 "direct_readiness": null, "final_readiness": 0.35, "confidence": "low"}
			],
			"top_weak_concepts": [
				{"concept_id": "c1", "concept_label": "Limits", "readiness": 0.35, "confidence": "low"}
			],
			"study_plan": [
				{"concept_id": "c1", "concept_label": "Limits", "readiness": 0.35,
				 "confidence": "low", "reason": "Below mastery threshold",
				 "explanation": "Your readiness for this concept is 0.35."}
			]
		}"#;
		let report: StudentReport = serde_json::from_str(json).unwrap();
		assert_eq!(report.readiness[0].direct_readiness, None);
		assert_eq!(report.top_weak_concepts.len(), 1);
		assert_eq!(report.study_plan[0].reason, "Below mastery threshold");
	}
}
