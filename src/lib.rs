//! ConceptLens: prerequisite-concept readiness dashboard.
//!
//! This crate is the WASM front-end of an exam analytics service. It
//! renders the concept prerequisite graph with readiness coloring and
//! click-to-expand, derives per-student study plans client-side, and
//! lists intervention alerts. All scoring is computed by the backend;
//! this crate fetches, derives presentation state, and draws.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod api;
pub mod components;
pub mod model;

pub use api::{ApiClient, ApiError};
pub use components::concept_graph::{ConceptGraphCanvas, ExpandPolicy, GraphViewModel};
pub use model::{Alert, Concept, Student};

use components::alerts::AlertsPanel;
use components::study_plan::StudyPlanPanel;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("concept-lens: logging initialized");
}

/// Host-page bootstrap data: backend location, exam selection, and the
/// legacy concept/student/alert arrays used when the backend has no
/// computed graph yet.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Bootstrap {
	/// Backend base URL; empty means same-origin.
	#[serde(default)]
	pub api_base: String,
	#[serde(default)]
	pub exam_id: String,
	/// Instructor bearer token, absent for public report views.
	#[serde(default)]
	pub auth_token: Option<String>,
	#[serde(default)]
	pub concepts: Vec<Concept>,
	#[serde(default)]
	pub students: Vec<Student>,
	#[serde(default)]
	pub alerts: Vec<Alert>,
}

/// Load bootstrap data from a script element with id="conceptlens-bootstrap".
/// Expected format: JSON matching [`Bootstrap`].
fn load_bootstrap() -> Option<Bootstrap> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("conceptlens-bootstrap")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<Bootstrap>(&json_text) {
		Ok(data) => {
			info!(
				"concept-lens: bootstrap loaded, exam {}, {} concepts, {} students",
				data.exam_id,
				data.concepts.len(),
				data.students.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("concept-lens: failed to parse bootstrap data: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads bootstrap data from the DOM and renders the readiness dashboard.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let bootstrap = load_bootstrap().unwrap_or_default();
	let client = match &bootstrap.auth_token {
		Some(token) => ApiClient::new(bootstrap.api_base.clone()).with_token(token.clone()),
		None => ApiClient::new(bootstrap.api_base.clone()),
	};

	let concepts = RwSignal::new(bootstrap.concepts);
	let alerts = RwSignal::new(bootstrap.alerts);
	// Single-student report views bootstrap exactly one student.
	let student = RwSignal::new(bootstrap.students.first().cloned());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="ConceptLens" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<ConceptGraphCanvas
				client=client
				exam_id=bootstrap.exam_id
				legacy_concepts=concepts
				fullscreen=true
			/>
			<div class="graph-overlay">
				<h1>"ConceptLens"</h1>
				<p class="subtitle">
					"Click a concept to reveal its prerequisites. Drag nodes to reposition. Scroll to zoom."
				</p>
				<StudyPlanPanel student=student concepts=concepts />
				<AlertsPanel alerts=alerts />
			</div>
		</div>
	}
}
