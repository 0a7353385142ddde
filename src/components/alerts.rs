//! Intervention alert list.

use leptos::prelude::*;

use crate::model::{Alert, alert};

/// Renders intervention alerts ordered by severity, then impact.
#[component]
pub fn AlertsPanel(#[prop(into)] alerts: Signal<Vec<Alert>>) -> impl IntoView {
	let ordered = Memo::new(move |_| {
		let mut list = alerts.get();
		alert::sort_for_display(&mut list);
		list
	});

	view! {
		<div class="alerts-panel">
			<h2>"Alerts"</h2>
			{move || {
				let list = ordered.get();
				if list.is_empty() {
					view! { <p class="alerts-empty">"No active alerts."</p> }.into_any()
				} else {
					view! {
						<ul class="alerts-list">
							{list
								.into_iter()
								.map(|a| {
									let severity = a.severity.as_str();
									view! {
										<li class=format!("alert-item severity-{severity}")>
											<span class="alert-concept">{a.concept_name}</span>
											<span class="alert-severity">{severity}</span>
											<span class="alert-students">
												{format!("{} students", a.students_affected)}
											</span>
											<span class="alert-message">{a.message}</span>
										</li>
									}
								})
								.collect_view()}
						</ul>
					}
						.into_any()
				}
			}}
		</div>
	}
}
