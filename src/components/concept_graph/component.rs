//! Leptos component wrapping the concept graph canvas.
//!
//! The component creates an HTML canvas, fetches the exam graph on
//! mount (falling back to legacy concept data when the backend has
//! nothing usable), and wires up mouse handlers for dragging, panning,
//! zooming, and click-to-expand. An animation loop runs via
//! `requestAnimationFrame`, advancing the simulation and rendering each
//! frame.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::scale::ScaleConfig;
use super::state::{CLICK_SLOP_PX, ConceptGraphState};
use super::theme::Theme;
use super::view_model::GraphViewModel;
use crate::api::{ApiClient, graph};
use crate::model::Concept;

/// What to do with an expansion request that arrives while another is
/// still in flight. Expansions are never run concurrently either way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExpandPolicy {
	/// Ignore the second request entirely.
	#[default]
	DropIfBusy,
	/// Remember the most recent request and run it once the current
	/// expansion finishes. Earlier queued requests are overwritten.
	QueueLatest,
}

/// Bundles the view-model and simulation state with visual configuration.
struct GraphContext {
	state: ConceptGraphState,
	vm: GraphViewModel,
	scale: ScaleConfig,
	theme: Theme,
}

/// Renders an interactive concept readiness graph on a canvas element.
///
/// The graph for `exam_id` is fetched on mount; when the fetch fails or
/// returns no nodes, the `legacy_concepts` signal supplies fallback
/// data. Clicking a node requests AI expansion beneath it, bounded to
/// `max_expand_depth` newly discovered levels.
#[component]
pub fn ConceptGraphCanvas(
	client: ApiClient,
	exam_id: String,
	#[prop(into)] legacy_concepts: Signal<Vec<Concept>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(default = 2)] max_expand_depth: u32,
	#[prop(default = ExpandPolicy::default())] expand_policy: ExpandPolicy,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let loading = RwSignal::new(true);

	// Guard against state writes from fetches resolving after unmount.
	let alive: Arc<AtomicBool> = Arc::new(AtomicBool::new(true));
	{
		let alive = alive.clone();
		on_cleanup(move || alive.store(false, Ordering::Relaxed));
	}

	// Expansion serialization: one in flight per graph instance.
	let expanding: Rc<Cell<bool>> = Rc::new(Cell::new(false));
	let pending: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));

	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());
	let (client_init, exam_init, alive_init) = (client.clone(), exam_id.clone(), alive.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		let theme = Theme::default();
		let vm = GraphViewModel::default();
		*context_init.borrow_mut() = Some(GraphContext {
			state: ConceptGraphState::new(&vm, w, h, &theme),
			vm,
			scale: ScaleConfig::default(),
			theme,
		});

		// Fetch the live graph; fall back to legacy concepts on any
		// failure or an empty result.
		{
			let (client, exam_id) = (client_init.clone(), exam_init.clone());
			let (context, alive) = (context_init.clone(), alive_init.clone());
			let concepts = legacy_concepts.get_untracked();
			spawn_local(async move {
				let vm = match graph::get_graph(&client, &exam_id).await {
					Ok(resp) => match GraphViewModel::from_response(&resp) {
						Some(vm) => vm,
						None => {
							log::warn!(
								"graph for exam {exam_id} unusable (status {}), using legacy concepts",
								resp.status
							);
							GraphViewModel::from_concepts(&concepts)
						}
					},
					Err(e) => {
						log::warn!("graph fetch for exam {exam_id} failed: {e}, using legacy concepts");
						GraphViewModel::from_concepts(&concepts)
					}
				};
				if !alive.load(Ordering::Relaxed) {
					return;
				}
				if let Some(ref mut c) = *context.borrow_mut() {
					c.vm = vm;
					c.state.sync(&c.vm, &c.theme);
				}
				loading.set(false);
			});
		}

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner, alive_anim) = (
			context_init.clone(),
			animate_init.clone(),
			alive_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !alive_anim.load(Ordering::Relaxed) {
				return;
			}
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				let dt = 0.016;
				if c.state.animation_running {
					c.state.tick(dt);
				}
				render::render(&c.state, &ctx, &c.scale, &c.theme);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_md.borrow_mut() {
			if let Some(idx) = c.state.node_at_position(x, y, &c.scale) {
				c.state.drag.active = true;
				c.state.drag.node_idx = Some(idx);
				c.state.drag.start_x = x;
				c.state.drag.start_y = y;
				c.state.drag.moved = false;
				c.state.graph.visit_nodes(|node| {
					if node.index() == idx {
						c.state.drag.node_start_x = node.x();
						c.state.drag.node_start_y = node.y();
					}
				});
			} else {
				c.state.pan.active = true;
				c.state.pan.start_x = x;
				c.state.pan.start_y = y;
				c.state.pan.transform_start_x = c.state.transform.x;
				c.state.pan.transform_start_y = c.state.transform.y;
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if !c.state.drag.active {
				c.state.hovered = c.state.node_at_position(x, y, &c.scale);
			}

			if c.state.drag.active {
				let (sx, sy) = (x - c.state.drag.start_x, y - c.state.drag.start_y);
				if (sx * sx + sy * sy).sqrt() > CLICK_SLOP_PX {
					c.state.drag.moved = true;
				}
				if c.state.drag.moved {
					if let Some(idx) = c.state.drag.node_idx {
						let (dx, dy) = (sx / c.state.transform.k, sy / c.state.transform.k);
						let (nx, ny) = (
							c.state.drag.node_start_x + dx as f32,
							c.state.drag.node_start_y + dy as f32,
						);
						c.state.graph.visit_nodes_mut(|node| {
							if node.index() == idx {
								node.data.x = nx;
								node.data.y = ny;
								node.data.is_anchor = true;
							}
						});
					}
				}
			} else if c.state.pan.active {
				c.state.transform.x = c.state.pan.transform_start_x + (x - c.state.pan.start_x);
				c.state.transform.y = c.state.pan.transform_start_y + (y - c.state.pan.start_y);
			}
		}
	};

	let context_mu = context.clone();
	let (client_mu, exam_mu, alive_mu) = (client.clone(), exam_id.clone(), alive.clone());
	let (expanding_mu, pending_mu) = (expanding.clone(), pending.clone());
	let on_mouseup = move |_: MouseEvent| {
		let mut clicked: Option<String> = None;

		if let Some(ref mut c) = *context_mu.borrow_mut() {
			if c.state.drag.active {
				if let Some(idx) = c.state.drag.node_idx {
					if c.state.drag.moved {
						// A real drag pins the node where the user left it.
						c.state.graph.visit_nodes_mut(|node| {
							if node.index() == idx {
								node.data.is_anchor = true;
							}
						});
					} else {
						clicked = c.state.node_id(idx);
					}
				}
			}
			c.state.drag.active = false;
			c.state.drag.node_idx = None;
			c.state.pan.active = false;
		}

		let Some(concept_id) = clicked else {
			return;
		};
		// Already-expanded nodes are inert; re-expansion is a no-op anyway.
		{
			let ctx = context_mu.borrow();
			if let Some(ref c) = *ctx {
				if c.vm.node(&concept_id).is_none_or(|n| n.expanded) {
					return;
				}
			}
		}

		if expanding_mu.get() {
			match expand_policy {
				ExpandPolicy::DropIfBusy => return,
				ExpandPolicy::QueueLatest => {
					*pending_mu.borrow_mut() = Some(concept_id);
					return;
				}
			}
		}
		expanding_mu.set(true);
		spawn_local(run_expansion(
			client_mu.clone(),
			exam_mu.clone(),
			concept_id,
			max_expand_depth,
			context_mu.clone(),
			alive_mu.clone(),
			expanding_mu.clone(),
			pending_mu.clone(),
		));
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.drag.active = false;
			c.state.drag.node_idx = None;
			c.state.pan.active = false;
			c.state.hovered = None;
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (c.state.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / c.state.transform.k;
			c.state.transform.x = x - (x - c.state.transform.x) * ratio;
			c.state.transform.y = y - (y - c.state.transform.y) * ratio;
			c.state.transform.k = new_k;
		}
	};

	view! {
		<div class="concept-graph" style="position: relative;">
			<canvas
				node_ref=canvas_ref
				class="concept-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			{move || {
				loading.get().then(|| {
					view! { <div class="concept-graph-loading">"Loading graph..."</div> }
				})
			}}
		</div>
	}
}

/// Run one expansion, then drain any request queued under
/// [`ExpandPolicy::QueueLatest`]. Failures are swallowed with a debug
/// log: the AI expansion is best-effort and its absence is the only
/// user-visible signal.
#[allow(clippy::too_many_arguments)]
async fn run_expansion(
	client: ApiClient,
	exam_id: String,
	first: String,
	max_depth: u32,
	context: Rc<RefCell<Option<GraphContext>>>,
	alive: Arc<AtomicBool>,
	expanding: Rc<Cell<bool>>,
	pending: Rc<RefCell<Option<String>>>,
) {
	let mut target = first;
	loop {
		match graph::expand_node(&client, &exam_id, &target, max_depth).await {
			Ok(resp) if resp.status == "ok" => {
				if !alive.load(Ordering::Relaxed) {
					break;
				}
				if let Some(ref mut c) = *context.borrow_mut() {
					c.vm.merge_expansion(&resp);
					c.vm.mark_expanded(&target);
					c.state.sync(&c.vm, &c.theme);
				}
			}
			Ok(resp) => {
				log::debug!("expansion of {target} declined: status {}", resp.status);
			}
			Err(e) => {
				log::debug!("expansion of {target} unavailable: {e}");
			}
		}
		if !alive.load(Ordering::Relaxed) {
			break;
		}
		match pending.borrow_mut().take() {
			Some(next) => target = next,
			None => break,
		}
	}
	expanding.set(false);
}
