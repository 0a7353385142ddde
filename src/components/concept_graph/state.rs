//! Force simulation state for the concept graph.
//!
//! Wraps the `force_graph` physics simulation with per-node display
//! metadata, a pan/zoom view transform, and interaction tracking. The
//! state is owned by one mounted graph component and synced from its
//! [`GraphViewModel`](super::view_model::GraphViewModel) whenever nodes
//! or edges are added; sync is incremental, existing nodes keep their
//! simulated positions.

use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::scale::{ScaleConfig, ScaledValues};
use super::theme::Theme;
use super::view_model::GraphViewModel;

/// Vertical distance between consecutive depth bands, in world units.
const DEPTH_BAND_HEIGHT: f64 = 110.0;

/// Screen offset of depth band 0 from the canvas top, in pixels.
const DEPTH_BAND_TOP: f64 = 80.0;

/// Strength of the per-tick pull towards a node's depth band.
const DEPTH_PULL: f64 = 1.6;

/// Strength of the horizontal pull towards the canvas center line.
const CENTER_PULL: f64 = 0.4;

/// Screen-space distance below which a mouseup still counts as a click.
pub const CLICK_SLOP_PX: f64 = 4.0;

/// Per-node display metadata attached to each node in the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	/// View-model id, used to route click-to-expand requests.
	pub id: String,
	pub label: String,
	/// CSS color resolved from the readiness band.
	pub color: String,
	/// Whether the node has already been expanded.
	pub expanded: bool,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
	/// Whether the pointer moved past the click slop since mousedown.
	pub moved: bool,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Core graph state combining physics simulation with interaction
/// tracking. Created when the component mounts, then mutated each frame
/// by the animation loop.
pub struct ConceptGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	/// Currently hovered node, for the pointer cursor and label emphasis.
	pub hovered: Option<DefaultNodeIdx>,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	id_to_idx: HashMap<String, DefaultNodeIdx>,
	edge_keys: HashSet<(String, String)>,
	/// Edge list with prerequisite weights, in insertion order.
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx, f64)>,
	/// Target band y for the depth pull, per node.
	depth_target: HashMap<DefaultNodeIdx, f64>,
}

impl ConceptGraphState {
	pub fn new(vm: &GraphViewModel, width: f64, height: f64, theme: &Theme) -> Self {
		let graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let mut state = Self {
			graph,
			// World origin is the center of depth band 0; the transform
			// puts it at the horizontal center of the canvas.
			transform: ViewTransform {
				x: width / 2.0,
				y: DEPTH_BAND_TOP,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hovered: None,
			width,
			height,
			animation_running: true,
			id_to_idx: HashMap::new(),
			edge_keys: HashSet::new(),
			edges: Vec::new(),
			depth_target: HashMap::new(),
		};
		state.sync(vm, theme);
		state
	}

	/// Bring the simulation up to date with the view-model.
	///
	/// Adds nodes and edges not yet present; never removes or repositions
	/// existing ones, so expansion keeps layout continuity. Expanded flags
	/// are refreshed on every call.
	pub fn sync(&mut self, vm: &GraphViewModel, theme: &Theme) {
		for node in vm.nodes() {
			if self.id_to_idx.contains_key(&node.id) {
				continue;
			}
			let (x, y) = seeded_position(&node.id, node.depth);
			let idx = self.graph.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color: theme.readiness.color_for(node.band()).to_css(),
					expanded: node.expanded,
				},
			});
			self.id_to_idx.insert(node.id.clone(), idx);
			self.depth_target.insert(idx, band_y(node.depth));
		}

		for edge in vm.edges() {
			let key = (edge.source.clone(), edge.target.clone());
			if self.edge_keys.contains(&key) {
				continue;
			}
			if let (Some(&src), Some(&tgt)) = (
				self.id_to_idx.get(&edge.source),
				self.id_to_idx.get(&edge.target),
			) {
				self.graph.add_edge(src, tgt, EdgeData::default());
				self.edge_keys.insert(key);
				self.edges.push((src, tgt, edge.weight));
			}
		}

		let expanded: HashSet<&str> = vm
			.nodes()
			.iter()
			.filter(|n| n.expanded)
			.map(|n| n.id.as_str())
			.collect();
		self.graph.visit_nodes_mut(|node| {
			node.data.user_data.expanded = expanded.contains(node.data.user_data.id.as_str());
		});
	}

	/// Edge list with weights, for rendering.
	pub fn weighted_edges(&self) -> &[(DefaultNodeIdx, DefaultNodeIdx, f64)] {
		&self.edges
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < scale.hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// View-model id of a simulation node.
	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.id.clone());
			}
		});
		found
	}

	/// Advance the physics one step, then pull every free node towards
	/// its depth band (so the prerequisite hierarchy reads top-to-bottom)
	/// and weakly towards the horizontal center line.
	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		let targets = &self.depth_target;
		let depth_pull = DEPTH_PULL * dt as f64;
		let center_pull = CENTER_PULL * dt as f64;
		self.graph.visit_nodes_mut(|node| {
			if node.data.is_anchor {
				return;
			}
			if let Some(&target) = targets.get(&node.index()) {
				let dy = target - node.data.y as f64;
				node.data.y += (dy * depth_pull) as f32;
			}
			node.data.x -= (node.data.x as f64 * center_pull) as f32;
		});
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

/// World-space y of a depth band. Band 0 sits at the origin.
fn band_y(depth: u32) -> f64 {
	depth as f64 * DEPTH_BAND_HEIGHT
}

/// Initial position: the node's depth band plus bounded deterministic
/// jitter, keyed on the id so layout is reproducible across mounts.
fn seeded_position(id: &str, depth: u32) -> (f64, f64) {
	let seed = id.bytes().fold(0.0_f64, |acc, b| acc * 1.7 + b as f64);
	let x = (pseudo_random(seed * 1.1) - 0.5) * 300.0;
	let y = band_y(depth) + (pseudo_random(seed * 2.3) - 0.5) * 40.0;
	(x, y)
}

/// Simple pseudo-random function (deterministic)
fn pseudo_random(seed: f64) -> f64 {
	let x = (seed * 12.9898 + seed * 78.233).sin() * 43758.5453;
	x - x.floor()
}
