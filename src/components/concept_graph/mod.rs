//! Interactive concept readiness graph.
//!
//! Renders an exam's prerequisite concept graph on an HTML canvas with:
//! - Physics-based layout with depth banding (prerequisites above dependents)
//! - Readiness-band node coloring with a neutral color for unobserved nodes
//! - Pan, zoom, and node dragging interactions
//! - Click-to-expand via the backend's AI graph expansion, merged
//!   monotonically into the mounted view

mod component;
mod render;
pub mod scale;
mod state;
pub mod theme;
pub mod view_model;

pub use component::{ConceptGraphCanvas, ExpandPolicy};
pub use theme::Theme;
pub use view_model::{GraphViewModel, ReadinessBand, ViewEdge, ViewNode, readiness_band};
