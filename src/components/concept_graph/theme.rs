//! Visual theming for the concept graph.
//!
//! Node color is policy, not mechanism: it encodes the readiness band
//! (high/medium/low) with a neutral placeholder for unobserved nodes.

use super::view_model::ReadinessBand;

/// RGBA color representation.
#[derive(Clone, Copy, Debug)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Colors for the readiness bands.
#[derive(Clone, Debug)]
pub struct ReadinessPalette {
	pub high: Color,
	pub medium: Color,
	pub low: Color,
	pub unobserved: Color,
}

impl ReadinessPalette {
	pub fn color_for(&self, band: ReadinessBand) -> Color {
		match band {
			ReadinessBand::High => self.high,
			ReadinessBand::Medium => self.medium,
			ReadinessBand::Low => self.low,
			ReadinessBand::Unobserved => self.unobserved,
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
	/// How strongly edge width tracks the prerequisite weight.
	pub weight_emphasis: f64,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether nodes have inner gradients
	pub use_gradient: bool,
	/// Border/stroke width (0 = no border)
	pub border_width: f64,
	pub border_color: Color,
	/// Ring color marking already-expanded nodes.
	pub expanded_ring_color: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
	pub readiness: ReadinessPalette,
	pub label_color: Color,
}

impl Theme {
	/// Dark dashboard theme (default).
	pub fn dark() -> Self {
		Self {
			name: "dark",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
			},
			edge: EdgeStyle {
				color: Color::rgba(140, 160, 180, 0.5),
				weight_emphasis: 1.0,
			},
			node: NodeStyle {
				use_gradient: true,
				border_width: 1.0,
				border_color: Color::rgba(255, 255, 255, 0.25),
				expanded_ring_color: Color::rgba(255, 255, 255, 0.45),
			},
			readiness: ReadinessPalette {
				high: Color::rgb(46, 125, 50),
				medium: Color::rgb(214, 168, 48),
				low: Color::rgb(198, 40, 40),
				unobserved: Color::rgb(117, 117, 117),
			},
			label_color: Color::rgba(255, 255, 255, 0.85),
		}
	}

	/// Light theme for print-friendly embedding.
	pub fn light() -> Self {
		Self {
			name: "light",
			background: BackgroundStyle {
				color: Color::rgb(246, 248, 250),
				color_secondary: Color::rgb(234, 238, 242),
				use_gradient: false,
			},
			edge: EdgeStyle {
				color: Color::rgba(90, 105, 120, 0.6),
				weight_emphasis: 1.0,
			},
			node: NodeStyle {
				use_gradient: false,
				border_width: 1.0,
				border_color: Color::rgba(0, 0, 0, 0.2),
				expanded_ring_color: Color::rgba(0, 0, 0, 0.35),
			},
			readiness: ReadinessPalette {
				high: Color::rgb(56, 142, 60),
				medium: Color::rgb(212, 160, 23),
				low: Color::rgb(211, 47, 47),
				unobserved: Color::rgb(158, 158, 158),
			},
			label_color: Color::rgba(30, 35, 42, 0.9),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::dark()
	}
}
