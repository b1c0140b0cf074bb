//! Visual theming for the connection graph.
//!
//! Colors are split by node kind: permanent notes take their mood's color,
//! AI suggestions share a single faint gold.

use crate::journal::Mood;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
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

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten toward white (0.0 = unchanged, 1.0 = white).
	pub fn lighten(self, factor: f64) -> Self {
		self.lerp(Color::rgba(255, 255, 255, self.a), factor)
	}

	/// Darken toward black (0.0 = unchanged, 1.0 = black).
	pub fn darken(self, factor: f64) -> Self {
		self.lerp(Color::rgba(0, 0, 0, self.a), factor)
	}

	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		let mix = |a: u8, b: u8| (a as f64 * (1.0 - t) + b as f64 * t).round() as u8;
		Self {
			r: mix(self.r, other.r),
			g: mix(self.g, other.g),
			b: mix(self.b, other.b),
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			self.to_css_rgb()
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// One color per mood.
#[derive(Clone, Debug)]
pub struct MoodPalette {
	pub peaceful: Color,
	pub melancholic: Color,
	pub joyful: Color,
	pub anxious: Color,
	pub neutral: Color,
}

impl MoodPalette {
	pub fn color(&self, mood: Mood) -> Color {
		match mood {
			Mood::Peaceful => self.peaceful,
			Mood::Melancholic => self.melancholic,
			Mood::Joyful => self.joyful,
			Mood::Anxious => self.anxious,
			Mood::Neutral => self.neutral,
		}
	}
}

#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	pub color: Color,
	/// Outer color of the radial wash.
	pub color_secondary: Color,
	pub use_gradient: bool,
	/// Vignette intensity (0.0 = none, 1.0 = strong)
	pub vignette: f64,
}

#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Links between saved notes.
	pub color: Color,
	/// Links to suggestions; drawn dashed.
	pub ephemeral_color: Color,
	pub ephemeral_width: f64,
}

#[derive(Clone, Debug)]
pub struct NodeStyle {
	pub use_gradient: bool,
	pub fill_alpha: f64,
	pub ephemeral_color: Color,
	pub ephemeral_fill_alpha: f64,
	/// Blur radius of the suggestion halo, in screen pixels.
	pub ephemeral_glow: f64,
	pub border_width: f64,
	pub border_color: Color,
	pub selection_color: Color,
	/// Breathing amplitude of suggestion halos (0.0 = none).
	pub pulse_intensity: f64,
	pub pulse_speed: f64,
}

#[derive(Clone, Debug)]
pub struct LabelStyle {
	pub color: Color,
	pub ephemeral_color: Color,
	pub font_family: &'static str,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
	pub label: LabelStyle,
	pub moods: MoodPalette,
}

const GOLD: Color = Color::rgb(0xc8, 0xb6, 0x98);

impl Theme {
	/// Rice paper and ink (default).
	pub fn ink() -> Self {
		Self {
			name: "ink",
			background: BackgroundStyle {
				color: Color::rgb(0xf9, 0xf8, 0xf4),
				color_secondary: Color::rgb(0xef, 0xec, 0xe4),
				use_gradient: true,
				vignette: 0.06,
			},
			edge: EdgeStyle {
				color: Color::rgba(0xa1, 0xa1, 0xaa, 0.3),
				ephemeral_color: GOLD.with_alpha(0.6),
				ephemeral_width: 1.5,
			},
			node: NodeStyle {
				use_gradient: false,
				fill_alpha: 0.7,
				ephemeral_color: GOLD,
				ephemeral_fill_alpha: 0.9,
				ephemeral_glow: 8.0,
				border_width: 2.0,
				border_color: Color::rgb(255, 255, 255),
				selection_color: Color::rgb(0x57, 0x57, 0x57),
				pulse_intensity: 0.25,
				pulse_speed: 1.6,
			},
			label: LabelStyle {
				color: Color::rgb(0xa8, 0xa2, 0x9e),
				ephemeral_color: Color::rgb(0xb8, 0x9e, 0x72),
				font_family: "'Noto Serif SC', serif",
			},
			moods: MoodPalette {
				peaceful: Color::rgb(0x64, 0x7d, 0x68),
				melancholic: Color::rgb(0x5f, 0x6b, 0x7a),
				joyful: Color::rgb(0xb0, 0x8a, 0x5a),
				anxious: Color::rgb(0x8c, 0x5e, 0x5e),
				neutral: Color::rgb(0x57, 0x57, 0x57),
			},
		}
	}

	/// Dark ink-stone variant.
	pub fn inkstone() -> Self {
		let base = Self::ink();
		Self {
			name: "inkstone",
			background: BackgroundStyle {
				color: Color::rgb(0x1f, 0x1e, 0x1c),
				color_secondary: Color::rgb(0x14, 0x13, 0x12),
				use_gradient: true,
				vignette: 0.2,
			},
			edge: EdgeStyle {
				color: Color::rgba(0x8a, 0x86, 0x80, 0.35),
				..base.edge
			},
			node: NodeStyle {
				use_gradient: true,
				border_color: Color::rgb(0x1f, 0x1e, 0x1c),
				selection_color: Color::rgb(0xe7, 0xe5, 0xe4),
				..base.node
			},
			label: LabelStyle {
				color: Color::rgb(0x78, 0x71, 0x6c),
				..base.label
			},
			moods: MoodPalette {
				peaceful: base.moods.peaceful.lighten(0.25),
				melancholic: base.moods.melancholic.lighten(0.25),
				joyful: base.moods.joyful.lighten(0.2),
				anxious: base.moods.anxious.lighten(0.25),
				neutral: Color::rgb(0xa8, 0xa2, 0x9e),
			},
		}
	}

	/// Look a theme up by name, falling back to [`Theme::ink`].
	pub fn named(name: &str) -> Self {
		match name {
			"inkstone" => Self::inkstone(),
			_ => Self::ink(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::ink()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output_switches_to_rgba_when_translucent() {
		assert_eq!(GOLD.to_css(), "#c8b698");
		assert_eq!(GOLD.with_alpha(0.5).to_css(), "rgba(200, 182, 152, 0.5)");
	}

	#[test]
	fn every_mood_has_a_distinct_color() {
		let palette = Theme::ink().moods;
		for (i, a) in Mood::ALL.iter().enumerate() {
			for b in &Mood::ALL[i + 1..] {
				assert_ne!(palette.color(*a), palette.color(*b));
			}
		}
	}

	#[test]
	fn unknown_theme_name_is_ink() {
		assert_eq!(Theme::named("sepia").name, "ink");
		assert_eq!(Theme::named("inkstone").name, "inkstone");
	}
}
