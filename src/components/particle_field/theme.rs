//! Visual theming for the particle field.
//!
//! Provides the two particle colors, the tone used for mixed-color
//! connections, and the trail overlay color.

use super::types::Tint;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// An opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// A color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// The same color at opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS color string; hex when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			self.to_css_rgb()
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// CSS hex string, ignoring alpha.
	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// Complete visual theme.
///
/// Themes are picked by preset name; see [`Theme::by_name`].
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
	/// Preset name.
	pub name: String,
	/// Fill for [`Tint::Primary`] particles and their same-tint connections.
	pub primary: Color,
	/// Fill for [`Tint::Secondary`] particles and their same-tint connections.
	pub secondary: Color,
	/// Line color for connections between particles of different tints.
	/// Its own alpha scales the distance-based line opacity.
	pub mixed_line: Color,
	/// Overlay painted every frame; the trail alpha comes from the config.
	pub trail: Color,
}

impl Theme {
	/// Teal and violet on black (default)
	pub fn default_theme() -> Self {
		Self {
			name: "aurora".to_string(),
			primary: Color::rgb(100, 255, 218),
			secondary: Color::rgb(189, 147, 249),
			mixed_line: Color::rgba(100, 100, 120, 0.5),
			trail: Color::rgb(0, 0, 0),
		}
	}

	/// Warm amber and rust
	pub fn ember() -> Self {
		Self {
			name: "ember".to_string(),
			primary: Color::rgb(255, 183, 77),
			secondary: Color::rgb(230, 110, 80),
			mixed_line: Color::rgba(120, 90, 80, 0.5),
			trail: Color::rgb(0, 0, 0),
		}
	}

	/// Look up a preset by name.
	pub fn by_name(name: &str) -> Option<Self> {
		match name {
			"aurora" | "default" => Some(Self::default_theme()),
			"ember" => Some(Self::ember()),
			_ => None,
		}
	}

	/// Fill color for `tint`.
	pub fn tint(&self, tint: Tint) -> Color {
		match tint {
			Tint::Primary => self.primary,
			Tint::Secondary => self.secondary,
		}
	}

	/// Line color for a connection between two tints.
	pub fn connection(&self, a: Tint, b: Tint) -> Color {
		if a == b {
			self.tint(a)
		} else {
			self.mixed_line
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}
