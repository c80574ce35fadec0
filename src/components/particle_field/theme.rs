//! Colors and visual styles for the particle field.

use serde::Deserialize;

/// RGBA color representation.
///
/// Deserializes from a CSS color string (`#RRGGBB`, `rgb(..)` or `rgba(..)`).
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
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

	/// Scales the existing alpha, e.g. an `rgba(.., 0.5)` style color drawn at 0.4
	/// opacity ends up at 0.2.
	pub fn fade(self, opacity: f64) -> Self {
		Self {
			a: self.a * opacity.clamp(0.0, 1.0),
			..self
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RRGGBB`) and `rgb()`/`rgba()` functional notation.
	pub fn parse(color_str: &str) -> Option<Self> {
		let color_str = color_str.trim();
		if let Some(hex) = color_str.strip_prefix('#') {
			if hex.len() != 6 || !hex.is_ascii() {
				return None;
			}
			let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
			let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
			let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
			Some(Self::rgb(r, g, b))
		} else if color_str.starts_with("rgb") {
			let nums: Vec<&str> = color_str
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.map(str::trim)
				.collect();
			if !(3..=4).contains(&nums.len()) {
				return None;
			}
			let r = nums[0].parse().ok()?;
			let g = nums[1].parse().ok()?;
			let b = nums[2].parse().ok()?;
			let a = match nums.get(3) {
				Some(a) => a.parse::<f64>().ok()?.clamp(0.0, 1.0),
				None => 1.0,
			};
			Some(Self::rgba(r, g, b, a))
		} else {
			None
		}
	}
}

impl TryFrom<String> for Color {
	type Error = String;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::parse(&value).ok_or_else(|| format!("unrecognized color `{value}`"))
	}
}

/// Warm sand accent used by the portfolio for dots and links.
pub const ACCENT: Color = Color::rgb(212, 165, 116);

/// Appearance and motion ranges for individual particles.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ParticleStyle {
	/// Particle color
	pub color: Color,
	/// Maximum speed per axis in pixels/frame; speeds are drawn from `[-speed_max, speed_max]`
	pub speed_max: f64,
	/// Minimum particle radius
	pub size_min: f64,
	/// Maximum particle radius
	pub size_max: f64,
	/// Minimum particle opacity
	pub opacity_min: f64,
	/// Maximum particle opacity
	pub opacity_max: f64,
}

impl Default for ParticleStyle {
	fn default() -> Self {
		Self {
			color: ACCENT,
			speed_max: 0.5,
			size_min: 0.5,
			size_max: 2.5,
			opacity_min: 0.2,
			opacity_max: 0.7,
		}
	}
}

/// Faded lines joining nearby particles.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ConnectionStyle {
	/// Pairs closer than this (pixels) are joined
	pub distance: f64,
	/// Opacity of a line between two coincident particles
	pub max_opacity: f64,
	/// Stroke width in pixels
	pub line_width: f64,
	pub color: Color,
}

impl ConnectionStyle {
	/// Line opacity for a pair `distance` apart, or `None` when too far to connect.
	///
	/// Falls off linearly from `max_opacity` at zero distance to zero at the threshold.
	pub fn opacity(&self, distance: f64) -> Option<f64> {
		if distance < self.distance {
			Some((1.0 - distance / self.distance) * self.max_opacity)
		} else {
			None
		}
	}
}

impl Default for ConnectionStyle {
	fn default() -> Self {
		Self {
			distance: 100.0,
			max_opacity: 0.5,
			line_width: 0.5,
			color: ACCENT,
		}
	}
}
