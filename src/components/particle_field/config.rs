//! Tunables for the particle field.
//!
//! Every field has a default, so a page can override any subset through the
//! JSON config script and leave the rest alone.

use serde::Deserialize;

use super::theme::{ConnectionStyle, ParticleStyle};

/// Pointer repulsion: particles within `radius` of the pointer are pushed away.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RepulsionConfig {
	/// Repulsion radius in pixels.
	pub radius: f64,
	/// Displacement (pixels/frame) applied to a particle sitting right at the pointer.
	pub strength: f64,
}

impl Default for RepulsionConfig {
	fn default() -> Self {
		Self {
			radius: 150.0,
			strength: 5.0,
		}
	}
}

/// Complete particle field configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Whether the particle background runs at all.
	pub enabled: bool,
	/// Particle count on desktop-sized viewports.
	pub base_count: usize,
	/// Viewports narrower than this (CSS pixels) get half the particles.
	pub mobile_breakpoint: f64,
	/// Quiet period before a window resize rebuilds the field.
	pub resize_debounce_ms: i32,
	pub repulsion: RepulsionConfig,
	pub particle: ParticleStyle,
	pub connection: ConnectionStyle,
}

impl FieldConfig {
	/// Number of particles to create for a viewport `width` CSS pixels wide.
	pub fn population(&self, width: f64) -> usize {
		if width < self.mobile_breakpoint {
			self.base_count / 2
		} else {
			self.base_count
		}
	}
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			base_count: 100,
			mobile_breakpoint: 768.0,
			resize_debounce_ms: 250,
			repulsion: RepulsionConfig::default(),
			particle: ParticleStyle::default(),
			connection: ConnectionStyle::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_field::theme::Color;

	#[test]
	fn population_halves_on_small_viewports() {
		let config = FieldConfig::default();
		assert_eq!(config.population(1920.0), 100);
		assert_eq!(config.population(768.0), 100);
		assert_eq!(config.population(375.0), 50);

		let odd = FieldConfig {
			base_count: 75,
			..FieldConfig::default()
		};
		assert_eq!(odd.population(375.0), 37);
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let config: FieldConfig = serde_json::from_str(
			r##"{
				"base_count": 60,
				"repulsion": { "radius": 90 },
				"connection": { "color": "rgba(255, 255, 255, 0.8)" }
			}"##,
		)
		.unwrap();

		assert!(config.enabled);
		assert_eq!(config.base_count, 60);
		assert_eq!(config.repulsion.radius, 90.0);
		assert_eq!(config.repulsion.strength, 5.0);
		assert_eq!(config.connection.distance, 100.0);
		assert_eq!(config.connection.color, Color::rgba(255, 255, 255, 0.8));
		assert_eq!(config.particle.color, Color::rgb(212, 165, 116));
	}

	#[test]
	fn rejects_unparseable_colors() {
		let result = serde_json::from_str::<FieldConfig>(r#"{ "particle": { "color": "blue-ish" } }"#);
		assert!(result.is_err());
	}
}
