//! folio-particles: interactive particle background for a portfolio site.
//!
//! This crate provides a WASM canvas component that animates a field of
//! drifting particles, links nearby ones with faded lines, and nudges them
//! away from the mouse pointer.

use leptos::prelude::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{
	Color, FieldConfig, FieldState, ParticleFieldCanvas, ParticleSystem, Pointer, RenderTarget,
	Viewport,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("folio-particles: logging initialized");
}

/// Load field configuration from a script element with id="particle-config".
/// Falls back to defaults when the element is missing or malformed.
fn load_config() -> FieldConfig {
	let Some(json_text) = config_script_text() else {
		return FieldConfig::default();
	};

	match serde_json::from_str::<FieldConfig>(&json_text) {
		Ok(config) => {
			info!(
				"folio-particles: loaded config ({} particles, enabled: {})",
				config.base_count, config.enabled
			);
			config
		}
		Err(e) => {
			warn!("folio-particles: failed to parse particle config: {}", e);
			FieldConfig::default()
		}
	}
}

fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Main application component.
/// Loads the field config from the DOM and renders the particle background.
#[component]
pub fn App() -> impl IntoView {
	let config = load_config();
	let config_signal = Signal::derive(move || config.clone());

	view! { <ParticleFieldCanvas config=config_signal /> }
}
