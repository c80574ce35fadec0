//! Error type for the particle field.
//!
//! Nothing here is fatal: callers log these and keep going.

use std::fmt;

use wasm_bindgen::JsValue;

/// Failures surfaced by the render target or the frame scheduler.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
	/// A canvas draw call was rejected.
	Draw(String),
	/// The host refused to schedule an animation frame.
	Schedule(String),
	/// The render surface could not be sized or configured.
	Surface(String),
}

impl FieldError {
	pub(crate) fn draw(err: JsValue) -> Self {
		FieldError::Draw(describe(&err))
	}

	pub(crate) fn schedule(err: JsValue) -> Self {
		FieldError::Schedule(describe(&err))
	}

	pub(crate) fn surface(err: JsValue) -> Self {
		FieldError::Surface(describe(&err))
	}
}

fn describe(err: &JsValue) -> String {
	err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

impl fmt::Display for FieldError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldError::Draw(msg) => write!(f, "canvas draw call failed: {}", msg),
			FieldError::Schedule(msg) => write!(f, "failed to request animation frame: {}", msg),
			FieldError::Surface(msg) => write!(f, "failed to configure render surface: {}", msg),
		}
	}
}

impl std::error::Error for FieldError {}
