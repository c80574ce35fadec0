//! Browser environment queries used by the particle field shell.

use std::cell::Cell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::surface::Viewport;

/// Current viewport size and device pixel ratio.
pub fn viewport(window: &Window) -> Viewport {
	let width = window
		.inner_width()
		.ok()
		.and_then(|v| v.as_f64())
		.unwrap_or(0.0);
	let height = window
		.inner_height()
		.ok()
		.and_then(|v| v.as_f64())
		.unwrap_or(0.0);
	Viewport::new(width, height, window.device_pixel_ratio())
}

/// Whether the user asked the OS for reduced motion.
pub fn prefers_reduced_motion(window: &Window) -> bool {
	window
		.match_media("(prefers-reduced-motion: reduce)")
		.ok()
		.flatten()
		.is_some_and(|query| query.matches())
}

/// Trailing-edge debounce over `setTimeout`: the wrapped callback runs once
/// the calls have stopped for `wait_ms`.
pub struct Debounced {
	window: Window,
	wait_ms: i32,
	pending: Rc<Cell<Option<i32>>>,
	callback: Closure<dyn FnMut()>,
}

impl Debounced {
	pub fn new(window: Window, wait_ms: i32, mut f: impl FnMut() + 'static) -> Self {
		let pending = Rc::new(Cell::new(None));
		let pending_fire = pending.clone();
		let callback = Closure::new(move || {
			pending_fire.set(None);
			f();
		});
		Self {
			window,
			wait_ms,
			pending,
			callback,
		}
	}

	/// Restart the quiet period.
	pub fn call(&self) {
		if let Some(handle) = self.pending.take() {
			self.window.clear_timeout_with_handle(handle);
		}
		match self
			.window
			.set_timeout_with_callback_and_timeout_and_arguments_0(
				self.callback.as_ref().unchecked_ref(),
				self.wait_ms,
			) {
			Ok(handle) => self.pending.set(Some(handle)),
			Err(e) => warn!("particle field: failed to set debounce timer: {:?}", e),
		}
	}
}
