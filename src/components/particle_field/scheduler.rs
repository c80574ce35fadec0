//! Frame scheduling for the animation loop.
//!
//! The particle system never drives itself: it asks a [`FrameScheduler`] for
//! the next frame and the host calls [`ParticleSystem::tick`] when that frame
//! arrives. In the browser that is `requestAnimationFrame`; tests fire frames
//! by hand.
//!
//! [`ParticleSystem::tick`]: super::system::ParticleSystem::tick

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::error::FieldError;

/// Requests a single future frame callback.
pub trait FrameScheduler {
	fn request_frame(&mut self) -> Result<(), FieldError>;
}

/// Schedules frames with `window.requestAnimationFrame`.
///
/// Clones share the frame callback, so the component can bind the callback
/// after the scheduler has been moved into the particle system.
#[derive(Clone)]
pub struct AnimationFrameScheduler {
	window: Window,
	callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl AnimationFrameScheduler {
	pub fn new(window: Window) -> Self {
		Self {
			window,
			callback: Rc::new(RefCell::new(None)),
		}
	}

	/// Sets the closure invoked on every requested frame.
	pub fn bind(&self, callback: Closure<dyn FnMut()>) {
		*self.callback.borrow_mut() = Some(callback);
	}
}

impl FrameScheduler for AnimationFrameScheduler {
	fn request_frame(&mut self) -> Result<(), FieldError> {
		let callback = self.callback.borrow();
		let Some(cb) = callback.as_ref() else {
			return Err(FieldError::Schedule("no frame callback bound".into()));
		};
		self.window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.map(|_| ())
			.map_err(FieldError::schedule)
	}
}
