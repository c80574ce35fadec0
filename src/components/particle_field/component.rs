//! Leptos component hosting the particle field canvas.
//!
//! The component owns the shell side of the field: it acquires the canvas and
//! its 2D context, builds the [`ParticleSystem`], drives it from
//! `requestAnimationFrame`, and maps window events onto it:
//!
//! | event                      | action                      |
//! |----------------------------|-----------------------------|
//! | `mousemove`                | update pointer              |
//! | `mouseout` (leaving page)  | clear pointer               |
//! | `resize` (debounced)       | [`ParticleSystem::resize`]  |
//! | `focus` / `blur`           | start / stop                |
//! | `visibilitychange`         | stop when hidden, else start|
//! | `beforeunload`             | [`ParticleSystem::destroy`] |

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, MouseEvent, Window};

use super::config::FieldConfig;
use super::host::{self, Debounced};
use super::particle::Pointer;
use super::scheduler::{AnimationFrameScheduler, FrameScheduler};
use super::surface::{CanvasSurface, RenderTarget};
use super::system::ParticleSystem;

type CanvasField = ParticleSystem<CanvasSurface, AnimationFrameScheduler>;

/// A registered DOM listener, kept so it can be removed again.
struct Listener {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

/// The field attached to the canvas and the listeners driving it.
///
/// Mounting again tears the previous field down first, so there is never
/// more than one frame loop per canvas.
struct Mount<T, S> {
	field: Option<Rc<RefCell<ParticleSystem<T, S>>>>,
	listeners: Vec<Listener>,
}

impl<T: RenderTarget, S: FrameScheduler> Mount<T, S> {
	fn new() -> Self {
		Self {
			field: None,
			listeners: Vec::new(),
		}
	}

	/// Detach every listener and destroy the current field, if any.
	fn unmount(&mut self) {
		for l in self.listeners.drain(..) {
			if let Err(e) = l
				.target
				.remove_event_listener_with_callback(l.event, l.callback.as_ref().unchecked_ref())
			{
				warn!("particle field: failed to remove {} listener: {:?}", l.event, e);
			}
		}
		if let Some(field) = self.field.take() {
			field.borrow_mut().destroy();
		}
	}

	fn replace(&mut self, field: Rc<RefCell<ParticleSystem<T, S>>>) {
		self.unmount();
		self.field = Some(field);
	}
}

/// Full-viewport animated particle background.
///
/// Renders a fixed canvas behind the page content. Particles are skipped
/// entirely when `config.enabled` is false, when the user prefers reduced
/// motion, or when the browser cannot provide a 2D context.
#[component]
pub fn ParticleFieldCanvas(#[prop(into)] config: Signal<FieldConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let mount: Rc<RefCell<Mount<CanvasSurface, AnimationFrameScheduler>>> =
		Rc::new(RefCell::new(Mount::new()));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		mount.borrow_mut().unmount();

		// Config is read once per mount; the field does not follow later changes.
		let mut config = config.get_untracked();
		if config.enabled && host::prefers_reduced_motion(&window) {
			info!("particle field: reduced motion requested, disabling particles");
			config.enabled = false;
		}
		let debounce_ms = config.resize_debounce_ms;

		let surface = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
			.map(|ctx| CanvasSurface::new(canvas.clone(), ctx));

		let scheduler = AnimationFrameScheduler::new(window.clone());
		let frames = scheduler.clone();
		let seed = js_sys::Date::now() as u64;
		let field = Rc::new(RefCell::new(ParticleSystem::new(config, scheduler, seed)));

		let field_frame = field.clone();
		frames.bind(Closure::new(move || field_frame.borrow_mut().tick()));

		field
			.borrow_mut()
			.initialize(surface, host::viewport(&window));
		if !field.borrow().is_active() {
			return;
		}

		let mut mount = mount.borrow_mut();
		mount.replace(field.clone());
		wire_events(&window, &field, debounce_ms, &mut mount.listeners);
	});

	view! {
		<canvas
			node_ref=canvas_ref
			id="canvas-bg"
			class="particle-field-canvas"
			aria-hidden="true"
			style="position: fixed; inset: 0; display: block; pointer-events: none; z-index: -1;"
		/>
	}
}

fn wire_events(
	window: &Window,
	field: &Rc<RefCell<CanvasField>>,
	debounce_ms: i32,
	listeners: &mut Vec<Listener>,
) {
	let f = field.clone();
	listen(window, "mousemove", listeners, move |ev| {
		if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
			f.borrow_mut().set_pointer(Some(Pointer {
				x: ev.client_x() as f64,
				y: ev.client_y() as f64,
			}));
		}
	});

	let f = field.clone();
	listen(window, "mouseout", listeners, move |ev| {
		let left_page = ev
			.dyn_ref::<MouseEvent>()
			.is_some_and(|ev| ev.related_target().is_none());
		if left_page {
			f.borrow_mut().set_pointer(None);
		}
	});

	let (f, win) = (field.clone(), window.clone());
	let resize = Debounced::new(window.clone(), debounce_ms, move || {
		f.borrow_mut().resize(host::viewport(&win));
	});
	listen(window, "resize", listeners, move |_| resize.call());

	let f = field.clone();
	listen(window, "focus", listeners, move |_| f.borrow_mut().start());

	let f = field.clone();
	listen(window, "blur", listeners, move |_| f.borrow_mut().stop());

	if let Some(document) = window.document() {
		let (f, doc) = (field.clone(), document.clone());
		listen(&document, "visibilitychange", listeners, move |_| {
			if doc.hidden() {
				f.borrow_mut().stop();
			} else {
				f.borrow_mut().start();
			}
		});
	}

	let f = field.clone();
	listen(window, "beforeunload", listeners, move |_| f.borrow_mut().destroy());
}

fn listen(
	target: &EventTarget,
	event: &'static str,
	listeners: &mut Vec<Listener>,
	handler: impl FnMut(Event) + 'static,
) {
	let callback = Closure::<dyn FnMut(Event)>::new(handler);
	match target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
		Ok(()) => listeners.push(Listener {
			target: target.clone(),
			event,
			callback,
		}),
		Err(e) => warn!("particle field: failed to listen for {}: {:?}", event, e),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_field::error::FieldError;
	use crate::components::particle_field::surface::Viewport;
	use crate::components::particle_field::system::FieldState;
	use crate::components::particle_field::theme::Color;

	struct Blank;

	impl RenderTarget for Blank {
		fn resize(&mut self, _viewport: Viewport) -> Result<(), FieldError> {
			Ok(())
		}

		fn clear(&mut self) {}

		fn fill_circle(&mut self, _x: f64, _y: f64, _r: f64, _color: Color) -> Result<(), FieldError> {
			Ok(())
		}

		fn stroke_line(
			&mut self,
			_from: (f64, f64),
			_to: (f64, f64),
			_width: f64,
			_color: Color,
		) -> Result<(), FieldError> {
			Ok(())
		}
	}

	struct Frames;

	impl FrameScheduler for Frames {
		fn request_frame(&mut self) -> Result<(), FieldError> {
			Ok(())
		}
	}

	fn running_field() -> Rc<RefCell<ParticleSystem<Blank, Frames>>> {
		let mut field = ParticleSystem::new(FieldConfig::default(), Frames, 9);
		field.initialize(Some(Blank), Viewport::new(1280.0, 720.0, 1.0));
		Rc::new(RefCell::new(field))
	}

	#[test]
	fn remounting_destroys_previous_field() {
		let mut mount = Mount::new();
		let first = running_field();
		let second = running_field();

		mount.replace(first.clone());
		assert!(first.borrow().is_running());

		mount.replace(second.clone());
		assert_eq!(first.borrow().state(), FieldState::Destroyed);
		assert!(second.borrow().is_running());

		// The old loop's in-flight frame dies out instead of rescheduling.
		first.borrow_mut().tick();
		assert!(first.borrow().particles().is_empty());

		mount.unmount();
		assert_eq!(second.borrow().state(), FieldState::Destroyed);
		assert!(mount.field.is_none());
	}
}
