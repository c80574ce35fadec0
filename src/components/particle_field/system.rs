//! The particle field simulation loop.
//!
//! Each tick updates every particle, clears the surface, draws the particles
//! and then joins every pair closer than the connection distance with a faded
//! line. The pair pass is O(n²); the population rule keeps n at or below the
//! configured base count, which is small enough that no spatial index is used.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::FieldConfig;
use super::error::FieldError;
use super::particle::{Particle, Pointer};
use super::scheduler::FrameScheduler;
use super::surface::{RenderTarget, Viewport};

/// Lifecycle of a [`ParticleSystem`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldState {
	/// Constructed, `initialize` not yet called.
	Uninitialized,
	/// Disabled or without a render target; every operation is a no-op.
	Inert,
	Running,
	Stopped,
	/// Torn down for good. Construct a new system to animate again.
	Destroyed,
}

/// Owns the particles, the render target and the frame loop.
///
/// Stopping is cooperative: `stop` only clears the running state, and the
/// frame already requested from the scheduler sees that when it fires and
/// does not request another. At most one frame is ever outstanding.
pub struct ParticleSystem<T, S> {
	config: FieldConfig,
	target: Option<T>,
	scheduler: S,
	rng: SmallRng,
	particles: Vec<Particle>,
	viewport: Viewport,
	pointer: Option<Pointer>,
	state: FieldState,
	frame_pending: bool,
}

impl<T: RenderTarget, S: FrameScheduler> ParticleSystem<T, S> {
	pub fn new(config: FieldConfig, scheduler: S, seed: u64) -> Self {
		Self {
			config,
			target: None,
			scheduler,
			rng: SmallRng::seed_from_u64(seed),
			particles: Vec::new(),
			viewport: Viewport::new(0.0, 0.0, 1.0),
			pointer: None,
			state: FieldState::Uninitialized,
			frame_pending: false,
		}
	}

	/// Attach the render target and start animating.
	///
	/// Without a target, or with particles disabled, the system goes inert
	/// instead and never requests a frame.
	pub fn initialize(&mut self, target: Option<T>, viewport: Viewport) {
		if self.state != FieldState::Uninitialized {
			warn!("particle field: initialize called in state {:?}, ignoring", self.state);
			return;
		}

		let target = match target {
			Some(t) if self.config.enabled => t,
			Some(_) => {
				info!("particle field: disabled, staying inert");
				self.state = FieldState::Inert;
				return;
			}
			None => {
				info!("particle field: no render target, staying inert");
				self.state = FieldState::Inert;
				return;
			}
		};

		self.target = Some(target);
		self.state = FieldState::Stopped;
		self.rebuild(viewport);
		self.start();
	}

	/// Resize the surface to `viewport` and replace every particle with a
	/// freshly randomized population.
	pub fn resize(&mut self, viewport: Viewport) {
		if !self.is_active() {
			return;
		}
		self.rebuild(viewport);
	}

	pub fn start(&mut self) {
		if self.state != FieldState::Stopped {
			return;
		}
		debug!("particle field: start");
		self.state = FieldState::Running;
		// A frame still in flight from before a stop picks the loop back up.
		if !self.frame_pending {
			self.request_frame();
		}
	}

	pub fn stop(&mut self) {
		if self.state == FieldState::Running {
			debug!("particle field: stop");
			self.state = FieldState::Stopped;
		}
	}

	/// Stop for good, drop all particles and wipe the surface.
	pub fn destroy(&mut self) {
		if self.state == FieldState::Destroyed {
			return;
		}
		info!("particle field: destroyed");
		self.state = FieldState::Destroyed;
		self.particles.clear();
		self.pointer = None;
		if let Some(ref mut target) = self.target {
			target.clear();
		}
	}

	/// Latest pointer position, or `None` once it leaves the viewport.
	pub fn set_pointer(&mut self, pointer: Option<Pointer>) {
		self.pointer = pointer;
	}

	/// Run one frame. Called by the host when the requested frame arrives.
	pub fn tick(&mut self) {
		self.frame_pending = false;
		if self.state != FieldState::Running {
			return;
		}

		let (width, height) = (self.viewport.width, self.viewport.height);
		let pointer = self.pointer;
		for particle in &mut self.particles {
			particle.update(width, height, pointer, &self.config.repulsion);
		}

		if let Err(e) = self.render() {
			warn!("particle field: skipped rest of frame: {}", e);
		}

		self.request_frame();
	}

	pub fn state(&self) -> FieldState {
		self.state
	}

	pub fn is_running(&self) -> bool {
		self.state == FieldState::Running
	}

	/// Initialized with a target and not yet destroyed.
	pub fn is_active(&self) -> bool {
		matches!(self.state, FieldState::Running | FieldState::Stopped)
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	pub fn scheduler(&self) -> &S {
		&self.scheduler
	}

	fn rebuild(&mut self, viewport: Viewport) {
		self.viewport = viewport;
		if let Some(ref mut target) = self.target {
			if let Err(e) = target.resize(viewport) {
				warn!("particle field: {}", e);
			}
		}

		let count = self.config.population(viewport.width);
		let style = &self.config.particle;
		let rng = &mut self.rng;
		self.particles = (0..count)
			.map(|_| Particle::new(&mut *rng, style, viewport.width, viewport.height))
			.collect();
		debug!(
			"particle field: {} particles for {}x{} @{}x",
			count, viewport.width, viewport.height, viewport.device_pixel_ratio
		);
	}

	fn request_frame(&mut self) {
		match self.scheduler.request_frame() {
			Ok(()) => self.frame_pending = true,
			Err(e) => {
				warn!("particle field: {}, pausing", e);
				self.state = FieldState::Stopped;
			}
		}
	}

	fn render(&mut self) -> Result<(), FieldError> {
		let Some(ref mut target) = self.target else {
			return Ok(());
		};

		target.clear();
		for particle in &self.particles {
			particle.draw(&mut *target)?;
		}
		draw_connections(target, &self.particles, &self.config)
	}
}

fn draw_connections<T: RenderTarget + ?Sized>(
	target: &mut T,
	particles: &[Particle],
	config: &FieldConfig,
) -> Result<(), FieldError> {
	let style = &config.connection;
	for (i, a) in particles.iter().enumerate() {
		for b in &particles[i + 1..] {
			if let Some(opacity) = style.opacity(a.distance_to(b)) {
				target.stroke_line(
					(a.x, a.y),
					(b.x, b.y),
					style.line_width,
					style.color.fade(opacity),
				)?;
			}
		}
	}
	Ok(())
}
