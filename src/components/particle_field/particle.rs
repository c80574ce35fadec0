//! A single drifting particle and its response to the pointer.

use rand::Rng;

use super::config::RepulsionConfig;
use super::error::FieldError;
use super::surface::RenderTarget;
use super::theme::{Color, ParticleStyle};

/// Pointer position in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
	pub x: f64,
	pub y: f64,
}

/// A single floating particle.
#[derive(Clone, Debug)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub speed_x: f64,
	pub speed_y: f64,
	pub size: f64,
	pub opacity: f64,
	pub color: Color,
}

impl Particle {
	/// Random particle somewhere inside a `width` x `height` viewport.
	pub fn new<R: Rng + ?Sized>(rng: &mut R, style: &ParticleStyle, width: f64, height: f64) -> Self {
		Self {
			x: sample(rng, 0.0, width),
			y: sample(rng, 0.0, height),
			speed_x: sample(rng, -style.speed_max, style.speed_max),
			speed_y: sample(rng, -style.speed_max, style.speed_max),
			size: sample(rng, style.size_min, style.size_max),
			opacity: sample(rng, style.opacity_min, style.opacity_max),
			color: style.color,
		}
	}

	/// Advance one frame: drift, bounce off the viewport edges, then get
	/// pushed away from the pointer if it is close enough.
	///
	/// Edges reflect velocity without clamping position, so a particle may sit
	/// just outside the viewport for the frame in which it turns around. Only
	/// outward motion is reflected: a particle the pointer shoved past an edge
	/// keeps heading back in instead of flipping every frame.
	pub fn update(
		&mut self,
		width: f64,
		height: f64,
		pointer: Option<Pointer>,
		repulsion: &RepulsionConfig,
	) {
		self.x += self.speed_x;
		self.y += self.speed_y;

		if (self.x < 0.0 && self.speed_x < 0.0) || (self.x > width && self.speed_x > 0.0) {
			self.speed_x = -self.speed_x;
		}
		if (self.y < 0.0 && self.speed_y < 0.0) || (self.y > height && self.speed_y > 0.0) {
			self.speed_y = -self.speed_y;
		}

		if let Some((dx, dy)) = pointer.and_then(|p| self.repulsion(p, repulsion)) {
			self.x += dx;
			self.y += dy;
		}
	}

	/// Offset that pushes this particle away from `pointer`, or `None` when the
	/// pointer is out of range or exactly on top of the particle.
	pub fn repulsion(&self, pointer: Pointer, config: &RepulsionConfig) -> Option<(f64, f64)> {
		let (dx, dy) = (self.x - pointer.x, self.y - pointer.y);
		let distance = (dx * dx + dy * dy).sqrt();
		// A coincident pointer has no direction to push along.
		if !(distance > 0.0 && distance < config.radius) {
			return None;
		}

		let force = (config.radius - distance) / config.radius;
		let push = force * config.strength / distance;
		Some((dx * push, dy * push))
	}

	pub fn draw<T: RenderTarget + ?Sized>(&self, target: &mut T) -> Result<(), FieldError> {
		target.fill_circle(self.x, self.y, self.size, self.color.fade(self.opacity))
	}

	pub fn distance_to(&self, other: &Particle) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// Uniform sample from `[min, max)`, tolerating an empty or inverted range.
fn sample<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
	if max > min {
		rng.gen_range(min..max)
	} else {
		min
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	fn particle_at(x: f64, y: f64, speed_x: f64, speed_y: f64) -> Particle {
		Particle {
			x,
			y,
			speed_x,
			speed_y,
			size: 1.0,
			opacity: 0.5,
			color: ParticleStyle::default().color,
		}
	}

	#[test]
	fn new_particles_respect_style_ranges() {
		let mut rng = SmallRng::seed_from_u64(7);
		let style = ParticleStyle::default();
		for _ in 0..500 {
			let p = Particle::new(&mut rng, &style, 1280.0, 720.0);
			assert!((0.0..1280.0).contains(&p.x));
			assert!((0.0..720.0).contains(&p.y));
			assert!((-0.5..0.5).contains(&p.speed_x));
			assert!((-0.5..0.5).contains(&p.speed_y));
			assert!((0.5..2.5).contains(&p.size));
			assert!((0.2..0.7).contains(&p.opacity));
		}
	}

	#[test]
	fn degenerate_viewport_does_not_panic() {
		let mut rng = SmallRng::seed_from_u64(1);
		let p = Particle::new(&mut rng, &ParticleStyle::default(), 0.0, 0.0);
		assert_eq!((p.x, p.y), (0.0, 0.0));
	}

	#[test]
	fn reflects_once_at_left_edge() {
		let mut p = particle_at(0.2, 50.0, -0.4, 0.0);
		p.update(100.0, 100.0, None, &RepulsionConfig::default());
		assert!(p.x < 0.0, "position is not clamped");
		assert_eq!(p.speed_x, 0.4);

		p.update(100.0, 100.0, None, &RepulsionConfig::default());
		assert!(p.x > 0.0);
		assert_eq!(p.speed_x, 0.4, "must not reflect again once heading back in");
	}

	#[test]
	fn axes_reflect_independently() {
		let mut p = particle_at(99.9, 50.0, 0.3, 0.2);
		p.update(100.0, 100.0, None, &RepulsionConfig::default());
		assert_eq!(p.speed_x, -0.3);
		assert_eq!(p.speed_y, 0.2);
	}

	#[test]
	fn stays_within_one_step_of_bounds() {
		let mut rng = SmallRng::seed_from_u64(42);
		let style = ParticleStyle::default();
		let (w, h) = (320.0, 240.0);
		let eps = style.speed_max + 1e-9;
		let mut particles: Vec<_> = (0..50).map(|_| Particle::new(&mut rng, &style, w, h)).collect();

		for _ in 0..5_000 {
			for p in &mut particles {
				p.update(w, h, None, &RepulsionConfig::default());
				assert!(p.x >= -eps && p.x <= w + eps, "x escaped: {}", p.x);
				assert!(p.y >= -eps && p.y <= h + eps, "y escaped: {}", p.y);
			}
		}
	}

	/// Frames until `p` is back inside a `width` x 100 box, then asserts it
	/// stays within one step of the bounds for a while.
	fn frames_to_return(p: &mut Particle, width: f64) -> usize {
		let config = RepulsionConfig::default();
		let frames = (1..=100)
			.find(|_| {
				p.update(width, 100.0, None, &config);
				(0.0..=width).contains(&p.x)
			})
			.unwrap_or(usize::MAX);

		let eps = p.speed_x.abs() + 1e-9;
		for _ in 0..1_000 {
			p.update(width, 100.0, None, &config);
			assert!(p.x >= -eps && p.x <= width + eps, "x escaped: {}", p.x);
		}
		frames
	}

	#[test]
	fn pushed_past_edge_while_heading_inward_comes_back() {
		let mut p = particle_at(1.0, 50.0, 0.3, 0.0);
		p.update(100.0, 100.0, Some(Pointer { x: 3.0, y: 50.0 }), &RepulsionConfig::default());
		assert!(p.x < -3.0, "pointer should shove it well outside: {}", p.x);
		assert_eq!(p.speed_x, 0.3);

		assert!(frames_to_return(&mut p, 100.0) <= 20);
	}

	#[test]
	fn pushed_past_edge_while_heading_outward_turns_once() {
		let mut p = particle_at(1.0, 50.0, -0.3, 0.0);
		p.update(100.0, 100.0, Some(Pointer { x: 3.0, y: 50.0 }), &RepulsionConfig::default());
		assert!(p.x < -4.0);

		p.update(100.0, 100.0, None, &RepulsionConfig::default());
		assert_eq!(p.speed_x, 0.3);
		p.update(100.0, 100.0, None, &RepulsionConfig::default());
		assert_eq!(p.speed_x, 0.3, "still outside but already heading in");

		assert!(frames_to_return(&mut p, 100.0) <= 20);
	}

	#[test]
	fn pointer_pushes_particle_away() {
		let config = RepulsionConfig::default();
		let mut p = particle_at(100.0, 100.0, 0.0, 0.0);
		p.update(500.0, 500.0, Some(Pointer { x: 50.0, y: 100.0 }), &config);

		// 50px away: force = (150 - 50) / 150, scaled by strength 5.
		let expected = 100.0 + 5.0 * (100.0 / 150.0);
		assert!((p.x - expected).abs() < 1e-9);
		assert_eq!(p.y, 100.0);
	}

	#[test]
	fn repulsion_is_monotonic_and_bounded() {
		let config = RepulsionConfig::default();
		let pointer = Pointer { x: 0.0, y: 0.0 };
		let magnitude = |d: f64| {
			particle_at(d, 0.0, 0.0, 0.0)
				.repulsion(pointer, &config)
				.map(|(dx, dy)| (dx * dx + dy * dy).sqrt())
				.unwrap_or(0.0)
		};

		let mut last = f64::INFINITY;
		for d in 1..150 {
			let m = magnitude(d as f64);
			assert!(m <= last);
			assert!(m <= config.strength);
			last = m;
		}
		assert_eq!(magnitude(150.0), 0.0);
		assert_eq!(magnitude(400.0), 0.0);
	}

	#[test]
	fn coincident_pointer_leaves_position_finite() {
		let mut p = particle_at(10.0, 10.0, 0.0, 0.0);
		p.update(100.0, 100.0, Some(Pointer { x: 10.0, y: 10.0 }), &RepulsionConfig::default());
		assert!(p.x.is_finite() && p.y.is_finite());
		assert_eq!((p.x, p.y), (10.0, 10.0));
	}
}
