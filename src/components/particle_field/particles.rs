//! The particle population: sizing, seeding and the per-frame physics pass.

use rand::Rng;

use super::config::{FieldConfig, PopulationConfig, Span};
use super::physics;
use super::types::{Bounds, Particle, PointerState, SoundEvent, Tint};

/// Owns every particle of the current generation.
///
/// A generation lives until the surface changes size; [`ParticleField::resize`]
/// then discards it and seeds a fresh one.
#[derive(Clone, Debug)]
pub struct ParticleField {
	/// The current generation, in draw order.
	pub particles: Vec<Particle>,
	bounds: Bounds,
}

impl ParticleField {
	/// Seeds a population sized for a `width` × `height` surface.
	pub fn new<R: Rng + ?Sized>(
		width: f64,
		height: f64,
		config: &PopulationConfig,
		rng: &mut R,
	) -> Self {
		let count = Self::population_size(width, height, config);
		let particles = (0..count)
			.map(|_| Self::seed_particle(width, height, config, rng))
			.collect();

		Self {
			particles,
			bounds: Bounds::new(width, height),
		}
	}

	/// `min(floor(width * height / area_per_particle), max_particles)`.
	/// Degenerate surfaces get no particles.
	pub fn population_size(width: f64, height: f64, config: &PopulationConfig) -> usize {
		if !(width > 0.0 && height > 0.0 && config.area_per_particle > 0.0) {
			return 0;
		}
		let by_area = (width * height / config.area_per_particle).floor();
		if by_area >= config.max_particles as f64 {
			config.max_particles
		} else {
			by_area as usize
		}
	}

	fn seed_particle<R: Rng + ?Sized>(
		width: f64,
		height: f64,
		config: &PopulationConfig,
		rng: &mut R,
	) -> Particle {
		let speed = config.initial_speed.abs();
		Particle {
			x: sample(rng, Span::new(0.0, width)),
			y: sample(rng, Span::new(0.0, height)),
			vx: sample(rng, Span::new(-speed, speed)),
			vy: sample(rng, Span::new(-speed, speed)),
			radius: sample(rng, config.radius),
			alpha: sample(rng, config.alpha),
			tint: if rng.gen_bool(0.5) {
				Tint::Primary
			} else {
				Tint::Secondary
			},
		}
	}

	/// Surface the particles bounce inside.
	pub fn bounds(&self) -> Bounds {
		self.bounds
	}

	/// Number of particles.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// Whether the field has no particles.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Advances every particle one frame, appending the tones they trigger.
	pub fn step<R: Rng + ?Sized>(
		&mut self,
		pointer: &PointerState,
		config: &FieldConfig,
		rng: &mut R,
		events: &mut Vec<SoundEvent>,
	) {
		for p in &mut self.particles {
			physics::step(p, pointer, self.bounds, config, rng, events);
		}
	}

	/// Re-seeds the field if the surface size changed. Returns whether it did.
	pub fn resize<R: Rng + ?Sized>(
		&mut self,
		width: f64,
		height: f64,
		config: &PopulationConfig,
		rng: &mut R,
	) -> bool {
		if self.bounds == Bounds::new(width, height) {
			return false;
		}
		*self = Self::new(width, height, config, rng);
		true
	}
}

/// Uniform sample from `[min, max)`, or `min` when the span is empty.
fn sample<R: Rng + ?Sized>(rng: &mut R, span: Span) -> f64 {
	if span.is_empty() {
		span.min
	} else {
		rng.gen_range(span.min..span.max)
	}
}
