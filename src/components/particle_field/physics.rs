//! Per-frame kinematics for a single particle.
//!
//! One call to [`step`] advances a particle by one unit time step:
//! 1. Integrate position from velocity
//! 2. Bounce off surface edges (velocity flip, no clamping)
//! 3. Push away from the pointer when it is close
//! 4. Damp velocity
//!
//! Bounces and close pointer passes produce [`SoundEvent`]s, which are pushed
//! onto the caller's buffer rather than played from here.

use rand::Rng;

use super::config::{FieldConfig, PhysicsConfig, SoundConfig};
use super::types::{Bounds, Particle, PointerState, SoundEvent};

/// Advances `particle` by one frame.
pub fn step<R: Rng + ?Sized>(
	particle: &mut Particle,
	pointer: &PointerState,
	bounds: Bounds,
	config: &FieldConfig,
	rng: &mut R,
	events: &mut Vec<SoundEvent>,
) {
	particle.x += particle.vx;
	particle.y += particle.vy;

	bounce(particle, bounds, &config.sound, rng, events);

	if let Some((px, py)) = pointer.position {
		let (dx, dy) = (px - particle.x, py - particle.y);
		let (push_x, push_y) = pointer_push(dx, dy, &config.physics);
		particle.vx -= push_x;
		particle.vy -= push_y;

		let sound = &config.sound;
		let distance = dx.hypot(dy);
		let chance = sound.proximity_chance.clamp(0.0, 1.0);
		if distance < sound.proximity_radius && rng.gen_bool(chance) {
			events.push(SoundEvent::new(
				sound.proximity_base_frequency + distance * sound.proximity_frequency_step,
				sound.proximity_duration,
			));
		}
	}

	particle.vx *= config.physics.damping;
	particle.vy *= config.physics.damping;
}

/// Flips each velocity component whose axis left `[0, dimension]`.
///
/// Position is left where it is; the flipped velocity carries the particle
/// back inside on the next integrate.
fn bounce<R: Rng + ?Sized>(
	particle: &mut Particle,
	bounds: Bounds,
	sound: &SoundConfig,
	rng: &mut R,
	events: &mut Vec<SoundEvent>,
) {
	if particle.x < 0.0 || particle.x > bounds.width {
		particle.vx = -particle.vx;
		events.push(bounce_tone(sound, rng));
	}
	if particle.y < 0.0 || particle.y > bounds.height {
		particle.vy = -particle.vy;
		events.push(bounce_tone(sound, rng));
	}
}

fn bounce_tone<R: Rng + ?Sized>(sound: &SoundConfig, rng: &mut R) -> SoundEvent {
	let range = sound.bounce_frequency;
	let frequency = if range.is_empty() {
		range.min
	} else {
		rng.gen_range(range.min..range.max)
	};
	SoundEvent::new(frequency, sound.bounce_duration)
}

/// Velocity change (to be subtracted) for a particle whose offset to the
/// pointer is `(dx, dy)`.
///
/// Falls off linearly from `push_strength` at distance zero to nothing at
/// `attraction_radius`.
pub fn pointer_push(dx: f64, dy: f64, physics: &PhysicsConfig) -> (f64, f64) {
	let distance = dx.hypot(dy);
	if distance >= physics.attraction_radius {
		return (0.0, 0.0);
	}
	let force = (physics.attraction_radius - distance) / physics.attraction_radius;
	let angle = dy.atan2(dx);
	(
		angle.cos() * force * physics.push_strength,
		angle.sin() * force * physics.push_strength,
	)
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::super::testing::ConstRng;
	use super::super::types::Tint;
	use super::*;

	fn particle(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
		Particle {
			x,
			y,
			vx,
			vy,
			radius: 2.0,
			tint: Tint::Primary,
			alpha: 0.5,
		}
	}

	#[test]
	fn test_bounce_off_left_edge() {
		let config = FieldConfig::default();
		let mut p = particle(-1.0, 300.0, -0.3, 0.0);
		let mut events = Vec::new();
		let mut rng = SmallRng::seed_from_u64(7);

		step(
			&mut p,
			&PointerState::default(),
			Bounds::new(800.0, 600.0),
			&config,
			&mut rng,
			&mut events,
		);

		assert!((p.x - -1.3).abs() < 1e-9);
		assert!((p.vx - 0.3 * 0.99).abs() < 1e-9);
		assert_eq!(events.len(), 1);
		assert!(config.sound.bounce_frequency.contains(events[0].frequency));
		assert_eq!(events[0].duration, 0.05);
	}

	#[test]
	fn test_bounce_from_zero_flips_once() {
		let config = FieldConfig::default();
		let mut p = particle(0.0, 10.0, -0.2, 0.0);
		let mut events = Vec::new();

		step(
			&mut p,
			&PointerState::default(),
			Bounds::new(100.0, 100.0),
			&config,
			&mut ConstRng::middle(),
			&mut events,
		);

		assert!(p.vx > 0.0);
		assert!((p.vx - 0.2 * 0.99).abs() < 1e-12);
		assert_eq!(events.len(), 1);
	}

	#[test]
	fn test_corner_bounce_emits_two_tones() {
		let config = FieldConfig::default();
		let mut p = particle(99.9, 99.9, 0.5, 0.5);
		let mut events = Vec::new();

		step(
			&mut p,
			&PointerState::default(),
			Bounds::new(100.0, 100.0),
			&config,
			&mut ConstRng::low(),
			&mut events,
		);

		assert!(p.vx < 0.0 && p.vy < 0.0);
		assert_eq!(events, vec![SoundEvent::new(200.0, 0.05); 2]);
	}

	#[test]
	fn test_edge_is_inside_bounds() {
		let config = FieldConfig::default();
		let mut p = particle(99.0, 50.0, 1.0, 0.0);
		let mut events = Vec::new();

		step(
			&mut p,
			&PointerState::default(),
			Bounds::new(100.0, 100.0),
			&config,
			&mut ConstRng::low(),
			&mut events,
		);

		assert_eq!(p.x, 100.0);
		assert!(p.vx > 0.0);
		assert!(events.is_empty());
	}

	#[test]
	fn test_push_is_zero_outside_radius() {
		let physics = PhysicsConfig::default();
		assert_eq!(pointer_push(100.0, 0.0, &physics), (0.0, 0.0));
		assert_eq!(pointer_push(300.0, 400.0, &physics), (0.0, 0.0));
	}

	#[test]
	fn test_push_grows_as_pointer_approaches() {
		let physics = PhysicsConfig::default();
		let mut last = 0.0;
		for d in (0..100).rev() {
			let (x, y) = pointer_push(d as f64, 0.0, &physics);
			let magnitude = x.hypot(y);
			assert!(magnitude > last, "push at {d} should exceed {last}");
			last = magnitude;
		}
		assert!((last - physics.push_strength).abs() < 1e-12);
	}

	#[test]
	fn test_push_points_away_from_pointer() {
		let config = FieldConfig::default();
		let mut p = particle(50.0, 50.0, 0.0, 0.0);
		let mut events = Vec::new();

		// Pointer to the right: particle is pushed left.
		step(
			&mut p,
			&PointerState::at(80.0, 50.0),
			Bounds::new(100.0, 100.0),
			&config,
			&mut ConstRng::middle(),
			&mut events,
		);

		let expected = (100.0 - 30.0) / 100.0 * 0.2 * 0.99;
		assert!((p.vx + expected).abs() < 1e-12);
		assert!(p.vy.abs() < 1e-12);
		assert!(events.is_empty());
	}

	#[test]
	fn test_close_pointer_tone() {
		let config = FieldConfig::default();
		let mut p = particle(50.0, 50.0, 0.0, 0.0);
		let mut events = Vec::new();

		step(
			&mut p,
			&PointerState::at(50.0, 70.0),
			Bounds::new(100.0, 100.0),
			&config,
			&mut ConstRng::low(),
			&mut events,
		);

		assert_eq!(events, vec![SoundEvent::new(400.0 + 20.0 * 5.0, 0.03)]);
	}

	#[test]
	fn test_close_pointer_tone_is_occasional() {
		let config = FieldConfig::default();
		let mut rng = SmallRng::seed_from_u64(42);
		let mut fired = 0;
		for _ in 0..2000 {
			let mut p = particle(50.0, 50.0, 0.0, 0.0);
			let mut events = Vec::new();
			step(
				&mut p,
				&PointerState::at(60.0, 50.0),
				Bounds::new(100.0, 100.0),
				&config,
				&mut rng,
				&mut events,
			);
			fired += events.len();
		}
		assert!((40..=170).contains(&fired), "fired {fired} times");
	}

	#[test]
	fn test_no_pointer_tone_beyond_proximity_radius() {
		let config = FieldConfig::default();
		let mut p = particle(50.0, 50.0, 0.0, 0.0);
		let mut events = Vec::new();

		step(
			&mut p,
			&PointerState::at(50.0, 0.0),
			Bounds::new(100.0, 100.0),
			&config,
			&mut ConstRng::low(),
			&mut events,
		);

		assert!(p.vy > 0.0);
		assert!(events.is_empty());
	}

	#[test]
	fn test_damping_is_contractive() {
		let config = FieldConfig::default();
		let mut p = particle(50.0, 50.0, 0.2, -0.1);
		let mut events = Vec::new();
		for _ in 0..100 {
			let before = p.vx.hypot(p.vy);
			step(
				&mut p,
				&PointerState::default(),
				Bounds::new(1000.0, 1000.0),
				&config,
				&mut ConstRng::middle(),
				&mut events,
			);
			assert!(p.vx.hypot(p.vy) < before);
		}
	}

	#[test]
	fn test_resting_particle_stays_put() {
		let config = FieldConfig::default();
		let mut p = particle(10.0, 0.0, 0.0, 0.0);
		let mut events = Vec::new();

		step(
			&mut p,
			&PointerState::at(5000.0, 5000.0),
			Bounds::new(1500.0, 1000.0),
			&config,
			&mut ConstRng::middle(),
			&mut events,
		);

		assert_eq!((p.x, p.y, p.vx, p.vy), (10.0, 0.0, 0.0, 0.0));
		assert!(events.is_empty());
	}
}
