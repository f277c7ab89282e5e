//! Core value types shared by the simulation, renderer and sound policy.

/// Which of the two theme colors a particle is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
	/// Drawn with [`Theme::primary`](super::theme::Theme::primary).
	Primary,
	/// Drawn with [`Theme::secondary`](super::theme::Theme::secondary).
	Secondary,
}

/// A single drifting particle.
///
/// `radius`, `tint` and `alpha` are fixed when the particle is seeded; only the
/// position and velocity change from frame to frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position in surface pixels.
	pub x: f64,
	/// Vertical position in surface pixels.
	pub y: f64,
	/// Horizontal velocity in pixels per frame.
	pub vx: f64,
	/// Vertical velocity in pixels per frame.
	pub vy: f64,
	/// Circle radius in pixels.
	pub radius: f64,
	/// Theme color the particle is drawn with.
	pub tint: Tint,
	/// Fill opacity.
	pub alpha: f64,
}

impl Particle {
	/// Euclidean distance between the centers of two particles.
	pub fn distance_to(&self, other: &Particle) -> f64 {
		(other.x - self.x).hypot(other.y - self.y)
	}
}

/// Last observed pointer position in surface coordinates.
///
/// `None` until the first pointer move and again after the pointer leaves the
/// window; no push is applied while it is unset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
	/// `(x, y)` of the pointer, if it is over the window.
	pub position: Option<(f64, f64)>,
}

impl PointerState {
	/// A pointer resting at `(x, y)`.
	pub fn at(x: f64, y: f64) -> Self {
		Self {
			position: Some((x, y)),
		}
	}

	/// Records a pointer move.
	pub fn set(&mut self, x: f64, y: f64) {
		self.position = Some((x, y));
	}

	/// Forgets the pointer after it leaves the window.
	pub fn clear(&mut self) {
		self.position = None;
	}
}

/// Surface dimensions the particles bounce inside.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	/// Width in pixels.
	pub width: f64,
	/// Height in pixels.
	pub height: f64,
}

impl Bounds {
	/// Bounds of a `width` × `height` surface.
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}
}

/// A request to play one short tone. Consumed as soon as it is produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoundEvent {
	/// Frequency in Hz.
	pub frequency: f64,
	/// Duration in seconds.
	pub duration: f64,
}

impl SoundEvent {
	/// A tone of `frequency` Hz lasting `duration` seconds.
	pub fn new(frequency: f64, duration: f64) -> Self {
		Self {
			frequency,
			duration,
		}
	}
}
