//! Tunable parameters for the particle field.
//!
//! Every group implements `Default` with the stock behavior and is marked
//! `#[serde(default)]`, so a host page only has to spell out the values it
//! wants to change.

use std::cmp::Ordering;

use serde::Deserialize;

/// Half-open numeric range `[min, max)` used for random sampling.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct Span {
	/// Inclusive lower end.
	pub min: f64,
	/// Exclusive upper end.
	pub max: f64,
}

impl Span {
	/// The range `[min, max)`.
	pub const fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	/// Whether `value` lies in `[min, max)`.
	pub fn contains(&self, value: f64) -> bool {
		value >= self.min && value < self.max
	}

	/// Empty or inverted spans cannot be sampled from.
	pub fn is_empty(&self) -> bool {
		self.min.partial_cmp(&self.max) != Some(Ordering::Less)
	}
}

/// Population sizing and per-particle seeding ranges.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PopulationConfig {
	/// Surface area (px²) that buys one particle.
	pub area_per_particle: f64,
	/// Hard cap on the population regardless of surface area.
	pub max_particles: usize,
	/// Initial velocity is sampled from `[-initial_speed, initial_speed)` per axis.
	pub initial_speed: f64,
	/// Circle radius range.
	pub radius: Span,
	/// Fill opacity range.
	pub alpha: Span,
}

impl Default for PopulationConfig {
	fn default() -> Self {
		Self {
			area_per_particle: 15_000.0,
			max_particles: 100,
			initial_speed: 0.25,
			radius: Span::new(1.0, 4.0),
			alpha: Span::new(0.3, 0.8),
		}
	}
}

/// Pointer push and damping.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
	/// Distance below which the pointer pushes particles away.
	pub attraction_radius: f64,
	/// Velocity change applied at zero distance, falling off linearly to the radius.
	pub push_strength: f64,
	/// Per-frame velocity multiplier.
	pub damping: f64,
}

impl Default for PhysicsConfig {
	fn default() -> Self {
		Self {
			attraction_radius: 100.0,
			push_strength: 0.2,
			damping: 0.99,
		}
	}
}

/// Connection lines between nearby particles.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConnectionConfig {
	/// Pairs at or beyond this distance are not connected.
	pub max_distance: f64,
	/// Line opacity for two coincident particles.
	pub max_alpha: f64,
	/// Stroke width in pixels.
	pub line_width: f64,
}

impl Default for ConnectionConfig {
	fn default() -> Self {
		Self {
			max_distance: 120.0,
			max_alpha: 0.2,
			line_width: 0.5,
		}
	}
}

/// Tone parameters for bounce, proximity and confirmation sounds.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SoundConfig {
	/// Bounce tone frequency range in Hz.
	pub bounce_frequency: Span,
	/// Bounce tone length in seconds.
	pub bounce_duration: f64,
	/// Pointer distance below which proximity tones may fire.
	pub proximity_radius: f64,
	/// Chance per particle per frame that a proximity tone fires.
	pub proximity_chance: f64,
	/// Proximity tone frequency at zero distance, in Hz.
	pub proximity_base_frequency: f64,
	/// Added to the base frequency per unit of pointer distance.
	pub proximity_frequency_step: f64,
	/// Proximity tone length in seconds.
	pub proximity_duration: f64,
	/// Frequency of the tone played when sound is switched on, in Hz.
	pub confirm_frequency: f64,
	/// Length of the confirmation tone in seconds.
	pub confirm_duration: f64,
	/// Envelope start gain; ramps exponentially to `release_gain`.
	pub attack_gain: f32,
	/// Envelope end gain. Must be positive for the exponential ramp.
	pub release_gain: f32,
}

impl Default for SoundConfig {
	fn default() -> Self {
		Self {
			bounce_frequency: Span::new(200.0, 300.0),
			bounce_duration: 0.05,
			proximity_radius: 50.0,
			proximity_chance: 0.05,
			proximity_base_frequency: 400.0,
			proximity_frequency_step: 5.0,
			proximity_duration: 0.03,
			confirm_frequency: 440.0,
			confirm_duration: 0.2,
			attack_gain: 0.1,
			release_gain: 0.01,
		}
	}
}

/// Complete configuration for a particle field.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
	/// Name of a [`Theme`](super::theme::Theme) preset.
	pub theme: Option<String>,
	/// Population sizing and seeding.
	pub population: PopulationConfig,
	/// Pointer push and damping.
	pub physics: PhysicsConfig,
	/// Connection lines.
	pub connections: ConnectionConfig,
	/// Opacity of the black overlay painted each frame to leave fading trails.
	pub trail_alpha: f64,
	/// Tones.
	pub sound: SoundConfig,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			theme: None,
			population: PopulationConfig::default(),
			physics: PhysicsConfig::default(),
			connections: ConnectionConfig::default(),
			trail_alpha: 0.05,
			sound: SoundConfig::default(),
		}
	}
}

impl FieldConfig {
	/// Parses a possibly partial JSON config; missing keys keep their defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}
