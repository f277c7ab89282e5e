//! Simulation state driven by the frame loop.
//!
//! Bundles the particle field with the pointer, the sound gate and the random
//! source. The frame loop calls [`FieldState::frame`] once per animation
//! frame; event handlers call [`FieldState::set_pointer`] and
//! [`FieldState::resize`] between frames.

use log::info;
use rand::Rng;
use rand::rngs::SmallRng;

use super::config::FieldConfig;
use super::particles::ParticleField;
use super::render::{self, Surface};
use super::sound::{SoundController, ToneSink};
use super::theme::Theme;
use super::types::{PointerState, SoundEvent};

/// Everything one particle background needs between frames.
pub struct FieldState<T, R = SmallRng> {
	/// Current particle generation.
	pub field: ParticleField,
	/// Last pointer position.
	pub pointer: PointerState,
	/// Sound toggle and tone output.
	pub sound: SoundController<T>,
	/// Parameters used for stepping and drawing.
	pub config: FieldConfig,
	/// Colors used for drawing.
	pub theme: Theme,
	rng: R,
	/// Reused across frames to avoid a per-frame allocation.
	events: Vec<SoundEvent>,
}

impl<T: ToneSink, R: Rng> FieldState<T, R> {
	/// Seeds a field for a `width` × `height` surface.
	pub fn new(
		width: f64,
		height: f64,
		config: FieldConfig,
		theme: Theme,
		sound: SoundController<T>,
		mut rng: R,
	) -> Self {
		let field = ParticleField::new(width, height, &config.population, &mut rng);
		info!(
			"particle-field: seeded {} particles for {}x{}",
			field.len(),
			width,
			height
		);
		Self {
			field,
			pointer: PointerState::default(),
			sound,
			config,
			theme,
			rng,
			events: Vec::new(),
		}
	}

	/// Steps every particle, plays the tones they trigger, then draws.
	pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
		self.events.clear();
		self.field
			.step(&self.pointer, &self.config, &mut self.rng, &mut self.events);
		self.sound.emit_all(&self.events);
		render::render(surface, &self.field.particles, &self.config, &self.theme);
	}

	/// Re-seeds the field for a new surface size; no-op if the size is unchanged.
	pub fn resize(&mut self, width: f64, height: f64) {
		if self
			.field
			.resize(width, height, &self.config.population, &mut self.rng)
		{
			info!(
				"particle-field: reseeded {} particles for {}x{}",
				self.field.len(),
				width,
				height
			);
		}
	}

	/// Records a pointer move in surface coordinates.
	pub fn set_pointer(&mut self, x: f64, y: f64) {
		self.pointer.set(x, y);
	}

	/// Drops the pointer after it leaves the window.
	pub fn clear_pointer(&mut self) {
		self.pointer.clear();
	}

	/// Forwards the user's sound toggle.
	pub fn set_sound_enabled(&mut self, enabled: bool) {
		self.sound.set_enabled(enabled);
	}
}
