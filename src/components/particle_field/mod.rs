//! Ambient particle field background.
//!
//! Renders a drifting particle field on an HTML canvas with:
//! - Particles that bounce off the viewport edges and shy away from the pointer
//! - Connection lines between nearby particles, fading with distance
//! - Optional short tones on bounces and close pointer passes
//!
//! The simulation ([`FieldState`], [`ParticleField`], [`physics`], [`render`])
//! is independent of the browser; [`CanvasSurface`], [`WebAudioTones`] and the
//! [`driver`] module adapt it to a canvas, Web Audio and `requestAnimationFrame`.
//!
//! # Example
//!
//! ```ignore
//! use particle_field::ParticleBackground;
//!
//! let (sound, set_sound) = signal(false);
//! view! { <ParticleBackground sound_enabled=sound /> }
//! ```

mod component;
pub mod config;
pub mod driver;
mod particles;
pub mod physics;
pub mod render;
mod sound;
mod state;
#[cfg(test)]
mod testing;
pub mod theme;
mod types;

pub use component::ParticleBackground;
pub use config::FieldConfig;
pub use particles::ParticleField;
pub use render::{CanvasSurface, Surface};
pub use sound::{SoundController, ToneError, ToneSink, WebAudioTones};
pub use state::FieldState;
pub use theme::{Color, Theme};
pub use types::{Bounds, Particle, PointerState, SoundEvent, Tint};
