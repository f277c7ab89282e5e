//! Tone output for bounce and pointer events.
//!
//! [`SoundController`] decides whether a [`SoundEvent`] is played at all (the
//! user toggle, a missing audio backend) and swallows backend failures so the
//! frame loop never sees them. [`WebAudioTones`] is the browser backend: one
//! short-lived sine oscillator per tone with an exponential fade.

use std::fmt;

use log::debug;
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

use super::config::SoundConfig;
use super::types::SoundEvent;

/// Failure reported by a tone backend.
#[derive(Clone, Debug, PartialEq)]
pub enum ToneError {
	/// The backend rejected the request.
	Backend(String),
}

impl fmt::Display for ToneError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ToneError::Backend(msg) => write!(f, "audio backend error: {msg}"),
		}
	}
}

impl std::error::Error for ToneError {}

impl From<JsValue> for ToneError {
	fn from(value: JsValue) -> Self {
		ToneError::Backend(format!("{value:?}"))
	}
}

/// Something that can play a short tone.
pub trait ToneSink {
	/// Starts one tone. It stops and releases itself after `tone.duration`.
	///
	/// A suspended backend still accepts the tone and plays it once resumed.
	fn play(&self, tone: SoundEvent) -> Result<(), ToneError>;

	/// Whether output is held back until [`ToneSink::resume`] takes effect.
	fn is_suspended(&self) -> bool {
		false
	}

	/// Asks a suspended backend to start. May complete after it returns.
	fn resume(&self) -> Result<(), ToneError> {
		Ok(())
	}
}

/// Gatekeeper between the simulation's sound events and the tone backend.
///
/// Sound starts disabled. With no backend every call is a no-op.
pub struct SoundController<T> {
	sink: Option<T>,
	enabled: bool,
	confirm: SoundEvent,
}

impl<T: ToneSink> SoundController<T> {
	/// Builds a disabled controller; `sink` is `None` when audio is unavailable.
	pub fn new(sink: Option<T>, config: &SoundConfig) -> Self {
		Self {
			sink,
			enabled: false,
			confirm: SoundEvent::new(config.confirm_frequency, config.confirm_duration),
		}
	}

	/// Whether the user toggle is on.
	pub fn is_enabled(&self) -> bool {
		self.enabled
	}

	/// Whether an audio backend is attached.
	pub fn has_output(&self) -> bool {
		self.sink.is_some()
	}

	/// The attached backend, if any.
	pub fn output(&self) -> Option<&T> {
		self.sink.as_ref()
	}

	/// Turns sound on or off.
	///
	/// Switching on resumes a suspended backend and plays the confirmation
	/// tone without waiting for the resume to finish.
	pub fn set_enabled(&mut self, enabled: bool) {
		if enabled == self.enabled {
			return;
		}
		self.enabled = enabled;
		debug!("particle-field: sound {}", if enabled { "on" } else { "off" });
		if !enabled {
			return;
		}
		if let Some(sink) = &self.sink {
			if sink.is_suspended() {
				if let Err(e) = sink.resume() {
					debug!("particle-field: could not resume audio: {}", e);
				}
			}
		}
		self.emit(self.confirm);
	}

	/// Plays `event` if sound is on. Backend failures are logged and dropped.
	pub fn emit(&self, event: SoundEvent) {
		if !self.enabled {
			return;
		}
		let Some(sink) = &self.sink else {
			return;
		};
		if let Err(e) = sink.play(event) {
			debug!("particle-field: dropped tone at {:.0} Hz: {}", event.frequency, e);
		}
	}

	/// Plays every event in order.
	pub fn emit_all(&self, events: &[SoundEvent]) {
		for &event in events {
			self.emit(event);
		}
	}
}

/// Web Audio tone backend.
pub struct WebAudioTones {
	ctx: AudioContext,
	attack_gain: f32,
	release_gain: f32,
}

impl WebAudioTones {
	/// Creates the audio context. Browsers start it suspended until a user gesture.
	pub fn new(config: &SoundConfig) -> Result<Self, ToneError> {
		Ok(Self {
			ctx: AudioContext::new()?,
			attack_gain: config.attack_gain,
			release_gain: config.release_gain,
		})
	}
}

impl ToneSink for WebAudioTones {
	fn play(&self, tone: SoundEvent) -> Result<(), ToneError> {
		// Scheduling on a suspended context is fine; the tone starts on resume.
		let osc = OscillatorNode::new(&self.ctx)?;
		osc.set_type(OscillatorType::Sine);
		osc.frequency().set_value(tone.frequency as f32);

		let gain = GainNode::new(&self.ctx)?;
		let now = self.ctx.current_time();
		let end = now + tone.duration;
		gain.gain().set_value_at_time(self.attack_gain, now)?;
		// Exponential ramps cannot target zero.
		gain.gain()
			.exponential_ramp_to_value_at_time(self.release_gain.max(f32::MIN_POSITIVE), end)?;

		osc.connect_with_audio_node(&gain)?;
		gain.connect_with_audio_node(&self.ctx.destination())?;
		osc.start_with_when(now)?;
		osc.stop_with_when(end)?;
		Ok(())
	}

	fn is_suspended(&self) -> bool {
		self.ctx.state() == AudioContextState::Suspended
	}

	fn resume(&self) -> Result<(), ToneError> {
		// The promise settles on its own; nothing waits on it.
		let _ = self.ctx.resume()?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::super::testing::RecordingTones;
	use super::*;

	fn controller(sink: RecordingTones) -> SoundController<RecordingTones> {
		SoundController::new(Some(sink), &SoundConfig::default())
	}

	fn tones(c: &SoundController<RecordingTones>) -> Vec<SoundEvent> {
		c.output().map(|s| s.played()).unwrap_or_default()
	}

	#[test]
	fn test_disabled_by_default_plays_nothing() {
		let c = controller(RecordingTones::default());
		assert!(!c.is_enabled());
		c.emit(SoundEvent::new(250.0, 0.05));
		c.emit_all(&[SoundEvent::new(500.0, 0.03); 10]);
		assert!(tones(&c).is_empty());
	}

	#[test]
	fn test_enabling_plays_one_confirmation_first() {
		let mut c = controller(RecordingTones::default());
		c.set_enabled(true);
		c.emit(SoundEvent::new(250.0, 0.05));

		assert_eq!(
			tones(&c),
			vec![SoundEvent::new(440.0, 0.2), SoundEvent::new(250.0, 0.05)]
		);
	}

	#[test]
	fn test_enabling_twice_confirms_once() {
		let mut c = controller(RecordingTones::default());
		c.set_enabled(true);
		c.set_enabled(true);
		assert_eq!(tones(&c).len(), 1);

		c.set_enabled(false);
		c.emit(SoundEvent::new(250.0, 0.05));
		assert_eq!(tones(&c).len(), 1);

		c.set_enabled(true);
		assert_eq!(tones(&c).len(), 2);
	}

	#[test]
	fn test_enabling_resumes_suspended_output() {
		let mut c = controller(RecordingTones::suspended());
		c.set_enabled(true);
		let sink = c.output().unwrap();
		assert_eq!(*sink.resumed.borrow(), 1);
		assert_eq!(sink.played(), vec![SoundEvent::new(440.0, 0.2)]);
	}

	#[test]
	fn test_confirmation_queued_while_resume_is_pending() {
		// The resume has not taken effect when the confirmation is requested.
		let mut c = controller(RecordingTones::suspended());
		c.set_enabled(true);
		c.emit(SoundEvent::new(250.0, 0.05));

		let sink = c.output().unwrap();
		assert!(sink.is_suspended());
		assert_eq!(
			sink.played(),
			vec![SoundEvent::new(440.0, 0.2), SoundEvent::new(250.0, 0.05)]
		);
	}

	#[test]
	fn test_running_output_is_not_resumed() {
		let mut c = controller(RecordingTones::default());
		c.set_enabled(true);
		assert_eq!(*c.output().unwrap().resumed.borrow(), 0);
	}

	#[test]
	fn test_backend_failures_are_swallowed() {
		let mut c = controller(RecordingTones::failing());
		c.set_enabled(true);
		c.emit_all(&[SoundEvent::new(250.0, 0.05); 3]);
		assert_eq!(tones(&c).len(), 4);
	}

	#[test]
	fn test_missing_output_is_silent() {
		let mut c: SoundController<RecordingTones> =
			SoundController::new(None, &SoundConfig::default());
		c.set_enabled(true);
		c.emit(SoundEvent::new(250.0, 0.05));
		assert!(c.is_enabled());
		assert!(!c.has_output());
	}

	#[test]
	fn test_error_display() {
		assert_eq!(
			ToneError::Backend("boom".into()).to_string(),
			"audio backend error: boom"
		);
	}
}
