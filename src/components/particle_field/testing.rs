//! Test doubles for the random source, drawing surface and tone output.

use std::cell::RefCell;

use rand::RngCore;

use super::render::Surface;
use super::sound::{ToneError, ToneSink};
use super::theme::Color;
use super::types::SoundEvent;

/// Random source that returns the same word forever.
///
/// `low()` makes every `gen_bool` succeed and every `gen_range` return its
/// lower bound; `middle()` makes low-probability `gen_bool`s fail and
/// `gen_range` land mid-range.
pub struct ConstRng(pub u64);

impl ConstRng {
	pub fn low() -> Self {
		Self(0)
	}

	pub fn middle() -> Self {
		Self(u64::MAX / 2)
	}
}

impl RngCore for ConstRng {
	fn next_u32(&mut self) -> u32 {
		(self.0 >> 32) as u32
	}

	fn next_u64(&mut self) -> u64 {
		self.0
	}

	fn fill_bytes(&mut self, dest: &mut [u8]) {
		for (byte, source) in dest.iter_mut().zip(self.0.to_le_bytes().into_iter().cycle()) {
			*byte = source;
		}
	}

	fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
		self.fill_bytes(dest);
		Ok(())
	}
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
	Rect {
		width: f64,
		height: f64,
		color: Color,
		alpha: f64,
	},
	Circle {
		x: f64,
		y: f64,
		radius: f64,
		color: Color,
		alpha: f64,
	},
	Line {
		from: (f64, f64),
		to: (f64, f64),
		color: Color,
		alpha: f64,
		width: f64,
	},
	ResetAlpha,
}

/// Surface that records every call instead of drawing.
pub struct RecordingSurface {
	pub width: f64,
	pub height: f64,
	pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			calls: Vec::new(),
		}
	}

	pub fn lines(&self) -> Vec<&DrawCall> {
		self.calls
			.iter()
			.filter(|c| matches!(c, DrawCall::Line { .. }))
			.collect()
	}

	pub fn circles(&self) -> Vec<&DrawCall> {
		self.calls
			.iter()
			.filter(|c| matches!(c, DrawCall::Circle { .. }))
			.collect()
	}
}

impl Surface for RecordingSurface {
	fn width(&self) -> f64 {
		self.width
	}

	fn height(&self) -> f64 {
		self.height
	}

	fn fill_rect(&mut self, _x: f64, _y: f64, width: f64, height: f64, color: Color, alpha: f64) {
		self.calls.push(DrawCall::Rect {
			width,
			height,
			color,
			alpha,
		});
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color, alpha: f64) {
		self.calls.push(DrawCall::Circle {
			x,
			y,
			radius,
			color,
			alpha,
		});
	}

	fn stroke_line(
		&mut self,
		from: (f64, f64),
		to: (f64, f64),
		color: Color,
		alpha: f64,
		width: f64,
	) {
		self.calls.push(DrawCall::Line {
			from,
			to,
			color,
			alpha,
			width,
		});
	}

	fn reset_alpha(&mut self) {
		self.calls.push(DrawCall::ResetAlpha);
	}
}

/// Tone output that records what it was asked to play.
#[derive(Default)]
pub struct RecordingTones {
	pub played: RefCell<Vec<SoundEvent>>,
	/// Reports suspended for good; `resume` only counts calls.
	pub suspended: bool,
	pub resumed: RefCell<usize>,
	/// When set, every `play` fails after recording the attempt.
	pub failing: bool,
}

impl RecordingTones {
	pub fn suspended() -> Self {
		Self {
			suspended: true,
			..Self::default()
		}
	}

	pub fn failing() -> Self {
		Self {
			failing: true,
			..Self::default()
		}
	}

	pub fn played(&self) -> Vec<SoundEvent> {
		self.played.borrow().clone()
	}
}

impl ToneSink for RecordingTones {
	fn play(&self, tone: SoundEvent) -> Result<(), ToneError> {
		self.played.borrow_mut().push(tone);
		if self.failing {
			Err(ToneError::Backend("too many voices".to_string()))
		} else {
			Ok(())
		}
	}

	fn is_suspended(&self) -> bool {
		self.suspended
	}

	fn resume(&self) -> Result<(), ToneError> {
		*self.resumed.borrow_mut() += 1;
		Ok(())
	}
}
