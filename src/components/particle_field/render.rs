//! Frame rendering for the particle field.
//!
//! Drawing happens in three passes:
//! 1. A translucent trail overlay instead of a hard clear
//! 2. Particles as filled circles
//! 3. Connection lines between every pair closer than the connection distance
//!
//! All drawing goes through [`Surface`]; [`CanvasSurface`] implements it for a
//! 2D canvas context.

use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::config::{ConnectionConfig, FieldConfig};
use super::theme::{Color, Theme};
use super::types::Particle;

/// A 2D drawing target with mutable pixel dimensions.
pub trait Surface {
	/// Width in pixels.
	fn width(&self) -> f64;
	/// Height in pixels.
	fn height(&self) -> f64;
	/// Fills a rectangle with `color` at opacity `alpha`.
	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color, alpha: f64);
	/// Fills a circle with `color` at opacity `alpha`.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color, alpha: f64);
	/// Strokes a line at opacity `alpha`.
	///
	/// A translucent `color` keeps its own alpha, which compounds with `alpha`.
	fn stroke_line(
		&mut self,
		from: (f64, f64),
		to: (f64, f64),
		color: Color,
		alpha: f64,
		width: f64,
	);
	/// Restores full opacity for whatever draws next.
	fn reset_alpha(&mut self);
}

/// Renders one frame of `particles`.
pub fn render<S: Surface + ?Sized>(
	surface: &mut S,
	particles: &[Particle],
	config: &FieldConfig,
	theme: &Theme,
) {
	draw_trail(surface, config, theme);
	draw_particles(surface, particles, theme);
	draw_connections(surface, particles, &config.connections, theme);
	surface.reset_alpha();
}

fn draw_trail<S: Surface + ?Sized>(surface: &mut S, config: &FieldConfig, theme: &Theme) {
	let (w, h) = (surface.width(), surface.height());
	surface.fill_rect(0.0, 0.0, w, h, theme.trail, config.trail_alpha);
}

fn draw_particles<S: Surface + ?Sized>(surface: &mut S, particles: &[Particle], theme: &Theme) {
	for p in particles {
		surface.fill_circle(p.x, p.y, p.radius, theme.tint(p.tint), p.alpha);
	}
}

fn draw_connections<S: Surface + ?Sized>(
	surface: &mut S,
	particles: &[Particle],
	config: &ConnectionConfig,
	theme: &Theme,
) {
	for (i, a) in particles.iter().enumerate() {
		for b in &particles[i + 1..] {
			let Some(alpha) = connection_alpha(a.distance_to(b), config) else {
				continue;
			};
			surface.stroke_line(
				(a.x, a.y),
				(b.x, b.y),
				theme.connection(a.tint, b.tint),
				alpha,
				config.line_width,
			);
		}
	}
}

/// Line opacity for two particles `distance` apart, or `None` when they are
/// too far apart to connect.
///
/// Linear from `max_alpha` at zero distance to zero at `max_distance`.
pub fn connection_alpha(distance: f64, config: &ConnectionConfig) -> Option<f64> {
	if distance < config.max_distance {
		Some((1.0 - distance / config.max_distance) * config.max_alpha)
	} else {
		None
	}
}

/// [`Surface`] backed by an HTML canvas.
///
/// Dimensions are read from the canvas element on every call so a resized
/// canvas is picked up without rebuilding the surface.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Wraps the canvas' 2D context, or `None` when it has none.
	pub fn from_canvas(canvas: &HtmlCanvasElement) -> Option<Self> {
		let ctx = canvas
			.get_context("2d")
			.ok()
			.flatten()?
			.dyn_into::<CanvasRenderingContext2d>()
			.ok()?;
		Some(Self {
			canvas: canvas.clone(),
			ctx,
		})
	}

	/// Sets the canvas pixel size.
	pub fn resize(&self, width: f64, height: f64) {
		self.canvas.set_width(width as u32);
		self.canvas.set_height(height as u32);
	}
}

impl Surface for CanvasSurface {
	fn width(&self) -> f64 {
		self.canvas.width() as f64
	}

	fn height(&self) -> f64 {
		self.canvas.height() as f64
	}

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color, alpha: f64) {
		self.ctx.set_global_alpha(1.0);
		self.ctx.set_fill_style_str(&color.with_alpha(alpha).to_css());
		self.ctx.fill_rect(x, y, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color, alpha: f64) {
		self.ctx.set_global_alpha(alpha);
		self.ctx.set_fill_style_str(&color.to_css_rgb());
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius, 0.0, PI * 2.0);
		self.ctx.fill();
	}

	fn stroke_line(
		&mut self,
		from: (f64, f64),
		to: (f64, f64),
		color: Color,
		alpha: f64,
		width: f64,
	) {
		self.ctx.set_global_alpha(alpha);
		self.ctx.set_stroke_style_str(&color.to_css());
		self.ctx.set_line_width(width);
		self.ctx.begin_path();
		self.ctx.move_to(from.0, from.1);
		self.ctx.line_to(to.0, to.1);
		self.ctx.stroke();
	}

	fn reset_alpha(&mut self) {
		self.ctx.set_global_alpha(1.0);
	}
}
