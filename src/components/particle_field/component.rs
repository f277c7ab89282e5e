//! Leptos component wrapping the particle field canvas.
//!
//! The component creates a fixed, full-viewport canvas behind the page and
//! drives it with a `requestAnimationFrame` loop. Pointer moves and window
//! resizes are picked up through window listeners; the loop and listeners are
//! bundled into one [`FrameSubscription`] that is dropped on cleanup.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlCanvasElement, MouseEvent, Window};

use super::config::FieldConfig;
use super::driver::{AnimationLoop, FrameSubscription, WindowListener};
use super::render::CanvasSurface;
use super::sound::{SoundController, WebAudioTones};
use super::state::FieldState;
use super::theme::Theme;

/// Bundles the simulation state with the surface it draws on.
struct FieldContext {
	state: FieldState<WebAudioTones>,
	surface: CanvasSurface,
}

type SharedContext = Rc<RefCell<Option<FieldContext>>>;

fn viewport_size(window: &Window) -> (f64, f64) {
	let width = window
		.inner_width()
		.ok()
		.and_then(|v| v.as_f64())
		.unwrap_or(0.0);
	let height = window
		.inner_height()
		.ok()
		.and_then(|v| v.as_f64())
		.unwrap_or(0.0);
	(width, height)
}

/// Seed for the per-mount random source.
fn host_seed() -> u64 {
	(js_sys::Math::random() * u64::MAX as f64) as u64
}

/// Renders the ambient particle field as a fixed page background.
///
/// Sound follows the `sound_enabled` signal and is off until it turns true.
/// `config` and `theme` default to the stock look; a theme named in
/// `config.theme` takes precedence over the `theme` prop.
#[component]
pub fn ParticleBackground(
	#[prop(into)] sound_enabled: Signal<bool>,
	#[prop(optional)] config: FieldConfig,
	#[prop(optional)] theme: Theme,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let subscription = StoredValue::new_local(None::<FrameSubscription>);
	let context_init = context.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("particle-field: no window, background disabled");
			return;
		};

		let (w, h) = viewport_size(&window);
		let Some(surface) = CanvasSurface::from_canvas(&canvas) else {
			warn!("particle-field: canvas has no 2d context, background disabled");
			return;
		};
		surface.resize(w, h);

		let theme = config
			.theme
			.as_deref()
			.and_then(Theme::by_name)
			.unwrap_or_else(|| theme.clone());
		let tones = match WebAudioTones::new(&config.sound) {
			Ok(tones) => Some(tones),
			Err(e) => {
				warn!("particle-field: sound unavailable: {}", e);
				None
			}
		};
		let sound = SoundController::new(tones, &config.sound);
		let mut state = FieldState::new(
			w,
			h,
			config.clone(),
			theme,
			sound,
			SmallRng::seed_from_u64(host_seed()),
		);
		// Pick up a toggle switched on before the canvas mounted.
		if sound_enabled.get_untracked() {
			state.set_sound_enabled(true);
		}
		*context_init.borrow_mut() = Some(FieldContext { state, surface });

		match start_loop(&window, &canvas, context_init.clone()) {
			Ok(sub) => {
				info!("particle-field: animation started");
				subscription.set_value(Some(sub));
			}
			Err(e) => warn!("particle-field: could not start animation: {:?}", e),
		}
	});

	let context_sound = context.clone();
	Effect::new(move |_| {
		let enabled = sound_enabled.get();
		if let Some(ref mut c) = *context_sound.borrow_mut() {
			c.state.set_sound_enabled(enabled);
		}
	});

	on_cleanup(move || {
		if let Some(Some(sub)) = subscription.try_update_value(|s| s.take()) {
			sub.cancel();
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			style="position: fixed; inset: 0; display: block; pointer-events: none; z-index: -1;"
		/>
	}
}

/// Wires the frame loop and the pointer/resize listeners to `context`.
fn start_loop(
	window: &Window,
	canvas: &HtmlCanvasElement,
	context: SharedContext,
) -> Result<FrameSubscription, JsValue> {
	let context_anim = context.clone();
	let animation = AnimationLoop::start(window, move || {
		if let Some(ref mut c) = *context_anim.borrow_mut() {
			c.state.frame(&mut c.surface);
		}
	})?;
	let mut sub = FrameSubscription::new(animation);

	let (context_move, canvas_move) = (context.clone(), canvas.clone());
	sub.listen(WindowListener::new(window, "mousemove", move |ev: Event| {
		let Some(ev) = ev.dyn_ref::<MouseEvent>() else {
			return;
		};
		let rect = canvas_move.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		if let Some(ref mut c) = *context_move.borrow_mut() {
			c.state.set_pointer(x, y);
		}
	})?);

	let context_leave = context.clone();
	sub.listen(WindowListener::new(window, "mouseout", move |ev: Event| {
		// Only leaving the document counts, not moving between elements.
		let left_window = ev
			.dyn_ref::<MouseEvent>()
			.is_some_and(|ev| ev.related_target().is_none());
		if !left_window {
			return;
		}
		if let Some(ref mut c) = *context_leave.borrow_mut() {
			c.state.clear_pointer();
		}
	})?);

	let context_resize = context;
	sub.listen(WindowListener::new(window, "resize", move |_: Event| {
		let Some(win) = web_sys::window() else {
			return;
		};
		let (nw, nh) = viewport_size(&win);
		if let Some(ref mut c) = *context_resize.borrow_mut() {
			c.surface.resize(nw, nh);
			c.state.resize(nw, nh);
		}
	})?);

	Ok(sub)
}
