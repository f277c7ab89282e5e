//! Browser frame loop and event subscriptions.
//!
//! [`AnimationLoop`] re-requests `requestAnimationFrame` after every callback
//! until cancelled. [`WindowListener`] removes its callback from the window
//! when dropped. [`FrameSubscription`] owns both so a component can release
//! everything with one drop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Event, Window};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A self-rescheduling `requestAnimationFrame` loop.
pub struct AnimationLoop {
	window: Window,
	callback: FrameCallback,
	pending: Rc<Cell<Option<i32>>>,
}

impl AnimationLoop {
	/// Calls `on_frame` once per animation frame until cancelled or dropped.
	pub fn start(window: &Window, mut on_frame: impl FnMut() + 'static) -> Result<Self, JsValue> {
		let callback: FrameCallback = Rc::new(RefCell::new(None));
		let pending = Rc::new(Cell::new(None));
		let (callback_inner, pending_inner, window_inner) =
			(callback.clone(), pending.clone(), window.clone());

		*callback.borrow_mut() = Some(Closure::new(move || {
			pending_inner.set(None);
			on_frame();
			if let Some(ref cb) = *callback_inner.borrow() {
				pending_inner.set(
					window_inner
						.request_animation_frame(cb.as_ref().unchecked_ref())
						.ok(),
				);
			}
		}));

		if let Some(ref cb) = *callback.borrow() {
			pending.set(Some(
				window.request_animation_frame(cb.as_ref().unchecked_ref())?,
			));
		}

		Ok(Self {
			window: window.clone(),
			callback,
			pending,
		})
	}

	/// Cancels the pending frame and releases the callback.
	pub fn cancel(&mut self) {
		if let Some(id) = self.pending.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		self.callback.borrow_mut().take();
	}
}

impl Drop for AnimationLoop {
	fn drop(&mut self) {
		self.cancel();
	}
}

/// An event listener on the window that is removed on drop.
pub struct WindowListener {
	window: Window,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl WindowListener {
	/// Adds `handler` for `event` on `window`.
	pub fn new(
		window: &Window,
		event: &'static str,
		handler: impl FnMut(Event) + 'static,
	) -> Result<Self, JsValue> {
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
		Ok(Self {
			window: window.clone(),
			event,
			callback,
		})
	}
}

impl Drop for WindowListener {
	fn drop(&mut self) {
		let _ = self
			.window
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

/// A running frame loop plus the listeners that feed it.
///
/// Dropping it stops the loop and removes every listener.
pub struct FrameSubscription {
	animation: AnimationLoop,
	listeners: Vec<WindowListener>,
}

impl FrameSubscription {
	/// Wraps a running loop with no listeners yet.
	pub fn new(animation: AnimationLoop) -> Self {
		Self {
			animation,
			listeners: Vec::new(),
		}
	}

	/// Keeps `listener` alive until the subscription ends.
	pub fn listen(&mut self, listener: WindowListener) {
		self.listeners.push(listener);
	}

	/// Stops the loop and removes all listeners.
	pub fn cancel(mut self) {
		self.listeners.clear();
		self.animation.cancel();
	}
}
