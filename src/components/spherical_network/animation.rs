//! Run-until-cancelled `requestAnimationFrame` loop.
//!
//! The tick closure has to reschedule itself, so it keeps a handle to its own
//! `Closure` cell. That reference cycle is broken in [`AnimationLoop::cancel`],
//! which also runs on drop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle to a running frame loop.
pub struct AnimationLoop {
	cancelled: Rc<Cell<bool>>,
	pending: Rc<Cell<Option<i32>>>,
	callback: FrameCallback,
}

impl AnimationLoop {
	/// Start calling `tick` once per display refresh until cancelled.
	///
	/// Each tick requests the next frame before running. Returning `false`
	/// from `tick` stops the loop from the inside. Returns `None` when there
	/// is no window to schedule frames on.
	pub fn start(mut tick: impl FnMut() -> bool + 'static) -> Option<Self> {
		let window = web_sys::window()?;
		let cancelled = Rc::new(Cell::new(false));
		let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
		let callback: FrameCallback = Rc::new(RefCell::new(None));

		let (cancelled_cb, pending_cb, callback_cb) =
			(cancelled.clone(), pending.clone(), callback.clone());
		*callback.borrow_mut() = Some(Closure::new(move || {
			pending_cb.set(None);
			if cancelled_cb.get() {
				return;
			}
			if let Some(ref cb) = *callback_cb.borrow() {
				pending_cb.set(request_frame(cb));
			}
			if !tick() {
				// The closure is still running, so it is only dropped by `cancel`.
				cancelled_cb.set(true);
				if let (Some(id), Some(window)) = (pending_cb.take(), web_sys::window()) {
					let _ = window.cancel_animation_frame(id);
				}
			}
		}));

		if let Some(ref cb) = *callback.borrow() {
			pending.set(
				window
					.request_animation_frame(cb.as_ref().unchecked_ref())
					.ok(),
			);
		}

		Some(Self {
			cancelled,
			pending,
			callback,
		})
	}

	/// Stop the loop. No tick runs after this returns. Safe to call twice.
	pub fn cancel(&self) {
		self.cancelled.set(true);
		if let Some(id) = self.pending.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
		}
		// Drops the closure and everything it captured.
		self.callback.borrow_mut().take();
	}
}

impl Drop for AnimationLoop {
	fn drop(&mut self) {
		self.cancel();
	}
}

fn request_frame(cb: &Closure<dyn FnMut()>) -> Option<i32> {
	web_sys::window()?
		.request_animation_frame(cb.as_ref().unchecked_ref())
		.ok()
}
