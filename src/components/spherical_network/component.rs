//! Leptos component wrapping the particle network canvas.
//!
//! The component renders a sized container with a canvas inside and wires up
//! mouse/touch/wheel handlers on the container plus a window resize listener.
//! A [`AnimationLoop`] drives `frame -> render` once per display refresh.
//!
//! Mounting is deferred until the container has a non-zero size; the loop
//! simply retries on the next frame. If the browser cannot hand out a 2D
//! context the loop stops and the page renders without the network.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use leptos::html;
use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlDivElement, MouseEvent, TouchEvent, WheelEvent};

use super::animation::AnimationLoop;
use super::config::NetworkConfig;
use super::error::{MountError, ensure_sized};
use super::render::{self, Renderer};
use super::state::NetworkState;
use super::theme::NetworkTheme;

/// Bundles the simulation with the renderer that draws it.
struct NetworkContext {
	state: NetworkState,
	renderer: Renderer,
	theme: NetworkTheme,
}

impl NetworkContext {
	fn mount(
		container: &HtmlDivElement,
		canvas: &HtmlCanvasElement,
		config: &NetworkConfig,
	) -> Result<Self, MountError> {
		let (width, height) = container_size(container)?;
		let mut renderer = Renderer::new(canvas.clone(), config.sphere_segments)?;
		renderer.resize(width, height, device_pixel_ratio());

		info!(
			"sphere-folio: network mounted at {}x{} with {} particles",
			width, height, config.particle_count
		);
		Ok(Self {
			state: NetworkState::new(config.clone(), width as f32, height as f32),
			renderer,
			theme: NetworkTheme::default(),
		})
	}

	fn resize(&mut self, container: &HtmlDivElement) {
		if let Ok((width, height)) = container_size(container) {
			self.renderer.resize(width, height, device_pixel_ratio());
			self.state.resize(width as f32, height as f32);
		}
	}
}

type SharedContext = Rc<RefCell<Option<NetworkContext>>>;

/// Everything that must be released when the component unmounts.
struct Teardown {
	frame_loop: AnimationLoop,
	resize_cb: Closure<dyn FnMut()>,
	context: SharedContext,
}

impl Drop for Teardown {
	fn drop(&mut self) {
		self.frame_loop.cancel();
		if let Some(window) = web_sys::window() {
			let _ = window.remove_event_listener_with_callback(
				"resize",
				self.resize_cb.as_ref().unchecked_ref(),
			);
		}
		if let Some(c) = self.context.borrow_mut().take() {
			debug!(
				"sphere-folio: network torn down after {} frames",
				c.state.frame_count()
			);
			c.renderer.release();
		}
	}
}

fn device_pixel_ratio() -> f64 {
	web_sys::window()
		.map(|w| w.device_pixel_ratio())
		.unwrap_or(1.0)
}

fn container_size(container: &HtmlDivElement) -> Result<(f64, f64), MountError> {
	ensure_sized(
		container.client_width() as f64,
		container.client_height() as f64,
	)
}

fn mouse_point(ev: &MouseEvent) -> Vec2 {
	Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

fn touch_points(ev: &TouchEvent) -> Vec<Vec2> {
	let touches = ev.touches();
	(0..touches.length())
		.filter_map(|i| touches.get(i))
		.map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
		.collect()
}

/// Renders the animated particle network in a container of the given height.
///
/// The container fills its parent's width. Drag (or single-finger swipe) to
/// spin the sphere, scroll to zoom. Pass `config` to override the defaults.
#[component]
pub fn SphericalNetwork(
	#[prop(optional)] config: Option<NetworkConfig>,
	#[prop(default = 400.0)] height: f64,
) -> impl IntoView {
	let config = config.unwrap_or_default().sanitized();
	let container_ref = NodeRef::<html::Div>::new();
	let canvas_ref = NodeRef::<html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let teardown = StoredValue::new_local(None::<Teardown>);

	let context_init = context.clone();
	Effect::new(move |_| {
		let (Some(container), Some(canvas)) = (container_ref.get(), canvas_ref.get()) else {
			return;
		};
		if teardown.with_value(Option::is_some) {
			return;
		}
		let container: HtmlDivElement = container;
		let canvas: HtmlCanvasElement = canvas;

		let (context_resize, container_resize) = (context_init.clone(), container.clone());
		let resize_cb: Closure<dyn FnMut()> = Closure::new(move || {
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.resize(&container_resize);
			}
		});
		if let Some(window) = web_sys::window() {
			let _ =
				window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
		}

		let (context_anim, config_anim) = (context_init.clone(), config.clone());
		let mut waiting_logged = false;
		let frame_loop = AnimationLoop::start(move || {
			let mut slot = context_anim.borrow_mut();
			if slot.is_none() {
				match NetworkContext::mount(&container, &canvas, &config_anim) {
					Ok(c) => *slot = Some(c),
					Err(e) if e.is_retryable() => {
						if !waiting_logged {
							debug!("sphere-folio: {}, deferring mount", e);
							waiting_logged = true;
						}
						return true;
					}
					Err(e) => {
						warn!("sphere-folio: {}; network disabled", e);
						return false;
					}
				}
			}

			if let Some(ref mut c) = *slot {
				c.state.frame();
				render::render(&c.state, &c.renderer, &c.theme);
			}
			true
		});

		match frame_loop {
			Some(frame_loop) => teardown.set_value(Some(Teardown {
				frame_loop,
				resize_cb,
				context: context_init.clone(),
			})),
			None => warn!("sphere-folio: no window, network not started"),
		}
	});

	on_cleanup(move || drop(teardown.try_update_value(Option::take)));

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.state.pointer_down(mouse_point(&ev));
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.state.pointer_move(mouse_point(&ev));
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.state.pointer_up();
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.pointer_up();
		}
	};

	let context_ts = context.clone();
	let on_touchstart = move |ev: TouchEvent| {
		if let Some(ref mut c) = *context_ts.borrow_mut() {
			c.state.touch_start(&touch_points(&ev));
		}
	};

	let context_tm = context.clone();
	let on_touchmove = move |ev: TouchEvent| {
		if let Some(ref mut c) = *context_tm.borrow_mut() {
			c.state.touch_move(&touch_points(&ev));
		}
	};

	let context_te = context.clone();
	let on_touchend = move |_: TouchEvent| {
		if let Some(ref mut c) = *context_te.borrow_mut() {
			c.state.touch_end();
		}
	};

	let context_wh = context;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			c.state.wheel(ev.delta_y() as f32);
		}
	};

	view! {
		<div
			node_ref=container_ref
			class="spherical-network"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:touchstart=on_touchstart
			on:touchmove=on_touchmove
			on:touchend=on_touchend
			on:wheel=on_wheel
			style=format!("width: 100%; height: {height}px; cursor: grab; touch-action: none;")
		>
			<canvas
				node_ref=canvas_ref
				class="spherical-network-canvas"
				style="display: block; width: 100%; height: 100%;"
			/>
		</div>
	}
}
