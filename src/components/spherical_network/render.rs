//! Canvas rendering for the particle network.
//!
//! Drawing happens in CSS pixels; the backing store is scaled by the device
//! pixel ratio once per resize. Passes, back to front:
//! 1. Wireframe sphere (normal blending)
//! 2. Connection lines (additive)
//! 3. Particle points (additive)
//!
//! Points and lines are dimmed by depth fog, which under additive blending
//! fades them toward the page background.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::error::MountError;
use super::state::NetworkState;
use super::theme::{Color, NetworkTheme, fog_factor};

/// Owns the 2D context and the precomputed wireframe geometry.
pub struct Renderer {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	width: f64,
	height: f64,
	pixel_ratio: f64,
	/// Latitude rings and meridians of the unit sphere, as polylines.
	wireframe: Vec<Vec<Vec3>>,
}

impl Renderer {
	pub fn new(canvas: HtmlCanvasElement, sphere_segments: usize) -> Result<Self, MountError> {
		let ctx = canvas
			.get_context("2d")
			.map_err(|e| MountError::NoGraphics(format!("{e:?}")))?
			.ok_or_else(|| MountError::NoGraphics("no 2d context".into()))?
			.dyn_into::<CanvasRenderingContext2d>()
			.map_err(|_| MountError::NoGraphics("unexpected context type".into()))?;

		Ok(Self {
			canvas,
			ctx,
			width: 1.0,
			height: 1.0,
			pixel_ratio: 1.0,
			wireframe: unit_sphere_wireframe(sphere_segments),
		})
	}

	/// Match the backing store to the container size and device pixel ratio.
	pub fn resize(&mut self, width: f64, height: f64, pixel_ratio: f64) {
		self.width = width;
		self.height = height;
		self.pixel_ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };

		self.canvas
			.set_width((width * self.pixel_ratio).round().max(1.0) as u32);
		self.canvas
			.set_height((height * self.pixel_ratio).round().max(1.0) as u32);
		// Resizing resets the transform.
		let _ = self
			.ctx
			.set_transform(self.pixel_ratio, 0.0, 0.0, self.pixel_ratio, 0.0, 0.0);
	}

	/// Blank the canvas and hand back the element; the context is dropped.
	pub fn release(self) -> HtmlCanvasElement {
		self.clear();
		self.canvas.set_width(0);
		self.canvas.set_height(0);
		self.canvas
	}

	fn clear(&self) {
		let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
		self.ctx.clear_rect(
			0.0,
			0.0,
			self.canvas.width() as f64,
			self.canvas.height() as f64,
		);
		let _ = self
			.ctx
			.set_transform(self.pixel_ratio, 0.0, 0.0, self.pixel_ratio, 0.0, 0.0);
	}
}

/// Renders one frame of the network.
pub fn render(state: &NetworkState, renderer: &Renderer, theme: &NetworkTheme) {
	let ctx = &renderer.ctx;
	ctx.clear_rect(0.0, 0.0, renderer.width, renderer.height);

	if theme.wireframe.enabled {
		draw_wireframe(state, renderer, theme);
	}

	let _ = ctx.set_global_composite_operation(theme.blend_mode);
	draw_links(state, ctx, theme);
	draw_points(state, ctx, theme);
	let _ = ctx.set_global_composite_operation("source-over");
}

fn draw_wireframe(state: &NetworkState, renderer: &Renderer, theme: &NetworkTheme) {
	let ctx = &renderer.ctx;
	let camera = &state.camera;
	let view_proj = camera.view_projection();
	let radius = state.particles.radius();

	ctx.set_stroke_style_str(&theme.wireframe.color.to_css());
	ctx.set_line_width(theme.wireframe.line_width);
	ctx.begin_path();

	for polyline in &renderer.wireframe {
		let mut pen_down = false;
		for &v in polyline {
			match camera.project_with(&view_proj, state.orientation * (v * radius)) {
				Some(p) if pen_down => ctx.line_to(p.screen.x as f64, p.screen.y as f64),
				Some(p) => {
					ctx.move_to(p.screen.x as f64, p.screen.y as f64);
					pen_down = true;
				}
				None => pen_down = false,
			}
		}
	}

	ctx.stroke();
}

fn draw_links(state: &NetworkState, ctx: &CanvasRenderingContext2d, theme: &NetworkTheme) {
	let camera = &state.camera;
	let view_proj = camera.view_projection();
	let density = state.config.fog_density;

	ctx.set_line_width(theme.links.line_width);

	for (a, b, color) in state.edges.segments() {
		let (Some(pa), Some(pb)) = (
			camera.project_with(&view_proj, state.orientation * a),
			camera.project_with(&view_proj, state.orientation * b),
		) else {
			continue;
		};

		let fog = fog_factor((pa.depth + pb.depth) * 0.5, density);
		let intensity = color.max_element() as f64 * fog;
		if intensity < theme.links.cull_intensity {
			continue;
		}

		ctx.set_stroke_style_str(&Color::from_unit(color).dim(fog).to_css());
		ctx.begin_path();
		ctx.move_to(pa.screen.x as f64, pa.screen.y as f64);
		ctx.line_to(pb.screen.x as f64, pb.screen.y as f64);
		ctx.stroke();
	}
}

fn draw_points(state: &NetworkState, ctx: &CanvasRenderingContext2d, theme: &NetworkTheme) {
	let camera = &state.camera;
	let view_proj = camera.view_projection();
	let density = state.config.fog_density;
	let size = theme.points.size;
	let half = size / 2.0;

	for p in &state.particles.particles {
		let Some(proj) = camera.project_with(&view_proj, state.orientation * p.position) else {
			continue;
		};

		let fog = fog_factor(proj.depth, density);
		ctx.set_fill_style_str(&theme.points.color.dim(fog).to_css());
		ctx.fill_rect(
			proj.screen.x as f64 - half,
			proj.screen.y as f64 - half,
			size,
			size,
		);
	}
}

/// Latitude rings and meridians of a unit sphere with `segments` divisions.
fn unit_sphere_wireframe(segments: usize) -> Vec<Vec<Vec3>> {
	let segments = segments.max(3);
	let point = |phi: f32, theta: f32| {
		Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin())
	};
	let mut lines = Vec::with_capacity(segments * 2);

	for k in 1..segments {
		let phi = PI * k as f32 / segments as f32;
		lines.push(
			(0..=segments)
				.map(|j| point(phi, TAU * j as f32 / segments as f32))
				.collect(),
		);
	}

	for j in 0..segments {
		let theta = TAU * j as f32 / segments as f32;
		lines.push(
			(0..=segments)
				.map(|k| point(PI * k as f32 / segments as f32, theta))
				.collect(),
		);
	}

	lines
}
