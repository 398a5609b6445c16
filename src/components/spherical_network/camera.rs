//! Perspective camera looking at the sphere centre.
//!
//! The camera sits on its local +Z axis at `distance` from the origin. Only
//! the wheel moves it; rotation is applied to the particle group instead.

use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

use super::config::NetworkConfig;

/// A world point mapped onto the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
	/// Canvas position in CSS pixels.
	pub screen: Vec2,
	/// Distance from the camera along its view axis.
	pub depth: f32,
}

/// Camera state shared by the renderer and the wheel handler.
#[derive(Clone, Debug)]
pub struct Camera {
	/// Distance from the sphere centre, kept within the zoom range.
	pub distance: f32,
	/// Orientation of the camera itself (identity unless a host rotates it).
	pub orientation: Quat,
	/// Vertical field of view.
	pub fov_radians: f32,
	/// Near clipping distance.
	pub near: f32,
	/// Far clipping distance.
	pub far: f32,
	zoom_min: f32,
	zoom_max: f32,
	wheel_speed: f32,
	width: f32,
	height: f32,
}

impl Camera {
	/// Camera at the configured initial distance for a `width` x `height` canvas.
	pub fn new(config: &NetworkConfig, width: f32, height: f32) -> Self {
		let mut camera = Self {
			distance: config.initial_distance.clamp(config.zoom_min, config.zoom_max),
			orientation: Quat::IDENTITY,
			fov_radians: config.fov_degrees.to_radians(),
			near: config.near,
			far: config.far,
			zoom_min: config.zoom_min,
			zoom_max: config.zoom_max,
			wheel_speed: config.wheel_speed,
			width: 1.0,
			height: 1.0,
		};
		camera.resize(width, height);
		camera
	}

	/// Update the viewport size. Repeated calls with the same size are no-ops.
	pub fn resize(&mut self, width: f32, height: f32) {
		self.width = width.max(1.0);
		self.height = height.max(1.0);
	}

	/// Viewport width over height.
	pub fn aspect(&self) -> f32 {
		self.width / self.height
	}

	/// Viewport size in CSS pixels.
	pub fn viewport(&self) -> Vec2 {
		Vec2::new(self.width, self.height)
	}

	/// Move the camera in or out by a wheel `deltaY`, staying within the
	/// configured zoom range.
	pub fn apply_wheel(&mut self, delta_y: f32) {
		let next = self.distance + delta_y * self.wheel_speed;
		self.distance = next.clamp(self.zoom_min, self.zoom_max);
	}

	/// World-space eye position.
	pub fn position(&self) -> Vec3 {
		self.orientation * Vec3::new(0.0, 0.0, self.distance)
	}

	/// Camera-local X axis expressed in world space.
	pub fn right(&self) -> Vec3 {
		self.orientation * Vec3::X
	}

	/// Combined projection and view matrix.
	pub fn view_projection(&self) -> Mat4 {
		let proj = Mat4::perspective_rh(self.fov_radians, self.aspect(), self.near, self.far);
		let view = Mat4::look_at_rh(self.position(), Vec3::ZERO, self.orientation * Vec3::Y);
		proj * view
	}

	/// Project a world point using a precomputed `view_projection`.
	/// Returns `None` for points outside the near/far range.
	pub fn project_with(&self, view_proj: &Mat4, point: Vec3) -> Option<Projected> {
		let clip = *view_proj * Vec4::new(point.x, point.y, point.z, 1.0);
		if clip.w <= self.near || clip.z < 0.0 || clip.z > clip.w {
			return None;
		}

		let ndc = Vec2::new(clip.x / clip.w, clip.y / clip.w);
		let uv = Vec2::new(ndc.x * 0.5 + 0.5, 0.5 - ndc.y * 0.5);
		Some(Projected {
			screen: uv * self.viewport(),
			depth: clip.w,
		})
	}

	/// Project a single world point.
	pub fn project(&self, point: Vec3) -> Option<Projected> {
		self.project_with(&self.view_projection(), point)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn camera() -> Camera {
		Camera::new(&NetworkConfig::default(), 800.0, 400.0)
	}

	#[test]
	fn origin_projects_to_centre() {
		let p = camera().project(Vec3::ZERO).unwrap();
		assert!((p.screen.x - 400.0).abs() < 1e-3);
		assert!((p.screen.y - 200.0).abs() < 1e-3);
		assert!((p.depth - 1000.0).abs() < 1e-2);
	}

	#[test]
	fn up_is_up_on_screen() {
		let cam = camera();
		let top = cam.project(Vec3::new(0.0, 100.0, 0.0)).unwrap();
		let right = cam.project(Vec3::new(100.0, 0.0, 0.0)).unwrap();
		assert!(top.screen.y < 200.0);
		assert!(right.screen.x > 400.0);
	}

	#[test]
	fn closer_points_have_smaller_depth() {
		let cam = camera();
		let front = cam.project(Vec3::new(0.0, 0.0, 400.0)).unwrap();
		let back = cam.project(Vec3::new(0.0, 0.0, -400.0)).unwrap();
		assert!(front.depth < back.depth);
	}

	#[test]
	fn points_behind_camera_are_culled() {
		assert!(camera().project(Vec3::new(0.0, 0.0, 1500.0)).is_none());
	}

	#[test]
	fn wheel_clamps_to_zoom_range() {
		let mut cam = camera();
		for _ in 0..20 {
			cam.apply_wheel(1000.0);
			assert!(cam.distance <= 2000.0);
		}
		assert_eq!(cam.distance, 2000.0);

		for _ in 0..20 {
			cam.apply_wheel(-1000.0);
		}
		assert_eq!(cam.distance, 600.0);
	}

	#[test]
	fn wheel_step_is_half_delta() {
		let mut cam = camera();
		cam.apply_wheel(100.0);
		assert_eq!(cam.distance, 1050.0);
	}

	#[test]
	fn resize_updates_aspect() {
		let mut cam = camera();
		assert_eq!(cam.aspect(), 2.0);
		cam.resize(300.0, 300.0);
		cam.resize(300.0, 300.0);
		assert_eq!(cam.aspect(), 1.0);
		cam.resize(0.0, 0.0);
		assert!(cam.aspect().is_finite());
	}
}
