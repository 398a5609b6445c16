//! Drag, momentum, and idle rotation of the particle group.
//!
//! Pointer and touch handlers only record deltas here; the rotation itself is
//! applied once per frame by [`InteractionController::update`].
//!
//! Drag deltas are stored as `(pitch, yaw)`: a vertical pointer movement tilts
//! the sphere about the camera's X axis, a horizontal movement spins it about
//! world Y.

use glam::{Quat, Vec2, Vec3};

use super::config::NetworkConfig;

/// Which rotation source currently drives the group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionMode {
	/// Slow automatic yaw.
	#[default]
	Idle,
	/// A pointer or single touch is held down.
	Dragging,
	/// Released; coasting on the last drag velocity.
	Momentum,
}

/// Rotation tuning pulled out of [`NetworkConfig`].
#[derive(Clone, Copy, Debug)]
pub struct ControlSettings {
	/// Radians per pixel of drag.
	pub rotation_speed: f32,
	/// Share of the drag delta kept for momentum.
	pub release_velocity_scale: f32,
	/// How far the applied delta moves toward the target each frame.
	pub smoothing: f32,
	/// Momentum multiplier per frame.
	pub damping: f32,
	/// Idle yaw per frame.
	pub auto_rotate_speed: f32,
	/// Momentum below this counts as stopped.
	pub epsilon: f32,
}

impl From<&NetworkConfig> for ControlSettings {
	fn from(config: &NetworkConfig) -> Self {
		Self {
			rotation_speed: config.rotation_speed,
			release_velocity_scale: config.release_velocity_scale,
			smoothing: config.smoothing,
			damping: config.damping,
			auto_rotate_speed: config.auto_rotate_speed,
			epsilon: config.momentum_epsilon,
		}
	}
}

/// Turns pointer/touch input into group rotation.
#[derive(Clone, Debug)]
pub struct InteractionController {
	mode: InteractionMode,
	settings: ControlSettings,
	/// Last pointer position seen while dragging.
	last_pointer: Vec2,
	/// Raw per-move delta the smoothed delta chases.
	pub target_delta: Vec2,
	/// Smoothed delta applied each dragging frame.
	pub current_delta: Vec2,
	/// Release velocity, decayed while coasting.
	pub velocity: Vec2,
}

impl InteractionController {
	/// Idle controller with no pending rotation.
	pub fn new(settings: ControlSettings) -> Self {
		Self {
			mode: InteractionMode::Idle,
			settings,
			last_pointer: Vec2::ZERO,
			target_delta: Vec2::ZERO,
			current_delta: Vec2::ZERO,
			velocity: Vec2::ZERO,
		}
	}

	/// Current rotation source.
	pub fn mode(&self) -> InteractionMode {
		self.mode
	}

	/// Whether a pointer or touch is held.
	pub fn is_dragging(&self) -> bool {
		self.mode == InteractionMode::Dragging
	}

	/// Start a drag at `at`, discarding any momentum.
	pub fn pointer_down(&mut self, at: Vec2) {
		self.mode = InteractionMode::Dragging;
		self.last_pointer = at;
		self.target_delta = Vec2::ZERO;
		self.current_delta = Vec2::ZERO;
		self.velocity = Vec2::ZERO;
	}

	/// Record the movement since the last event while dragging.
	pub fn pointer_move(&mut self, at: Vec2) {
		if !self.is_dragging() {
			return;
		}
		let delta = at - self.last_pointer;
		let s = &self.settings;

		// Screen Y drives pitch, screen X drives yaw.
		self.target_delta = Vec2::new(delta.y, delta.x) * s.rotation_speed;
		self.velocity = self.target_delta * s.release_velocity_scale;
		self.last_pointer = at;
	}

	/// Pointer released or left the container.
	pub fn pointer_up(&mut self) {
		if !self.is_dragging() {
			return;
		}
		self.mode = InteractionMode::Momentum;
		self.target_delta = Vec2::ZERO;
	}

	/// Only single-finger touches start a drag.
	pub fn touch_start(&mut self, touches: &[Vec2]) {
		if let [touch] = touches {
			self.pointer_down(*touch);
		}
	}

	/// Single-finger move; other touch counts are ignored.
	pub fn touch_move(&mut self, touches: &[Vec2]) {
		if let [touch] = touches {
			self.pointer_move(*touch);
		}
	}

	/// Finger lifted.
	pub fn touch_end(&mut self) {
		self.pointer_up();
	}

	/// Apply this frame's rotation to `orientation`. `camera_right` is the
	/// camera's local X axis in world space, used as the pitch axis.
	pub fn update(&mut self, orientation: &mut Quat, camera_right: Vec3) {
		let s = self.settings;

		match self.mode {
			InteractionMode::Dragging => {
				self.current_delta += (self.target_delta - self.current_delta) * s.smoothing;
				rotate(orientation, self.current_delta, camera_right);
			}
			InteractionMode::Momentum if self.has_momentum() => {
				rotate(orientation, self.velocity, camera_right);
				self.velocity *= s.damping;
			}
			InteractionMode::Momentum | InteractionMode::Idle => {
				self.mode = InteractionMode::Idle;
				let yaw = Quat::from_axis_angle(Vec3::Y, s.auto_rotate_speed);
				*orientation = (yaw * *orientation).normalize();
			}
		}
	}

	fn has_momentum(&self) -> bool {
		self.velocity.x.abs() > self.settings.epsilon || self.velocity.y.abs() > self.settings.epsilon
	}
}

/// Premultiply a yaw about world Y, then a pitch about `pitch_axis`.
fn rotate(orientation: &mut Quat, delta: Vec2, pitch_axis: Vec3) {
	let yaw = Quat::from_axis_angle(Vec3::Y, delta.y);
	let pitch = Quat::from_axis_angle(pitch_axis.normalize_or_zero(), delta.x);
	*orientation = (pitch * (yaw * *orientation)).normalize();
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::f32::consts::{PI, TAU};

	fn controller() -> InteractionController {
		InteractionController::new(ControlSettings::from(&NetworkConfig::default()))
	}

	/// Heading of the rotated +Z axis around world Y.
	fn yaw_of(q: Quat) -> f32 {
		let v = q * Vec3::Z;
		v.x.atan2(v.z)
	}

	#[test]
	fn idle_auto_rotates_about_y() {
		let mut ctl = controller();
		let mut q = Quat::IDENTITY;
		ctl.update(&mut q, Vec3::X);

		assert_eq!(ctl.mode(), InteractionMode::Idle);
		assert!((yaw_of(q) - 0.002).abs() < 1e-6);
		assert!((q * Vec3::Y - Vec3::Y).length() < 1e-6);
	}

	#[test]
	fn click_without_motion_returns_to_idle() {
		let mut ctl = controller();
		let mut q = Quat::IDENTITY;

		ctl.pointer_down(Vec2::new(10.0, 10.0));
		ctl.update(&mut q, Vec3::X);
		assert_eq!(q, Quat::IDENTITY);

		ctl.pointer_up();
		assert_eq!(ctl.mode(), InteractionMode::Momentum);
		assert_eq!(ctl.velocity, Vec2::ZERO);

		ctl.update(&mut q, Vec3::X);
		assert_eq!(ctl.mode(), InteractionMode::Idle);
		// Only the idle yaw was applied.
		assert!((yaw_of(q) - 0.002).abs() < 1e-6);
		assert!((q * Vec3::Y - Vec3::Y).length() < 1e-6);
	}

	#[test]
	fn move_sets_target_and_release_velocity() {
		let mut ctl = controller();
		ctl.pointer_down(Vec2::new(0.0, 0.0));
		ctl.pointer_move(Vec2::new(20.0, -10.0));

		assert!((ctl.target_delta - Vec2::new(-0.05, 0.1)).length() < 1e-6);
		assert!((ctl.velocity - Vec2::new(-0.04, 0.08)).length() < 1e-6);
	}

	#[test]
	fn moves_ignored_when_not_dragging() {
		let mut ctl = controller();
		ctl.pointer_move(Vec2::new(50.0, 50.0));
		assert_eq!(ctl.target_delta, Vec2::ZERO);
		assert_eq!(ctl.mode(), InteractionMode::Idle);
	}

	#[test]
	fn dragging_smooths_toward_target() {
		let mut ctl = controller();
		let mut q = Quat::IDENTITY;
		ctl.pointer_down(Vec2::ZERO);
		ctl.pointer_move(Vec2::new(10.0, 0.0));

		ctl.update(&mut q, Vec3::X);
		assert!((ctl.current_delta.y - 0.05 * 0.15).abs() < 1e-6);
		ctl.update(&mut q, Vec3::X);
		assert!(ctl.current_delta.y > 0.05 * 0.15);
		assert!(ctl.current_delta.y < 0.05);
		assert!(yaw_of(q) > 0.0);
	}

	#[test]
	fn momentum_decays_by_damping_then_idles() {
		let mut ctl = controller();
		let mut q = Quat::IDENTITY;
		ctl.pointer_down(Vec2::ZERO);
		ctl.pointer_move(Vec2::new(30.0, 20.0));
		ctl.pointer_up();

		let v0 = ctl.velocity;
		for n in 1..=10 {
			ctl.update(&mut q, Vec3::X);
			let expected = v0 * 0.92f32.powi(n);
			assert!((ctl.velocity - expected).length() < 1e-6);
			assert_eq!(ctl.mode(), InteractionMode::Momentum);
		}

		let mut frames = 0;
		while ctl.mode() == InteractionMode::Momentum {
			ctl.update(&mut q, Vec3::X);
			frames += 1;
			assert!(frames < 1_000);
		}
		assert!(ctl.velocity.x.abs() <= 1e-4 && ctl.velocity.y.abs() <= 1e-4);

		// Auto-rotation resumes.
		let before = yaw_of(q);
		ctl.update(&mut q, Vec3::X);
		assert_eq!(ctl.mode(), InteractionMode::Idle);
		let turned = (yaw_of(q) - before + PI).rem_euclid(TAU) - PI;
		assert!((turned - 0.002).abs() < 1e-4);
	}

	#[test]
	fn new_drag_cancels_momentum() {
		let mut ctl = controller();
		ctl.pointer_down(Vec2::ZERO);
		ctl.pointer_move(Vec2::new(30.0, 0.0));
		ctl.pointer_up();
		ctl.pointer_down(Vec2::new(5.0, 5.0));

		assert!(ctl.is_dragging());
		assert_eq!(ctl.velocity, Vec2::ZERO);
		assert_eq!(ctl.current_delta, Vec2::ZERO);
	}

	#[test]
	fn multi_touch_is_ignored() {
		let mut ctl = controller();
		ctl.touch_start(&[Vec2::ZERO, Vec2::ONE]);
		assert_eq!(ctl.mode(), InteractionMode::Idle);

		ctl.touch_start(&[Vec2::ZERO]);
		ctl.touch_move(&[Vec2::new(4.0, 0.0), Vec2::ONE]);
		assert_eq!(ctl.target_delta, Vec2::ZERO);
		ctl.touch_move(&[Vec2::new(4.0, 0.0)]);
		assert!(ctl.target_delta.y > 0.0);
		ctl.touch_end();
		assert_eq!(ctl.mode(), InteractionMode::Momentum);
	}

	#[test]
	fn orientation_stays_normalized() {
		let mut ctl = controller();
		let mut q = Quat::IDENTITY;
		ctl.pointer_down(Vec2::ZERO);
		for i in 0..500 {
			ctl.pointer_move(Vec2::new(i as f32 * 3.0, i as f32 * 2.0));
			ctl.update(&mut q, Vec3::X);
		}
		assert!((q.length() - 1.0).abs() < 1e-5);
	}
}
