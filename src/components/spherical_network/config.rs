//! Tunable parameters for the particle network.
//!
//! Every field has a default matching the tuned look of the landing page, so a
//! host page only needs to supply the values it wants to change:
//!
//! ```json
//! { "particle_count": 300, "min_distance": 180.0, "seed": 7 }
//! ```

use serde::Deserialize;

/// Complete configuration for the spherical particle network.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
	/// Number of particles placed on the sphere.
	pub particle_count: usize,
	/// Sphere radius in world units.
	pub sphere_radius: f32,
	/// Magnitude of every particle velocity (world units per frame).
	pub particle_speed: f32,
	/// Per-frame integration scalar applied to velocity.
	pub animation_speed: f32,

	/// Maximum distance at which two particles are connected.
	pub min_distance: f32,
	/// Maximum connections a single particle may take part in per frame.
	pub max_connections: usize,

	/// Radians of rotation per pixel of drag.
	pub rotation_speed: f32,
	/// Fraction of the drag delta kept as release velocity.
	pub release_velocity_scale: f32,
	/// Exponential smoothing factor applied while dragging.
	pub smoothing: f32,
	/// Per-frame velocity multiplier after release.
	pub damping: f32,
	/// Idle yaw in radians per frame.
	pub auto_rotate_speed: f32,
	/// Velocity below which momentum is considered spent.
	pub momentum_epsilon: f32,

	/// Closest allowed camera distance.
	pub zoom_min: f32,
	/// Farthest allowed camera distance.
	pub zoom_max: f32,
	/// Camera distance at mount.
	pub initial_distance: f32,
	/// Camera distance change per unit of wheel `deltaY`.
	pub wheel_speed: f32,
	/// Vertical field of view in degrees.
	pub fov_degrees: f32,
	/// Near clipping plane.
	pub near: f32,
	/// Far clipping plane.
	pub far: f32,

	/// Exponential-squared fog density (0.0 disables fog).
	pub fog_density: f32,
	/// Latitude/longitude segments of the wireframe sphere.
	pub sphere_segments: usize,

	/// Fixed RNG seed for reproducible layouts. `None` seeds from entropy.
	pub seed: Option<u64>,
}

impl Default for NetworkConfig {
	fn default() -> Self {
		Self {
			particle_count: 500,
			sphere_radius: 400.0,
			particle_speed: 0.3,
			animation_speed: 1.0,
			min_distance: 200.0,
			max_connections: 10,
			rotation_speed: 0.005,
			release_velocity_scale: 0.8,
			smoothing: 0.15,
			damping: 0.92,
			auto_rotate_speed: 0.002,
			momentum_epsilon: 1e-4,
			zoom_min: 600.0,
			zoom_max: 2000.0,
			initial_distance: 1000.0,
			wheel_speed: 0.5,
			fov_degrees: 60.0,
			near: 1.0,
			far: 4000.0,
			fog_density: 0.0008,
			sphere_segments: 32,
			seed: None,
		}
	}
}

impl NetworkConfig {
	/// Parse a (possibly partial) JSON override on top of the defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str::<Self>(json).map(Self::sanitized)
	}

	/// Clamp values that would break the simulation or the projection.
	pub fn sanitized(mut self) -> Self {
		let defaults = Self::default();

		if !(self.sphere_radius > 0.0) {
			self.sphere_radius = defaults.sphere_radius;
		}
		if !(self.min_distance > 0.0) {
			self.min_distance = defaults.min_distance;
		}
		if !(self.particle_speed >= 0.0) {
			self.particle_speed = defaults.particle_speed;
		}
		self.smoothing = self.smoothing.clamp(0.0, 1.0);
		self.damping = self.damping.clamp(0.0, 1.0);
		self.momentum_epsilon = self.momentum_epsilon.max(0.0);

		if self.zoom_min > self.zoom_max {
			std::mem::swap(&mut self.zoom_min, &mut self.zoom_max);
		}
		self.initial_distance = self.initial_distance.clamp(self.zoom_min, self.zoom_max);

		if !(self.near > 0.0) {
			self.near = defaults.near;
		}
		if self.far <= self.near {
			self.far = self.near + defaults.far;
		}
		self.fov_degrees = self.fov_degrees.clamp(1.0, 179.0);
		self.sphere_segments = self.sphere_segments.max(3);
		// A particle can link to at most every other particle.
		self.max_connections = self
			.max_connections
			.min(self.particle_count.saturating_sub(1));
		self
	}
}
