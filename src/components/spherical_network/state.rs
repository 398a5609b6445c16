//! Owned simulation state and the per-frame pipeline.
//!
//! Created once when the component mounts, then mutated each frame by the
//! animation loop and between frames by input handlers. Nothing here touches
//! the DOM, so the whole pipeline runs (and is tested) off the browser.

use glam::{Quat, Vec2};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::camera::Camera;
use super::config::NetworkConfig;
use super::connectivity::{EdgeBuffer, build_edges};
use super::interaction::{ControlSettings, InteractionController, InteractionMode};
use super::particles::ParticleSet;
use super::simulation::advance;

/// Everything the network needs from one frame to the next.
pub struct NetworkState {
	/// Sanitized configuration the network was built from.
	pub config: NetworkConfig,
	/// Particle population.
	pub particles: ParticleSet,
	/// Links from the last frame.
	pub edges: EdgeBuffer,
	/// Drag and momentum state.
	pub interaction: InteractionController,
	/// Camera used for projection and zoom.
	pub camera: Camera,
	/// Orientation of the particle group (sphere, points, and links).
	pub orientation: Quat,
	rng: StdRng,
	frame_count: u64,
}

impl NetworkState {
	/// Build a fresh network for a `width` x `height` viewport.
	pub fn new(config: NetworkConfig, width: f32, height: f32) -> Self {
		let config = config.sanitized();
		let mut rng = match config.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_entropy(),
		};
		let particles = ParticleSet::new(
			config.particle_count,
			config.sphere_radius,
			config.particle_speed,
			&mut rng,
		);

		Self {
			edges: edge_buffer(&config),
			interaction: InteractionController::new(ControlSettings::from(&config)),
			camera: Camera::new(&config, width, height),
			orientation: Quat::IDENTITY,
			particles,
			config,
			rng,
			frame_count: 0,
		}
	}

	/// Replace the whole particle population, keeping camera and rotation.
	pub fn reinitialize(&mut self) {
		self.particles = ParticleSet::new(
			self.config.particle_count,
			self.config.sphere_radius,
			self.config.particle_speed,
			&mut self.rng,
		);
		self.edges = edge_buffer(&self.config);
	}

	/// Run one frame: move particles, rebuild links, then rotate the group.
	/// Returns the number of links to draw.
	pub fn frame(&mut self) -> usize {
		advance(&mut self.particles, self.config.animation_speed);
		let links = build_edges(&mut self.particles, self.config.min_distance, &mut self.edges);
		self.interaction
			.update(&mut self.orientation, self.camera.right());
		self.frame_count += 1;
		links
	}

	/// Frames run since construction.
	pub fn frame_count(&self) -> u64 {
		self.frame_count
	}

	/// Current rotation source.
	pub fn mode(&self) -> InteractionMode {
		self.interaction.mode()
	}

	/// Track a new viewport size.
	pub fn resize(&mut self, width: f32, height: f32) {
		self.camera.resize(width, height);
	}

	/// Mouse button pressed on the container.
	pub fn pointer_down(&mut self, at: Vec2) {
		self.interaction.pointer_down(at);
	}

	/// Mouse moved over the container.
	pub fn pointer_move(&mut self, at: Vec2) {
		self.interaction.pointer_move(at);
	}

	/// Mouse released or left the container.
	pub fn pointer_up(&mut self) {
		self.interaction.pointer_up();
	}

	/// Touches at touchstart.
	pub fn touch_start(&mut self, touches: &[Vec2]) {
		self.interaction.touch_start(touches);
	}

	/// Touches at touchmove.
	pub fn touch_move(&mut self, touches: &[Vec2]) {
		self.interaction.touch_move(touches);
	}

	/// Touch lifted or cancelled.
	pub fn touch_end(&mut self) {
		self.interaction.touch_end();
	}

	/// Zoom by a wheel `deltaY`.
	pub fn wheel(&mut self, delta_y: f32) {
		self.camera.apply_wheel(delta_y);
	}
}

/// Links are sized and capped from the config in one place.
fn edge_buffer(config: &NetworkConfig) -> EdgeBuffer {
	EdgeBuffer::new(config.particle_count, config.max_connections)
}
