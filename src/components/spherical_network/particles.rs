//! Particle population living on the sphere surface.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

/// A single particle on the sphere.
#[derive(Clone, Debug)]
pub struct Particle {
	/// Point on the sphere surface.
	pub position: Vec3,
	/// Always tangent to the sphere at `position`.
	pub velocity: Vec3,
	/// Connections taken this frame; reset by the connectivity pass.
	pub connections: usize,
}

/// Fixed-size particle population constrained to a sphere of `radius`.
pub struct ParticleSet {
	/// Particles in index order.
	pub particles: Vec<Particle>,
	radius: f32,
	speed: f32,
}

impl ParticleSet {
	/// Scatter `count` particles uniformly over the sphere, each with a random
	/// tangential velocity of magnitude `speed`.
	pub fn new<R: Rng + ?Sized>(count: usize, radius: f32, speed: f32, rng: &mut R) -> Self {
		let mut particles = Vec::with_capacity(count);

		for _ in 0..count {
			let theta = rng.gen_range(0.0..TAU);
			// acos(2u - 1) keeps the density uniform per unit area
			let phi = (2.0 * rng.gen_range(0.0f32..1.0) - 1.0).acos();

			let position = Vec3::new(
				radius * phi.sin() * theta.cos(),
				radius * phi.sin() * theta.sin(),
				radius * phi.cos(),
			);

			let random_dir = Vec3::new(
				rng.gen_range(-0.5..0.5),
				rng.gen_range(-0.5..0.5),
				rng.gen_range(-0.5..0.5),
			)
			.normalize_or_zero();

			let velocity = random_dir
				.cross(position)
				.try_normalize()
				.unwrap_or_else(|| position.normalize().any_orthonormal_vector())
				* speed;

			particles.push(Particle {
				position,
				velocity,
				connections: 0,
			});
		}

		Self {
			particles,
			radius,
			speed,
		}
	}

	/// Radius every position is projected back onto.
	pub fn radius(&self) -> f32 {
		self.radius
	}

	/// Magnitude every velocity is renormalized to.
	pub fn speed(&self) -> f32 {
		self.speed
	}

	/// Number of particles.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// Whether the set has no particles.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Zero every per-frame connection count.
	pub fn reset_connections(&mut self) {
		for p in &mut self.particles {
			p.connections = 0;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn particles_start_on_sphere_surface() {
		let mut rng = StdRng::seed_from_u64(1);
		let set = ParticleSet::new(200, 400.0, 0.3, &mut rng);

		assert_eq!(set.len(), 200);
		for p in &set.particles {
			assert!((p.position.length() - 400.0).abs() < 400.0 * 1e-5);
		}
	}

	#[test]
	fn initial_velocity_is_tangent_with_fixed_speed() {
		let mut rng = StdRng::seed_from_u64(2);
		let set = ParticleSet::new(200, 400.0, 0.3, &mut rng);

		for p in &set.particles {
			assert!((p.velocity.length() - 0.3).abs() < 1e-5);
			let cos = p.velocity.normalize().dot(p.position.normalize());
			assert!(cos.abs() < 1e-4, "radial component {cos}");
			assert_eq!(p.connections, 0);
		}
	}

	#[test]
	fn same_seed_same_layout() {
		let a = ParticleSet::new(16, 10.0, 1.0, &mut StdRng::seed_from_u64(7));
		let b = ParticleSet::new(16, 10.0, 1.0, &mut StdRng::seed_from_u64(7));
		for (pa, pb) in a.particles.iter().zip(&b.particles) {
			assert_eq!(pa.position, pb.position);
			assert_eq!(pa.velocity, pb.velocity);
		}
	}

	#[test]
	fn empty_population() {
		let set = ParticleSet::new(0, 400.0, 0.3, &mut StdRng::seed_from_u64(0));
		assert!(set.is_empty());
	}
}
