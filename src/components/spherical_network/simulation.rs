//! Per-frame particle motion.
//!
//! A project-and-correct integrator: each particle takes a first-order Euler
//! step, is pushed back onto the sphere, and has the radial part of its
//! velocity removed. The correction every frame keeps `|position| == radius`
//! exact no matter how long the animation runs.

use super::particles::ParticleSet;

/// Advance every particle by one frame. `speed` scales the velocity step.
pub fn advance(set: &mut ParticleSet, speed: f32) {
	let radius = set.radius();
	let radius_sq = radius * radius;
	let particle_speed = set.speed();

	for p in &mut set.particles {
		p.position += p.velocity * speed;

		let current = p.position.length();
		if current > f32::EPSILON {
			p.position *= radius / current;
		}

		let radial = p.velocity.dot(p.position) / radius_sq;
		p.velocity -= p.position * radial;
		p.velocity = p.velocity.normalize_or_zero() * particle_speed;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use glam::Vec3;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn seeded(count: usize) -> ParticleSet {
		ParticleSet::new(count, 400.0, 0.3, &mut StdRng::seed_from_u64(11))
	}

	#[test]
	fn stays_on_sphere_over_many_frames() {
		let mut set = seeded(100);
		for _ in 0..2_000 {
			advance(&mut set, 1.0);
		}
		for p in &set.particles {
			let rel = (p.position.length() - 400.0).abs() / 400.0;
			assert!(rel < 1e-5, "drifted by {rel}");
		}
	}

	#[test]
	fn velocity_stays_tangent_and_constant() {
		let mut set = seeded(100);
		for _ in 0..500 {
			advance(&mut set, 1.0);
		}
		for p in &set.particles {
			assert!((p.velocity.length() - 0.3).abs() < 1e-5);
			let cos = p.velocity.normalize().dot(p.position.normalize());
			assert!(cos.abs() < 1e-3);
		}
	}

	#[test]
	fn particles_actually_move() {
		let mut set = seeded(10);
		let before: Vec<Vec3> = set.particles.iter().map(|p| p.position).collect();
		advance(&mut set, 1.0);
		for (p, b) in set.particles.iter().zip(before) {
			assert!(p.position.distance(b) > 0.1);
		}
	}

	#[test]
	fn zero_speed_only_reprojects() {
		let mut set = seeded(10);
		let before: Vec<Vec3> = set.particles.iter().map(|p| p.position).collect();
		advance(&mut set, 0.0);
		for (p, b) in set.particles.iter().zip(before) {
			assert!(p.position.distance(b) < 1e-3);
		}
	}
}
