//! Proximity links between particles.
//!
//! Every frame the full edge list is rebuilt from scratch into a buffer that
//! is allocated once. The buffer is never cleared: only the first
//! `count * 2` vertices are meaningful and everything after that is whatever
//! an earlier frame left behind. Use [`EdgeBuffer::vertices`] and
//! [`EdgeBuffer::colors`], which are already range-limited.

use glam::Vec3;

use super::particles::ParticleSet;

/// Line-segment vertex and color storage for the connection lines.
///
/// The buffer owns the per-particle link cap, so its size and the cap the
/// scan enforces can never disagree.
pub struct EdgeBuffer {
	positions: Vec<Vec3>,
	colors: Vec<Vec3>,
	count: usize,
	max_connections: usize,
}

impl EdgeBuffer {
	/// Allocate room for the largest edge set `particle_count` particles can
	/// produce with at most `max_connections` links each.
	pub fn new(particle_count: usize, max_connections: usize) -> Self {
		let capacity = max_segments(particle_count, max_connections);
		Self {
			positions: vec![Vec3::ZERO; capacity * 2],
			colors: vec![Vec3::ZERO; capacity * 2],
			count: 0,
			max_connections,
		}
	}

	/// Number of segments emitted by the last build.
	pub fn count(&self) -> usize {
		self.count
	}

	/// Maximum number of segments the buffer can hold.
	pub fn capacity(&self) -> usize {
		self.positions.len() / 2
	}

	/// Per-particle link cap enforced by [`build_edges`].
	pub fn max_connections(&self) -> usize {
		self.max_connections
	}

	/// Segment endpoints from the last build, two per segment.
	pub fn vertices(&self) -> &[Vec3] {
		&self.positions[..self.count * 2]
	}

	/// Per-vertex colors matching [`EdgeBuffer::vertices`].
	pub fn colors(&self) -> &[Vec3] {
		&self.colors[..self.count * 2]
	}

	/// Iterate `(start, end, color)` for each valid segment.
	pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3, Vec3)> + '_ {
		self.vertices()
			.chunks_exact(2)
			.zip(self.colors().chunks_exact(2))
			.map(|(v, c)| (v[0], v[1], c[0]))
	}

	/// Grow (never shrink) so every edge set of `particle_count` fits.
	fn fit(&mut self, particle_count: usize) {
		let needed = max_segments(particle_count, self.max_connections) * 2;
		if needed > self.positions.len() {
			self.positions.resize(needed, Vec3::ZERO);
			self.colors.resize(needed, Vec3::ZERO);
		}
	}
}

/// Upper bound on segments given the per-particle cap.
fn max_segments(particle_count: usize, max_connections: usize) -> usize {
	let all_pairs = particle_count.saturating_mul(particle_count.saturating_sub(1)) / 2;
	all_pairs.min(particle_count.saturating_mul(max_connections) / 2)
}

/// Intensity of a link of length `dist`: 1 at zero, 0 at `min_distance`.
pub fn edge_alpha(dist: f32, min_distance: f32) -> f32 {
	1.0 - dist / min_distance
}

/// Cyan-leaning gradient, brighter for closer pairs.
pub fn edge_color(alpha: f32) -> Vec3 {
	Vec3::new(0.5 * alpha, alpha, 0.8 * alpha)
}

/// Link every pair closer than `min_distance`, respecting the buffer's
/// per-particle cap, and write the segments into `out`. Returns the number of
/// segments.
///
/// Pairs are visited in ascending `(i, j)` order, so earlier-indexed pairs win
/// when a particle runs out of connections.
pub fn build_edges(set: &mut ParticleSet, min_distance: f32, out: &mut EdgeBuffer) -> usize {
	set.reset_connections();
	out.fit(set.len());
	out.count = 0;

	let max_connections = out.max_connections;
	let particles = &mut set.particles;
	let n = particles.len();

	for i in 0..n {
		if particles[i].connections >= max_connections {
			continue;
		}

		for j in (i + 1)..n {
			if particles[i].connections >= max_connections {
				break;
			}
			if particles[j].connections >= max_connections {
				continue;
			}

			let (a, b) = (particles[i].position, particles[j].position);
			let dist = a.distance(b);
			if dist >= min_distance {
				continue;
			}

			particles[i].connections += 1;
			particles[j].connections += 1;

			let color = edge_color(edge_alpha(dist, min_distance));
			let v = out.count * 2;
			out.positions[v] = a;
			out.positions[v + 1] = b;
			out.colors[v] = color;
			out.colors[v + 1] = color;
			out.count += 1;
		}
	}

	out.count
}
