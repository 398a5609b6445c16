// Host-side tests that drive the particle network through its public API.
// Nothing here needs a browser; the component and renderer are not touched.

#![allow(unused_crate_dependencies)]

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sphere_folio::components::spherical_network::{
	EdgeBuffer, InteractionMode, NetworkConfig, NetworkState, ParticleSet, advance, build_edges,
};

fn network(count: usize, seed: u64) -> NetworkState {
	let config = NetworkConfig {
		particle_count: count,
		seed: Some(seed),
		..NetworkConfig::default()
	};
	NetworkState::new(config, 1024.0, 400.0)
}

#[test]
fn particles_stay_on_sphere_and_tangent() {
	let mut state = network(300, 1);
	let radius = state.config.sphere_radius;

	for _ in 0..600 {
		state.frame();
	}

	for p in &state.particles.particles {
		assert!((p.position.length() - radius).abs() < radius * 1e-3);
		let cos = p.velocity.dot(p.position) / (p.velocity.length() * p.position.length());
		assert!(cos.abs() < 1e-3, "velocity not tangent: cos = {cos}");
		assert!((p.velocity.length() - state.config.particle_speed).abs() < 1e-4);
	}
}

#[test]
fn connection_cap_holds_every_frame() {
	let mut state = network(500, 2);
	let cap = state.config.max_connections;

	for _ in 0..30 {
		let links = state.frame();
		assert_eq!(links, state.edges.count());
		assert!(links <= state.edges.capacity());
		assert!(state.particles.particles.iter().all(|p| p.connections <= cap));

		let total: usize = state.particles.particles.iter().map(|p| p.connections).sum();
		assert_eq!(total, links * 2);
	}
}

#[test]
fn links_are_shorter_than_threshold() {
	let mut state = network(400, 3);
	state.frame();
	let threshold = state.config.min_distance;

	for (a, b, color) in state.edges.segments() {
		assert!(a.distance(b) < threshold);
		assert!(color.max_element() <= 1.0);
	}
}

/// Links the plain greedy way: ascending `(i, j)`, skipping capped particles.
fn greedy_links(points: &[Vec3], threshold: f32, cap: usize) -> Vec<(Vec3, Vec3)> {
	let mut taken = vec![0usize; points.len()];
	let mut links = Vec::new();
	for i in 0..points.len() {
		for j in (i + 1)..points.len() {
			if taken[i] < cap && taken[j] < cap && points[i].distance(points[j]) < threshold {
				taken[i] += 1;
				taken[j] += 1;
				links.push((points[i], points[j]));
			}
		}
	}
	links
}

#[test]
fn every_close_pair_is_linked_unless_capped() {
	let mut state = network(300, 11);
	for _ in 0..5 {
		state.frame();
	}

	let points: Vec<Vec3> = state.particles.particles.iter().map(|p| p.position).collect();
	let emitted: Vec<(Vec3, Vec3)> = state.edges.segments().map(|(a, b, _)| (a, b)).collect();
	let expected = greedy_links(&points, state.config.min_distance, state.config.max_connections);

	assert!(!expected.is_empty());
	assert_eq!(emitted, expected);
}

#[test]
fn tight_cluster_links_every_pair() {
	let mut rng = StdRng::seed_from_u64(9);
	let mut set = ParticleSet::new(4, 400.0, 0.3, &mut rng);
	let north = [
		Vec3::new(0.0, 1.0, 0.0),
		Vec3::new(0.05, 1.0, 0.0),
		Vec3::new(0.0, 1.0, 0.05),
		Vec3::new(-0.05, 1.0, 0.0),
	];
	for (p, dir) in set.particles.iter_mut().zip(north) {
		p.position = dir.normalize() * 400.0;
	}
	let mut edges = EdgeBuffer::new(4, 10);

	assert_eq!(build_edges(&mut set, 200.0, &mut edges), 6);
	assert!(set.particles.iter().all(|p| p.connections == 3));
}

#[test]
fn rebuilding_without_motion_is_stable() {
	let mut rng = StdRng::seed_from_u64(5);
	let mut set = ParticleSet::new(250, 400.0, 0.3, &mut rng);
	advance(&mut set, 1.0);
	let mut edges = EdgeBuffer::new(250, 10);

	let first = build_edges(&mut set, 200.0, &mut edges);
	let snapshot = edges.vertices().to_vec();
	let second = build_edges(&mut set, 200.0, &mut edges);

	assert_eq!(first, second);
	assert_eq!(edges.vertices(), snapshot.as_slice());
}

#[test]
fn wheel_zoom_is_bounded() {
	let mut state = network(10, 4);
	assert_eq!(state.camera.distance, 1000.0);

	state.wheel(100.0);
	assert_eq!(state.camera.distance, 1050.0);

	for _ in 0..50 {
		state.wheel(500.0);
	}
	assert_eq!(state.camera.distance, 2000.0);

	for _ in 0..50 {
		state.wheel(-500.0);
	}
	assert_eq!(state.camera.distance, 600.0);
}

#[test]
fn release_coasts_then_returns_to_idle() {
	let mut state = network(20, 6);
	assert_eq!(state.mode(), InteractionMode::Idle);

	state.pointer_down(Vec2::new(100.0, 100.0));
	state.pointer_move(Vec2::new(200.0, 100.0));
	state.frame();
	assert_eq!(state.mode(), InteractionMode::Dragging);

	state.pointer_up();
	state.frame();
	assert_eq!(state.mode(), InteractionMode::Momentum);

	let mut frames = 0;
	while state.mode() == InteractionMode::Momentum && frames < 500 {
		state.frame();
		frames += 1;
	}
	assert_eq!(state.mode(), InteractionMode::Idle);
	assert!(frames > 50, "momentum decayed too fast ({frames} frames)");
}

#[test]
fn multi_touch_does_not_drag() {
	let mut state = network(10, 7);
	state.touch_start(&[Vec2::ZERO, Vec2::new(50.0, 50.0)]);
	assert_eq!(state.mode(), InteractionMode::Idle);

	state.touch_start(&[Vec2::ZERO]);
	assert_eq!(state.mode(), InteractionMode::Dragging);
	state.touch_end();
	assert_eq!(state.mode(), InteractionMode::Momentum);
}

#[test]
fn partial_json_config_keeps_defaults() {
	let config = NetworkConfig::from_json(r#"{ "particle_count": 120, "zoom_min": 3000 }"#)
		.expect("valid json");
	assert_eq!(config.particle_count, 120);
	assert_eq!(config.sphere_radius, 400.0);
	assert!(config.zoom_min <= config.zoom_max);

	assert!(NetworkConfig::from_json("{ not json").is_err());
}
