//! Interactive particle network on a sphere.
//!
//! Renders a rotating sphere of drifting particles on an HTML canvas with:
//! - Particles constrained to the sphere surface with tangential motion
//! - Proximity links rebuilt every frame, brighter for closer pairs
//! - Drag/swipe rotation with smoothing and momentum, idle auto-rotation
//! - Wheel zoom within fixed bounds
//!
//! Each frame runs `advance -> build_edges -> rotate -> render` on a single
//! owned [`NetworkState`]. Everything except the component and the renderer is
//! plain Rust and can be driven without a browser.
//!
//! # Example
//!
//! ```ignore
//! use sphere_folio::{NetworkConfig, SphericalNetwork};
//!
//! let config = NetworkConfig { particle_count: 300, ..NetworkConfig::default() };
//! view! { <SphericalNetwork config=config height=500.0 /> }
//! ```

mod animation;
pub mod camera;
mod component;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod interaction;
pub mod particles;
mod render;
pub mod simulation;
pub mod state;
pub mod theme;

pub use component::SphericalNetwork;
pub use config::NetworkConfig;
pub use connectivity::{EdgeBuffer, build_edges};
pub use error::MountError;
pub use interaction::{InteractionController, InteractionMode};
pub use particles::{Particle, ParticleSet};
pub use simulation::advance;
pub use state::NetworkState;
