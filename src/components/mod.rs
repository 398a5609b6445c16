//! UI components for the landing page.

pub mod binary_text;
pub mod spherical_network;
