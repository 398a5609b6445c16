//! Mount failures for the network component.

use thiserror::Error;

/// Reasons the visualization could not be attached to its container.
///
/// Neither is fatal to the page. Callers log and either retry later or skip
/// rendering.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MountError {
	/// The container has not been laid out yet (or has no area).
	#[error("container not ready ({width}x{height})")]
	NotReady {
		/// Measured CSS width.
		width: f64,
		/// Measured CSS height.
		height: f64,
	},

	/// The host cannot provide a 2D drawing context.
	#[error("graphics unavailable: {0}")]
	NoGraphics(String),
}

impl MountError {
	/// Whether mounting may succeed on a later attempt.
	pub fn is_retryable(&self) -> bool {
		matches!(self, MountError::NotReady { .. })
	}
}

/// Check that a container is big enough to derive an aspect ratio from.
pub fn ensure_sized(width: f64, height: f64) -> Result<(f64, f64), MountError> {
	if width >= 1.0 && height >= 1.0 && width.is_finite() && height.is_finite() {
		Ok((width, height))
	} else {
		Err(MountError::NotReady { width, height })
	}
}
