//! Visual styling for the particle network.

use glam::Vec3;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Build an opaque color from linear `[0, 1]` channels (as produced by the
	/// connectivity pass).
	pub fn from_unit(rgb: Vec3) -> Self {
		let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
		Self::rgb(to_u8(rgb.x), to_u8(rgb.y), to_u8(rgb.z))
	}

	/// Scale the RGB channels, keeping alpha. Under additive blending this is
	/// the same as fading the color out.
	pub fn dim(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f).round() as u8,
			g: (self.g as f64 * f).round() as u8,
			b: (self.b as f64 * f).round() as u8,
			a: self.a,
		}
	}

	/// CSS color string, hex when opaque.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Wireframe sphere drawn behind the particles.
#[derive(Clone, Debug)]
pub struct WireframeStyle {
	/// Draw the wireframe at all.
	pub enabled: bool,
	/// Stroke color, usually translucent.
	pub color: Color,
	/// Stroke width in CSS pixels.
	pub line_width: f64,
}

/// Particle point sprites.
#[derive(Clone, Debug)]
pub struct PointStyle {
	/// Fill color before fog.
	pub color: Color,
	/// Diameter in CSS pixels, independent of depth.
	pub size: f64,
}

/// Connection lines.
#[derive(Clone, Debug)]
pub struct LinkStyle {
	/// Stroke width in CSS pixels.
	pub line_width: f64,
	/// Skip lines dimmer than this after fog.
	pub cull_intensity: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct NetworkTheme {
	/// Canvas compositing mode for points and links (`"lighter"` is additive).
	pub blend_mode: &'static str,
	/// Background sphere.
	pub wireframe: WireframeStyle,
	/// Particle sprites.
	pub points: PointStyle,
	/// Connection lines.
	pub links: LinkStyle,
}

impl Default for NetworkTheme {
	fn default() -> Self {
		Self {
			blend_mode: "lighter",
			wireframe: WireframeStyle {
				enabled: true,
				color: Color::rgba(0x1a, 0x1a, 0x1a, 0.15),
				line_width: 1.0,
			},
			points: PointStyle {
				color: Color::rgb(0x00, 0xff, 0xff),
				size: 5.0,
			},
			links: LinkStyle {
				line_width: 1.0,
				cull_intensity: 0.01,
			},
		}
	}
}

/// Exponential-squared fog factor: 1.0 at the eye, falling toward 0 with depth.
pub fn fog_factor(depth: f32, density: f32) -> f64 {
	let d = (density * depth) as f64;
	(-(d * d)).exp()
}
