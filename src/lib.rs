//! sphere-folio: personal landing page with an interactive particle sphere.
//!
//! This crate provides a WASM profile page whose centrepiece is a rotating
//! network of particles drifting over a sphere, with drag/swipe rotation,
//! momentum, and wheel zoom.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

// Needed only for its `js` feature so `rand` can seed from the browser.
use getrandom as _;

pub mod components;

pub use components::binary_text::{BinaryText, DecodeAnimation};
pub use components::spherical_network::{
	InteractionMode, MountError, NetworkConfig, NetworkState, SphericalNetwork,
};

const NAME: &str = "Rakymzhan";
const TAGLINE: &str = "machine learning and software engineer";

/// Glyph drawn inside a social link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SocialIcon {
	Instagram,
	Github,
	Linkedin,
	Orcid,
}

/// An icon-only outbound profile link.
struct SocialLink {
	/// Accessible name, since the anchor has no text.
	label: &'static str,
	href: &'static str,
	icon: SocialIcon,
}

const SOCIAL_LINKS: [SocialLink; 4] = [
	SocialLink {
		label: "Instagram",
		href: "https://www.instagram.com/qonstan/",
		icon: SocialIcon::Instagram,
	},
	SocialLink {
		label: "GitHub",
		href: "https://github.com/qonstant",
		icon: SocialIcon::Github,
	},
	SocialLink {
		label: "LinkedIn",
		href: "https://www.linkedin.com/in/rakymzhan/",
		icon: SocialIcon::Linkedin,
	},
	SocialLink {
		label: "ORCID",
		href: "https://orcid.org/0009-0006-3107-2412",
		icon: SocialIcon::Orcid,
	},
];

const ORCID_PATH: &str = "M12 0C5.372 0 0 5.372 0 12s5.372 12 12 12 12-5.372 12-12S18.628 0 12 0zM7.369 4.378c.525 0 .947.431.947.947s-.422.947-.947.947a.95.95 0 0 1-.947-.947c0-.525.422-.947.947-.947zm-.722 3.038h1.444v10.041H6.647V7.416zm3.562 0h3.9c3.712 0 5.344 2.653 5.344 5.025 0 2.578-2.016 5.025-5.325 5.025h-3.919V7.416zm1.444 1.303v7.444h2.297c3.272 0 4.022-2.484 4.022-3.722 0-2.016-1.284-3.722-4.097-3.722h-2.222z";

/// 24x24 inline SVG for a social icon. Outline glyphs use the text color as
/// stroke; the ORCID mark is filled.
fn icon_view(icon: SocialIcon) -> AnyView {
	match icon {
		SocialIcon::Instagram => view! {
			<svg class="social-icon" viewBox="0 0 24 24" width="24" height="24" fill="none"
				stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
				<rect width="20" height="20" x="2" y="2" rx="5" ry="5" />
				<path d="M16 11.37A4 4 0 1 1 12.63 8 4 4 0 0 1 16 11.37z" />
				<line x1="17.5" x2="17.51" y1="6.5" y2="6.5" />
			</svg>
		}
		.into_any(),
		SocialIcon::Github => view! {
			<svg class="social-icon" viewBox="0 0 24 24" width="24" height="24" fill="none"
				stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
				<path d="M15 22v-4a4.8 4.8 0 0 0-1-3.5c3 0 6-2 6-5.5.08-1.25-.27-2.48-1-3.5.28-1.15.28-2.35 0-3.5 0 0-1 0-3 1.5-2.64-.5-5.36-.5-8 0C6 2 5 2 5 2c-.3 1.15-.3 2.35 0 3.5A5.403 5.403 0 0 0 4 9c0 3.5 3 5.5 6 5.5-.39.49-.68 1.05-.85 1.65-.17.6-.22 1.23-.15 1.85v4" />
				<path d="M9 18c-4.51 2-5-2-5-2" />
			</svg>
		}
		.into_any(),
		SocialIcon::Linkedin => view! {
			<svg class="social-icon" viewBox="0 0 24 24" width="24" height="24" fill="none"
				stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
				<path d="M16 8a6 6 0 0 1 6 6v7h-4v-7a2 2 0 0 0-2-2 2 2 0 0 0-2 2v7h-4v-7a6 6 0 0 1 6-6z" />
				<rect width="4" height="12" x="2" y="9" />
				<circle cx="4" cy="4" r="2" />
			</svg>
		}
		.into_any(),
		SocialIcon::Orcid => view! {
			<svg class="social-icon" viewBox="0 0 24 24" width="24" height="24" fill="currentColor">
				<path d=ORCID_PATH />
			</svg>
		}
		.into_any(),
	}
}

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("sphere-folio: logging initialized");
}

/// Load network overrides from a script element with id="network-config".
///
/// Missing element means defaults; malformed JSON is logged and ignored.
pub fn load_network_config() -> NetworkConfig {
	let Some(json_text) = network_config_text() else {
		return NetworkConfig::default();
	};

	match NetworkConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"sphere-folio: loaded network config ({} particles)",
				config.particle_count
			);
			config
		}
		Err(e) => {
			warn!("sphere-folio: failed to parse network config: {}", e);
			NetworkConfig::default()
		}
	}
}

fn network_config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("network-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

fn footer_text(year: u32) -> String {
	format!("© {year} {NAME}. All rights reserved.")
}

/// Main application component.
/// Renders the profile header, the particle network, and the footer.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_network_config();
	let year = js_sys::Date::new_0().get_full_year();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text=NAME />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		<Meta name="description" content=format!("{NAME}, {TAGLINE}") />

		<main class="landing">
			<header class="profile">
				<h1 class="profile-name">
					"Hello, I'm " <span class="accent">{NAME}</span>
				</h1>
				<p class="profile-tagline">
					"I'm a " <BinaryText text=TAGLINE class="accent" />
				</p>
				<nav class="profile-links">
					{SOCIAL_LINKS
						.iter()
						.map(|link| {
							view! {
								<a
									class="social-link"
									href=link.href
									target="_blank"
									rel="noopener noreferrer"
									aria-label=link.label
								>
									{icon_view(link.icon)}
								</a>
							}
						})
						.collect_view()}
				</nav>
			</header>

			<SphericalNetwork config=config />

			<footer class="site-footer">{footer_text(year)}</footer>
		</main>
	}
}
