//! Hover label that "decodes" itself out of random binary digits.
//!
//! On pointer enter every non-space character flips to a random `0`/`1` and
//! keeps flickering; characters then snap back to the real text one at a time
//! in shuffled order. Re-entering while the effect runs does nothing.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use leptos::html;
use leptos::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use web_sys::MouseEvent;

const SCRAMBLE_INTERVAL: Duration = Duration::from_millis(50);
/// Delay before the first character is revealed.
const REVEAL_DELAY_MS: f64 = 200.0;
/// Gap between consecutive reveals.
const REVEAL_STEP_MS: f64 = 60.0;

/// Per-character state of one decoding run.
pub struct DecodeAnimation {
	plain: Vec<char>,
	current: Vec<char>,
	revealed: Vec<bool>,
	/// Non-space indices in reveal order.
	order: Vec<usize>,
	next_reveal: usize,
	rng: StdRng,
}

impl DecodeAnimation {
	/// Scramble `text` and pick a reveal order.
	pub fn new(text: &str, mut rng: StdRng) -> Self {
		let plain: Vec<char> = text.chars().collect();
		let revealed: Vec<bool> = plain.iter().map(|c| *c == ' ').collect();
		let mut order: Vec<usize> = (0..plain.len()).filter(|&i| !revealed[i]).collect();
		order.shuffle(&mut rng);

		let mut anim = Self {
			current: plain.clone(),
			plain,
			revealed,
			order,
			next_reveal: 0,
			rng,
		};
		anim.scramble();
		anim
	}

	/// Advance to `elapsed_ms` since the start: reveal every character whose
	/// time has come and re-roll the rest. Returns `true` once fully decoded.
	pub fn tick(&mut self, elapsed_ms: f64) -> bool {
		while self.next_reveal < self.order.len()
			&& elapsed_ms >= REVEAL_DELAY_MS + self.next_reveal as f64 * REVEAL_STEP_MS
		{
			let i = self.order[self.next_reveal];
			self.revealed[i] = true;
			self.current[i] = self.plain[i];
			self.next_reveal += 1;
		}
		self.scramble();
		self.is_finished()
	}

	/// Whether every character is back.
	pub fn is_finished(&self) -> bool {
		self.next_reveal == self.order.len()
	}

	/// Text to display right now.
	pub fn text(&self) -> String {
		self.current.iter().collect()
	}

	fn scramble(&mut self) {
		for (c, revealed) in self.current.iter_mut().zip(&self.revealed) {
			if !revealed {
				*c = if self.rng.gen_bool(0.5) { '1' } else { '0' };
			}
		}
	}
}

/// Inline label that plays [`DecodeAnimation`] on hover.
///
/// The width is measured once after mount and locked so the flickering
/// digits never reflow the surrounding line.
#[component]
pub fn BinaryText(
	#[prop(into)] text: String,
	#[prop(optional, into)] class: String,
) -> impl IntoView {
	let (display, set_display) = signal(text.clone());
	let (width, set_width) = signal(None::<f64>);
	let span_ref = NodeRef::<html::Span>::new();
	let running = StoredValue::new_local(None::<IntervalHandle>);

	Effect::new(move |_| {
		if let Some(span) = span_ref.get() {
			if width.get_untracked().is_none() {
				set_width.set(Some(span.get_bounding_client_rect().width()));
			}
		}
	});

	let on_mouseenter = move |_: MouseEvent| {
		if running.with_value(Option::is_some) {
			return;
		}
		let anim = Rc::new(RefCell::new(DecodeAnimation::new(
			&text,
			StdRng::from_entropy(),
		)));
		set_display.set(anim.borrow().text());

		let started = js_sys::Date::now();
		let handle = set_interval_with_handle(
			move || {
				let mut a = anim.borrow_mut();
				let done = a.tick(js_sys::Date::now() - started);
				set_display.set(a.text());
				if done {
					running.update_value(|h| {
						if let Some(h) = h.take() {
							h.clear();
						}
					});
				}
			},
			SCRAMBLE_INTERVAL,
		);
		if let Ok(h) = handle {
			running.set_value(Some(h));
		}
	};

	on_cleanup(move || {
		running.try_update_value(|h| {
			if let Some(h) = h.take() {
				h.clear();
			}
		});
	});

	let style = move || {
		let base = "display: inline-block; white-space: nowrap; cursor: pointer;";
		match width.get() {
			Some(w) => format!("{base} width: {w}px; text-align: left;"),
			None => base.to_string(),
		}
	};

	view! {
		<span
			node_ref=span_ref
			class=format!("binary-text {class}")
			style=style
			on:mouseenter=on_mouseenter
		>
			{move || display.get()}
		</span>
	}
}
