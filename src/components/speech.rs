//! Thin wrapper over the browser's speech synthesis.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance};

/// Narration speed used by every overview.
pub const NARRATION_RATE: f32 = 0.9;

/// Speaks text through `window.speechSynthesis` and reports the
/// utterance's start and end events through plain callbacks.
pub struct Narrator {
	synth: SpeechSynthesis,
}

impl Narrator {
	/// `None` when the browser exposes no speech synthesis at all.
	pub fn new() -> Option<Self> {
		let synth = web_sys::window()?.speech_synthesis().ok()?;
		Some(Self { synth })
	}

	/// Queues `text`, cancelling anything still speaking first.
	pub fn speak(
		&self,
		text: &str,
		volume: f32,
		on_start: impl FnMut() + 'static,
		on_end: impl FnMut() + 'static,
	) {
		self.synth.cancel();
		let Ok(utterance) = SpeechSynthesisUtterance::new_with_text(text) else {
			return;
		};
		utterance.set_rate(NARRATION_RATE);
		utterance.set_pitch(1.0);
		utterance.set_volume(volume);

		let start: Closure<dyn FnMut()> = Closure::new(on_start);
		utterance.set_onstart(Some(start.as_ref().unchecked_ref()));
		let end: Closure<dyn FnMut()> = Closure::new(on_end);
		utterance.set_onend(Some(end.as_ref().unchecked_ref()));
		// The browser may fire these after every Rust scope that could own
		// them is gone (a cancelled utterance still ends), so the handlers
		// are handed over to the JS garbage collector.
		start.forget();
		end.forget();

		self.synth.speak(&utterance);
	}

	/// Stops whatever is currently speaking.
	pub fn cancel(&self) {
		self.synth.cancel();
	}
}
