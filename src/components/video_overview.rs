use leptos::prelude::*;
use web_sys::MouseEvent;

use super::speech::Narrator;

/// Splits narration text into scenes on `Scene N:` markers. Text before
/// the first marker becomes its own scene; without any markers the text
/// falls back to one scene per sentence.
fn split_scenes(text: &str) -> Vec<String> {
	let mut cuts = Vec::new();
	let mut search = 0;
	while let Some(found) = text[search..].find("Scene") {
		let start = search + found;
		let after = start + "Scene".len();
		let rest = text[after..].as_bytes();
		let mut k = 0;
		if rest.get(k) == Some(&b' ') {
			k += 1;
		}
		while rest.get(k).is_some_and(|b| b.is_ascii_digit()) {
			k += 1;
		}
		if rest.get(k) == Some(&b':') {
			cuts.push((start, after + k + 1));
		}
		search = after;
	}

	if cuts.is_empty() {
		let sentences: Vec<String> = text
			.split(". ")
			.map(str::trim)
			.filter(|s| !s.is_empty())
			.map(str::to_string)
			.collect();
		if sentences.is_empty() {
			return vec![text.trim().to_string()];
		}
		return sentences;
	}

	let mut scenes = Vec::new();
	let preamble = text[..cuts[0].0].trim();
	if !preamble.is_empty() {
		scenes.push(preamble.to_string());
	}
	for (i, &(_, content_start)) in cuts.iter().enumerate() {
		let end = cuts.get(i + 1).map_or(text.len(), |&(next_start, _)| next_start);
		let scene = text[content_start..end].trim();
		if !scene.is_empty() {
			scenes.push(scene.to_string());
		}
	}
	if scenes.is_empty() {
		scenes.push(text.trim().to_string());
	}
	scenes
}

/// Narrated slideshow: the overview text split into scenes, each spoken
/// in turn. Scenes advance automatically when their narration ends.
#[component]
pub fn VideoOverview(#[prop(into)] text: String) -> impl IntoView {
	let scenes = StoredValue::new(split_scenes(&text));
	let total = scenes.with_value(Vec::len);

	let scene = RwSignal::new(0usize);
	let playing = RwSignal::new(false);
	let speaking = RwSignal::new(false);
	let muted = RwSignal::new(false);
	let narrator = StoredValue::new_local(Narrator::new());

	let speak_current = move || {
		let idx = scene.get_untracked();
		let Some(line) = scenes.with_value(|s| s.get(idx).cloned()) else {
			playing.set(false);
			return;
		};
		let volume = if muted.get_untracked() { 0.0 } else { 1.0 };
		narrator.with_value(|n| {
			let Some(n) = n else {
				playing.set(false);
				return;
			};
			n.speak(
				&line,
				volume,
				move || speaking.set(true),
				move || {
					speaking.set(false);
					if idx + 1 < total {
						scene.set(idx + 1);
					} else {
						playing.set(false);
					}
				},
			);
		});
	};

	// Auto-advance: the end handler bumps `scene`, this picks it up.
	Effect::new(move |prev: Option<usize>| {
		let idx = scene.get();
		if playing.get_untracked() && prev.is_some_and(|p| p != idx) {
			speak_current();
		}
		idx
	});

	let stop_narration = move || {
		narrator.with_value(|n| {
			if let Some(n) = n {
				n.cancel();
			}
		});
		playing.set(false);
		speaking.set(false);
	};

	let on_play = move |_: MouseEvent| {
		if playing.get_untracked() {
			stop_narration();
		} else {
			playing.set(true);
			speak_current();
		}
	};

	let on_restart = move |_: MouseEvent| {
		stop_narration();
		scene.set(0);
	};

	let on_mute = move |_: MouseEvent| {
		muted.update(|m| *m = !*m);
	};

	on_cleanup(move || {
		let _ = narrator.try_with_value(|n| {
			if let Some(n) = n {
				n.cancel();
			}
		});
	});

	view! {
		<div class="overview video-overview">
			<div class="overview-header">
				<h2>"Video Overview"</h2>
				<p class="overview-subtitle">"AI-narrated visual presentation"</p>
			</div>

			<div class="overview-stage scene-stage">
				<span class="scene-counter">
					{move || format!("Scene {} of {total}", scene.get() + 1)}
				</span>
				{move || {
					scenes
						.with_value(|s| {
							let line = s[scene.get().min(s.len() - 1)].clone();
							let (title, body) = match line.find('.') {
								Some(dot) => {
									(line[..dot].to_string(), line[dot + 1..].trim().to_string())
								}
								None => (line, String::new()),
							};
							view! {
								<h3 class="scene-title">{title}</h3>
								<p class="scene-body">{body}</p>
							}
						})
				}}
				<Show when=move || speaking.get()>
					<p class="scene-speaking">"Speaking\u{2026}"</p>
				</Show>
			</div>

			<div class="scene-dots">
				{(0..total)
					.map(|i| {
						view! { <span class="dot" class:active=move || i <= scene.get()></span> }
					})
					.collect_view()}
			</div>

			<div class="overview-controls">
				<button class="control primary" on:click=on_play>
					{move || if playing.get() { "Pause" } else { "Play" }}
				</button>
				<button class="control" on:click=on_restart title="Restart">
					"\u{21BA}"
				</button>
				<button class="control" on:click=on_mute>
					{move || if muted.get() { "Unmute" } else { "Mute" }}
				</button>
			</div>

			<div class="scene-list">
				<h3>"Scenes"</h3>
				{move || {
					scenes
						.with_value(|s| {
							s.iter()
								.enumerate()
								.map(|(i, line)| {
									let preview = if line.chars().count() > 150 {
										let cut: String = line.chars().take(150).collect();
										format!("{cut}\u{2026}")
									} else {
										line.clone()
									};
									view! {
										<button
											class="scene-row"
											class:active=move || scene.get() == i
											on:click=move |_| {
												stop_narration();
												scene.set(i);
											}
										>
											<span class="scene-number">{i + 1}</span>
											<span class="scene-preview">{preview}</span>
										</button>
									}
								})
								.collect_view()
						})
				}}
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn numbered_markers_split_scenes() {
		let scenes = split_scenes("Scene 1: The setup begins. Scene 2: The payoff.");
		assert_eq!(scenes, ["The setup begins.", "The payoff."]);
	}

	#[test]
	fn preamble_before_first_marker_is_kept() {
		let scenes = split_scenes("Welcome to the tour. Scene 1: First stop.");
		assert_eq!(scenes, ["Welcome to the tour.", "First stop."]);
	}

	#[test]
	fn bare_scene_marker_counts() {
		let scenes = split_scenes("Scene: only one here");
		assert_eq!(scenes, ["only one here"]);
	}

	#[test]
	fn without_markers_sentences_become_scenes() {
		let scenes = split_scenes("First idea. Second idea. Third idea.");
		assert_eq!(scenes.len(), 3);
		assert_eq!(scenes[0], "First idea");
	}

	#[test]
	fn plain_text_is_a_single_scene() {
		let scenes = split_scenes("just one block of narration");
		assert_eq!(scenes, ["just one block of narration"]);
	}
}
