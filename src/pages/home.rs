use leptos::prelude::*;

use crate::components::note_graph::{Note, NoteGraphCanvas};

fn note(id: &str, title: &str, content: &str, tags: &[&str], links: &[&str]) -> Note {
	Note {
		id: id.to_string(),
		title: title.to_string(),
		content: content.to_string(),
		tags: tags.iter().map(|t| t.to_string()).collect(),
		links: links.iter().map(|l| l.to_string()).collect(),
	}
}

/// A small linked note collection standing in for the external note store.
/// Link titles reference other notes' titles; shared tags form weak edges.
fn sample_notes() -> Vec<Note> {
	vec![
		note(
			"1",
			"Zettelkasten",
			"A slip-box of atomic notes, each linked to its neighbors. See [[Evergreen Notes]] and [[Backlinks]] for the habits that make it work.",
			&["method"],
			&["Evergreen Notes", "Backlinks"],
		),
		note(
			"2",
			"Evergreen Notes",
			"Notes written to be revisited and revised forever, not filed and forgotten. The opposite of meeting minutes.",
			&["method", "writing"],
			&["Zettelkasten"],
		),
		note(
			"3",
			"Backlinks",
			"Every link is bidirectional if you index it. Backlinks surface the notes that reference this one.",
			&["graph"],
			&[],
		),
		note(
			"4",
			"Spaced Repetition",
			"Review at expanding intervals. Pairs well with an atomic note habit like [[Zettelkasten]].",
			&["memory", "method"],
			&["Zettelkasten"],
		),
		note(
			"5",
			"Force-Directed Layout",
			"Treat nodes as charged particles and edges as springs, then let the system settle. See [[Graph Drawing]].",
			&["graph", "algorithms"],
			&["Graph Drawing"],
		),
		note(
			"6",
			"Graph Drawing",
			"The art of putting a graph on a plane without turning it into spaghetti.",
			&["graph", "algorithms"],
			&[],
		),
		note(
			"7",
			"Rust",
			"Systems language with ownership and borrowing. Compiles to [[WebAssembly]] nicely.",
			&["programming"],
			&["WebAssembly"],
		),
		note(
			"8",
			"WebAssembly",
			"A portable compile target that runs in the browser at near-native speed.",
			&["programming", "web"],
			&[],
		),
		note(
			"9",
			"Canvas Rendering",
			"Immediate-mode 2D drawing in the browser. The whole frame is repainted every tick, which keeps state management trivial.",
			&["web"],
			&["WebAssembly"],
		),
		note(
			"10",
			"Personal Knowledge Base",
			"Notes, links and tags in one place, with the link structure made visible as a graph.",
			&["method"],
			&["Zettelkasten", "Backlinks"],
		),
	]
}

/// Default Home Page: the full-screen note graph over the sample collection.
#[component]
pub fn Home() -> impl IntoView {
	let notes = RwSignal::new(sample_notes());
	let fit_requests = RwSignal::new(0u32);
	let last_opened = RwSignal::new(Option::<String>::None);

	let on_note_open = Callback::new(move |id: String| {
		log::info!("note double-clicked: {id}");
		last_opened.set(Some(id));
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<NoteGraphCanvas
					notes=notes
					fullscreen=true
					fit_requests=Signal::from(fit_requests)
					on_note_open=on_note_open
				/>
				<div class="graph-overlay">
					<h1>"Note Graph"</h1>
					<p class="subtitle">
						"Drag notes to reposition. Scroll to zoom. Drag the background to pan. "
						"Click a note for details, double-click to open it."
					</p>
					{move || {
						last_opened
							.get()
							.map(|id| view! { <p class="subtitle">"Last opened note id: " {id}</p> })
					}}
					<div class="graph-controls">
						<button on:click=move |_| fit_requests.update(|n| *n += 1)>
							"Fit view"
						</button>
						<button on:click=move |_| notes.set(sample_notes())>"Reshuffle"</button>
					</div>
				</div>
			</div>
		</ErrorBoundary>
	}
}
