/// A note as exposed by the external note store.
///
/// The graph never mutates notes and never touches persistence; it derives
/// its own node/edge model from a snapshot of these.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Note {
	/// Opaque unique identifier.
	pub id: String,
	/// Title, used as the link-target key (matched case-insensitively).
	pub title: String,
	/// Full note body, shown truncated in the detail overlay.
	pub content: String,
	pub tags: Vec<String>,
	/// Outbound link titles, pre-extracted from the content by the note layer.
	pub links: Vec<String>,
}
