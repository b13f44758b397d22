//! Derives the node/edge model from a note collection.

use std::collections::{HashMap, HashSet};

use super::types::Note;

/// Radius of a node with no direct links, in graph-space pixels.
pub const BASE_RADIUS: f64 = 8.0;
const RADIUS_PER_LINK: f64 = 2.0;

const DIRECT_LINK_STRENGTH: f64 = 1.0;
const SHARED_TAG_STRENGTH: f64 = 0.3;

/// What a relationship between two notes is based on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
	/// One note's content references the other's title.
	DirectLink,
	/// The notes share at least one tag and have no direct link.
	SharedTag,
}

/// Graph-visual representation of one note, positioned in simulation space.
#[derive(Clone, Debug)]
pub struct GraphNode {
	pub id: String,
	pub title: String,
	pub content: String,
	pub tags: Vec<String>,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	/// Number of direct-link edges touching this node. Sizes the radius;
	/// shared-tag edges do not count.
	pub connections: usize,
}

/// Undirected relationship between two nodes, referenced by index into the
/// owning model's node vector.
#[derive(Clone, Debug)]
pub struct GraphEdge {
	pub source: usize,
	pub target: usize,
	pub kind: EdgeKind,
	pub strength: f64,
	/// Tags both endpoints carry. Empty for direct links.
	pub shared_tags: Vec<String>,
}

/// One generation of nodes and edges. Replaced wholesale on refresh; nodes
/// are never diffed or reused across generations.
#[derive(Clone, Debug, Default)]
pub struct GraphModel {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

/// Normalized key for an unordered node pair.
fn pair_key(a: usize, b: usize) -> (usize, usize) {
	(a.min(b), a.max(b))
}

/// Build a fresh model from a note snapshot. Initial positions are uniform
/// random over the viewport, drawn from `rng` (uniform in [0, 1)).
///
/// O(N²) in note count; callers regenerate only on explicit refresh.
pub fn generate(
	notes: &[Note],
	viewport_width: f64,
	viewport_height: f64,
	mut rng: impl FnMut() -> f64,
) -> GraphModel {
	let mut model = GraphModel::default();

	for note in notes {
		let (x, y) = (rng() * viewport_width, rng() * viewport_height);
		model.nodes.push(GraphNode {
			id: note.id.clone(),
			title: note.title.clone(),
			content: note.content.clone(),
			tags: note.tags.clone(),
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			radius: BASE_RADIUS,
			connections: 0,
		});
	}

	let title_to_index: HashMap<String, usize> = model
		.nodes
		.iter()
		.enumerate()
		.rev()
		.map(|(i, node)| (node.title.to_lowercase(), i))
		.collect();

	// Keeps the pair passes O(1) per lookup; thousand-note graphs would
	// otherwise rescan the whole edge list per candidate pair.
	let mut connected: HashSet<(usize, usize)> = HashSet::new();

	// Direct links first so they take precedence over shared tags.
	for (i, note) in notes.iter().enumerate() {
		for link in &note.links {
			let Some(&j) = title_to_index.get(&link.to_lowercase()) else {
				continue;
			};
			if i == j || !connected.insert(pair_key(i, j)) {
				continue;
			}
			model.edges.push(GraphEdge {
				source: i,
				target: j,
				kind: EdgeKind::DirectLink,
				strength: DIRECT_LINK_STRENGTH,
				shared_tags: Vec::new(),
			});
			model.nodes[i].connections += 1;
			model.nodes[j].connections += 1;
		}
	}

	for i in 0..model.nodes.len() {
		for j in 0..model.nodes.len() {
			if i == j || connected.contains(&pair_key(i, j)) {
				continue;
			}
			let shared: Vec<String> = model.nodes[i]
				.tags
				.iter()
				.filter(|tag| model.nodes[j].tags.contains(*tag))
				.cloned()
				.collect();
			if shared.is_empty() {
				continue;
			}
			connected.insert(pair_key(i, j));
			model.edges.push(GraphEdge {
				source: i,
				target: j,
				kind: EdgeKind::SharedTag,
				strength: SHARED_TAG_STRENGTH,
				shared_tags: shared,
			});
		}
	}

	for node in &mut model.nodes {
		node.radius = BASE_RADIUS.max(BASE_RADIUS + node.connections as f64 * RADIUS_PER_LINK);
	}

	recenter(&mut model.nodes, viewport_width, viewport_height);
	model
}

/// Translate all nodes so their bounding-box center sits at the viewport center.
fn recenter(nodes: &mut [GraphNode], viewport_width: f64, viewport_height: f64) {
	if nodes.is_empty() {
		return;
	}
	let (mut min_x, mut max_x, mut min_y, mut max_y) =
		(f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);
	for node in nodes.iter() {
		min_x = min_x.min(node.x);
		max_x = max_x.max(node.x);
		min_y = min_y.min(node.y);
		max_y = max_y.max(node.y);
	}
	let (dx, dy) = (
		viewport_width / 2.0 - (min_x + max_x) / 2.0,
		viewport_height / 2.0 - (min_y + max_y) / 2.0,
	);
	for node in nodes.iter_mut() {
		node.x += dx;
		node.y += dy;
	}
}
