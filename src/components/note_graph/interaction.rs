//! Pointer/touch input to camera, drag, hover and selection state.
//!
//! Idle, Panning and Dragging are mutually exclusive; hover and selection
//! are orthogonal to all three. All coordinates arriving here are screen
//! (CSS pixel) positions relative to the canvas origin.

use super::camera::Camera;
use super::model::GraphNode;

/// Extra slop around a node's circle for pointer targeting.
const HIT_SLOP: f64 = 4.0;
/// Total pointer travel (manhattan) below which press+release is a click.
const CLICK_TRAVEL: f64 = 3.0;

/// Cursor feedback matching the current interaction state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
	Grab,
	Grabbing,
	Move,
	Pointer,
}

impl Cursor {
	pub fn css(&self) -> &'static str {
		match self {
			Cursor::Grab => "grab",
			Cursor::Grabbing => "grabbing",
			Cursor::Move => "move",
			Cursor::Pointer => "pointer",
		}
	}
}

/// Map a screen position to the node containing it, if any. When hit areas
/// overlap, the first node in iteration order wins; this is the defined
/// tie-break, not best-effort.
pub fn hit_test(nodes: &[GraphNode], camera: &Camera, sx: f64, sy: f64) -> Option<usize> {
	let (gx, gy) = camera.screen_to_graph(sx, sy);
	nodes.iter().position(|node| {
		let (dx, dy) = (node.x - gx, node.y - gy);
		(dx * dx + dy * dy).sqrt() <= node.radius + HIT_SLOP
	})
}

/// Interaction state machine. Owned by the coordinator; the single writer of
/// drag-target position/velocity while a drag is in progress.
#[derive(Clone, Debug, Default)]
pub struct Interaction {
	pub hovered: Option<usize>,
	pub selected: Option<usize>,
	pub dragging: Option<usize>,
	panning: bool,
	last: (f64, f64),
	travel: f64,
}

impl Interaction {
	/// Press: a hit node becomes the drag target, otherwise start panning.
	pub fn pointer_down(&mut self, nodes: &[GraphNode], camera: &Camera, sx: f64, sy: f64) {
		self.last = (sx, sy);
		self.travel = 0.0;
		match hit_test(nodes, camera, sx, sy) {
			Some(idx) => self.dragging = Some(idx),
			None => self.panning = true,
		}
	}

	/// Move: reposition the drag target, pan the camera, or track hover.
	pub fn pointer_move(
		&mut self,
		nodes: &mut [GraphNode],
		camera: &mut Camera,
		sx: f64,
		sy: f64,
	) {
		let (dx, dy) = (sx - self.last.0, sy - self.last.1);
		self.travel += dx.abs() + dy.abs();

		if let Some(idx) = self.dragging {
			if let Some(node) = nodes.get_mut(idx) {
				let (gx, gy) = camera.screen_to_graph(sx, sy);
				node.x = gx;
				node.y = gy;
				node.vx = 0.0;
				node.vy = 0.0;
			}
		} else if self.panning {
			camera.pan_by(dx, dy);
		} else {
			self.hovered = hit_test(nodes, camera, sx, sy);
		}
		self.last = (sx, sy);
	}

	/// Release: back to Idle. A press+release without meaningful travel is a
	/// click and toggles selection; clicking empty space clears it.
	pub fn pointer_up(&mut self, nodes: &[GraphNode], camera: &Camera, sx: f64, sy: f64) {
		let was_click = self.travel <= CLICK_TRAVEL;
		self.dragging = None;
		self.panning = false;
		if was_click {
			self.selected = match hit_test(nodes, camera, sx, sy) {
				Some(idx) if self.selected == Some(idx) => None,
				Some(idx) => Some(idx),
				None => None,
			};
		}
		self.hovered = hit_test(nodes, camera, sx, sy);
	}

	/// Pointer left the canvas: abandon any gesture and clear hover.
	pub fn pointer_leave(&mut self) {
		self.dragging = None;
		self.panning = false;
		self.hovered = None;
	}

	/// Wheel zoom, anchored at the pointer.
	pub fn wheel(&mut self, camera: &mut Camera, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		camera.zoom_at(sx, sy, factor);
	}

	pub fn cursor(&self) -> Cursor {
		if self.dragging.is_some() {
			Cursor::Grabbing
		} else if self.panning {
			Cursor::Move
		} else if self.hovered.is_some() {
			Cursor::Pointer
		} else {
			Cursor::Grab
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::note_graph::camera::{MAX_ZOOM, MIN_ZOOM};

	fn node_at(x: f64, y: f64) -> GraphNode {
		GraphNode {
			id: String::new(),
			title: String::new(),
			content: String::new(),
			tags: Vec::new(),
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			radius: 10.0,
			connections: 0,
		}
	}

	#[test]
	fn hit_test_respects_camera_transform() {
		let nodes = vec![node_at(100.0, 100.0)];
		let camera = Camera {
			x: 50.0,
			y: 0.0,
			zoom: 2.0,
		};
		// Node center maps to screen (250, 200).
		assert_eq!(hit_test(&nodes, &camera, 250.0, 200.0), Some(0));
		assert_eq!(hit_test(&nodes, &camera, 100.0, 100.0), None);
	}

	#[test]
	fn hit_test_prefers_first_node_in_order() {
		let nodes = vec![node_at(100.0, 100.0), node_at(102.0, 100.0)];
		let camera = Camera::default();
		assert_eq!(hit_test(&nodes, &camera, 101.0, 100.0), Some(0));
	}

	#[test]
	fn hit_test_on_empty_graph_is_none() {
		assert_eq!(hit_test(&[], &Camera::default(), 10.0, 10.0), None);
	}

	#[test]
	fn drag_moves_node_through_inverse_transform() {
		let mut nodes = vec![node_at(100.0, 100.0)];
		nodes[0].vx = 3.0;
		let mut camera = Camera {
			x: 20.0,
			y: -10.0,
			zoom: 2.0,
		};
		let mut interaction = Interaction::default();

		interaction.pointer_down(&nodes, &camera, 220.0, 190.0);
		assert_eq!(interaction.dragging, Some(0));
		assert_eq!(interaction.cursor(), Cursor::Grabbing);

		interaction.pointer_move(&mut nodes, &mut camera, 300.0, 250.0);
		let (gx, gy) = camera.screen_to_graph(300.0, 250.0);
		assert_eq!(nodes[0].x, gx);
		assert_eq!(nodes[0].y, gy);
		assert_eq!(nodes[0].vx, 0.0);
		assert_eq!(nodes[0].vy, 0.0);

		interaction.pointer_up(&nodes, &camera, 300.0, 250.0);
		assert_eq!(interaction.dragging, None);
		// The drag travelled; it must not count as a selection click.
		assert_eq!(interaction.selected, None);
	}

	#[test]
	fn pan_offsets_camera_by_pointer_delta() {
		let mut nodes: Vec<GraphNode> = Vec::new();
		let mut camera = Camera::default();
		let mut interaction = Interaction::default();

		interaction.pointer_down(&nodes, &camera, 100.0, 100.0);
		assert_eq!(interaction.cursor(), Cursor::Move);
		interaction.pointer_move(&mut nodes, &mut camera, 130.0, 80.0);
		assert_eq!(camera.x, 30.0);
		assert_eq!(camera.y, -20.0);
		interaction.pointer_up(&nodes, &camera, 130.0, 80.0);
		assert_eq!(interaction.cursor(), Cursor::Grab);
	}

	#[test]
	fn click_toggles_selection() {
		let nodes = vec![node_at(100.0, 100.0), node_at(300.0, 100.0)];
		let camera = Camera::default();
		let mut interaction = Interaction::default();

		interaction.pointer_down(&nodes, &camera, 100.0, 100.0);
		interaction.pointer_up(&nodes, &camera, 100.0, 100.0);
		assert_eq!(interaction.selected, Some(0));

		// Second click on the same node clears.
		interaction.pointer_down(&nodes, &camera, 100.0, 100.0);
		interaction.pointer_up(&nodes, &camera, 100.0, 100.0);
		assert_eq!(interaction.selected, None);

		// Clicking two different nodes keeps only the second.
		interaction.pointer_down(&nodes, &camera, 100.0, 100.0);
		interaction.pointer_up(&nodes, &camera, 100.0, 100.0);
		interaction.pointer_down(&nodes, &camera, 300.0, 100.0);
		interaction.pointer_up(&nodes, &camera, 300.0, 100.0);
		assert_eq!(interaction.selected, Some(1));
	}

	#[test]
	fn clicking_empty_space_clears_selection() {
		let nodes = vec![node_at(100.0, 100.0)];
		let camera = Camera::default();
		let mut interaction = Interaction::default();

		interaction.pointer_down(&nodes, &camera, 100.0, 100.0);
		interaction.pointer_up(&nodes, &camera, 100.0, 100.0);
		assert_eq!(interaction.selected, Some(0));

		interaction.pointer_down(&nodes, &camera, 500.0, 500.0);
		interaction.pointer_up(&nodes, &camera, 500.0, 500.0);
		assert_eq!(interaction.selected, None);
	}

	#[test]
	fn idle_move_tracks_hover_and_cursor() {
		let mut nodes = vec![node_at(100.0, 100.0)];
		let mut camera = Camera::default();
		let mut interaction = Interaction::default();

		interaction.pointer_move(&mut nodes, &mut camera, 100.0, 100.0);
		assert_eq!(interaction.hovered, Some(0));
		assert_eq!(interaction.cursor(), Cursor::Pointer);

		interaction.pointer_move(&mut nodes, &mut camera, 400.0, 400.0);
		assert_eq!(interaction.hovered, None);
		assert_eq!(interaction.cursor(), Cursor::Grab);
	}

	#[test]
	fn leave_abandons_gesture() {
		let nodes = vec![node_at(100.0, 100.0)];
		let camera = Camera::default();
		let mut interaction = Interaction::default();

		interaction.pointer_down(&nodes, &camera, 100.0, 100.0);
		interaction.pointer_leave();
		assert_eq!(interaction.dragging, None);
		assert_eq!(interaction.hovered, None);
		assert_eq!(interaction.cursor(), Cursor::Grab);
	}

	#[test]
	fn wheel_zoom_stays_clamped() {
		let mut camera = Camera::default();
		let mut interaction = Interaction::default();
		for _ in 0..300 {
			interaction.wheel(&mut camera, 400.0, 300.0, -1.0);
		}
		assert_eq!(camera.zoom, MAX_ZOOM);
		for _ in 0..600 {
			interaction.wheel(&mut camera, 400.0, 300.0, 1.0);
		}
		assert_eq!(camera.zoom, MIN_ZOOM);
	}
}
