//! Force simulation over the graph model.
//!
//! One fixed step per animation frame: pairwise repulsion, Hookean springs
//! along edges, damped integration, then inelastic wall clamping.

use super::model::{EdgeKind, GraphEdge, GraphNode};

/// Simulation constants. Defaults are tuned for personal-scale note graphs
/// (tens to low hundreds of nodes).
#[derive(Clone, Debug)]
pub struct PhysicsConfig {
	/// Pairwise repulsion strength (Coulomb-style, divided by distance squared).
	pub repulsion: f64,
	/// Spring stiffness along edges.
	pub attraction: f64,
	/// Velocity multiplier applied each step, < 1.
	pub damping: f64,
	/// Lower clamp on pair distance in the repulsion term; bounds the force
	/// when nodes nearly coincide.
	pub min_distance: f64,
	/// Repulsion cutoff, and the rest length of direct-link springs.
	/// Shared-tag springs rest at 1.5x this.
	pub max_distance: f64,
	/// Gap kept between a node's rim and the canvas edge.
	pub wall_margin: f64,
}

impl Default for PhysicsConfig {
	fn default() -> Self {
		Self {
			repulsion: 4000.0,
			attraction: 0.01,
			damping: 0.92,
			min_distance: 30.0,
			max_distance: 150.0,
			wall_margin: 10.0,
		}
	}
}

impl PhysicsConfig {
	fn rest_length(&self, kind: EdgeKind) -> f64 {
		match kind {
			EdgeKind::DirectLink => self.max_distance,
			EdgeKind::SharedTag => self.max_distance * 1.5,
		}
	}
}

/// Advance the simulation one step, mutating node velocity and position in
/// place. The node being dragged (if any) is left entirely to the
/// interaction layer: no force, integration or clamping touches it, while
/// it still exerts forces on its neighbors.
pub fn step(
	nodes: &mut [GraphNode],
	edges: &[GraphEdge],
	width: f64,
	height: f64,
	dragged: Option<usize>,
	config: &PhysicsConfig,
) {
	apply_repulsion(nodes, dragged, config);
	apply_springs(nodes, edges, dragged, config);

	for (i, node) in nodes.iter_mut().enumerate() {
		if dragged == Some(i) {
			continue;
		}
		node.vx *= config.damping;
		node.vy *= config.damping;
		node.x += node.vx;
		node.y += node.vy;

		let (lo_x, lo_y) = (
			node.radius + config.wall_margin,
			node.radius + config.wall_margin,
		);
		let (hi_x, hi_y) = (
			(width - node.radius - config.wall_margin).max(lo_x),
			(height - node.radius - config.wall_margin).max(lo_y),
		);
		if node.x < lo_x {
			node.x = lo_x;
			node.vx = 0.0;
		} else if node.x > hi_x {
			node.x = hi_x;
			node.vx = 0.0;
		}
		if node.y < lo_y {
			node.y = lo_y;
			node.vy = 0.0;
		} else if node.y > hi_y {
			node.y = hi_y;
			node.vy = 0.0;
		}
	}
}

fn apply_repulsion(nodes: &mut [GraphNode], dragged: Option<usize>, config: &PhysicsConfig) {
	for i in 0..nodes.len() {
		for j in 0..nodes.len() {
			if i == j {
				continue;
			}
			let (dx, dy) = (nodes[j].x - nodes[i].x, nodes[j].y - nodes[i].y);
			let dist = (dx * dx + dy * dy).sqrt();
			// Coincident pairs do not repel until jitter separates them.
			if dist <= 0.0 || dist >= config.max_distance {
				continue;
			}
			let force = config.repulsion / dist.max(config.min_distance).powi(2);
			let (ux, uy) = (dx / dist, dy / dist);
			if dragged != Some(i) {
				nodes[i].vx -= force * ux;
				nodes[i].vy -= force * uy;
			}
			if dragged != Some(j) {
				nodes[j].vx += force * ux;
				nodes[j].vy += force * uy;
			}
		}
	}
}

fn apply_springs(
	nodes: &mut [GraphNode],
	edges: &[GraphEdge],
	dragged: Option<usize>,
	config: &PhysicsConfig,
) {
	for edge in edges {
		let (a, b) = (edge.source, edge.target);
		// Stale indices can only come from an edge list mutated independently
		// of its node list; skip rather than panic.
		if a >= nodes.len() || b >= nodes.len() || a == b {
			continue;
		}
		let (dx, dy) = (nodes[b].x - nodes[a].x, nodes[b].y - nodes[a].y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist <= 0.0 {
			continue;
		}
		// Positive when stretched past the rest length, pulling the pair
		// together; negative when compressed, pushing it apart.
		let force = config.attraction * (dist - config.rest_length(edge.kind)) * edge.strength;
		let (ux, uy) = (dx / dist, dy / dist);
		if dragged != Some(a) {
			nodes[a].vx += force * ux;
			nodes[a].vy += force * uy;
		}
		if dragged != Some(b) {
			nodes[b].vx -= force * ux;
			nodes[b].vy -= force * uy;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

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
			radius: 8.0,
			connections: 0,
		}
	}

	fn direct_edge(source: usize, target: usize) -> GraphEdge {
		GraphEdge {
			source,
			target,
			kind: EdgeKind::DirectLink,
			strength: 1.0,
			shared_tags: Vec::new(),
		}
	}

	fn distance(nodes: &[GraphNode], a: usize, b: usize) -> f64 {
		let (dx, dy) = (nodes[b].x - nodes[a].x, nodes[b].y - nodes[a].y);
		(dx * dx + dy * dy).sqrt()
	}

	const W: f64 = 2000.0;
	const H: f64 = 2000.0;

	#[test]
	fn close_nodes_repel() {
		let mut nodes = vec![node_at(980.0, 1000.0), node_at(1020.0, 1000.0)];
		let before = distance(&nodes, 0, 1);
		step(&mut nodes, &[], W, H, None, &PhysicsConfig::default());
		assert!(distance(&nodes, 0, 1) > before);
		// Symmetric push: both moved, in opposite directions.
		assert!(nodes[0].x < 980.0);
		assert!(nodes[1].x > 1020.0);
	}

	#[test]
	fn distant_nodes_do_not_interact() {
		let config = PhysicsConfig::default();
		let mut nodes = vec![
			node_at(500.0, 1000.0),
			node_at(500.0 + config.max_distance * 3.0, 1000.0),
		];
		step(&mut nodes, &[], W, H, None, &config);
		assert_eq!(nodes[0].vx, 0.0);
		assert_eq!(nodes[1].vx, 0.0);
	}

	#[test]
	fn coincident_nodes_do_not_blow_up() {
		let mut nodes = vec![node_at(1000.0, 1000.0), node_at(1000.0, 1000.0)];
		step(&mut nodes, &[], W, H, None, &PhysicsConfig::default());
		assert!(nodes[0].x.is_finite() && nodes[0].y.is_finite());
		assert!(nodes[1].x.is_finite() && nodes[1].y.is_finite());
	}

	#[test]
	fn spring_converges_to_rest_length_from_above() {
		let config = PhysicsConfig::default();
		let mut nodes = vec![node_at(600.0, 1000.0), node_at(1200.0, 1000.0)];
		let edges = vec![direct_edge(0, 1)];
		for _ in 0..1000 {
			step(&mut nodes, &edges, W, H, None, &config);
		}
		let dist = distance(&nodes, 0, 1);
		assert!(
			(dist - config.max_distance).abs() < 60.0,
			"expected near rest length {}, got {dist}",
			config.max_distance
		);
	}

	#[test]
	fn spring_converges_to_rest_length_from_below() {
		let config = PhysicsConfig::default();
		let mut nodes = vec![node_at(970.0, 1000.0), node_at(1030.0, 1000.0)];
		let edges = vec![direct_edge(0, 1)];
		for _ in 0..1000 {
			step(&mut nodes, &edges, W, H, None, &config);
		}
		let dist = distance(&nodes, 0, 1);
		assert!(
			dist > 100.0 && dist < 300.0,
			"expected separation near rest length, got {dist}"
		);
	}

	#[test]
	fn shared_tag_springs_rest_longer() {
		let config = PhysicsConfig::default();
		assert!(
			config.rest_length(EdgeKind::SharedTag) > config.rest_length(EdgeKind::DirectLink)
		);
	}

	#[test]
	fn dragged_node_position_is_untouched() {
		let mut nodes = vec![node_at(990.0, 1000.0), node_at(1010.0, 1000.0)];
		nodes[0].vx = 5.0;
		step(&mut nodes, &[], W, H, Some(0), &PhysicsConfig::default());
		assert_eq!(nodes[0].x, 990.0);
		assert_eq!(nodes[0].y, 1000.0);
		// The non-dragged neighbor still moves.
		assert!(nodes[1].x > 1010.0);
	}

	#[test]
	fn held_node_accumulates_no_velocity() {
		let config = PhysicsConfig::default();
		let mut nodes = vec![node_at(1000.0, 1000.0), node_at(1040.0, 1000.0)];
		let edges = vec![direct_edge(0, 1)];
		// Hold node 0 without moving the pointer for many frames.
		for _ in 0..120 {
			step(&mut nodes, &edges, W, H, Some(0), &config);
		}
		assert_eq!(nodes[0].vx, 0.0);
		assert_eq!(nodes[0].vy, 0.0);
		assert_eq!(nodes[0].x, 1000.0);
		// Releasing it produces no stored kick; the first free frame moves it
		// only by that frame's forces.
		step(&mut nodes, &edges, W, H, None, &config);
		assert!((nodes[0].x - 1000.0).abs() < 5.0);
	}

	#[test]
	fn wall_clamp_zeroes_velocity() {
		let config = PhysicsConfig::default();
		let mut nodes = vec![node_at(5.0, 1000.0)];
		nodes[0].vx = -40.0;
		step(&mut nodes, &[], W, H, None, &config);
		assert_eq!(nodes[0].x, nodes[0].radius + config.wall_margin);
		assert_eq!(nodes[0].vx, 0.0);
		// The y axis was not clamped, so its velocity survives.
		assert_eq!(nodes[0].y, 1000.0);
	}

	#[test]
	fn dangling_edge_endpoint_is_skipped() {
		let mut nodes = vec![node_at(1000.0, 1000.0)];
		let edges = vec![direct_edge(0, 7)];
		step(&mut nodes, &edges, W, H, None, &PhysicsConfig::default());
		assert!(nodes[0].x.is_finite());
	}
}
