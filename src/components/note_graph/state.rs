//! Coordinator-owned state: one generation of the model plus camera,
//! interaction and physics configuration. The DOM layer mutates this
//! through a `RefCell`; everything here stays free of `web_sys`.

use super::camera::{Bounds, Camera};
use super::interaction::Interaction;
use super::model::{self, GraphModel};
use super::physics::{self, PhysicsConfig};
use super::types::Note;

const FIT_PADDING: f64 = 60.0;

pub struct NoteGraphState {
	pub model: GraphModel,
	pub camera: Camera,
	pub interaction: Interaction,
	pub physics: PhysicsConfig,
	/// Canvas size in logical (CSS) pixels; graph space matches.
	pub width: f64,
	pub height: f64,
	pub running: bool,
}

impl NoteGraphState {
	pub fn new(notes: &[Note], width: f64, height: f64, rng: impl FnMut() -> f64) -> Self {
		Self {
			model: model::generate(notes, width, height, rng),
			camera: Camera::default(),
			interaction: Interaction::default(),
			physics: PhysicsConfig::default(),
			width,
			height,
			running: true,
		}
	}

	/// Full regeneration from the current note snapshot: node identities and
	/// positions are discarded, not diffed. Hover/selection/drag refer to the
	/// replaced generation, so they are cleared; the camera is kept.
	pub fn refresh(&mut self, notes: &[Note], rng: impl FnMut() -> f64) {
		self.model = model::generate(notes, self.width, self.height, rng);
		self.interaction = Interaction::default();
	}

	/// One simulation step. The drag target, if any, is excluded; its
	/// position belongs to the interaction layer this frame.
	pub fn tick(&mut self) {
		physics::step(
			&mut self.model.nodes,
			&self.model.edges,
			self.width,
			self.height,
			self.interaction.dragging,
			&self.physics,
		);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Frame the whole graph: bounding box of all node circles plus fixed
	/// padding, never zooming in past 1.0.
	pub fn zoom_to_fit(&mut self) {
		let mut bounds = Bounds::empty();
		for node in &self.model.nodes {
			bounds.include_circle(node.x, node.y, node.radius);
		}
		self.camera
			.fit_bounds(&bounds, self.width, self.height, FIT_PADDING);
	}
}
