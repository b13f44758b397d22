mod camera;
mod component;
mod interaction;
mod model;
mod physics;
mod render;
mod state;
mod text;
mod types;

pub use component::NoteGraphCanvas;
pub use types::Note;
