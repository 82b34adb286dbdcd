pub mod controller;
pub mod transform;
pub mod zoom;

pub use controller::{CanvasController, EditError, EventField, PointerState};
pub use transform::ViewTransform;
pub use zoom::Zoom;
