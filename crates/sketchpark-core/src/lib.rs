//! Sketchpark Core Library
//!
//! Platform-agnostic data structures and logic for the Sketchpark drawing
//! canvas: view transform, shapes, scene, undo/redo history, gesture
//! unification, and the interaction controller.

pub mod camera;
pub mod controller;
pub mod frame;
pub mod history;
pub mod input;
pub mod scene;
pub mod shapes;

pub use camera::Camera;
pub use controller::{Controller, ToolKind, ERASER_THICKNESS_FACTOR};
pub use frame::FramePump;
pub use history::{History, MAX_HISTORY};
pub use input::{GestureEvent, GestureTracker, PointerButton, PointerInput};
pub use scene::Scene;
pub use shapes::{SerializableColor, Shape, ShapeId, ShapeStyle};
