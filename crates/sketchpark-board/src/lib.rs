//! Sketchpark Board Library
//!
//! Host-facing facade over the canvas core and renderer: palette and
//! thickness options, pointer/keyboard wiring, the clear trigger, and the
//! save/submit boundary. The host owns the event loop, the blit target,
//! and all persistence.

mod board;
pub mod palette;
pub mod shortcuts;

pub use board::{Board, BoardError, SaveRequest, ZOOM_STEP};
pub use shortcuts::ShortcutAction;
