//! Sketchpark Render Library
//!
//! Renderer abstraction and the CPU raster implementation for the
//! Sketchpark drawing canvas.

mod fonts;
mod renderer;
mod skia;
mod smooth;
mod thumbnail;

pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use skia::SkiaRenderer;
pub use smooth::smooth_polyline;
pub use thumbnail::export_thumbnail;
