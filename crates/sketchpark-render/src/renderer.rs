//! Renderer trait abstraction.

use sketchpark_core::camera::Camera;
use sketchpark_core::scene::Scene;
use sketchpark_core::shapes::{SerializableColor, Shape};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("render surface unavailable")]
    SurfaceUnavailable,
    #[error("png encoding failed: {0}")]
    Encode(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
///
/// Borrows the controller-owned state; renderers only read it.
pub struct RenderContext<'a> {
    /// The committed scene, in draw order.
    pub scene: &'a Scene,
    /// The current view transform.
    pub camera: &'a Camera,
    /// The in-flight shape to overlay on top of the scene, if a gesture is
    /// active.
    pub preview: Option<&'a Shape>,
    /// Background color the surface is cleared to.
    pub background: SerializableColor,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context with a white background and no preview.
    pub fn new(scene: &'a Scene, camera: &'a Camera) -> Self {
        Self {
            scene,
            camera,
            preview: None,
            background: SerializableColor::white(),
        }
    }

    /// Set the in-flight preview shape.
    pub fn with_preview(mut self, preview: Option<&'a Shape>) -> Self {
        self.preview = preview;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, background: SerializableColor) -> Self {
        self.background = background;
        self
    }
}

/// Trait for rendering backends.
///
/// Implementations rasterize the scene however they like (CPU pixmap, GPU
/// surface); the engine only depends on this seam.
pub trait Renderer: Send + Sync {
    /// Draw a full frame: clear to background, committed shapes in scene
    /// order, then the preview on top, all under the view transform
    /// compounded with the device pixel ratio.
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Resize the backing surface to `logical × scale_factor` device pixels.
    fn resize(&mut self, logical_width: f64, logical_height: f64, scale_factor: f64);
}
