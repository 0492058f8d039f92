//! The host-facing drawing board.

use crate::palette;
use crate::shortcuts::{self, ShortcutAction};
use kurbo::Point;
use serde::Serialize;
use sketchpark_core::controller::{Controller, ToolKind};
use sketchpark_core::input::{GestureTracker, PointerInput};
use sketchpark_core::scene::Scene;
use sketchpark_core::shapes::{SerializableColor, Shape};
use sketchpark_render::{export_thumbnail, RenderContext, Renderer, RendererError, SkiaRenderer};
use thiserror::Error;

/// Zoom step applied by the zoom in/out buttons.
pub const ZOOM_STEP: f64 = 1.2;

/// Board-level errors surfaced to the host.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("renderer error: {0}")]
    Renderer(#[from] RendererError),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("color not in palette: {0}")]
    UnknownColor(String),
    #[error("thickness not offered: {0}")]
    UnknownThickness(f64),
}

/// Payload handed to the host when a save or submit is requested.
///
/// The engine performs no storage or network I/O itself; a failed host save
/// never loses committed shapes, because the payload is a copy.
#[derive(Debug, Clone, Serialize)]
pub struct SaveRequest {
    /// The committed shapes, in draw order.
    pub shapes: Vec<Shape>,
    /// The same shapes as the persisted JSON wire format.
    pub shapes_json: String,
    /// PNG thumbnail as a `data:image/png;base64,...` URL, rendered at the
    /// neutral transform.
    pub thumbnail: String,
}

type SaveHandler = Box<dyn FnMut(SaveRequest)>;

/// The drawing board: controller, input unifier, and renderer behind one
/// host boundary.
pub struct Board {
    controller: Controller,
    tracker: GestureTracker,
    renderer: SkiaRenderer,
    logical_width: f64,
    logical_height: f64,
    fullscreen: bool,
    clear_trigger: u64,
    on_save: Option<SaveHandler>,
    on_submit: Option<SaveHandler>,
}

impl Board {
    /// Create a board with a surface of the given logical size.
    pub fn new(logical_width: f64, logical_height: f64, scale_factor: f64) -> Self {
        let mut controller = Controller::new();
        controller.set_background(palette::background());
        controller.set_stroke_color(palette::default_color());
        controller.set_thickness(palette::DEFAULT_THICKNESS);

        Self {
            controller,
            tracker: GestureTracker::new(),
            renderer: SkiaRenderer::new(logical_width, logical_height, scale_factor),
            logical_width,
            logical_height,
            fullscreen: false,
            clear_trigger: 0,
            on_save: None,
            on_submit: None,
        }
    }

    // -- Host wiring --

    /// Register the handler invoked when a draft save is requested.
    pub fn set_on_save(&mut self, handler: impl FnMut(SaveRequest) + 'static) {
        self.on_save = Some(Box::new(handler));
    }

    /// Register the handler invoked when a submit is requested.
    pub fn set_on_submit(&mut self, handler: impl FnMut(SaveRequest) + 'static) {
        self.on_submit = Some(Box::new(handler));
    }

    /// Load a previously persisted shape list, replacing the scene.
    pub fn load_json(&mut self, json: &str) -> Result<(), BoardError> {
        let scene = Scene::from_json(json)?;
        log::debug!("loaded scene with {} shapes", scene.len());
        self.controller.load_scene(scene);
        Ok(())
    }

    /// Clear trigger input: any increment empties the scene.
    pub fn set_clear_trigger(&mut self, value: u64) {
        if value > self.clear_trigger {
            self.controller.clear();
        }
        self.clear_trigger = value;
    }

    /// Presentation-only fullscreen flag; drawing semantics are unaffected.
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Resize the drawing surface. Cancels any stale scheduled redraw and
    /// requests a fresh one.
    pub fn resize(&mut self, logical_width: f64, logical_height: f64, scale_factor: f64) {
        self.logical_width = logical_width;
        self.logical_height = logical_height;
        self.renderer
            .resize(logical_width, logical_height, scale_factor);
        self.controller.handle_resize();
    }

    // -- Input --

    /// Feed a raw pointer/touch event through the gesture unifier.
    pub fn pointer(&mut self, input: PointerInput) {
        if let Some(event) = self.tracker.handle(input) {
            self.controller.handle_gesture(event);
        }
    }

    /// Track the space key (pan modifier).
    pub fn set_space_pressed(&mut self, held: bool) {
        self.controller.set_pan_modifier(held);
    }

    /// Apply a keyboard shortcut. Returns true if the key was consumed.
    ///
    /// Plain-letter tool shortcuts are ignored while the text field is open
    /// so typing does not switch tools.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool) -> bool {
        let Some(action) = shortcuts::resolve(key, ctrl, shift) else {
            return false;
        };
        match action {
            ShortcutAction::SelectTool(tool) => {
                if self.controller.is_text_editing() {
                    return false;
                }
                self.controller.set_tool(tool);
            }
            ShortcutAction::Undo => {
                self.controller.undo();
            }
            ShortcutAction::Redo => {
                self.controller.redo();
            }
        }
        true
    }

    // -- Tool state --

    pub fn select_tool(&mut self, tool: ToolKind) {
        self.controller.set_tool(tool);
    }

    pub fn tool(&self) -> ToolKind {
        self.controller.tool()
    }

    /// Select a stroke color from the palette.
    pub fn select_color(&mut self, hex: &str) -> Result<(), BoardError> {
        if !palette::contains_color(hex) {
            return Err(BoardError::UnknownColor(hex.to_string()));
        }
        let color = SerializableColor::from_hex(hex)
            .ok_or_else(|| BoardError::UnknownColor(hex.to_string()))?;
        self.controller.set_stroke_color(color);
        Ok(())
    }

    /// Select a stroke thickness from the offered options.
    pub fn select_thickness(&mut self, thickness: f64) -> Result<(), BoardError> {
        if !palette::contains_thickness(thickness) {
            return Err(BoardError::UnknownThickness(thickness));
        }
        self.controller.set_thickness(thickness);
        Ok(())
    }

    // -- Text editing passthrough --

    pub fn is_text_editing(&self) -> bool {
        self.controller.is_text_editing()
    }

    pub fn set_text(&mut self, text: &str) {
        self.controller.set_text(text);
    }

    pub fn submit_text(&mut self) {
        self.controller.submit_text();
    }

    pub fn cancel_text(&mut self) {
        self.controller.cancel_text();
    }

    /// Screen position of the open text field, for host input placement.
    pub fn text_screen_anchor(&self) -> Option<Point> {
        self.controller
            .text_anchor()
            .map(|anchor| self.controller.camera().world_to_screen(anchor))
    }

    // -- View commands --

    pub fn zoom_in(&mut self) {
        self.controller.zoom_at(self.viewport_center(), ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.controller
            .zoom_at(self.viewport_center(), 1.0 / ZOOM_STEP);
    }

    /// Zoom about a screen anchor, e.g. the wheel position.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        self.controller.zoom_at(anchor, factor);
    }

    pub fn reset_view(&mut self) {
        self.controller.reset_view();
    }

    fn viewport_center(&self) -> Point {
        Point::new(self.logical_width / 2.0, self.logical_height / 2.0)
    }

    // -- History --

    pub fn undo(&mut self) -> bool {
        self.controller.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.controller.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.controller.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.controller.can_redo()
    }

    // -- Rendering --

    /// Run one animation frame: redraw if anything requested it.
    ///
    /// Returns true when a frame was drawn.
    pub fn frame(&mut self) -> Result<bool, BoardError> {
        if !self.controller.take_redraw() {
            return Ok(false);
        }
        self.render_frame()?;
        Ok(true)
    }

    /// Redraw unconditionally.
    pub fn render_now(&mut self) -> Result<(), BoardError> {
        self.controller.take_redraw();
        self.render_frame()
    }

    fn render_frame(&mut self) -> Result<(), BoardError> {
        let preview = self.controller.preview_shape();
        let ctx = RenderContext::new(self.controller.scene(), self.controller.camera())
            .with_background(self.controller.background())
            .with_preview(preview.as_ref());
        self.renderer.render(&ctx)?;
        Ok(())
    }

    /// The raster surface, for the host to blit.
    pub fn renderer(&self) -> &SkiaRenderer {
        &self.renderer
    }

    // -- Persistence boundary --

    /// Build the save payload: shapes, their JSON form, and a thumbnail.
    pub fn save_payload(&mut self) -> Result<SaveRequest, BoardError> {
        let scene = self.controller.scene();
        let shapes = scene.shapes().to_vec();
        let shapes_json = scene.to_json()?;
        let thumbnail = export_thumbnail(
            &mut self.renderer,
            self.controller.scene(),
            self.controller.camera(),
            self.controller.background(),
        )?;
        // The export re-rendered the committed scene; repaint any in-flight
        // preview on the next frame.
        self.controller.request_redraw();
        Ok(SaveRequest {
            shapes,
            shapes_json,
            thumbnail,
        })
    }

    /// Invoke the save handler with the current payload.
    ///
    /// Returns false when no handler is registered.
    pub fn request_save(&mut self) -> Result<bool, BoardError> {
        let payload = self.save_payload()?;
        match self.on_save.as_mut() {
            Some(handler) => {
                handler(payload);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Invoke the submit handler with the current payload.
    ///
    /// Returns false when no handler is registered.
    pub fn request_submit(&mut self) -> Result<bool, BoardError> {
        let payload = self.save_payload()?;
        match self.on_submit.as_mut() {
            Some(handler) => {
                handler(payload);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// The committed scene.
    pub fn scene(&self) -> &Scene {
        self.controller.scene()
    }

    /// The interaction controller, for host features not wrapped here.
    pub fn controller(&self) -> &Controller {
        &self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchpark_core::input::PointerButton;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn board() -> Board {
        Board::new(200.0, 200.0, 1.0)
    }

    fn draw_line(board: &mut Board, from: Point, to: Point) {
        board.pointer(PointerInput::Down {
            contact: 1,
            position: from,
            button: PointerButton::Primary,
        });
        board.pointer(PointerInput::Move {
            contact: 1,
            position: Point::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0),
        });
        board.pointer(PointerInput::Move {
            contact: 1,
            position: to,
        });
        board.pointer(PointerInput::Up {
            contact: 1,
            position: to,
        });
    }

    #[test]
    fn test_pointer_events_draw() {
        let mut board = board();
        draw_line(&mut board, Point::new(10.0, 10.0), Point::new(50.0, 50.0));
        assert_eq!(board.scene().len(), 1);
    }

    #[test]
    fn test_palette_validation() {
        let mut board = board();
        assert!(board.select_color("#8b5cf6").is_ok());
        assert!(matches!(
            board.select_color("#123456"),
            Err(BoardError::UnknownColor(_))
        ));

        assert!(board.select_thickness(8.0).is_ok());
        assert!(matches!(
            board.select_thickness(5.0),
            Err(BoardError::UnknownThickness(_))
        ));
    }

    #[test]
    fn test_clear_trigger_increments() {
        let mut board = board();
        draw_line(&mut board, Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert_eq!(board.scene().len(), 1);

        board.set_clear_trigger(1);
        assert!(board.scene().is_empty());
        assert!(!board.can_undo());

        // Same value again: no effect on newly drawn content.
        draw_line(&mut board, Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        board.set_clear_trigger(1);
        assert_eq!(board.scene().len(), 1);

        board.set_clear_trigger(2);
        assert!(board.scene().is_empty());
    }

    #[test]
    fn test_save_payload_roundtrip() {
        let mut board = board();
        draw_line(&mut board, Point::new(10.0, 10.0), Point::new(50.0, 50.0));

        let payload = board.save_payload().unwrap();
        assert_eq!(payload.shapes.len(), 1);
        assert!(payload.thumbnail.starts_with("data:image/png;base64,"));

        // The JSON form reloads into an identical scene.
        let mut other = Board::new(100.0, 100.0, 1.0);
        other.load_json(&payload.shapes_json).unwrap();
        assert_eq!(other.scene(), board.scene());
        assert!(!other.can_undo());
    }

    #[test]
    fn test_save_callback_invoked() {
        let mut board = board();
        draw_line(&mut board, Point::new(0.0, 0.0), Point::new(20.0, 20.0));

        let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        board.set_on_save(move |req| sink.borrow_mut().push(req.shapes.len()));

        assert!(board.request_save().unwrap());
        assert_eq!(*seen.borrow(), vec![1]);

        // Submit has no handler registered.
        assert!(!board.request_submit().unwrap());
    }

    #[test]
    fn test_save_keeps_scene_intact() {
        let mut board = board();
        draw_line(&mut board, Point::new(0.0, 0.0), Point::new(20.0, 20.0));
        board.save_payload().unwrap();
        assert_eq!(board.scene().len(), 1);
    }

    #[test]
    fn test_fullscreen_does_not_affect_drawing() {
        let mut board = board();
        board.set_fullscreen(true);
        assert!(board.is_fullscreen());

        draw_line(&mut board, Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert_eq!(board.scene().len(), 1);
    }

    #[test]
    fn test_frame_draws_once_per_request() {
        let mut board = board();
        draw_line(&mut board, Point::new(0.0, 0.0), Point::new(10.0, 10.0));

        assert!(board.frame().unwrap());
        assert!(!board.frame().unwrap());
    }

    #[test]
    fn test_shortcuts() {
        let mut board = board();
        assert!(board.handle_key("r", false, false));
        assert_eq!(board.tool(), ToolKind::Rectangle);

        draw_line(&mut board, Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert_eq!(board.scene().len(), 1);

        assert!(board.handle_key("z", true, false));
        assert!(board.scene().is_empty());

        assert!(board.handle_key("z", true, true));
        assert_eq!(board.scene().len(), 1);
    }

    #[test]
    fn test_tool_keys_ignored_while_typing() {
        let mut board = board();
        board.select_tool(ToolKind::Text);
        board.pointer(PointerInput::Down {
            contact: 1,
            position: Point::new(30.0, 30.0),
            button: PointerButton::Primary,
        });
        board.pointer(PointerInput::Up {
            contact: 1,
            position: Point::new(30.0, 30.0),
        });
        assert!(board.is_text_editing());

        assert!(!board.handle_key("p", false, false));
        assert_eq!(board.tool(), ToolKind::Text);

        board.set_text("park this");
        board.submit_text();
        assert_eq!(board.scene().len(), 1);
    }

    #[test]
    fn test_zoom_buttons_clamp() {
        let mut board = board();
        for _ in 0..20 {
            board.zoom_in();
        }
        assert!((board.controller().camera().zoom - 5.0).abs() < 1e-9);

        for _ in 0..40 {
            board.zoom_out();
        }
        assert!((board.controller().camera().zoom - 0.1).abs() < 1e-9);

        board.reset_view();
        assert!((board.controller().camera().zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_text_screen_anchor_tracks_camera() {
        let mut board = board();
        board.select_tool(ToolKind::Text);
        board.pointer(PointerInput::Down {
            contact: 1,
            position: Point::new(40.0, 40.0),
            button: PointerButton::Primary,
        });
        board.pointer(PointerInput::Up {
            contact: 1,
            position: Point::new(40.0, 40.0),
        });

        let anchor = board.text_screen_anchor().unwrap();
        assert!((anchor.x - 40.0).abs() < 1e-9);
        assert!((anchor.y - 40.0).abs() < 1e-9);
    }
}
