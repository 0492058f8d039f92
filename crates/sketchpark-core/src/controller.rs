//! Interaction controller: ties gestures to tool behavior.

use crate::camera::Camera;
use crate::frame::FramePump;
use crate::history::History;
use crate::input::{GestureEvent, PointerButton};
use crate::scene::Scene;
use crate::shapes::{Circle, Path, Rectangle, SerializableColor, Shape, ShapeStyle, Text};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Eraser strokes are committed at this multiple of the selected thickness.
pub const ERASER_THICKNESS_FACTOR: f64 = 4.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Hand,
    #[default]
    Pen,
    Eraser,
    Rectangle,
    Circle,
    Text,
}

/// Gesture state of the controller.
#[derive(Debug, Clone, Default)]
enum State {
    /// No gesture in flight.
    #[default]
    Idle,
    /// Translating the view; tracks the previous screen point.
    Panning { last_screen: Point },
    /// A drawing gesture is in flight.
    ///
    /// `points` accumulates world points for pen/eraser; rectangle and
    /// circle only use `start` and `current` (the start point is never
    /// mutated once recorded).
    Drawing {
        tool: ToolKind,
        start: Point,
        current: Point,
        points: Vec<Point>,
    },
    /// A text field is open at the recorded world anchor. No shape exists
    /// until submit.
    TextEditing { anchor: Point, content: String },
}

/// The interaction controller.
///
/// Single owner of the scene, history, and view transform; the renderer and
/// thumbnail exporter only read them. Gesture state is controller-owned and
/// reset on gesture end — there are no ambient globals.
#[derive(Debug, Clone)]
pub struct Controller {
    scene: Scene,
    history: History,
    camera: Camera,
    state: State,
    frame: FramePump,
    tool: ToolKind,
    stroke_color: SerializableColor,
    thickness: f64,
    background: SerializableColor,
    pan_modifier: bool,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    /// Create a controller over an empty scene.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            history: History::new(),
            camera: Camera::new(),
            state: State::Idle,
            frame: FramePump::new(),
            tool: ToolKind::default(),
            stroke_color: SerializableColor::black(),
            thickness: 4.0,
            background: SerializableColor::white(),
            pan_modifier: false,
        }
    }

    /// Create a controller seeded from a loaded scene.
    pub fn with_scene(scene: Scene) -> Self {
        let mut controller = Self::new();
        controller.load_scene(scene);
        controller
    }

    /// Replace the scene with a loaded one.
    ///
    /// The loaded state becomes the history floor: it is not an undoable
    /// commit. Any in-flight gesture buffer is dropped.
    pub fn load_scene(&mut self, scene: Scene) {
        self.history.reset(scene.clone());
        self.scene = scene;
        self.state = State::Idle;
        self.frame.request();
    }

    // -- Accessors --

    /// The committed scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The view transform.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The active tool.
    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// The canvas background color (what the eraser paints with).
    pub fn background(&self) -> SerializableColor {
        self.background
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.state, State::Panning { .. })
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, State::Drawing { .. })
    }

    pub fn is_text_editing(&self) -> bool {
        matches!(self.state, State::TextEditing { .. })
    }

    /// World anchor of the open text field, if editing.
    pub fn text_anchor(&self) -> Option<Point> {
        match &self.state {
            State::TextEditing { anchor, .. } => Some(*anchor),
            _ => None,
        }
    }

    /// Content of the open text field, if editing.
    pub fn text_content(&self) -> Option<&str> {
        match &self.state {
            State::TextEditing { content, .. } => Some(content),
            _ => None,
        }
    }

    // -- Orthogonal tool state --

    /// Select the active tool. Cancels any open text field and drops an
    /// in-flight gesture buffer.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
        if !matches!(self.state, State::Idle) {
            self.state = State::Idle;
            self.frame.request();
        }
    }

    /// Set the stroke color applied to the next committed shape.
    pub fn set_stroke_color(&mut self, color: SerializableColor) {
        self.stroke_color = color;
    }

    /// Set the thickness applied to the next committed shape.
    pub fn set_thickness(&mut self, thickness: f64) {
        self.thickness = thickness;
    }

    /// Set the canvas background color (used for eraser strokes).
    pub fn set_background(&mut self, color: SerializableColor) {
        self.background = color;
    }

    /// Track the pan modifier (space key held).
    pub fn set_pan_modifier(&mut self, held: bool) {
        self.pan_modifier = held;
    }

    // -- Gesture handling --

    /// Feed a unified gesture event.
    pub fn handle_gesture(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Start { position, button } => self.gesture_start(position, button),
            GestureEvent::Move { position } => self.gesture_move(position),
            GestureEvent::End { position } => self.gesture_end(position),
        }
    }

    /// Begin a gesture at a screen point.
    pub fn gesture_start(&mut self, screen: Point, button: PointerButton) {
        // A click outside the open text field acts as blur: commit what was
        // typed, then handle the new gesture normally.
        if self.is_text_editing() {
            self.submit_text();
        }

        let world = self.camera.screen_to_world(screen);

        if self.tool == ToolKind::Hand || self.pan_modifier || button == PointerButton::Middle {
            self.state = State::Panning {
                last_screen: screen,
            };
            return;
        }

        if self.tool == ToolKind::Text {
            self.state = State::TextEditing {
                anchor: world,
                content: String::new(),
            };
            return;
        }

        self.state = State::Drawing {
            tool: self.tool,
            start: world,
            current: world,
            points: vec![world],
        };
    }

    /// Continue a gesture at a screen point.
    pub fn gesture_move(&mut self, screen: Point) {
        match &mut self.state {
            State::Panning { last_screen } => {
                let delta = screen - *last_screen;
                *last_screen = screen;
                self.camera.pan(delta);
                self.frame.request();
            }
            State::Drawing {
                tool,
                current,
                points,
                ..
            } => {
                let world = self.camera.screen_to_world(screen);
                *current = world;
                if matches!(tool, ToolKind::Pen | ToolKind::Eraser) {
                    points.push(world);
                }
                self.frame.request();
            }
            _ => {}
        }
    }

    /// End the gesture at a screen point, committing the in-flight shape if
    /// it is not degenerate.
    pub fn gesture_end(&mut self, screen: Point) {
        match std::mem::take(&mut self.state) {
            State::Panning { .. } => {
                self.frame.cancel();
                self.frame.request();
            }
            State::Drawing {
                tool,
                start,
                points,
                ..
            } => {
                self.frame.cancel();
                let world = self.camera.screen_to_world(screen);
                match tool {
                    ToolKind::Pen => self.commit_stroke(points, self.stroke_style()),
                    ToolKind::Eraser => self.commit_stroke(points, self.eraser_style()),
                    ToolKind::Rectangle => {
                        // Committed unconditionally: a zero-area rectangle is
                        // valid and renders as a dot-sized mark.
                        let rect = Rectangle::from_drag(start, world, self.stroke_style());
                        self.commit(Shape::Rectangle(rect));
                    }
                    ToolKind::Circle => {
                        let circle = Circle::from_drag(start, world, self.stroke_style());
                        self.commit(Shape::Circle(circle));
                    }
                    ToolKind::Hand | ToolKind::Text => {}
                }
                self.frame.request();
            }
            // Text editing outlives the click that opened it; put it back.
            other @ State::TextEditing { .. } => self.state = other,
            State::Idle => {}
        }
    }

    fn commit_stroke(&mut self, points: Vec<Point>, style: ShapeStyle) {
        // A tap with no movement yields no shape.
        if points.len() < 2 {
            log::debug!("discarding degenerate stroke ({} point)", points.len());
            return;
        }
        self.commit(Shape::Path(Path::from_points(points, style)));
    }

    /// Append a shape, record a history snapshot, and schedule a redraw.
    fn commit(&mut self, shape: Shape) {
        self.scene.push(shape);
        self.history.record(self.scene.clone());
        self.frame.request();
    }

    // -- Text editing --

    /// Replace the content of the open text field.
    pub fn set_text(&mut self, text: &str) {
        if let State::TextEditing { content, .. } = &mut self.state {
            content.clear();
            content.push_str(text);
        }
    }

    /// Commit the open text field (Enter, or blur with content).
    ///
    /// Empty or whitespace-only content commits nothing.
    pub fn submit_text(&mut self) {
        if !self.is_text_editing() {
            return;
        }
        if let State::TextEditing { anchor, content } = std::mem::take(&mut self.state) {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                self.frame.request();
                return;
            }
            let text = Text::new(anchor, trimmed.to_string(), self.stroke_style());
            self.commit(Shape::Text(text));
        }
    }

    /// Discard the open text field (Escape).
    pub fn cancel_text(&mut self) {
        if self.is_text_editing() {
            self.state = State::Idle;
            self.frame.request();
        }
    }

    // -- Commands --

    /// Empty the scene and reset history to a single empty entry.
    ///
    /// Undo cannot restore the pre-clear state. Any in-flight gesture buffer
    /// is dropped.
    pub fn clear(&mut self) {
        log::debug!("clearing canvas ({} shapes)", self.scene.len());
        self.scene.clear();
        self.history.reset(Scene::new());
        self.state = State::Idle;
        self.frame.cancel();
        self.frame.request();
    }

    /// Step the scene back one history entry. No-op at the boundary.
    pub fn undo(&mut self) -> bool {
        if let Some(scene) = self.history.undo() {
            self.scene = scene.clone();
            self.frame.request();
            true
        } else {
            false
        }
    }

    /// Step the scene forward one history entry. No-op at the boundary.
    pub fn redo(&mut self) -> bool {
        if let Some(scene) = self.history.redo() {
            self.scene = scene.clone();
            self.frame.request();
            true
        } else {
            false
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Zoom about a screen-space anchor, clamped to the camera's range.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        self.camera.zoom_at(anchor, factor);
        self.frame.request();
    }

    /// Reset the view transform to zoom 1, offset 0.
    pub fn reset_view(&mut self) {
        self.camera.reset();
        self.frame.request();
    }

    /// React to a surface resize: drop any stale scheduled redraw and
    /// request a fresh one reflecting the final state.
    pub fn handle_resize(&mut self) {
        self.frame.cancel();
        self.frame.request();
    }

    // -- Rendering support --

    /// The in-flight shape to overlay on the committed scene, if any.
    pub fn preview_shape(&self) -> Option<Shape> {
        match &self.state {
            State::Drawing {
                tool,
                start,
                current,
                points,
            } => match tool {
                ToolKind::Pen if points.len() >= 2 => Some(Shape::Path(Path::from_points(
                    points.clone(),
                    self.stroke_style(),
                ))),
                ToolKind::Eraser if points.len() >= 2 => Some(Shape::Path(Path::from_points(
                    points.clone(),
                    self.eraser_style(),
                ))),
                ToolKind::Rectangle => Some(Shape::Rectangle(Rectangle::from_drag(
                    *start,
                    *current,
                    self.stroke_style(),
                ))),
                ToolKind::Circle => Some(Shape::Circle(Circle::from_drag(
                    *start,
                    *current,
                    self.stroke_style(),
                ))),
                _ => None,
            },
            _ => None,
        }
    }

    /// Schedule a redraw for the next frame (coalesced).
    pub fn request_redraw(&mut self) {
        self.frame.request();
    }

    /// Drain the redraw flag; called once per animation frame by the host.
    pub fn take_redraw(&mut self) -> bool {
        self.frame.take()
    }

    fn stroke_style(&self) -> ShapeStyle {
        ShapeStyle::new(self.stroke_color, self.thickness)
    }

    fn eraser_style(&self) -> ShapeStyle {
        ShapeStyle::new(self.background, self.thickness * ERASER_THICKNESS_FACTOR)
    }
}
