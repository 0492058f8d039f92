//! Keyboard shortcut mapping.

use sketchpark_core::controller::ToolKind;

/// Action resolved from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    SelectTool(ToolKind),
    Undo,
    Redo,
}

/// Map a key press to its action.
///
/// `ctrl` covers the platform action modifier (Ctrl, or Cmd on macOS).
/// Plain letters select tools; Ctrl+Z / Ctrl+Shift+Z / Ctrl+Y drive the
/// history.
pub fn resolve(key: &str, ctrl: bool, shift: bool) -> Option<ShortcutAction> {
    let key = key.to_ascii_lowercase();

    if ctrl {
        return match (key.as_str(), shift) {
            ("z", false) => Some(ShortcutAction::Undo),
            ("z", true) | ("y", _) => Some(ShortcutAction::Redo),
            _ => None,
        };
    }

    let tool = match key.as_str() {
        "h" => ToolKind::Hand,
        "p" => ToolKind::Pen,
        "e" => ToolKind::Eraser,
        "t" => ToolKind::Text,
        "r" => ToolKind::Rectangle,
        "c" => ToolKind::Circle,
        _ => return None,
    };
    Some(ShortcutAction::SelectTool(tool))
}
