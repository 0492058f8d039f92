//! Fixed palette and thickness options offered to the host.

use sketchpark_core::shapes::SerializableColor;

/// Selectable stroke colors.
pub const COLORS: [&str; 7] = [
    "#3b82f6", // Neon Blue
    "#8b5cf6", // Neon Purple
    "#ec4899", // Neon Pink
    "#f97316", // Neon Orange
    "#eab308", // Neon Yellow
    "#ffffff", // White
    "#000000", // Black
];

/// Selectable stroke thickness values.
pub const THICKNESS_OPTIONS: [f64; 4] = [2.0, 4.0, 8.0, 12.0];

/// Thickness selected on a fresh board.
pub const DEFAULT_THICKNESS: f64 = 4.0;

/// Canvas background color. Eraser strokes paint with it.
pub fn background() -> SerializableColor {
    SerializableColor::white()
}

/// Stroke color selected on a fresh board.
pub fn default_color() -> SerializableColor {
    SerializableColor::from_hex(COLORS[0]).unwrap_or_else(SerializableColor::black)
}

/// Check whether a hex color belongs to the palette.
pub fn contains_color(hex: &str) -> bool {
    COLORS.iter().any(|c| c.eq_ignore_ascii_case(hex))
}

/// Check whether a thickness is one of the offered options.
pub fn contains_thickness(thickness: f64) -> bool {
    THICKNESS_OPTIONS
        .iter()
        .any(|&t| (t - thickness).abs() < f64::EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_palette_entries_parse() {
        for hex in COLORS {
            assert!(SerializableColor::from_hex(hex).is_some(), "bad entry {hex}");
        }
    }

    #[test]
    fn test_membership() {
        assert!(contains_color("#3b82f6"));
        assert!(contains_color("#3B82F6"));
        assert!(!contains_color("#123456"));

        assert!(contains_thickness(8.0));
        assert!(!contains_thickness(5.0));
    }

    #[test]
    fn test_default_color_is_first_entry() {
        assert_eq!(default_color().to_hex(), COLORS[0]);
    }
}
