//! Bounded undo/redo history over scene snapshots.

use crate::scene::Scene;
use std::time::Instant;

/// Maximum number of history entries to keep.
pub const MAX_HISTORY: usize = 50;

/// A recorded scene snapshot.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// The scene as it stood after the commit.
    pub scene: Scene,
    /// When the snapshot was recorded.
    pub at: Instant,
}

impl HistoryEntry {
    fn new(scene: Scene) -> Self {
        Self {
            scene,
            at: Instant::now(),
        }
    }
}

/// A bounded log of scene snapshots with a cursor.
///
/// The cursor always points at the entry describing the current scene. New
/// commits truncate any redo branch; once the cap is exceeded the oldest
/// entry is evicted and the cursor shifts down so it keeps pointing at the
/// just-recorded entry. Runtime-only state: never serialized.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    cap: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create a history seeded with a single empty scene.
    pub fn new() -> Self {
        Self::with_cap(MAX_HISTORY)
    }

    /// Create a history with a custom cap (must be at least 1).
    pub fn with_cap(cap: usize) -> Self {
        Self {
            entries: vec![HistoryEntry::new(Scene::new())],
            cursor: 0,
            cap: cap.max(1),
        }
    }

    /// Record a new snapshot after a commit.
    ///
    /// Truncates any entries beyond the cursor (the redo branch is discarded
    /// on new edits), appends, and advances the cursor. Evicts the oldest
    /// entry once the cap is exceeded.
    pub fn record(&mut self, scene: Scene) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(HistoryEntry::new(scene));
        self.cursor = self.entries.len() - 1;

        if self.entries.len() > self.cap {
            self.entries.remove(0);
            self.cursor -= 1;
        }
    }

    /// Step back one entry and return the scene there.
    ///
    /// No-op at the oldest entry.
    pub fn undo(&mut self) -> Option<&Scene> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor].scene)
    }

    /// Step forward one entry and return the scene there.
    ///
    /// No-op at the newest entry.
    pub fn redo(&mut self) -> Option<&Scene> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor].scene)
    }

    /// The scene at the cursor.
    pub fn current(&self) -> &Scene {
        &self.entries[self.cursor].scene
    }

    /// Check if undo is available (for UI enablement).
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available (for UI enablement).
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Replace the whole log with a single entry.
    ///
    /// Used by the clear command: undo cannot reach back past a clear.
    pub fn reset(&mut self, scene: Scene) {
        self.entries = vec![HistoryEntry::new(scene)];
        self.cursor = 0;
    }

    /// Number of entries currently held (always at least 1).
    pub fn depth(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Rectangle, Shape};
    use kurbo::Point;

    fn scene_with(n: usize) -> Scene {
        let mut scene = Scene::new();
        for i in 0..n {
            scene.push(Shape::Rectangle(Rectangle::new(
                Point::new(i as f64, 0.0),
                10.0,
                10.0,
            )));
        }
        scene
    }

    #[test]
    fn test_starts_with_empty_entry() {
        let history = History::new();
        assert!(history.current().is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_redo_inverse_law() {
        let mut history = History::new();
        let mut scene = Scene::new();
        for i in 0..5 {
            scene.push(Shape::Rectangle(Rectangle::new(
                Point::new(i as f64, 0.0),
                10.0,
                10.0,
            )));
            history.record(scene.clone());
        }
        let final_scene = scene;

        for _ in 0..5 {
            assert!(history.undo().is_some());
        }
        assert!(history.current().is_empty());
        assert!(!history.can_undo());

        for _ in 0..5 {
            assert!(history.redo().is_some());
        }
        assert_eq!(*history.current(), final_scene);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_boundary_noops() {
        let mut history = History::new();
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());

        history.record(scene_with(1));
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_new_commit_discards_redo_branch() {
        let mut history = History::new();
        history.record(scene_with(1));
        history.record(scene_with(2));

        history.undo();
        assert!(history.can_redo());

        history.record(scene_with(3));
        assert!(!history.can_redo());
        assert_eq!(history.current().len(), 3);
    }

    #[test]
    fn test_cap_bounds_stack() {
        let mut history = History::with_cap(10);
        for i in 1..=25 {
            history.record(scene_with(i));
        }

        assert_eq!(history.depth(), 10);
        // Cursor stays on the just-recorded entry.
        assert_eq!(history.current().len(), 25);
        assert!(!history.can_redo());

        // Only cap-1 undos are possible; the oldest states are gone.
        let mut undos = 0;
        while history.undo().is_some() {
            undos += 1;
        }
        assert_eq!(undos, 9);
        assert_eq!(history.current().len(), 16);
    }

    #[test]
    fn test_reset_drops_everything() {
        let mut history = History::new();
        history.record(scene_with(1));
        history.record(scene_with(2));

        history.reset(Scene::new());
        assert!(history.current().is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.depth(), 1);
    }
}
