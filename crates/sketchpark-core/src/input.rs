//! Input unification for mouse/touch/pointer events.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier of a contact point (a pointer id or touch id from the host).
pub type ContactId = u64;

/// Button associated with a contact going down.
///
/// Touch contacts report `Primary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// Raw pointer input from the host, in logical (CSS) pixels.
///
/// Positions are device-pixel-ratio independent; the renderer folds DPR in
/// on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerInput {
    Down {
        contact: ContactId,
        position: Point,
        button: PointerButton,
    },
    Move {
        contact: ContactId,
        position: Point,
    },
    Up {
        contact: ContactId,
        position: Point,
    },
    /// Device-level cancellation (e.g. a touch claimed by an OS gesture).
    Cancel {
        contact: ContactId,
    },
    /// The pointer left the drawing surface.
    Leave,
}

/// A unified gesture event.
///
/// One gesture is a start, any number of moves, and an end, from a single
/// logical contact point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    Start {
        position: Point,
        button: PointerButton,
    },
    Move {
        position: Point,
    },
    End {
        position: Point,
    },
}

/// Folds raw pointer/touch/mouse input into a single gesture stream.
///
/// Multi-touch suppresses single-gesture interpretation: a gesture only
/// starts from the first contact when no other contact is active, and a
/// second contact arriving mid-gesture mutes movement (without canceling)
/// until the contact count is back to one. The gesture ends when the last
/// contact lifts, on device-level cancellation of the last contact, or when
/// the pointer leaves the surface.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    /// Active contacts and their last known positions.
    contacts: HashMap<ContactId, Point>,
    /// Whether a gesture is in flight.
    active: bool,
    /// Last position delivered to the gesture stream.
    last_position: Point,
}

impl GestureTracker {
    /// Create a new tracker with no active contacts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a gesture is currently in flight.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Number of active contact points.
    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Feed a raw input event; returns the gesture event it maps to, if any.
    pub fn handle(&mut self, input: PointerInput) -> Option<GestureEvent> {
        match input {
            PointerInput::Down {
                contact,
                position,
                button,
            } => {
                self.contacts.insert(contact, position);
                if !self.active && self.contacts.len() == 1 {
                    self.active = true;
                    self.last_position = position;
                    return Some(GestureEvent::Start { position, button });
                }
                // A second simultaneous contact: no new gesture starts, and
                // an in-flight gesture keeps running with movement muted.
                None
            }
            PointerInput::Move { contact, position } => {
                if let Some(stored) = self.contacts.get_mut(&contact) {
                    *stored = position;
                }
                if self.active && self.contacts.len() <= 1 {
                    self.last_position = position;
                    return Some(GestureEvent::Move { position });
                }
                None
            }
            PointerInput::Up { contact, position } => {
                self.contacts.remove(&contact);
                self.end_if_last(position)
            }
            PointerInput::Cancel { contact } => {
                let position = self
                    .contacts
                    .remove(&contact)
                    .unwrap_or(self.last_position);
                self.end_if_last(position)
            }
            PointerInput::Leave => {
                self.contacts.clear();
                let position = self.last_position;
                self.end_if_last(position)
            }
        }
    }

    fn end_if_last(&mut self, position: Point) -> Option<GestureEvent> {
        if self.active && self.contacts.is_empty() {
            self.active = false;
            self.last_position = position;
            return Some(GestureEvent::End { position });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(contact: ContactId, x: f64, y: f64) -> PointerInput {
        PointerInput::Down {
            contact,
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    fn mv(contact: ContactId, x: f64, y: f64) -> PointerInput {
        PointerInput::Move {
            contact,
            position: Point::new(x, y),
        }
    }

    fn up(contact: ContactId, x: f64, y: f64) -> PointerInput {
        PointerInput::Up {
            contact,
            position: Point::new(x, y),
        }
    }

    #[test]
    fn test_single_contact_gesture() {
        let mut tracker = GestureTracker::new();

        let start = tracker.handle(down(1, 10.0, 10.0));
        assert!(matches!(start, Some(GestureEvent::Start { .. })));
        assert!(tracker.is_active());

        let moved = tracker.handle(mv(1, 20.0, 20.0));
        assert!(matches!(moved, Some(GestureEvent::Move { .. })));

        let end = tracker.handle(up(1, 30.0, 30.0));
        assert!(matches!(
            end,
            Some(GestureEvent::End { position }) if position == Point::new(30.0, 30.0)
        ));
        assert!(!tracker.is_active());
    }

    #[test]
    fn test_two_contacts_suppress_start() {
        let mut tracker = GestureTracker::new();

        // First finger was alone, so it starts a gesture; the second finger
        // does not start another one.
        tracker.handle(down(1, 0.0, 0.0));
        let second = tracker.handle(down(2, 50.0, 0.0));
        assert!(second.is_none());
        assert!(tracker.is_active());

        // Movement is muted while two contacts are held.
        assert!(tracker.handle(mv(1, 10.0, 0.0)).is_none());
        assert!(tracker.handle(mv(2, 60.0, 0.0)).is_none());
    }

    #[test]
    fn test_second_contact_mutes_then_resumes() {
        let mut tracker = GestureTracker::new();

        tracker.handle(down(1, 0.0, 0.0));
        assert!(tracker.handle(mv(1, 5.0, 5.0)).is_some());

        // Second finger lands mid-gesture: gesture not canceled, moves muted.
        tracker.handle(down(2, 100.0, 100.0));
        assert!(tracker.is_active());
        assert!(tracker.handle(mv(1, 10.0, 10.0)).is_none());

        // Second finger lifts: not the last contact, so no End, and moves
        // resume.
        assert!(tracker.handle(up(2, 100.0, 100.0)).is_none());
        assert!(tracker.is_active());
        assert!(tracker.handle(mv(1, 15.0, 15.0)).is_some());

        let end = tracker.handle(up(1, 20.0, 20.0));
        assert!(matches!(end, Some(GestureEvent::End { .. })));
    }

    #[test]
    fn test_cancel_is_gesture_end() {
        let mut tracker = GestureTracker::new();

        tracker.handle(down(1, 0.0, 0.0));
        tracker.handle(mv(1, 8.0, 8.0));

        let end = tracker.handle(PointerInput::Cancel { contact: 1 });
        assert!(matches!(
            end,
            Some(GestureEvent::End { position }) if position == Point::new(8.0, 8.0)
        ));
        assert!(!tracker.is_active());
    }

    #[test]
    fn test_leave_ends_gesture() {
        let mut tracker = GestureTracker::new();

        tracker.handle(down(1, 0.0, 0.0));
        tracker.handle(mv(1, 3.0, 4.0));

        let end = tracker.handle(PointerInput::Leave);
        assert!(matches!(end, Some(GestureEvent::End { .. })));
        assert_eq!(tracker.contact_count(), 0);
    }

    #[test]
    fn test_leave_without_gesture_is_silent() {
        let mut tracker = GestureTracker::new();
        assert!(tracker.handle(PointerInput::Leave).is_none());
    }

    #[test]
    fn test_move_without_contact_is_hover() {
        let mut tracker = GestureTracker::new();
        assert!(tracker.handle(mv(1, 5.0, 5.0)).is_none());
    }
}
