//! Redraw coalescing for animation-frame pacing.

/// Coalesces redraw requests to at most one per animation frame.
///
/// High-frequency move events call [`FramePump::request`]; the host drains
/// the flag once per frame with [`FramePump::take`] and redraws if it was
/// set. A request arriving before the frame fires simply replaces the stale
/// one, so the redraw always reflects the latest input state and never runs
/// twice in the same frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FramePump {
    pending: bool,
}

impl FramePump {
    /// Create a pump with no pending redraw.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a redraw for the next frame.
    pub fn request(&mut self) {
        self.pending = true;
    }

    /// Drop any pending redraw without running it.
    ///
    /// Used when a gesture ends or a resize happens before the frame fires;
    /// the caller follows up with an unconditional [`FramePump::request`]
    /// reflecting the final state.
    pub fn cancel(&mut self) {
        self.pending = false;
    }

    /// Consume the pending flag. Called once per animation frame.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Whether a redraw is currently scheduled.
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_coalesce() {
        let mut pump = FramePump::new();
        assert!(!pump.is_pending());
        pump.request();
        pump.request();
        pump.request();
        assert!(pump.is_pending());

        assert!(pump.take());
        // All three requests collapsed into a single frame.
        assert!(!pump.take());
        assert!(!pump.is_pending());
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut pump = FramePump::new();
        pump.request();
        pump.cancel();
        assert!(!pump.take());
    }

    #[test]
    fn test_cancel_then_fresh_request() {
        let mut pump = FramePump::new();
        pump.request();
        pump.cancel();
        pump.request();
        assert!(pump.take());
    }
}
