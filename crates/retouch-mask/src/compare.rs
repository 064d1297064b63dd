//! Before/after comparator state.
//!
//! A single continuous reveal value in `[0, 100]` driven by pointer
//! drag. The component owning the rendering clips the edited image to
//! the left `position` percent of the container; this module owns only
//! the scalar state and the drag state machine.
//!
//! Dragging is an explicit [`DragState`] rather than an `is_dragging`
//! flag: a `drag_move` while idle is unrepresentable as an effectful
//! call, not a silently ignored branch buried in arithmetic.

use serde::{Deserialize, Serialize};

/// Reveal percentage on mount: half-and-half.
pub const DEFAULT_REVEAL: f64 = 50.0;

/// Whether a drag gesture currently owns the divider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragState {
    /// No active drag; pointer moves have no effect.
    Idle,
    /// The divider follows horizontal pointer movement.
    Dragging,
}

/// Drag-driven before/after reveal state.
///
/// Only one drag can be active at a time — there is a single scalar
/// position and no multi-touch gesture support. Transient: reset on
/// mount, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparator {
    position: f64,
    drag: DragState,
}

impl Default for Comparator {
    fn default() -> Self {
        Self::new()
    }
}

impl Comparator {
    /// Create a comparator at the default 50% reveal, idle.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            position: DEFAULT_REVEAL,
            drag: DragState::Idle,
        }
    }

    /// Begin a drag. The caller is responsible for suppressing the
    /// platform default action (text selection, page scroll) on the
    /// originating event.
    pub const fn drag_start(&mut self) {
        self.drag = DragState::Dragging;
    }

    /// End the active drag. Idempotent.
    pub const fn drag_end(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Track a horizontal pointer position while dragging.
    ///
    /// `client_x` is in viewport coordinates; `container_left` and
    /// `container_width` describe the comparator's on-screen box. The
    /// offset is clamped to `[0, container_width]` *before* dividing,
    /// which keeps the resulting percentage in `[0, 100]` by
    /// construction for any input, including positions far outside the
    /// container. No effect while idle or for a degenerate container.
    pub fn drag_move(&mut self, client_x: f64, container_left: f64, container_width: f64) {
        if self.drag != DragState::Dragging || container_width <= 0.0 {
            return;
        }
        let x = (client_x - container_left).clamp(0.0, container_width);
        self.position = x / container_width * 100.0;
    }

    /// The current reveal percentage in `[0, 100]`.
    #[must_use]
    pub const fn reveal_percent(&self) -> f64 {
        self.position
    }

    /// Whether a drag is active.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging)
    }

    /// Return to the mount state: 50% reveal, idle.
    pub const fn reset(&mut self) {
        self.position = DEFAULT_REVEAL;
        self.drag = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_half_reveal() {
        let comparator = Comparator::new();
        assert!((comparator.reveal_percent() - 50.0).abs() < f64::EPSILON);
        assert!(!comparator.is_dragging());
    }

    #[test]
    fn move_without_drag_has_no_effect() {
        let mut comparator = Comparator::new();
        comparator.drag_move(300.0, 0.0, 400.0);
        assert!((comparator.reveal_percent() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn drag_tracks_pointer() {
        let mut comparator = Comparator::new();
        comparator.drag_start();
        // 20% of a 400px container starting at x=100.
        comparator.drag_move(180.0, 100.0, 400.0);
        assert!((comparator.reveal_percent() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn position_clamps_for_wild_inputs() {
        let mut comparator = Comparator::new();
        comparator.drag_start();

        comparator.drag_move(-10_000.0, 0.0, 400.0);
        assert!((comparator.reveal_percent() - 0.0).abs() < f64::EPSILON);

        comparator.drag_move(10_000.0, 0.0, 400.0);
        assert!((comparator.reveal_percent() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn moves_after_drag_end_are_ignored() {
        let mut comparator = Comparator::new();
        comparator.drag_start();
        comparator.drag_move(80.0, 0.0, 400.0);
        assert!((comparator.reveal_percent() - 20.0).abs() < 1e-9);

        comparator.drag_end();
        comparator.drag_move(399.0, 0.0, 400.0);
        assert!((comparator.reveal_percent() - 20.0).abs() < 1e-9);

        // A new drag picks tracking back up.
        comparator.drag_start();
        comparator.drag_move(200.0, 0.0, 400.0);
        assert!((comparator.reveal_percent() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_container_is_ignored() {
        let mut comparator = Comparator::new();
        comparator.drag_start();
        comparator.drag_move(100.0, 0.0, 0.0);
        comparator.drag_move(100.0, 0.0, -5.0);
        assert!((comparator.reveal_percent() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn reset_returns_to_mount_state() {
        let mut comparator = Comparator::new();
        comparator.drag_start();
        comparator.drag_move(390.0, 0.0, 400.0);
        comparator.reset();
        assert!((comparator.reveal_percent() - 50.0).abs() < f64::EPSILON);
        assert!(!comparator.is_dragging());
    }
}
