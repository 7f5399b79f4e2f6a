//! Gesture State Machine
//!
//! `Idle -> Dragging(move|resize) -> Idle`, with a settle flag after a real
//! drag so the trailing click can be told apart from a fresh one.

use crate::geometry::{moved_rect, resized_rect, FieldBounds, Point, Rect};

/// What the pointer is doing to the rectangle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    /// Body press: translate the rectangle
    Move,
    /// Corner-handle press: grow/shrink width and height
    Resize,
}

/// Everything captured at pointer-down
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub id: u32,
    pub mode: DragMode,
    /// Rectangle as it was when the gesture began
    pub origin: Rect,
    /// Pointer position in meters at pointer-down
    pub start: Point,
    /// Pointer position in client pixels at pointer-down
    pub start_client: Point,
    /// Set once the pointer travels past the click threshold
    pub moved: bool,
}

impl DragSession {
    pub fn new(id: u32, mode: DragMode, origin: Rect, start: Point, start_client: Point) -> Self {
        Self { id, mode, origin, start, start_client, moved: false }
    }

    /// Rectangle for the current pointer position
    pub fn apply(&self, pointer: Point, bounds: FieldBounds, step: f64) -> Rect {
        let delta = pointer.delta_from(self.start);
        match self.mode {
            DragMode::Move => moved_rect(self.origin, delta, bounds, step),
            DragMode::Resize => resized_rect(self.origin, delta, bounds, step),
        }
    }
}

/// Current gesture phase
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GesturePhase {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// How a gesture finished
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEnd {
    /// Pointer-up with no gesture in progress
    Nothing,
    /// Press and release without passing the threshold
    Click(u32),
    /// The rectangle was moved or resized; carries its final placement
    Dragged(u32, Rect),
}

/// Tunables for click/drag discrimination
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragOptions {
    /// Client-pixel travel before a press counts as a drag
    pub threshold_px: f64,
    /// How long the "just ended" flag survives after a drag
    pub settle_ms: i32,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self { threshold_px: 3.0, settle_ms: 100 }
    }
}

/// Gesture state for one canvas
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Gesture {
    pub phase: GesturePhase,
    /// Raised by a finished drag, cleared by `settle`
    pub just_ended: bool,
    /// Last rectangle produced by `update`
    last: Option<Rect>,
}

impl Gesture {
    /// Start a gesture. Refused while another one is active.
    pub fn begin(&mut self, session: DragSession) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.phase = GesturePhase::Dragging(session);
        self.last = None;
        true
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, GesturePhase::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.phase {
            GesturePhase::Dragging(s) => Some(s),
            GesturePhase::Idle => None,
        }
    }

    /// Id of the rectangle being moved, once it has actually moved
    pub fn active_id(&self) -> Option<u32> {
        self.session().filter(|s| s.moved).map(|s| s.id)
    }

    /// Feed a pointer move. Returns the new placement once the gesture has
    /// passed the threshold.
    pub fn update(
        &mut self,
        pointer: Point,
        client: Point,
        bounds: FieldBounds,
        step: f64,
        options: &DragOptions,
    ) -> Option<(u32, Rect)> {
        let GesturePhase::Dragging(session) = &mut self.phase else {
            return None;
        };
        if !session.moved {
            let travel = client.delta_from(session.start_client);
            if travel.x.abs() <= options.threshold_px && travel.y.abs() <= options.threshold_px {
                return None;
            }
            session.moved = true;
        }
        let rect = session.apply(pointer, bounds, step);
        self.last = Some(rect);
        Some((session.id, rect))
    }

    /// Finish the gesture. A real drag raises `just_ended`.
    pub fn end(&mut self) -> GestureEnd {
        let phase = std::mem::take(&mut self.phase);
        let last = self.last.take();
        match phase {
            GesturePhase::Idle => GestureEnd::Nothing,
            GesturePhase::Dragging(session) if session.moved => {
                self.just_ended = true;
                GestureEnd::Dragged(session.id, last.unwrap_or(session.origin))
            }
            GesturePhase::Dragging(session) => GestureEnd::Click(session.id),
        }
    }

    /// Clear the post-drag flag (called after the settle delay)
    pub fn settle(&mut self) {
        self.just_ended = false;
    }

    /// Whether a click on a rectangle should open its editor now
    pub fn accepts_click(&self) -> bool {
        !self.is_dragging() && !self.just_ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD: FieldBounds = FieldBounds { width: 600.0, height: 400.0 };
    const STEP: f64 = 20.0;

    fn session(mode: DragMode) -> DragSession {
        DragSession::new(7, mode, Rect::new(0.0, 0.0, 100.0, 80.0), Point::new(10.0, 10.0), Point::new(50.0, 50.0))
    }

    #[test]
    fn test_begin_refused_while_dragging() {
        let mut g = Gesture::default();
        assert!(g.begin(session(DragMode::Move)));
        assert!(!g.begin(session(DragMode::Resize)));
        assert_eq!(g.session().map(|s| s.mode), Some(DragMode::Move));
    }

    #[test]
    fn test_small_jitter_is_a_click() {
        let opts = DragOptions::default();
        let mut g = Gesture::default();
        g.begin(session(DragMode::Move));
        assert_eq!(g.update(Point::new(11.0, 11.0), Point::new(52.0, 49.0), FIELD, STEP, &opts), None);
        assert_eq!(g.end(), GestureEnd::Click(7));
        assert!(g.accepts_click());
    }

    #[test]
    fn test_drag_then_click_is_suppressed_until_settle() {
        let opts = DragOptions::default();
        let mut g = Gesture::default();
        g.begin(session(DragMode::Move));
        let moved = g.update(Point::new(63.0, 21.0), Point::new(120.0, 70.0), FIELD, STEP, &opts);
        assert_eq!(moved, Some((7, Rect::new(40.0, 0.0, 100.0, 80.0))));
        assert_eq!(g.active_id(), Some(7));

        assert_eq!(g.end(), GestureEnd::Dragged(7, Rect::new(40.0, 0.0, 100.0, 80.0)));
        assert!(!g.accepts_click());

        g.settle();
        assert!(g.accepts_click());
    }

    #[test]
    fn test_resize_session_changes_size_only() {
        let opts = DragOptions::default();
        let mut g = Gesture::default();
        g.begin(session(DragMode::Resize));
        let (_, r) = g
            .update(Point::new(75.0, 55.0), Point::new(200.0, 200.0), FIELD, STEP, &opts)
            .expect("past threshold");
        assert_eq!(r, Rect::new(0.0, 0.0, 160.0, 120.0));
    }

    #[test]
    fn test_cancelled_drag_frees_next_press() {
        let opts = DragOptions::default();
        let mut g = Gesture::default();
        g.begin(session(DragMode::Move));
        g.update(Point::new(63.0, 21.0), Point::new(120.0, 70.0), FIELD, STEP, &opts);
        // No pointerup ever arrives; the cancel path ends the gesture instead
        assert_eq!(g.end(), GestureEnd::Dragged(7, Rect::new(40.0, 0.0, 100.0, 80.0)));
        assert!(!g.is_dragging());

        let next = DragSession::new(9, DragMode::Resize, Rect::new(0.0, 0.0, 40.0, 40.0), Point::default(), Point::default());
        assert!(g.begin(next));
        assert_eq!(g.session().map(|s| s.id), Some(9));
    }

    #[test]
    fn test_end_while_idle() {
        let mut g = Gesture::default();
        assert_eq!(g.end(), GestureEnd::Nothing);
        assert!(g.accepts_click());
    }

    #[test]
    fn test_move_past_threshold_without_change_keeps_origin() {
        let opts = DragOptions::default();
        let mut g = Gesture::default();
        g.begin(session(DragMode::Move));
        // Pointer pinned at the start meters (e.g. clamped at an edge)
        g.update(Point::new(10.0, 10.0), Point::new(90.0, 50.0), FIELD, STEP, &opts);
        assert_eq!(g.end(), GestureEnd::Dragged(7, Rect::new(0.0, 0.0, 100.0, 80.0)));
    }
}
