//! Leptos Drag/Resize Utilities
//!
//! Pointer-driven move and resize of rectangles on a canvas measured in
//! real-world meters. Uses a movement threshold to distinguish click from
//! drag, and a short settle window so the click fired after a drag is ignored.

use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

pub mod geometry;
pub mod gesture;

pub use geometry::{clamp_into, pointer_to_meters, snap, CanvasBox, FieldBounds, Point, Rect};
pub use gesture::{DragMode, DragOptions, DragSession, Gesture, GestureEnd, GesturePhase};

impl From<&web_sys::DomRect> for CanvasBox {
    fn from(r: &web_sys::DomRect) -> Self {
        CanvasBox { left: r.left(), top: r.top(), width: r.width(), height: r.height() }
    }
}

/// Gesture state signals
#[derive(Clone, Copy)]
pub struct DragSignals {
    pub gesture_read: ReadSignal<Gesture>,
    pub gesture_write: WriteSignal<Gesture>,
    pub options: DragOptions,
}

impl DragSignals {
    /// Id of the rectangle currently being dragged (after the threshold)
    pub fn dragging_id(&self) -> Option<u32> {
        self.gesture_read.with(|g| g.active_id())
    }

    /// Mode of the gesture in progress, if any
    pub fn dragging_mode(&self) -> Option<DragMode> {
        self.gesture_read.with(|g| g.session().map(|s| s.mode))
    }
}

/// The canvas a gesture is measured against
#[derive(Clone, Copy)]
pub struct DragSurface {
    pub canvas: NodeRef<Div>,
    pub bounds: Signal<FieldBounds>,
    pub step: Signal<f64>,
}

impl DragSurface {
    /// Pointer position in field meters, or None before the canvas mounts
    fn meters_at(&self, ev: &web_sys::MouseEvent) -> Option<Point> {
        let el = self.canvas.get_untracked()?;
        let rect = el.get_bounding_client_rect();
        Some(pointer_to_meters(client_point(ev), CanvasBox::from(&rect), self.bounds.get_untracked()))
    }
}

fn client_point(ev: &web_sys::MouseEvent) -> Point {
    Point::new(ev.client_x() as f64, ev.client_y() as f64)
}

pub fn create_drag_signals(options: DragOptions) -> DragSignals {
    let (gesture_read, gesture_write) = signal(Gesture::default());
    DragSignals { gesture_read, gesture_write, options }
}

/// End the gesture and, after a real drag, schedule the settle
pub fn end_drag(drag: &DragSignals) -> GestureEnd {
    let mut ended = GestureEnd::Nothing;
    drag.gesture_write.update(|g| ended = g.end());

    if let GestureEnd::Dragged(..) = ended {
        if let Some(win) = web_sys::window() {
            let clear = drag.gesture_write;
            let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
                clear.update(|g| g.settle());
            });
            let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                drag.options.settle_ms,
            );
            cb.forget();
        }
    }
    ended
}

/// Create pointerdown handler for a rectangle body (Move) or its corner
/// handle (Resize). `current` supplies the rectangle's placement at press time.
pub fn make_on_pointerdown<F>(
    drag: DragSignals,
    surface: DragSurface,
    id: u32,
    mode: DragMode,
    current: F,
) -> impl Fn(web_sys::PointerEvent) + Clone + 'static
where
    F: Fn() -> Option<Rect> + Clone + 'static,
{
    move |ev: web_sys::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        // The handle sits inside the body; keep the press from reaching it
        ev.stop_propagation();
        let Some(origin) = current() else { return };
        let Some(start) = surface.meters_at(&ev) else { return };

        let session = DragSession::new(id, mode, origin, start, client_point(&ev));
        let mut started = false;
        drag.gesture_write.update(|g| started = g.begin(session));
        if started {
            ev.prevent_default();
            log::debug!("[DRAG] begin {:?} on #{} at {:?}", mode, id, origin);
        }
    }
}

/// Create click handler that only fires when no drag just finished
pub fn make_on_click<F>(drag: DragSignals, id: u32, on_click: F) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    F: Fn(u32) + Clone + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if drag.gesture_read.with_untracked(|g| g.accepts_click()) {
            on_click(id);
        } else {
            log::debug!("[DRAG] click on #{} swallowed after drag", id);
        }
    }
}

/// Bind document pointermove: feeds the gesture and reports new placements
pub fn bind_global_pointermove<F>(drag: DragSignals, surface: DragSurface, on_update: F)
where
    F: Fn(u32, Rect) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_pointermove = Closure::<dyn FnMut(web_sys::PointerEvent)>::new(move |ev: web_sys::PointerEvent| {
        if !drag.gesture_read.with_untracked(|g| g.is_dragging()) {
            return;
        }
        let Some(pointer) = surface.meters_at(&ev) else { return };
        let bounds = surface.bounds.get_untracked();
        let step = surface.step.get_untracked();

        let mut changed = None;
        drag.gesture_write.update(|g| {
            changed = g.update(pointer, client_point(&ev), bounds, step, &drag.options);
        });
        if let Some((id, rect)) = changed {
            on_update(id, rect);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("pointermove", on_pointermove.as_ref().unchecked_ref());
        }
    }
    on_pointermove.forget();
}

/// Bind document pointerup and pointercancel: finishes the gesture and
/// reports how it ended. A cancelled pointer (touch taken over by the
/// browser, system gesture) ends the drag the same way a release does.
pub fn bind_global_pointerup<F>(drag: DragSignals, surface: DragSurface, on_update: impl Fn(u32, Rect) + Clone + 'static, on_end: F)
where
    F: Fn(GestureEnd) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_pointerup = Closure::<dyn FnMut(web_sys::PointerEvent)>::new(move |ev: web_sys::PointerEvent| {
        if !drag.gesture_read.with_untracked(|g| g.is_dragging()) {
            return;
        }
        let ended = end_drag(&drag);
        if let GestureEnd::Dragged(id, rect) = ended {
            log::debug!("[DRAG] {} on #{} at {:?}", ev.type_(), id, rect);
        }
        // Click event will fire naturally on the element
        on_end(ended);
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            for kind in ["pointerup", "pointercancel"] {
                let _ = doc.add_event_listener_with_callback(kind, on_pointerup.as_ref().unchecked_ref());
            }
        }
    }
    on_pointerup.forget();

    // Also bind global pointermove
    bind_global_pointermove(drag, surface, on_update);
}
