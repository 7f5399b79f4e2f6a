//! Meter-Space Geometry
//!
//! Pure helpers for pointer conversion, clamping and grid snapping.
//! Nothing here touches the DOM, so it is tested on the host.

/// A point in field meters (or client pixels, for raw pointer positions)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn delta_from(&self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

/// Axis-aligned rectangle in field meters
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Whether the rectangle lies entirely inside the field
    pub fn fits_in(&self, bounds: FieldBounds) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.right() <= bounds.width && self.bottom() <= bounds.height
    }
}

/// Field extent in meters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldBounds {
    pub width: f64,
    pub height: f64,
}

impl FieldBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// On-screen bounding box of the canvas element, in client pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CanvasBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Added to the step quotient so values sitting on a grid line (up to float
/// noise) stay on that line.
const SNAP_EPSILON: f64 = 1e-9;

/// `v.clamp(lo, hi)` without the panic when `lo > hi`; `lo` wins.
fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.min(hi).max(lo)
}

/// Fraction of `len` covered by `offset`, clamped to [0, 1].
fn fraction(offset: f64, len: f64) -> f64 {
    if len > 0.0 {
        clamp(offset / len, 0.0, 1.0)
    } else {
        0.0
    }
}

/// Convert a client-space pointer position to field meters.
///
/// Positions outside the canvas clamp to the nearest edge.
pub fn pointer_to_meters(client: Point, canvas: CanvasBox, bounds: FieldBounds) -> Point {
    let fx = fraction(client.x - canvas.left, canvas.width);
    let fy = fraction(client.y - canvas.top, canvas.height);
    Point::new(fx * bounds.width, fy * bounds.height)
}

/// Snap down to the grid line at or below `value`.
///
/// Idempotent, and never moves a non-negative value past an upper bound it
/// was already clamped to. A non-positive step disables snapping.
pub fn snap(value: f64, step: f64) -> f64 {
    if !(step > 0.0) || !value.is_finite() {
        return value;
    }
    ((value / step) + SNAP_EPSILON).floor() * step
}

/// New rectangle for a move gesture: origin + delta, kept inside the field,
/// then snapped.
pub fn moved_rect(origin: Rect, delta: Point, bounds: FieldBounds, step: f64) -> Rect {
    let max_x = (bounds.width - origin.width).max(0.0);
    let max_y = (bounds.height - origin.height).max(0.0);
    Rect {
        x: snap(clamp(origin.x + delta.x, 0.0, max_x), step),
        y: snap(clamp(origin.y + delta.y, 0.0, max_y), step),
        ..origin
    }
}

/// Clamp an extent to [step, available] and snap it, keeping at least the
/// minimum after snapping.
fn resize_extent(value: f64, step: f64, available: f64) -> f64 {
    let max = available.max(0.0);
    let min = if step > 0.0 { step.min(max) } else { 0.0 };
    snap(clamp(value, min, max), step).max(min)
}

/// New rectangle for a resize gesture: size + delta, at least one grid step
/// and never past the field edge.
pub fn resized_rect(origin: Rect, delta: Point, bounds: FieldBounds, step: f64) -> Rect {
    Rect {
        width: resize_extent(origin.width + delta.x, step, bounds.width - origin.x),
        height: resize_extent(origin.height + delta.y, step, bounds.height - origin.y),
        ..origin
    }
}

/// Pull a rectangle back inside the field, shrinking it if it is larger than
/// the field itself.
pub fn clamp_into(rect: Rect, bounds: FieldBounds) -> Rect {
    let width = clamp(rect.width, 0.0, bounds.width.max(0.0));
    let height = clamp(rect.height, 0.0, bounds.height.max(0.0));
    Rect {
        x: clamp(rect.x, 0.0, bounds.width - width),
        y: clamp(rect.y, 0.0, bounds.height - height),
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD: FieldBounds = FieldBounds { width: 600.0, height: 400.0 };

    fn canvas() -> CanvasBox {
        CanvasBox { left: 100.0, top: 50.0, width: 300.0, height: 200.0 }
    }

    #[test]
    fn test_pointer_to_meters_scales_fraction() {
        let p = pointer_to_meters(Point::new(250.0, 100.0), canvas(), FIELD);
        assert_eq!(p, Point::new(300.0, 100.0));
    }

    #[test]
    fn test_pointer_to_meters_clamps_outside() {
        let before = pointer_to_meters(Point::new(-40.0, 10.0), canvas(), FIELD);
        assert_eq!(before, Point::new(0.0, 0.0));

        let after = pointer_to_meters(Point::new(900.0, 999.0), canvas(), FIELD);
        assert_eq!(after, Point::new(600.0, 400.0));
    }

    #[test]
    fn test_pointer_to_meters_zero_size_canvas() {
        let empty = CanvasBox { left: 0.0, top: 0.0, width: 0.0, height: 0.0 };
        assert_eq!(pointer_to_meters(Point::new(5.0, 5.0), empty, FIELD), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_snap_rounds_down_to_grid() {
        assert_eq!(snap(53.0, 20.0), 40.0);
        assert_eq!(snap(11.0, 20.0), 0.0);
        assert_eq!(snap(60.0, 20.0), 60.0);
    }

    #[test]
    fn test_snap_is_idempotent() {
        for step in [0.1, 1.0, 5.0, 20.0, 50.0] {
            for raw in [0.0, 0.3, 7.77, 53.0, 129.9, 399.99] {
                let once = snap(raw, step);
                assert_eq!(snap(once, step), once, "raw={} step={}", raw, step);
            }
        }
    }

    #[test]
    fn test_snap_without_step_is_identity() {
        assert_eq!(snap(12.34, 0.0), 12.34);
    }

    #[test]
    fn test_move_example_snaps_origin() {
        let origin = Rect::new(0.0, 0.0, 100.0, 80.0);
        let r = moved_rect(origin, Point::new(53.0, 11.0), FIELD, 20.0);
        assert_eq!((r.x, r.y), (40.0, 0.0));
        assert_eq!((r.width, r.height), (100.0, 80.0));
    }

    #[test]
    fn test_move_stays_inside_field() {
        let origin = Rect::new(200.0, 200.0, 100.0, 80.0);
        let deltas = [
            Point::new(-1000.0, -1000.0),
            Point::new(1000.0, 1000.0),
            Point::new(395.0, -3.0),
            Point::new(-199.0, 119.0),
        ];
        for d in deltas {
            let r = moved_rect(origin, d, FIELD, 20.0);
            assert!(r.x >= 0.0 && r.x <= FIELD.width - r.width, "{:?}", r);
            assert!(r.y >= 0.0 && r.y <= FIELD.height - r.height, "{:?}", r);
        }
    }

    #[test]
    fn test_move_near_unaligned_edge() {
        // 600 - 130 = 470 is not a multiple of 20
        let origin = Rect::new(0.0, 0.0, 130.0, 40.0);
        let r = moved_rect(origin, Point::new(5000.0, 0.0), FIELD, 20.0);
        assert_eq!(r.x, 460.0);
        assert!(r.fits_in(FIELD));
    }

    #[test]
    fn test_resize_min_one_step() {
        let origin = Rect::new(100.0, 100.0, 60.0, 60.0);
        let r = resized_rect(origin, Point::new(-500.0, -500.0), FIELD, 20.0);
        assert_eq!((r.width, r.height), (20.0, 20.0));
        assert_eq!((r.x, r.y), (100.0, 100.0));
    }

    #[test]
    fn test_resize_stops_at_field_edge() {
        let origin = Rect::new(100.0, 100.0, 60.0, 60.0);
        let r = resized_rect(origin, Point::new(10_000.0, 10_000.0), FIELD, 20.0);
        assert_eq!((r.width, r.height), (500.0, 300.0));
        assert!(r.fits_in(FIELD));
    }

    #[test]
    fn test_resize_any_path_keeps_invariants() {
        let origin = Rect::new(37.0, 250.0, 45.0, 45.0);
        for dx in [-300.0, -44.0, -1.0, 0.0, 13.0, 290.0, 900.0] {
            for dy in [-300.0, -7.0, 0.0, 66.0, 149.0, 600.0] {
                let r = resized_rect(origin, Point::new(dx, dy), FIELD, 20.0);
                assert!(r.width >= 20.0 && r.height >= 20.0, "{:?}", r);
                assert!(r.right() <= FIELD.width && r.bottom() <= FIELD.height, "{:?}", r);
            }
        }
    }

    /// Deltas from -700 to 700 m in 13 m strides, both axes
    fn delta_grid() -> impl Iterator<Item = Point> {
        let axis = || (-54..=54).map(|i| i as f64 * 13.0);
        axis().flat_map(move |dx| axis().map(move |dy| Point::new(dx, dy)))
    }

    fn on_grid(value: f64, step: f64) -> bool {
        (value / step).fract() == 0.0
    }

    #[test]
    fn test_move_invariants_over_delta_grid() {
        let origins = [Rect::new(0.0, 0.0, 100.0, 80.0), Rect::new(37.5, 212.5, 45.0, 65.5), Rect::new(480.5, 300.0, 119.5, 100.0)];
        for step in [1.0, 5.0, 20.0, 50.0, 100.0] {
            for origin in origins {
                for d in delta_grid() {
                    let r = moved_rect(origin, d, FIELD, step);
                    assert!(r.x >= 0.0 && r.x <= FIELD.width - r.width, "step={} d={:?} {:?}", step, d, r);
                    assert!(r.y >= 0.0 && r.y <= FIELD.height - r.height, "step={} d={:?} {:?}", step, d, r);
                    assert!(on_grid(r.x, step) && on_grid(r.y, step), "step={} d={:?} {:?}", step, d, r);
                    assert_eq!((r.width, r.height), (origin.width, origin.height));
                }
            }
        }
    }

    #[test]
    fn test_resize_invariants_over_delta_grid() {
        let origins = [Rect::new(0.0, 0.0, 100.0, 80.0), Rect::new(37.5, 212.5, 45.0, 65.5), Rect::new(420.5, 250.0, 60.0, 40.0)];
        for step in [1.0, 5.0, 20.0, 50.0, 100.0] {
            for origin in origins {
                for d in delta_grid() {
                    let r = resized_rect(origin, d, FIELD, step);
                    assert!(r.width >= step && r.height >= step, "step={} d={:?} {:?}", step, d, r);
                    assert!(r.right() <= FIELD.width && r.bottom() <= FIELD.height, "step={} d={:?} {:?}", step, d, r);
                    assert_eq!((r.x, r.y), (origin.x, origin.y));
                }
            }
        }
    }

    #[test]
    fn test_clamp_into_shrinks_oversized() {
        let r = clamp_into(Rect::new(550.0, -10.0, 700.0, 50.0), FIELD);
        assert_eq!(r, Rect::new(0.0, 0.0, 600.0, 50.0));
    }

    #[test]
    fn test_clamp_into_pulls_back_inside() {
        let r = clamp_into(Rect::new(580.0, 390.0, 40.0, 40.0), FIELD);
        assert_eq!(r, Rect::new(560.0, 360.0, 40.0, 40.0));
    }
}
