//! Closed 2D contours and the offset/cleanup operations wall generation needs.

use lamina_math::{right_normal, Point2, Tolerance, Vec2};

const TOL: Tolerance = Tolerance::DEFAULT;

/// Corner treatment for offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinStyle {
    /// Mitered corners, clamped at twice the offset distance.
    Round,
    /// Corners the offset would push outward are squared off with a
    /// chamfer between the two adjacent edge offsets, keeping every
    /// emitted point within the offset distance of the vertex.
    Square,
}

/// A 2D polygon (closed path).
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Vertices of the polygon in order.
    pub points: Vec<Point2>,
}

impl Polygon {
    /// Create a new polygon from points.
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Check if the polygon is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Signed area of the polygon.
    /// Positive for counter-clockwise, negative for clockwise.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += self.points[i].x * self.points[j].y;
            area -= self.points[j].x * self.points[i].y;
        }
        area / 2.0
    }

    /// Is the polygon counter-clockwise?
    ///
    /// By convention outer contours are CCW and holes are CW.
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Reverse the winding order.
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Perimeter length.
    pub fn perimeter(&self) -> f64 {
        let n = self.points.len();
        if n < 2 {
            return 0.0;
        }
        let mut length = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            length += (self.points[j] - self.points[i]).norm();
        }
        length
    }

    /// Offset the polygon by `delta`: positive grows the enclosed region,
    /// negative shrinks it. With the CCW-outer/CW-hole convention the same
    /// sign works for both windings (a negative delta shrinks the material
    /// around a hole by growing the hole loop).
    ///
    /// Each vertex moves along the corner bisector, with the miter clamped
    /// per `join`. Returns `None` if the offset collapses the polygon
    /// (area vanishes or the winding flips).
    pub fn offset(&self, delta: f64, join: JoinStyle) -> Option<Self> {
        // Drop coincident neighbors so edge directions are well defined.
        let mut pts = self.points.clone();
        dedup_closed(&mut pts);
        let n = pts.len();
        if n < 3 {
            return None;
        }

        let limit = 2.0 * delta.abs();

        let mut offset_points = Vec::with_capacity(n);
        for i in 0..n {
            let p0 = pts[(i + n - 1) % n];
            let p1 = pts[i];
            let p2 = pts[(i + 1) % n];

            let e1 = (p1 - p0).normalize();
            let e2 = (p2 - p1).normalize();

            // Outward side of the traversal direction.
            let n1 = right_normal(&e1);
            let n2 = right_normal(&e2);

            // Positive when the offset pushes this corner outward (the
            // miter would overshoot the offset distance).
            let turn = e1.x * e2.y - e1.y * e2.x;
            if join == JoinStyle::Square
                && turn * delta > 1e-12
                && (n1 - n2).norm() * delta.abs() > TOL.linear
            {
                // Square the corner off: chamfer between the two edge
                // offsets instead of the miter point.
                offset_points.push(p1 + n1 * delta);
                offset_points.push(p1 + n2 * delta);
                continue;
            }

            let sum: Vec2 = n1 + n2;
            if TOL.is_zero(sum.norm()) {
                // Spike vertex (180° turn) — no bisector; fall back to the
                // incoming edge normal.
                offset_points.push(p1 + n1 * delta);
                continue;
            }
            let bisector = sum.normalize();

            let dot = n1.dot(&bisector);
            let miter = if dot.abs() > 1e-3 { delta / dot } else { delta };
            let clamped = miter.clamp(-limit, limit);

            offset_points.push(p1 + bisector * clamped);
        }

        let result = Polygon::new(offset_points);
        // Collapsed or inverted offsets are reported as no result, the
        // caller treats that as "no room for another wall".
        let source_area = self.signed_area();
        let area = result.signed_area();
        if TOL.area_is_zero(source_area)
            || TOL.area_is_zero(area)
            || area * source_area < 0.0
        {
            return None;
        }
        Some(result)
    }

    /// Remove near-collinear vertices in place, iterating to a fixed
    /// point so a second pass is a no-op.
    pub fn simplify(&mut self) {
        // Collinearity against a zero-length chord is meaningless, so
        // coincident neighbors go first.
        dedup_closed(&mut self.points);
        loop {
            let n = self.points.len();
            if n < 3 {
                return;
            }
            let mut kept: Vec<Point2> = Vec::with_capacity(n);
            for i in 0..n {
                let prev = if kept.is_empty() {
                    self.points[n - 1]
                } else {
                    *kept.last().unwrap()
                };
                let p = self.points[i];
                let next = self.points[(i + 1) % n];
                if !collinear_within(&prev, &p, &next, TOL.linear) {
                    kept.push(p);
                }
            }
            let changed = kept.len() != n;
            self.points = kept;
            if !changed {
                return;
            }
        }
    }

    /// Remove zero-length and duplicate segments in place.
    pub fn remove_degenerate_verts(&mut self) {
        dedup_closed(&mut self.points);
    }
}

/// Drop coincident consecutive vertices of a closed loop, including a
/// last vertex that closes back onto the first.
fn dedup_closed(points: &mut Vec<Point2>) {
    let mut kept: Vec<Point2> = Vec::with_capacity(points.len());
    for &p in points.iter() {
        if kept.last().map_or(true, |q| !TOL.points_equal(q, &p)) {
            kept.push(p);
        }
    }
    while kept.len() > 1 && TOL.points_equal(&kept[0], kept.last().unwrap()) {
        kept.pop();
    }
    *points = kept;
}

/// Is `p` within `eps` of the chord from `a` to `b`?
fn collinear_within(a: &Point2, p: &Point2, b: &Point2, eps: f64) -> bool {
    let chord = b - a;
    let len = chord.norm();
    if len < eps {
        // a and b coincide; p is redundant if it coincides too.
        return (p - a).norm() < eps;
    }
    let twice_area = (chord.x * (p.y - a.y) - chord.y * (p.x - a.x)).abs();
    twice_area / len < eps
}

/// A set of closed polygons: CCW outer contours plus CW holes, together
/// describing one printable area.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContourSet {
    /// The polygons of the set.
    pub polygons: Vec<Polygon>,
}

impl ContourSet {
    /// Create an empty contour set.
    pub fn new() -> Self {
        Self {
            polygons: Vec::new(),
        }
    }

    /// Create a contour set from polygons.
    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    /// Check if the set contains no contours.
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Number of contours in the set.
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    /// Total enclosed area (outer areas minus hole areas).
    pub fn area(&self) -> f64 {
        self.polygons.iter().map(|p| p.signed_area()).sum()
    }

    /// Offset every contour by `delta` (positive = outward, negative =
    /// inward). Contours that collapse under the offset are dropped; the
    /// result may be empty.
    pub fn offset(&self, delta: f64, join: JoinStyle) -> Self {
        Self {
            polygons: self
                .polygons
                .iter()
                .filter_map(|p| p.offset(delta, join))
                .collect(),
        }
    }

    /// Remove near-collinear vertices from every contour in place.
    pub fn simplify(&mut self) {
        for poly in &mut self.polygons {
            poly.simplify();
        }
    }

    /// Remove zero-length/duplicate segments in place and drop contours
    /// left with fewer than 3 vertices.
    pub fn remove_degenerate_verts(&mut self) {
        for poly in &mut self.polygons {
            poly.remove_degenerate_verts();
        }
        self.polygons.retain(|p| p.len() >= 3);
    }
}
