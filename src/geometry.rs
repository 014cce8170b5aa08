//! Planar value types used by the index.
//!
//! `Point` compares coordinates with an absolute tolerance of `f64::EPSILON`,
//! so two points are equal when both coordinates differ by less than that.
//! `Rect` wraps `geo::Rect` and adds the containment, overlap and distance
//! tests the tree traversals need.

use geo::{Coord, Rect as GeoRect};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Absolute tolerance for coordinate equality.
pub const EPSILON: f64 = f64::EPSILON;

#[inline]
pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// A point in the plane.
///
/// # Examples
///
/// ```
/// use kdtree2d::Point;
///
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(3.0, 4.0);
/// assert_eq!(a.distance(&b), 5.0);
/// assert_eq!(b, Point::new(3.0 + f64::EPSILON / 4.0, 4.0));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// True when neither coordinate is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Total order on raw coordinates (x, then y), used for sorting.
    pub(crate) fn total_cmp(&self, other: &Point) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }
}

impl PartialOrd for Point {
    /// Lexicographic on (x, y) with epsilon equality per coordinate.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if approx_eq(self.x, other.x) {
            if approx_eq(self.y, other.y) {
                return Some(Ordering::Equal);
            }
            return self.y.partial_cmp(&other.y);
        }
        self.x.partial_cmp(&other.x)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({} {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl From<Point> for (f64, f64) {
    fn from(point: Point) -> Self {
        (point.x, point.y)
    }
}

impl From<Coord<f64>> for Point {
    fn from(coord: Coord<f64>) -> Self {
        Point::new(coord.x, coord.y)
    }
}

impl From<Point> for Coord<f64> {
    fn from(point: Point) -> Self {
        geo::coord! { x: point.x, y: point.y }
    }
}

impl From<geo::Point<f64>> for Point {
    fn from(point: geo::Point<f64>) -> Self {
        Point::new(point.x(), point.y())
    }
}

impl From<Point> for geo::Point<f64> {
    fn from(point: Point) -> Self {
        geo::Point::new(point.x, point.y)
    }
}

/// An axis-aligned rectangle, closed on all edges.
///
/// Corners may be given in any order; they are normalized so that
/// `left_bottom()` holds the minimum coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    rect: GeoRect<f64>,
}

impl Rect {
    pub fn new(left_bottom: Point, right_top: Point) -> Self {
        Self {
            rect: GeoRect::new(Coord::from(left_bottom), Coord::from(right_top)),
        }
    }

    /// The whole plane. Root region of every tree traversal.
    pub fn plane() -> Self {
        Self::new(
            Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            Point::new(f64::INFINITY, f64::INFINITY),
        )
    }

    pub fn from_rect(rect: GeoRect<f64>) -> Self {
        Self { rect }
    }

    pub fn as_geo(&self) -> &GeoRect<f64> {
        &self.rect
    }

    pub fn min_x(&self) -> f64 {
        self.rect.min().x
    }

    pub fn min_y(&self) -> f64 {
        self.rect.min().y
    }

    pub fn max_x(&self) -> f64 {
        self.rect.max().x
    }

    pub fn max_y(&self) -> f64 {
        self.rect.max().y
    }

    pub fn left_bottom(&self) -> Point {
        self.rect.min().into()
    }

    pub fn right_top(&self) -> Point {
        self.rect.max().into()
    }

    /// True when no corner coordinate is NaN. Infinite extents are allowed.
    pub fn is_valid(&self) -> bool {
        ![self.min_x(), self.min_y(), self.max_x(), self.max_y()]
            .iter()
            .any(|v| v.is_nan())
    }

    /// Inclusive containment on all four edges.
    pub fn contains(&self, point: &Point) -> bool {
        point.x() >= self.min_x()
            && point.x() <= self.max_x()
            && point.y() >= self.min_y()
            && point.y() <= self.max_y()
    }

    /// True when the closed rectangles share at least one point.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.max_x() < other.min_x()
            || self.min_x() > other.max_x()
            || self.max_y() < other.min_y()
            || self.min_y() > other.max_y())
    }

    /// Smallest distance from `point` to any point of the rectangle.
    ///
    /// Zero inside. Outside, the minimum of the four corner distances and,
    /// when the point lies within the rectangle's span on one axis, the
    /// perpendicular distance to the nearer edge across the other axis.
    pub fn distance(&self, point: &Point) -> f64 {
        if self.contains(point) {
            return 0.0;
        }
        let (x0, y0, x1, y1) = (self.min_x(), self.min_y(), self.max_x(), self.max_y());
        let mut best = [(x0, y0), (x0, y1), (x1, y0), (x1, y1)]
            .into_iter()
            .map(|(x, y)| point.distance(&Point::new(x, y)))
            .fold(f64::INFINITY, f64::min);
        if point.x() >= x0 && point.x() <= x1 {
            best = best.min((point.y() - y0).abs().min((point.y() - y1).abs()));
        }
        if point.y() >= y0 && point.y() <= y1 {
            best = best.min((point.x() - x0).abs().min((point.x() - x1).abs()));
        }
        best
    }

    /// Splits at `x` into the part left of and the part right of the line.
    /// Both halves keep the line itself.
    pub fn split_at_x(&self, x: f64) -> (Rect, Rect) {
        let left = Rect::new(self.left_bottom(), Point::new(x, self.max_y()));
        let right = Rect::new(Point::new(x, self.min_y()), self.right_top());
        (left, right)
    }

    /// Splits at `y` into the part below and the part above the line.
    pub fn split_at_y(&self, y: f64) -> (Rect, Rect) {
        let below = Rect::new(self.left_bottom(), Point::new(self.max_x(), y));
        let above = Rect::new(Point::new(self.min_x(), y), self.right_top());
        (below, above)
    }
}

impl From<GeoRect<f64>> for Rect {
    fn from(rect: GeoRect<f64>) -> Self {
        Self::from_rect(rect)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect({}, {})", self.left_bottom(), self.right_top())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_epsilon_equality() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(p, Point::new(1.0 + EPSILON / 2.0, 2.0));
        assert_ne!(p, Point::new(1.0 + 1e-9, 2.0));
        assert_ne!(p, Point::new(1.0, 2.5));
    }

    #[test]
    fn test_point_ordering_is_lexicographic() {
        let a = Point::new(1.0, 5.0);
        let b = Point::new(2.0, 0.0);
        let c = Point::new(1.0, 6.0);
        assert!(a < b);
        assert!(a < c);
        assert!(c < b);
        assert_eq!(
            a.partial_cmp(&Point::new(1.0, 5.0 + EPSILON / 4.0)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn test_point_display() {
        assert_eq!(Point::new(1.0, 2.5).to_string(), "Point(1 2.5)");
        assert_eq!(Point::new(-3.25, 0.0).to_string(), "Point(-3.25 0)");
    }

    #[test]
    fn test_point_geo_conversions() {
        let p = Point::new(3.0, -4.0);
        let gp: geo::Point<f64> = p.into();
        assert_eq!(gp.x(), 3.0);
        assert_eq!(Point::from(gp), p);
        let c: Coord<f64> = p.into();
        assert_eq!(c.y, -4.0);
        assert_eq!(Point::from((3.0, -4.0)), p);
    }

    #[test]
    fn test_rect_normalizes_corners() {
        let r = Rect::new(Point::new(4.0, 5.0), Point::new(0.0, 1.0));
        assert_eq!(r.left_bottom(), Point::new(0.0, 1.0));
        assert_eq!(r.right_top(), Point::new(4.0, 5.0));
    }

    #[test]
    fn test_rect_contains_is_inclusive() {
        let r = Rect::new(Point::new(0.0, 0.0), Point::new(4.0, 5.0));
        assert!(r.contains(&Point::new(0.0, 0.0)));
        assert!(r.contains(&Point::new(4.0, 5.0)));
        assert!(r.contains(&Point::new(2.0, 5.0)));
        assert!(!r.contains(&Point::new(4.000001, 1.0)));
    }

    #[test]
    fn test_rect_intersects_cross_shape() {
        let wide = Rect::new(Point::new(-10.0, -1.0), Point::new(10.0, 1.0));
        let tall = Rect::new(Point::new(-1.0, -10.0), Point::new(1.0, 10.0));
        assert!(wide.intersects(&tall));
        assert!(tall.intersects(&wide));

        let touching = Rect::new(Point::new(10.0, 1.0), Point::new(12.0, 3.0));
        assert!(wide.intersects(&touching));

        let apart = Rect::new(Point::new(11.0, 0.0), Point::new(12.0, 0.5));
        assert!(!wide.intersects(&apart));
        assert!(Rect::plane().intersects(&apart));
    }

    #[test]
    fn test_rect_distance() {
        let r = Rect::new(Point::new(0.0, 0.0), Point::new(2.0, 2.0));
        assert_eq!(r.distance(&Point::new(1.0, 1.0)), 0.0);
        assert_eq!(r.distance(&Point::new(1.0, 5.0)), 3.0);
        assert_eq!(r.distance(&Point::new(-4.0, 1.0)), 4.0);
        assert_eq!(r.distance(&Point::new(5.0, 6.0)), 5.0);
        assert_eq!(Rect::plane().distance(&Point::new(1e300, -1e300)), 0.0);
    }

    #[test]
    fn test_rect_distance_half_plane() {
        let (left, right) = Rect::plane().split_at_x(3.0);
        assert_eq!(left.distance(&Point::new(5.0, 7.0)), 2.0);
        assert_eq!(right.distance(&Point::new(5.0, 7.0)), 0.0);
        let (below, above) = right.split_at_y(-1.0);
        assert_eq!(below.distance(&Point::new(4.0, 2.0)), 3.0);
        assert_eq!(above.distance(&Point::new(0.0, 2.0)), 3.0);
    }

    #[test]
    fn test_rect_validity() {
        assert!(Rect::plane().is_valid());
        assert!(!Rect::new(Point::new(f64::NAN, 0.0), Point::new(1.0, 1.0)).is_valid());
    }
}
