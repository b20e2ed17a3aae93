// src/geometry.rs

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable, PartialEq)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Vec2> for Point2 {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point2> for Vec2 {
    fn from(p: Point2) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// A directed segment between two points. Edges belong to exactly one
/// [`Shape`](crate::shape::Shape) and are rebuilt with its world vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub p1: Point2,
    pub p2: Point2,
}

impl Edge {
    pub fn new(p1: Point2, p2: Point2) -> Self {
        Self { p1, p2 }
    }

    /// Crossing point of two finite segments.
    ///
    /// Both segments are turned into lines `a*x + b*y = c`. Parallel and
    /// coincident lines have a zero determinant and report no crossing, so
    /// two overlapping collinear segments are missed. Touching at an
    /// endpoint counts (`ua`/`ub` bounds are inclusive).
    pub fn intersection(&self, other: &Edge) -> Option<Point2> {
        let (x1, y1, x2, y2) = (self.p1.x, self.p1.y, self.p2.x, self.p2.y);
        let (x3, y3, x4, y4) = (other.p1.x, other.p1.y, other.p2.x, other.p2.y);

        let a1 = y2 - y1;
        let b1 = x1 - x2;
        let c1 = a1 * x1 + b1 * y1;

        let a2 = y4 - y3;
        let b2 = x3 - x4;
        let c2 = a2 * x3 + b2 * y3;

        let denom = a1 * b2 - a2 * b1;
        if denom == 0.0 {
            return None;
        }

        let x = (b2 * c1 - b1 * c2) / denom;
        let y = (a1 * c2 - a2 * c1) / denom;

        // Same determinant, expressed through the direction vectors.
        let ua = ((x4 - x3) * (y1 - y3) - (y4 - y3) * (x1 - x3)) / denom;
        let ub = ((x2 - x1) * (y1 - y3) - (y2 - y1) * (x1 - x3)) / denom;

        if (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub) {
            Some(Point2::new(x, y))
        } else {
            None
        }
    }

    pub fn intersects(&self, other: &Edge) -> bool {
        self.intersection(other).is_some()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Aabb {
    /// Bounds of a point set. Returns `None` for an empty slice.
    pub fn from_points(points: &[Point2]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Aabb {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in &points[1..] {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.max_x < other.min_x
            || self.max_y < other.min_y
            || self.min_x > other.max_x
            || self.min_y > other.max_y)
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// Unsigned shoelace area of a closed polygon.
pub fn polygon_area(vertices: &[Point2]) -> f32 {
    let count = vertices.len();
    if count < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..count {
        let j = (i + 1) % count;
        area += vertices[i].x * vertices[j].y;
        area -= vertices[j].x * vertices[i].y;
    }
    area.abs() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn edge(x1: f32, y1: f32, x2: f32, y2: f32) -> Edge {
        Edge::new(Point2::new(x1, y1), Point2::new(x2, y2))
    }

    #[test]
    fn crossing_segments_report_point() {
        let a = edge(0.0, 0.0, 10.0, 10.0);
        let b = edge(0.0, 10.0, 10.0, 0.0);
        let p = a.intersection(&b).expect("segments cross");
        assert_relative_eq!(p.x, 5.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn parallel_segments_never_intersect() {
        let a = edge(0.0, 0.0, 10.0, 0.0);
        let b = edge(0.0, 1.0, 10.0, 1.0);
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn coincident_overlap_is_missed() {
        let a = edge(0.0, 0.0, 10.0, 0.0);
        let b = edge(5.0, 0.0, 15.0, 0.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn lines_crossing_outside_segments_are_rejected() {
        let a = edge(0.0, 0.0, 1.0, 0.0);
        let b = edge(5.0, -1.0, 5.0, 1.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn touching_endpoint_counts() {
        let a = edge(0.0, 0.0, 10.0, 0.0);
        let b = edge(10.0, 0.0, 10.0, 10.0);
        let p = a.intersection(&b).expect("shared endpoint");
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-5);

        // T junction: endpoint of one lies inside the other
        let c = edge(5.0, 0.0, 5.0, 7.0);
        assert!(a.intersects(&c));
    }

    #[test]
    fn aabb_overlap_is_inclusive() {
        let a = Aabb { min_x: 0.0, min_y: 0.0, max_x: 1.0, max_y: 1.0 };
        let b = Aabb { min_x: 1.0, min_y: 0.0, max_x: 2.0, max_y: 1.0 };
        let c = Aabb { min_x: 1.5, min_y: 0.0, max_x: 2.0, max_y: 1.0 };
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn aabb_from_points() {
        assert_eq!(Aabb::from_points(&[]), None);
        let bounds = Aabb::from_points(&[
            Point2::new(3.0, -1.0),
            Point2::new(-2.0, 4.0),
            Point2::new(1.0, 1.0),
        ])
        .unwrap();
        assert_eq!(bounds, Aabb { min_x: -2.0, min_y: -1.0, max_x: 3.0, max_y: 4.0 });
        assert_relative_eq!(bounds.width(), 5.0);
        assert_relative_eq!(bounds.height(), 5.0);
    }

    #[test]
    fn area_of_square_and_collinear_points() {
        let square = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        assert_relative_eq!(polygon_area(&square), 4.0);
        let line = [Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), Point2::new(2.0, 2.0)];
        assert_relative_eq!(polygon_area(&line), 0.0);
    }
}
