// src/intersection.rs

use crate::geometry::Point2;
use crate::shape::Shape;

/// How two shapes were found to touch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Contact {
    /// First crossing found between an edge of each shape.
    Crossing(Point2),
    /// No edges cross but one polygon lies entirely inside the other.
    Contained,
}

pub struct PolygonCollision;

impl PolygonCollision {
    /// Symmetric overlap test between two up-to-date shapes.
    pub fn intersects(a: &Shape, b: &Shape) -> bool {
        Self::find_contact(a, b).is_some()
    }

    /// Bounds reject, then every edge pair, then the containment fallback.
    /// Degenerate shapes never touch anything.
    pub fn find_contact(a: &Shape, b: &Shape) -> Option<Contact> {
        if a.is_degenerate() || b.is_degenerate() {
            return None;
        }
        if !a.bounds().overlaps(b.bounds()) {
            return None;
        }

        if let Some(point) = Self::first_edge_crossing(a, b) {
            return Some(Contact::Crossing(point));
        }

        if a.all_points_inside(b) || b.all_points_inside(a) {
            return Some(Contact::Contained);
        }
        None
    }

    #[inline(always)]
    fn first_edge_crossing(a: &Shape, b: &Shape) -> Option<Point2> {
        for edge_a in a.edges() {
            for edge_b in b.edges() {
                if let Some(point) = edge_a.intersection(edge_b) {
                    return Some(point);
                }
            }
        }
        None
    }

    /// Index of the first shape in `others` that touches `subject`.
    pub fn first_hit<'a, I>(subject: &Shape, others: I) -> Option<(usize, Contact)>
    where
        I: IntoIterator<Item = &'a Shape>,
    {
        others
            .into_iter()
            .enumerate()
            .find_map(|(index, other)| Self::find_contact(subject, other).map(|c| (index, c)))
    }
}
