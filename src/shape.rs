// src/shape.rs

use glam::{Affine2, Vec2};

use crate::error::CollisionError;
use crate::geometry::{polygon_area, Aabb, Edge, Point2};

/// World polygons with less area than this are treated as degenerate.
pub const DEGENERATE_AREA: f32 = 1e-6;

/// Collision polygon owned by a single moving object.
///
/// Local vertices are fixed at construction. World vertices, edges and
/// bounds are a cache of the owner's last transform: the owner must call
/// [`Shape::update`] after every change to its position, rotation or scale
/// and before the shape takes part in a collision query. Queries against a
/// shape that was not updated see where the owner used to be.
#[derive(Clone, Debug)]
pub struct Shape {
    local_vertices: Vec<Point2>,
    world_vertices: Vec<Point2>,
    edges: Vec<Edge>,
    bounds: Aabb,
    degenerate: bool,
}

impl Shape {
    /// Builds a shape whose world space starts out equal to its local space.
    pub fn new(local_vertices: Vec<Point2>) -> Result<Self, CollisionError> {
        if local_vertices.len() < 3 {
            return Err(CollisionError::TooFewVertices(local_vertices.len()));
        }
        if let Some(index) = local_vertices
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(CollisionError::NonFiniteVertex { index });
        }

        let count = local_vertices.len();
        let mut shape = Self {
            world_vertices: local_vertices.clone(),
            local_vertices,
            edges: Vec::with_capacity(count),
            bounds: Aabb::default(),
            degenerate: false,
        };
        shape.rebuild_cache();
        Ok(shape)
    }

    pub fn from_points(points: &[Point2]) -> Result<Self, CollisionError> {
        Self::new(points.to_vec())
    }

    pub fn local_vertices(&self) -> &[Point2] {
        &self.local_vertices
    }

    pub fn world_vertices(&self) -> &[Point2] {
        &self.world_vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn count(&self) -> usize {
        self.local_vertices.len()
    }

    /// True when the current world polygon has (almost) no area, e.g.
    /// collinear vertices or a zero scale. Such shapes never collide.
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Re-projects every local vertex through `transform` and refreshes the
    /// edges and bounds.
    pub fn update(&mut self, transform: &Affine2) {
        for (world, local) in self.world_vertices.iter_mut().zip(&self.local_vertices) {
            *world = transform.transform_point2(Vec2::from(*local)).into();
        }
        self.rebuild_cache();
    }

    fn rebuild_cache(&mut self) {
        let count = self.world_vertices.len();
        self.edges.clear();
        for i in 0..count {
            let j = (i + 1) % count;
            self.edges.push(Edge::new(self.world_vertices[i], self.world_vertices[j]));
        }
        // Non-empty: construction guarantees at least three vertices.
        if let Some(bounds) = Aabb::from_points(&self.world_vertices) {
            self.bounds = bounds;
        }
        self.degenerate = polygon_area(&self.world_vertices) < DEGENERATE_AREA;
    }

    /// Even-odd ray cast to the right of `point` against the world polygon.
    ///
    /// An edge counts when `point.y` lies in `(min_y, max_y]`, the point is
    /// not to the right of the whole edge, and the edge is not horizontal.
    /// A vertical edge always crosses; otherwise the crossing x must not lie
    /// to the left of `point.x`. Points on the boundary follow from that
    /// half-open convention.
    pub fn point_inside(&self, point: Point2) -> bool {
        let mut inside = false;
        for edge in &self.edges {
            let (p1, p2) = (edge.p1, edge.p2);
            if point.y > p1.y.min(p2.y)
                && point.y <= p1.y.max(p2.y)
                && point.x <= p1.x.max(p2.x)
                && p1.y != p2.y
            {
                let x_inters = (point.y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y) + p1.x;
                if p1.x == p2.x || point.x <= x_inters {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Every world vertex of `self` lies inside `other`.
    pub fn all_points_inside(&self, other: &Shape) -> bool {
        self.world_vertices.iter().all(|p| other.point_inside(*p))
    }
}
