// src/rendering_lib/mesh.rs

//! CPU-side triangle lists. Everything is in screen pixels; the shader maps
//! them to clip space.

use drop_rescue::game::{CrashCause, Explosion, GameWorld, Star};
use drop_rescue::geometry::Point2;

use super::vertex::Vertex;

pub const SHIP_COLOR: [f32; 4] = [0.85, 0.9, 1.0, 1.0];
pub const WRECK_COLOR: [f32; 4] = [0.9, 0.2, 0.15, 1.0];
pub const ASTEROID_COLOR: [f32; 4] = [0.55, 0.5, 0.45, 1.0];
pub const TERRAIN_COLOR: [f32; 4] = [0.35, 0.3, 0.25, 1.0];
pub const STAR_COLOR: [f32; 4] = [1.0, 1.0, 0.9, 1.0];
pub const EXPLOSION_COLOR: [f32; 4] = [1.0, 0.6, 0.1, 1.0];

const EXPLOSION_SEGMENTS: u16 = 24;
const EXPLOSION_MAX_RADIUS: f32 = 60.0;

#[derive(Default)]
pub struct FrameMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl FrameMesh {
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn push_vertex(&mut self, point: Point2, color: [f32; 4]) -> u16 {
        let index = self.vertices.len() as u16;
        self.vertices.push(Vertex::new([point.x, point.y], color));
        index
    }

    /// Fan around `center`. Only correct for outlines that every vertex can
    /// see from `center` (convex rocks, the ship hull around its origin).
    pub fn add_fan(&mut self, center: Point2, outline: &[Point2], color: [f32; 4]) {
        if outline.len() < 3 {
            return;
        }
        let hub = self.push_vertex(center, color);
        let first = self.vertices.len() as u16;
        for point in outline {
            self.push_vertex(*point, color);
        }
        let n = outline.len() as u16;
        for i in 0..n {
            self.indices.extend_from_slice(&[hub, first + i, first + (i + 1) % n]);
        }
    }

    /// One quad per surface segment, down to `bottom`. Works for any
    /// height-field surface, concave or not.
    pub fn add_strip(&mut self, surface: &[Point2], bottom: f32, color: [f32; 4]) {
        for pair in surface.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let top_left = self.push_vertex(a, color);
            let top_right = self.push_vertex(b, color);
            let bottom_right = self.push_vertex(Point2::new(b.x, bottom), color);
            let bottom_left = self.push_vertex(Point2::new(a.x, bottom), color);
            self.indices
                .extend_from_slice(&[top_left, top_right, bottom_right, top_left, bottom_right, bottom_left]);
        }
    }

    pub fn add_star(&mut self, star: &Star) {
        let (sin, cos) = star.rotation.sin_cos();
        let corners: Vec<Point2> = (0..4)
            .map(|i| {
                let (dx, dy) = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)][i];
                Point2::new(
                    star.position.x + (dx * cos - dy * sin) * star.radius,
                    star.position.y + (dx * sin + dy * cos) * star.radius,
                )
            })
            .collect();
        let mut color = STAR_COLOR;
        color[3] = star.alpha();
        self.add_fan(star.position, &corners, color);
    }

    /// Expanding ring that fades out as the effect finishes.
    pub fn add_explosion(&mut self, explosion: &Explosion) {
        let t = explosion.progress();
        if t >= 1.0 {
            return;
        }
        let outer = EXPLOSION_MAX_RADIUS * t.max(0.05);
        let inner = outer * 0.6;
        let mut color = EXPLOSION_COLOR;
        color[3] = 1.0 - t;

        let origin = explosion.origin;
        let first = self.vertices.len() as u16;
        for i in 0..EXPLOSION_SEGMENTS {
            let angle = f32::from(i) / f32::from(EXPLOSION_SEGMENTS) * std::f32::consts::TAU;
            let (sin, cos) = angle.sin_cos();
            self.push_vertex(Point2::new(origin.x + cos * inner, origin.y + sin * inner), color);
            self.push_vertex(Point2::new(origin.x + cos * outer, origin.y + sin * outer), color);
        }
        for i in 0..EXPLOSION_SEGMENTS {
            let a = first + 2 * i;
            let b = first + 2 * ((i + 1) % EXPLOSION_SEGMENTS);
            self.indices.extend_from_slice(&[a, a + 1, b + 1, a, b + 1, b]);
        }
    }

    /// Back to front: stars, terrain, rocks, ship, explosion.
    pub fn build_world(&mut self, world: &GameWorld) {
        self.clear();
        for star in world.stars() {
            self.add_star(star);
        }

        let cause = world.crash().map(|report| report.cause);
        let tint = |hit: bool, normal: [f32; 4]| if hit { WRECK_COLOR } else { normal };

        let terrain = world.terrain();
        let terrain_color = tint(cause == Some(CrashCause::Terrain), TERRAIN_COLOR);
        self.add_strip(terrain.surface(), world.screen_size().y, terrain_color);

        for (index, asteroid) in world.asteroids().iter().enumerate() {
            let color = tint(cause == Some(CrashCause::Asteroid(index)), ASTEROID_COLOR);
            self.add_fan(asteroid.position().into(), asteroid.shape().world_vertices(), color);
        }

        let ship = world.ship();
        let ship_color = tint(ship.is_wrecked(), SHIP_COLOR);
        self.add_fan(ship.position().into(), ship.shape().world_vertices(), ship_color);

        if let Some(explosion) = world.explosion() {
            self.add_explosion(explosion);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_indexes_every_edge() {
        let mut mesh = FrameMesh::default();
        let square = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        mesh.add_fan(Point2::new(5.0, 5.0), &square, SHIP_COLOR);
        assert_eq!(mesh.vertices.len(), 5);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 1]);
    }

    #[test]
    fn strip_has_two_triangles_per_segment() {
        let mut mesh = FrameMesh::default();
        let surface = [Point2::new(0.0, 90.0), Point2::new(50.0, 80.0), Point2::new(100.0, 95.0)];
        mesh.add_strip(&surface, 100.0, TERRAIN_COLOR);
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.indices.len(), 12);
        assert_eq!(mesh.vertices[3].position, [0.0, 100.0]);
    }

    #[test]
    fn finished_explosion_draws_nothing() {
        let mut mesh = FrameMesh::default();
        let origin = Point2::new(10.0, 10.0);
        mesh.add_explosion(&Explosion { origin, frame: 30, duration: 30 });
        assert!(mesh.is_empty());
        mesh.add_explosion(&Explosion { origin, frame: 3, duration: 30 });
        assert_eq!(mesh.indices.len(), usize::from(EXPLOSION_SEGMENTS) * 6);
    }
}
