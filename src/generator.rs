// src/generator.rs

use rand::Rng;

use crate::geometry::Point2;

pub struct PolygonGenerator;

impl PolygonGenerator {
    /// Jittered convex-ish ring of `num_vertices` points around a centre.
    ///
    /// Angles are spread evenly and perturbed by at most 30% of half a slot,
    /// so the winding order always holds. Radii vary within ±20% of
    /// `avg_radius`, which keeps the ring star-shaped around its centre.
    pub fn generate_convex_polygon<R: Rng + ?Sized>(
        rng: &mut R,
        center_x: f32,
        center_y: f32,
        avg_radius: f32,
        num_vertices: usize,
    ) -> Vec<Point2> {
        let mut angles = Vec::with_capacity(num_vertices);
        for i in 0..num_vertices {
            let base_angle = (i as f32) * 2.0 * std::f32::consts::PI / (num_vertices as f32);
            angles.push(base_angle);
        }

        let max_perturbation = std::f32::consts::PI / (num_vertices as f32) * 0.3;

        for angle in angles.iter_mut() {
            *angle += rng.gen_range(-max_perturbation..max_perturbation);
        }

        for i in 1..num_vertices {
            if angles[i] <= angles[i - 1] {
                angles[i] = angles[i - 1] + 0.01;
            }
        }

        let min_radius = avg_radius * 0.8;
        let max_radius = avg_radius * 1.2;

        angles
            .into_iter()
            .map(|angle_rad| {
                let current_radius = rng.gen_range(min_radius..max_radius);
                Point2::new(
                    center_x + current_radius * angle_rad.cos(),
                    center_y + current_radius * angle_rad.sin(),
                )
            })
            .collect()
    }

    /// Eight-point lander outline centred on the origin, nose up (y down).
    pub fn ship_hull(width: f32, height: f32) -> Vec<Point2> {
        let hw = width / 2.0;
        let hh = height / 2.0;
        vec![
            Point2::new(0.0, -hh),
            Point2::new(hw * 0.45, -hh * 0.35),
            Point2::new(hw * 0.55, hh * 0.4),
            Point2::new(hw, hh),
            Point2::new(0.0, hh * 0.65),
            Point2::new(-hw, hh),
            Point2::new(-hw * 0.55, hh * 0.4),
            Point2::new(-hw * 0.45, -hh * 0.35),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::polygon_area;
    use crate::shape::Shape;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generated_polygon_stays_in_radius_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 3..=12 {
            let points = PolygonGenerator::generate_convex_polygon(&mut rng, 10.0, -5.0, 50.0, n);
            assert_eq!(points.len(), n);
            for p in &points {
                let r = ((p.x - 10.0).powi(2) + (p.y + 5.0).powi(2)).sqrt();
                assert!(r >= 40.0 - 1e-3 && r <= 60.0 + 1e-3, "radius {r} out of band");
            }
            assert!(polygon_area(&points) > 0.0);
        }
    }

    #[test]
    fn generated_polygon_contains_its_centre() {
        let mut rng = StdRng::seed_from_u64(99);
        let points = PolygonGenerator::generate_convex_polygon(&mut rng, 0.0, 0.0, 64.0, 10);
        let shape = Shape::new(points).unwrap();
        assert!(shape.point_inside(Point2::new(0.0, 0.0)));
    }

    #[test]
    fn ship_hull_has_eight_vertices_around_origin() {
        let hull = PolygonGenerator::ship_hull(32.0, 32.0);
        assert_eq!(hull.len(), 8);
        let shape = Shape::new(hull).unwrap();
        assert!(!shape.is_degenerate());
        assert!(shape.point_inside(Point2::new(0.0, 0.0)));
        let b = shape.bounds();
        assert_eq!((b.min_x, b.max_x, b.min_y, b.max_y), (-16.0, 16.0, -16.0, 16.0));
    }
}
