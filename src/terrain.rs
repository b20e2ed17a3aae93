// src/terrain.rs

//! Ground strip along the bottom of the screen.
//!
//! A [`TerrainProfile`] lists surface samples as fractions of the screen:
//! `x` across, `height` above the bottom edge. [`Terrain`] turns one into a
//! single point list in screen space that both the renderer and the
//! collision [`Shape`] read.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::TerrainError;
use crate::geometry::Point2;
use crate::shape::Shape;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainProfile {
    /// `[x_fraction, height_fraction]` pairs, left to right.
    pub samples: Vec<[f32; 2]>,
}

impl Default for TerrainProfile {
    fn default() -> Self {
        Self {
            samples: vec![[0.0, 0.05], [0.25, 0.05], [0.5, 0.10], [0.75, 0.10], [1.0, 0.0]],
        }
    }
}

impl TerrainProfile {
    /// Converts points traced over a `reference_width` × `reference_height`
    /// image (y down) into fractions.
    pub fn from_path_points(points: &[Point2], reference_width: f32, reference_height: f32) -> Self {
        let samples = points
            .iter()
            .map(|p| [p.x / reference_width, 1.0 - p.y / reference_height])
            .collect();
        Self { samples }
    }
}

pub struct TerrainGenerator;

impl TerrainGenerator {
    /// `sample_count` evenly spaced surface points spanning the whole width,
    /// with heights drawn from `min_height..max_height`.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        sample_count: usize,
        min_height: f32,
        max_height: f32,
    ) -> TerrainProfile {
        let sample_count = sample_count.max(2);
        let samples = (0..sample_count)
            .map(|i| {
                let x = i as f32 / (sample_count - 1) as f32;
                let height = if max_height > min_height {
                    rng.gen_range(min_height..max_height)
                } else {
                    min_height
                };
                [x, height]
            })
            .collect();
        TerrainProfile { samples }
    }
}

#[derive(Clone, Debug)]
pub struct Terrain {
    surface: Vec<Point2>,
    outline: Vec<Point2>,
    shape: Shape,
}

impl Terrain {
    pub fn from_profile(
        profile: &TerrainProfile,
        screen_width: f32,
        screen_height: f32,
    ) -> Result<Self, TerrainError> {
        if profile.samples.len() < 2 {
            return Err(TerrainError::ProfileTooShort(profile.samples.len()));
        }

        let surface: Vec<Point2> = profile
            .samples
            .iter()
            .map(|[x, h]| Point2::new(x * screen_width, screen_height - h * screen_height))
            .collect();

        let mut outline = surface.clone();
        outline.push(Point2::new(screen_width, screen_height));
        outline.push(Point2::new(0.0, screen_height));
        outline.dedup();
        if outline.len() > 1 && outline.first() == outline.last() {
            outline.pop();
        }

        // Terrain never moves: screen space is its world space.
        let shape = Shape::new(outline.clone())?;
        Ok(Self { surface, outline, shape })
    }

    /// Top edge, left to right.
    pub fn surface(&self) -> &[Point2] {
        &self.surface
    }

    /// Closed polygon: surface followed by the bottom corners.
    pub fn outline(&self) -> &[Point2] {
        &self.outline
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// Anchor points of a cubic Bézier path `d` attribute as written by GIMP's
/// SVG path export (`M x,y C c1 c2 p ...`).
///
/// Everything up to the first `C` is skipped. After it the first pair is
/// the start point, then one pair out of every three (starting with the
/// second), and finally the pair four numbers from the end. GIMP repeats
/// each anchor of a polyline path three times, so what is dropped are the
/// duplicates.
pub fn control_points_from_path_data(path: &str) -> Result<Vec<Point2>, TerrainError> {
    let mut tokens = path
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty());

    if !tokens.any(|t| t == "C") {
        return Err(TerrainError::MissingCubicCommand);
    }

    let numbers = tokens
        .take_while(|t| !t.eq_ignore_ascii_case("z"))
        .map(|t| t.parse::<f32>().map_err(|_| TerrainError::BadNumber(t.to_string())))
        .collect::<Result<Vec<f32>, _>>()?;

    if numbers.len() < 6 {
        return Err(TerrainError::TooShort(numbers.len()));
    }
    if numbers.len() % 2 != 0 {
        return Err(TerrainError::OddCount(numbers.len()));
    }

    let stop_at = numbers.len() - 4;
    let mut points = vec![Point2::new(numbers[0], numbers[1])];
    for i in (2..stop_at).step_by(6) {
        points.push(Point2::new(numbers[i], numbers[i + 1]));
    }
    points.push(Point2::new(numbers[stop_at], numbers[stop_at + 1]));
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn default_profile_builds_closed_strip() {
        let terrain = Terrain::from_profile(&TerrainProfile::default(), 1000.0, 800.0).unwrap();
        assert_eq!(terrain.surface().len(), 5);
        assert_eq!(terrain.surface()[0], Point2::new(0.0, 760.0));
        assert_eq!(terrain.surface()[2], Point2::new(500.0, 720.0));
        // right-most surface point sits on the bottom corner, so it is merged
        assert_eq!(terrain.outline().len(), 6);
        assert_eq!(*terrain.outline().last().unwrap(), Point2::new(0.0, 800.0));

        let b = terrain.shape().bounds();
        assert_relative_eq!(b.min_y, 720.0);
        assert_relative_eq!(b.max_y, 800.0);
        assert!(terrain.shape().point_inside(Point2::new(500.0, 790.0)));
        assert!(!terrain.shape().point_inside(Point2::new(100.0, 700.0)));
    }

    #[test]
    fn profile_needs_two_samples() {
        let profile = TerrainProfile { samples: vec![[0.0, 0.1]] };
        assert_eq!(
            Terrain::from_profile(&profile, 100.0, 100.0).unwrap_err(),
            TerrainError::ProfileTooShort(1)
        );
    }

    #[test]
    fn random_profile_spans_width() {
        let mut rng = StdRng::seed_from_u64(3);
        let profile = TerrainGenerator::random(&mut rng, 9, 0.05, 0.2);
        assert_eq!(profile.samples.len(), 9);
        assert_eq!(profile.samples[0][0], 0.0);
        assert_eq!(profile.samples[8][0], 1.0);
        assert!(profile.samples.iter().all(|[_, h]| (0.05..0.2).contains(h)));
        let terrain = Terrain::from_profile(&profile, 640.0, 480.0).unwrap();
        assert_eq!(terrain.outline().len(), 11);
    }

    #[test]
    fn path_points_become_fractions() {
        let profile = TerrainProfile::from_path_points(
            &[Point2::new(0.0, 90.0), Point2::new(50.0, 80.0)],
            100.0,
            100.0,
        );
        assert_relative_eq!(profile.samples[0][1], 0.1, epsilon = 1e-6);
        assert_relative_eq!(profile.samples[1][0], 0.5);
        assert_relative_eq!(profile.samples[1][1], 0.2, epsilon = 1e-6);
    }

    #[test]
    fn parses_gimp_cubic_path() {
        let d = "M 0.00,90.00\n C 0.00,90.00 20.00,80.00 20.00,80.00\n   20.00,80.00 50.00,75.00 50.00,75.00\n   50.00,75.00 100.00,95.00 100.00,95.00";
        let points = control_points_from_path_data(d).unwrap();
        assert_eq!(
            points,
            vec![
                Point2::new(0.0, 90.0),
                Point2::new(20.0, 80.0),
                Point2::new(50.0, 75.0),
                Point2::new(100.0, 95.0),
            ]
        );
    }

    #[test]
    fn rejects_malformed_paths() {
        assert_eq!(
            control_points_from_path_data("M 0,0 L 1,1").unwrap_err(),
            TerrainError::MissingCubicCommand
        );
        assert_eq!(
            control_points_from_path_data("M 0,0 C 1,1 2,2").unwrap_err(),
            TerrainError::TooShort(4)
        );
        assert_eq!(
            control_points_from_path_data("M 0,0 C 1,1 2,x 3,3").unwrap_err(),
            TerrainError::BadNumber("x".to_string())
        );
        assert_eq!(
            control_points_from_path_data("M 0,0 C 1,1 2,2 3,3 4").unwrap_err(),
            TerrainError::OddCount(7)
        );
    }
}
