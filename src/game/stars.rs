// src/game/stars.rs

use rand::Rng;

use crate::geometry::Point2;

/// Background decoration. Stars have no collision shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub position: Point2,
    pub radius: f32,
    pub rotation: f32,
}

impl Star {
    /// Dimmer for small stars, full brightness at radius 5.
    pub fn alpha(&self) -> f32 {
        (self.radius / 5.0).min(1.0)
    }
}

pub fn scatter_stars<R: Rng + ?Sized>(rng: &mut R, count: usize, width: f32, height: f32) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            position: Point2::new(rng.gen::<f32>() * width, rng.gen::<f32>() * height),
            radius: 2.0 + rng.gen::<f32>() * 3.0,
            rotation: rng.gen::<f32>() * std::f32::consts::TAU,
        })
        .collect()
}
