// src/transform.rs

use glam::{Affine2, Vec2};

/// Decomposed world transform of a moving object.
///
/// Local points are scaled first, then rotated (radians, counter-clockwise
/// in a y-up frame, clockwise on screen), then translated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2 {
    pub translation: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
}

impl Default for Transform2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2 {
    pub const IDENTITY: Self = Self {
        translation: Vec2::ZERO,
        rotation: 0.0,
        scale: Vec2::ONE,
    };

    pub fn from_translation(translation: Vec2) -> Self {
        Self { translation, ..Self::IDENTITY }
    }

    pub fn new(translation: Vec2, rotation: f32, scale: Vec2) -> Self {
        Self { translation, rotation, scale }
    }

    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec2::splat(scale);
        self
    }

    pub fn to_affine(&self) -> Affine2 {
        Affine2::from_scale_angle_translation(self.scale, self.rotation, self.translation)
    }
}

/// Anything that owns a [`Shape`](crate::shape::Shape) and can say where it
/// is in the scene this tick.
pub trait TransformProvider {
    fn world_transform(&self) -> Affine2;
}

impl TransformProvider for Transform2 {
    fn world_transform(&self) -> Affine2 {
        self.to_affine()
    }
}
