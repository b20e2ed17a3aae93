// src/game/asteroid.rs

use glam::{Affine2, Vec2};
use rand::Rng;

use crate::config::AsteroidConfig;
use crate::error::CollisionError;
use crate::generator::PolygonGenerator;
use crate::intersection::PolygonCollision;
use crate::shape::Shape;
use crate::transform::{Transform2, TransformProvider};

/// A drifting rock. Its spin is a looping animation sequence: every
/// `ticks_per_step` ticks the sequence moves by `rotational_speed` frames and
/// the visible (and collidable) angle snaps to the whole frame.
#[derive(Clone, Debug)]
pub struct Asteroid {
    transform: Transform2,
    seq: f32,
    seq_sub: u32,
    rotational_speed: f32,
    movement_speed: f32,
    animation_frames: u32,
    ticks_per_step: u32,
    /// Scaled outline width, used for the off-screen wrap margin.
    width: f32,
    shape: Shape,
}

impl Asteroid {
    /// Builds a rock with random outline, scale, spin and drift. Its
    /// position is left at the origin; see [`Asteroid::spawn`].
    pub fn random<R: Rng + ?Sized>(rng: &mut R, config: &AsteroidConfig) -> Result<Self, CollisionError> {
        let vertex_count = rng.gen_range(config.min_vertices..=config.max_vertices);
        let outline = PolygonGenerator::generate_convex_polygon(rng, 0.0, 0.0, config.radius, vertex_count);
        let shape = Shape::new(outline)?;

        let scale = if config.max_scale > config.min_scale {
            rng.gen_range(config.min_scale..config.max_scale)
        } else {
            config.min_scale
        };
        let max_seq = (config.animation_frames - 1) as f32;

        let mut asteroid = Self {
            transform: Transform2::IDENTITY.with_uniform_scale(scale),
            seq: rng.gen_range(0.0..max_seq.max(1.0)).floor(),
            seq_sub: 0,
            rotational_speed: symmetric(rng, config.max_rotational_speed),
            movement_speed: symmetric(rng, config.max_speed),
            animation_frames: config.animation_frames,
            ticks_per_step: config.ticks_per_step,
            width: shape.bounds().width() * scale,
            shape,
        };
        asteroid.transform.rotation = asteroid.spin_angle();
        Ok(asteroid)
    }

    /// Creates a rock and drops it onto one of the horizontal lanes, retrying
    /// while it overlaps an existing rock. After `placement_attempts`
    /// overlaps the last position is kept anyway.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        config: &AsteroidConfig,
        screen_width: f32,
        screen_height: f32,
        existing: &[Asteroid],
    ) -> Result<Self, CollisionError> {
        let mut asteroid = Self::random(rng, config)?;
        let lanes = ((screen_height - 200.0) / 100.0).floor().max(0.0);

        let mut overlaps = 0;
        loop {
            let x = screen_width * rng.gen::<f32>();
            let y = (lanes * rng.gen::<f32>()).floor() * 100.0 + 100.0;
            asteroid.place(Vec2::new(x, y));

            let blocked = existing
                .iter()
                .any(|other| PolygonCollision::intersects(&asteroid.shape, &other.shape));
            if !blocked {
                break;
            }
            overlaps += 1;
            log::trace!("asteroid placement at ({x:.0}, {y:.0}) overlaps, attempt {overlaps}");
            if overlaps >= config.placement_attempts {
                log::debug!("asteroid kept overlapping after {overlaps} attempts");
                break;
            }
        }
        Ok(asteroid)
    }

    /// Teleports the rock and refreshes its shape.
    pub fn place(&mut self, position: Vec2) {
        self.transform.translation = position;
        self.sync_shape();
    }

    /// One tick of spin animation and horizontal drift with screen wrap.
    /// The collision shape is left stale until [`Asteroid::sync_shape`].
    pub fn advance(&mut self, screen_width: f32) {
        self.seq_sub += 1;
        if self.seq_sub == self.ticks_per_step {
            self.seq_sub = 0;
            let max_seq = (self.animation_frames - 1) as f32;
            self.seq += self.rotational_speed;
            if self.seq > max_seq {
                self.seq -= max_seq;
            } else if self.seq < 0.0 {
                self.seq += max_seq;
            }
            self.transform.rotation = self.spin_angle();
        }

        let translation = &mut self.transform.translation;
        translation.x += self.movement_speed;
        if translation.x < -self.width {
            translation.x = screen_width + self.width;
        } else if translation.x > screen_width + self.width {
            translation.x = -self.width;
        }
    }

    pub fn sync_shape(&mut self) {
        let transform = self.world_transform();
        self.shape.update(&transform);
    }

    /// Current animation frame.
    pub fn frame(&self) -> u32 {
        self.seq.floor() as u32
    }

    /// Angle shown (and collided) for the current animation frame.
    fn spin_angle(&self) -> f32 {
        self.frame() as f32 / self.animation_frames as f32 * std::f32::consts::TAU
    }

    pub fn position(&self) -> Vec2 {
        self.transform.translation
    }

    pub fn rotation(&self) -> f32 {
        self.transform.rotation
    }

    pub fn scale(&self) -> f32 {
        self.transform.scale.x
    }

    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

impl TransformProvider for Asteroid {
    fn world_transform(&self) -> Affine2 {
        self.transform.to_affine()
    }
}

fn symmetric<R: Rng + ?Sized>(rng: &mut R, max: f32) -> f32 {
    if max > 0.0 {
        rng.gen_range(-max..max)
    } else {
        0.0
    }
}
