// src/game/ship.rs

use glam::{Affine2, Vec2};

use crate::config::ShipConfig;
use crate::controls::FrameInput;
use crate::error::CollisionError;
use crate::generator::PolygonGenerator;
use crate::shape::Shape;
use crate::transform::{Transform2, TransformProvider};

/// The lander. Falls under gravity; thrust levels ramp up one step per
/// frame while thrust is held and back down when it is released.
#[derive(Clone, Debug)]
pub struct Ship {
    transform: Transform2,
    velocity: f32,
    thrust_level: u8,
    max_thrust_level: u8,
    gravity: f32,
    thrust_acceleration: f32,
    lateral_speed: f32,
    wrecked: bool,
    shape: Shape,
}

impl Ship {
    pub fn new(config: &ShipConfig, position: Vec2) -> Result<Self, CollisionError> {
        let mut ship = Self {
            transform: Transform2::from_translation(position),
            velocity: 0.0,
            thrust_level: 0,
            max_thrust_level: config.max_thrust_level,
            gravity: config.gravity_px_per_frame2(),
            thrust_acceleration: config.thrust_px_per_frame2(),
            lateral_speed: config.lateral_speed,
            wrecked: false,
            shape: Shape::new(PolygonGenerator::ship_hull(config.width_px, config.height_px))?,
        };
        ship.sync_shape();
        Ok(ship)
    }

    /// Moves the ship one frame. The collision shape is left stale until
    /// [`Ship::sync_shape`].
    pub fn advance(&mut self, input: &FrameInput) {
        if input.right {
            self.transform.translation.x += self.lateral_speed;
        } else if input.left {
            self.transform.translation.x -= self.lateral_speed;
        }

        self.thrust_level = if input.thrust {
            self.thrust_level.saturating_add(1).min(self.max_thrust_level)
        } else {
            self.thrust_level.saturating_sub(1)
        };

        self.velocity += self.gravity - f32::from(self.thrust_level) * self.thrust_acceleration;
        self.transform.translation.y += self.velocity;
    }

    pub fn sync_shape(&mut self) {
        let transform = self.world_transform();
        self.shape.update(&transform);
    }

    pub fn wreck(&mut self) {
        self.wrecked = true;
        self.thrust_level = 0;
    }

    pub fn position(&self) -> Vec2 {
        self.transform.translation
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn thrust_level(&self) -> u8 {
        self.thrust_level
    }

    pub fn is_wrecked(&self) -> bool {
        self.wrecked
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

impl TransformProvider for Ship {
    fn world_transform(&self) -> Affine2 {
        self.transform.to_affine()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ship() -> Ship {
        Ship::new(&ShipConfig::default(), Vec2::new(100.0, 100.0)).unwrap()
    }

    #[test]
    fn falls_under_gravity() {
        let mut ship = ship();
        let g = ShipConfig::default().gravity_px_per_frame2();
        ship.advance(&FrameInput::default());
        ship.advance(&FrameInput::default());
        assert_relative_eq!(ship.velocity(), 2.0 * g, epsilon = 1e-7);
        // y += v after each velocity step: g + 2g
        assert_relative_eq!(ship.position().y, 100.0 + 3.0 * g, epsilon = 1e-4);
    }

    #[test]
    fn thrust_ramps_and_caps() {
        let mut ship = ship();
        let thrust = FrameInput { thrust: true, ..Default::default() };
        for expected in 1..=5 {
            ship.advance(&thrust);
            assert_eq!(ship.thrust_level(), expected);
        }
        ship.advance(&thrust);
        assert_eq!(ship.thrust_level(), 5);
        ship.advance(&FrameInput::default());
        assert_eq!(ship.thrust_level(), 4);
    }

    #[test]
    fn thrust_level_saturates_at_u8_max() {
        let config = ShipConfig { max_thrust_level: u8::MAX, ..Default::default() };
        let mut ship = Ship::new(&config, Vec2::new(100.0, 100.0)).unwrap();
        let thrust = FrameInput { thrust: true, ..Default::default() };
        for _ in 0..300 {
            ship.advance(&thrust);
        }
        assert_eq!(ship.thrust_level(), u8::MAX);
    }

    #[test]
    fn full_thrust_climbs() {
        let mut ship = ship();
        let thrust = FrameInput { thrust: true, ..Default::default() };
        for _ in 0..120 {
            ship.advance(&thrust);
        }
        // net acceleration at level 5 is g - 5g/2 < 0 (upwards on screen)
        assert!(ship.velocity() < 0.0);
    }

    #[test]
    fn lateral_moves_right_wins() {
        let mut ship = ship();
        ship.advance(&FrameInput { left: true, right: true, thrust: false });
        assert_relative_eq!(ship.position().x, 102.0);
        ship.advance(&FrameInput { left: true, ..Default::default() });
        assert_relative_eq!(ship.position().x, 100.0);
    }

    #[test]
    fn shape_follows_only_after_sync() {
        let mut ship = ship();
        let before = *ship.shape().bounds();
        ship.advance(&FrameInput { right: true, ..Default::default() });
        assert_eq!(*ship.shape().bounds(), before);
        ship.sync_shape();
        assert_relative_eq!(ship.shape().bounds().min_x, before.min_x + 2.0, epsilon = 1e-4);
    }
}
