// src/lib.rs

pub mod config;
pub mod controls;
pub mod error;
pub mod game;
pub mod generator;
pub mod geometry;
pub mod intersection;
pub mod shape;
pub mod terrain;
pub mod transform;

pub use config::GameConfig;
pub use controls::{Controls, FrameInput, Key};
pub use error::{CollisionError, ConfigError, GameError, TerrainError};
pub use game::{CrashCause, CrashReport, GameState, GameWorld};
pub use generator::PolygonGenerator;
pub use geometry::{Aabb, Edge, Point2};
pub use intersection::{Contact, PolygonCollision};
pub use shape::Shape;
pub use terrain::{Terrain, TerrainProfile};
pub use transform::{Transform2, TransformProvider};
