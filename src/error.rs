// src/error.rs

use thiserror::Error;

/// Rejected collision geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollisionError {
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("polygon vertex {index} is not finite")]
    NonFiniteVertex { index: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TerrainError {
    #[error("path data has no cubic segment ('C' command)")]
    MissingCubicCommand,

    #[error("bad number in path data: {0:?}")]
    BadNumber(String),

    #[error("path data has {0} numbers, too few for a single cubic segment")]
    TooShort(usize),

    #[error("path data has an odd number of coordinates ({0})")]
    OddCount(usize),

    #[error("terrain profile needs at least 2 surface points, got {0}")]
    ProfileTooShort(usize),

    #[error(transparent)]
    Geometry(#[from] CollisionError),
}

/// Anything that can stop the game world from being (re)built.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("collision geometry: {0}")]
    Collision(#[from] CollisionError),

    #[error("terrain: {0}")]
    Terrain(#[from] TerrainError),

    #[error("config: {0}")]
    Config(#[from] ConfigError),
}
