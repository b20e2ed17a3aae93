// src/config.rs

//! Game tuning, loaded from an optional TOML file.
//!
//! Every section falls back to the defaults below, so a config file only
//! needs the values it changes:
//!
//! ```toml
//! seed = 42
//!
//! [asteroids]
//! count = 30
//!
//! [terrain]
//! kind = "random"
//! samples = 12
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::terrain::TerrainProfile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Begin in the paused state and paint a single frame.
    pub start_paused: bool,
    pub window: WindowConfig,
    pub ship: ShipConfig,
    pub asteroids: AsteroidConfig,
    pub terrain: TerrainConfig,
    pub stars: StarConfig,
    pub controls: ControlsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub width_px: f32,
    pub height_px: f32,
    /// Real-world height used to derive the pixel scale.
    pub height_meters: f32,
    /// m/s², already exaggerated for playability.
    pub gravity: f32,
    pub frames_per_second: f32,
    pub max_thrust_level: u8,
    /// Horizontal pixels per frame while left/right is held.
    pub lateral_speed: f32,
    /// Frames the explosion effect lasts after a crash.
    pub explosion_frames: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidConfig {
    pub count: usize,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Horizontal speed is drawn from `-max_speed..max_speed`.
    pub max_speed: f32,
    /// Animation frames per step, drawn from `-max..max`.
    pub max_rotational_speed: f32,
    /// Frames in one full revolution of the animation.
    pub animation_frames: u32,
    /// Ticks between animation steps.
    pub ticks_per_step: u32,
    pub placement_attempts: u32,
    /// Local outline radius before scaling.
    pub radius: f32,
    pub min_vertices: usize,
    pub max_vertices: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TerrainConfig {
    /// Explicit surface samples.
    Profile(TerrainProfile),
    /// Evenly spaced samples with random heights.
    Random {
        samples: usize,
        min_height: f32,
        max_height: f32,
    },
    /// Surface traced as an SVG path over a reference image.
    SvgPath {
        data: String,
        reference_width: f32,
        reference_height: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarConfig {
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Two presses closer than this count as a double tap.
    pub double_tap_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            start_paused: true,
            window: WindowConfig::default(),
            ship: ShipConfig::default(),
            asteroids: AsteroidConfig::default(),
            terrain: TerrainConfig::default(),
            stars: StarConfig::default(),
            controls: ControlsConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Drop Rescue".to_string(),
            width: 1024,
            height: 768,
        }
    }
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            width_px: 32.0,
            height_px: 32.0,
            height_meters: 8.0,
            gravity: 9.8 * 10.0,
            frames_per_second: 60.0,
            max_thrust_level: 5,
            lateral_speed: 2.0,
            explosion_frames: 30,
        }
    }
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        Self {
            count: 20,
            min_scale: 0.25,
            max_scale: 1.0,
            max_speed: 3.0,
            max_rotational_speed: 1.0,
            animation_frames: 47,
            ticks_per_step: 8,
            placement_attempts: 30,
            radius: 64.0,
            min_vertices: 8,
            max_vertices: 12,
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self::Profile(TerrainProfile::default())
    }
}

impl Default for StarConfig {
    fn default() -> Self {
        Self { count: 20 }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self { double_tap_ms: 300 }
    }
}

impl ShipConfig {
    /// Gravity in pixels per frame².
    pub fn gravity_px_per_frame2(&self) -> f32 {
        let pixels_per_meter = self.height_px / self.height_meters;
        self.gravity / pixels_per_meter / self.frames_per_second / self.frames_per_second
    }

    /// Acceleration added per thrust level, half of gravity.
    pub fn thrust_px_per_frame2(&self) -> f32 {
        self.gravity_px_per_frame2() / 2.0
    }
}

impl GameConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Defaults when the file does not exist; a broken file is reported and
    /// also replaced by defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid { field, reason: reason.into() }
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(invalid("window", "width and height must be positive"));
        }
        let ship = &self.ship;
        if !(ship.width_px > 0.0 && ship.height_px > 0.0 && ship.height_meters > 0.0) {
            return Err(invalid("ship", "sizes must be positive"));
        }
        if ship.frames_per_second <= 0.0 {
            return Err(invalid("ship.frames_per_second", "must be positive"));
        }
        if ship.max_thrust_level == 0 {
            return Err(invalid("ship.max_thrust_level", "must be at least 1"));
        }
        let rocks = &self.asteroids;
        if !(rocks.min_scale > 0.0 && rocks.min_scale <= rocks.max_scale) {
            return Err(invalid("asteroids.min_scale", "must be positive and not above max_scale"));
        }
        if rocks.min_vertices < 3 || rocks.min_vertices > rocks.max_vertices {
            return Err(invalid("asteroids.min_vertices", "must be at least 3 and not above max_vertices"));
        }
        if rocks.animation_frames == 0 || rocks.ticks_per_step == 0 {
            return Err(invalid("asteroids", "animation_frames and ticks_per_step must be positive"));
        }
        if rocks.radius <= 0.0 {
            return Err(invalid("asteroids.radius", "must be positive"));
        }
        if let TerrainConfig::Random { samples, min_height, max_height } = &self.terrain {
            if *samples < 2 {
                return Err(invalid("terrain.samples", "need at least 2"));
            }
            if min_height > max_height {
                return Err(invalid("terrain.min_height", "must not exceed max_height"));
            }
        }
        Ok(())
    }
}
