// src/game/mod.rs

//! Frame-synchronous simulation.
//!
//! Each [`GameWorld::tick`] runs to completion in a fixed order:
//! 1. advance every moving object from input and physics,
//! 2. refresh the collision shape of everything that moved,
//! 3. test the ship against every asteroid and the terrain,
//! 4. apply the crash (wreck the ship, start the explosion, stop ticking).

pub mod asteroid;
pub mod ship;
pub mod stars;

pub use asteroid::Asteroid;
pub use ship::Ship;
pub use stars::{scatter_stars, Star};

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{GameConfig, TerrainConfig};
use crate::controls::FrameInput;
use crate::error::GameError;
use crate::geometry::Point2;
use crate::intersection::{Contact, PolygonCollision};
use crate::terrain::{control_points_from_path_data, Terrain, TerrainGenerator, TerrainProfile};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Running,
    Paused,
    Crashed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrashCause {
    /// Index into [`GameWorld::asteroids`].
    Asteroid(usize),
    Terrain,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrashReport {
    pub tick: u64,
    pub cause: CrashCause,
    pub contact: Contact,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Explosion {
    pub origin: Point2,
    pub frame: u32,
    pub duration: u32,
}

impl Explosion {
    /// 0.0 at the crash, 1.0 once the effect is over.
    pub fn progress(&self) -> f32 {
        if self.duration == 0 {
            return 1.0;
        }
        (self.frame as f32 / self.duration as f32).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.frame >= self.duration
    }
}

pub struct GameWorld {
    config: GameConfig,
    rng: StdRng,
    screen: Vec2,
    state: GameState,
    tick: u64,
    ship: Ship,
    asteroids: Vec<Asteroid>,
    terrain: Terrain,
    stars: Vec<Star>,
    crash: Option<CrashReport>,
    explosion: Option<Explosion>,
}

impl GameWorld {
    pub fn new(config: GameConfig, screen_width: f32, screen_height: f32) -> Result<Self, GameError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let screen = Vec2::new(screen_width, screen_height);

        let terrain = build_terrain(&config.terrain, &mut rng, screen)?;
        let stars = scatter_stars(&mut rng, config.stars.count, screen.x, screen.y);
        let asteroids = spawn_asteroids(&config, &mut rng, screen)?;
        let ship = Ship::new(&config.ship, screen / 2.0)?;

        log::info!(
            "World ready: {}x{} with {} asteroids",
            screen.x,
            screen.y,
            asteroids.len()
        );

        let state = if config.start_paused { GameState::Paused } else { GameState::Running };
        Ok(Self {
            config,
            rng,
            screen,
            state,
            tick: 0,
            ship,
            asteroids,
            terrain,
            stars,
            crash: None,
            explosion: None,
        })
    }

    /// Throws away every object and builds a fresh round, paused.
    pub fn reset(&mut self) -> Result<(), GameError> {
        // old shapes go first so new rocks are only placed against each other
        self.asteroids.clear();
        self.stars.clear();
        self.crash = None;
        self.explosion = None;

        self.terrain = build_terrain(&self.config.terrain, &mut self.rng, self.screen)?;
        self.stars = scatter_stars(&mut self.rng, self.config.stars.count, self.screen.x, self.screen.y);
        self.asteroids = spawn_asteroids(&self.config, &mut self.rng, self.screen)?;
        self.ship = Ship::new(&self.config.ship, self.screen / 2.0)?;
        self.tick = 0;
        self.state = GameState::Paused;
        log::info!("Game reset");
        Ok(())
    }

    /// Running and paused swap; a crashed game stays crashed until reset.
    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            GameState::Running => GameState::Paused,
            GameState::Paused => GameState::Running,
            GameState::Crashed => GameState::Crashed,
        };
        log::info!("State now {:?}", self.state);
    }

    /// Rebuilds the screen-dependent terrain for a new surface size.
    pub fn resize(&mut self, screen_width: f32, screen_height: f32) -> Result<(), GameError> {
        self.screen = Vec2::new(screen_width, screen_height);
        self.terrain = build_terrain(&self.config.terrain, &mut self.rng, self.screen)?;
        Ok(())
    }

    /// One simulation step. Returns the crash if it happened on this tick.
    pub fn tick(&mut self, input: &FrameInput) -> Option<CrashReport> {
        if self.state != GameState::Running {
            return None;
        }
        self.tick += 1;

        self.ship.advance(input);
        for asteroid in self.asteroids.iter_mut() {
            asteroid.advance(self.screen.x);
        }

        self.ship.sync_shape();
        for asteroid in self.asteroids.iter_mut() {
            asteroid.sync_shape();
        }

        let (cause, contact) = self.detect_crash()?;
        let report = CrashReport { tick: self.tick, cause, contact };
        self.apply_crash(report);
        Some(report)
    }

    /// Asteroids are checked before the terrain; the first hit wins.
    pub fn detect_crash(&self) -> Option<(CrashCause, Contact)> {
        let ship = self.ship.shape();
        if let Some((index, contact)) =
            PolygonCollision::first_hit(ship, self.asteroids.iter().map(Asteroid::shape))
        {
            return Some((CrashCause::Asteroid(index), contact));
        }
        PolygonCollision::find_contact(ship, self.terrain.shape()).map(|c| (CrashCause::Terrain, c))
    }

    fn apply_crash(&mut self, report: CrashReport) {
        log::info!("Crashed into {:?} on tick {}", report.cause, report.tick);
        self.ship.wreck();
        let origin = match report.contact {
            Contact::Crossing(point) => point,
            Contact::Contained => self.ship.position().into(),
        };
        self.explosion = Some(Explosion {
            origin,
            frame: 0,
            duration: self.config.ship.explosion_frames,
        });
        self.crash = Some(report);
        self.state = GameState::Crashed;
    }

    /// Animates effects that keep playing after the simulation stopped.
    pub fn advance_effects(&mut self) {
        if let Some(explosion) = self.explosion.as_mut() {
            if !explosion.is_finished() {
                explosion.frame += 1;
            }
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn crash(&self) -> Option<&CrashReport> {
        self.crash.as_ref()
    }

    pub fn explosion(&self) -> Option<&Explosion> {
        self.explosion.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

fn build_terrain(config: &TerrainConfig, rng: &mut StdRng, screen: Vec2) -> Result<Terrain, GameError> {
    let profile = match config {
        TerrainConfig::Profile(profile) => profile.clone(),
        TerrainConfig::Random { samples, min_height, max_height } => {
            TerrainGenerator::random(rng, *samples, *min_height, *max_height)
        }
        TerrainConfig::SvgPath { data, reference_width, reference_height } => {
            let points = control_points_from_path_data(data)?;
            TerrainProfile::from_path_points(&points, *reference_width, *reference_height)
        }
    };
    Ok(Terrain::from_profile(&profile, screen.x, screen.y)?)
}

fn spawn_asteroids(config: &GameConfig, rng: &mut StdRng, screen: Vec2) -> Result<Vec<Asteroid>, GameError> {
    let mut asteroids = Vec::with_capacity(config.asteroids.count);
    for _ in 0..config.asteroids.count {
        let asteroid = Asteroid::spawn(rng, &config.asteroids, screen.x, screen.y, &asteroids)?;
        log::debug!(
            "Asteroid {} at ({:.0}, {:.0}) scale {:.2}",
            asteroids.len(),
            asteroid.position().x,
            asteroid.position().y,
            asteroid.scale()
        );
        asteroids.push(asteroid);
    }
    Ok(asteroids)
}
