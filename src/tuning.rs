//! Data-driven game balance.
//!
//! Defaults reproduce the stock arcade feel; a JSON file can override
//! any subset of fields for playtesting without a rebuild.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::sim::state::{AsteroidSize, SaucerSize};

/// Ship handling and weapon feel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub speed: f32,
    /// Velocity magnitude cap
    pub max_velocity: f32,
    /// Degrees turned per held frame
    pub rotate_step_deg: f32,
    /// Acceleration multiplier while thrusting
    pub thrust_multiplier: f32,
    /// Per-frame velocity decay
    pub damping: f32,
    pub bullet_speed: f32,
    /// Shot lifetime in frames
    pub bullet_lifetime: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: consts::PLAYER_SPEED,
            max_velocity: consts::PLAYER_MAX_VELOCITY,
            rotate_step_deg: consts::ROTATE_STEP_DEG,
            thrust_multiplier: consts::THRUST_MULTIPLIER,
            damping: consts::VELOCITY_DAMPING,
            bullet_speed: consts::PLAYER_BULLET_SPEED,
            bullet_lifetime: consts::PLAYER_BULLET_LIFETIME,
        }
    }
}

/// Saucer behavior: movement, weapons and the four timer gates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SaucerTuning {
    pub speed: f32,
    /// Starting aim quality in [0, 1]
    pub accuracy: f32,
    pub bullet_speed: f32,
    pub bullet_lifetime: u32,
    pub laser_speed: f32,
    pub laser_lifetime: u32,
    /// Asteroid distance that arms the laser
    pub laser_range: f32,
    pub direction_delay_ms: f64,
    pub shooting_delay_ms: f64,
    pub laser_delay_ms: f64,
    pub respawn_delay_ms: f64,
}

impl Default for SaucerTuning {
    fn default() -> Self {
        Self {
            speed: consts::SAUCER_SPEED,
            accuracy: consts::SAUCER_ACCURACY,
            bullet_speed: consts::SAUCER_BULLET_SPEED,
            bullet_lifetime: consts::SAUCER_BULLET_LIFETIME,
            laser_speed: consts::LASER_SPEED,
            laser_lifetime: consts::LASER_LIFETIME,
            laser_range: consts::LASER_RANGE,
            direction_delay_ms: consts::SAUCER_DIRECTION_DELAY_MS,
            shooting_delay_ms: consts::SAUCER_SHOOTING_DELAY_MS,
            laser_delay_ms: consts::SAUCER_LASER_DELAY_MS,
            respawn_delay_ms: consts::SAUCER_RESPAWN_DELAY_MS,
        }
    }
}

/// Point values per target class.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTuning {
    pub large_asteroid: u32,
    pub medium_asteroid: u32,
    pub small_asteroid: u32,
    pub medium_saucer: u32,
    pub small_saucer: u32,
    /// Banked points needed for an extra life
    pub extra_life_points: u32,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            large_asteroid: consts::POINTS_LARGE_ASTEROID,
            medium_asteroid: consts::POINTS_MEDIUM_ASTEROID,
            small_asteroid: consts::POINTS_SMALL_ASTEROID,
            medium_saucer: consts::POINTS_MEDIUM_SAUCER,
            small_saucer: consts::POINTS_SMALL_SAUCER,
            extra_life_points: consts::POINTS_TO_EXTRA_LIFE,
        }
    }
}

impl ScoreTuning {
    pub fn asteroid(&self, size: AsteroidSize) -> u32 {
        match size {
            AsteroidSize::Small => self.small_asteroid,
            AsteroidSize::Medium => self.medium_asteroid,
            AsteroidSize::Large => self.large_asteroid,
        }
    }

    pub fn saucer(&self, size: SaucerSize) -> u32 {
        match size {
            SaucerSize::Small => self.small_saucer,
            SaucerSize::Medium => self.medium_saucer,
        }
    }
}

/// Score gates that step the saucer's accuracy up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTuning {
    pub score_one: u32,
    pub accuracy_one: f32,
    pub score_two: u32,
    pub accuracy_two: f32,
}

impl Default for DifficultyTuning {
    fn default() -> Self {
        Self {
            score_one: consts::DIFFICULTY_SCORE_ONE,
            accuracy_one: consts::DIFFICULTY_ACCURACY_ONE,
            score_two: consts::DIFFICULTY_SCORE_TWO,
            accuracy_two: consts::DIFFICULTY_ACCURACY_TWO,
        }
    }
}

/// Complete balance sheet for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub saucer: SaucerTuning,
    pub scoring: ScoreTuning,
    pub difficulty: DifficultyTuning,

    // === World ===
    /// Asteroids per fresh wave
    pub wave_asteroids: u32,
    /// Children per destroyed asteroid
    pub split_children: u32,
    /// Spawn exclusion radius around the player
    pub safe_spawn_distance: f32,
    /// Passive asteroid rotation, degrees per frame
    pub asteroid_spin_deg: f32,
    /// Positional shove when a saucer shot lands
    pub bullet_kickback: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player: PlayerTuning::default(),
            saucer: SaucerTuning::default(),
            scoring: ScoreTuning::default(),
            difficulty: DifficultyTuning::default(),
            wave_asteroids: consts::WAVE_ASTEROIDS,
            split_children: consts::SPLIT_CHILDREN,
            safe_spawn_distance: consts::SAFE_SPAWN_DISTANCE,
            asteroid_spin_deg: consts::ASTEROID_SPIN_DEG,
            bullet_kickback: consts::BULLET_KICKBACK,
        }
    }
}

/// Why a tuning file could not be used.
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(err) => write!(f, "could not read tuning file: {err}"),
            TuningError::Parse(err) => write!(f, "could not parse tuning file: {err}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(err) => Some(err),
            TuningError::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(err: std::io::Error) -> Self {
        TuningError::Io(err)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}

impl Tuning {
    /// Parse a tuning file; absent fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load with a logged fallback to defaults.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(err) => {
                log::warn!("{err}; using default tuning");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_default_values() {
        let tuning = Tuning::default();
        assert_eq!(tuning.player.speed, 3.0);
        assert_eq!(tuning.player.bullet_lifetime, 120);
        assert_eq!(tuning.saucer.respawn_delay_ms, 5000.0);
        assert_eq!(tuning.scoring.large_asteroid, 20);
        assert_eq!(tuning.scoring.small_saucer, 1000);
        assert_eq!(tuning.wave_asteroids, 3);
        assert_eq!(tuning.asteroid_spin_deg, 0.2);
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let tuning: Tuning =
            serde_json::from_str(r#"{"wave_asteroids": 5, "player": {"speed": 9.0}}"#)
                .expect("valid tuning json");
        assert_eq!(tuning.wave_asteroids, 5);
        assert_eq!(tuning.player.speed, 9.0);
        assert_eq!(tuning.player.max_velocity, 4.0);
        assert_eq!(tuning.split_children, 3);
    }

    #[test]
    fn test_score_lookup_by_class() {
        let scoring = ScoreTuning::default();
        assert_eq!(scoring.asteroid(AsteroidSize::Small), 100);
        assert_eq!(scoring.asteroid(AsteroidSize::Medium), 50);
        assert_eq!(scoring.asteroid(AsteroidSize::Large), 20);
        assert_eq!(scoring.saucer(SaucerSize::Small), 1000);
        assert_eq!(scoring.saucer(SaucerSize::Medium), 200);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let tuning = Tuning::load_or_default(Path::new("/nonexistent/tuning.json"));
        assert_eq!(tuning.wave_asteroids, Tuning::default().wave_asteroids);
    }
}
