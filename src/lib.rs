//! Astro Rocks - an Asteroids-style arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, spawning)
//! - `renderer`: Draw-queue pass over the simulation state
//! - `input`: Key-state adapter folded into per-tick commands
//! - `tuning`: Data-driven game balance

pub mod input;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use sim::state::GameState;
pub use tuning::Tuning;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Play field dimensions - a square, entities wrap at half the side
    pub const FIELD_SIZE: f32 = 15.0;
    /// Extra distance past the field edge before a wrap triggers
    pub const WRAP_MARGIN: f32 = 1.0;

    /// Pool slot counts
    pub const POOL_CAPACITY: usize = 100;
    pub const MAX_LIVES: i32 = 5;

    /// Spawning
    pub const WAVE_ASTEROIDS: u32 = 3;
    pub const SPLIT_CHILDREN: u32 = 3;
    /// Minimum spawn distance from the player
    pub const SAFE_SPAWN_DISTANCE: f32 = 5.0;

    /// Scoring - smaller targets are worth more
    pub const POINTS_LARGE_ASTEROID: u32 = 20;
    pub const POINTS_MEDIUM_ASTEROID: u32 = 50;
    pub const POINTS_SMALL_ASTEROID: u32 = 100;
    pub const POINTS_MEDIUM_SAUCER: u32 = 200;
    pub const POINTS_SMALL_SAUCER: u32 = 1000;
    /// Points banked toward each extra life
    pub const POINTS_TO_EXTRA_LIFE: u32 = 2000;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const PLAYER_MAX_VELOCITY: f32 = 4.0;
    /// Acceleration multiplier while thrusting
    pub const THRUST_MULTIPLIER: f32 = 4.0;
    /// Per-frame velocity damping factor
    pub const VELOCITY_DAMPING: f32 = 0.99;
    /// Degrees of ship rotation per held frame
    pub const ROTATE_STEP_DEG: f32 = 5.0;
    pub const PLAYER_BULLET_SPEED: f32 = 6.0;
    /// Bullet lifetimes count frames, not milliseconds
    pub const PLAYER_BULLET_LIFETIME: u32 = 120;
    /// Positional shove on the player when a saucer shot lands
    pub const BULLET_KICKBACK: f32 = 0.3;

    /// Saucer defaults
    pub const SAUCER_SPEED: f32 = 3.0;
    /// Aim accuracy at the start of a run, raised by difficulty steps
    pub const SAUCER_ACCURACY: f32 = 0.1;
    pub const SAUCER_BULLET_SPEED: f32 = 3.0;
    pub const SAUCER_BULLET_LIFETIME: u32 = 120;
    /// Anti-asteroid laser
    pub const LASER_SPEED: f32 = 15.0;
    pub const LASER_LIFETIME: u32 = 30;
    pub const LASER_RANGE: f32 = 3.0;
    /// Saucer timer-gate delays, in simulated milliseconds
    pub const SAUCER_DIRECTION_DELAY_MS: f64 = 4000.0;
    pub const SAUCER_SHOOTING_DELAY_MS: f64 = 2000.0;
    pub const SAUCER_LASER_DELAY_MS: f64 = 100.0;
    pub const SAUCER_RESPAWN_DELAY_MS: f64 = 5000.0;

    /// Passive asteroid spin, degrees per frame
    pub const ASTEROID_SPIN_DEG: f32 = 0.2;

    /// Score gates for the saucer accuracy steps
    pub const DIFFICULTY_SCORE_ONE: u32 = 5_000;
    pub const DIFFICULTY_ACCURACY_ONE: f32 = 0.8;
    pub const DIFFICULTY_SCORE_TWO: u32 = 10_000;
    pub const DIFFICULTY_ACCURACY_TWO: f32 = 1.0;

    /// Free camera
    pub const CAMERA_SPEED: f32 = 20.0;
}

/// Color palette shared by the spawn code and the renderer
pub mod palette {
    use glam::Vec4;

    /// Frame clear color
    pub const CLEAR: Vec4 = Vec4::new(0.12, 0.12, 0.12, 1.0);
    /// Play-field backdrop
    pub const BACKDROP: Vec4 = Vec4::new(0.2, 0.2, 0.2, 1.0);
    /// Resting asteroid gray
    pub const ASTEROID: Vec4 = Vec4::new(0.3, 0.3, 0.3, 1.0);
    /// Player ship and healthbar base
    pub const LIGHT_BLUE: Vec4 = Vec4::new(0.2, 0.4, 0.8, 1.0);
    /// Saucer hull
    pub const TOMATO: Vec4 = Vec4::new(1.0, 0.3, 0.2, 1.0);
    /// Player shots
    pub const PINK: Vec4 = Vec4::new(1.0, 0.6, 1.0, 1.0);
    /// Saucer shots
    pub const YELLOW: Vec4 = Vec4::new(1.0, 1.0, 0.0, 1.0);
    /// Saucer anti-asteroid lasers
    pub const ORANGE: Vec4 = Vec4::new(1.0, 0.6, 0.0, 1.0);
    /// Collision flash
    pub const RED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
    /// Bounding-box overlay lines
    pub const BOX_GRAY: Vec4 = Vec4::new(0.5, 0.5, 0.5, 1.0);
}

/// Normalize a rotation to [0, 360) degrees
///
/// Reaching or passing a full turn snaps back to exactly 0 rather than
/// wrapping modulo, so repeated fixed steps revisit the same angles.
#[inline]
pub fn normalize_degrees(degrees: f32) -> f32 {
    if degrees >= 360.0 {
        0.0
    } else if degrees < 0.0 {
        degrees + 360.0
    } else {
        degrees
    }
}

/// Unit XY vector pointing along `degrees`
#[inline]
pub fn vec_from_degrees(degrees: f32) -> Vec3 {
    let radians = degrees.to_radians();
    Vec3::new(radians.cos(), radians.sin(), 0.0)
}

/// Distance in the XY plane; Z is ignored
#[inline]
pub fn distance_xy(a: Vec3, b: Vec3) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}
