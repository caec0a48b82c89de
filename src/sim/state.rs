//! Entity model and the root game state.
//!
//! One struct per entity kind, all sharing [`Body`] for transform, motion
//! and render handles. Kind-specific data (lives, accuracy, lifetimes)
//! lives only on the kind that uses it. Everything mutable about a run
//! hangs off [`GameState`]; there are no globals.

use glam::{Vec3, Vec4};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts;
use crate::normalize_degrees;
use crate::palette;
use crate::tuning::Tuning;

use super::clock::{GameClock, TimerGate};
use super::mesh::{self, MeshId, MeshRegistry, Topology};
use super::ring::EntityRing;
use super::spawn;

/// Opaque GPU texture handle, created by the host's loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Opaque shader program handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderId(pub u32);

impl ShaderId {
    pub const POSITION: ShaderId = ShaderId(0);
    pub const POSITION_UV: ShaderId = ShaderId(1);
}

/// Opaque vertex input-layout handle, paired with the shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutId(pub u32);

impl LayoutId {
    pub const POSITION: LayoutId = LayoutId(0);
    pub const POSITION_UV: LayoutId = LayoutId(1);
}

/// Opaque constant-buffer handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferId(pub u32);

impl BufferId {
    /// Per-draw transform/color constants.
    pub const FRAME: BufferId = BufferId(0);
}

/// Render handles an entity carries. The simulation stores and forwards
/// these; only the mesh id is ever resolved here (for collision
/// vertices).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub mesh: MeshId,
    pub texture: Option<TextureId>,
    pub shader: ShaderId,
    pub layout: LayoutId,
    pub constants: BufferId,
    pub topology: Topology,
}

impl Sprite {
    /// Flat-color sprite on the position-only pipeline.
    pub fn untextured(mesh: MeshId) -> Self {
        Self {
            mesh,
            texture: None,
            shader: ShaderId::POSITION,
            layout: LayoutId::POSITION,
            constants: BufferId::FRAME,
            topology: Topology::TriangleList,
        }
    }

    /// UV-mapped sprite; `texture` may be absent in headless runs.
    pub fn textured(mesh: MeshId, texture: Option<TextureId>) -> Self {
        Self {
            mesh,
            texture,
            shader: ShaderId::POSITION_UV,
            layout: LayoutId::POSITION_UV,
            constants: BufferId::FRAME,
            topology: Topology::TriangleList,
        }
    }
}

/// Transform, motion and render data common to every entity kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec3,
    /// Direction of drift; `speed` scales it on integration.
    pub velocity: Vec3,
    pub scale: Vec3,
    pub color: Vec4,
    /// Degrees, kept in [0, 360).
    pub rotation_deg: f32,
    pub speed: f32,
    /// Dead entities keep their slot but are skipped everywhere.
    pub deleted: bool,
    pub sprite: Sprite,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            scale: Vec3::ONE,
            color: Vec4::ONE,
            rotation_deg: 0.0,
            speed: 1.0,
            deleted: false,
            sprite: Sprite::untextured(MeshId::RECTANGLE),
        }
    }
}

impl Body {
    /// Advance by one step and wrap at the field edge. Deleted bodies
    /// stay exactly where they died.
    pub fn integrate(&mut self, dt: f32, field_half: f32) {
        if self.deleted {
            return;
        }
        self.position += self.velocity * dt * self.speed;
        self.wrap(field_half);
    }

    /// Toroidal wrap, gated on velocity so an entity past the edge but
    /// already heading back in is left alone.
    pub fn wrap(&mut self, field_half: f32) {
        let edge = field_half + consts::WRAP_MARGIN;
        if self.position.y >= edge && self.velocity.y > 0.0 {
            self.position.y = -field_half;
        }
        if self.position.y <= -edge && self.velocity.y < 0.0 {
            self.position.y = field_half;
        }
        if self.position.x >= edge && self.velocity.x > 0.0 {
            self.position.x = -field_half;
        }
        if self.position.x <= -edge && self.velocity.x < 0.0 {
            self.position.x = field_half;
        }
    }

    pub fn rotate(&mut self, degrees: f32) {
        self.rotation_deg = normalize_degrees(self.rotation_deg + degrees);
    }

    /// `velocity += acceleration * dt * speed * multiplier`
    pub fn accelerate(&mut self, acceleration: Vec3, dt: f32, multiplier: f32) {
        self.velocity += acceleration * dt * self.speed * multiplier;
    }

    /// Unit vector along the current rotation.
    pub fn facing(&self) -> Vec3 {
        crate::vec_from_degrees(self.rotation_deg)
    }
}

/// Asteroid size class; children of a split are one class smaller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AsteroidSize {
    Small,
    Medium,
    Large,
}

impl AsteroidSize {
    pub fn scale_factor(self) -> f32 {
        match self {
            AsteroidSize::Small => 0.5,
            AsteroidSize::Medium => 1.0,
            AsteroidSize::Large => 2.0,
        }
    }

    /// The class a destroyed asteroid breaks into; small is terminal.
    pub fn split(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaucerSize {
    Small,
    Medium,
}

impl SaucerSize {
    pub fn scale_factor(self) -> f32 {
        match self {
            SaucerSize::Small => 0.5,
            SaucerSize::Medium => 1.0,
        }
    }
}

/// Which side fired a bullet; decides scoring and friendly fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Saucer,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub lives: i32,
    /// Velocity magnitude cap, applied before damping each tick.
    pub max_velocity: f32,
}

impl Player {
    pub fn new(texture: Option<TextureId>, tuning: &Tuning) -> Self {
        Self {
            body: Body {
                color: palette::LIGHT_BLUE,
                speed: tuning.player.speed,
                sprite: Sprite::textured(MeshId::RECTANGLE_UV, texture),
                ..Body::default()
            },
            lives: consts::MAX_LIVES,
            max_velocity: tuning.player.max_velocity,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Saucer {
    pub body: Body,
    pub size: SaucerSize,
    /// 0..1 aim quality; raised by the difficulty steps, never lowered.
    pub accuracy: f32,
    pub shooting: TimerGate,
    pub direction_change: TimerGate,
    pub proximity_laser: TimerGate,
    /// Runs while the saucer is deleted; fires the respawn.
    pub respawn: TimerGate,
}

impl Saucer {
    /// Starts deleted; the respawn gate brings in the first saucer.
    pub fn new(texture: Option<TextureId>, tuning: &Tuning) -> Self {
        Self {
            body: Body {
                velocity: Vec3::X,
                scale: Vec3::new(1.0, 0.5, 1.0),
                color: palette::TOMATO,
                speed: tuning.saucer.speed,
                deleted: true,
                sprite: Sprite::textured(MeshId::RECTANGLE_UV, texture),
                ..Body::default()
            },
            size: SaucerSize::Medium,
            accuracy: tuning.saucer.accuracy,
            shooting: TimerGate::new(tuning.saucer.shooting_delay_ms),
            direction_change: TimerGate::new(tuning.saucer.direction_delay_ms),
            proximity_laser: TimerGate::new(tuning.saucer.laser_delay_ms),
            respawn: TimerGate::new(tuning.saucer.respawn_delay_ms),
        }
    }

    /// Remove from play and start the respawn window.
    pub fn delete(&mut self, now_ms: f64) {
        self.body.deleted = true;
        self.respawn.rearm(now_ms);
    }
}

#[derive(Debug, Clone)]
pub struct Asteroid {
    pub body: Body,
    pub size: AsteroidSize,
}

#[derive(Debug, Clone)]
pub struct Bullet {
    pub body: Body,
    pub owner: BulletOwner,
    /// Frames lived so far; at `max_lifetime` the bullet expires.
    pub lifetime: u32,
    pub max_lifetime: u32,
}

impl Bullet {
    /// Spawns one unit ahead of `origin` along `direction`.
    pub fn new(
        origin: Vec3,
        direction: Vec3,
        speed: f32,
        color: Vec4,
        max_lifetime: u32,
        owner: BulletOwner,
    ) -> Self {
        Self {
            body: Body {
                position: origin + direction,
                velocity: direction,
                scale: Vec3::new(0.1, 0.1, 1.0),
                color,
                speed,
                sprite: Sprite::untextured(MeshId::RECTANGLE),
                ..Body::default()
            },
            owner,
            lifetime: 0,
            max_lifetime,
        }
    }
}

/// The backdrop quad; its scale doubles as the play-field size.
#[derive(Debug, Clone)]
pub struct Background {
    pub body: Body,
}

impl Background {
    pub fn new() -> Self {
        Self {
            body: Body {
                scale: Vec3::new(consts::FIELD_SIZE, consts::FIELD_SIZE, 1.0),
                color: palette::BACKDROP,
                ..Body::default()
            },
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::new()
    }
}

/// One healthbar pip; deletion mirrors a lost life.
#[derive(Debug, Clone)]
pub struct HealthSlot {
    pub body: Body,
}

/// Free-look debug camera. Velocity is rebuilt from the held keys every
/// frame rather than accumulated.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub speed: f32,
}

impl Camera {
    pub const HOME: Vec3 = Vec3::new(0.0, 0.0, -14.5);

    pub fn new() -> Self {
        Self { position: Self::HOME, speed: consts::CAMERA_SPEED }
    }

    pub fn reset(&mut self) {
        self.position = Self::HOME;
    }

    pub fn steer(&mut self, acceleration: Vec3, dt: f32) {
        let velocity = acceleration * dt * self.speed;
        self.position += velocity * dt * self.speed;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Texture handles produced by the host's loader at startup. Headless
/// runs leave both empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtHandles {
    pub player_texture: Option<TextureId>,
    pub saucer_texture: Option<TextureId>,
}

/// Everything a run owns. Reproducible from (seed, tuning, inputs).
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub clock: GameClock,
    /// Cleared when the last life is lost; the outer loop polls this.
    pub running: bool,
    pub paused: bool,
    /// Makes life loss a no-op. On by default, as in an attract loop.
    pub testing_mode: bool,
    /// Draw the collision boxes next frame.
    pub show_bounds: bool,
    pub score: u32,
    /// Points banked since the last extra life.
    pub extra_life_counter: u32,
    /// Live asteroids; a wave respawns when this reaches zero.
    pub asteroid_count: i32,
    pub camera: Camera,
    pub background: Background,
    pub player: Player,
    pub saucer: Saucer,
    pub bullets: EntityRing<Bullet>,
    pub asteroids: EntityRing<Asteroid>,
    pub health_bar: Vec<HealthSlot>,
    pub meshes: MeshRegistry,
    /// The authored asteroid silhouette, registered after the built-ins.
    pub asteroid_mesh: MeshId,
    pub tuning: Tuning,
}

impl GameState {
    pub fn new(seed: u64, tuning: Tuning, art: ArtHandles) -> Self {
        let mut meshes = MeshRegistry::new();
        let asteroid_mesh = meshes.create(mesh::asteroid_vertices(), 3);

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            clock: GameClock::new(),
            running: true,
            paused: false,
            testing_mode: true,
            show_bounds: false,
            score: 0,
            extra_life_counter: 0,
            asteroid_count: 0,
            camera: Camera::new(),
            background: Background::new(),
            player: Player::new(art.player_texture, &tuning),
            saucer: Saucer::new(art.saucer_texture, &tuning),
            bullets: EntityRing::new(consts::POOL_CAPACITY),
            asteroids: EntityRing::new(consts::POOL_CAPACITY),
            health_bar: build_health_bar(),
            meshes,
            asteroid_mesh,
            tuning,
        };
        let wave = state.tuning.wave_asteroids;
        spawn::spawn_wave(&mut state, wave);
        state
    }

    /// Half the field side; entities wrap past this plus the margin.
    #[inline]
    pub fn field_half(&self) -> f32 {
        self.background.body.scale.x / 2.0
    }

    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }
}

/// Five pips along the top-right edge, fading toward blue.
fn build_health_bar() -> Vec<HealthSlot> {
    let mut slots = Vec::with_capacity(consts::MAX_LIVES as usize);
    let mut color = palette::LIGHT_BLUE;
    let mut x_offset = 0.7;
    let half = consts::FIELD_SIZE / 2.0;
    for _ in 0..consts::MAX_LIVES {
        let body = Body {
            position: Vec3::new(half - x_offset, 6.5, 0.0),
            scale: Vec3::new(0.5, 0.5, 1.0),
            color,
            ..Body::default()
        };
        x_offset += body.scale.x * 1.1;
        color.x -= 0.2;
        color.z += 0.1;
        slots.push(HealthSlot { body });
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fresh_state() -> GameState {
        GameState::new(7, Tuning::default(), ArtHandles::default())
    }

    #[test]
    fn test_new_state_opens_standard_scene() {
        let state = fresh_state();
        assert!(state.running);
        assert!(!state.paused);
        assert!(state.testing_mode);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.lives, consts::MAX_LIVES);
        assert_eq!(state.asteroid_count, 3);
        assert_eq!(state.asteroids.len(), 3);
        assert!(state.saucer.body.deleted);
        assert_eq!(state.health_bar.len(), 5);
        assert!(state.health_bar.iter().all(|slot| !slot.body.deleted));
        assert_eq!(state.field_half(), 7.5);
    }

    #[test]
    fn test_initial_asteroids_are_large_and_clear_of_player() {
        let state = fresh_state();
        for asteroid in state.asteroids.iter() {
            assert_eq!(asteroid.size, AsteroidSize::Large);
            assert!(!asteroid.body.deleted);
            let distance = crate::distance_xy(asteroid.body.position, state.player.body.position);
            assert!(distance >= consts::SAFE_SPAWN_DISTANCE);
        }
    }

    #[test]
    fn test_same_seed_same_scene() {
        let a = fresh_state();
        let b = fresh_state();
        for (left, right) in a.asteroids.iter().zip(b.asteroids.iter()) {
            assert_eq!(left.body.position, right.body.position);
            assert_eq!(left.body.velocity, right.body.velocity);
            assert_eq!(left.body.rotation_deg, right.body.rotation_deg);
        }
    }

    #[test]
    fn test_deleted_body_does_not_move() {
        let mut body = Body { velocity: Vec3::X, deleted: true, ..Body::default() };
        body.integrate(1.0, 7.5);
        assert_eq!(body.position, Vec3::ZERO);
    }

    #[test]
    fn test_integrate_scales_by_speed() {
        let mut body = Body { velocity: Vec3::X, speed: 3.0, ..Body::default() };
        body.integrate(0.5, 100.0);
        assert_eq!(body.position, Vec3::new(1.5, 0.0, 0.0));
    }

    #[test]
    fn test_wrap_requires_outward_velocity() {
        let half = 7.5;

        let mut outward = Body { velocity: Vec3::Y, ..Body::default() };
        outward.position.y = half + 1.0;
        outward.wrap(half);
        assert_eq!(outward.position.y, -half);

        // Same spot, but already heading back in: untouched.
        let mut inward = Body { velocity: -Vec3::Y, ..Body::default() };
        inward.position.y = half + 1.0;
        inward.wrap(half);
        assert_eq!(inward.position.y, half + 1.0);
    }

    #[test]
    fn test_wrap_covers_all_four_edges() {
        let half = 7.5;
        let cases = [
            (Vec3::new(0.0, half + 1.0, 0.0), Vec3::Y, Vec3::new(0.0, -half, 0.0)),
            (Vec3::new(0.0, -half - 1.0, 0.0), -Vec3::Y, Vec3::new(0.0, half, 0.0)),
            (Vec3::new(half + 1.0, 0.0, 0.0), Vec3::X, Vec3::new(-half, 0.0, 0.0)),
            (Vec3::new(-half - 1.0, 0.0, 0.0), -Vec3::X, Vec3::new(half, 0.0, 0.0)),
        ];
        for (start, velocity, expected) in cases {
            let mut body = Body { position: start, velocity, ..Body::default() };
            body.wrap(half);
            assert_eq!(body.position, expected);
        }
    }

    #[test]
    fn test_rotation_stays_normalized() {
        let mut body = Body::default();
        body.rotate(355.0);
        assert_eq!(body.rotation_deg, 355.0);
        body.rotate(5.0);
        assert_eq!(body.rotation_deg, 0.0);
        body.rotate(-5.0);
        assert_eq!(body.rotation_deg, 355.0);
    }

    #[test]
    fn test_accelerate_applies_speed_and_multiplier() {
        let mut body = Body { speed: 3.0, ..Body::default() };
        body.accelerate(Vec3::X, 0.5, 4.0);
        assert_eq!(body.velocity, Vec3::new(6.0, 0.0, 0.0));
    }

    #[test]
    fn test_split_chain_terminates_at_small() {
        assert_eq!(AsteroidSize::Large.split(), Some(AsteroidSize::Medium));
        assert_eq!(AsteroidSize::Medium.split(), Some(AsteroidSize::Small));
        assert_eq!(AsteroidSize::Small.split(), None);
    }

    #[test]
    fn test_bullet_spawns_ahead_of_origin() {
        let bullet = Bullet::new(
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::X,
            6.0,
            palette::PINK,
            120,
            BulletOwner::Player,
        );
        assert_eq!(bullet.body.position, Vec3::new(2.0, 2.0, 0.0));
        assert_eq!(bullet.body.velocity, Vec3::X);
        assert_eq!(bullet.lifetime, 0);
        assert_eq!(bullet.max_lifetime, 120);
    }

    #[test]
    fn test_health_bar_layout_steps_left() {
        let slots = build_health_bar();
        assert_eq!(slots[0].body.position.x, 7.5 - 0.7);
        assert!(slots[1].body.position.x < slots[0].body.position.x);
        // Pips fade as they step left.
        assert!(slots[4].body.color.x < slots[0].body.color.x);
        assert!(slots[4].body.color.z > slots[0].body.color.z);
    }

    #[test]
    fn test_camera_reset_returns_home() {
        let mut camera = Camera::new();
        camera.steer(Vec3::X, 1.0 / 60.0);
        assert_ne!(camera.position, Camera::HOME);
        camera.reset();
        assert_eq!(camera.position, Camera::HOME);
    }

    proptest! {
        #[test]
        fn prop_wrap_leaves_interior_bodies_alone(
            px in -8.4f32..8.4, py in -8.4f32..8.4,
            vx in -4.0f32..4.0, vy in -4.0f32..4.0,
        ) {
            let mut body = Body {
                position: Vec3::new(px, py, 0.0),
                velocity: Vec3::new(vx, vy, 0.0),
                ..Body::default()
            };
            body.wrap(7.5);
            prop_assert_eq!(body.position, Vec3::new(px, py, 0.0));
        }
    }
}
