//! Fixed timestep simulation tick
//!
//! One call advances the whole field deterministically: input, player
//! physics, saucer behavior, bullets, asteroids, then wave and
//! difficulty checks, in that order every frame.

use glam::Vec3;

use super::bounds::bodies_collide;
use super::spawn;
use super::state::{Body, Bullet, BulletOwner, GameState, SaucerSize};
use crate::palette;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Rotate counterclockwise (held)
    pub rotate_left: bool,
    /// Rotate clockwise (held)
    pub rotate_right: bool,
    /// Accelerate along the facing direction (held)
    pub thrust: bool,
    /// Fire one shot (edge triggered)
    pub fire: bool,
    /// Pause toggle (edge triggered)
    pub pause: bool,
    /// Collision box overlay toggle (edge triggered)
    pub toggle_bounds: bool,
    /// Invulnerability toggle (edge triggered)
    pub toggle_testing: bool,
    /// Snap the debug camera back home (edge triggered)
    pub reset_camera: bool,
    /// Debug camera acceleration from the held pan/zoom keys
    pub camera: Vec3,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if !state.running {
        return;
    }

    apply_input(state, input, dt);

    // Paused still takes input, so the ship can be aimed and shots
    // queued against a frozen field. Simulated time holds too.
    if state.paused {
        return;
    }
    state.clock.advance(dt);

    update_player(state, dt);
    update_saucer(state, dt);
    update_bullets(state, dt);
    update_asteroids(state, dt);

    // Fresh wave once the field is clear
    if state.asteroid_count <= 0 {
        let wave = state.tuning.wave_asteroids;
        spawn::spawn_wave(state, wave);
    }

    spawn::increase_difficulty(state);
}

/// Toggles, steering and the trigger. Runs before the pause check.
fn apply_input(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        state.paused = !state.paused;
    }
    if input.toggle_bounds {
        state.show_bounds = !state.show_bounds;
    }
    if input.toggle_testing {
        state.testing_mode = !state.testing_mode;
    }
    if input.reset_camera {
        state.camera.reset();
    }

    let step = state.tuning.player.rotate_step_deg;
    if input.rotate_left {
        state.player.body.rotate(step);
    }
    if input.rotate_right {
        state.player.body.rotate(-step);
    }
    let facing = state.player.body.facing();

    let acceleration = if input.thrust { facing } else { Vec3::ZERO };
    let multiplier = state.tuning.player.thrust_multiplier;
    state.player.body.accelerate(acceleration, dt, multiplier);

    if input.fire {
        let bullet = Bullet::new(
            state.player.body.position,
            facing,
            state.tuning.player.bullet_speed,
            palette::PINK,
            state.tuning.player.bullet_lifetime,
            BulletOwner::Player,
        );
        state.bullets.push(bullet);
    }

    state.camera.steer(input.camera, dt);
}

/// Cap, damp, move.
fn update_player(state: &mut GameState, dt: f32) {
    let field_half = state.field_half();
    let damping = state.tuning.player.damping;
    let player = &mut state.player;

    if player.body.velocity.length() > player.max_velocity {
        player.body.velocity = player.body.velocity.normalize_or_zero() * player.max_velocity;
    }
    player.body.velocity *= damping;
    player.body.integrate(dt, field_half);
}

/// The saucer's whole frame: wander, shoot, burn close asteroids, move,
/// settle collisions, and respawn once its delay runs out.
fn update_saucer(state: &mut GameState, dt: f32) {
    let now = state.now_ms();

    if !state.saucer.body.deleted {
        // Wander
        if state.saucer.direction_change.ready(now) {
            state.saucer.body.velocity = spawn::random_direction(&mut state.rng);
        }

        // Shoot at the player. The small saucer aims; the medium one
        // sprays. A throwaway direction is drawn either way so the two
        // sizes consume the rng stream identically.
        if state.saucer.shooting.ready(now) {
            let mut direction = spawn::random_direction(&mut state.rng);
            if state.saucer.size == SaucerSize::Small {
                direction = (state.player.body.position - state.saucer.body.position)
                    .normalize_or_zero();
                let accuracy = state.saucer.accuracy;
                if accuracy < 1.0 {
                    direction = spawn::inaccurate_direction(&mut state.rng, direction, accuracy);
                }
            }
            let bullet = Bullet::new(
                state.saucer.body.position,
                direction,
                state.tuning.saucer.bullet_speed,
                palette::YELLOW,
                state.tuning.saucer.bullet_lifetime,
                BulletOwner::Saucer,
            );
            state.bullets.push(bullet);
        }

        // Burn the first asteroid in range. The laser gate only runs
        // while something is close, so its window freezes in between.
        let saucer_position = state.saucer.body.position;
        let range = state.tuning.saucer.laser_range;
        if let Some(target) = asteroid_in_range(state, saucer_position, range) {
            if state.saucer.proximity_laser.ready(now) {
                let direction = (target - saucer_position).normalize_or_zero();
                let bullet = Bullet::new(
                    saucer_position,
                    direction,
                    state.tuning.saucer.laser_speed,
                    palette::ORANGE,
                    state.tuning.saucer.laser_lifetime,
                    BulletOwner::Saucer,
                );
                state.bullets.push(bullet);
            }
        }

        let field_half = state.field_half();
        state.saucer.body.integrate(dt, field_half);

        // Ramming an asteroid kills both, scoring nothing.
        let saucer_body = state.saucer.body;
        if let Some(index) = hit_asteroid(state, &saucer_body) {
            if let Some((size, position)) = spawn::delete_asteroid(state, index) {
                state.saucer.delete(now);
                if let Some(child) = size.split() {
                    spawn::spawn_split(state, position, child);
                }
            }
        }

        if bodies_collide(&state.saucer.body, &state.player.body, &state.meshes) {
            state.saucer.delete(now);
            spawn::reduce_lives(state);
        }
    }

    // The respawn gate only runs while the saucer is out.
    if state.saucer.body.deleted && state.saucer.respawn.ready(now) {
        spawn::spawn_saucer(state);
    }
}

/// Age, move and collide every live bullet. A player bullet that kills
/// the saucer keeps flying; a saucer bullet that lands dies with a
/// kickback shove on the player.
fn update_bullets(state: &mut GameState, dt: f32) {
    let now = state.now_ms();
    let field_half = state.field_half();

    for index in 0..state.bullets.len() {
        let Some(bullet) = state.bullets.get_mut(index) else {
            continue;
        };
        if bullet.body.deleted {
            continue;
        }
        bullet.lifetime += 1;
        if bullet.lifetime >= bullet.max_lifetime {
            bullet.body.deleted = true;
            continue;
        }
        bullet.body.integrate(dt, field_half);
        let owner = bullet.owner;
        let bullet_body = bullet.body;

        if owner == BulletOwner::Player
            && bodies_collide(&bullet_body, &state.saucer.body, &state.meshes)
        {
            let points = state.tuning.scoring.saucer(state.saucer.size);
            state.saucer.delete(now);
            spawn::add_score(state, points);
        }

        if owner == BulletOwner::Saucer
            && bodies_collide(&bullet_body, &state.player.body, &state.meshes)
        {
            if let Some(bullet) = state.bullets.get_mut(index) {
                bullet.body.deleted = true;
            }
            spawn::reduce_lives(state);
            let kickback =
                bullet_body.velocity.normalize_or_zero() * state.tuning.bullet_kickback;
            state.player.body.position += kickback;
        }

        // Re-read the slot: a bullet spent on the player above must not
        // also take out an asteroid.
        let Some(bullet) = state.bullets.get(index) else {
            continue;
        };
        let bullet_body = bullet.body;
        if let Some(hit) = hit_asteroid(state, &bullet_body) {
            if let Some(bullet) = state.bullets.get_mut(index) {
                bullet.body.deleted = true;
            }
            if let Some((size, position)) = spawn::delete_asteroid(state, hit) {
                if owner == BulletOwner::Player {
                    let points = state.tuning.scoring.asteroid(size);
                    spawn::add_score(state, points);
                }
                if let Some(child) = size.split() {
                    spawn::spawn_split(state, position, child);
                }
            }
        }
    }
}

/// Spin, drift and player contact for every live asteroid. The bound is
/// re-read each pass, so children split off mid-loop get their first
/// move and contact check in the same frame.
fn update_asteroids(state: &mut GameState, dt: f32) {
    let field_half = state.field_half();
    let spin = state.tuning.asteroid_spin_deg;

    let mut index = 0;
    while index < state.asteroids.len() {
        let current = index;
        index += 1;
        let Some(asteroid) = state.asteroids.get_mut(current) else {
            continue;
        };
        if asteroid.body.deleted {
            continue;
        }
        asteroid.body.rotate(spin);
        asteroid.body.integrate(dt, field_half);

        if bodies_collide(&state.player.body, &asteroid.body, &state.meshes) {
            // Flash red on the way out.
            asteroid.body.color = palette::RED;
            if let Some((size, position)) = spawn::delete_asteroid(state, current) {
                if let Some(child) = size.split() {
                    spawn::spawn_split(state, position, child);
                }
            }
            spawn::reduce_lives(state);
        } else {
            asteroid.body.color = palette::ASTEROID;
        }
    }
}

/// Index of the first live asteroid whose box overlaps `body`.
fn hit_asteroid(state: &GameState, body: &Body) -> Option<usize> {
    state
        .asteroids
        .iter()
        .position(|asteroid| bodies_collide(body, &asteroid.body, &state.meshes))
}

/// Position of the first live asteroid within `range` of `from`.
fn asteroid_in_range(state: &GameState, from: Vec3, range: f32) -> Option<Vec3> {
    state
        .asteroids
        .iter()
        .filter(|asteroid| !asteroid.body.deleted)
        .map(|asteroid| asteroid.body.position)
        .find(|position| crate::distance_xy(from, *position) <= range)
}
