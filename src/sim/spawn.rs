//! Entity lifecycle policy: spawning, scoring, lives, difficulty.
//!
//! Everything here mutates [`GameState`] directly and draws randomness
//! only from the state-owned rng, keeping runs replayable.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts;
use crate::distance_xy;
use crate::palette;

use super::state::{Asteroid, AsteroidSize, Body, GameState, SaucerSize, Sprite};

/// Drift vector with each component drawn from its own random angle, the
/// angle being an integer 0..=360 read directly as radians. Not unit
/// length; entity speeds are tuned against that.
pub fn random_direction(rng: &mut Pcg32) -> Vec3 {
    let x = (rng.random_range(0..361) as f32).cos();
    let y = (rng.random_range(0..361) as f32).sin();
    Vec3::new(x, y, 0.0)
}

/// Uniform point on the integer field grid, offset to straddle center.
pub fn random_position(rng: &mut Pcg32, field_half: f32) -> Vec3 {
    let span = (field_half * 2.0) as i32;
    Vec3::new(
        rng.random_range(0..span) as f32 - field_half,
        rng.random_range(0..span) as f32 - field_half,
        0.0,
    )
}

/// Rejection-sample a grid point at least `min_distance` from `anchor`.
/// `min_distance` must be attainable on the field, or this never returns.
pub fn random_position_clear_of(
    rng: &mut Pcg32,
    field_half: f32,
    anchor: Vec3,
    min_distance: f32,
) -> Vec3 {
    loop {
        let position = random_position(rng, field_half);
        if distance_xy(anchor, position) >= min_distance {
            return position;
        }
    }
}

/// Degrade an aim direction by accuracy in [0, 1): each component is
/// scaled by its own random factor below 2(1 - accuracy), then the result
/// is renormalized. At accuracy 0.999 and up the window collapses and the
/// aim is returned true.
pub fn inaccurate_direction(rng: &mut Pcg32, direction: Vec3, accuracy: f32) -> Vec3 {
    let span = ((1.0 - accuracy) * 1000.0) as i32;
    if span < 1 {
        return direction;
    }
    let x_offset = rng.random_range(0..span) as f32 / 1000.0;
    let y_offset = rng.random_range(0..span) as f32 / 1000.0;
    Vec3::new(
        direction.x * x_offset * 2.0,
        direction.y * y_offset * 2.0,
        0.0,
    )
    .normalize_or_zero()
}

/// Spawn one asteroid. With an `origin` (a split) it appears one drift
/// step away from it, moving further out; otherwise it lands on a random
/// grid point clear of the player.
pub fn spawn_asteroid(state: &mut GameState, origin: Option<Vec3>, size: AsteroidSize) {
    let direction = random_direction(&mut state.rng);
    let position = match origin {
        Some(center) => center + direction,
        None => {
            let field_half = state.field_half();
            let anchor = state.player.body.position;
            let min_distance = state.tuning.safe_spawn_distance;
            random_position_clear_of(&mut state.rng, field_half, anchor, min_distance)
        }
    };

    let factor = size.scale_factor();
    let asteroid = Asteroid {
        body: Body {
            position,
            velocity: direction,
            scale: Vec3::new(factor, factor, 1.0),
            color: palette::ASTEROID,
            rotation_deg: state.rng.random_range(0..361) as f32,
            speed: state.rng.random_range(1..4) as f32,
            sprite: Sprite::untextured(state.asteroid_mesh),
            ..Body::default()
        },
        size,
    };
    state.asteroids.push(asteroid);
    state.asteroid_count += 1;
}

/// Scatter `count` large asteroids away from the player.
pub fn spawn_wave(state: &mut GameState, count: u32) {
    for _ in 0..count {
        spawn_asteroid(state, None, AsteroidSize::Large);
    }
    log::debug!("wave spawned: {count} large asteroids");
}

/// Burst of children around a destroyed parent.
pub fn spawn_split(state: &mut GameState, origin: Vec3, child: AsteroidSize) {
    for _ in 0..state.tuning.split_children {
        spawn_asteroid(state, Some(origin), child);
    }
}

/// Bring the (deleted) saucer back at a random size and position.
pub fn spawn_saucer(state: &mut GameState) {
    let field_half = state.field_half();
    let anchor = state.player.body.position;
    let min_distance = state.tuning.safe_spawn_distance;
    let velocity = random_direction(&mut state.rng);
    let position = random_position_clear_of(&mut state.rng, field_half, anchor, min_distance);
    let size = if state.rng.random_range(0..2) == 0 {
        SaucerSize::Small
    } else {
        SaucerSize::Medium
    };

    let factor = size.scale_factor();
    let saucer = &mut state.saucer;
    saucer.body.velocity = velocity;
    saucer.body.position = position;
    saucer.body.deleted = false;
    saucer.size = size;
    // Height halved to squeeze the sprite.
    saucer.body.scale = Vec3::new(factor, factor / 2.0, 1.0);
    log::info!(
        "saucer in at ({:.1}, {:.1}), size {:?}",
        position.x,
        position.y,
        size
    );
}

/// Flag an asteroid slot dead and keep the live counter in step. Returns
/// the size and resting position for splits/scoring; already-dead slots
/// return None.
pub fn delete_asteroid(state: &mut GameState, index: usize) -> Option<(AsteroidSize, Vec3)> {
    let asteroid = state.asteroids.get_mut(index)?;
    if asteroid.body.deleted {
        return None;
    }
    asteroid.body.deleted = true;
    let result = (asteroid.size, asteroid.body.position);
    state.asteroid_count -= 1;
    Some(result)
}

/// Bank points toward the score and the extra-life counter. While lives
/// are at the cap the counter keeps accumulating without resetting, so a
/// lost life can be bought back by the very next award.
pub fn add_score(state: &mut GameState, points: u32) {
    state.score += points;
    state.extra_life_counter += points;

    let threshold = state.tuning.scoring.extra_life_points;
    if state.player.lives < consts::MAX_LIVES && state.extra_life_counter >= threshold {
        state.extra_life_counter = 0;
        if let Ok(slot) = usize::try_from(state.player.lives) {
            if let Some(pip) = state.health_bar.get_mut(slot) {
                pip.body.deleted = false;
            }
        }
        state.player.lives += 1;
        log::info!("extra life at score {}", state.score);
    }
}

/// Take a life and its healthbar pip; at zero the run stops. A no-op in
/// testing mode.
pub fn reduce_lives(state: &mut GameState) {
    if state.testing_mode {
        return;
    }
    state.player.lives -= 1;
    if let Ok(slot) = usize::try_from(state.player.lives) {
        if let Some(pip) = state.health_bar.get_mut(slot) {
            pip.body.deleted = true;
        }
    }
    if state.player.lives <= 0 {
        state.running = false;
        log::info!("out of lives, final score {}", state.score);
    }
}

/// Step the saucer's aim up at the score gates. Accuracy only ever rises.
pub fn increase_difficulty(state: &mut GameState) {
    let difficulty = &state.tuning.difficulty;
    let target = if state.score > difficulty.score_two {
        difficulty.accuracy_two
    } else if state.score > difficulty.score_one {
        difficulty.accuracy_one
    } else {
        return;
    };
    if target > state.saucer.accuracy {
        state.saucer.accuracy = target;
        log::info!(
            "saucer accuracy up to {:.2} at score {}",
            target,
            state.score
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use crate::sim::state::ArtHandles;
    use rand::SeedableRng;

    fn fresh_state() -> GameState {
        GameState::new(99, Tuning::default(), ArtHandles::default())
    }

    #[test]
    fn test_random_position_stays_on_grid() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..200 {
            let p = random_position(&mut rng, 7.5);
            assert!(p.x >= -7.5 && p.x <= 6.5);
            assert!(p.y >= -7.5 && p.y <= 6.5);
            // Grid points sit on the half-unit offsets.
            assert_eq!(p.x.fract().abs(), 0.5);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn test_random_direction_stays_in_unit_box() {
        let mut rng = Pcg32::seed_from_u64(2);
        for _ in 0..200 {
            let d = random_direction(&mut rng);
            assert!(d.x.abs() <= 1.0 && d.y.abs() <= 1.0);
            assert_eq!(d.z, 0.0);
        }
    }

    #[test]
    fn test_clear_position_respects_min_distance() {
        let mut rng = Pcg32::seed_from_u64(3);
        let anchor = Vec3::ZERO;
        for _ in 0..100 {
            let p = random_position_clear_of(&mut rng, 7.5, anchor, 5.0);
            assert!(distance_xy(anchor, p) >= 5.0);
        }
    }

    #[test]
    fn test_inaccurate_direction_is_unit_or_zero() {
        let mut rng = Pcg32::seed_from_u64(4);
        let aim = Vec3::new(0.6, 0.8, 0.0);
        for _ in 0..100 {
            let d = inaccurate_direction(&mut rng, aim, 0.1);
            let len = d.length();
            assert!(len == 0.0 || (len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_collapsed_window_returns_exact_aim() {
        let mut rng = Pcg32::seed_from_u64(5);
        let aim = Vec3::new(0.6, 0.8, 0.0);
        assert_eq!(inaccurate_direction(&mut rng, aim, 0.9999), aim);
    }

    #[test]
    fn test_split_children_ring_around_parent() {
        let mut state = fresh_state();
        let before = state.asteroids.len();
        let parent = Vec3::new(2.0, -3.0, 0.0);
        spawn_split(&mut state, parent, AsteroidSize::Medium);

        assert_eq!(state.asteroids.len(), before + 3);
        assert_eq!(state.asteroid_count, before as i32 + 3);
        let children: Vec<&Asteroid> = state.asteroids.iter().skip(before).collect();
        for child in children {
            assert_eq!(child.size, AsteroidSize::Medium);
            // Offset is one drift vector, at most sqrt(2) long.
            assert!(distance_xy(child.body.position, parent) <= std::f32::consts::SQRT_2 + 1e-5);
            assert_eq!(child.body.scale.x, 1.0);
        }
    }

    #[test]
    fn test_saucer_respawn_squeezes_sprite() {
        let mut state = fresh_state();
        assert!(state.saucer.body.deleted);
        spawn_saucer(&mut state);

        let saucer = &state.saucer;
        assert!(!saucer.body.deleted);
        assert_eq!(saucer.body.scale.y, saucer.body.scale.x / 2.0);
        assert!(
            distance_xy(saucer.body.position, state.player.body.position)
                >= state.tuning.safe_spawn_distance
        );
    }

    #[test]
    fn test_delete_asteroid_decrements_once() {
        let mut state = fresh_state();
        assert_eq!(state.asteroid_count, 3);
        let result = delete_asteroid(&mut state, 0);
        assert!(result.is_some());
        assert_eq!(state.asteroid_count, 2);
        // A dead slot stays dead and the counter holds.
        assert!(delete_asteroid(&mut state, 0).is_none());
        assert_eq!(state.asteroid_count, 2);
    }

    #[test]
    fn test_add_score_banks_toward_extra_life() {
        let mut state = fresh_state();
        state.player.lives = 4;
        state.health_bar[4].body.deleted = true;
        state.extra_life_counter = 1950;

        add_score(&mut state, 100);
        assert_eq!(state.score, 100);
        assert_eq!(state.player.lives, 5);
        assert_eq!(state.extra_life_counter, 0);
        assert!(!state.health_bar[4].body.deleted);
    }

    #[test]
    fn test_counter_keeps_growing_at_full_lives() {
        let mut state = fresh_state();
        assert_eq!(state.player.lives, consts::MAX_LIVES);
        add_score(&mut state, 3000);
        // No life to grant, so the bank is left untouched.
        assert_eq!(state.extra_life_counter, 3000);
        assert_eq!(state.player.lives, consts::MAX_LIVES);
    }

    #[test]
    fn test_reduce_lives_ignored_in_testing_mode() {
        let mut state = fresh_state();
        reduce_lives(&mut state);
        assert_eq!(state.player.lives, consts::MAX_LIVES);
        assert!(state.running);
    }

    #[test]
    fn test_reduce_lives_ends_run_at_zero() {
        let mut state = fresh_state();
        state.testing_mode = false;
        state.player.lives = 1;
        for pip in state.health_bar.iter_mut().skip(1) {
            pip.body.deleted = true;
        }

        reduce_lives(&mut state);
        assert_eq!(state.player.lives, 0);
        assert!(state.health_bar[0].body.deleted);
        assert!(!state.running);
    }

    #[test]
    fn test_difficulty_steps_up_and_never_down() {
        let mut state = fresh_state();
        state.score = 6000;
        increase_difficulty(&mut state);
        assert_eq!(state.saucer.accuracy, 0.8);

        state.score = 12_000;
        increase_difficulty(&mut state);
        assert_eq!(state.saucer.accuracy, 1.0);

        // Re-running a lower gate cannot pull accuracy back.
        state.score = 6000;
        increase_difficulty(&mut state);
        assert_eq!(state.saucer.accuracy, 1.0);
    }

    #[test]
    fn test_no_difficulty_step_below_first_gate() {
        let mut state = fresh_state();
        state.score = 5000;
        increase_difficulty(&mut state);
        assert_eq!(state.saucer.accuracy, state.tuning.saucer.accuracy);
    }
}
