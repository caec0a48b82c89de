//! Headless demo loop.
//!
//! Runs a seeded, scripted session at the fixed timestep and logs what
//! happens. Useful for profiling the simulation or eyeballing balance
//! changes without a display attached.
//!
//! ```text
//! astro-rocks [seed] [frames] [tuning.json]
//! ```

use std::path::Path;

use astro_rocks::consts::SIM_DT;
use astro_rocks::input::{InputState, Key};
use astro_rocks::renderer::{DrawQueue, scene};
use astro_rocks::sim::state::ArtHandles;
use astro_rocks::sim::tick;
use astro_rocks::{GameState, Tuning};

const DEFAULT_SEED: u64 = 0x5EED;
const DEFAULT_FRAMES: u32 = 3600;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = parse_or(args.next(), DEFAULT_SEED);
    let frames = parse_or(args.next(), DEFAULT_FRAMES);
    let tuning = match args.next() {
        Some(path) => Tuning::load_or_default(Path::new(&path)),
        None => Tuning::default(),
    };

    log::info!("astro-rocks (headless) starting: seed {seed}, {frames} frames");

    let mut state = GameState::new(seed, tuning, ArtHandles::default());
    let mut input = InputState::new();
    let mut queue = DrawQueue::new();

    let mut simulated = 0;
    for frame in 0..frames {
        script_input(&mut input, frame);
        let commands = input.drain_tick_input();
        tick(&mut state, &commands, SIM_DT);
        scene::queue_frame(&state, &mut queue);
        simulated = frame + 1;

        if simulated % 600 == 0 {
            log::info!(
                "t={:.1}s score={} asteroids={} draws={}",
                state.now_ms() / 1000.0,
                state.score,
                state.asteroid_count,
                queue.len()
            );
        }
        if !state.running {
            log::info!("game over on frame {simulated}");
            break;
        }
    }

    println!(
        "seed {seed}: {simulated} frames, final score {}, {} lives left",
        state.score, state.player.lives
    );
}

/// A canned pilot: sweep left and right, thrust in pulses, fire steadily.
fn script_input(input: &mut InputState, frame: u32) {
    if (frame / 120) % 2 == 0 {
        input.press(Key::Left);
        input.release(Key::Right);
    } else {
        input.press(Key::Right);
        input.release(Key::Left);
    }

    if frame % 240 < 60 {
        input.press(Key::Up);
    } else {
        input.release(Key::Up);
    }

    // Release between presses so the fire trigger re-arms.
    if frame % 30 == 0 {
        input.press(Key::Space);
    } else {
        input.release(Key::Space);
    }

    // Flip the collision overlay on partway in to exercise that path.
    if frame == 600 {
        input.press(Key::B);
    } else {
        input.release(Key::B);
    }
}

fn parse_or<T: std::str::FromStr>(arg: Option<String>, default: T) -> T {
    arg.and_then(|raw| raw.parse().ok()).unwrap_or(default)
}
