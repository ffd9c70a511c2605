//! Pocket Knight Engine -- headless demo driver.
//!
//! Runs the simulation without any rendering shell: load a level (a JSON
//! path or the built-in map), expand an input source (a replay file or the
//! built-in run-and-hop script), step the world at a fixed cadence, and
//! print the final world snapshot as JSON on stdout. Progress goes to the
//! log so stdout stays machine-readable.
//!
//! Usage: `pke_game [--level FILE] [--replay FILE] [--seed N] [--realtime]`
//!
//! By default steps run back-to-back at the nominal cadence. With
//! `--realtime` each frame is paced by the wall clock through a
//! [`FrameClock`], the way an interactive shell would drive the world.

use std::path::PathBuf;
use std::time::Duration;

use pke_core::input::Intents;
use pke_core::time::FrameClock;
use pke_game::level::{builtin_level, load_level_from_path};
use pke_game::replay::load_replay_from_path;
use pke_game::world::World;

const VIEWPORT_WIDTH: f32 = 320.0;
const DEFAULT_SEED: u64 = 0x504b45;
const DEFAULT_DT: f32 = 1.0 / 60.0;
/// Ten simulated seconds of the built-in script.
const DEFAULT_STEPS: usize = 600;

fn main() {
    env_logger::init();

    let mut level_path: Option<PathBuf> = None;
    let mut replay_path: Option<PathBuf> = None;
    let mut seed = DEFAULT_SEED;
    let mut realtime = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--level" => level_path = args.next().map(PathBuf::from),
            "--replay" => replay_path = args.next().map(PathBuf::from),
            "--seed" => {
                seed = args
                    .next()
                    .and_then(|raw| raw.parse().ok())
                    .unwrap_or_else(|| panic!("--seed expects an unsigned integer"));
            }
            "--realtime" => realtime = true,
            other => {
                panic!("Unknown argument '{other}' (expected --level, --replay, --seed, --realtime)")
            }
        }
    }

    let level = match &level_path {
        Some(path) => load_level_from_path(path).unwrap_or_else(|err| {
            panic!("Failed to load level '{}': {}", path.display(), err);
        }),
        None => builtin_level(),
    };
    log::info!(
        "level '{}': {}x{}, {} enemies, {} collectibles",
        level.level_id,
        level.width,
        level.height,
        level.enemies.len(),
        level.collectibles.len()
    );

    let (intents, dt) = match &replay_path {
        Some(path) => {
            let replay = load_replay_from_path(path).unwrap_or_else(|err| {
                panic!("Failed to load replay '{}': {}", path.display(), err);
            });
            (replay.expanded_intents(), replay.fixed_dt)
        }
        None => (demo_script(DEFAULT_STEPS), DEFAULT_DT),
    };

    let mut world = World::from_level(&level, VIEWPORT_WIDTH, seed);
    let mut clock = FrameClock::new();
    for (step, step_intents) in intents.iter().enumerate() {
        let step_dt = if realtime {
            std::thread::sleep(Duration::from_secs_f32(dt));
            clock.begin_frame()
        } else {
            dt
        };
        world.step(*step_intents, step_dt);

        if step % 60 == 0 {
            let snapshot = world.snapshot();
            log::info!(
                "t={:>5.1}s score={} lives={} x={:.1} y={:.1} camera={:.1}",
                step as f32 * dt,
                snapshot.score,
                snapshot.lives,
                snapshot.character.body.x,
                snapshot.character.body.y,
                snapshot.camera_x
            );
        }
        if !world.session.running {
            log::info!("session over after {} steps", step + 1);
            break;
        }
    }

    match serde_json::to_string_pretty(&world.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("failed to serialize final snapshot: {err}"),
    }
}

/// Run right and hop every 1.5 seconds: enough to cross the first gap,
/// collect coins, and meet the slime.
fn demo_script(steps: usize) -> Vec<Intents> {
    (0..steps)
        .map(|step| {
            let phase = step % 90;
            Intents {
                move_right: true,
                jump_held: (45..60).contains(&phase),
                jump_requested: phase == 45,
                ..Intents::default()
            }
        })
        .collect()
}
