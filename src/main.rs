//! Headless demo host
//!
//! Drives the simulation at 60 Hz on a simulated monotonic clock with a
//! simple autopilot: face the finish line, run, and jump whenever something
//! deadly is just ahead. Every presentation event is logged.
//!
//! Set `CORRIDOR_RUN_SETTINGS` to a JSON settings override and
//! `CORRIDOR_RUN_SEED` to replay a specific stage.

use std::f32::consts::FRAC_PI_2;

use corridor_run::sim::{
    GameEvent, GameState, ObjectRegistry, RunOutcome, TickInput, all_hits, query_deadly, tick,
};
use corridor_run::{Settings, StageLayout, build_stage};
use glam::Vec3;

const FRAME_DT: f64 = 1.0 / 60.0;
/// Give up after five simulated minutes
const MAX_FRAMES: u64 = 60 * 60 * 5;
/// How far ahead (units along -X) the autopilot looks for hazards
const LOOKAHEAD: f32 = 12.0;

fn main() {
    env_logger::init();
    log::info!("Corridor Run (headless) starting...");

    let override_json = std::env::var("CORRIDOR_RUN_SETTINGS").ok();
    let settings = Settings::load_or_default(override_json.as_deref());

    let seed = std::env::var("CORRIDOR_RUN_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });

    let mut registry = ObjectRegistry::new();
    build_stage(&StageLayout::default(), &mut registry, seed);
    let mut state = GameState::with_registry(settings, registry);

    for frame in 0..MAX_FRAMES {
        let now = frame as f64 * FRAME_DT;
        let input = autopilot(&state);
        tick(&mut state, &input, now);

        for event in state.drain_events() {
            present(&event);
        }
        if state.is_over() {
            break;
        }
    }

    match state.outcome {
        RunOutcome::Won => log::info!("Finished! Final score: {}", state.score),
        RunOutcome::Lost => {
            log::info!("Game over. Score: {}", state.score);
            log::debug!(
                "Contacts at death: {:?}",
                all_hits(&state.player.bounding_volume(), &state.registry)
            );
        }
        RunOutcome::InProgress => log::warn!(
            "Gave up after {:.0}s at x={:.1}",
            state.elapsed,
            state.player.position.x
        ),
    }
}

fn autopilot(state: &GameState) -> TickInput {
    let ahead = state
        .player
        .bounding_volume()
        .translated(Vec3::new(-LOOKAHEAD, 0.0, 0.0));
    TickInput {
        move_x: 0,
        move_z: 1,
        jump: query_deadly(&ahead, &state.registry).is_some(),
        control_active: true,
        heading: FRAC_PI_2,
    }
}

fn present(event: &GameEvent) {
    match event {
        GameEvent::ObjectRemoved(id) => log::info!("Remove {:?} from scene", id),
        GameEvent::ScoreChanged(score) => log::info!("Score: {}", score),
        GameEvent::Blocked(id) => log::debug!("Bumped into {:?}", id),
        GameEvent::Lost { cause } => log::info!("Killed by {:?}", cause),
        GameEvent::Won { score } => log::info!("You reached the end! Final score: {}", score),
        GameEvent::PlayerMoved {
            position,
            jump_height,
        } => log::trace!("Camera at {:?} (jump {:?})", position, jump_height),
        GameEvent::RunningChanged(running) => {
            log::debug!("Footsteps {}", if *running { "on" } else { "off" })
        }
    }
}
