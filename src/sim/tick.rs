//! Per-frame simulation driver
//!
//! One call = one rendered frame: spawn check, five physics micro-steps with a
//! collision pass after each, then the difficulty update.

use glam::Vec2;

use super::collision::find_hit;
use super::motion::{StepContext, step_all};
use super::spawner::spawn_main;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer position, if it moved since the last frame
    pub pointer: Option<Vec2>,
    /// Restart request, honored by `Session::frame` after game over
    pub restart: bool,
}

/// Advance the game state by one rendered frame
///
/// Returns true while the run is still going. After game over the state is
/// frozen until restarted.
pub fn tick(state: &mut GameState, input: &TickInput) -> bool {
    if state.phase == GamePhase::GameOver {
        return false;
    }

    if let Some(pointer) = input.pointer {
        state.set_player_target(pointer);
    }

    // Spawns land before the micro-steps so they move this frame
    if state.difficulty.spawn_due() {
        let level = state.difficulty.level();
        let projectile = spawn_main(&mut state.rng, &state.field, level);
        state.events.push(GameEvent::Spawned(projectile.kind()));
        state.projectiles.push(projectile);
    }

    let ctx = StepContext {
        field: state.field,
        player_pos: state.player.pos,
        difficulty: state.difficulty.level(),
    };
    for _ in 0..MICRO_STEPS {
        step_all(&mut state.projectiles, &ctx, &mut state.rng, &mut state.events);

        if let Some(hit) = find_hit(&state.player, &state.projectiles) {
            state.player.alive = false;
            state.phase = GamePhase::GameOver;
            let elapsed_frames = state.elapsed_frames();
            log::info!(
                "Player hit by {} ({:?}) after {} frames",
                state.projectiles[hit.index].kind().as_str(),
                hit.part,
                elapsed_frames
            );
            state.events.push(GameEvent::PlayerHit(hit));
            state.events.push(GameEvent::GameOver { elapsed_frames });
            return false;
        }
    }

    if let Some(level) = state.difficulty.advance() {
        log::info!("Difficulty up: {} (spawn every {} frames)", level, state.difficulty.spawn_cadence());
        state.events.push(GameEvent::DifficultyUp(level));
    }

    true
}
