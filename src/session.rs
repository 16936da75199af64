//! Game session: frame loop plus game-over bookkeeping
//!
//! Wraps the simulation with the pieces that touch the outside world: the best
//! time store and restart handling.

use crate::highscores::BestTime;
use crate::persistence::KeyValueStore;
use crate::renderer::Scene;
use crate::sim::{Field, GameEvent, GamePhase, GameState, TickInput, tick};

/// Outcome of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    pub elapsed_frames: u64,
    pub best_frames: u64,
    pub new_best: bool,
}

/// A game session backed by a key-value store
pub struct Session<S: KeyValueStore> {
    pub state: GameState,
    pub best: BestTime,
    store: S,
    last_result: Option<RunResult>,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(seed: u64, field: Field, store: S) -> Self {
        let best = BestTime::load(&store);
        log::info!("Session started with seed {} on a {}x{} field", seed, field.width, field.height);
        Self {
            state: GameState::new(seed, field),
            best,
            store,
            last_result: None,
        }
    }

    /// Run one rendered frame
    ///
    /// A restart request is honored only after game over, re-seeding with
    /// `seed + 1`. Returns the events raised during the frame.
    pub fn frame(&mut self, input: &TickInput) -> Vec<GameEvent> {
        if input.restart && self.state.phase == GamePhase::GameOver {
            self.restart(self.state.seed.wrapping_add(1));
        }

        tick(&mut self.state, input);

        let events = self.state.drain_events();
        for event in &events {
            if let GameEvent::GameOver { elapsed_frames } = *event {
                self.finish_run(elapsed_frames);
            }
        }
        events
    }

    /// Reset to a fresh run
    pub fn restart(&mut self, seed: u64) {
        self.state.restart(seed);
        self.last_result = None;
        log::info!("Restarted with seed {}", seed);
    }

    fn finish_run(&mut self, elapsed_frames: u64) {
        // Another writer may have stored a better time during the run
        self.best = BestTime::load(&self.store);
        let new_best = match self.best.record(&mut self.store, elapsed_frames) {
            Ok(new_best) => new_best,
            Err(e) => {
                log::warn!("Could not save best time: {e}");
                true
            }
        };
        log::info!(
            "Game over after {} (best {})",
            crate::format_survival(elapsed_frames),
            crate::format_survival(self.best.frames)
        );
        self.last_result = Some(RunResult {
            elapsed_frames,
            best_frames: self.best.frames,
            new_best,
        });
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Result of the run that just ended (None while running)
    pub fn last_result(&self) -> Option<RunResult> {
        self.last_result
    }

    /// Drawable snapshot of the current frame
    pub fn scene(&self) -> Scene {
        Scene::capture(&self.state)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::persistence::StoreError;
    use crate::sim::{Behavior, Projectile};
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Store handle that shares its values with every clone
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryStore>>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            self.0.borrow_mut().set(key, value)
        }
    }

    fn session_with_best(best: u64) -> Session<MemoryStore> {
        let mut store = MemoryStore::new();
        store.set_u64(BestTime::STORAGE_KEY, best).unwrap();
        Session::new(5, Field::default(), store)
    }

    /// Run `frames` frames with nothing reaching the player, then kill it
    fn survive_then_die<S: KeyValueStore>(session: &mut Session<S>, frames: u64) {
        for _ in 0..frames {
            session.state.projectiles.clear();
            session.frame(&TickInput::default());
        }
        let pos = session.state.player.pos;
        session.state.projectiles.clear();
        session
            .state
            .projectiles
            .push(Projectile::new(pos, Vec2::ZERO, Behavior::Normal));
        session.frame(&TickInput::default());
        assert!(!session.is_running());
    }

    #[test]
    fn test_new_best_persisted() {
        let mut session = session_with_best(500);
        survive_then_die(&mut session, 600);
        let result = session.last_result().unwrap();
        assert_eq!(result.elapsed_frames, 600);
        assert!(result.new_best);
        assert_eq!(session.store.get_u64(BestTime::STORAGE_KEY, 0), 600);
    }

    #[test]
    fn test_worse_run_keeps_best() {
        let mut session = session_with_best(500);
        survive_then_die(&mut session, 300);
        let result = session.last_result().unwrap();
        assert!(!result.new_best);
        assert_eq!(result.best_frames, 500);
        assert_eq!(session.store.get_u64(BestTime::STORAGE_KEY, 0), 500);
    }

    #[test]
    fn test_best_reread_at_game_over() {
        let mut other_tab = SharedStore::default();
        other_tab.set_u64(BestTime::STORAGE_KEY, 500).unwrap();
        let mut session = Session::new(5, Field::default(), other_tab.clone());
        assert_eq!(session.best.frames, 500);

        other_tab.set_u64(BestTime::STORAGE_KEY, 900).unwrap();
        survive_then_die(&mut session, 600);

        let result = session.last_result().unwrap();
        assert!(!result.new_best);
        assert_eq!(result.best_frames, 900);
        assert_eq!(other_tab.get_u64(BestTime::STORAGE_KEY, 0), 900);
    }

    #[test]
    fn test_game_over_event_returned() {
        let mut session = session_with_best(0);
        for _ in 0..3 {
            session.state.projectiles.clear();
            session.frame(&TickInput::default());
        }
        let pos = session.state.player.pos;
        session.state.projectiles.clear();
        session
            .state
            .projectiles
            .push(Projectile::new(pos, Vec2::ZERO, Behavior::Normal));
        let events = session.frame(&TickInput::default());
        assert!(events.contains(&GameEvent::GameOver { elapsed_frames: 3 }));
        assert!(session.last_result().unwrap().new_best);
    }

    #[test]
    fn test_restart_via_input() {
        let mut session = session_with_best(0);
        survive_then_die(&mut session, 10);

        // Frozen until restart
        session.frame(&TickInput::default());
        assert!(!session.is_running());
        assert_eq!(session.state.elapsed_frames(), 10);

        session.frame(&TickInput {
            restart: true,
            ..Default::default()
        });
        assert!(session.is_running());
        assert!(session.last_result().is_none());
        assert!(session.state.player.alive);
        assert_eq!(session.state.elapsed_frames(), 1);
        assert_eq!(session.state.difficulty.level(), 1);
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut session = session_with_best(0);
        for _ in 0..5 {
            session.state.projectiles.clear();
            session.frame(&TickInput::default());
        }
        session.state.projectiles.clear();
        session.frame(&TickInput {
            restart: true,
            ..Default::default()
        });
        assert_eq!(session.state.elapsed_frames(), 6);
    }
}
