use common::state::RedactedState;
use log::info;

use crate::referee::GameResult;

/// Receives a read-only view of game progress. Observer failures are isolated: a panicking or
/// slow observer never affects the game, and the referee never waits on one with a deadline
/// that could stall the game loop.
pub trait Observer: Send {
    fn on_state(&self, state: &RedactedState);
    fn on_game_over(&self, result: &GameResult);
}

/// The default observer: writes progress to the ambient logging facade instead of rendering a
/// board. Replaces the distillation source's `egui` GUI observer, which is out of scope here.
pub struct LoggingObserver;

impl Observer for LoggingObserver {
    fn on_state(&self, state: &RedactedState) {
        info!(
            "state update: {} players, active index {}, {} moves played",
            state.players.len(),
            state.active_index,
            state.history.len()
        );
    }

    fn on_game_over(&self, result: &GameResult) {
        info!(
            "game over: {} winners, {} kicked",
            result.winners.len(),
            result.kicked.len()
        );
    }
}
