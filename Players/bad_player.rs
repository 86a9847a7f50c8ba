use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use common::board::Board;
use common::name::Name;
use common::position::Position;
use common::state::RedactedState;
use serde::Deserialize;

use crate::{
    player::{PlayerApi, PlayerApiResult},
    strategy::PlayerMove,
};

/// Which method call an adversarial test double misbehaves on.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BadFM {
    SetUp,
    TakeTurn,
    Win,
}

/// Wraps a well-behaved player but makes one method panic-equivalent (return an error from a
/// deliberate division by zero) the first time it's called. Exercises the referee's
/// exception-based ejection path.
pub struct BadPlayer {
    bad_fm: BadFM,
    player: Box<dyn PlayerApi>,
}

impl BadPlayer {
    pub fn new(player: Box<dyn PlayerApi>, bad_fm: BadFM) -> Self {
        Self { bad_fm, player }
    }
}

impl PlayerApi for BadPlayer {
    fn name(&self) -> PlayerApiResult<Name> {
        self.player.name()
    }

    fn propose_board0(&self, cols: u32, rows: u32) -> PlayerApiResult<Board> {
        self.player.propose_board0(cols, rows)
    }

    fn setup(&mut self, state: Option<RedactedState>, goal: Position) -> PlayerApiResult<()> {
        if self.bad_fm == BadFM::SetUp {
            let _ = 1_i32.checked_div(0).ok_or_else(|| anyhow!("tried to divide by 0"))?;
        }
        self.player.setup(state, goal)
    }

    fn take_turn(&self, state: RedactedState) -> PlayerApiResult<PlayerMove> {
        if self.bad_fm == BadFM::TakeTurn {
            let _ = 1_i32.checked_div(0).ok_or_else(|| anyhow!("tried to divide by 0"))?;
        }
        self.player.take_turn(state)
    }

    fn won(&mut self, did_win: bool) -> PlayerApiResult<()> {
        if self.bad_fm == BadFM::Win {
            let _ = 1_i32.checked_div(0).ok_or_else(|| anyhow!("tried to divide by 0"))?;
        }
        self.player.won(did_win)
    }
}

/// Wraps a well-behaved player but blocks the chosen method forever, polling a shared
/// cancellation flag instead of spinning uncancellably. Exercises the referee's per-call
/// timeout (the deadline fires and ejects the player; this double only stops looping once the
/// test explicitly cancels it, so no thread is left permanently stuck).
pub struct BadPlayerLoop {
    bad_fm: BadFM,
    player: Box<dyn PlayerApi>,
    cancelled: Arc<AtomicBool>,
}

impl BadPlayerLoop {
    pub fn new(player: Box<dyn PlayerApi>, bad_fm: BadFM, cancelled: Arc<AtomicBool>) -> Self {
        Self { bad_fm, player, cancelled }
    }

    fn loop_until_cancelled(&self) {
        while !self.cancelled.load(Ordering::Relaxed) {
            std::thread::sleep(Duration::from_millis(50));
        }
    }
}

impl PlayerApi for BadPlayerLoop {
    fn name(&self) -> PlayerApiResult<Name> {
        self.player.name()
    }

    fn propose_board0(&self, cols: u32, rows: u32) -> PlayerApiResult<Board> {
        self.player.propose_board0(cols, rows)
    }

    fn setup(&mut self, state: Option<RedactedState>, goal: Position) -> PlayerApiResult<()> {
        if self.bad_fm == BadFM::SetUp {
            self.loop_until_cancelled();
        }
        self.player.setup(state, goal)
    }

    fn take_turn(&self, state: RedactedState) -> PlayerApiResult<PlayerMove> {
        if self.bad_fm == BadFM::TakeTurn {
            self.loop_until_cancelled();
        }
        self.player.take_turn(state)
    }

    fn won(&mut self, did_win: bool) -> PlayerApiResult<()> {
        if self.bad_fm == BadFM::Win {
            self.loop_until_cancelled();
        }
        self.player.won(did_win)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::LocalPlayer;
    use crate::strategy::NaiveStrategy;

    #[test]
    fn bad_player_errors_on_chosen_method_only() {
        let inner = LocalPlayer::new(Name::new("bob").unwrap(), NaiveStrategy::Euclid);
        let mut bad = BadPlayer::new(Box::new(inner), BadFM::Win);
        assert!(bad.name().is_ok());
        assert!(bad.won(true).is_err());
    }

    #[test]
    fn bad_player_loop_unblocks_on_cancellation() {
        let inner = LocalPlayer::new(Name::new("bob").unwrap(), NaiveStrategy::Euclid);
        let cancelled = Arc::new(AtomicBool::new(false));
        let mut bad = BadPlayerLoop::new(Box::new(inner), BadFM::Win, Arc::clone(&cancelled));
        let flag = Arc::clone(&cancelled);
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            flag.store(true, Ordering::Relaxed);
        });
        assert!(bad.won(false).is_ok());
        handle.join().unwrap();
    }
}
