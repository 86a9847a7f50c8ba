use std::collections::HashSet;

use crate::board::{Board, PositionTransition};
use crate::direction::Direction;
use crate::error::StateError;
use crate::player_details::{PlayerDetails, RefereePlayerDetails};
use crate::position::Position;

/// The referee's full view of a game in progress: a mutable board, the player roster, whose
/// turn it is, and the history of applied (non-pass) slides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    board: Board,
    players: Vec<RefereePlayerDetails>,
    active_index: usize,
    history: Vec<(usize, Direction)>,
}

impl State {
    pub fn new(board: Board, players: Vec<RefereePlayerDetails>) -> Self {
        Self {
            board,
            players,
            active_index: 0,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[RefereePlayerDetails] {
        &self.players
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn history(&self) -> &[(usize, Direction)] {
        &self.history
    }

    pub fn active_player(&self) -> Result<&RefereePlayerDetails, StateError> {
        self.players.get(self.active_index).ok_or(StateError::NoPlayers)
    }

    pub fn active_player_mut(&mut self) -> Result<&mut RefereePlayerDetails, StateError> {
        self.players.get_mut(self.active_index).ok_or(StateError::NoPlayers)
    }

    pub fn add_player(&mut self, player: RefereePlayerDetails) {
        self.players.push(player);
    }

    /// Rotates the spare tile clockwise by `degrees`, which must be a multiple of 90.
    pub fn rotate_spare(&mut self, degrees: i32) -> Result<(), StateError> {
        if degrees % 90 != 0 {
            return Err(StateError::InvalidRotation);
        }
        self.board.rotate_spare(degrees / 90);
        Ok(())
    }

    /// Slides the board and transports every player's current position accordingly, then
    /// records the move in the non-pass history.
    pub fn shift_insert(
        &mut self,
        index: usize,
        direction: Direction,
    ) -> Result<PositionTransition, StateError> {
        let transition = self.board.shift_insert(index, direction)?;
        for player in &mut self.players {
            player.details.current = transition.transport(player.details.current);
        }
        self.history.push((index, direction));
        Ok(transition)
    }

    /// True iff `(index, direction)` is slideable and is not the exact undo of the most recent
    /// non-pass move. Central to preventing oscillation (§4.2, S1).
    pub fn legal_slide(&self, index: usize, direction: Direction) -> bool {
        if !self.board.is_slideable(index, direction) {
            return false;
        }
        match self.history.last() {
            Some(&(last_index, last_direction)) => {
                !(index == last_index && direction == last_direction.opposite())
            }
            None => true,
        }
    }

    /// The reachable set from the active player's current position, excluding that position
    /// itself: a turn must move.
    pub fn legal_destinations(&self) -> Result<HashSet<Position>, StateError> {
        let active = self.active_player()?;
        let mut reachable = self.board.reachable(active.current());
        reachable.remove(&active.current());
        Ok(reachable)
    }

    /// Checks whether the active player is standing on their next goal; if so, bumps their
    /// `goals_reached` counter. Must be called at most once per turn.
    pub fn active_is_at_goal(&mut self) -> Result<bool, StateError> {
        let player = self.active_player_mut()?;
        let next_goal = player.next_goal();
        if player.current() == next_goal {
            player.goals_reached += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Whether the active player has won: reached home after their assigned goal when
    /// `multiple_goals` is set, or reached their assigned goal at all otherwise.
    pub fn active_has_won(&self, multiple_goals: bool) -> Result<bool, StateError> {
        let threshold = if multiple_goals { 2 } else { 1 };
        Ok(self.active_player()?.goals_reached >= threshold)
    }

    pub fn is_active_player_at_home(&self) -> Result<bool, StateError> {
        let active = self.active_player()?;
        Ok(active.current() == active.home())
    }

    /// Among players with the maximum `goals_reached`, the ones minimizing squared-Euclidean
    /// distance from current position to next goal. Ties return all of them.
    pub fn closest_to_victory(&self) -> Vec<&RefereePlayerDetails> {
        let Some(max_goals) = self.players.iter().map(|p| p.goals_reached).max() else {
            return Vec::new();
        };
        let mut best: Vec<&RefereePlayerDetails> = Vec::new();
        let mut best_distance = u64::MAX;
        for player in self.players.iter().filter(|p| p.goals_reached == max_goals) {
            let distance = player.current().squared_distance(player.next_goal());
            match distance.cmp(&best_distance) {
                std::cmp::Ordering::Less => {
                    best_distance = distance;
                    best = vec![player];
                }
                std::cmp::Ordering::Equal => best.push(player),
                std::cmp::Ordering::Greater => {}
            }
        }
        best
    }

    /// A read-only snapshot safe to hand to a client: same board and history, player records
    /// stripped of goal information, optionally with a substituted active index (used by the
    /// setup broadcast, which sends each player a redacted state "as if" they were active).
    pub fn copy_redacted(&self, active_index_override: Option<usize>) -> RedactedState {
        RedactedState {
            board: self.board.clone(),
            history: self.history.clone(),
            players: self.players.iter().map(RefereePlayerDetails::copy_without_secrets).collect(),
            active_index: active_index_override.unwrap_or(self.active_index),
        }
    }

    /// Removes the active player, clamping the active index back into range. Used on ejection.
    pub fn kick_out_active_player(&mut self) -> Result<RefereePlayerDetails, StateError> {
        if self.players.is_empty() {
            return Err(StateError::NoPlayers);
        }
        let removed = self.players.remove(self.active_index);
        if self.active_index >= self.players.len() {
            self.active_index = 0;
        }
        Ok(removed)
    }

    pub fn change_active_player_turn(&mut self) {
        if !self.players.is_empty() {
            self.active_index = (self.active_index + 1) % self.players.len();
        }
    }
}

/// A snapshot of a [`State`] with every player's private goal removed; the only form of state
/// ever sent over the wire to a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactedState {
    pub board: Board,
    pub history: Vec<(usize, Direction)>,
    pub players: Vec<PlayerDetails>,
    pub active_index: usize,
}
