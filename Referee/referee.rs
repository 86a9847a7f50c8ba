use std::sync::Arc;

use common::board::Board;
use common::color::Color;
use common::name::Name;
use common::player_details::RefereePlayerDetails;
use common::state::State;
use players::player::{PlayerApi, PlayerApiError, PlayerApiResult};
use players::strategy::PlayerMove;
use rayon::ThreadPool;

use crate::config::Config;
use crate::error::RefereeError;
use crate::observer::Observer;
use crate::player::SafePlayer;

/// The square board size asked of the first player willing to propose one. The spec leaves board
/// selection among competing proposals out of scope; a single proposal is accepted, as the
/// distillation source's own test harness does.
const DEFAULT_BOARD_SIZE: u32 = 7;

/// The outcome of a completed game: every player ends up in exactly one of these lists.
#[derive(Debug, Clone, Default)]
pub struct GameResult {
    pub winners: Vec<Name>,
    pub kicked: Vec<Name>,
}

struct PlayerSeat {
    name: Name,
    api: SafePlayer,
}

/// Outcome of one active player's turn, used to decide whether the round counted as having made
/// progress and whether the turn pointer should advance.
enum TurnOutcome {
    Moved,
    Passed,
    Ejected,
}

pub struct Referee {
    config: Config,
    pool: Arc<ThreadPool>,
    observers: Vec<Box<dyn Observer>>,
}

impl Referee {
    pub fn new(config: Config, pool: Arc<ThreadPool>) -> Self {
        Self { config, pool, observers: Vec::new() }
    }

    pub fn add_observer(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    /// Wraps every player in a [`SafePlayer`] bound to this referee's pool and timeout, then runs
    /// the game.
    pub fn run_game(&self, players: Vec<Box<dyn PlayerApi>>) -> GameResult {
        let safe_players = players
            .into_iter()
            .map(|p| SafePlayer::new(p, Arc::clone(&self.pool), self.config.per_call_timeout))
            .collect();
        self.run_game_with_safe_players(safe_players)
    }

    pub fn run_game_with_safe_players(&self, players: Vec<SafePlayer>) -> GameResult {
        if players.is_empty() {
            log::warn!("{}", RefereeError::NoPlayers);
            return GameResult::default();
        }

        let mut seats = Vec::with_capacity(players.len());
        for api in players {
            match api.name() {
                Ok(name) => seats.push(PlayerSeat { name, api }),
                Err(_) => log::warn!("dropping a player that failed the name handshake"),
            }
        }
        if seats.is_empty() {
            return GameResult::default();
        }

        let board = match self.get_player_board(&seats) {
            Some(board) => board,
            None => {
                log::error!("{}; abandoning the game", RefereeError::NoBoardProposed);
                return GameResult { winners: Vec::new(), kicked: seats.into_iter().map(|s| s.name).collect() };
            }
        };

        let player_details = generate_players(&board, seats.len());
        let mut state = State::new(board, player_details);
        let mut cheaters = Vec::new();

        self.broadcast_setup(&mut seats, &mut state, &mut cheaters);
        for observer in &self.observers {
            observer.on_state(&state.copy_redacted(None));
        }

        let mut rounds = 0;
        let mut game_over = seats.is_empty();
        while rounds < self.config.max_rounds && !game_over {
            game_over = self.run_round(&mut seats, &mut state, &mut cheaters);
            rounds += 1;
        }

        let winners = self.broadcast_win(&mut seats, &mut state, &mut cheaters);
        let result = GameResult { winners, kicked: cheaters };
        for observer in &self.observers {
            observer.on_game_over(&result);
        }
        result
    }

    fn get_player_board(&self, seats: &[PlayerSeat]) -> Option<Board> {
        seats.iter().find_map(|seat| seat.api.propose_board0(DEFAULT_BOARD_SIZE, DEFAULT_BOARD_SIZE).ok())
    }

    /// Concurrently asks every player to set up with their assigned goal; players that fail to
    /// acknowledge before the broadcast deadline are ejected, starting the ejection sweep from
    /// the current active index so turn fairness is preserved.
    fn broadcast_setup(&self, seats: &mut Vec<PlayerSeat>, state: &mut State, cheaters: &mut Vec<Name>) {
        log::info!("setup broadcast start");
        let receivers: Vec<_> = seats
            .iter()
            .enumerate()
            .map(|(idx, seat)| {
                let redacted = state.copy_redacted(Some(idx));
                let goal = state.players()[idx].goal;
                seat.api.submit(move |api| api.setup(Some(redacted), goal))
            })
            .collect();
        let mut responses: Vec<PlayerApiResult<()>> = receivers
            .into_iter()
            .map(|rx| rx.recv_timeout(self.config.setup_timeout).unwrap_or(Err(PlayerApiError::Timeout)))
            .collect();
        log::info!("setup broadcast end");

        responses.rotate_left(state.active_index());
        handle_broadcast_acknowledgements(responses, seats, state, cheaters);
    }

    fn run_round(&self, seats: &mut Vec<PlayerSeat>, state: &mut State, cheaters: &mut Vec<Name>) -> bool {
        let mut any_player_moved = false;
        let num_players = seats.len();
        for _ in 0..num_players {
            if seats.is_empty() {
                return true;
            }
            match self.run_active_player_turn(seats, state, cheaters) {
                TurnOutcome::Moved => {
                    any_player_moved = true;
                    state.change_active_player_turn();
                }
                TurnOutcome::Passed => state.change_active_player_turn(),
                TurnOutcome::Ejected => {}
            }
            for observer in &self.observers {
                observer.on_state(&state.copy_redacted(None));
            }
            if seats.is_empty() {
                return true;
            }
            if state.active_has_won(self.config.multiple_goals).unwrap_or(false) {
                return true;
            }
        }
        !any_player_moved
    }

    fn run_active_player_turn(&self, seats: &mut Vec<PlayerSeat>, state: &mut State, cheaters: &mut Vec<Name>) -> TurnOutcome {
        let idx = state.active_index();
        let redacted = state.copy_redacted(None);
        log::info!("send:{} take_turn start", seats[idx].name);
        let rx = seats[idx].api.submit(move |api| api.take_turn(redacted));
        let response = rx.recv_timeout(self.config.per_call_timeout).unwrap_or(Err(PlayerApiError::Timeout));
        log::info!("send:{} take_turn end", seats[idx].name);

        let proposed = match response {
            Ok(mv) => mv,
            Err(_) => {
                eject_active_player(seats, state, cheaters);
                return TurnOutcome::Ejected;
            }
        };

        match proposed {
            PlayerMove::Pass => TurnOutcome::Passed,
            PlayerMove::Move { slide_index, slide_direction, rotations, destination } => {
                if is_valid_move(state, slide_index, slide_direction, rotations, destination) {
                    self.perform_valid_move(seats, state, cheaters, slide_index, slide_direction, rotations, destination)
                } else {
                    eject_active_player(seats, state, cheaters);
                    TurnOutcome::Ejected
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn perform_valid_move(
        &self,
        seats: &mut Vec<PlayerSeat>,
        state: &mut State,
        cheaters: &mut Vec<Name>,
        slide_index: usize,
        slide_direction: common::direction::Direction,
        rotations: usize,
        destination: common::position::Position,
    ) -> TurnOutcome {
        state.rotate_spare((rotations * 90) as i32).expect("rotation already validated");
        state.shift_insert(slide_index, slide_direction).expect("slide already validated");
        if let Ok(player) = state.active_player_mut() {
            player.details.current = destination;
        }

        let reached_goal = state.active_is_at_goal().unwrap_or(false);
        if reached_goal && !state.active_has_won(self.config.multiple_goals).unwrap_or(false) {
            let idx = state.active_index();
            let new_goal = state.active_player().map(|p| p.next_goal()).unwrap_or(destination);
            log::info!("send:{} setup start", seats[idx].name);
            let rx = seats[idx].api.submit(move |api| api.setup(None, new_goal));
            let ack = rx.recv_timeout(self.config.per_call_timeout).unwrap_or(Err(PlayerApiError::Timeout));
            log::info!("send:{} setup end", seats[idx].name);
            if ack.is_err() {
                eject_active_player(seats, state, cheaters);
                return TurnOutcome::Ejected;
            }
        }
        TurnOutcome::Moved
    }

    /// Concurrently informs every surviving player whether they won; players that fail to
    /// acknowledge are ejected (and so excluded from the returned winner list even if they
    /// would otherwise have qualified).
    fn broadcast_win(&self, seats: &mut Vec<PlayerSeat>, state: &mut State, cheaters: &mut Vec<Name>) -> Vec<Name> {
        if seats.is_empty() {
            return Vec::new();
        }

        let winning_details: Vec<RefereePlayerDetails> = state.closest_to_victory().into_iter().cloned().collect();
        let winner_names: Vec<Name> = seats
            .iter()
            .zip(state.players())
            .filter(|(_, details)| winning_details.contains(details))
            .map(|(seat, _)| seat.name.clone())
            .collect();

        log::info!("win broadcast start");
        let receivers: Vec<_> = seats
            .iter()
            .zip(state.players())
            .map(|(seat, details)| {
                let did_win = winning_details.contains(details);
                seat.api.submit(move |api| api.won(did_win))
            })
            .collect();
        let mut responses: Vec<PlayerApiResult<()>> = receivers
            .into_iter()
            .map(|rx| rx.recv_timeout(self.config.win_timeout).unwrap_or(Err(PlayerApiError::Timeout)))
            .collect();
        log::info!("win broadcast end");

        responses.rotate_left(state.active_index());
        handle_broadcast_acknowledgements(responses, seats, state, cheaters);

        winner_names.into_iter().filter(|name| seats.iter().any(|seat| &seat.name == name)).collect()
    }
}

fn generate_players(board: &Board, count: usize) -> Vec<RefereePlayerDetails> {
    let stationary = board.all_stationary_positions();
    (0..count)
        .map(|idx| {
            let home = stationary[idx % stationary.len()];
            let goal = stationary[(idx + count) % stationary.len()];
            RefereePlayerDetails::new(home, goal, Color::for_player_index(idx))
        })
        .collect()
}

/// The three-part move legality check of the referee state machine: rotation is always a
/// multiple of 90 at the type level, so only slide legality and post-slide reachability remain.
fn is_valid_move(
    state: &State,
    slide_index: usize,
    slide_direction: common::direction::Direction,
    rotations: usize,
    destination: common::position::Position,
) -> bool {
    if !state.legal_slide(slide_index, slide_direction) {
        return false;
    }
    let mut trial = state.clone();
    if trial.rotate_spare((rotations * 90) as i32).is_err() {
        return false;
    }
    if trial.shift_insert(slide_index, slide_direction).is_err() {
        return false;
    }
    let Ok(active) = trial.active_player() else { return false };
    let current = active.current();
    if current == destination {
        return false;
    }
    trial.board().reachable(current).contains(&destination)
}

fn eject_active_player(seats: &mut Vec<PlayerSeat>, state: &mut State, cheaters: &mut Vec<Name>) {
    if seats.is_empty() {
        return;
    }
    let idx = state.active_index();
    let seat = seats.remove(idx);
    log::warn!("ejecting player {}: failed a call or an invalid move", seat.name);
    seat.api.on_ejected();
    cheaters.push(seat.name);
    let _ = state.kick_out_active_player();
}

/// Consumes a response list already rotated to start at the active index: an `Err` ejects the
/// current active player, an `Ok` advances the turn. Mirrors the referee's own turn-advance
/// bookkeeping so ejection sweeps during a broadcast still land on the right player.
fn handle_broadcast_acknowledgements<T>(
    responses: Vec<PlayerApiResult<T>>,
    seats: &mut Vec<PlayerSeat>,
    state: &mut State,
    cheaters: &mut Vec<Name>,
) {
    for response in responses {
        if seats.is_empty() {
            return;
        }
        match response {
            Ok(_) => state.change_active_player_turn(),
            Err(_) => eject_active_player(seats, state, cheaters),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use players::bad_player::{BadFM, BadPlayer};
    use players::player::LocalPlayer;
    use players::strategy::NaiveStrategy;

    fn referee() -> Referee {
        let pool = Arc::new(rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap());
        Referee::new(Config { per_call_timeout: std::time::Duration::from_millis(200), ..Config::default() }, pool)
    }

    #[test]
    fn run_game_with_no_players_returns_empty_result() {
        let result = referee().run_game(vec![]);
        assert!(result.winners.is_empty());
        assert!(result.kicked.is_empty());
    }

    #[test]
    fn a_lone_well_behaved_player_wins() {
        let player = LocalPlayer::new(Name::new("bob").unwrap(), NaiveStrategy::Euclid);
        let result = referee().run_game(vec![Box::new(player)]);
        assert_eq!(result.winners, vec![Name::new("bob").unwrap()]);
        assert!(result.kicked.is_empty());
    }

    #[test]
    fn a_player_that_errors_on_take_turn_is_kicked() {
        let good = LocalPlayer::new(Name::new("good").unwrap(), NaiveStrategy::Euclid);
        let bad_inner = LocalPlayer::new(Name::new("bad").unwrap(), NaiveStrategy::Euclid);
        let bad = BadPlayer::new(Box::new(bad_inner), BadFM::TakeTurn);
        let result = referee().run_game(vec![Box::new(good), Box::new(bad)]);
        assert_eq!(result.kicked, vec![Name::new("bad").unwrap()]);
    }
}
