use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

use common::board::Board;
use common::name::Name;
use common::position::Position;
use common::state::RedactedState;
use parking_lot::Mutex;
use players::player::{PlayerApi, PlayerApiError, PlayerApiResult};
use players::strategy::PlayerMove;
use rayon::ThreadPool;

/// Wraps any [`PlayerApi`] so that every call runs off-thread, on a bounded worker pool, behind
/// a deadline. A blocking or panicking player can stall its own worker but never the referee
/// thread; a call that misses its deadline is reported as [`PlayerApiError::Timeout`] and the
/// worker's eventual result, if any, is discarded.
pub struct SafePlayer {
    api: Arc<Mutex<Box<dyn PlayerApi>>>,
    pool: Arc<ThreadPool>,
    timeout: Duration,
    on_ejected: Option<Box<dyn Fn() + Send + Sync>>,
}

impl SafePlayer {
    pub fn new(api: Box<dyn PlayerApi>, pool: Arc<ThreadPool>, timeout: Duration) -> Self {
        Self { api: Arc::new(Mutex::new(api)), pool, timeout, on_ejected: None }
    }

    /// Attaches a callback run once, when the referee ejects this player, to tear down any
    /// resources (e.g. a remote socket) the wrapped player owns.
    pub fn with_ejection_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_ejected = Some(Box::new(hook));
        self
    }

    pub fn on_ejected(&self) {
        if let Some(hook) = &self.on_ejected {
            hook();
        }
    }

    /// Spawns `f` on the worker pool and returns immediately with a receiver for its result.
    /// Lets a caller launch several players' calls concurrently (a setup/win broadcast) before
    /// joining each with its own deadline, rather than blocking one call at a time.
    pub fn submit<F, T>(&self, f: F) -> mpsc::Receiver<PlayerApiResult<T>>
    where
        F: FnOnce(&mut dyn PlayerApi) -> PlayerApiResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let api = Arc::clone(&self.api);
        self.pool.spawn(move || {
            let mut guard = api.lock();
            let result = f(&mut **guard);
            let _ = tx.send(result);
        });
        rx
    }

    fn run_with_timeout<F, T>(&self, f: F) -> PlayerApiResult<T>
    where
        F: FnOnce(&mut dyn PlayerApi) -> PlayerApiResult<T> + Send + 'static,
        T: Send + 'static,
    {
        match self.submit(f).recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(PlayerApiError::Timeout),
            Err(RecvTimeoutError::Disconnected) => Err(PlayerApiError::Timeout),
        }
    }
}

impl PlayerApi for SafePlayer {
    fn name(&self) -> PlayerApiResult<Name> {
        self.run_with_timeout(|api| api.name())
    }

    fn propose_board0(&self, cols: u32, rows: u32) -> PlayerApiResult<Board> {
        self.run_with_timeout(move |api| api.propose_board0(cols, rows))
    }

    fn setup(&mut self, state: Option<RedactedState>, goal: Position) -> PlayerApiResult<()> {
        self.run_with_timeout(move |api| api.setup(state, goal))
    }

    fn take_turn(&self, state: RedactedState) -> PlayerApiResult<PlayerMove> {
        self.run_with_timeout(move |api| api.take_turn(state))
    }

    fn won(&mut self, did_win: bool) -> PlayerApiResult<()> {
        self.run_with_timeout(move |api| api.won(did_win))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use players::bad_player::{BadFM, BadPlayerLoop};
    use players::player::LocalPlayer;
    use players::strategy::NaiveStrategy;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn pool() -> Arc<ThreadPool> {
        Arc::new(rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap())
    }

    #[test]
    fn delegates_successful_calls() {
        let inner = LocalPlayer::new(Name::new("bob").unwrap(), NaiveStrategy::Euclid);
        let safe = SafePlayer::new(Box::new(inner), pool(), Duration::from_secs(1));
        assert_eq!(safe.name().unwrap(), Name::new("bob").unwrap());
    }

    #[test]
    fn times_out_a_blocked_call() {
        let cancelled = Arc::new(AtomicBool::new(false));
        let inner = LocalPlayer::new(Name::new("slow").unwrap(), NaiveStrategy::Euclid);
        let looping = BadPlayerLoop::new(Box::new(inner), BadFM::Win, Arc::clone(&cancelled));
        let mut safe = SafePlayer::new(Box::new(looping), pool(), Duration::from_millis(50));
        assert!(matches!(safe.won(true), Err(PlayerApiError::Timeout)));
        cancelled.store(true, Ordering::Relaxed);
    }

    #[test]
    fn ejection_hook_runs_once() {
        let inner = LocalPlayer::new(Name::new("bob").unwrap(), NaiveStrategy::Euclid);
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        let safe = SafePlayer::new(Box::new(inner), pool(), Duration::from_secs(1))
            .with_ejection_hook(move || flag.store(true, Ordering::Relaxed));
        safe.on_ejected();
        assert!(ran.load(Ordering::Relaxed));
    }
}
