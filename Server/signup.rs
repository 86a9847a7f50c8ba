use std::net::TcpStream as StdTcpStream;
use std::sync::Arc;
use std::time::Duration;

use common::name::Name;
use rayon::ThreadPool;
use referee::config::SignupConfig;
use referee::player::SafePlayer;
use remote::player::PlayerProxy;
use remote::stream::ReadableStreamWrapper;
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tokio::time::{sleep_until, Instant};

use crate::error::SignupError;

/// Reads exactly one JSON value off the connection and validates it as a name. Runs on a blocking
/// thread: the handshake read is synchronous, mirroring the admission policy's use of a bounded
/// per-connection task rather than fully async I/O for this one read.
fn handshake_sync(
    stream: StdTcpStream,
) -> Result<(Name, PlayerProxy<ReadableStreamWrapper, StdTcpStream>), SignupError> {
    stream.set_nonblocking(false)?;
    let name_stream = stream.try_clone()?;
    let mut reader = serde_json::Deserializer::from_reader(name_stream);
    let name = Name::deserialize(&mut reader)?;
    let proxy = PlayerProxy::try_from_tcp(name.clone(), stream)?;
    Ok((name, proxy))
}

fn finish(
    result: Result<Result<(Name, PlayerProxy<ReadableStreamWrapper, StdTcpStream>), SignupError>, tokio::task::JoinError>,
    pool: &Arc<ThreadPool>,
    per_call_timeout: Duration,
) -> Option<SafePlayer> {
    match result {
        Ok(Ok((name, proxy))) => {
            log::info!("handshake complete, name={name}");
            let closer = proxy.try_closer();
            let safe = SafePlayer::new(Box::new(proxy), Arc::clone(pool), per_call_timeout);
            Some(match closer {
                Some(c) => safe.with_ejection_hook(move || c.close()),
                None => safe,
            })
        }
        Ok(Err(e)) => {
            log::warn!("handshake failed: {e}");
            None
        }
        Err(_) => {
            log::warn!("handshake task panicked");
            None
        }
    }
}

/// Runs the admission policy against an already-bound listener: accepts connections, handshakes
/// each on its own bounded task, and partitions time into waiting periods. Returns a roster of
/// [`SafePlayer`]s ready to hand to [`referee::referee::Referee::run_game_with_safe_players`] once
/// either enough players have joined or the periods have run out (in which case the roster may be
/// too small and the caller should treat that as "no game").
pub async fn run_admission(
    listener: &TcpListener,
    config: &SignupConfig,
    pool: Arc<ThreadPool>,
    per_call_timeout: Duration,
) -> Vec<SafePlayer> {
    let mut roster: Vec<SafePlayer> = Vec::new();
    let mut handshakes: JoinSet<Result<(Name, PlayerProxy<ReadableStreamWrapper, StdTcpStream>), SignupError>> =
        JoinSet::new();

    'periods: for period in 1..=config.n_periods {
        let period_end = Instant::now() + config.waiting_period;
        loop {
            tokio::select! {
                _ = sleep_until(period_end) => break,
                accepted = listener.accept() => {
                    if let Ok((stream, addr)) = accepted {
                        log::info!("accepted connection from {addr}");
                        let handshake_timeout = config.handshake_timeout;
                        handshakes.spawn(async move {
                            let std_stream = stream.into_std()?;
                            match tokio::time::timeout(
                                handshake_timeout,
                                tokio::task::spawn_blocking(move || handshake_sync(std_stream)),
                            )
                            .await
                            {
                                Ok(Ok(inner)) => inner,
                                Ok(Err(_)) => Err(SignupError::TaskFailed),
                                Err(_) => Err(SignupError::Timeout),
                            }
                        });
                    }
                }
                Some(result) = handshakes.join_next(), if !handshakes.is_empty() => {
                    if let Some(safe) = finish(result, &pool, per_call_timeout) {
                        roster.push(safe);
                    }
                }
            }
            if roster.len() >= config.max_to_start {
                break 'periods;
            }
        }
        log::info!("waiting period {period} ended with {} player(s)", roster.len());
        if roster.len() >= config.min_to_start {
            break;
        }
    }

    while let Some(result) = handshakes.join_next().await {
        if roster.len() >= config.max_to_start {
            break;
        }
        if let Some(safe) = finish(result, &pool, per_call_timeout) {
            roster.push(safe);
        }
    }

    roster.truncate(config.max_to_start);
    roster
}
