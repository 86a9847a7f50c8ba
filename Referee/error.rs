use thiserror::Error;

#[derive(Debug, Error)]
pub enum RefereeError {
    #[error("run_game called with no players")]
    NoPlayers,
    #[error("no player proposed a usable board")]
    NoBoardProposed,
}
