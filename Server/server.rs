use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use referee::config::{Config, SignupConfig};
use referee::json::JsonGameResult;
use referee::referee::Referee;
use tokio::net::TcpListener;

mod error;
mod signup;

#[derive(Parser)]
struct Args {
    /// The port number the server should listen on for incoming player connections
    port: u16,
}

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let _ = flexi_logger::Logger::try_with_env_or_str("info").and_then(|l| l.start());
    let Args { port } = Args::parse();

    let config = Config::default();
    let signup_config = SignupConfig::default();
    let pool = Arc::new(rayon::ThreadPoolBuilder::new().build()?);

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], port))).await?;
    log::info!("listening on port {port}");

    let roster = signup::run_admission(&listener, &signup_config, Arc::clone(&pool), config.per_call_timeout).await;

    let game_result = if roster.len() < signup_config.min_to_start {
        log::info!("signup ended with too few players ({}); no game run", roster.len());
        referee::referee::GameResult::default()
    } else {
        log::info!("signup complete with {} player(s); starting game", roster.len());
        let referee = Referee::new(config, pool);
        referee.run_game_with_safe_players(roster)
    };

    log::info!("winners={:?} kicked={:?}", game_result.winners, game_result.kicked);
    println!("{}", serde_json::to_string(&JsonGameResult::from(game_result))?);

    Ok(())
}
