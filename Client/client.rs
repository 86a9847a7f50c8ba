use std::net::{IpAddr, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use std::{io::stdin, io::Write};

use clap::Parser;
use common::name::Name;
use players::bad_player::{BadPlayer, BadPlayerLoop};
use players::player::{LocalPlayer, PlayerApi};
use referee::json::PlayerSpec;
use remote::referee::RefereeProxy;

/// How long to wait between starting successive players, mirroring the distillation source's own
/// client harness so connections land in a staggered, observable order rather than all at once.
const STAGGER: Duration = Duration::from_secs(3);

#[derive(Parser)]
struct Args {
    /// The port number the client should connect to
    port: u16,

    #[clap(default_value = "127.0.0.1")]
    address: IpAddr,
}

fn build_player(spec: PlayerSpec) -> (Box<dyn PlayerApi>, Name) {
    match spec {
        PlayerSpec::PS(ps) => {
            let (name, strategy) = ps.into();
            (Box::new(LocalPlayer::new(name.clone(), strategy)), name)
        }
        PlayerSpec::BadPS(bad_ps) => {
            let (name, strategy, bad_fm) = bad_ps.into();
            let inner = LocalPlayer::new(name.clone(), strategy);
            (Box::new(BadPlayer::new(Box::new(inner), bad_fm)), name)
        }
        PlayerSpec::BadPS2(bad_ps2) => {
            let (name, strategy, bad_fm, millis) = bad_ps2.into();
            let inner = LocalPlayer::new(name.clone(), strategy);
            let cancelled = Arc::new(AtomicBool::new(false));
            let watchdog = Arc::clone(&cancelled);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(millis));
                watchdog.store(true, Ordering::Relaxed);
            });
            (Box::new(BadPlayerLoop::new(Box::new(inner), bad_fm, cancelled)), name)
        }
    }
}

fn send_name(stream: &mut TcpStream, name: &Name) -> anyhow::Result<()> {
    stream.write_all(serde_json::to_string(name)?.as_bytes())?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let _ = flexi_logger::Logger::try_with_env_or_str("info").and_then(|l| l.start());
    let Args { port, address } = Args::parse();

    let specs: Vec<PlayerSpec> = serde_json::from_reader(stdin())?;
    log::info!("starting {} player(s) against {address}:{port}", specs.len());

    thread::scope(|scope| {
        for spec in specs {
            scope.spawn(move || {
                let (player, name) = build_player(spec);
                let mut stream = loop {
                    match TcpStream::connect((address, port)) {
                        Ok(stream) => break stream,
                        Err(e) => log::warn!("connection attempt failed: {e}"),
                    }
                };
                log::info!("connected to referee as {name}");
                if let Err(e) = send_name(&mut stream, &name) {
                    log::warn!("failed to send name for {name}: {e}");
                    return;
                }
                match RefereeProxy::from_tcp(player, stream) {
                    Ok(proxy) => {
                        if let Err(e) = proxy.listen() {
                            log::warn!("client for {name} ended: {e}");
                        }
                    }
                    Err(e) => log::warn!("failed to start referee proxy for {name}: {e}"),
                }
            });
            thread::sleep(STAGGER);
        }
    });

    Ok(())
}
