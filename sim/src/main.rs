//! Stdio bridge between the simulation and an external renderer.
//!
//! Reads `InputMsg` JSON lines on stdin and writes `HostMsg` JSON lines on
//! stdout. Logs go to stderr.
//!
//! Usage: hoops-sim [CONFIG.json]

use hoops_shared::protocol::HostMsg;
use hoops_sim::bridge::{forward_input, write_host_messages};
use hoops_sim::config::SimConfig;
use hoops_sim::game_loop::{run_game_loop, GameBroadcast, GameCommand};
use tokio::io::BufReader;
use tokio::sync::{broadcast, mpsc, oneshot};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(&path),
        None => {
            let config = SimConfig::default();
            config.validate().map(|_| config)
        }
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let (game_tx, game_rx) = mpsc::channel::<GameCommand>(256);
    let (broadcast_tx, broadcast_rx) = broadcast::channel::<GameBroadcast>(64);

    let game_handle = tokio::spawn(run_game_loop(game_rx, broadcast_tx, config));

    let (scene_tx, scene_rx) = oneshot::channel();
    if game_tx
        .send(GameCommand::Scene {
            response: scene_tx,
        })
        .await
        .is_err()
    {
        tracing::error!("Game loop is not running");
        return;
    }
    let scene = match scene_rx.await {
        Ok(scene) => scene,
        Err(_) => {
            tracing::error!("Failed to receive scene");
            return;
        }
    };

    let writer_handle = tokio::spawn(write_host_messages(
        tokio::io::stdout(),
        HostMsg::Scene(scene),
        broadcast_rx,
    ));

    forward_input(BufReader::new(tokio::io::stdin()), &game_tx).await;

    // Closing the command channel stops the loop, which closes the broadcast.
    drop(game_tx);
    let _ = game_handle.await;
    let _ = writer_handle.await;
}
