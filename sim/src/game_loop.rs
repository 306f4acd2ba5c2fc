use crate::config::SimConfig;
use crate::state::GameState;
use hoops_shared::protocol::{FrameMsg, InputMsg, SceneMsg, ShotMsg};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::Instant;

/// Commands from the input side to the game loop
pub enum GameCommand {
    Input(InputMsg),
    Scene {
        response: oneshot::Sender<SceneMsg>,
    },
    Snapshot {
        response: oneshot::Sender<FrameMsg>,
    },
}

/// Broadcasts from the game loop to the renderer side
#[derive(Debug, Clone)]
pub enum GameBroadcast {
    Frame(FrameMsg),
    Shot(ShotMsg),
}

/// Real time elapsed between loop ticks.
///
/// Ticks the interval skipped under load still reach the game clock through
/// the next measured lap.
#[derive(Debug, Clone, Copy)]
pub struct FrameTimer {
    last: Instant,
}

impl FrameTimer {
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    /// Seconds since the previous lap (or since creation).
    pub fn lap(&mut self, now: Instant) -> f64 {
        let dt = now.saturating_duration_since(self.last).as_secs_f64();
        self.last = now;
        dt
    }
}

/// Run the main game loop. Owns all game state.
///
/// Ticks and commands are handled one at a time, so input never lands in
/// the middle of a frame. The loop ends when every command sender is gone.
pub async fn run_game_loop(
    mut cmd_rx: mpsc::Receiver<GameCommand>,
    broadcast_tx: broadcast::Sender<GameBroadcast>,
    config: SimConfig,
) {
    let mut state = GameState::new(config.scene.clone());
    state.bind_input();

    let period = 1.0 / config.tick_rate_hz as f64;
    let frame_every_n = config.frame_every_n_ticks() as u64;
    let mut tick_count: u64 = 0;

    let mut tick_interval = tokio::time::interval(Duration::from_secs_f64(period));
    tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let mut timer = FrameTimer::new(Instant::now());

    tracing::info!(
        "Game loop started at {} Hz, frames every {} ticks",
        config.tick_rate_hz,
        frame_every_n
    );

    loop {
        tokio::select! {
            _ = tick_interval.tick() => {
                let dt = timer.lap(Instant::now());
                for event in state.advance(dt) {
                    let _ = broadcast_tx.send(GameBroadcast::Shot(state.shot_msg(event)));
                }

                tick_count += 1;
                if tick_count % frame_every_n == 0 {
                    let _ = broadcast_tx.send(GameBroadcast::Frame(state.frame()));
                }
            }

            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(GameCommand::Input(msg)) => state.handle_input(&msg),
                    Some(GameCommand::Scene { response }) => {
                        let _ = response.send(state.scene());
                    }
                    Some(GameCommand::Snapshot { response }) => {
                        let _ = response.send(state.frame());
                    }
                    None => break,
                }
            }
        }
    }

    tracing::info!(
        "Game loop ended after {} ticks, high score {}",
        tick_count,
        state.score().high()
    );
}
