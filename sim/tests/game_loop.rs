//! Integration tests for the hosted game loop.
//!
//! Each test spawns the loop on a paused tokio clock and talks to it through
//! the same channels the stdio bridge uses.

use hoops_shared::protocol::{CanvasRect, FrameMsg, InputMsg, PhaseWire, ShotKind, ShotMsg};
use hoops_shared::scene::DrawableId;
use hoops_sim::aim::pointer_for_aim;
use hoops_sim::config::SimConfig;
use hoops_sim::game_loop::{run_game_loop, GameBroadcast, GameCommand};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;

const CANVAS: CanvasRect = CanvasRect {
    left: 0.0,
    top: 0.0,
    width: 1280.0,
    height: 480.0,
};

struct TestLoop {
    cmd_tx: mpsc::Sender<GameCommand>,
    rx: broadcast::Receiver<GameBroadcast>,
    handle: JoinHandle<()>,
    config: SimConfig,
}

fn start_loop(config: SimConfig) -> TestLoop {
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (broadcast_tx, rx) = broadcast::channel(1024);
    let handle = tokio::spawn(run_game_loop(cmd_rx, broadcast_tx, config.clone()));
    TestLoop {
        cmd_tx,
        rx,
        handle,
        config,
    }
}

impl TestLoop {
    async fn send(&self, msg: InputMsg) {
        self.cmd_tx.send(GameCommand::Input(msg)).await.unwrap();
    }

    async fn shoot(&self, x: f64, y: f64) {
        self.send(InputMsg::Press).await;
        self.send(InputMsg::Move(pointer_for_aim(
            &self.config.scene.aim,
            CANVAS,
            x,
            y,
        )))
        .await;
        self.send(InputMsg::Release).await;
    }

    async fn snapshot(&self) -> FrameMsg {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(GameCommand::Snapshot { response: tx })
            .await
            .unwrap();
        rx.await.unwrap()
    }

    /// Next shot event, skipping frames. Panics after `limit` broadcasts.
    async fn next_shot(&mut self, limit: usize) -> ShotMsg {
        for _ in 0..limit {
            match self.rx.recv().await {
                Ok(GameBroadcast::Shot(shot)) => return shot,
                Ok(GameBroadcast::Frame(_)) => {}
                Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(e) => panic!("broadcast ended: {}", e),
            }
        }
        panic!("no shot event within {} broadcasts", limit);
    }

    async fn next_frame(&mut self) -> FrameMsg {
        loop {
            match self.rx.recv().await {
                Ok(GameBroadcast::Frame(frame)) => return frame,
                Ok(GameBroadcast::Shot(_)) => {}
                Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(e) => panic!("broadcast ended: {}", e),
            }
        }
    }
}

#[tokio::test(start_paused = true)]
async fn scene_lists_static_drawables_and_camera() {
    let game = start_loop(SimConfig::default());

    let (tx, rx) = oneshot::channel();
    game.cmd_tx
        .send(GameCommand::Scene { response: tx })
        .await
        .unwrap();
    let scene = rx.await.unwrap();

    assert_eq!(scene.protocol_version, 1);
    assert_eq!(scene.camera.eye.z, 17.0);
    assert!(scene.drawables.iter().any(|d| d.id == DrawableId::Hoop));
    assert!(scene.drawables.iter().any(|d| d.id == DrawableId::Scoreboard));
    assert!(scene.drawables.iter().all(|d| d.id != DrawableId::Ball));
}

#[tokio::test(start_paused = true)]
async fn frames_are_broadcast_while_idle() {
    let mut game = start_loop(SimConfig::default());

    let first = game.next_frame().await;
    let second = game.next_frame().await;

    assert_eq!(first.phase, PhaseWire::Idle);
    assert_eq!(first.score_text, "00");
    assert_eq!(first.time_text, "02:00");
    assert_eq!(second.tick, first.tick + 2);
    assert_eq!(first.ball.pos, [0.0, 1.0, -5.0]);
}

#[tokio::test(start_paused = true)]
async fn launch_is_broadcast_and_ball_leaves_aim() {
    let mut game = start_loop(SimConfig::default());

    game.shoot(0.0, 0.0).await;
    let shot = game.next_shot(20).await;
    assert_eq!(shot.kind, ShotKind::Launched);
    assert_eq!(shot.score, 0);

    tokio::time::sleep(Duration::from_millis(500)).await;
    let frame = game.snapshot().await;
    assert_eq!(frame.phase, PhaseWire::InFlight);
    assert!(frame.ball.pos[2] < -5.0);
}

#[tokio::test(start_paused = true)]
async fn well_aimed_shot_scores() {
    let mut game = start_loop(SimConfig::default());

    game.shoot(0.0, 3.5).await;
    assert_eq!(game.next_shot(20).await.kind, ShotKind::Launched);

    let shot = game.next_shot(2000).await;
    assert_eq!(shot.kind, ShotKind::Scored);
    assert_eq!(shot.points, 2);
    assert_eq!(shot.score, 2);
    assert_eq!(shot.high_score, 2);

    let frame = game.snapshot().await;
    assert_eq!(frame.score_text, "02");
    assert_eq!(frame.high_score_text, "02");
}

#[tokio::test(start_paused = true)]
async fn low_shot_misses() {
    let mut game = start_loop(SimConfig::default());

    game.shoot(0.0, 0.0).await;
    assert_eq!(game.next_shot(20).await.kind, ShotKind::Launched);

    let shot = game.next_shot(2000).await;
    assert_eq!(shot.kind, ShotKind::Missed);
    assert_eq!(shot.score, 0);
}

#[tokio::test(start_paused = true)]
async fn restart_keeps_high_score() {
    let mut game = start_loop(SimConfig::default());

    game.shoot(0.0, 3.5).await;
    game.next_shot(20).await;
    assert_eq!(game.next_shot(2000).await.kind, ShotKind::Scored);

    game.send(InputMsg::Restart).await;
    let frame = game.snapshot().await;
    assert_eq!(frame.phase, PhaseWire::Idle);
    assert_eq!(frame.score_text, "00");
    assert_eq!(frame.high_score_text, "02");
}

#[tokio::test(start_paused = true)]
async fn stalled_ticks_still_advance_the_clock() {
    let mut config = SimConfig::default();
    config.scene.clock.duration_seconds = 1;
    let mut game = start_loop(config);
    assert_eq!(game.snapshot().await.time_text, "00:01");

    // One displayed second is 6 s of frame time. Jump past it in one go so
    // the interval has to skip the ticks in between.
    tokio::time::advance(Duration::from_millis(6500)).await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(game.snapshot().await.time_text, "00:00");
    assert_eq!(game.next_shot(200).await.kind, ShotKind::TimeUp);
}

#[tokio::test(start_paused = true)]
async fn loop_ends_when_commands_close() {
    let game = start_loop(SimConfig::default());
    let TestLoop { cmd_tx, handle, .. } = game;

    drop(cmd_tx);
    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("loop did not stop")
        .unwrap();
}
