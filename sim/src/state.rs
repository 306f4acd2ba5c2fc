use hoops_shared::config::SceneConfig;
use hoops_shared::protocol::{
    round4, BallPoseWire, FrameMsg, InputMsg, PhaseWire, SceneMsg, ShotKind, ShotMsg,
    PROTOCOL_VERSION,
};
use hoops_shared::scene::Pose;

use crate::aim::AimController;
use crate::clock::GameClock;
use crate::hoop::Rim;
use crate::projectile::{integrate, Projectile};
use crate::score::{score_text, ScoreState};
use crate::stepper::Stepper;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    InFlight,
    Scored,
    Missed,
}

/// A launched ball and the press that aimed it.
#[derive(Debug, Clone)]
pub struct Flight {
    pub projectile: Projectile,
    /// State before the last step, for pose blending and rim crossing
    pub previous: Projectile,
    pub outcome: ShotOutcome,
    press: u64,
}

#[derive(Debug, Clone)]
pub enum ShotPhase {
    /// Nothing pressed yet this round
    Idle,
    /// Ball follows the pointer
    Aiming,
    Launched(Flight),
}

/// What happened to the shot during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotEvent {
    Launched,
    /// A new press took the ball back before the old one settled
    Discarded,
    /// `points` is 0 when the basket lands after time is up
    Scored { points: u32 },
    Missed,
    TimeUp,
}

/// One game session: aim, the shot in flight, clock and score.
pub struct GameState {
    pub config: SceneConfig,
    aim: AimController,
    phase: ShotPhase,
    stepper: Stepper,
    clock: GameClock,
    score: ScoreState,
    rim: Rim,
    input_bound: bool,
    time_up_reported: bool,
    frames: u64,
    alpha: f64,
}

impl GameState {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            aim: AimController::new(config.aim),
            phase: ShotPhase::Idle,
            stepper: Stepper::new(config.stepper),
            clock: GameClock::new(config.clock),
            score: ScoreState::new(),
            rim: Rim::new(&config.hoop),
            input_bound: false,
            time_up_reported: false,
            frames: 0,
            alpha: 0.0,
            config,
        }
    }

    /// Attach the input source. Returns false if one is already attached.
    pub fn bind_input(&mut self) -> bool {
        if self.input_bound {
            return false;
        }
        self.input_bound = true;
        true
    }

    pub fn is_input_bound(&self) -> bool {
        self.input_bound
    }

    pub fn aim(&self) -> &AimController {
        &self.aim
    }

    pub fn phase(&self) -> &ShotPhase {
        &self.phase
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// The flight belonging to the latest press, if it has been launched.
    pub fn active_flight(&self) -> Option<&Flight> {
        match &self.phase {
            ShotPhase::Launched(flight) if flight.press == self.aim.press_count() => Some(flight),
            _ => None,
        }
    }

    /// Apply one input event. Only pointer state and flags change here.
    pub fn handle_input(&mut self, msg: &InputMsg) {
        if !self.input_bound {
            tracing::warn!("Input received before binding, ignored");
            return;
        }
        match msg {
            InputMsg::Press => self.aim.press(),
            InputMsg::Move(m) => self.aim.pointer_move(m),
            InputMsg::Release => {
                if !self.aim.release() {
                    tracing::debug!("Release without press ignored");
                }
            }
            InputMsg::Restart => self.restart(),
        }
    }

    /// New round: clock and round score reset, ball back to idle.
    pub fn restart(&mut self) {
        self.aim.reset();
        self.phase = ShotPhase::Idle;
        self.stepper.reset();
        self.clock.reset();
        self.score.reset_round();
        self.time_up_reported = false;
        self.alpha = 0.0;
        tracing::info!("Round restarted (high score {})", self.score.high());
    }

    /// Advance by one frame of `frame_dt` seconds.
    pub fn advance(&mut self, frame_dt: f64) -> Vec<ShotEvent> {
        let mut events = Vec::new();
        self.frames += 1;

        self.clock.tick(frame_dt);
        if !self.time_up_reported && self.clock.is_expired() {
            self.time_up_reported = true;
            tracing::info!("Time up, final score {}", self.score.current());
            events.push(ShotEvent::TimeUp);
        }

        let plan = self.stepper.advance(frame_dt);
        for _ in 0..plan.steps {
            self.step(&mut events);
        }
        self.alpha = plan.alpha;

        events
    }

    fn step(&mut self, events: &mut Vec<ShotEvent>) {
        self.sync_phase(events);

        let dt = self.stepper.step_seconds();
        if let ShotPhase::Launched(flight) = &mut self.phase {
            flight.previous = flight.projectile;
            let contacts = integrate(&mut flight.projectile, dt, &self.config.physics);

            if flight.outcome == ShotOutcome::InFlight {
                if self
                    .rim
                    .is_basket(flight.previous.position, flight.projectile.position)
                {
                    flight.outcome = ShotOutcome::Scored;
                    let points = if self.clock.is_expired() {
                        0
                    } else {
                        self.config.hoop.points_per_basket
                    };
                    self.score.record(points);
                    tracing::info!(
                        "Basket for {} points, score {} (high {})",
                        points,
                        self.score.current(),
                        self.score.high()
                    );
                    events.push(ShotEvent::Scored { points });
                } else if contacts.floor {
                    flight.outcome = ShotOutcome::Missed;
                    tracing::info!("Missed shot");
                    events.push(ShotEvent::Missed);
                }
            }
        }

        self.aim.end_step();
    }

    /// Bring the phase in line with the controller flags.
    fn sync_phase(&mut self, events: &mut Vec<ShotEvent>) {
        let press = self.aim.press_count();
        let stale = matches!(&self.phase, ShotPhase::Launched(flight) if flight.press != press);
        if stale {
            tracing::debug!("Discarding previous shot");
            self.phase = ShotPhase::Aiming;
            events.push(ShotEvent::Discarded);
        }

        let waiting = matches!(self.phase, ShotPhase::Idle | ShotPhase::Aiming);
        if waiting && self.aim.is_launched() {
            let projectile = self.aim.launch_projectile();
            tracing::debug!(
                "Launched from ({:.2}, {:.2}, {:.2})",
                projectile.position.x,
                projectile.position.y,
                projectile.position.z
            );
            self.phase = ShotPhase::Launched(Flight {
                projectile,
                previous: projectile,
                outcome: ShotOutcome::InFlight,
                press: self.aim.press_count(),
            });
            events.push(ShotEvent::Launched);
        } else if matches!(self.phase, ShotPhase::Idle) && self.aim.pointer().is_down {
            self.phase = ShotPhase::Aiming;
        }
    }

    /// Ball pose to draw: the aim preview, or the blended projectile.
    pub fn ball_pose(&self) -> Pose {
        match self.active_flight() {
            Some(flight) => flight.projectile.blended_pose(&flight.previous, self.alpha),
            None => Pose::at(self.aim.aim_transform().position),
        }
    }

    pub fn phase_wire(&self) -> PhaseWire {
        if let Some(flight) = self.active_flight() {
            return match flight.outcome {
                ShotOutcome::InFlight => PhaseWire::InFlight,
                ShotOutcome::Scored => PhaseWire::Scored,
                ShotOutcome::Missed => PhaseWire::Missed,
            };
        }
        match self.phase {
            ShotPhase::Idle if !self.aim.pointer().is_down => PhaseWire::Idle,
            _ => PhaseWire::Aiming,
        }
    }

    pub fn frame(&self) -> FrameMsg {
        let pose = self.ball_pose();
        let t = pose.translation;
        FrameMsg {
            tick: self.frames,
            phase: self.phase_wire(),
            ball: BallPoseWire {
                pos: [round4(t.x), round4(t.y), round4(t.z)],
                axis: pose.axis.to_array(),
                angle: round4(pose.angle),
            },
            time_text: self.clock.remaining_time_text(),
            score_text: score_text(self.score.current()),
            high_score_text: score_text(self.score.high()),
        }
    }

    pub fn scene(&self) -> SceneMsg {
        SceneMsg {
            protocol_version: PROTOCOL_VERSION,
            camera: self.config.camera,
            drawables: self.config.static_drawables(),
        }
    }

    pub fn shot_msg(&self, event: ShotEvent) -> ShotMsg {
        let (kind, points) = match event {
            ShotEvent::Launched => (ShotKind::Launched, 0),
            ShotEvent::Discarded => (ShotKind::Discarded, 0),
            ShotEvent::Scored { points } => (ShotKind::Scored, points),
            ShotEvent::Missed => (ShotKind::Missed, 0),
            ShotEvent::TimeUp => (ShotKind::TimeUp, 0),
        };
        ShotMsg {
            kind,
            points,
            score: self.score.current(),
            high_score: self.score.high(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoops_shared::protocol::{CanvasRect, PointerMoveMsg};
    use hoops_shared::vec3::vec3;

    const CANVAS: CanvasRect = CanvasRect {
        left: 0.0,
        top: 0.0,
        width: 1280.0,
        height: 480.0,
    };
    const STEP: f64 = 0.05;

    fn move_to(client_x: f64, client_y: f64) -> InputMsg {
        InputMsg::Move(PointerMoveMsg {
            client_x,
            client_y,
            canvas: CANVAS,
        })
    }

    fn test_state() -> GameState {
        let mut state = GameState::new(SceneConfig::default());
        assert!(state.bind_input());
        state
    }

    /// Pointer position that puts the aim at (x, y) above the aim origin.
    fn aim_at(x: f64, y: f64) -> InputMsg {
        move_to(640.0 + x * 34.0, 183.0 - y * 33.0)
    }

    fn shoot(state: &mut GameState, x: f64, y: f64) -> Vec<ShotEvent> {
        state.handle_input(&InputMsg::Press);
        state.handle_input(&aim_at(x, y));
        state.handle_input(&InputMsg::Release);
        state.advance(STEP)
    }

    fn run_until<F: Fn(&ShotEvent) -> bool>(state: &mut GameState, done: F) -> Vec<ShotEvent> {
        let mut all = Vec::new();
        for _ in 0..2000 {
            let events = state.advance(STEP);
            let finished = events.iter().any(&done);
            all.extend(events);
            if finished {
                break;
            }
        }
        all
    }

    #[test]
    fn input_before_binding_is_ignored() {
        let mut state = GameState::new(SceneConfig::default());
        state.handle_input(&InputMsg::Press);
        assert!(!state.aim().pointer().is_down);
        assert!(state.bind_input());
        assert!(!state.bind_input());
        assert!(state.is_input_bound());
    }

    #[test]
    fn press_moves_from_idle_to_aiming() {
        let mut state = test_state();
        assert_eq!(state.phase_wire(), PhaseWire::Idle);
        state.handle_input(&InputMsg::Press);
        assert_eq!(state.phase_wire(), PhaseWire::Aiming);
        state.advance(STEP);
        assert!(matches!(state.phase(), ShotPhase::Aiming));
    }

    #[test]
    fn preview_follows_aim_until_release() {
        let mut state = test_state();
        state.handle_input(&InputMsg::Press);
        state.handle_input(&aim_at(1.0, 2.0));
        state.advance(STEP);
        let pose = state.ball_pose();
        assert!((pose.translation.x - 1.0).abs() < 1e-9);
        assert!((pose.translation.y - 3.0).abs() < 1e-9);
        assert!((pose.translation.z + 5.0).abs() < 1e-9);
    }

    #[test]
    fn release_launches_on_next_step() {
        let mut state = test_state();
        state.handle_input(&InputMsg::Press);
        state.handle_input(&move_to(640.0 + 34.0, 240.0 - 33.0));
        state.handle_input(&InputMsg::Release);
        assert!(state.active_flight().is_none());

        let events = state.advance(STEP);
        assert_eq!(events, vec![ShotEvent::Launched]);

        let flight = state.active_flight().unwrap();
        assert_eq!(flight.previous.position, vec3(1.0, 1.0, -5.0));
        assert_eq!(flight.previous.linear_velocity, vec3(0.0, 3.0, -4.5));
        assert_eq!(flight.projectile.spin_axis, vec3(1.0, 0.0, 0.0));
        assert!((flight.projectile.linear_velocity.y - (3.0 - 0.8 * STEP)).abs() < 1e-9);
        assert!((flight.projectile.position.z - (-5.0 - 4.5 * STEP)).abs() < 1e-9);
        assert_eq!(state.phase_wire(), PhaseWire::InFlight);
    }

    #[test]
    fn low_shot_misses_on_first_floor_contact() {
        let mut state = test_state();
        shoot(&mut state, 0.0, 0.0);
        let events = run_until(&mut state, |e| *e == ShotEvent::Missed);
        assert!(events.contains(&ShotEvent::Missed));
        assert_eq!(state.score().current(), 0);
        assert_eq!(state.phase_wire(), PhaseWire::Missed);
    }

    #[test]
    fn shot_aimed_at_rim_scores() {
        let mut state = test_state();
        // Launched from y = 4.5 the ball comes down through y = 10 right
        // above the rim center.
        shoot(&mut state, 0.0, 3.5);
        let events = run_until(&mut state, |e| matches!(e, ShotEvent::Scored { .. }));
        assert!(events.contains(&ShotEvent::Scored { points: 2 }));
        assert_eq!(state.score().current(), 2);
        assert_eq!(state.score().high(), 2);
        assert_eq!(state.frame().score_text, "02");
        assert_eq!(state.phase_wire(), PhaseWire::Scored);

        // Scored shots do not also count as misses when they hit the floor.
        let later = run_until(&mut state, |e| *e == ShotEvent::Missed);
        assert!(!later.contains(&ShotEvent::Missed));
    }

    #[test]
    fn new_press_discards_flight() {
        let mut state = test_state();
        shoot(&mut state, 0.0, 1.0);
        state.advance(STEP);
        state.handle_input(&InputMsg::Press);
        assert!(state.active_flight().is_none());
        assert_eq!(state.phase_wire(), PhaseWire::Aiming);

        let events = state.advance(STEP);
        assert_eq!(events, vec![ShotEvent::Discarded]);
        assert!(matches!(state.phase(), ShotPhase::Aiming));
    }

    #[test]
    fn press_and_release_in_one_frame_replaces_flight() {
        let mut state = test_state();
        shoot(&mut state, 0.0, 1.0);
        state.advance(STEP);
        let events = shoot(&mut state, 2.0, 0.0);
        assert_eq!(events, vec![ShotEvent::Discarded, ShotEvent::Launched]);
        let flight = state.active_flight().unwrap();
        assert_eq!(flight.previous.position, vec3(2.0, 1.0, -5.0));
    }

    #[test]
    fn pointer_history_updates_each_step() {
        let mut state = test_state();
        state.handle_input(&InputMsg::Press);
        state.handle_input(&aim_at(1.0, 1.0));
        state.advance(STEP);
        assert!((state.aim().pointer().last_x - 1.0).abs() < 1e-9);
        assert!((state.aim().pointer().last_y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn time_up_reported_once_and_blocks_points() {
        let mut config = SceneConfig::default();
        config.clock.duration_seconds = 1;
        let mut state = GameState::new(config);
        state.bind_input();

        // 6 s of frame time = one displayed second with the default scale.
        let mut time_ups = 0;
        for _ in 0..130 {
            time_ups += state
                .advance(STEP)
                .iter()
                .filter(|e| **e == ShotEvent::TimeUp)
                .count();
        }
        assert_eq!(time_ups, 1);
        assert_eq!(state.frame().time_text, "00:00");

        shoot(&mut state, 0.0, 3.5);
        let events = run_until(&mut state, |e| matches!(e, ShotEvent::Scored { .. }));
        assert!(events.contains(&ShotEvent::Scored { points: 0 }));
        assert_eq!(state.score().current(), 0);
    }

    #[test]
    fn restart_keeps_high_score() {
        let mut state = test_state();
        shoot(&mut state, 0.0, 3.5);
        run_until(&mut state, |e| matches!(e, ShotEvent::Scored { .. }));
        state.handle_input(&InputMsg::Restart);

        assert_eq!(state.score().current(), 0);
        assert_eq!(state.score().high(), 2);
        assert_eq!(state.phase_wire(), PhaseWire::Idle);
        let frame = state.frame();
        assert_eq!(frame.time_text, "02:00");
        assert_eq!(frame.score_text, "00");
        assert_eq!(frame.high_score_text, "02");
    }

    #[test]
    fn frame_reports_hud_and_preview() {
        let state = test_state();
        let frame = state.frame();
        assert_eq!(frame.phase, PhaseWire::Idle);
        assert_eq!(frame.ball.pos, [0.0, 1.0, -5.0]);
        assert_eq!(frame.time_text, "02:00");
        assert_eq!(frame.score_text, "00");
    }

    #[test]
    fn scene_lists_static_drawables() {
        let state = test_state();
        let scene = state.scene();
        assert_eq!(scene.protocol_version, PROTOCOL_VERSION);
        assert_eq!(scene.drawables.len(), state.config.layout.len() + 1);
    }

    #[test]
    fn shot_msg_carries_score() {
        let mut state = test_state();
        shoot(&mut state, 0.0, 3.5);
        run_until(&mut state, |e| matches!(e, ShotEvent::Scored { .. }));
        let msg = state.shot_msg(ShotEvent::Scored { points: 2 });
        assert_eq!(msg.kind, ShotKind::Scored);
        assert_eq!(msg.points, 2);
        assert_eq!(msg.score, 2);
        assert_eq!(msg.high_score, 2);
    }
}
