//! Throws seeded random shots at the hoop and reports how many go in.
//!
//! Drives `GameState` directly with synthetic pointer input, without the
//! game loop or a renderer. Useful when tuning the rim and launch settings.
//!
//! Usage: cargo run --bin autoplay -- [OPTIONS]
//!
//! Options:
//!   --shots N     Number of shots to throw (default: 200)
//!   --seed S      RNG seed (default: 42)
//!   --config F    SimConfig JSON file (default: built-in settings)

use hoops_shared::protocol::{CanvasRect, InputMsg};
use hoops_sim::aim::pointer_for_aim;
use hoops_sim::config::SimConfig;
use hoops_sim::state::{GameState, ShotEvent};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const CANVAS: CanvasRect = CanvasRect {
    left: 0.0,
    top: 0.0,
    width: 1280.0,
    height: 480.0,
};

const FRAME_DT: f64 = 0.05;
const MAX_FRAMES_PER_SHOT: u32 = 2000;

/// Aim offsets sampled per shot, in world units.
const AIM_X_RANGE: (f64, f64) = (-1.5, 1.5);
const AIM_Y_RANGE: (f64, f64) = (0.0, 5.5);

#[derive(Default)]
struct Tally {
    baskets: u32,
    misses: u32,
    unsettled: u32,
    rounds: u32,
    first_scoring_aim: Option<(f64, f64)>,
}

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args: Vec<String> = std::env::args().collect();
    let mut shots: u32 = 200;
    let mut seed: u64 = 42;
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--shots" => {
                i += 1;
                shots = args.get(i).and_then(|s| s.parse().ok()).unwrap_or(200);
            }
            "--seed" => {
                i += 1;
                seed = args.get(i).and_then(|s| s.parse().ok()).unwrap_or(42);
            }
            "--config" => {
                i += 1;
                let Some(path) = args.get(i) else {
                    eprintln!("--config needs a path");
                    std::process::exit(1);
                };
                config = match SimConfig::load(path) {
                    Ok(config) => config,
                    Err(e) => {
                        eprintln!("Invalid configuration: {}", e);
                        std::process::exit(1);
                    }
                };
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    println!("=== Hoops Autoplay ===");
    println!("Shots: {}", shots);
    println!("Seed: {}", seed);
    println!(
        "Rim: center ({}, {}, {}), radius {}",
        config.scene.hoop.rim_center.x,
        config.scene.hoop.rim_center.y,
        config.scene.hoop.rim_center.z,
        config.scene.hoop.rim_radius
    );
    println!();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = GameState::new(config.scene.clone());
    state.bind_input();

    let mut tally = Tally {
        rounds: 1,
        ..Default::default()
    };

    for _ in 0..shots {
        let x = rng.gen_range(AIM_X_RANGE.0..=AIM_X_RANGE.1);
        let y = rng.gen_range(AIM_Y_RANGE.0..=AIM_Y_RANGE.1);

        state.handle_input(&InputMsg::Press);
        state.handle_input(&InputMsg::Move(pointer_for_aim(
            &config.scene.aim,
            CANVAS,
            x,
            y,
        )));
        state.handle_input(&InputMsg::Release);

        let mut settled = false;
        let mut round_over = false;
        for _ in 0..MAX_FRAMES_PER_SHOT {
            for event in state.advance(FRAME_DT) {
                match event {
                    ShotEvent::Scored { .. } => {
                        tally.baskets += 1;
                        tally.first_scoring_aim.get_or_insert((x, y));
                        settled = true;
                    }
                    ShotEvent::Missed => {
                        tally.misses += 1;
                        settled = true;
                    }
                    ShotEvent::TimeUp => round_over = true,
                    ShotEvent::Launched | ShotEvent::Discarded => {}
                }
            }
            if settled {
                break;
            }
        }
        if !settled {
            tally.unsettled += 1;
        }
        // Baskets after the buzzer count for nothing, so start a fresh round.
        if round_over {
            state.restart();
            tally.rounds += 1;
        }
    }

    let rate = if shots > 0 {
        100.0 * tally.baskets as f64 / shots as f64
    } else {
        0.0
    };

    println!("=== Results ===");
    println!("Baskets: {}", tally.baskets);
    println!("Misses: {}", tally.misses);
    println!("Unsettled: {}", tally.unsettled);
    println!("Basket rate: {:.1}%", rate);
    println!("Rounds played: {}", tally.rounds);
    println!("High score: {}", state.score().high());
    if let Some((x, y)) = tally.first_scoring_aim {
        println!("First scoring aim: ({:.3}, {:.3})", x, y);
    }
}
