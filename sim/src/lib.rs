//! Basketball shot simulation.
//!
//! The core (`aim`, `projectile`, `stepper`, `hoop`, `clock`, `score`,
//! `state`, `render`) runs without any graphics context. `config` and
//! `game_loop` host it on a tokio task, and `bridge` connects that task to
//! JSON-lines streams for the binaries and tests.

pub mod aim;
pub mod bridge;
pub mod clock;
pub mod config;
pub mod game_loop;
pub mod hoop;
pub mod projectile;
pub mod render;
pub mod score;
pub mod state;
pub mod stepper;
