//! Types shared by the simulation host and the renderer.

pub mod config;
pub mod protocol;
pub mod scene;
pub mod vec3;
