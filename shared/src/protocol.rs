use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::scene::{CameraConfig, DrawableLayout};

/// Protocol version - increment when making breaking changes.
pub const PROTOCOL_VERSION: u32 = 1;

// === Host -> Renderer ===

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../renderer/src/generated/")]
#[serde(tag = "type")]
pub enum HostMsg {
    #[serde(rename = "scene")]
    Scene(SceneMsg),
    #[serde(rename = "frame")]
    Frame(FrameMsg),
    #[serde(rename = "shot")]
    Shot(ShotMsg),
}

/// Sent once before the first frame.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../renderer/src/generated/")]
#[serde(rename_all = "camelCase")]
pub struct SceneMsg {
    pub protocol_version: u32,
    pub camera: CameraConfig,
    pub drawables: Vec<DrawableLayout>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../renderer/src/generated/")]
#[serde(rename_all = "snake_case")]
pub enum PhaseWire {
    Idle,
    Aiming,
    InFlight,
    Scored,
    Missed,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../renderer/src/generated/")]
#[serde(rename_all = "camelCase")]
pub struct BallPoseWire {
    pub pos: [f64; 3],
    pub axis: [f64; 3],
    pub angle: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../renderer/src/generated/")]
#[serde(rename_all = "camelCase")]
pub struct FrameMsg {
    pub tick: u64,
    pub phase: PhaseWire,
    pub ball: BallPoseWire,
    pub time_text: String,
    pub score_text: String,
    pub high_score_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../renderer/src/generated/")]
#[serde(rename_all = "snake_case")]
pub enum ShotKind {
    Launched,
    Discarded,
    Scored,
    Missed,
    TimeUp,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../renderer/src/generated/")]
#[serde(rename_all = "camelCase")]
pub struct ShotMsg {
    pub kind: ShotKind,
    /// Points awarded by this event
    #[serde(default)]
    pub points: u32,
    pub score: u32,
    pub high_score: u32,
}

// === Input -> Host ===

/// Canvas bounds in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../renderer/src/generated/")]
pub struct CanvasRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CanvasRect {
    pub fn center_x(&self) -> f64 {
        self.left + self.width * 0.5
    }

    pub fn center_y(&self) -> f64 {
        self.top + self.height * 0.5
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../renderer/src/generated/")]
#[serde(rename_all = "camelCase")]
pub struct PointerMoveMsg {
    pub client_x: f64,
    pub client_y: f64,
    pub canvas: CanvasRect,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../renderer/src/generated/")]
#[serde(tag = "type")]
pub enum InputMsg {
    #[serde(rename = "press")]
    Press,
    #[serde(rename = "move")]
    Move(PointerMoveMsg),
    #[serde(rename = "release")]
    Release,
    #[serde(rename = "restart")]
    Restart,
}

// === Conversion helpers ===

/// Round to 4 decimal places
#[inline]
pub fn round4(v: f64) -> f64 {
    (v * 10000.0).round() / 10000.0
}
