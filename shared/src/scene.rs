use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::vec3::{length, vec3, Vec3};

/// Every entity the renderer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../renderer/src/generated/")]
#[serde(rename_all = "snake_case")]
pub enum DrawableId {
    Ball,
    Hoop,
    Scoreboard,
    Ground,
    LeftWall,
    RightWall,
    BackWall,
}

/// Placement of a drawable: translate, then rotate `angle` radians about
/// `axis`, then scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../renderer/src/generated/")]
pub struct Pose {
    pub translation: Vec3,
    pub axis: Vec3,
    pub angle: f64,
    pub scale: Vec3,
}

impl Pose {
    pub const fn at(translation: Vec3) -> Self {
        Self {
            translation,
            axis: vec3(1.0, 0.0, 0.0),
            angle: 0.0,
            scale: vec3(1.0, 1.0, 1.0),
        }
    }

    pub fn rotated(mut self, axis: Vec3, angle: f64) -> Self {
        self.axis = axis;
        self.angle = angle;
        self
    }

    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../renderer/src/generated/")]
#[serde(rename_all = "camelCase")]
pub struct DrawableLayout {
    pub id: DrawableId,
    pub pose: Pose,
}

/// Look-at camera and perspective projection handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../renderer/src/generated/")]
#[serde(rename_all = "camelCase", default)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view (radians)
    pub fov_y: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: vec3(0.0, 9.0, 17.0),
            target: vec3(0.0, 5.0, -20.0),
            up: vec3(0.0, 1.0, 0.0),
            fov_y: std::f64::consts::FRAC_PI_4,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), String> {
        if length(self.up) < 1e-9 {
            return Err("camera up vector must be non-zero".to_string());
        }
        if self.eye == self.target {
            return Err("camera eye and target must differ".to_string());
        }
        if !self.fov_y.is_finite() || self.fov_y <= 0.0 || self.fov_y >= std::f64::consts::PI {
            return Err("camera fov_y must be in (0, PI)".to_string());
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err("camera clip planes must satisfy 0 < near < far".to_string());
        }
        Ok(())
    }
}

/// Court geometry: ground, side walls, back wall and scoreboard.
/// The hoop is placed from `HoopConfig`.
pub fn default_layout() -> Vec<DrawableLayout> {
    use std::f64::consts::FRAC_PI_2;
    let inv_sqrt3 = 1.0 / 3.0_f64.sqrt();

    vec![
        DrawableLayout {
            id: DrawableId::Ground,
            // Quarter turn about Y followed by a quarter turn about X.
            pose: Pose::at(Vec3::ZERO)
                .rotated(
                    vec3(inv_sqrt3, inv_sqrt3, -inv_sqrt3),
                    2.0 * std::f64::consts::FRAC_PI_3,
                )
                .scaled(vec3(35.0, 25.0, 1.0)),
        },
        DrawableLayout {
            id: DrawableId::LeftWall,
            pose: Pose::at(vec3(25.0, 15.0, 0.0))
                .rotated(vec3(0.0, 1.0, 0.0), FRAC_PI_2)
                .scaled(vec3(35.0, 15.0, 0.0)),
        },
        DrawableLayout {
            id: DrawableId::RightWall,
            pose: Pose::at(vec3(-25.0, 15.0, 0.0))
                .rotated(vec3(0.0, 1.0, 0.0), FRAC_PI_2)
                .scaled(vec3(35.0, 15.0, 0.0)),
        },
        DrawableLayout {
            id: DrawableId::BackWall,
            pose: Pose::at(vec3(0.0, 15.0, -35.0)).scaled(vec3(25.0, 15.0, 0.0)),
        },
        DrawableLayout {
            id: DrawableId::Scoreboard,
            pose: Pose::at(vec3(-17.0, 20.0, -35.0)).scaled(vec3(7.0, 4.0, 0.25)),
        },
    ]
}
