use serde::{Deserialize, Serialize};

use crate::scene::{default_layout, CameraConfig, DrawableId, DrawableLayout, Pose};
use crate::vec3::{self, vec3, Vec3};

/// Canvas line that `AimConfig::origin_y` is measured from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalReference {
    /// Top edge of the canvas
    #[default]
    Top,
    /// Vertical middle of the canvas
    Center,
}

/// Pointer-to-aim mapping and launch parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AimConfig {
    /// Horizontal divisor: canvas pixels per world unit of aim offset
    pub sensitivity_x: f64,
    /// Vertical divisor: canvas pixels per world unit of aim offset
    pub sensitivity_y: f64,
    /// Neutral line, in pixels below `vertical_reference`
    pub origin_y: f64,
    pub vertical_reference: VerticalReference,
    /// World position of the ball for a zero aim offset
    pub aim_origin: Vec3,
    pub launch_velocity: Vec3,
    /// rad/s
    pub launch_angular_speed: f64,
    pub launch_spin_axis: Vec3,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            sensitivity_x: 34.0,
            sensitivity_y: 33.0,
            origin_y: 183.0,
            vertical_reference: VerticalReference::Top,
            aim_origin: vec3(0.0, 1.0, -5.0),
            launch_velocity: vec3(0.0, 3.0, -4.5),
            launch_angular_speed: 0.5,
            launch_spin_axis: vec3(1.0, 0.0, 0.0),
        }
    }
}

impl AimConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.sensitivity_x.is_finite() || self.sensitivity_x <= 0.0 {
            return Err("sensitivity_x must be finite and > 0".to_string());
        }
        if !self.sensitivity_y.is_finite() || self.sensitivity_y <= 0.0 {
            return Err("sensitivity_y must be finite and > 0".to_string());
        }
        if !self.origin_y.is_finite() {
            return Err("origin_y must be finite".to_string());
        }
        if !vec3::is_finite(self.aim_origin) || !vec3::is_finite(self.launch_velocity) {
            return Err("aim_origin and launch_velocity must be finite".to_string());
        }
        if !self.launch_angular_speed.is_finite() {
            return Err("launch_angular_speed must be finite".to_string());
        }
        if vec3::length(self.launch_spin_axis) < 1e-9 {
            return Err("launch_spin_axis must be non-zero".to_string());
        }
        Ok(())
    }
}

/// Gravity and bounce tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhysicsConfig {
    /// Vertical acceleration (units/s²)
    pub gravity: f64,
    /// Ball center height at which the floor pushes back
    pub floor_contact_height: f64,
    /// Fraction of speed kept, direction reversed, on a bounce
    pub restitution: f64,
    /// Spin multiplier applied on a floor bounce
    pub spin_damping: f64,
    /// Ball center depth at which the back wall pushes back. None = no wall.
    pub back_wall_z: Option<f64>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -0.8,
            floor_contact_height: 1.0,
            restitution: 0.8,
            spin_damping: 0.8,
            back_wall_z: Some(-34.0),
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.gravity.is_finite() {
            return Err("gravity must be finite".to_string());
        }
        if !self.floor_contact_height.is_finite() {
            return Err("floor_contact_height must be finite".to_string());
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err("restitution must be in [0, 1]".to_string());
        }
        if !(0.0..=1.0).contains(&self.spin_damping) {
            return Err("spin_damping must be in [0, 1]".to_string());
        }
        if let Some(z) = self.back_wall_z {
            if !z.is_finite() {
                return Err("back_wall_z must be finite".to_string());
            }
        }
        Ok(())
    }
}

/// Hoop placement and the rim volume used for basket detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HoopConfig {
    /// Anchor of the hoop model
    pub position: Vec3,
    pub model_scale: Vec3,
    pub rim_center: Vec3,
    pub rim_radius: f64,
    pub points_per_basket: u32,
}

impl Default for HoopConfig {
    fn default() -> Self {
        Self {
            position: vec3(0.0, 15.35, -23.5),
            model_scale: vec3(1.3, 1.15, 1.3),
            rim_center: vec3(0.0, 10.0, -23.5),
            rim_radius: 1.5,
            points_per_basket: 2,
        }
    }
}

impl HoopConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !vec3::is_finite(self.position) || !vec3::is_finite(self.rim_center) {
            return Err("hoop position and rim_center must be finite".to_string());
        }
        if !self.rim_radius.is_finite() || self.rim_radius <= 0.0 {
            return Err("rim_radius must be finite and > 0".to_string());
        }
        Ok(())
    }
}

/// Round clock constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClockConfig {
    /// Clock ticks accumulated per second of frame time
    pub tick_scale: f64,
    /// Clock ticks per displayed second
    pub ticks_per_second: f64,
    pub duration_seconds: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_scale: 20.0,
            ticks_per_second: 120.0,
            duration_seconds: 120,
        }
    }
}

impl ClockConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.tick_scale.is_finite() || self.tick_scale <= 0.0 {
            return Err("tick_scale must be finite and > 0".to_string());
        }
        if !self.ticks_per_second.is_finite() || self.ticks_per_second <= 0.0 {
            return Err("ticks_per_second must be finite and > 0".to_string());
        }
        Ok(())
    }
}

/// Fixed-step integration settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StepperConfig {
    /// Size of one integration step (seconds)
    pub step_seconds: f64,
    /// Longest frame time fed to the accumulator (seconds)
    pub max_frame_seconds: f64,
    /// Multiplier on frame time
    pub simulation_speed: f64,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            step_seconds: 1.0 / 20.0,
            max_frame_seconds: 0.1,
            simulation_speed: 1.0,
        }
    }
}

impl StepperConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.step_seconds.is_finite() || self.step_seconds <= 0.0 {
            return Err("step_seconds must be finite and > 0".to_string());
        }
        if !self.max_frame_seconds.is_finite() || self.max_frame_seconds < self.step_seconds {
            return Err("max_frame_seconds must be finite and >= step_seconds".to_string());
        }
        if !self.simulation_speed.is_finite() || self.simulation_speed < 0.0 {
            return Err("simulation_speed must be finite and >= 0".to_string());
        }
        Ok(())
    }
}

/// Everything that varies between court setups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneConfig {
    pub aim: AimConfig,
    pub physics: PhysicsConfig,
    pub hoop: HoopConfig,
    pub clock: ClockConfig,
    pub stepper: StepperConfig,
    pub camera: CameraConfig,
    pub layout: Vec<DrawableLayout>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            aim: AimConfig::default(),
            physics: PhysicsConfig::default(),
            hoop: HoopConfig::default(),
            clock: ClockConfig::default(),
            stepper: StepperConfig::default(),
            camera: CameraConfig::default(),
            layout: default_layout(),
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.aim.validate()?;
        self.physics.validate()?;
        self.hoop.validate()?;
        self.clock.validate()?;
        self.stepper.validate()?;
        self.camera.validate()?;
        if let Some(d) = self
            .layout
            .iter()
            .find(|d| matches!(d.id, DrawableId::Ball | DrawableId::Hoop))
        {
            return Err(format!("layout must not place {:?}", d.id));
        }
        Ok(())
    }

    /// Static drawables: the court layout followed by the hoop.
    pub fn static_drawables(&self) -> Vec<DrawableLayout> {
        let mut drawables = self.layout.clone();
        drawables.push(DrawableLayout {
            id: DrawableId::Hoop,
            pose: Pose::at(self.hoop.position).scaled(self.hoop.model_scale),
        });
        drawables
    }
}
