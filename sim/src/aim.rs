use hoops_shared::config::{AimConfig, VerticalReference};
use hoops_shared::protocol::{CanvasRect, PointerMoveMsg};
use hoops_shared::vec3::{add, normalize, vec3, Vec3};

use crate::projectile::Projectile;

/// Mapped pointer position, in world units of aim offset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub is_down: bool,
    pub x: f64,
    pub y: f64,
    pub last_x: f64,
    pub last_y: f64,
}

/// Where the ball sits while it is being aimed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimTransform {
    pub position: Vec3,
}

/// Pointer input to aim and launch flags.
///
/// Input callbacks only write the pointer state and the `launched` flag.
/// The simulation reads them on its next step.
#[derive(Debug, Clone)]
pub struct AimController {
    config: AimConfig,
    pointer: PointerState,
    launched: bool,
    presses: u64,
}

impl AimController {
    pub fn new(config: AimConfig) -> Self {
        Self {
            config,
            pointer: PointerState::default(),
            launched: false,
            presses: 0,
        }
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn is_launched(&self) -> bool {
        self.launched
    }

    /// Number of presses so far. Identifies the current aim cycle.
    pub fn press_count(&self) -> u64 {
        self.presses
    }

    /// Button down: start a new aim cycle.
    pub fn press(&mut self) {
        self.pointer.is_down = true;
        self.launched = false;
        self.presses += 1;
    }

    /// Pointer moved. Ignored unless the button is held.
    pub fn pointer_move(&mut self, msg: &PointerMoveMsg) {
        if !self.pointer.is_down {
            return;
        }
        let (x, y) = map_pointer(&self.config, msg);
        self.pointer.x = x;
        self.pointer.y = y;
    }

    /// Button up: hand the aimed ball to the integrator.
    /// Returns false for a release without a matching press.
    pub fn release(&mut self) -> bool {
        if !self.pointer.is_down {
            return false;
        }
        self.pointer.is_down = false;
        self.launched = true;
        true
    }

    /// Remember the current position as the previous one.
    pub fn end_step(&mut self) {
        self.pointer.last_x = self.pointer.x;
        self.pointer.last_y = self.pointer.y;
    }

    pub fn reset(&mut self) {
        self.pointer = PointerState::default();
        self.launched = false;
    }

    /// Aim placement. The ball never goes below the aim origin's height.
    pub fn aim_transform(&self) -> AimTransform {
        let offset = vec3(self.pointer.x, self.pointer.y.max(0.0), 0.0);
        AimTransform {
            position: add(self.config.aim_origin, offset),
        }
    }

    /// Projectile spawned at the current aim with the configured launch.
    pub fn launch_projectile(&self) -> Projectile {
        Projectile::new(
            self.aim_transform().position,
            self.config.launch_velocity,
            self.config.launch_angular_speed,
            normalize(self.config.launch_spin_axis),
        )
    }
}

/// Canvas line the vertical pointer offset is measured from.
fn reference_y(config: &AimConfig, canvas: &CanvasRect) -> f64 {
    match config.vertical_reference {
        VerticalReference::Top => canvas.top,
        VerticalReference::Center => canvas.center_y(),
    }
}

/// Affine map from client pixels to aim offset.
pub fn map_pointer(config: &AimConfig, msg: &PointerMoveMsg) -> (f64, f64) {
    let local_y = msg.client_y - reference_y(config, &msg.canvas);
    let x = (msg.client_x - msg.canvas.center_x()) / config.sensitivity_x;
    let y = (config.origin_y - local_y) / config.sensitivity_y;
    (x, y)
}

/// Client point that `map_pointer` sends to the aim offset `(x, y)`.
pub fn pointer_for_aim(config: &AimConfig, canvas: CanvasRect, x: f64, y: f64) -> PointerMoveMsg {
    PointerMoveMsg {
        client_x: canvas.center_x() + x * config.sensitivity_x,
        client_y: reference_y(config, &canvas) + config.origin_y - y * config.sensitivity_y,
        canvas,
    }
}
