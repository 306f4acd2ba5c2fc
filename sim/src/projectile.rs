use hoops_shared::config::PhysicsConfig;
use hoops_shared::scene::Pose;
use hoops_shared::vec3::{add, lerp, scale, Vec3};

/// The launched ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub position: Vec3,
    pub linear_velocity: Vec3,
    /// rad/s about `spin_axis`
    pub angular_velocity: f64,
    pub spin_axis: Vec3,
    /// Accumulated rotation about `spin_axis` (radians)
    pub spin_angle: f64,
}

/// Boundary contacts resolved during one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub floor: bool,
    pub back_wall: bool,
}

impl Projectile {
    pub fn new(position: Vec3, linear_velocity: Vec3, angular_velocity: f64, spin_axis: Vec3) -> Self {
        Self {
            position,
            linear_velocity,
            angular_velocity,
            spin_axis,
            spin_angle: 0.0,
        }
    }

    /// Pose between `previous` and `self`; alpha=0 is `previous`.
    pub fn blended_pose(&self, previous: &Projectile, alpha: f64) -> Pose {
        let angle = previous.spin_angle + alpha * (self.spin_angle - previous.spin_angle);
        Pose::at(lerp(previous.position, self.position, alpha)).rotated(self.spin_axis, angle)
    }
}

/// Advance the projectile by one step of `dt` seconds.
///
/// Velocity is updated first (gravity, then bounces), then the pose moves
/// with the new velocity.
pub fn integrate(ball: &mut Projectile, dt: f64, physics: &PhysicsConfig) -> Contacts {
    let mut contacts = Contacts::default();

    ball.linear_velocity.y += dt * physics.gravity;

    if ball.position.y < physics.floor_contact_height && ball.linear_velocity.y < 0.0 {
        ball.linear_velocity.y *= -physics.restitution;
        ball.angular_velocity *= physics.spin_damping;
        contacts.floor = true;
    }

    if let Some(wall_z) = physics.back_wall_z {
        if ball.position.z < wall_z && ball.linear_velocity.z < 0.0 {
            ball.linear_velocity.z *= -physics.restitution;
            contacts.back_wall = true;
        }
    }

    ball.position = add(ball.position, scale(ball.linear_velocity, dt));
    ball.spin_angle += ball.angular_velocity * dt;

    contacts
}
