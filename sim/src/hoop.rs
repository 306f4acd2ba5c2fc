use hoops_shared::config::HoopConfig;
use hoops_shared::vec3::{horizontal_distance, lerp, Vec3};

/// Rim volume used for basket detection. The rim is a horizontal disc.
#[derive(Debug, Clone, Copy)]
pub struct Rim {
    center: Vec3,
    radius: f64,
}

impl Rim {
    pub fn new(config: &HoopConfig) -> Self {
        Self {
            center: config.rim_center,
            radius: config.rim_radius,
        }
    }

    /// Whether a ball moving from `from` to `to` during one step drops
    /// through the rim: it crosses the rim plane going down, and the
    /// crossing point lies inside the rim radius.
    pub fn is_basket(&self, from: Vec3, to: Vec3) -> bool {
        let rim_y = self.center.y;
        if !(from.y >= rim_y && to.y < rim_y) {
            return false;
        }
        let t = (from.y - rim_y) / (from.y - to.y);
        let crossing = lerp(from, to, t);
        horizontal_distance(crossing, self.center) <= self.radius
    }
}
