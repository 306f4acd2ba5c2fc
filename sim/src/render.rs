use hoops_shared::scene::{DrawableId, Pose};

use crate::state::GameState;

/// Renderer side of the frame hand-off.
pub trait PoseSink {
    /// False while the drawable's assets are still loading.
    fn is_ready(&self, id: DrawableId) -> bool;
    fn set_pose(&mut self, id: DrawableId, pose: Pose);
}

/// Push this frame's poses. Drawables that are not ready are skipped and
/// picked up on a later frame. Returns how many poses were delivered.
pub fn publish(state: &GameState, sink: &mut impl PoseSink) -> usize {
    let mut delivered = 0;

    let ball = (DrawableId::Ball, state.ball_pose());
    let statics = state
        .config
        .static_drawables()
        .into_iter()
        .map(|d| (d.id, d.pose));

    for (id, pose) in std::iter::once(ball).chain(statics) {
        if sink.is_ready(id) {
            sink.set_pose(id, pose);
            delivered += 1;
        }
    }

    delivered
}
