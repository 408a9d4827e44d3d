//! Per-frame velocity integration.
//!
//! Pure functions so the math can be checked without a body or a host.

use glam::{Quat, Vec3};

use crate::input::MoveFlags;

/// Local-space move intent: `x = right - left`, `z = backward - forward`.
///
/// Unit length when any axis is non-zero, exactly zero otherwise.
pub fn planar_intent(flags: MoveFlags) -> Vec3 {
    let intent = Vec3::new(
        axis(flags.right, flags.left),
        0.0,
        axis(flags.backward, flags.forward),
    );
    intent.normalize_or_zero()
}

fn axis(positive: bool, negative: bool) -> f32 {
    f32::from(u8::from(positive)) - f32::from(u8::from(negative))
}

/// World-space movement velocity for the held keys.
pub fn world_move_velocity(flags: MoveFlags, rotation: Quat, move_speed: f32) -> Vec3 {
    rotation * (planar_intent(flags) * move_speed)
}

/// Body velocity after applying the move velocity.
///
/// X and Z are overwritten. Y stays with the physics engine.
pub fn apply_planar(velocity: Vec3, movement: Vec3) -> Vec3 {
    Vec3::new(movement.x, velocity.y, movement.z)
}

/// Body velocity after a jump take-off.
pub fn apply_jump(velocity: Vec3, jump_speed: f32) -> Vec3 {
    Vec3::new(velocity.x, jump_speed, velocity.z)
}
