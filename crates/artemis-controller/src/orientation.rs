//! Yaw/pitch accumulation and the derived view rotation.

use std::f32::consts::FRAC_PI_2;

use glam::{EulerRot, Quat, Vec3};

/// Radians per unit of pointer delta at sensitivity 1.
pub const LOOK_SCALE: f32 = 0.001;

/// Direction the view faces with zero yaw and pitch.
pub const FORWARD: Vec3 = Vec3::NEG_Z;

/// Accumulated look angles in radians.
///
/// Pitch is clamped to `[-π/2, π/2]` after every mutation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    yaw: f32,
    pitch: f32,
}

impl Orientation {
    /// Create an orientation, clamping `pitch`.
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch: clamp_pitch(pitch),
        }
    }

    /// Horizontal look angle around +Y.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Vertical look angle around +X.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Apply filtered pointer deltas.
    ///
    /// Moving the pointer right or down turns the view right or down.
    pub fn apply_look(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.yaw -= dx * LOOK_SCALE * sensitivity;
        self.pitch = clamp_pitch(self.pitch - dy * LOOK_SCALE * sensitivity);
    }

    /// Rotation built from `(pitch, yaw, 0)` applied in X, Y, Z order.
    ///
    /// Recomputed on every call so it always reflects the latest angles.
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, 0.0)
    }

    /// Unit vector the view is facing.
    pub fn forward(&self) -> Vec3 {
        self.rotation() * FORWARD
    }
}

fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(-FRAC_PI_2, FRAC_PI_2)
}
