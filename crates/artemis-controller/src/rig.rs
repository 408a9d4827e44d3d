//! The node hierarchy the camera hangs from.

use glam::{Quat, Vec3};

use crate::orientation::Orientation;

/// Yaw root carrying position, with a pitch child the camera attaches to.
///
/// Scene integrations copy [`ViewRig::translation`] and
/// [`ViewRig::yaw_rotation`] onto the root node and
/// [`ViewRig::pitch_rotation`] onto its child.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewRig {
    translation: Vec3,
    orientation: Orientation,
}

impl ViewRig {
    /// Create a rig standing `eye_height` above the origin.
    pub fn new(eye_height: f32) -> Self {
        Self {
            translation: Vec3::new(0.0, eye_height, 0.0),
            orientation: Orientation::default(),
        }
    }

    /// Root position in world space.
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Rotation of the root node around +Y.
    pub fn yaw_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.orientation.yaw())
    }

    /// Rotation of the pitch node around +X, relative to the root.
    pub fn pitch_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.orientation.pitch())
    }

    /// Look angles applied to the rig.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub(crate) fn orientation_mut(&mut self) -> &mut Orientation {
        &mut self.orientation
    }

    pub(crate) fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
    }
}
