//! Controller configuration.
//!
//! Values are fixed at construction time and live as long as the controller.

use serde::{Deserialize, Serialize};

use crate::error::{ControllerError, Result};

/// Default horizontal speed in m/s.
pub const DEFAULT_MOVE_SPEED: f32 = 20.0;
/// Default jump take-off speed in m/s.
pub const DEFAULT_JUMP_SPEED: f32 = 20.0;
/// Default initial height of the view rig in meters.
pub const DEFAULT_EYE_HEIGHT: f32 = 2.0;
/// Default look sensitivity multiplier.
pub const DEFAULT_SENSITIVITY: f32 = 1.0;

/// Tunables for a [`FirstPersonController`](crate::FirstPersonController).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Planar speed written into the body's velocity while a move key is held.
    pub move_speed: f32,
    /// Vertical speed written into the body's velocity on a jump.
    pub jump_speed: f32,
    /// Height of the view rig before the first update moves it onto the body.
    pub eye_height: f32,
    /// Multiplier applied to pointer deltas before they turn into radians.
    pub sensitivity: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            jump_speed: DEFAULT_JUMP_SPEED,
            eye_height: DEFAULT_EYE_HEIGHT,
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }
}

impl ControllerConfig {
    /// Check that every field is finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("move_speed", self.move_speed),
            ("jump_speed", self.jump_speed),
            ("eye_height", self.eye_height),
            ("sensitivity", self.sensitivity),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ControllerError::InvalidConfig { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ControllerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_and_non_finite() {
        let config = ControllerConfig {
            jump_speed: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ControllerError::InvalidConfig {
                field: "jump_speed",
                value: 0.0
            })
        );

        let config = ControllerConfig {
            sensitivity: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ControllerError::InvalidConfig {
                field: "sensitivity",
                ..
            })
        ));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ControllerConfig =
            serde_json::from_str(r#"{ "move_speed": 5.0, "jump_speed": 5.0 }"#).unwrap();
        assert_eq!(config.move_speed, 5.0);
        assert_eq!(config.jump_speed, 5.0);
        assert_eq!(config.eye_height, DEFAULT_EYE_HEIGHT);
        assert_eq!(config.sensitivity, DEFAULT_SENSITIVITY);
    }
}
