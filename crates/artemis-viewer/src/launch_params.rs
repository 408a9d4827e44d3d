//! Launch parameter parsing for the viewer.
//!
//! On native, parameters are parsed from command-line arguments using clap,
//! optionally layered over a JSON controller config file. On WASM, defaults
//! are used (CLI argument parsing is not available).

use artemis_controller::ControllerConfig;
use bevy::prelude::*;

/// Default horizontal speed in m/s.
const DEFAULT_MOVE_SPEED: f32 = 5.0;
/// Default jump take-off speed in m/s.
const DEFAULT_JUMP_SPEED: f32 = 5.0;
/// Default player height in meters.
const DEFAULT_PLAYER_HEIGHT: f32 = 1.8;
/// Default downward gravity in m/s².
const DEFAULT_GRAVITY: f32 = 12.0;
/// Default physics tick rate in Hz.
const DEFAULT_PHYSICS_HZ: f64 = 144.0;

/// Launch parameters for the viewer.
#[derive(Resource, Debug, Clone)]
pub struct LaunchParams {
    /// Controller tunables.
    pub controller: ControllerConfig,
    /// Player height in meters. The player body is a sphere of this diameter.
    pub player_height: f32,
    /// Downward gravity in m/s².
    pub gravity: f32,
    /// Fixed physics tick rate in Hz.
    pub physics_hz: f64,
}

impl Default for LaunchParams {
    fn default() -> Self {
        Self {
            controller: ControllerConfig {
                move_speed: DEFAULT_MOVE_SPEED,
                jump_speed: DEFAULT_JUMP_SPEED,
                eye_height: DEFAULT_PLAYER_HEIGHT,
                sensitivity: ControllerConfig::default().sensitivity,
            },
            player_height: DEFAULT_PLAYER_HEIGHT,
            gravity: DEFAULT_GRAVITY,
            physics_hz: DEFAULT_PHYSICS_HZ,
        }
    }
}

/// Parse a controller config from JSON text.
#[cfg_attr(target_family = "wasm", allow(dead_code))]
fn parse_config_json(text: &str) -> Result<ControllerConfig, String> {
    serde_json::from_str(text).map_err(|e| format!("invalid controller config: {e}"))
}

#[cfg(not(target_family = "wasm"))]
mod native {
    use std::path::PathBuf;

    use clap::{CommandFactory, Parser, error::ErrorKind};

    use super::*;

    /// Read and parse a JSON controller config file.
    fn load_config_file(path: &str) -> Result<ControllerConfig, String> {
        let path = PathBuf::from(path);
        let text = std::fs::read_to_string(&path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        parse_config_json(&text)
    }

    #[derive(Parser)]
    #[command(about = "First-person movement prototype")]
    struct CliArgs {
        /// JSON file with controller settings. Flags below override it.
        #[arg(long, value_parser = load_config_file)]
        config: Option<ControllerConfig>,

        /// Horizontal speed in m/s.
        #[arg(long)]
        move_speed: Option<f32>,

        /// Jump take-off speed in m/s.
        #[arg(long)]
        jump_speed: Option<f32>,

        /// Look sensitivity multiplier.
        #[arg(long)]
        sensitivity: Option<f32>,

        /// Player height in meters. Also sets the controller eye height.
        #[arg(long)]
        player_height: Option<f32>,

        /// Downward gravity in m/s².
        #[arg(long, default_value_t = DEFAULT_GRAVITY)]
        gravity: f32,

        /// Physics tick rate in Hz.
        #[arg(long, default_value_t = DEFAULT_PHYSICS_HZ)]
        physics_hz: f64,
    }

    pub fn parse() -> LaunchParams {
        match resolve(CliArgs::parse()) {
            Ok(params) => params,
            Err(e) => CliArgs::command()
                .error(ErrorKind::ValueValidation, e)
                .exit(),
        }
    }

    /// Layer the override flags over the config file (or the defaults).
    fn resolve(args: CliArgs) -> Result<LaunchParams, String> {
        let defaults = LaunchParams::default();

        let mut controller = args.config.unwrap_or(defaults.controller);
        if let Some(player_height) = args.player_height {
            controller.eye_height = player_height;
        }
        if let Some(move_speed) = args.move_speed {
            controller.move_speed = move_speed;
        }
        if let Some(jump_speed) = args.jump_speed {
            controller.jump_speed = jump_speed;
        }
        if let Some(sensitivity) = args.sensitivity {
            controller.sensitivity = sensitivity;
        }
        controller.validate().map_err(|e| e.to_string())?;

        if !(args.physics_hz.is_finite() && args.physics_hz > 0.0) {
            return Err(format!(
                "physics-hz must be positive, got {}",
                args.physics_hz
            ));
        }

        Ok(LaunchParams {
            controller,
            player_height: args.player_height.unwrap_or(defaults.player_height),
            gravity: args.gravity,
            physics_hz: args.physics_hz,
        })
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn args(config: Option<ControllerConfig>, player_height: Option<f32>) -> CliArgs {
            CliArgs {
                config,
                move_speed: None,
                jump_speed: None,
                sensitivity: None,
                player_height,
                gravity: DEFAULT_GRAVITY,
                physics_hz: DEFAULT_PHYSICS_HZ,
            }
        }

        #[test]
        fn test_player_height_overrides_config_eye_height() {
            let config = parse_config_json("{ \"move_speed\": 7.0 }").unwrap();
            let params = resolve(args(Some(config), Some(1.5))).unwrap();
            assert_eq!(params.player_height, 1.5);
            assert_eq!(params.controller.eye_height, 1.5);
            assert_eq!(params.controller.move_speed, 7.0);
        }

        #[test]
        fn test_config_eye_height_kept_without_flag() {
            let config = parse_config_json("{ \"eye_height\": 2.5 }").unwrap();
            let params = resolve(args(Some(config), None)).unwrap();
            assert_eq!(params.controller.eye_height, 2.5);
            assert_eq!(params.player_height, DEFAULT_PLAYER_HEIGHT);
        }

        #[test]
        fn test_invalid_override_is_rejected() {
            let mut bad = args(None, Some(-1.0));
            assert!(resolve(bad).is_err());
            bad = args(None, None);
            bad.physics_hz = 0.0;
            assert!(resolve(bad).is_err());
        }
    }
}

/// Parse launch parameters from CLI args (native) or use defaults (WASM).
pub fn parse() -> LaunchParams {
    #[cfg(not(target_family = "wasm"))]
    {
        native::parse()
    }
    #[cfg(target_family = "wasm")]
    {
        LaunchParams::default()
    }
}
