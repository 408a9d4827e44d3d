//! First-person movement prototype.
//!
//! A physics-driven player on a flat test level. Click to capture the
//! pointer, WASD or arrow keys to move, space to jump, ESC to pause.

mod input;
mod launch_params;
mod player;
mod scene;

use avian3d::prelude::*;
use bevy::prelude::*;
use launch_params::LaunchParams;
use player::PlayerPlugin;
use scene::ScenePlugin;

/// Plugin for the main application.
pub struct AppPlugin {
    params: LaunchParams,
}

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.params.clone())
            .insert_resource(Time::<Fixed>::from_hz(self.params.physics_hz))
            .insert_resource(Gravity(Vec3::NEG_Y * self.params.gravity))
            .add_plugins(PhysicsPlugins::default())
            .add_plugins((ScenePlugin, PlayerPlugin));
    }
}

fn main() {
    // Initialize tracing for native platforms.
    #[cfg(not(target_family = "wasm"))]
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    // Initialize tracing for WASM (logs to browser console).
    #[cfg(target_family = "wasm")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }

    let params = launch_params::parse();
    tracing::info!("Launching with {params:?}");

    let mut app = App::new();

    #[allow(unused_mut)]
    let mut window = Window {
        title: "artemis".to_string(),
        resolution: (1280, 720).into(),
        position: WindowPosition::Centered(MonitorSelection::Primary),
        ..Default::default()
    };

    // WASM: Fit canvas to parent element and prevent browser event handling.
    #[cfg(target_family = "wasm")]
    {
        window.fit_canvas_to_parent = true;
        window.prevent_default_event_handling = true;
    }

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(window),
        ..Default::default()
    }));

    app.add_plugins(AppPlugin { params }).run();
}
