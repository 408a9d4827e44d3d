//! Bevy and Avian integration for the first-person controller.
//!
//! The controller itself is engine-agnostic. This module feeds it Bevy input,
//! mirrors the Avian player body into a [`BodyProxy`], and copies the results
//! back onto the physics body and the camera rig. Everything runs in `Update`,
//! which comes after the fixed physics step and before rendering.

use artemis_controller::{
    BodyId, BodyProxy, CollisionEvent, FirstPersonController, InputEvent, LockRequest,
    QueuedInputHost,
};
use avian3d::prelude::*;
use bevy::{
    input::{ButtonState, keyboard::KeyboardInput, mouse::MouseMotion},
    prelude::*,
    window::{CursorOptions, PrimaryWindow},
};
use leafwing_input_manager::prelude::*;

use crate::input::{
    CursorAction, controller_key, default_cursor_input_map, is_grabbed, set_cursor_grab,
};
use crate::launch_params::LaunchParams;

/// Marker component for the player's rigid body.
#[derive(Component)]
pub struct PlayerBody;

/// Marker component for the yaw root of the view rig.
#[derive(Component)]
pub struct ViewRoot;

/// Marker component for the pitch node of the view rig.
#[derive(Component)]
pub struct ViewPitch;

/// The controller, driving the player body.
#[derive(Resource, Deref, DerefMut)]
pub struct PlayerController(pub FirstPersonController<BodyProxy, QueuedInputHost>);

/// Plugin that wires the controller into the app.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<CursorAction>::default())
            .add_systems(PostStartup, spawn_controller)
            .add_systems(
                Update,
                (
                    pull_body_state,
                    forward_contacts,
                    forward_input,
                    apply_lock_requests,
                    run_controller,
                    push_body_state,
                    sync_view_rig,
                    sync_physics_pause,
                )
                    .chain()
                    .run_if(resource_exists::<PlayerController>),
            );
    }
}

// ============================================================================
// Setup
// ============================================================================

fn spawn_controller(
    mut commands: Commands,
    params: Res<LaunchParams>,
    player: Single<(Entity, &Transform), With<PlayerBody>>,
) -> Result {
    let (entity, transform) = *player;
    let body = BodyProxy::new(BodyId(entity.to_bits()), transform.translation);

    let mut controller =
        FirstPersonController::new(params.controller, body, QueuedInputHost::new())?;
    controller.on_lock(|| tracing::info!("Pointer locked - press ESC to pause"));
    controller.on_unlock(|| tracing::info!("Paused - click to resume"));

    commands.insert_resource(PlayerController(controller));
    commands.spawn((
        default_cursor_input_map(),
        ActionState::<CursorAction>::default(),
    ));
    Ok(())
}

// ============================================================================
// Physics body mirroring
// ============================================================================

/// Copy the player body's simulated state into the proxy.
fn pull_body_state(
    mut controller: ResMut<PlayerController>,
    player: Single<(&Position, &LinearVelocity), With<PlayerBody>>,
) {
    let (position, velocity) = *player;
    let body = controller.body_mut();
    body.position = position.0;
    body.velocity = velocity.0;
}

/// Report every touching contact manifold of the player as a collision event.
///
/// Avian keeps reporting a contact for as long as the bodies touch, which keeps
/// the ground latch asserted while standing.
fn forward_contacts(
    mut controller: ResMut<PlayerController>,
    collisions: Collisions,
    player: Single<Entity, With<PlayerBody>>,
) {
    let player = *player;
    let body = controller.body_mut();
    for pair in collisions.collisions_with(player) {
        if !pair.is_touching() {
            continue;
        }
        for manifold in &pair.manifolds {
            body.emit_collision(&CollisionEvent {
                first: BodyId(pair.collider1.to_bits()),
                second: BodyId(pair.collider2.to_bits()),
                normal: manifold.normal,
            });
        }
    }
}

/// Write the proxy's velocity back onto the player body.
fn push_body_state(
    controller: Res<PlayerController>,
    mut velocity: Single<&mut LinearVelocity, With<PlayerBody>>,
) {
    velocity.0 = controller.body().velocity;
}

// ============================================================================
// Input
// ============================================================================

/// Queue keyboard and mouse events and handle lock/unlock actions.
fn forward_input(
    mut controller: ResMut<PlayerController>,
    mut keyboard_events: MessageReader<KeyboardInput>,
    mut mouse_events: MessageReader<MouseMotion>,
    action_query: Query<&ActionState<CursorAction>>,
) {
    if let Ok(action_state) = action_query.single() {
        if action_state.just_pressed(&CursorAction::Release) {
            controller.unlock();
        } else if action_state.just_pressed(&CursorAction::Grab) {
            controller.lock();
        }
    }

    let host = controller.host_mut();
    for event in keyboard_events.read() {
        let key = controller_key(event.key_code);
        host.push(match event.state {
            ButtonState::Pressed => InputEvent::KeyDown(key),
            ButtonState::Released => InputEvent::KeyUp(key),
        });
    }
    for event in mouse_events.read() {
        host.push(InputEvent::PointerMove {
            dx: event.delta.x,
            dy: event.delta.y,
        });
    }
}

/// Apply pending pointer lock requests and report lock changes back.
fn apply_lock_requests(
    mut controller: ResMut<PlayerController>,
    mut cursor: Single<&mut CursorOptions>,
    mut window: Single<&mut Window, With<PrimaryWindow>>,
    mut was_grabbed: Local<bool>,
) {
    let host = controller.host_mut();
    match host.take_lock_request() {
        Some(LockRequest::Acquire) if !window.focused => {
            host.push(InputEvent::PointerLockError);
        }
        Some(LockRequest::Acquire) => set_cursor_grab(&mut cursor, &mut window, true),
        Some(LockRequest::Release) => set_cursor_grab(&mut cursor, &mut window, false),
        None => {}
    }

    let grabbed = is_grabbed(&cursor);
    if grabbed != *was_grabbed {
        host.push(InputEvent::PointerLockChange { locked: grabbed });
        *was_grabbed = grabbed;
    }
}

// ============================================================================
// Frame update
// ============================================================================

fn run_controller(mut controller: ResMut<PlayerController>, time: Res<Time>) {
    controller.process_input();
    controller.update(time.delta_secs());
}

/// Copy the rig pose onto the camera hierarchy.
fn sync_view_rig(
    controller: Res<PlayerController>,
    mut root: Single<&mut Transform, (With<ViewRoot>, Without<ViewPitch>)>,
    mut pitch: Single<&mut Transform, (With<ViewPitch>, Without<ViewRoot>)>,
) {
    let rig = controller.object();
    root.translation = rig.translation();
    root.rotation = rig.yaw_rotation();
    pitch.rotation = rig.pitch_rotation();
}

/// Freeze the simulation while the controller is disabled.
fn sync_physics_pause(controller: Res<PlayerController>, mut time: ResMut<Time<Physics>>) {
    let enabled = controller.is_enabled();
    if enabled && time.is_paused() {
        time.unpause();
    } else if !enabled && !time.is_paused() {
        time.pause();
    }
}

#[cfg(test)]
mod tests {
    use artemis_controller::PhysicsBody;

    use super::*;

    fn app() -> App {
        let mut app = App::new();
        app.insert_resource(LaunchParams::default());
        app.world_mut()
            .spawn((PlayerBody, Transform::from_xyz(0.0, 0.9, 0.0)));
        app.add_systems(PostStartup, spawn_controller);
        app
    }

    #[test]
    fn test_spawn_controller_uses_player_entity() {
        let mut app = app();
        app.update();

        let player = app
            .world_mut()
            .query_filtered::<Entity, With<PlayerBody>>()
            .single(app.world())
            .unwrap();
        let controller = app.world().resource::<PlayerController>();
        assert_eq!(controller.body().id(), BodyId(player.to_bits()));
        assert_eq!(controller.body().position, Vec3::new(0.0, 0.9, 0.0));
        assert!(controller.is_connected());
        assert!(!controller.is_enabled());
    }
}
