//! Test level: a ground plane, a crate, lights, and the player.

use avian3d::prelude::*;
use bevy::light::light_consts::lux;
use bevy::prelude::*;

use crate::launch_params::LaunchParams;
use crate::player::{PlayerBody, ViewPitch, ViewRoot};

/// Side length of the visible ground plane in meters.
const GROUND_SIZE: f32 = 2000.0;
/// Side length of the crate in meters.
const CRATE_SIZE: f32 = 2.0;
/// Mass of the player body in kg.
const PLAYER_MASS: f32 = 50.0;

const SKY_COLOR: Color = Color::srgb(0.741, 0.902, 1.0);
const GROUND_COLOR: Color = Color::srgb(0.51, 0.667, 0.078);
const SUN_COLOR: Color = Color::srgb(0.992, 0.984, 0.827);

/// Plugin that builds the test level.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(SKY_COLOR))
            .add_systems(Startup, setup_scene);
    }
}

fn setup_scene(
    mut commands: Commands,
    params: Res<LaunchParams>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Sun. Direction sets the shadow direction.
    commands.spawn((
        DirectionalLight {
            color: SUN_COLOR,
            illuminance: lux::OVERCAST_DAY,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(5.0, 3.75, 3.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Ground.
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: GROUND_COLOR,
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::default(),
        RigidBody::Static,
        Collider::half_space(Vec3::Y),
    ));

    // A crate to jump onto.
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(CRATE_SIZE, CRATE_SIZE, CRATE_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            ..default()
        })),
        Transform::from_xyz(3.0, CRATE_SIZE / 2.0, 3.0),
        RigidBody::Static,
        Collider::cuboid(CRATE_SIZE, CRATE_SIZE, CRATE_SIZE),
    ));

    // Player body. Zero friction so the controller fully owns planar velocity.
    let radius = params.player_height / 2.0;
    commands.spawn((
        PlayerBody,
        Transform::from_xyz(0.0, radius, 0.0),
        RigidBody::Dynamic,
        Collider::sphere(radius),
        Mass(PLAYER_MASS),
        Friction::new(0.0).with_combine_rule(CoefficientCombine::Min),
        LockedAxes::ROTATION_LOCKED,
    ));

    // View rig: yaw root -> pitch node -> camera at eye level.
    commands
        .spawn((
            ViewRoot,
            Transform::from_xyz(0.0, params.controller.eye_height, 0.0),
            Visibility::default(),
        ))
        .with_children(|root| {
            root.spawn((ViewPitch, Transform::default(), Visibility::default()))
                .with_children(|pitch| {
                    pitch.spawn((
                        Camera3d::default(),
                        Projection::Perspective(PerspectiveProjection {
                            fov: 70.0_f32.to_radians(),
                            near: 0.1,
                            far: 1000.0,
                            ..default()
                        }),
                        Transform::from_translation(camera_offset(params.player_height)),
                    ));
                });
        });

    tracing::info!("Scene setup complete - click to play, WASD to move, space to jump");
}

/// Camera position relative to the pitch node, which follows the body center.
fn camera_offset(player_height: f32) -> Vec3 {
    Vec3::new(0.0, player_height, 0.0)
}
