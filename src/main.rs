//! Minimal demo scene for the fingerpointing controller.
//!
//! Run with: `cargo run`. Hold `B` to point; aim at the wall to see the
//! blocked signal engage. A stand-in host system logs every command the
//! controller emits.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy_fingerpoint::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(PhysicsPlugins::default())
        // The demo room is small; a shorter, slightly fatter probe reads
        // better against the nearby wall than the defaults.
        .insert_resource(PointingConfig {
            probe: ProbeSettings::new().with_max_distance(40.0).with_radius(0.25),
            ..Default::default()
        })
        .add_plugins(FingerPointingPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, (apply_host_commands, show_signals))
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Gameplay camera.
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 2.0, 6.0).looking_at(Vec3::new(0.0, 1.0, 0.0), Vec3::Y),
        PointingCamera,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4)),
    ));

    // Ground.
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(20.0, 20.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
        RigidBody::Static,
        Collider::cuboid(20.0, 0.1, 20.0),
    ));

    // A wall in front of the avatar to block the gesture against.
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(4.0, 3.0, 0.3))),
        MeshMaterial3d(materials.add(Color::srgb(0.6, 0.4, 0.3))),
        Transform::from_xyz(0.0, 1.5, -4.0),
        RigidBody::Static,
        Collider::cuboid(4.0, 3.0, 0.3),
    ));

    // The locally controlled avatar. Its own collider is excluded from the
    // obstruction probe.
    commands.spawn((
        Mesh3d(meshes.add(Capsule3d::new(0.4, 1.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.8, 0.7, 0.6))),
        Transform::from_xyz(0.0, 0.9, 0.0),
        RigidBody::Kinematic,
        Collider::capsule(0.4, 1.0),
        PointingAvatar,
        PointingSignals::default(),
    ));
}

/// Stand-in for a real animation layer: log the controller's commands.
fn apply_host_commands(mut host: MessageReader<PointingCommand>) {
    for command in host.read() {
        info!("host command: {:?}", command.kind);
    }
}

/// Log the blend signals whenever they change.
fn show_signals(signals: Query<&PointingSignals, Changed<PointingSignals>>) {
    for signals in &signals {
        debug!(
            "pitch {:.3} heading {:.3} blocked {} first_person {}",
            signals.pitch, signals.heading, signals.blocked, signals.first_person
        );
    }
}
