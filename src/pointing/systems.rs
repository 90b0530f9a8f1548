use avian3d::prelude::*;
use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::angles::{heading_signal, pitch_signal, wrap_degrees};
use crate::error::StartError;
use crate::probe;

use super::components::{
    CameraViewMode, InVehicle, PointingAvatar, PointingCamera, PointingCommand,
    PointingCommandKind, PointingSignals, Ragdolled,
};
use super::session::{PointingSession, StopOutcome};
use super::PointingConfig;

/// The in-flight animation load for a pending start, tagged with the
/// generation of the start that requested it.
#[derive(Resource, Default)]
pub(crate) struct PendingAnimation(Option<PendingLoad>);

struct PendingLoad {
    handle: Handle<AnimationClip>,
    generation: u32,
}

type AvatarQuery<'w, 's> =
    Query<'w, 's, (Entity, Has<Ragdolled>, Has<InVehicle>), With<PointingAvatar>>;

/// System translating the configured key-hold into start/stop calls.
pub(crate) fn handle_pointing_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<PointingConfig>,
    asset_server: Res<AssetServer>,
    mut session: ResMut<PointingSession>,
    mut pending: ResMut<PendingAnimation>,
    avatars: AvatarQuery,
    mut host: MessageWriter<PointingCommand>,
) {
    if keyboard.just_pressed(config.keybind) {
        // Reentrant starts are rejected by the session itself.
        if let Some(generation) = session.begin_start() {
            let handle: Handle<AnimationClip> = asset_server.load(config.animation.clone());
            pending.0 = Some(PendingLoad { handle, generation });
        }
    }

    if keyboard.just_released(config.keybind) {
        stop_pointing(&mut session, &mut pending, &avatars, &mut host);
    }
}

/// System polling the pending animation load and attaching the task once
/// the asset is resident.
pub(crate) fn poll_animation_load(
    asset_server: Res<AssetServer>,
    config: Res<PointingConfig>,
    mut session: ResMut<PointingSession>,
    mut pending: ResMut<PendingAnimation>,
    avatars: AvatarQuery,
    mut host: MessageWriter<PointingCommand>,
) {
    let Some(load) = pending.0.as_ref() else {
        return;
    };

    if load.generation != session.generation() {
        // A stop superseded this start while the load was in flight; the
        // task must not attach to a session that no longer exists.
        debug!("abandoning superseded pointing animation load");
        pending.0 = None;
        return;
    }

    match asset_server.get_load_state(load.handle.id()) {
        Some(LoadState::Loaded) => {
            let generation = load.generation;
            pending.0 = None;
            attach_task(generation, &config, &mut session, &avatars, &mut host);
        }
        Some(LoadState::Failed(err)) => {
            let generation = load.generation;
            pending.0 = None;
            error!("{}", StartError::AnimationLoad(err.to_string()));
            session.attach_failed(generation);
        }
        // Still loading (or the server has not registered the handle yet).
        _ => {}
    }
}

/// System sampling camera orientation and the obstruction probe into the
/// avatar's blend signals at the configured period.
pub(crate) fn drive_pointing_signals(
    time: Res<Time>,
    config: Res<PointingConfig>,
    view_mode: Res<CameraViewMode>,
    mut session: ResMut<PointingSession>,
    spatial_query: SpatialQuery,
    cameras: Query<&GlobalTransform, With<PointingCamera>>,
    mut avatars: Query<(Entity, &GlobalTransform, &mut PointingSignals), With<PointingAvatar>>,
) {
    if !session.sampler_due(time.delta()) {
        return;
    }
    let Ok(camera) = cameras.single() else {
        return;
    };
    let Ok((avatar, body, mut signals)) = avatars.single_mut() else {
        return;
    };

    let (camera_yaw, camera_pitch, _) = camera.rotation().to_euler(EulerRot::YXZ);
    let (body_yaw, body_pitch, _) = body.rotation().to_euler(EulerRot::YXZ);

    let relative_pitch = (camera_pitch - body_pitch).to_degrees();
    let relative_heading = wrap_degrees((camera_yaw - body_yaw).to_degrees());

    signals.pitch = pitch_signal(relative_pitch);
    signals.heading = heading_signal(relative_heading);

    let blocked = probe::probe_blocked(
        &spatial_query,
        camera.translation(),
        camera.forward(),
        &config.probe,
        avatar,
    );
    if session.debounce.observe(time.elapsed(), blocked) {
        signals.blocked = blocked;
    }

    signals.first_person = view_mode.is_first_person();
}

fn attach_task(
    generation: u32,
    config: &PointingConfig,
    session: &mut PointingSession,
    avatars: &AvatarQuery,
    host: &mut MessageWriter<PointingCommand>,
) {
    let Ok((avatar, _, _)) = avatars.single() else {
        error!("{}", StartError::AvatarMissing);
        session.attach_failed(generation);
        return;
    };

    for kind in attach_commands(config) {
        host.write(PointingCommand { avatar, kind });
    }
    session.attach_succeeded(generation, config.sample_period);
}

fn stop_pointing(
    session: &mut PointingSession,
    pending: &mut PendingAnimation,
    avatars: &AvatarQuery,
    host: &mut MessageWriter<PointingCommand>,
) {
    match session.stop() {
        StopOutcome::WasIdle => {}
        StopOutcome::SamplerOnly => {
            // Start never attached anything; dropping local state suffices.
            if pending.0.take().is_some() {
                debug!("pointing stop raced the animation load; attach abandoned");
            }
        }
        StopOutcome::FullTeardown => {
            pending.0 = None;
            let Ok((avatar, ragdolled, in_vehicle)) = avatars.single() else {
                return;
            };
            for kind in teardown_commands(ragdolled, in_vehicle) {
                host.write(PointingCommand { avatar, kind });
            }
        }
    }
}

/// Commands emitted when the pointing task attaches, in order.
fn attach_commands(config: &PointingConfig) -> [PointingCommandKind; 3] {
    [
        PointingCommandKind::SetWeaponVisible(false),
        PointingCommandKind::SetPointingFlag(true),
        PointingCommandKind::AttachTask {
            blend_in: config.blend_in,
            clip_offset: config.clip_offset,
        },
    ]
}

/// Commands emitted on a clean stop, in order.
///
/// Clearing the secondary task is unsafe while ragdolled, and weapon
/// visibility is left alone inside a vehicle where the vehicle logic owns
/// it. The task slot is cleared a second time after the flag drops.
fn teardown_commands(ragdolled: bool, in_vehicle: bool) -> Vec<PointingCommandKind> {
    let mut commands = vec![PointingCommandKind::RequestTaskStop];
    if !ragdolled {
        commands.push(PointingCommandKind::ClearSecondaryTask);
    }
    if !in_vehicle {
        commands.push(PointingCommandKind::SetWeaponVisible(true));
    }
    commands.push(PointingCommandKind::SetPointingFlag(false));
    commands.push(PointingCommandKind::ClearSecondaryTask);
    commands
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const SAMPLE_PERIOD: Duration = Duration::from_millis(10);

    /// Stand-in for the host's animation layer: records every command.
    #[derive(Resource, Default)]
    struct HostLog(Vec<PointingCommand>);

    fn record_commands(mut reader: MessageReader<PointingCommand>, mut log: ResMut<HostLog>) {
        log.0.extend(reader.read().cloned());
    }

    fn sampler_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        // An empty spatial query pipeline: casts hit nothing.
        app.init_resource::<SpatialQueryPipeline>();

        let config = PointingConfig::default();
        app.insert_resource(PointingSession::new(config.block_debounce));
        app.insert_resource(config);
        app.init_resource::<CameraViewMode>();
        app.add_systems(Update, drive_pointing_signals);
        app
    }

    fn controller_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()));
        app.init_asset::<AnimationClip>();

        let config = PointingConfig::default();
        app.insert_resource(PointingSession::new(config.block_debounce));
        app.insert_resource(config);
        app.init_resource::<PendingAnimation>();
        app.init_resource::<CameraViewMode>();
        app.init_resource::<HostLog>();
        app.insert_resource(ButtonInput::<KeyCode>::default());
        app.add_message::<PointingCommand>();
        app.add_systems(
            Update,
            (handle_pointing_input, poll_animation_load, record_commands).chain(),
        );
        app
    }

    fn press(app: &mut App, key: KeyCode) {
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(key);
    }

    fn release(app: &mut App, key: KeyCode) {
        let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        input.clear();
        input.release(key);
    }

    fn logged_kinds(app: &App) -> Vec<PointingCommandKind> {
        app.world()
            .resource::<HostLog>()
            .0
            .iter()
            .map(|command| command.kind.clone())
            .collect()
    }

    #[test]
    fn sampler_writes_signals_within_one_tick() {
        let mut app = sampler_app();

        // Avatar level and facing -Z; camera yawed 90 degrees left and
        // pitched 20 degrees down relative to it.
        let avatar = app
            .world_mut()
            .spawn((
                Transform::IDENTITY,
                GlobalTransform::IDENTITY,
                PointingAvatar,
                PointingSignals::default(),
            ))
            .id();
        let camera_transform = Transform::from_rotation(Quat::from_euler(
            EulerRot::YXZ,
            std::f32::consts::FRAC_PI_2,
            (-20.0f32).to_radians(),
            0.0,
        ));
        app.world_mut().spawn((
            camera_transform,
            GlobalTransform::from(camera_transform),
            PointingCamera,
        ));
        app.insert_resource(CameraViewMode::FirstPerson);

        // Prime the clock so the next update has a real delta.
        app.update();

        {
            let mut session = app.world_mut().resource_mut::<PointingSession>();
            let generation = session.begin_start().unwrap();
            assert!(session.attach_succeeded(generation, SAMPLE_PERIOD));
        }

        // One sample period elapses; the very next update must sample.
        std::thread::sleep(Duration::from_millis(25));
        app.update();

        let signals = *app.world().get::<PointingSignals>(avatar).unwrap();
        // Relative pitch -20 degrees: (-20 + 75) / 112.
        assert!((signals.pitch - 55.0 / 112.0).abs() < 1e-3);
        // Relative heading +90 degrees: (90 + 180) / 360 inverted.
        assert!((signals.heading - 0.25).abs() < 1e-3);
        // Nothing to hit, and the first write is always allowed.
        assert!(!signals.blocked);
        assert!(signals.first_person);
    }

    #[test]
    fn sampler_is_idle_until_session_activates() {
        let mut app = sampler_app();

        let avatar = app
            .world_mut()
            .spawn((
                Transform::IDENTITY,
                GlobalTransform::IDENTITY,
                PointingAvatar,
                PointingSignals::default(),
            ))
            .id();
        app.world_mut().spawn((
            Transform::from_rotation(Quat::from_rotation_x(-0.5)),
            GlobalTransform::from(Transform::from_rotation(Quat::from_rotation_x(-0.5))),
            PointingCamera,
        ));

        app.update();
        std::thread::sleep(Duration::from_millis(25));
        app.update();

        let signals = *app.world().get::<PointingSignals>(avatar).unwrap();
        assert_eq!(signals.pitch, 0.0);
        assert_eq!(signals.heading, 0.0);
    }

    #[test]
    fn key_hold_toggles_session() {
        let mut app = controller_app();
        app.world_mut().spawn((PointingAvatar, PointingSignals::default()));

        press(&mut app, KeyCode::KeyB);
        app.update();
        assert!(app.world().resource::<PointingSession>().is_active());

        release(&mut app, KeyCode::KeyB);
        app.update();
        let session = app.world().resource::<PointingSession>();
        assert!(!session.is_active());
        // The start never attached (the clip is not resident in tests), so
        // stop owes no host commands.
        assert!(logged_kinds(&app).is_empty());
    }

    #[test]
    fn clean_stop_emits_full_teardown() {
        let mut app = controller_app();
        let avatar = app
            .world_mut()
            .spawn((PointingAvatar, PointingSignals::default()))
            .id();

        {
            let mut session = app.world_mut().resource_mut::<PointingSession>();
            let generation = session.begin_start().unwrap();
            assert!(session.attach_succeeded(generation, SAMPLE_PERIOD));
        }

        press(&mut app, KeyCode::KeyB);
        release(&mut app, KeyCode::KeyB);
        app.update();

        assert_eq!(
            logged_kinds(&app),
            vec![
                PointingCommandKind::RequestTaskStop,
                PointingCommandKind::ClearSecondaryTask,
                PointingCommandKind::SetWeaponVisible(true),
                PointingCommandKind::SetPointingFlag(false),
                PointingCommandKind::ClearSecondaryTask,
            ]
        );
        assert!(app
            .world()
            .resource::<HostLog>()
            .0
            .iter()
            .all(|command| command.avatar == avatar));
    }

    #[test]
    fn degraded_stop_emits_nothing() {
        let mut app = controller_app();
        app.world_mut().spawn((PointingAvatar, PointingSignals::default()));

        {
            let mut session = app.world_mut().resource_mut::<PointingSession>();
            let generation = session.begin_start().unwrap();
            session.attach_failed(generation);
        }

        press(&mut app, KeyCode::KeyB);
        release(&mut app, KeyCode::KeyB);
        app.update();

        assert!(!app.world().resource::<PointingSession>().is_active());
        assert!(logged_kinds(&app).is_empty());
    }

    #[test]
    fn stop_without_avatar_does_not_panic() {
        let mut app = controller_app();

        {
            let mut session = app.world_mut().resource_mut::<PointingSession>();
            let generation = session.begin_start().unwrap();
            assert!(session.attach_succeeded(generation, SAMPLE_PERIOD));
        }

        press(&mut app, KeyCode::KeyB);
        release(&mut app, KeyCode::KeyB);
        app.update();

        assert!(!app.world().resource::<PointingSession>().is_active());
        assert!(logged_kinds(&app).is_empty());
    }

    #[test]
    fn attach_commands_hide_weapon_before_attaching() {
        let config = PointingConfig::default();
        assert_eq!(
            attach_commands(&config).to_vec(),
            vec![
                PointingCommandKind::SetWeaponVisible(false),
                PointingCommandKind::SetPointingFlag(true),
                PointingCommandKind::AttachTask {
                    blend_in: 0.5,
                    clip_offset: 24,
                },
            ]
        );
    }

    #[test]
    fn teardown_skips_task_clear_while_ragdolled() {
        assert_eq!(
            teardown_commands(true, false),
            vec![
                PointingCommandKind::RequestTaskStop,
                PointingCommandKind::SetWeaponVisible(true),
                PointingCommandKind::SetPointingFlag(false),
                PointingCommandKind::ClearSecondaryTask,
            ]
        );
    }

    #[test]
    fn teardown_leaves_weapon_hidden_in_vehicle() {
        assert_eq!(
            teardown_commands(false, true),
            vec![
                PointingCommandKind::RequestTaskStop,
                PointingCommandKind::ClearSecondaryTask,
                PointingCommandKind::SetPointingFlag(false),
                PointingCommandKind::ClearSecondaryTask,
            ]
        );
    }
}
