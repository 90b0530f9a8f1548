//! The fingerpointing controller.
//!
//! A single-player-local state machine with three phases (idle, starting,
//! active) driven by a held key and a fixed-rate sampling loop. Holding the
//! configured key loads the pointing animation, asks the host to attach the
//! pointing task, and then samples camera orientation and the obstruction
//! probe into the avatar's [`PointingSignals`] until the key is released.
//!
//! # Example
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use bevy_fingerpoint::prelude::*;
//!
//! fn setup(mut commands: Commands) {
//!     commands.spawn((
//!         Transform::default(),
//!         PointingAvatar,
//!         PointingSignals::default(),
//!     ));
//!     commands.spawn((
//!         Camera3d::default(),
//!         Transform::from_xyz(0.0, 2.0, 6.0),
//!         PointingCamera,
//!     ));
//! }
//! ```

mod components;
mod session;
mod systems;

pub use components::{
    CameraViewMode, InVehicle, PointingAvatar, PointingCamera, PointingCommand,
    PointingCommandKind, PointingSignals, Ragdolled,
};
pub use session::{PointingPhase, PointingSession, StopOutcome};

use std::time::Duration;

use bevy::prelude::*;

use crate::debounce::DEFAULT_BLOCK_DEBOUNCE;
use crate::probe::ProbeSettings;

/// Human-readable plugin name, logged once at registration.
pub const PLUGIN_NAME: &str = "Fingerpointing";

/// Settings for the fingerpointing controller.
///
/// Insert this resource before adding [`FingerPointingPlugin`] to override
/// the defaults; the configuration is read at plugin build and is static
/// thereafter.
#[derive(Resource, Debug, Clone)]
pub struct PointingConfig {
    /// Key held to point.
    pub keybind: KeyCode,
    /// Minimum time between changes of the blocked signal.
    pub block_debounce: Duration,
    /// Period of the camera/probe sampling loop.
    pub sample_period: Duration,
    /// Asset path of the pointing animation clip.
    pub animation: String,
    /// Blend-in duration forwarded to the attach command.
    pub blend_in: f32,
    /// Starting animation frame offset forwarded to the attach command.
    pub clip_offset: u32,
    /// Forward obstruction probe settings.
    pub probe: ProbeSettings,
}

impl Default for PointingConfig {
    fn default() -> Self {
        Self {
            keybind: KeyCode::KeyB,
            block_debounce: DEFAULT_BLOCK_DEBOUNCE,
            sample_period: Duration::from_millis(10),
            animation: "animations/point.glb#Animation0".to_string(),
            blend_in: 0.5,
            clip_offset: 24,
            probe: ProbeSettings::default(),
        }
    }
}

/// Plugin that drives the avatar's pointing gesture from a held key.
///
/// The host app provides the avatar (one entity with [`PointingAvatar`] and
/// [`PointingSignals`]), the gameplay camera ([`PointingCamera`]), and an
/// animation layer consuming [`PointingCommand`] messages and the per-tick
/// signal values.
pub struct FingerPointingPlugin;

impl Plugin for FingerPointingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointingConfig>();
        let debounce_window = app.world().resource::<PointingConfig>().block_debounce;

        app.insert_resource(PointingSession::new(debounce_window))
            .init_resource::<systems::PendingAnimation>()
            .init_resource::<CameraViewMode>()
            .register_type::<PointingAvatar>()
            .register_type::<PointingSignals>()
            .register_type::<PointingCamera>()
            .register_type::<Ragdolled>()
            .register_type::<InVehicle>()
            .add_message::<PointingCommand>()
            .add_systems(
                Update,
                (
                    systems::handle_pointing_input,
                    systems::poll_animation_load,
                    systems::drive_pointing_signals,
                )
                    .chain(),
            );

        info!("{PLUGIN_NAME} plugin loaded");
    }
}
