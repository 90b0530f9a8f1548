//! # bevy_fingerpoint
//!
//! A Bevy plugin that makes the player's avatar point at whatever the
//! camera is aimed at, using a procedural animation blend driven by
//! continuous camera-angle sampling.
//!
//! ## Features
//!
//! - Key-hold activation with reentrancy-safe start/stop
//! - Normalized pitch/heading blend signals sampled at a fixed rate
//! - Obstruction detection via an avian3d sphere cast, debounced to avoid
//!   arm flicker near surface edges
//! - First-person awareness through a host-maintained view-mode resource
//! - Host-side effects (weapon visibility, task attach/stop, config flags)
//!   expressed as messages, so the crate stays engine-layer agnostic
//!
//! ## Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use avian3d::prelude::*;
//! use bevy_fingerpoint::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(PhysicsPlugins::default())
//!         .add_plugins(FingerPointingPlugin)
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(mut commands: Commands) {
//!     // The locally controlled avatar.
//!     commands.spawn((
//!         Transform::default(),
//!         PointingAvatar,
//!         PointingSignals::default(),
//!     ));
//!
//!     // The gameplay camera the controller samples.
//!     commands.spawn((
//!         Camera3d::default(),
//!         Transform::from_xyz(0.0, 2.0, 6.0).looking_at(Vec3::Y, Vec3::Y),
//!         PointingCamera,
//!     ));
//! }
//! ```
//!
//! ## Host duties
//!
//! The plugin drives state; the host's animation layer applies it:
//!
//! - consume [`pointing::PointingCommand`] messages (attach/stop the
//!   pointing task, weapon visibility, the pointing config flag)
//! - feed [`pointing::PointingSignals`] into the avatar's blend tree
//! - keep [`pointing::CameraViewMode`] and the [`pointing::Ragdolled`] /
//!   [`pointing::InVehicle`] markers up to date

pub mod angles;
pub mod debounce;
pub mod error;
pub mod pointing;
pub mod probe;

pub use pointing::FingerPointingPlugin;

/// Convenient re-exports of commonly used types.
pub mod prelude {
    pub use crate::angles::{heading_signal, pitch_signal, wrap_degrees};
    pub use crate::debounce::{BlockDebounce, BlockState, DEFAULT_BLOCK_DEBOUNCE};
    pub use crate::error::StartError;
    pub use crate::pointing::{
        CameraViewMode, FingerPointingPlugin, InVehicle, PointingAvatar, PointingCamera,
        PointingCommand, PointingCommandKind, PointingConfig, PointingPhase, PointingSession,
        PointingSignals, Ragdolled, StopOutcome,
    };
    pub use crate::probe::ProbeSettings;
}
