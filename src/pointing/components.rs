use bevy::prelude::*;

/// Marker for the locally controlled avatar the controller drives.
///
/// Exactly one entity should carry this at a time; the controller treats a
/// missing avatar at attach time as a start failure.
#[derive(Component, Debug, Default, Reflect)]
#[reflect(Component, Default)]
pub struct PointingAvatar;

/// Named blend signals written into the avatar each sample tick.
///
/// The host's animation layer reads these to drive the pointing move
/// network. `pitch` and `heading` are normalized to [0, 1]; `blocked` is
/// debounced and may lag the raw probe result by up to one debounce window.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component, Default)]
pub struct PointingSignals {
    /// Normalized relative camera pitch.
    pub pitch: f32,
    /// Normalized, mirrored relative camera heading.
    pub heading: f32,
    /// Whether something blocks the gesture in front of the camera.
    pub blocked: bool,
    /// Whether the first-person view is active.
    pub first_person: bool,
}

/// Marker for the gameplay camera the controller samples.
#[derive(Component, Debug, Default, Reflect)]
#[reflect(Component, Default)]
pub struct PointingCamera;

/// The avatar is ragdolled or otherwise incapacitated.
///
/// Clearing the avatar's secondary task in this state is unsafe, so stop
/// skips that step while the marker is present.
#[derive(Component, Debug, Default, Reflect)]
#[reflect(Component, Default)]
pub struct Ragdolled;

/// The avatar currently occupies a vehicle seat.
///
/// Entering a vehicle hides held weapons through its own mechanism; stop
/// must not restore weapon visibility while the marker is present.
#[derive(Component, Debug, Default, Reflect)]
#[reflect(Component, Default)]
pub struct InVehicle;

/// Active camera view mode, maintained by the host's camera layer.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraViewMode {
    /// First-person view.
    FirstPerson,
    /// Any third-person view.
    #[default]
    ThirdPerson,
}

impl CameraViewMode {
    /// Whether the first-person view is active.
    pub fn is_first_person(&self) -> bool {
        *self == Self::FirstPerson
    }
}

/// Message emitted toward the host's animation layer.
///
/// The controller never touches the avatar's tasks or weapon model itself;
/// it describes the required side effects and the host applies them.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct PointingCommand {
    /// The avatar the command applies to.
    pub avatar: Entity,
    /// The side effect to apply.
    pub kind: PointingCommandKind,
}

/// Side effects the host applies on the controller's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum PointingCommandKind {
    /// Attach the pointing move network to the avatar.
    AttachTask {
        /// Blend-in duration, in the host task API's time units.
        blend_in: f32,
        /// Starting animation frame offset.
        clip_offset: u32,
    },
    /// Request the "Stop" state transition on the attached network.
    RequestTaskStop,
    /// Clear the avatar's secondary task slot.
    ClearSecondaryTask,
    /// Show or hide the avatar's held weapon model.
    SetWeaponVisible(bool),
    /// Toggle the avatar's pointing config flag (suppresses default arm IK).
    SetPointingFlag(bool),
}
