//! Angle normalization for the pointing blend signals.
//!
//! The move network consumes a pitch and a heading signal, each normalized
//! to [0, 1]. Camera angles arrive in degrees relative to the avatar's body
//! orientation and are clamped before remapping.

/// Lowest relative pitch the blend accepts, in degrees.
pub const PITCH_MIN_DEGREES: f32 = -70.0;
/// Highest relative pitch the blend accepts, in degrees.
pub const PITCH_MAX_DEGREES: f32 = 42.0;

/// Heading is expected host-normalized to roughly [-180, 180]; it is
/// re-clamped here regardless.
pub const HEADING_LIMIT_DEGREES: f32 = 180.0;

/// Remap a relative camera pitch (degrees) to the [0, 1] blend signal.
///
/// The input is clamped to [`PITCH_MIN_DEGREES`, `PITCH_MAX_DEGREES`] first,
/// then remapped with the blend's fixed offset and span. The result is
/// clamped to [0, 1] since the upper end of the remap slightly overshoots.
pub fn pitch_signal(relative_pitch_degrees: f32) -> f32 {
    let clamped = relative_pitch_degrees.clamp(PITCH_MIN_DEGREES, PITCH_MAX_DEGREES);
    ((clamped + 75.0) / 112.0).clamp(0.0, 1.0)
}

/// Remap a relative camera heading (degrees) to the [0, 1] blend signal.
///
/// The remap is inverted because the blend's heading axis is mirrored
/// relative to the camera's: heading -180 maps to 1.0, +180 maps to 0.0.
pub fn heading_signal(relative_heading_degrees: f32) -> f32 {
    let clamped = relative_heading_degrees.clamp(-HEADING_LIMIT_DEGREES, HEADING_LIMIT_DEGREES);
    let remapped = (clamped + 180.0) / 360.0;
    remapped * -1.0 + 1.0
}

/// Wrap an angle in degrees into [-180, 180].
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
