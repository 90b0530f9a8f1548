//! Failure taxonomy for the pointing controller.

use thiserror::Error;

/// Failures that can interrupt a start before the pointing task attaches.
///
/// These are caught where they occur and logged; the session is left active
/// but degraded (no sampler, no teardown owed) rather than propagating a
/// fault into the host app.
#[derive(Debug, Error)]
pub enum StartError {
    /// The pointing animation asset failed to load.
    #[error("pointing animation failed to load: {0}")]
    AnimationLoad(String),
    /// No entity carries the `PointingAvatar` marker.
    #[error("no pointing avatar is registered")]
    AvatarMissing,
}
