//! Forward obstruction probe.
//!
//! A short sphere cast from the camera along its aim direction decides
//! whether something blocks the pointing gesture, using avian3d spatial
//! queries. The avatar itself is always excluded from the cast.

use avian3d::prelude::*;
use bevy::prelude::*;

/// Settings for the obstruction probe.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    /// Maximum cast distance in world units.
    pub max_distance: f32,
    /// Radius of the cast sphere.
    pub radius: f32,
    /// Optional collision layers to query against.
    /// If None, all layers are queried.
    pub collision_layers: Option<LayerMask>,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            max_distance: 95.0,
            radius: 0.2,
            collision_layers: None,
        }
    }
}

impl ProbeSettings {
    /// Create probe settings with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum cast distance.
    pub fn with_max_distance(mut self, distance: f32) -> Self {
        self.max_distance = distance;
        self
    }

    /// Set the cast sphere radius.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Set collision layers to query.
    pub fn with_layers(mut self, layers: LayerMask) -> Self {
        self.collision_layers = Some(layers);
        self
    }
}

/// Build the spatial query filter for a probe, excluding the avatar.
pub fn probe_filter(settings: &ProbeSettings, exclude: Entity) -> SpatialQueryFilter {
    let filter = SpatialQueryFilter::default().with_excluded_entities([exclude]);
    if let Some(layers) = settings.collision_layers {
        filter.with_mask(layers)
    } else {
        filter
    }
}

/// Cast the probe and report whether the gesture is blocked.
pub fn probe_blocked(
    spatial_query: &SpatialQuery,
    origin: Vec3,
    direction: Dir3,
    settings: &ProbeSettings,
    exclude: Entity,
) -> bool {
    let shape = Collider::sphere(settings.radius);
    let config = ShapeCastConfig::from_max_distance(settings.max_distance);
    let filter = probe_filter(settings, exclude);

    spatial_query
        .cast_shape(&shape, origin, Quat::IDENTITY, direction, &config, &filter)
        .is_some()
}
