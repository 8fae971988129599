//! Application and gizmo settings

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub const WINDOW_TITLE: &str = "Kerf";
pub const DEFAULT_WINDOW_SIZE: Vec2 = Vec2::new(1280.0, 720.0);
pub const BACKGROUND_COLOR: Color = Color::srgb(0.11, 0.12, 0.13);

/// Lower bound for lengths that must stay strictly positive
pub const MIN_POSITIVE_LENGTH: f32 = 1e-4;

/// Tunables for gizmo placement and drag mapping
///
/// Loaded from the `gizmo` section of the user config file. Missing fields fall
/// back to the values below.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GizmoSettings {
    /// Parameter units (world units) per pixel of pointer travel on a translate handle
    pub distance_sensitivity: f32,
    /// Radians per pixel of pointer travel on a rotation ring
    pub angle_sensitivity: f32,
    /// Smallest dimension an extrusion may shrink a primitive to
    pub min_dimension: f32,
    /// Offset of a face-anchored gizmo from the picked point
    pub face_clearance: f32,
    /// Gap between the bounds and a bounds-anchored gizmo
    pub bounds_clearance: f32,
    /// Gap used when no camera is available and the gizmo sits above the bounds
    pub fallback_offset: f32,
    pub translate_handle_length: f32,
    pub ring_radius: f32,
    pub ring_thickness: f32,
    /// Segments used to approximate a ring for hit testing
    pub ring_segments: u32,
    /// Pointer distance in pixels that still counts as hovering a handle
    pub pick_tolerance_px: f32,
    /// Screen axes shorter than this (pixels) fall back to angular dragging
    pub degenerate_screen_epsilon: f32,
}

impl Default for GizmoSettings {
    fn default() -> Self {
        Self {
            distance_sensitivity: 0.01,
            angle_sensitivity: 0.01,
            min_dimension: 0.01,
            face_clearance: 0.5,
            bounds_clearance: 0.25,
            fallback_offset: 2.0,
            translate_handle_length: 3.0,
            ring_radius: 2.5,
            ring_thickness: 0.3,
            ring_segments: 64,
            pick_tolerance_px: 10.0,
            degenerate_screen_epsilon: 1e-3,
        }
    }
}

impl GizmoSettings {
    /// Bring hand-edited values back into range.
    ///
    /// Sensitivities and handle sizes that are not positive reset to their
    /// defaults; minimum dimension and clearances are floored at
    /// [`MIN_POSITIVE_LENGTH`] so an extrusion can never invert a solid.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        for (name, value, default) in [
            ("distance_sensitivity", &mut self.distance_sensitivity, defaults.distance_sensitivity),
            ("angle_sensitivity", &mut self.angle_sensitivity, defaults.angle_sensitivity),
            ("translate_handle_length", &mut self.translate_handle_length, defaults.translate_handle_length),
            ("ring_radius", &mut self.ring_radius, defaults.ring_radius),
            ("ring_thickness", &mut self.ring_thickness, defaults.ring_thickness),
            ("pick_tolerance_px", &mut self.pick_tolerance_px, defaults.pick_tolerance_px),
            ("degenerate_screen_epsilon", &mut self.degenerate_screen_epsilon, defaults.degenerate_screen_epsilon),
        ] {
            if !value.is_finite() || *value <= 0.0 {
                warn!("Gizmo setting {name} = {value} must be positive, using {default}");
                *value = default;
            }
        }

        for (name, value, default) in [
            ("min_dimension", &mut self.min_dimension, defaults.min_dimension),
            ("face_clearance", &mut self.face_clearance, defaults.face_clearance),
            ("bounds_clearance", &mut self.bounds_clearance, defaults.bounds_clearance),
            ("fallback_offset", &mut self.fallback_offset, defaults.fallback_offset),
        ] {
            if !value.is_finite() {
                warn!("Gizmo setting {name} = {value} is not a number, using {default}");
                *value = default;
            } else if *value < MIN_POSITIVE_LENGTH {
                warn!("Gizmo setting {name} = {value} raised to {MIN_POSITIVE_LENGTH}");
                *value = MIN_POSITIVE_LENGTH;
            }
        }

        if self.ring_segments < 3 {
            warn!("Gizmo setting ring_segments = {} raised to 3", self.ring_segments);
            self.ring_segments = 3;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_keeps_solids_from_inverting() {
        let settings: GizmoSettings = serde_json::from_str(
            r#"{ "min_dimension": -1.0, "face_clearance": -0.5, "distance_sensitivity": 0.0, "ring_segments": 1 }"#,
        )
        .unwrap();
        let settings = settings.sanitized();

        assert_eq!(settings.min_dimension, MIN_POSITIVE_LENGTH);
        assert_eq!(settings.face_clearance, MIN_POSITIVE_LENGTH);
        assert_eq!(settings.distance_sensitivity, GizmoSettings::default().distance_sensitivity);
        assert_eq!(settings.ring_segments, 3);
    }

    #[test]
    fn test_sanitized_leaves_valid_settings_alone() {
        let settings = GizmoSettings {
            min_dimension: 0.2,
            angle_sensitivity: 0.003,
            ..default()
        };
        assert_eq!(settings.clone().sanitized(), settings);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: GizmoSettings =
            serde_json::from_str(r#"{ "distance_sensitivity": 0.05 }"#).unwrap();
        assert_eq!(settings.distance_sensitivity, 0.05);
        assert_eq!(settings.min_dimension, GizmoSettings::default().min_dimension);
        assert_eq!(settings.ring_segments, 64);
    }
}
