//! The handle set shown around an attached target
//!
//! All four handles are created once. The active [`GizmoMode`] decides which
//! of them take part in hover and hit testing; the render side shows or hides
//! the same entities instead of rebuilding them.

use crate::core::settings::GizmoSettings;
use crate::geometry::projection::CameraView;
use crate::gizmo::positioner::GizmoPlacement;
use bevy::prelude::*;
use std::f32::consts::TAU;

pub const TRANSLATE_COLOR: Color = Color::srgb(0.2, 0.4, 1.0);
pub const TRANSLATE_HOVER_COLOR: Color = Color::srgb(0.4, 0.8, 1.0);
pub const RING_X_COLOR: Color = Color::srgb(1.0, 0.8, 0.2);
pub const RING_Y_COLOR: Color = Color::srgb(0.2, 0.8, 1.0);
pub const RING_Z_COLOR: Color = Color::srgb(0.8, 0.3, 1.0);
pub const RING_HOVER_COLOR: Color = Color::srgb(1.0, 1.0, 0.4);

/// Which editing mode the handle set is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GizmoMode {
    #[default]
    Extrude,
    Rotate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Component)]
pub enum HandleId {
    Translate,
    RingX,
    RingY,
    RingZ,
}

impl HandleId {
    pub const ALL: [HandleId; 4] = [
        HandleId::Translate,
        HandleId::RingX,
        HandleId::RingY,
        HandleId::RingZ,
    ];

    pub fn mode(&self) -> GizmoMode {
        match self {
            HandleId::Translate => GizmoMode::Extrude,
            HandleId::RingX | HandleId::RingY | HandleId::RingZ => GizmoMode::Rotate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    TranslateNormal,
    RotateAxis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleVisual {
    #[default]
    Normal,
    Hovered,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoHandle {
    pub id: HandleId,
    pub kind: HandleKind,
    /// Face normal for the translate handle, world axis for a ring
    pub axis_or_normal: Vec3,
    pub visual: HandleVisual,
}

impl GizmoHandle {
    /// Display color for the current visual state
    pub fn color(&self) -> Color {
        match (self.id, self.visual) {
            (HandleId::Translate, HandleVisual::Normal) => TRANSLATE_COLOR,
            (HandleId::Translate, _) => TRANSLATE_HOVER_COLOR,
            (HandleId::RingX, HandleVisual::Normal) => RING_X_COLOR,
            (HandleId::RingY, HandleVisual::Normal) => RING_Y_COLOR,
            (HandleId::RingZ, HandleVisual::Normal) => RING_Z_COLOR,
            (_, _) => RING_HOVER_COLOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GizmoHandleSet {
    handles: [GizmoHandle; 4],
    mode: GizmoMode,
    visible: bool,
}

impl Default for GizmoHandleSet {
    fn default() -> Self {
        Self::new()
    }
}

impl GizmoHandleSet {
    pub fn new() -> Self {
        let handle = |id, kind, axis_or_normal| GizmoHandle {
            id,
            kind,
            axis_or_normal,
            visual: HandleVisual::Normal,
        };
        Self {
            handles: [
                handle(HandleId::Translate, HandleKind::TranslateNormal, Vec3::Y),
                handle(HandleId::RingX, HandleKind::RotateAxis, Vec3::X),
                handle(HandleId::RingY, HandleKind::RotateAxis, Vec3::Y),
                handle(HandleId::RingZ, HandleKind::RotateAxis, Vec3::Z),
            ],
            mode: GizmoMode::default(),
            visible: false,
        }
    }

    pub fn mode(&self) -> GizmoMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: GizmoMode) {
        if self.mode != mode {
            self.mode = mode;
            self.reset_visuals();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.reset_visuals();
        }
    }

    pub fn handle(&self, id: HandleId) -> &GizmoHandle {
        &self.handles[Self::index(id)]
    }

    pub fn handles(&self) -> impl Iterator<Item = &GizmoHandle> {
        self.handles.iter()
    }

    /// Handles taking part in the current mode
    pub fn active_handles(&self) -> impl Iterator<Item = &GizmoHandle> {
        let mode = self.mode;
        self.handles.iter().filter(move |handle| handle.id.mode() == mode)
    }

    /// Fix the translate handle's direction; called when the gizmo is shown
    pub fn set_translate_normal(&mut self, normal: Vec3) {
        if let Some(normal) = normal.try_normalize() {
            self.handles[Self::index(HandleId::Translate)].axis_or_normal = normal;
        }
    }

    pub fn set_visual(&mut self, id: HandleId, visual: HandleVisual) {
        self.handles[Self::index(id)].visual = visual;
    }

    /// Show `hovered` as hovered and every other handle as normal
    pub fn set_hovered(&mut self, hovered: Option<HandleId>) {
        for handle in &mut self.handles {
            handle.visual = if Some(handle.id) == hovered {
                HandleVisual::Hovered
            } else {
                HandleVisual::Normal
            };
        }
    }

    pub fn reset_visuals(&mut self) {
        self.set_hovered(None);
    }

    /// Active handle under a screen point, closest first
    pub fn hit_test(
        &self,
        camera: &CameraView,
        placement: &GizmoPlacement,
        screen: Vec2,
        settings: &GizmoSettings,
    ) -> Option<HandleId> {
        if !self.visible {
            return None;
        }
        self.active_handles()
            .filter_map(|handle| {
                let distance = match handle.kind {
                    HandleKind::TranslateNormal => {
                        let start = placement.position;
                        let end = start + handle.axis_or_normal * settings.translate_handle_length;
                        polyline_distance(camera, &[start, end], screen)?
                    }
                    HandleKind::RotateAxis => {
                        let points = ring_points(
                            placement.position,
                            handle.axis_or_normal,
                            settings.ring_radius,
                            settings.ring_segments,
                        );
                        polyline_distance(camera, &points, screen)?
                    }
                };
                (distance <= settings.pick_tolerance_px).then_some((handle.id, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    fn index(id: HandleId) -> usize {
        match id {
            HandleId::Translate => 0,
            HandleId::RingX => 1,
            HandleId::RingY => 2,
            HandleId::RingZ => 3,
        }
    }
}

/// Closed loop of points on a ring around `center` perpendicular to `axis`
pub fn ring_points(center: Vec3, axis: Vec3, radius: f32, segments: u32) -> Vec<Vec3> {
    let segments = segments.max(3);
    let (u, v) = axis.normalize_or(Vec3::Y).any_orthonormal_pair();
    (0..=segments)
        .map(|i| {
            let angle = TAU * i as f32 / segments as f32;
            center + (u * angle.cos() + v * angle.sin()) * radius
        })
        .collect()
}

/// Screen distance from `screen` to a world polyline; segments with an
/// unprojectable end are skipped
fn polyline_distance(camera: &CameraView, points: &[Vec3], screen: Vec2) -> Option<f32> {
    let projected: Vec<Option<Vec2>> = points.iter().map(|p| camera.world_to_screen(*p)).collect();
    projected
        .windows(2)
        .filter_map(|pair| match pair {
            [Some(a), Some(b)] => Some(point_segment_distance(screen, *a, *b)),
            _ => None,
        })
        .min_by(f32::total_cmp)
}

fn point_segment_distance(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let length_squared = ab.length_squared();
    if length_squared <= f32::EPSILON {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / length_squared).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}
