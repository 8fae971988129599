//! Extrude and Rotate tools: attach the gizmo to whatever the user clicks
//!
//! Only pointer events the gizmo left unclaimed reach these systems, so a
//! press on a handle never doubles as a pick.

use super::tool_state::ToolState;
use crate::gizmo::{GizmoContext, GizmoController, UnclaimedPointer};
use crate::input::pointer::PointerEvent;
use crate::rendering::camera::ActiveCameraView;
use crate::scene::{CameraNavigation, SceneModel};
use bevy::prelude::*;

/// Pointer travel, in pixels, beyond which a press is a camera drag
const CLICK_SLOP_PX: f32 = 4.0;

/// Turns down/up pairs into clicks, ignoring presses that wandered off
#[derive(Debug, Default, Clone, Copy)]
pub struct ClickTracker {
    pressed_at: Option<Vec2>,
}

impl ClickTracker {
    /// Feed one pointer event; returns the click position on a release
    pub fn feed(&mut self, event: PointerEvent) -> Option<Vec2> {
        match event {
            PointerEvent::Down { position } => {
                self.pressed_at = Some(position);
                None
            }
            PointerEvent::Move { position } => {
                if self
                    .pressed_at
                    .is_some_and(|start| start.distance(position) > CLICK_SLOP_PX)
                {
                    self.pressed_at = None;
                }
                None
            }
            PointerEvent::Up { position } => self
                .pressed_at
                .take()
                .filter(|start| start.distance(position) <= CLICK_SLOP_PX)
                .map(|_| position),
        }
    }
}

/// Re-mode the gizmo when the active tool changes
pub fn sync_gizmo_with_tool(
    tool_state: Res<ToolState>,
    mut controller: ResMut<GizmoController>,
    mut scene: ResMut<SceneModel>,
    mut navigation: ResMut<CameraNavigation>,
    camera: Res<ActiveCameraView>,
) {
    if !tool_state.just_changed() {
        return;
    }
    let mut ctx = GizmoContext {
        host: scene.as_mut(),
        camera: camera.0.as_ref(),
        navigation: navigation.as_mut(),
    };

    controller.deactivate(&mut ctx);
    match tool_state.active.gizmo_mode() {
        Some(mode) => {
            let target = controller.target();
            controller.set_mode(mode);
            if let Some(target) = target {
                if let Err(err) = controller.attach_to(&mut ctx, target, None) {
                    warn!("[TOOLS] Could not re-attach {}: {}", target, err);
                    controller.detach(&mut ctx);
                }
            }
        }
        None => controller.detach(&mut ctx),
    }
}

/// Click a target to attach the gizmo, click empty space to dismiss it
pub fn click_to_attach(
    tool_state: Res<ToolState>,
    unclaimed: Res<UnclaimedPointer>,
    mut tracker: Local<ClickTracker>,
    mut controller: ResMut<GizmoController>,
    mut scene: ResMut<SceneModel>,
    mut navigation: ResMut<CameraNavigation>,
    camera: Res<ActiveCameraView>,
) {
    let clicks: Vec<Vec2> = unclaimed
        .events
        .iter()
        .filter_map(|event| tracker.feed(*event))
        .collect();
    if clicks.is_empty() || tool_state.active.gizmo_mode().is_none() {
        return;
    }
    let Some(view) = camera.0 else {
        return;
    };

    for click in clicks {
        let pick = scene.pick_screen(&view, click, |_| true);
        let mut ctx = GizmoContext {
            host: scene.as_mut(),
            camera: Some(&view),
            navigation: navigation.as_mut(),
        };
        match pick {
            Some(hit) => {
                if let Err(err) = controller.attach_to(&mut ctx, hit.target, Some(&hit)) {
                    warn!("[TOOLS] Attach failed: {}", err);
                }
            }
            None => controller.detach(&mut ctx),
        }
    }
}

/// Delete the target under the gizmo
pub fn delete_attached_target(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut controller: ResMut<GizmoController>,
    mut scene: ResMut<SceneModel>,
    mut navigation: ResMut<CameraNavigation>,
    camera: Res<ActiveCameraView>,
) {
    if !keyboard.any_just_pressed([KeyCode::Delete, KeyCode::Backspace]) {
        return;
    }
    let Some(target) = controller.target() else {
        return;
    };
    if let Some(removed) = scene.remove(target) {
        info!("[TOOLS] Deleted {} '{}'", target, removed.name);
    }
    let mut ctx = GizmoContext {
        host: scene.as_mut(),
        camera: camera.0.as_ref(),
        navigation: navigation.as_mut(),
    };
    controller.on_target_removed(&mut ctx, target);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release_in_place_is_a_click() {
        let mut tracker = ClickTracker::default();
        let at = Vec2::new(100.0, 80.0);
        assert_eq!(tracker.feed(PointerEvent::Down { position: at }), None);
        assert_eq!(
            tracker.feed(PointerEvent::Move {
                position: at + Vec2::new(1.0, 1.0)
            }),
            None
        );
        assert_eq!(
            tracker.feed(PointerEvent::Up {
                position: at + Vec2::new(2.0, 0.0)
            }),
            Some(at + Vec2::new(2.0, 0.0))
        );
    }

    #[test]
    fn test_drag_is_not_a_click() {
        let mut tracker = ClickTracker::default();
        tracker.feed(PointerEvent::Down {
            position: Vec2::ZERO,
        });
        tracker.feed(PointerEvent::Move {
            position: Vec2::new(30.0, 0.0),
        });
        // Coming back to the start does not turn an orbit into a click
        assert_eq!(tracker.feed(PointerEvent::Up { position: Vec2::ZERO }), None);
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut tracker = ClickTracker::default();
        assert_eq!(tracker.feed(PointerEvent::Up { position: Vec2::ONE }), None);
    }
}
