//! Gizmo interaction state machine
//!
//! `Idle → Hover → Dragging → Idle`. A pointer-down on a handle starts a
//! [`DragSession`]; moves are projected to a scalar and handed to the active
//! [`Editor`]; the pointer-up commits, repositions the gizmo and notifies
//! observers. Camera navigation is suspended for the length of a drag and
//! restored on every path out of it.

use crate::core::errors::{GizmoError, GizmoResult};
use crate::core::settings::GizmoSettings;
use crate::geometry::projection::CameraView;
use crate::gizmo::editor::{EditOutcome, Editor};
use crate::gizmo::events::GizmoEvent;
use crate::gizmo::handles::{GizmoHandleSet, GizmoMode, HandleId, HandleVisual};
use crate::gizmo::positioner::{FaceAnchor, GizmoPlacement, GizmoPositioner, PlacementStrategy};
use crate::gizmo::projector::PointerToParameterProjector;
use crate::gizmo::session::DragSession;
use crate::input::pointer::{PointerEvent, PointerSource, SubscriptionId};
use crate::scene::host::{PickHit, SceneHost};
use crate::scene::navigation::CameraNavigation;
use crate::scene::target::TargetId;
use bevy::prelude::*;

/// Everything outside the gizmo that an interaction step touches
pub struct GizmoContext<'a, H: SceneHost> {
    pub host: &'a mut H,
    pub camera: Option<&'a CameraView>,
    pub navigation: &'a mut CameraNavigation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Hover(HandleId),
    Dragging(HandleId),
}

#[derive(Debug, Clone, PartialEq)]
struct ActiveDrag {
    session: DragSession,
    editor: Editor,
}

#[derive(Resource, Debug)]
pub struct GizmoController {
    settings: GizmoSettings,
    projector: PointerToParameterProjector,
    positioner: GizmoPositioner,
    handles: GizmoHandleSet,
    target: Option<TargetId>,
    face_anchor: Option<FaceAnchor>,
    placement: Option<GizmoPlacement>,
    strategy: Option<PlacementStrategy>,
    state: InteractionState,
    drag: Option<ActiveDrag>,
    subscription: Option<SubscriptionId>,
    events: Vec<GizmoEvent>,
}

impl Default for GizmoController {
    fn default() -> Self {
        Self::new(GizmoSettings::default())
    }
}

impl GizmoController {
    pub fn new(settings: GizmoSettings) -> Self {
        Self {
            projector: PointerToParameterProjector::from_settings(&settings),
            positioner: GizmoPositioner::from_settings(&settings),
            settings,
            handles: GizmoHandleSet::new(),
            target: None,
            face_anchor: None,
            placement: None,
            strategy: None,
            state: InteractionState::Idle,
            drag: None,
            subscription: None,
            events: Vec::new(),
        }
    }

    pub fn settings(&self) -> &GizmoSettings {
        &self.settings
    }

    pub fn handles(&self) -> &GizmoHandleSet {
        &self.handles
    }

    pub fn target(&self) -> Option<TargetId> {
        self.target
    }

    pub fn placement(&self) -> Option<GizmoPlacement> {
        self.placement
    }

    pub fn placement_strategy(&self) -> Option<PlacementStrategy> {
        self.strategy
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.handles.is_visible()
    }

    pub fn is_connected(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.drag.as_ref().map(|drag| &drag.session)
    }

    pub fn mode(&self) -> GizmoMode {
        self.handles.mode()
    }

    /// Switch between extrusion and rotation handles. Ignored mid-drag.
    pub fn set_mode(&mut self, mode: GizmoMode) {
        if self.is_dragging() {
            debug!("[GIZMO] Mode change to {:?} ignored while dragging", mode);
            return;
        }
        self.handles.set_mode(mode);
        self.state = InteractionState::Idle;
    }

    /// Attach to `target` and show the handles for the current mode.
    ///
    /// In extrusion mode `pick` names the face to extrude. Without a usable
    /// pick the handle points along world up from above the bounds.
    pub fn attach_to<H: SceneHost>(
        &mut self,
        ctx: &mut GizmoContext<H>,
        target: TargetId,
        pick: Option<&PickHit>,
    ) -> GizmoResult<()> {
        if self.is_dragging() {
            self.end_drag(ctx, true);
        }
        let object = ctx.host.target(target).ok_or(GizmoError::StaleTarget(target))?;

        let (placement, strategy, anchor, normal) = match self.handles.mode() {
            GizmoMode::Extrude => {
                let anchor = pick
                    .filter(|hit| hit.target == target && hit.point.is_finite())
                    .and_then(|hit| {
                        let normal = hit.normal.try_normalize()?;
                        Some(FaceAnchor {
                            point: hit.point,
                            normal,
                        })
                    });
                match anchor {
                    Some(anchor) => {
                        let (placement, strategy) =
                            self.positioner.face_anchored(object, anchor, true, ctx.camera);
                        (placement, strategy, Some(anchor), anchor.normal)
                    }
                    None => {
                        debug!("[GIZMO] No usable face pick on {}, extruding along world up", target);
                        let placement = self.positioner.bounds_anchored(object, Vec3::Y);
                        (placement, PlacementStrategy::BoundsAnchored, None, Vec3::Y)
                    }
                }
            }
            GizmoMode::Rotate => {
                let (placement, strategy) = self.positioner.bounds_or_fallback(object, ctx.camera);
                (placement, strategy, None, Vec3::Y)
            }
        };

        info!(
            "[GIZMO] Attached {:?} gizmo to {} '{}' ({:?})",
            self.handles.mode(),
            target,
            object.name,
            strategy
        );

        self.target = Some(target);
        self.face_anchor = anchor;
        self.placement = Some(placement);
        self.strategy = Some(strategy);
        self.handles.set_translate_normal(normal);
        self.handles.set_visible(true);
        self.state = InteractionState::Idle;
        Ok(())
    }

    /// Show the handles again after [`GizmoController::hide`]
    pub fn show(&mut self) -> GizmoResult<()> {
        if self.target.is_none() {
            return Err(GizmoError::NotAttached);
        }
        self.handles.set_visible(true);
        Ok(())
    }

    /// Hide the handles, committing any drag in progress
    pub fn hide<H: SceneHost>(&mut self, ctx: &mut GizmoContext<H>) {
        self.deactivate(ctx);
        self.handles.set_visible(false);
    }

    /// Hide and forget the target
    pub fn detach<H: SceneHost>(&mut self, ctx: &mut GizmoContext<H>) {
        self.hide(ctx);
        if let Some(target) = self.target.take() {
            debug!("[GIZMO] Detached from {}", target);
        }
        self.face_anchor = None;
        self.placement = None;
        self.strategy = None;
    }

    /// End any interaction in progress, for example when the active tool
    /// changes. A drag is committed at its current value.
    pub fn deactivate<H: SceneHost>(&mut self, ctx: &mut GizmoContext<H>) {
        if self.is_dragging() {
            debug!("[GIZMO] Deactivated mid-drag, committing current value");
            self.end_drag(ctx, true);
        }
        ctx.navigation.resume();
        self.handles.reset_visuals();
        self.state = InteractionState::Idle;
    }

    /// The scene removed `target`. Aborts a drag on it without further edits.
    pub fn on_target_removed<H: SceneHost>(&mut self, ctx: &mut GizmoContext<H>, target: TargetId) {
        if self.target != Some(target) {
            return;
        }
        if self.is_dragging() {
            warn!("[GIZMO] Target {} removed mid-drag, aborting", target);
            self.end_drag(ctx, false);
        }
        self.detach(ctx);
    }

    /// Tear everything down. The controller can be attached again afterwards.
    pub fn dispose<H: SceneHost, S: PointerSource>(&mut self, ctx: &mut GizmoContext<H>, source: &mut S) {
        self.detach(ctx);
        self.disconnect(source);
        self.events.clear();
    }

    pub fn connect<S: PointerSource>(&mut self, source: &mut S) {
        if self.subscription.is_none() {
            self.subscription = Some(source.subscribe());
        }
    }

    pub fn disconnect<S: PointerSource>(&mut self, source: &mut S) {
        if let Some(id) = self.subscription.take() {
            source.unsubscribe(id);
        }
    }

    /// Handle every pending pointer event and return the ones the gizmo did
    /// not consume
    pub fn pump<H: SceneHost, S: PointerSource>(
        &mut self,
        ctx: &mut GizmoContext<H>,
        source: &mut S,
    ) -> Vec<PointerEvent> {
        let Some(id) = self.subscription else {
            return Vec::new();
        };
        source
            .poll(id)
            .into_iter()
            .filter(|event| !self.handle_pointer(ctx, *event))
            .collect()
    }

    /// Returns `true` when the gizmo consumed the event
    pub fn handle_pointer<H: SceneHost>(&mut self, ctx: &mut GizmoContext<H>, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Move { position } => {
                if self.is_dragging() {
                    self.drag_to(ctx, position);
                    true
                } else {
                    self.update_hover(ctx, position);
                    false
                }
            }
            PointerEvent::Down { position } => {
                if self.is_dragging() {
                    // One session at a time
                    return true;
                }
                match self.hit(ctx, position) {
                    Some(handle) => self.begin_drag(ctx, handle, position),
                    None => false,
                }
            }
            PointerEvent::Up { position } => {
                if !self.is_dragging() {
                    return false;
                }
                self.drag_to(ctx, position);
                self.end_drag(ctx, true);
                self.update_hover(ctx, position);
                true
            }
        }
    }

    /// Events emitted since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<GizmoEvent> {
        std::mem::take(&mut self.events)
    }

    fn hit<H: SceneHost>(&self, ctx: &GizmoContext<H>, position: Vec2) -> Option<HandleId> {
        let camera = ctx.camera?;
        let placement = self.placement.as_ref()?;
        self.handles.hit_test(camera, placement, position, &self.settings)
    }

    fn update_hover<H: SceneHost>(&mut self, ctx: &GizmoContext<H>, position: Vec2) {
        let hovered = self.hit(ctx, position);
        self.handles.set_hovered(hovered);
        self.state = match hovered {
            Some(handle) => InteractionState::Hover(handle),
            None => InteractionState::Idle,
        };
    }

    fn begin_drag<H: SceneHost>(&mut self, ctx: &mut GizmoContext<H>, handle: HandleId, position: Vec2) -> bool {
        let (Some(target), Some(placement)) = (self.target, self.placement) else {
            return false;
        };
        let Some(object) = ctx.host.target(target) else {
            warn!("[GIZMO] Target {} vanished before drag start", target);
            self.detach(ctx);
            return false;
        };

        let handle_state = self.handles.handle(handle);
        let editor = Editor::for_handle(handle_state.kind, &self.settings);
        let session = DragSession::start(
            object,
            handle,
            position,
            handle_state.axis_or_normal,
            placement.position,
        );
        debug!(
            "[GIZMO] Drag start on {:?} of {} along {:?}",
            handle, target, session.reference_direction_world
        );

        self.drag = Some(ActiveDrag { session, editor });
        self.handles.set_hovered(None);
        self.handles.set_visual(handle, HandleVisual::Dragging);
        self.state = InteractionState::Dragging(handle);
        ctx.navigation.suspend();
        true
    }

    fn drag_to<H: SceneHost>(&mut self, ctx: &mut GizmoContext<H>, position: Vec2) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };

        let session = &drag.session;
        let projected = ctx.camera.ok_or(GizmoError::NoCamera).and_then(|camera| {
            self.projector.project(
                camera,
                session.gizmo_position,
                session.reference_direction_world,
                drag.editor.parameter_kind(),
                session.start_screen_pos,
                position,
            )
        });
        let value = match projected {
            Ok(value) => value,
            Err(e) => {
                debug!("[GIZMO] Drag update skipped: {}", e);
                return;
            }
        };

        match drag.editor.apply(ctx.host, session, value) {
            Ok(outcome) => {
                drag.session.last_value = value;
                let event = drag.editor.event(&drag.session, &outcome, value, true);
                self.events.push(event);
            }
            Err(GizmoError::StaleTarget(target)) => {
                warn!("[GIZMO] Target {} disappeared mid-drag, aborting", target);
                self.end_drag(ctx, false);
                self.detach(ctx);
            }
            Err(e) => debug!("[GIZMO] Drag update rejected: {}", e),
        }
    }

    /// Leave the dragging state. With `commit` the last applied value is
    /// committed and the gizmo repositioned; navigation is restored either way.
    fn end_drag<H: SceneHost>(&mut self, ctx: &mut GizmoContext<H>, commit: bool) {
        let drag = self.drag.take();
        ctx.navigation.resume();
        self.handles.reset_visuals();
        self.state = InteractionState::Idle;

        let Some(ActiveDrag { session, editor }) = drag else {
            return;
        };
        if !commit {
            return;
        }

        let outcome = match editor.commit(ctx.host, &session, session.last_value) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("[GIZMO] Commit on {} failed: {}", session.target, e);
                return;
            }
        };
        self.events
            .push(editor.event(&session, &outcome, session.last_value, false));

        let Some(object) = ctx.host.target(session.target) else {
            return;
        };
        let (placement, strategy) = match outcome {
            EditOutcome::Extruded(result) => match self.face_anchor {
                Some(anchor) => {
                    let moved = FaceAnchor {
                        point: anchor.point + result.face_direction * result.applied_distance,
                        normal: anchor.normal,
                    };
                    self.face_anchor = Some(moved);
                    self.positioner.face_anchored(object, moved, true, ctx.camera)
                }
                None => (
                    self.positioner.bounds_anchored(object, Vec3::Y),
                    PlacementStrategy::BoundsAnchored,
                ),
            },
            EditOutcome::Rotated(_) => self.positioner.bounds_or_fallback(object, ctx.camera),
        };
        info!(
            "[GIZMO] Committed {:?} on {}: {:.3}",
            session.active_handle, session.target, session.last_value
        );
        self.placement = Some(placement);
        self.strategy = Some(strategy);
    }
}
