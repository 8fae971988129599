//! Scene model: the owner of every target on the workbench

use crate::geometry::primitive::Primitive;
use crate::geometry::projection::CameraView;
use crate::geometry::ray::intersect_primitive;
use crate::scene::host::{PickHit, SceneHost};
use crate::scene::target::{TargetId, TargetObject};
use bevy::prelude::*;
use std::collections::BTreeMap;

/// All targets, keyed by identity
#[derive(Resource, Debug, Default)]
pub struct SceneModel {
    targets: BTreeMap<TargetId, TargetObject>,
    next_id: u64,
}

impl SceneModel {
    /// Reserve a fresh identity
    pub fn allocate_id(&mut self) -> TargetId {
        self.next_id += 1;
        TargetId(self.next_id)
    }

    /// Add a target, replacing any previous target with the same id
    pub fn insert(&mut self, target: TargetObject) -> TargetId {
        let id = target.id;
        self.next_id = self.next_id.max(id.0);
        debug!("[SCENE] Added {} '{}'", id, target.name);
        self.targets.insert(id, target);
        id
    }

    pub fn remove(&mut self, id: TargetId) -> Option<TargetObject> {
        let removed = self.targets.remove(&id);
        if removed.is_some() {
            debug!("[SCENE] Removed {}", id);
        }
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetObject> {
        self.targets.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = TargetId> + '_ {
        self.targets.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Closest target under a screen point that passes `filter`
    pub fn pick_screen(
        &self,
        camera: &CameraView,
        screen: Vec2,
        filter: impl Fn(&TargetObject) -> bool,
    ) -> Option<PickHit> {
        let ray = camera.screen_to_ray(screen)?;
        self.targets
            .values()
            .filter(|target| filter(target))
            .filter_map(|target| {
                let hit =
                    intersect_primitive(ray, &target.primitive, target.position, target.orientation)?;
                Some(PickHit {
                    target: target.id,
                    point: hit.point,
                    face_index: hit.face_index,
                    normal: (target.orientation * hit.local_normal).normalize_or_zero(),
                    distance: hit.distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

impl SceneHost for SceneModel {
    fn target(&self, id: TargetId) -> Option<&TargetObject> {
        self.targets.get(&id)
    }

    fn target_mut(&mut self, id: TargetId) -> Option<&mut TargetObject> {
        self.targets.get_mut(&id)
    }

    fn rebuild_primitive(&mut self, id: TargetId, primitive: Primitive) -> bool {
        match self.targets.get_mut(&id) {
            Some(target) => {
                target.primitive = primitive;
                target.revision += 1;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    fn camera() -> CameraView {
        CameraView::looking_at(
            Vec3::new(0.0, 0.0, 12.0),
            Vec3::ZERO,
            Vec3::Y,
            FRAC_PI_4,
            Vec2::new(1280.0, 720.0),
        )
    }

    fn cube(model: &mut SceneModel, name: &str, position: Vec3) -> TargetId {
        let id = model.allocate_id();
        model.insert(
            TargetObject::new(
                id,
                name,
                Primitive::Box {
                    width: 2.0,
                    height: 2.0,
                    depth: 2.0,
                },
            )
            .with_position(position),
        )
    }

    #[test]
    fn test_pick_returns_nearest_front_face() {
        let mut model = SceneModel::default();
        let back = cube(&mut model, "back", Vec3::new(0.0, 0.0, -5.0));
        let front = cube(&mut model, "front", Vec3::ZERO);

        let center = camera().world_to_screen(Vec3::ZERO).unwrap();
        let hit = model.pick_screen(&camera(), center, |_| true).unwrap();
        assert_eq!(hit.target, front);
        assert!((hit.normal - Vec3::Z).length() < 1e-5);
        assert!((hit.point.z - 1.0).abs() < 1e-4);

        // Filtering out the front cube exposes the one behind it
        let hit = model.pick_screen(&camera(), center, |t| t.id != front).unwrap();
        assert_eq!(hit.target, back);
    }

    #[test]
    fn test_pick_misses_empty_space() {
        let mut model = SceneModel::default();
        cube(&mut model, "cube", Vec3::ZERO);
        assert!(model.pick_screen(&camera(), Vec2::new(5.0, 5.0), |_| true).is_none());
    }

    #[test]
    fn test_rebuild_keeps_identity_and_bumps_revision() {
        let mut model = SceneModel::default();
        let id = cube(&mut model, "cube", Vec3::ZERO);
        let taller = Primitive::Box {
            width: 2.0,
            height: 5.0,
            depth: 2.0,
        };
        assert!(model.rebuild_primitive(id, taller));
        let target = model.target(id).unwrap();
        assert_eq!(target.primitive, taller);
        assert_eq!(target.revision, 1);

        model.remove(id);
        assert!(!model.rebuild_primitive(id, taller));
        assert!(!model.contains(id));
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut model = SceneModel::default();
        let first = cube(&mut model, "a", Vec3::ZERO);
        model.remove(first);
        let second = model.allocate_id();
        assert_ne!(first, second);
    }
}
