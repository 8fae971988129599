//! World-space bounds of oriented primitives

use crate::geometry::primitive::Primitive;
use bevy::prelude::*;

/// Axis-aligned bounding box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldAabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl WorldAabb {
    /// Bounds of a primitive placed at `position` with `orientation`
    pub fn from_primitive(primitive: &Primitive, position: Vec3, orientation: Quat) -> Self {
        let half = primitive.half_extents();
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for sign in corner_signs() {
            let corner = position + orientation * (half * sign);
            min = min.min(corner);
            max = max.max(corner);
        }
        Self { min, max }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// The eight corners of the box
    pub fn corners(&self) -> [Vec3; 8] {
        let center = self.center();
        let half = self.size() * 0.5;
        corner_signs().map(|sign| center + half * sign)
    }

    /// Largest signed distance of any corner from `origin` along `direction`
    pub fn max_projection(&self, origin: Vec3, direction: Vec3) -> f32 {
        self.corners()
            .iter()
            .map(|corner| (*corner - origin).dot(direction))
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Whether `point` lies inside the box (boundary excluded)
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpgt(self.min).all() && point.cmplt(self.max).all()
    }
}

fn corner_signs() -> [Vec3; 8] {
    [
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(-1.0, 1.0, 1.0),
        Vec3::new(1.0, 1.0, 1.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn test_rotated_box_grows_its_bounds() {
        let primitive = Primitive::Box {
            width: 2.0,
            height: 2.0,
            depth: 2.0,
        };
        let aabb = WorldAabb::from_primitive(&primitive, Vec3::ZERO, Quat::from_rotation_y(FRAC_PI_4));
        let expected = 2.0_f32.sqrt();
        assert!((aabb.max.x - expected).abs() < 1e-5);
        assert!((aabb.max.z - expected).abs() < 1e-5);
        assert!((aabb.max.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_max_projection_along_up() {
        let primitive = Primitive::Cylinder {
            diameter: 4.0,
            height: 1.0,
        };
        let aabb = WorldAabb::from_primitive(&primitive, Vec3::new(0.0, 3.0, 0.0), Quat::IDENTITY);
        assert!((aabb.max_projection(Vec3::new(0.0, 3.0, 0.0), Vec3::Y) - 0.5).abs() < 1e-6);
        assert!(aabb.contains(Vec3::new(0.0, 3.0, 0.0)));
        assert!(!aabb.contains(Vec3::new(0.0, 3.6, 0.0)));
    }
}
