//! Ray intersection against oriented primitives, used for picking

use crate::geometry::primitive::Primitive;
use bevy::math::Ray3d;
use bevy::prelude::*;

/// Where a ray first enters a primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance along the ray
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Outward normal at the hit, in the primitive's local space
    pub local_normal: Vec3,
    /// Triangle index of the hit box face, `None` for curved surfaces
    pub face_index: Option<u32>,
}

/// Intersect `ray` with `primitive` placed at `position` with `orientation`
pub fn intersect_primitive(
    ray: Ray3d,
    primitive: &Primitive,
    position: Vec3,
    orientation: Quat,
) -> Option<RayHit> {
    let inverse = orientation.inverse();
    let origin = inverse * (ray.origin - position);
    let direction = inverse * *ray.direction;

    let (distance, local_normal, face_index) = match *primitive {
        Primitive::Box { .. } => {
            let (t, normal) = local_box(origin, direction, primitive.half_extents())?;
            (t, normal, Primitive::box_face_index(normal))
        }
        Primitive::Cylinder { diameter, height } => {
            let (t, normal) = local_cylinder(origin, direction, diameter * 0.5, height * 0.5)?;
            // Caps are flat and behave like box faces
            let face = if normal.y.abs() > 0.5 {
                Primitive::box_face_index(normal)
            } else {
                None
            };
            (t, normal, face)
        }
    };

    Some(RayHit {
        distance,
        point: ray.get_point(distance),
        local_normal,
        face_index,
    })
}

/// Slab test against a centered box; returns entry distance and entry normal
fn local_box(origin: Vec3, direction: Vec3, half: Vec3) -> Option<(f32, Vec3)> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    let mut normal = Vec3::ZERO;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        let h = half[axis];
        if d.abs() < f32::EPSILON {
            if o < -h || o > h {
                return None;
            }
            continue;
        }
        let mut t0 = (-h - o) / d;
        let mut t1 = (h - o) / d;
        // Entering through the negative face when moving in +d
        let mut sign = -1.0;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
            sign = 1.0;
        }
        if t0 > t_near {
            t_near = t0;
            normal = Vec3::ZERO;
            normal[axis] = sign;
        }
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    (t_near >= 0.0).then_some((t_near, normal))
}

/// Intersection with a capped cylinder standing on local Y
fn local_cylinder(origin: Vec3, direction: Vec3, radius: f32, half_height: f32) -> Option<(f32, Vec3)> {
    let mut best: Option<(f32, Vec3)> = None;
    let mut consider = |t: f32, normal: Vec3| {
        if t >= 0.0 && best.is_none_or(|(current, _)| t < current) {
            best = Some((t, normal));
        }
    };

    // Side wall
    let a = direction.x * direction.x + direction.z * direction.z;
    if a > f32::EPSILON {
        let b = 2.0 * (origin.x * direction.x + origin.z * direction.z);
        let c = origin.x * origin.x + origin.z * origin.z - radius * radius;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant >= 0.0 {
            let root = discriminant.sqrt();
            for t in [(-b - root) / (2.0 * a), (-b + root) / (2.0 * a)] {
                let hit = origin + direction * t;
                if hit.y.abs() <= half_height {
                    consider(t, Vec3::new(hit.x, 0.0, hit.z).normalize_or_zero());
                }
            }
        }
    }

    // Caps
    if direction.y.abs() > f32::EPSILON {
        for cap in [half_height, -half_height] {
            let t = (cap - origin.y) / direction.y;
            let hit = origin + direction * t;
            if hit.x * hit.x + hit.z * hit.z <= radius * radius {
                consider(t, Vec3::Y * cap.signum());
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn ray(origin: Vec3, direction: Vec3) -> Ray3d {
        Ray3d::new(origin, Dir3::new(direction).unwrap())
    }

    #[test]
    fn test_box_hit_reports_entry_face() {
        let cube = Primitive::Box {
            width: 2.0,
            height: 2.0,
            depth: 2.0,
        };
        let hit = intersect_primitive(
            ray(Vec3::new(10.0, 0.2, 0.1), Vec3::NEG_X),
            &cube,
            Vec3::ZERO,
            Quat::IDENTITY,
        )
        .unwrap();
        assert!((hit.distance - 9.0).abs() < 1e-5);
        assert_eq!(hit.local_normal, Vec3::X);
        assert_eq!(hit.face_index, Some(4));
        assert!((hit.point.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_rotated_box_uses_local_normal() {
        let slab = Primitive::Box {
            width: 4.0,
            height: 0.5,
            depth: 2.0,
        };
        // Quarter turn about Z moves local +X to world +Y
        let hit = intersect_primitive(
            ray(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y),
            &slab,
            Vec3::ZERO,
            Quat::from_rotation_z(FRAC_PI_2),
        )
        .unwrap();
        assert!((hit.local_normal - Vec3::X).length() < 1e-5);
        assert!((hit.point.y - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_miss_and_behind() {
        let cube = Primitive::Box {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        };
        assert!(intersect_primitive(ray(Vec3::new(0.0, 5.0, 5.0), Vec3::NEG_Z), &cube, Vec3::ZERO, Quat::IDENTITY).is_none());
        assert!(intersect_primitive(ray(Vec3::new(0.0, 0.0, 5.0), Vec3::Z), &cube, Vec3::ZERO, Quat::IDENTITY).is_none());
    }

    #[test]
    fn test_cylinder_wall_and_cap() {
        let cylinder = Primitive::Cylinder {
            diameter: 2.0,
            height: 1.0,
        };
        let side = intersect_primitive(ray(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z), &cylinder, Vec3::ZERO, Quat::IDENTITY).unwrap();
        assert!((side.distance - 4.0).abs() < 1e-5);
        assert!((side.local_normal - Vec3::Z).length() < 1e-5);
        assert_eq!(side.face_index, None);

        let top = intersect_primitive(ray(Vec3::new(0.3, 5.0, 0.0), Vec3::NEG_Y), &cylinder, Vec3::ZERO, Quat::IDENTITY).unwrap();
        assert_eq!(top.local_normal, Vec3::Y);
        assert_eq!(top.face_index, Some(8));
    }
}
