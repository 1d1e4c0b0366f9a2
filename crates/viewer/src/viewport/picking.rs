use glam::Vec3;

use super::mesh::{MeshData, MESH_STRIDE};
use crate::scene::{Part, Scene};

/// A ray in world space
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Compute AABB from mesh vertex positions
    pub fn from_mesh(data: &MeshData) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);

        for chunk in data.vertices.chunks_exact(MESH_STRIDE) {
            let p = Vec3::new(chunk[0], chunk[1], chunk[2]);
            min = min.min(p);
            max = max.max(p);
        }

        Self { min, max }
    }
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let inv_dir = ray.direction.recip();

    let t1 = (aabb.min - ray.origin) * inv_dir;
    let t2 = (aabb.max - ray.origin) * inv_dir;

    let tmin = t1.min(t2).max_element();
    let tmax = t1.max(t2).min_element();

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Möller-Trumbore ray-triangle intersection algorithm.
/// Returns the distance along the ray if hit, or None if no intersection.
pub fn ray_triangle_intersect(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    // Intersection is behind ray origin
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

/// Nearest triangle hit of a mesh, in the mesh's local units
pub fn ray_mesh(ray: &Ray, mesh: &MeshData) -> Option<f32> {
    (0..mesh.triangle_count())
        .filter_map(|tri| {
            let [v0, v1, v2] = mesh.triangle(tri);
            ray_triangle_intersect(ray, v0, v1, v2)
        })
        .min_by(|a, b| a.total_cmp(b))
}

/// A part struck by a pick ray
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PartHit {
    /// Index into the part list passed to [`pick_part`]
    pub part_index: usize,
    /// World-space distance from the ray origin
    pub distance: f32,
}

/// Pick the nearest part whose mesh is intersected by the ray.
///
/// The ray is moved into each renderable's local frame (translation plus
/// uniform scale), tested against the local AABB first and then every
/// triangle. On equal distances the earlier part wins.
pub fn pick_part(ray: &Ray, parts: &[Part], scene: &Scene) -> Option<PartHit> {
    let mut best: Option<PartHit> = None;

    for (part_index, part) in parts.iter().enumerate() {
        let Some(renderable) = scene.get(part.renderable) else {
            continue;
        };
        if renderable.scale <= 0.0 {
            continue;
        }

        let local = Ray {
            origin: (ray.origin - renderable.position) / renderable.scale,
            direction: ray.direction,
        };
        if ray_aabb(&local, &renderable.bounds).is_none() {
            continue;
        }

        if let Some(t) = ray_mesh(&local, &renderable.mesh) {
            let distance = t * renderable.scale;
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(PartHit {
                    part_index,
                    distance,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::mesh;

    fn ray_down_z(x: f32, y: f32) -> Ray {
        Ray {
            origin: Vec3::new(x, y, 10.0),
            direction: Vec3::NEG_Z,
        }
    }

    #[test]
    fn test_ray_aabb_hit_and_miss() {
        let b = Aabb {
            min: Vec3::splat(-1.0),
            max: Vec3::splat(1.0),
        };
        assert_eq!(ray_aabb(&ray_down_z(0.0, 0.0), &b), Some(9.0));
        assert_eq!(ray_aabb(&ray_down_z(2.0, 0.0), &b), None);
    }

    #[test]
    fn test_ray_aabb_from_inside() {
        let b = Aabb {
            min: Vec3::splat(-1.0),
            max: Vec3::splat(1.0),
        };
        let ray = Ray {
            origin: Vec3::ZERO,
            direction: Vec3::X,
        };
        assert_eq!(ray_aabb(&ray, &b), Some(1.0));
    }

    #[test]
    fn test_ray_triangle_behind_origin() {
        let ray = Ray {
            origin: Vec3::new(0.2, 0.2, -1.0),
            direction: Vec3::NEG_Z,
        };
        let hit = ray_triangle_intersect(&ray, Vec3::ZERO, Vec3::X, Vec3::Y);
        assert!(hit.is_none());
    }

    #[test]
    fn test_ray_mesh_nearest_face() {
        let cube = mesh::cube(2.0, 2.0, 2.0);
        let t = ray_mesh(&ray_down_z(0.1, 0.1), &cube).unwrap();
        assert!((t - 9.0).abs() < 1e-5);
    }

    #[test]
    fn test_aabb_from_mesh() {
        let cube = mesh::cube(2.0, 4.0, 6.0);
        let b = Aabb::from_mesh(&cube);
        assert_eq!(b.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(b.max, Vec3::new(1.0, 2.0, 3.0));
    }
}
