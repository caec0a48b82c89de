//! Bounding boxes and overlap tests.
//!
//! Pure functions over body transforms and mesh vertices; no state, no
//! caching. Boxes are recomputed for every query.

use glam::{Mat4, Vec3};

use super::mesh::{Mesh, MeshRegistry};
use super::state::Body;

/// World-space axis-aligned rectangle, y-up (top > bottom).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Rectangle plus the centroid/extent the overlay pass draws with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub rect: Rect,
    /// Box width/height as a scale for a unit outline quad.
    pub extent: Vec3,
    pub center: Vec3,
}

/// World-space box of a body's mesh under its scale-then-rotate transform.
///
/// The local rectangle starts zeroed, so the result always contains the
/// body's origin even when every vertex lands off to one side. Hitboxes
/// therefore run a little generous for asymmetric meshes; gameplay is
/// tuned around that.
pub fn bounding_box(body: &Body, mesh: &Mesh) -> BoundingBox {
    let transform =
        Mat4::from_rotation_z(body.rotation_deg.to_radians()) * Mat4::from_scale(body.scale);

    let mut rect = Rect::default();
    for vertex in mesh.positions() {
        let v = transform.transform_point3(vertex);
        if v.x < rect.left {
            rect.left = v.x;
        }
        if v.x > rect.right {
            rect.right = v.x;
        }
        if v.y > rect.top {
            rect.top = v.y;
        }
        if v.y < rect.bottom {
            rect.bottom = v.y;
        }
    }

    let width = rect.right - rect.left;
    let height = rect.top - rect.bottom;
    rect.left += body.position.x;
    rect.right = rect.left + width;
    rect.top += body.position.y;
    rect.bottom = rect.top - height;

    BoundingBox {
        rect,
        extent: Vec3::new(width, height, 1.0),
        center: Vec3::new(rect.right - width * 0.5, rect.top - height * 0.5, 0.0),
    }
}

/// Axis-aligned overlap; touching edges count as intersecting.
#[inline]
pub fn rects_intersect(a: &Rect, b: &Rect) -> bool {
    if a.left > b.right {
        return false;
    }
    if b.left > a.right {
        return false;
    }
    if a.bottom > b.top {
        return false;
    }
    if b.bottom > a.top {
        return false;
    }
    true
}

/// Box-overlap test between two live bodies. Deleted bodies never collide;
/// a stale mesh handle counts as no hit.
pub fn bodies_collide(a: &Body, b: &Body, meshes: &MeshRegistry) -> bool {
    if a.deleted || b.deleted {
        return false;
    }
    let Some(mesh_a) = meshes.get(a.sprite.mesh) else {
        return false;
    };
    let Some(mesh_b) = meshes.get(b.sprite.mesh) else {
        return false;
    };
    rects_intersect(&bounding_box(a, mesh_a).rect, &bounding_box(b, mesh_b).rect)
}

/// Moller-Trumbore ray/triangle test, boolean only. Picking helper for an
/// outer shell; the frame loop itself stays on boxes.
pub fn ray_triangle_intersect(origin: Vec3, direction: Vec3, v0: Vec3, v1: Vec3, v2: Vec3) -> bool {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let p = direction.cross(edge2);
    let det = edge1.dot(p);
    // Near-zero determinant: ray parallel to the triangle plane.
    if det > -EPSILON && det < EPSILON {
        return false;
    }

    let inv_det = 1.0 / det;
    let s = origin - v0;
    let u = inv_det * s.dot(p);
    if u < 0.0 || u > 1.0 {
        return false;
    }

    let q = s.cross(edge1);
    let v = inv_det * direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return false;
    }

    // Hits behind the origin do not count.
    inv_det * edge2.dot(q) > EPSILON
}
