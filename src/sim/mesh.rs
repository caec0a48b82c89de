//! CPU-side mesh data behind opaque handles.
//!
//! The renderer treats [`MeshId`] as an opaque index to upload/draw by; the
//! simulation resolves the same id here to read vertex positions for
//! bounding boxes. Ids are dense and zero-based, handed out in creation
//! order; "no mesh" is `Option<MeshId>` at the call site, never a reserved
//! slot.

use glam::Vec3;

/// Handle to a registered mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub u32);

impl MeshId {
    /// Built-ins registered by [`MeshRegistry::new`], in slot order.
    pub const TRIANGLE: MeshId = MeshId(0);
    pub const RECTANGLE: MeshId = MeshId(1);
    pub const RECTANGLE_UV: MeshId = MeshId(2);
    pub const RECTANGLE_LINES: MeshId = MeshId(3);
}

/// How a mesh's vertex stream is assembled when drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    TriangleList,
    LineList,
}

/// Interleaved vertex data; the first three floats of each vertex are the
/// position, anything past that (UVs) is renderer-only.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<f32>,
    pub stride: usize,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.stride
    }

    /// Positions only, stride-stepped. `stride` must be at least 3.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices
            .chunks_exact(self.stride)
            .map(|v| Vec3::new(v[0], v[1], v[2]))
    }
}

/// All mesh data for a run. Built once at init; ids stay valid for the
/// lifetime of the state that owns the registry.
#[derive(Debug, Clone)]
pub struct MeshRegistry {
    meshes: Vec<Mesh>,
}

impl MeshRegistry {
    /// Registry seeded with the built-in unit shapes.
    pub fn new() -> Self {
        let mut registry = Self { meshes: Vec::new() };

        // Unit triangle.
        registry.create(
            vec![
                -0.5, -0.5, 0.0, //
                0.0, 0.5, 0.0, //
                0.5, -0.5, 0.0,
            ],
            3,
        );
        // Unit quad, two triangles.
        registry.create(
            vec![
                -0.5, -0.5, 0.0, //
                -0.5, 0.5, 0.0, //
                0.5, 0.5, 0.0, //
                -0.5, -0.5, 0.0, //
                0.5, 0.5, 0.0, //
                0.5, -0.5, 0.0,
            ],
            3,
        );
        // Unit quad with UVs for textured sprites.
        registry.create(
            vec![
                -0.5, -0.5, 0.0, 0.0, 1.0, //
                -0.5, 0.5, 0.0, 0.0, 0.0, //
                0.5, 0.5, 0.0, 1.0, 0.0, //
                -0.5, -0.5, 0.0, 0.0, 1.0, //
                0.5, 0.5, 0.0, 1.0, 0.0, //
                0.5, -0.5, 0.0, 1.0, 1.0,
            ],
            5,
        );
        // Unit quad outline as four line segments.
        registry.create(
            vec![
                -0.5, -0.5, 0.0, //
                -0.5, 0.5, 0.0, //
                -0.5, 0.5, 0.0, //
                0.5, 0.5, 0.0, //
                0.5, 0.5, 0.0, //
                0.5, -0.5, 0.0, //
                0.5, -0.5, 0.0, //
                -0.5, -0.5, 0.0,
            ],
            3,
        );

        registry
    }

    /// Register interleaved vertex data, returning the next dense id.
    pub fn create(&mut self, vertices: Vec<f32>, stride: usize) -> MeshId {
        let id = MeshId(self.meshes.len() as u32);
        self.meshes.push(Mesh { vertices, stride });
        id
    }

    pub fn get(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

impl Default for MeshRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The nine-vertex asteroid silhouette, three triangles sharing a ridge.
pub fn asteroid_vertices() -> Vec<f32> {
    vec![
        -0.5, 0.0, 0.0, //
        -0.2, 0.5, 0.0, //
        0.5, 0.5, 0.0, //
        -0.5, 0.0, 0.0, //
        0.5, 0.5, 0.0, //
        0.1, -0.5, 0.0, //
        0.1, -0.5, 0.0, //
        0.5, 0.5, 0.0, //
        0.5, -0.5, 0.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_are_dense() {
        let registry = MeshRegistry::new();
        assert_eq!(registry.len(), 4);
        assert!(registry.get(MeshId::TRIANGLE).is_some());
        assert!(registry.get(MeshId::RECTANGLE_LINES).is_some());
        assert!(registry.get(MeshId(99)).is_none());
    }

    #[test]
    fn test_create_appends_after_builtins() {
        let mut registry = MeshRegistry::new();
        let id = registry.create(asteroid_vertices(), 3);
        assert_eq!(id, MeshId(4));
        let mesh = registry.get(id).unwrap();
        assert_eq!(mesh.vertex_count(), 9);
    }

    #[test]
    fn test_positions_skip_uv_floats() {
        let registry = MeshRegistry::new();
        let quad = registry.get(MeshId::RECTANGLE_UV).unwrap();
        assert_eq!(quad.stride, 5);
        let positions: Vec<Vec3> = quad.positions().collect();
        assert_eq!(positions.len(), 6);
        // Corners stay on the unit quad regardless of the UV tail.
        assert_eq!(positions[1], Vec3::new(-0.5, 0.5, 0.0));
        assert_eq!(positions[5], Vec3::new(0.5, -0.5, 0.0));
    }

    #[test]
    fn test_outline_uses_line_pairs() {
        let registry = MeshRegistry::new();
        let lines = registry.get(MeshId::RECTANGLE_LINES).unwrap();
        assert_eq!(lines.vertex_count(), 8);
    }
}
