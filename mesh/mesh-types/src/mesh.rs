//! Indexed triangle mesh.

use nalgebra::Point3;

use crate::{Aabb, Triangle};

/// An indexed triangle mesh.
///
/// Stores vertex positions and faces separately, with faces referencing
/// positions by index. Meshes are loaded once and treated as immutable by
/// the label-transfer pipeline; every derived quantity (centroids,
/// triangles, bounds) is computed on demand.
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, TriMesh};
///
/// let mesh = TriMesh::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///         Point3::new(1.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2], [1, 3, 2]],
/// );
///
/// assert_eq!(mesh.vertex_count(), 4);
/// assert_eq!(mesh.face_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriMesh {
    /// Vertex positions.
    pub positions: Vec<Point3<f64>>,
    /// Triangle faces as indices into `positions`.
    pub faces: Vec<[u32; 3]>,
}

impl TriMesh {
    /// Create an empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh from positions and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(positions: Vec<Point3<f64>>, faces: Vec<[u32; 3]>) -> Self {
        Self { positions, faces }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Whether the mesh has no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Concrete triangle for a face index.
    ///
    /// Returns `None` when the face index is out of range.
    #[must_use]
    pub fn triangle(&self, face: usize) -> Option<Triangle> {
        let &[i0, i1, i2] = self.faces.get(face)?;
        Some(Triangle::new(
            self.positions[i0 as usize],
            self.positions[i1 as usize],
            self.positions[i2 as usize],
        ))
    }

    /// Iterator over all faces as concrete triangles.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.faces.iter().map(|&[i0, i1, i2]| {
            Triangle::new(
                self.positions[i0 as usize],
                self.positions[i1 as usize],
                self.positions[i2 as usize],
            )
        })
    }

    /// Centroid of one face.
    ///
    /// Returns `None` when the face index is out of range.
    #[inline]
    #[must_use]
    pub fn face_centroid(&self, face: usize) -> Option<Point3<f64>> {
        self.triangle(face).map(|t| t.centroid())
    }

    /// Centroids of every face, in face order.
    ///
    /// These are the query points used to build face correspondences.
    #[must_use]
    pub fn face_centroids(&self) -> Vec<Point3<f64>> {
        self.triangles().map(|t| t.centroid()).collect()
    }

    /// Bounding box of all vertex positions.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.positions.iter())
    }
}
