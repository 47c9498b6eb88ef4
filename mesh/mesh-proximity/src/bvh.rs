//! Bounding-volume hierarchy for nearest-triangle queries.

use mesh_types::{Aabb, Point3, TriMesh, Triangle};
use rayon::prelude::*;
use smallvec::SmallVec;

/// Default maximum number of triangles per leaf node.
pub const DEFAULT_LEAF_SIZE: usize = 8;

/// Result of a nearest-triangle query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestTriangle {
    /// Index of the nearest face in the indexed mesh.
    pub face: u32,
    /// Closest point on that face's surface.
    pub point: Point3<f64>,
    /// Squared Euclidean distance from the query point to `point`.
    pub distance_squared: f64,
}

#[derive(Debug)]
enum Node {
    Leaf {
        bbox: Aabb,
        faces: SmallVec<[u32; 8]>,
    },
    Internal {
        bbox: Aabb,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn bbox(&self) -> &Aabb {
        match self {
            Self::Leaf { bbox, .. } | Self::Internal { bbox, .. } => bbox,
        }
    }
}

/// A static bounding-volume hierarchy over a mesh's triangles.
///
/// Built once per mesh and queried many times. Queries return the exact
/// closest point on the nearest triangle; ties between equidistant
/// triangles are broken deterministically (same build, same query, same
/// answer) by the fixed traversal order.
///
/// Degenerate (zero-area) triangles are indexed like any other face and
/// answer queries with the distance to their collapsed geometry.
#[derive(Debug)]
pub struct TriangleBvh {
    root: Option<Node>,
    triangles: Vec<Triangle>,
}

impl TriangleBvh {
    /// Build an index over a mesh with the default leaf size.
    #[must_use]
    pub fn build(mesh: &TriMesh) -> Self {
        Self::build_with_leaf_size(mesh, DEFAULT_LEAF_SIZE)
    }

    /// Build an index over a mesh with an explicit leaf size.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // face counts fit u32 by construction
    pub fn build_with_leaf_size(mesh: &TriMesh, max_leaf_size: usize) -> Self {
        let triangles: Vec<Triangle> = mesh.triangles().collect();
        if triangles.is_empty() {
            return Self {
                root: None,
                triangles,
            };
        }

        let bounds: Vec<Aabb> = triangles.iter().map(Aabb::from_triangle).collect();
        let order: Vec<u32> = (0..triangles.len() as u32).collect();
        let root = build_node(&bounds, order, max_leaf_size.max(1));

        Self {
            root: Some(root),
            triangles,
        }
    }

    /// Number of indexed triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the index holds no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Nearest triangle to a single query point.
    ///
    /// Returns `None` only when the index is empty.
    #[must_use]
    pub fn nearest(&self, point: &Point3<f64>) -> Option<NearestTriangle> {
        let root = self.root.as_ref()?;
        let mut best: Option<NearestTriangle> = None;
        self.descend(root, point, &mut best);
        best
    }

    /// Nearest triangle for every query point, in input order.
    ///
    /// Queries run in parallel; the result at position `i` always answers
    /// `points[i]`.
    #[must_use]
    pub fn nearest_batch(&self, points: &[Point3<f64>]) -> Vec<Option<NearestTriangle>> {
        points.par_iter().map(|p| self.nearest(p)).collect()
    }

    fn descend(&self, node: &Node, point: &Point3<f64>, best: &mut Option<NearestTriangle>) {
        match node {
            Node::Leaf { faces, .. } => {
                for &face in faces {
                    let closest = self.triangles[face as usize].closest_point(point);
                    let distance_squared = (closest - point).norm_squared();
                    let improves = best
                        .as_ref()
                        .is_none_or(|b| distance_squared < b.distance_squared);
                    if improves {
                        *best = Some(NearestTriangle {
                            face,
                            point: closest,
                            distance_squared,
                        });
                    }
                }
            }
            Node::Internal { left, right, .. } => {
                let dl = left.bbox().distance_squared_to(point);
                let dr = right.bbox().distance_squared_to(point);
                // Nearer child first; on equal bounds keep left-before-right
                // so tie-breaking stays deterministic.
                let (first, d_first, second, d_second) = if dr < dl {
                    (right, dr, left, dl)
                } else {
                    (left, dl, right, dr)
                };
                if best.as_ref().is_none_or(|b| d_first <= b.distance_squared) {
                    self.descend(first, point, best);
                }
                if best.as_ref().is_none_or(|b| d_second <= b.distance_squared) {
                    self.descend(second, point, best);
                }
            }
        }
    }
}

fn build_node(bounds: &[Aabb], order: Vec<u32>, max_leaf_size: usize) -> Node {
    let mut bbox = Aabb::empty();
    for &i in &order {
        bbox.expand_box(&bounds[i as usize]);
    }

    if order.len() <= max_leaf_size {
        return Node::Leaf {
            bbox,
            faces: order.into_iter().collect(),
        };
    }

    // Median split on the longest axis of the node bounds. The stable sort
    // keeps construction deterministic even with coincident centers.
    let axis = bbox.longest_axis();
    let mut order = order;
    order.sort_by(|&a, &b| {
        let ca = bounds[a as usize].center();
        let cb = bounds[b as usize].center();
        ca[axis]
            .partial_cmp(&cb[axis])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mid = order.len() / 2;
    let right_order = order.split_off(mid);
    let left = build_node(bounds, order, max_leaf_size);
    let right = build_node(bounds, right_order, max_leaf_size);

    Node::Internal {
        bbox,
        left: Box::new(left),
        right: Box::new(right),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tetrahedron() -> TriMesh {
        TriMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, 1.0, 0.0),
                Point3::new(0.5, 0.5, 1.0),
            ],
            vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]],
        )
    }

    /// A row of disjoint triangles whose centroids sit at the given X
    /// coordinates on the z = 0 plane.
    fn strip(centers: &[f64]) -> TriMesh {
        let mut positions = Vec::new();
        let mut faces = Vec::new();
        for &x in centers {
            let base = u32::try_from(positions.len()).unwrap();
            positions.push(Point3::new(x - 0.1, -0.1, 0.0));
            positions.push(Point3::new(x + 0.1, -0.1, 0.0));
            positions.push(Point3::new(x, 0.2, 0.0));
            faces.push([base, base + 1, base + 2]);
        }
        TriMesh::from_parts(positions, faces)
    }

    fn brute_force(mesh: &TriMesh, point: &Point3<f64>) -> (usize, f64) {
        let mut best = (usize::MAX, f64::INFINITY);
        for (i, tri) in mesh.triangles().enumerate() {
            let d = tri.distance_squared_to(point);
            if d < best.1 {
                best = (i, d);
            }
        }
        best
    }

    #[test]
    fn empty_mesh_has_no_nearest() {
        let index = TriangleBvh::build(&TriMesh::new());
        assert!(index.is_empty());
        assert!(index.nearest(&Point3::new(0.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn single_triangle_hit() {
        let mesh = strip(&[0.0]);
        let index = TriangleBvh::build(&mesh);
        let hit = index.nearest(&Point3::new(0.0, 0.0, 3.0)).unwrap();
        assert_eq!(hit.face, 0);
        assert_relative_eq!(hit.distance_squared, 9.0);
        assert!((hit.point - Point3::new(0.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn picks_nearest_of_many() {
        let mesh = strip(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        // Leaf size 1 forces internal-node traversal.
        let index = TriangleBvh::build_with_leaf_size(&mesh, 1);
        for (query_x, expected) in [(0.2, 0), (3.9, 4), (8.6, 9), (-5.0, 0)] {
            let hit = index.nearest(&Point3::new(query_x, 0.0, 0.0)).unwrap();
            assert_eq!(hit.face, expected, "query at x = {query_x}");
        }
    }

    #[test]
    fn agrees_with_brute_force() {
        let mesh = tetrahedron();
        let index = TriangleBvh::build_with_leaf_size(&mesh, 1);
        let queries = [
            Point3::new(0.5, 0.5, 0.5),
            Point3::new(2.0, -1.0, 0.3),
            Point3::new(-1.0, 2.0, -1.0),
            Point3::new(0.5, 0.5, 5.0),
            Point3::new(0.0, 0.0, 0.0),
        ];
        for q in &queries {
            let hit = index.nearest(q).unwrap();
            let (_, expected_sq) = brute_force(&mesh, q);
            assert!(
                (hit.distance_squared - expected_sq).abs() < 1e-12,
                "mismatch at {q:?}"
            );
        }
    }

    #[test]
    fn on_surface_query_has_zero_distance() {
        let mesh = tetrahedron();
        let index = TriangleBvh::build(&mesh);
        // Centroid of the base face lies on the surface.
        let centroid = mesh.face_centroid(0).unwrap();
        let hit = index.nearest(&centroid).unwrap();
        assert!(hit.distance_squared < 1e-24);
    }

    #[test]
    fn batch_preserves_input_order() {
        let mesh = strip(&[0.0, 1.0, 2.0, 3.0]);
        let index = TriangleBvh::build(&mesh);
        let queries: Vec<Point3<f64>> = vec![
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ];
        let hits = index.nearest_batch(&queries);
        let faces: Vec<u32> = hits.into_iter().map(|h| h.unwrap().face).collect();
        assert_eq!(faces, vec![3, 0, 2, 1]);
    }

    #[test]
    fn degenerate_triangle_does_not_panic() {
        // One healthy face and one collapsed to a segment.
        let mesh = TriMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(5.0, 0.0, 0.0),
                Point3::new(6.0, 0.0, 0.0),
                Point3::new(7.0, 0.0, 0.0),
            ],
            vec![[0, 1, 2], [3, 4, 5]],
        );
        let index = TriangleBvh::build(&mesh);
        let hit = index.nearest(&Point3::new(6.0, 1.0, 0.0)).unwrap();
        assert_eq!(hit.face, 1);
        assert!((hit.distance_squared - 1.0).abs() < 1e-12);
        assert!(hit.distance_squared.is_finite());
    }

    #[test]
    fn repeated_queries_are_deterministic() {
        let mesh = strip(&[0.0, 1.0]);
        let index = TriangleBvh::build_with_leaf_size(&mesh, 1);
        // Exactly halfway between the two triangles.
        let q = Point3::new(0.5, 0.0, 0.0);
        let first = index.nearest(&q).unwrap();
        for _ in 0..10 {
            assert_eq!(index.nearest(&q).unwrap(), first);
        }
    }
}
