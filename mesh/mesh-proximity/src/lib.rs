//! Nearest-surface-point queries for Relabel.
//!
//! This crate answers "which triangle of this mesh is closest to point P"
//! for arbitrary query points, against arbitrary (non-convex) triangulated
//! surfaces. Distance is measured to the closest point *on* a triangle, not
//! just to its vertices, so coarse and fine tessellations of the same
//! surface agree on where the surface is.
//!
//! - [`TriangleBvh`] - A static axis-aligned bounding-box tree over a
//!   mesh's triangles
//! - [`NearestTriangle`] - One query result: face index, closest surface
//!   point, squared distance
//!
//! # Example
//!
//! ```
//! use mesh_proximity::TriangleBvh;
//! use mesh_types::{Point3, TriMesh};
//!
//! let mesh = TriMesh::from_parts(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ],
//!     vec![[0, 1, 2]],
//! );
//!
//! let index = TriangleBvh::build(&mesh);
//! let hit = index.nearest(&Point3::new(0.25, 0.25, 2.0)).unwrap();
//! assert_eq!(hit.face, 0);
//! assert!((hit.distance_squared - 4.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bvh;

pub use bvh::{NearestTriangle, TriangleBvh, DEFAULT_LEAF_SIZE};
