//! Core mesh types for Relabel.
//!
//! This crate provides the foundational geometry for the label-transfer
//! pipeline:
//!
//! - [`TriMesh`] - An immutable indexed triangle mesh
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Coordinate System
//!
//! All coordinates are `f64` and unit-agnostic. The pipeline never assumes
//! a particular orientation or winding: correspondence is built from face
//! centroids and surface distances only.
//!
//! # Example
//!
//! ```
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
//! assert_eq!(mesh.face_count(), 1);
//! let c = mesh.face_centroid(0).unwrap();
//! assert!((c.x - 1.0 / 3.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod mesh;
mod triangle;

pub use bounds::Aabb;
pub use mesh::TriMesh;
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
