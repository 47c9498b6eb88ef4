//! Label transfer between mesh tessellations for Relabel.
//!
//! Segmentation datasets often carry ground-truth labels on one
//! tessellation of a surface (the "raw" mesh) while training wants them
//! on another (a remeshed variant), or the other way around. This crate
//! moves per-face integer labels between the two through a
//! nearest-surface correspondence:
//!
//! - [`face_correspondence`] - map every face of one mesh to the nearest
//!   face of another, queried at face centroids
//! - [`transfer_labels`] - propagate labels through such a mapping
//! - [`resolve_labels`] - decide, per case, whether ground truth is one
//!   shared label set or one set per variant
//! - [`assemble`] - build the persisted [`CorrespondenceRecord`] for one
//!   (case, variant) pair from whichever side is authoritative
//! - [`discover_cases`] / [`process_cases`] / [`run`] - the batch driver
//!
//! # Example
//!
//! ```
//! use mesh_types::{Point3, TriMesh};
//! use ml_annotate::{face_correspondence, transfer_labels};
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
//! // A mesh corresponds to itself face-for-face.
//! let map = face_correspondence(&mesh, &mesh).unwrap();
//! assert_eq!(map, vec![0]);
//! assert_eq!(transfer_labels(&map, &[7]).unwrap(), vec![7]);
//! ```
//!
//! # Failure model
//!
//! Errors are local to one (case, variant) unit: the batch driver turns
//! them into [`Skip`] notices and keeps going. Nothing is retried -
//! inputs are static files and deterministic geometry.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod correspond;
mod discover;
mod error;
mod pipeline;
mod record;
mod resolve;

pub use correspond::{face_correspondence, transfer_labels};
pub use discover::{discover_cases, Case, DatasetLayout, DEFAULT_VARIANTS};
pub use error::{AnnotateError, Result};
pub use pipeline::{process_case, process_cases, run, BatchOutcome, CaseOutput, Skip, VariantRecord};
pub use record::{assemble, CorrespondenceRecord, LabelSeed};
pub use resolve::{resolve_labels, CaseLabelAvailability, ResolvedLabels};
