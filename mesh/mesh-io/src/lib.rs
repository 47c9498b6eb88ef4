//! Mesh and label file I/O for Relabel.
//!
//! This crate makes the pipeline's external collaborators concrete:
//!
//! - **OBJ** (Wavefront) - [`load_obj`] / [`save_obj`], ASCII, triangles
//!   (larger polygons are fan-triangulated on load)
//! - **Face labels** - [`load_labels`] / [`save_labels`], plain-text `.seg`
//!   files with one integer category code per face line
//!
//! Failures surface as [`IoError`] and are reported per file by the
//! pipeline; a broken input never aborts a batch.
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{load_labels, load_obj};
//!
//! let mesh = load_obj("Case1.obj").unwrap();
//! let labels = load_labels("Case1.seg").unwrap();
//! assert_eq!(labels.len(), mesh.face_count());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod labels;
mod obj;

pub use error::{IoError, IoResult};
pub use labels::{load_labels, save_labels};
pub use obj::{load_obj, save_obj};
