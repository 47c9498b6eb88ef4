//! Error types for the annotation pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building correspondences and transferring
/// labels.
///
/// Every variant is local to one (case, variant) unit of work: the
/// pipeline reports it as a skip and moves on, it never aborts sibling
/// units.
#[derive(Debug, Error)]
pub enum AnnotateError {
    /// No label file pattern matches a case.
    #[error("no label source for case {case}")]
    MissingLabelSource {
        /// Case identifier.
        case: String,
    },

    /// A label array's length does not match its mesh's face count.
    #[error("label array has {got} entries but the mesh has {expected} faces")]
    LabelSizeMismatch {
        /// Face count of the mesh the labels were matched against.
        expected: usize,
        /// Number of labels actually loaded.
        got: usize,
    },

    /// A correspondence entry points past the end of the source labels.
    #[error(
        "correspondence entry {position} maps to face {index}, \
         but only {len} source labels exist"
    )]
    CorrespondenceOutOfBounds {
        /// Position in the correspondence mapping.
        position: usize,
        /// The out-of-range source face index.
        index: usize,
        /// Length of the source label array.
        len: usize,
    },

    /// A mesh file could not be read or parsed.
    #[error("unreadable mesh {path}")]
    UnreadableMesh {
        /// Path of the mesh file.
        path: PathBuf,
        /// Underlying I/O or parse failure.
        #[source]
        source: mesh_io::IoError,
    },

    /// A label file could not be read or parsed.
    #[error("unreadable label source {path}")]
    UnreadableLabelSource {
        /// Path of the label file.
        path: PathBuf,
        /// Underlying I/O or parse failure.
        #[source]
        source: mesh_io::IoError,
    },

    /// A correspondence target mesh has no faces.
    #[error("correspondence target mesh has no faces")]
    EmptyMesh,

    /// A nearest-face query produced a non-finite distance, which means
    /// the input geometry itself was non-finite.
    #[error("nearest-face query for face {face} produced a non-finite distance")]
    NonFiniteCorrespondence {
        /// Source face whose centroid query failed.
        face: usize,
    },

    /// I/O error while writing records.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AnnotateError {
    /// Creates a missing-label-source error for a case.
    #[must_use]
    pub fn missing_label_source(case: impl Into<String>) -> Self {
        Self::MissingLabelSource { case: case.into() }
    }

    /// Wraps a mesh-loading failure with the path that caused it.
    #[must_use]
    pub fn unreadable_mesh(path: impl Into<PathBuf>, source: mesh_io::IoError) -> Self {
        Self::UnreadableMesh {
            path: path.into(),
            source,
        }
    }

    /// Wraps a label-loading failure with the path that caused it.
    #[must_use]
    pub fn unreadable_label_source(path: impl Into<PathBuf>, source: mesh_io::IoError) -> Self {
        Self::UnreadableLabelSource {
            path: path.into(),
            source,
        }
    }
}

/// Result type for annotation operations.
pub type Result<T> = std::result::Result<T, AnnotateError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_label_source_names_case() {
        let err = AnnotateError::missing_label_source("Case7");
        assert!(err.to_string().contains("Case7"));
    }

    #[test]
    fn size_mismatch_reports_both_counts() {
        let err = AnnotateError::LabelSizeMismatch {
            expected: 12,
            got: 4,
        };
        let text = err.to_string();
        assert!(text.contains("12"));
        assert!(text.contains('4'));
    }

    #[test]
    fn unreadable_mesh_carries_path() {
        let io = mesh_io::IoError::invalid_content("truncated");
        let err = AnnotateError::unreadable_mesh("/data/Case1.obj", io);
        assert!(err.to_string().contains("/data/Case1.obj"));
    }
}
