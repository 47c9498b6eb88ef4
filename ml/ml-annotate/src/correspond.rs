//! Face correspondence and label transfer.
//!
//! A correspondence maps every face of a source mesh to the index of the
//! nearest face of a target mesh, where "nearest" is measured from the
//! source face's centroid to the closest point on any target triangle.
//! Label transfer then chases those indices: the mesh *receiving* labels
//! is always the correspondence source, so each direction (raw→remesh,
//! remesh→raw) gets its own correspondence build. A computed mapping is
//! never inverted - it is many-to-one and has no inverse.

use mesh_proximity::TriangleBvh;
use mesh_types::TriMesh;
use tracing::debug;

use crate::error::{AnnotateError, Result};

/// Map every face of `source` to the index of the nearest face of
/// `target`.
///
/// Builds a nearest-triangle index over `target` (the dominant cost,
/// amortized across all source faces) and queries it with every source
/// face centroid. The result has one entry per source face, in face
/// order, each in `[0, target.face_count())`. Purely a function of the
/// two meshes' geometry: deterministic, independent of any labels.
///
/// # Errors
///
/// Returns [`AnnotateError::EmptyMesh`] when `target` has no faces, and
/// [`AnnotateError::NonFiniteCorrespondence`] when a query yields a
/// non-finite distance (non-finite input coordinates).
pub fn face_correspondence(source: &TriMesh, target: &TriMesh) -> Result<Vec<u32>> {
    if target.is_empty() {
        return Err(AnnotateError::EmptyMesh);
    }

    let index = TriangleBvh::build(target);
    let centroids = source.face_centroids();
    debug!(
        source_faces = centroids.len(),
        target_faces = target.face_count(),
        "built nearest-triangle index"
    );

    index
        .nearest_batch(&centroids)
        .into_iter()
        .enumerate()
        .map(|(face, hit)| {
            let hit = hit.ok_or(AnnotateError::EmptyMesh)?;
            if hit.distance_squared.is_finite() {
                Ok(hit.face)
            } else {
                Err(AnnotateError::NonFiniteCorrespondence { face })
            }
        })
        .collect()
}

/// Propagate labels through a correspondence mapping.
///
/// `out[i] = source_labels[correspondence[i]]`; the output length always
/// equals the correspondence length. Works for either direction - the
/// caller chooses by which correspondence it builds.
///
/// # Errors
///
/// Returns [`AnnotateError::CorrespondenceOutOfBounds`] when an entry
/// points past the end of `source_labels`. The labels must cover the
/// index space the correspondence maps into; violations are surfaced,
/// not papered over.
pub fn transfer_labels(correspondence: &[u32], source_labels: &[u32]) -> Result<Vec<u32>> {
    correspondence
        .iter()
        .enumerate()
        .map(|(position, &index)| {
            source_labels.get(index as usize).copied().ok_or(
                AnnotateError::CorrespondenceOutOfBounds {
                    position,
                    index: index as usize,
                    len: source_labels.len(),
                },
            )
        })
        .collect()
}
