//! The persisted correspondence record and its assembly.
//!
//! One record is emitted per (case, variant) pair. It bundles the raw-mesh
//! labels, the remesh labels, and the correspondence that links them, in
//! the JSON shape downstream training tooling consumes.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use mesh_types::TriMesh;
use serde::{Deserialize, Serialize};

use crate::correspond::{face_correspondence, transfer_labels};
use crate::error::{AnnotateError, Result};

/// The persisted output for one (case, variant) pair.
///
/// Serialized as a JSON object with exactly these three field names.
/// `raw_to_sub` is indexed by remesh face: entry `i` is the raw-mesh face
/// nearest to remesh face `i`'s centroid, which is also precisely the
/// lookup used to derive `sub_labels` from `raw_labels`.
///
/// A record is only constructed complete - both label arrays populated,
/// one authoritative and one derived. See [`assemble`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrespondenceRecord {
    /// Labels over the raw mesh, one per raw face.
    pub raw_labels: Vec<u32>,
    /// For each remesh face, the index of the nearest raw face.
    pub raw_to_sub: Vec<u32>,
    /// Labels over the remesh variant, one per remesh face.
    pub sub_labels: Vec<u32>,
}

impl CorrespondenceRecord {
    /// Write the record as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be created or serialization
    /// fails.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Read a record back from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or does not hold a
    /// valid record.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// The authoritative label input for one record assembly.
///
/// Exactly one side is ever authoritative; the other is derived. Handing
/// both arrays over as independent inputs is not representable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelSeed {
    /// Ground truth lives on the raw mesh; remesh labels are derived.
    RawLabels(Vec<u32>),
    /// Ground truth lives on this remesh variant; raw labels are derived.
    SubLabels(Vec<u32>),
}

/// Assemble the record for one (raw mesh, remesh variant) pair.
///
/// Computes the remesh→raw correspondence, then completes the record from
/// whichever side the seed supplies:
///
/// - [`LabelSeed::RawLabels`]: `sub_labels` are derived through that same
///   correspondence.
/// - [`LabelSeed::SubLabels`]: `raw_labels` are derived through a fresh
///   correspondence built in the opposite direction (raw faces queried
///   against the remesh) - the existing mapping is many-to-one and cannot
///   be inverted.
/// - `None`: no ground truth for this pair; returns `Ok(None)` rather
///   than an error, and no record is emitted.
///
/// # Errors
///
/// Returns [`AnnotateError::LabelSizeMismatch`] when the seed array's
/// length does not match its mesh's face count, plus any correspondence
/// failure from [`face_correspondence`].
pub fn assemble(
    raw: &TriMesh,
    remesh: &TriMesh,
    seed: Option<LabelSeed>,
) -> Result<Option<CorrespondenceRecord>> {
    let Some(seed) = seed else {
        return Ok(None);
    };

    let raw_to_sub = face_correspondence(remesh, raw)?;

    let record = match seed {
        LabelSeed::RawLabels(raw_labels) => {
            check_length(&raw_labels, raw.face_count())?;
            let sub_labels = transfer_labels(&raw_to_sub, &raw_labels)?;
            CorrespondenceRecord {
                raw_labels,
                raw_to_sub,
                sub_labels,
            }
        }
        LabelSeed::SubLabels(sub_labels) => {
            check_length(&sub_labels, remesh.face_count())?;
            let raw_from_sub = face_correspondence(raw, remesh)?;
            let raw_labels = transfer_labels(&raw_from_sub, &sub_labels)?;
            CorrespondenceRecord {
                raw_labels,
                raw_to_sub,
                sub_labels,
            }
        }
    };

    Ok(Some(record))
}

fn check_length(labels: &[u32], face_count: usize) -> Result<()> {
    if labels.len() == face_count {
        Ok(())
    } else {
        Err(AnnotateError::LabelSizeMismatch {
            expected: face_count,
            got: labels.len(),
        })
    }
}
