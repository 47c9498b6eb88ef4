//! Per-case label source resolution.
//!
//! A case's ground truth arrives in one of two shapes: a single label file
//! defined over the raw mesh and shared by every variant, or one label
//! file per remesh variant. Which shape applies is decided once, from the
//! files found at discovery time, and carried as an explicit
//! [`CaseLabelAvailability`] value - never re-inferred from the filesystem
//! at call time.

use std::path::PathBuf;

use mesh_io::load_labels;

use crate::error::{AnnotateError, Result};

/// The label files discovered for one case.
///
/// Built by discovery and consumed by [`resolve_labels`]. `per_variant`
/// always has one slot per variant; a `None` slot means no label file
/// exists for that variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseLabelAvailability {
    /// A single label file defined over the raw mesh, if present.
    pub shared: Option<PathBuf>,
    /// Per-variant label files, indexed by variant number.
    pub per_variant: Vec<Option<PathBuf>>,
}

impl CaseLabelAvailability {
    /// Availability with no label files and `variants` empty slots.
    #[must_use]
    pub fn none(variants: usize) -> Self {
        Self {
            shared: None,
            per_variant: vec![None; variants],
        }
    }

    /// Whether any label file exists for this case.
    #[must_use]
    pub fn has_any(&self) -> bool {
        self.shared.is_some() || self.per_variant.iter().any(Option::is_some)
    }
}

/// The resolved label source for one case.
///
/// Absence is explicit: an empty label array and "no labels supplied" are
/// different things, and only the latter is representable here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedLabels {
    /// One label array over the raw mesh, applied uniformly to derive
    /// every variant's labels.
    SingleLabelSet(Vec<u32>),
    /// One label array per remesh variant (indexed by variant number;
    /// `None` where that variant has no label file). Raw labels must be
    /// derived per variant, and the derivations are not required to agree
    /// with each other - callers tolerate the inconsistency, they do not
    /// reconcile it.
    PerVariantLabelSets(Vec<Option<Vec<u32>>>),
    /// No label file pattern matched; the case is skipped.
    NoLabels,
}

/// Load the label arrays a case's availability points at.
///
/// Per-variant files take precedence when both patterns exist.
///
/// # Errors
///
/// Returns [`AnnotateError::UnreadableLabelSource`] when a referenced
/// file cannot be read or parsed. A missing pattern is not an error; it
/// resolves to [`ResolvedLabels::NoLabels`].
pub fn resolve_labels(availability: &CaseLabelAvailability) -> Result<ResolvedLabels> {
    if availability.per_variant.iter().any(Option::is_some) {
        let sets = availability
            .per_variant
            .iter()
            .map(|slot| match slot {
                Some(path) => load_labels(path)
                    .map(Some)
                    .map_err(|source| AnnotateError::unreadable_label_source(path, source)),
                None => Ok(None),
            })
            .collect::<Result<Vec<_>>>()?;
        return Ok(ResolvedLabels::PerVariantLabelSets(sets));
    }

    if let Some(path) = &availability.shared {
        let labels = load_labels(path)
            .map_err(|source| AnnotateError::unreadable_label_source(path, source))?;
        return Ok(ResolvedLabels::SingleLabelSet(labels));
    }

    Ok(ResolvedLabels::NoLabels)
}
