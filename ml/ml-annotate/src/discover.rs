//! Dataset discovery.
//!
//! A dataset is three directories: raw meshes (`{case}.obj`), remesh
//! variants (`{case}-{v}.obj`) and label files (`{case}.seg` shared, or
//! `{case}-{v}.seg` per variant). Discovery walks them once and produces
//! immutable [`Case`] values - identifiers, variant paths, and label
//! availability are all fixed here and never re-derived downstream.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::resolve::CaseLabelAvailability;

/// Default number of remesh variants per case.
pub const DEFAULT_VARIANTS: usize = 3;

/// Where a dataset's files live and how many variants to look for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    /// Directory of raw meshes, `{case}.obj`.
    pub raw_dir: PathBuf,
    /// Directory of remesh variants, `{case}-{v}.obj`.
    pub remesh_dir: PathBuf,
    /// Directory of label files, `{case}.seg` or `{case}-{v}.seg`.
    pub label_dir: PathBuf,
    /// Directory records are written to.
    pub out_dir: PathBuf,
    /// Number of variants per case (variant numbers `0..variants`).
    pub variants: usize,
}

impl DatasetLayout {
    /// Create a layout with the default variant count.
    #[must_use]
    pub fn new(
        raw_dir: impl Into<PathBuf>,
        remesh_dir: impl Into<PathBuf>,
        label_dir: impl Into<PathBuf>,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            raw_dir: raw_dir.into(),
            remesh_dir: remesh_dir.into(),
            label_dir: label_dir.into(),
            out_dir: out_dir.into(),
            variants: DEFAULT_VARIANTS,
        }
    }

    /// Sets the number of variants per case.
    #[must_use]
    pub const fn with_variants(mut self, variants: usize) -> Self {
        self.variants = variants;
        self
    }
}

/// One raw mesh with its variants and label availability.
///
/// Identifiers are derived from the raw file's stem at discovery time and
/// are immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    /// Case identifier: the raw file's stem (e.g. `Case17`).
    pub id: String,
    /// Path of the raw mesh.
    pub raw_path: PathBuf,
    /// Remesh path per variant; `None` where no variant file exists.
    pub remesh_paths: Vec<Option<PathBuf>>,
    /// Label files found for this case.
    pub labels: CaseLabelAvailability,
}

/// Scan a dataset layout and build its case list.
///
/// Cases are ordered by the digits embedded in their filename (so
/// `Case2` sorts before `Case10`), with the full name as a tiebreaker.
///
/// # Errors
///
/// Returns an error when the raw directory cannot be listed. Missing
/// remesh or label files are not errors - they become `None` slots
/// handled (and reported) during processing.
pub fn discover_cases(layout: &DatasetLayout) -> Result<Vec<Case>> {
    let mut raw_paths: Vec<PathBuf> = fs::read_dir(&layout.raw_dir)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "obj"))
        .collect();
    raw_paths.sort_by_key(|path| (numeric_key(path), path.clone()));

    let cases = raw_paths
        .into_iter()
        .filter_map(|raw_path| {
            let id = raw_path.file_stem()?.to_str()?.to_owned();
            let remesh_paths = (0..layout.variants)
                .map(|v| existing(layout.remesh_dir.join(format!("{id}-{v}.obj"))))
                .collect();
            let labels = CaseLabelAvailability {
                shared: existing(layout.label_dir.join(format!("{id}.seg"))),
                per_variant: (0..layout.variants)
                    .map(|v| existing(layout.label_dir.join(format!("{id}-{v}.seg"))))
                    .collect(),
            };
            Some(Case {
                id,
                raw_path,
                remesh_paths,
                labels,
            })
        })
        .collect();

    Ok(cases)
}

/// Numeric sort key: the digits of the filename concatenated, so that
/// `Case10` follows `Case2`.
fn numeric_key(path: &Path) -> u64 {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or(0, |name| {
            name.chars()
                .filter(char::is_ascii_digit)
                .fold(0u64, |key, digit| {
                    key.saturating_mul(10)
                        .saturating_add(u64::from(digit) - u64::from('0'))
                })
        })
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.is_file().then_some(path)
}
