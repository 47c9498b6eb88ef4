//! The batch driver: cases in, records and skip notices out.
//!
//! Each (case, variant) pair is an independent unit of work. A failure in
//! one unit becomes a [`Skip`] entry and a `warn` log line; it never
//! aborts sibling units or the batch. Cases are processed in parallel,
//! each worker owning its own meshes and indices; writing the output
//! records is the only step that runs after the fan-out.

use std::fmt;
use std::fs;

use mesh_io::load_obj;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::discover::{discover_cases, Case, DatasetLayout};
use crate::error::{AnnotateError, Result};
use crate::record::{assemble, CorrespondenceRecord, LabelSeed};
use crate::resolve::{resolve_labels, ResolvedLabels};

/// One skipped unit of work and why.
#[derive(Debug)]
pub struct Skip {
    /// Case identifier.
    pub case: String,
    /// Variant number, or `None` when the whole case was skipped.
    pub variant: Option<usize>,
    /// What went wrong.
    pub reason: AnnotateError,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variant {
            Some(variant) => write!(f, "{}-{}: {}", self.case, variant, self.reason),
            None => write!(f, "{}: {}", self.case, self.reason),
        }
    }
}

/// A completed record for one variant of a case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord {
    /// Variant number.
    pub variant: usize,
    /// The assembled record.
    pub record: CorrespondenceRecord,
}

/// Everything produced for one case.
#[derive(Debug)]
pub struct CaseOutput {
    /// Case identifier.
    pub case: String,
    /// Records for the variants that succeeded.
    pub records: Vec<VariantRecord>,
    /// Skip notices for the units that did not.
    pub skips: Vec<Skip>,
}

/// The result of a whole batch: records plus skip reasons.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Per-case outputs, in case order.
    pub outputs: Vec<CaseOutput>,
}

impl BatchOutcome {
    /// Total number of records produced.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.outputs.iter().map(|o| o.records.len()).sum()
    }

    /// Iterator over every skip notice in the batch.
    pub fn skips(&self) -> impl Iterator<Item = &Skip> {
        self.outputs.iter().flat_map(|o| o.skips.iter())
    }

    /// Total number of skipped units.
    #[must_use]
    pub fn skip_count(&self) -> usize {
        self.outputs.iter().map(|o| o.skips.len()).sum()
    }
}

/// Process one case: zero or more records, one per variant that has both
/// a mesh and resolvable labels.
#[must_use]
pub fn process_case(case: &Case) -> CaseOutput {
    let mut output = CaseOutput {
        case: case.id.clone(),
        records: Vec::new(),
        skips: Vec::new(),
    };

    let raw = match load_obj(&case.raw_path) {
        Ok(mesh) => mesh,
        Err(source) => {
            let reason = AnnotateError::unreadable_mesh(&case.raw_path, source);
            warn!(case = %case.id, %reason, "skipping case");
            output.skips.push(Skip {
                case: case.id.clone(),
                variant: None,
                reason,
            });
            return output;
        }
    };

    let resolved = match resolve_labels(&case.labels) {
        Ok(ResolvedLabels::NoLabels) => {
            let reason = AnnotateError::missing_label_source(&case.id);
            warn!(case = %case.id, %reason, "skipping case");
            output.skips.push(Skip {
                case: case.id.clone(),
                variant: None,
                reason,
            });
            return output;
        }
        Ok(resolved) => resolved,
        Err(reason) => {
            warn!(case = %case.id, %reason, "skipping case");
            output.skips.push(Skip {
                case: case.id.clone(),
                variant: None,
                reason,
            });
            return output;
        }
    };

    for (variant, slot) in case.remesh_paths.iter().enumerate() {
        let Some(remesh_path) = slot else {
            debug!(case = %case.id, variant, "no remesh file, nothing to do");
            continue;
        };

        let remesh = match load_obj(remesh_path) {
            Ok(mesh) => mesh,
            Err(source) => {
                let reason = AnnotateError::unreadable_mesh(remesh_path, source);
                warn!(case = %case.id, variant, %reason, "skipping variant");
                output.skips.push(Skip {
                    case: case.id.clone(),
                    variant: Some(variant),
                    reason,
                });
                continue;
            }
        };

        // Records own copies of whichever arrays they bundle, so label
        // sets can be shared across variants without aliasing.
        let seed = match &resolved {
            ResolvedLabels::SingleLabelSet(raw_labels) => {
                Some(LabelSeed::RawLabels(raw_labels.clone()))
            }
            ResolvedLabels::PerVariantLabelSets(sets) => {
                match sets.get(variant).and_then(Option::as_ref) {
                    Some(sub_labels) => Some(LabelSeed::SubLabels(sub_labels.clone())),
                    None => {
                        let reason = AnnotateError::missing_label_source(&case.id);
                        warn!(case = %case.id, variant, %reason, "skipping variant");
                        output.skips.push(Skip {
                            case: case.id.clone(),
                            variant: Some(variant),
                            reason,
                        });
                        continue;
                    }
                }
            }
            ResolvedLabels::NoLabels => None,
        };

        info!(
            case = %case.id,
            variant,
            raw_faces = raw.face_count(),
            remesh_faces = remesh.face_count(),
            "processing"
        );

        match assemble(&raw, &remesh, seed) {
            Ok(Some(record)) => output.records.push(VariantRecord { variant, record }),
            Ok(None) => {}
            Err(reason) => {
                warn!(case = %case.id, variant, %reason, "skipping variant");
                output.skips.push(Skip {
                    case: case.id.clone(),
                    variant: Some(variant),
                    reason,
                });
            }
        }
    }

    output
}

/// Process many cases in parallel.
///
/// Workers share nothing mutable: each case's meshes, indices, and label
/// arrays live and die inside its worker. Outputs come back in case
/// order.
#[must_use]
pub fn process_cases(cases: &[Case]) -> BatchOutcome {
    BatchOutcome {
        outputs: cases.par_iter().map(process_case).collect(),
    }
}

/// Discover a dataset, process every case, and write one JSON record per
/// (case, variant) into the layout's output directory.
///
/// # Errors
///
/// Returns an error when discovery fails or a record cannot be written.
/// Per-unit processing failures do not surface here - they are reported
/// in the returned outcome's skip list.
pub fn run(layout: &DatasetLayout) -> Result<BatchOutcome> {
    let cases = discover_cases(layout)?;
    info!(
        cases = cases.len(),
        variants = layout.variants,
        "discovered dataset"
    );

    let outcome = process_cases(&cases);

    fs::create_dir_all(&layout.out_dir)?;
    for output in &outcome.outputs {
        for vr in &output.records {
            let path = layout
                .out_dir
                .join(format!("{}-{}.json", output.case, vr.variant));
            vr.record.save_json(&path)?;
        }
    }

    info!(
        records = outcome.record_count(),
        skipped = outcome.skip_count(),
        "finished label transfer"
    );
    Ok(outcome)
}
