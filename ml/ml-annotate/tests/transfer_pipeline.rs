//! End-to-end tests for the label-transfer pipeline: real files on disk,
//! discovery through record emission.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::fs;
use std::path::Path;

use mesh_io::{save_labels, save_obj};
use mesh_types::{Point3, TriMesh};
use ml_annotate::{
    discover_cases, process_cases, run, AnnotateError, CorrespondenceRecord, DatasetLayout,
};

/// A row of disjoint triangles whose centroids sit at the given X
/// coordinates on the z = 0 plane.
fn strip(centers: &[f64]) -> TriMesh {
    let mut positions = Vec::new();
    let mut faces = Vec::new();
    for &x in centers {
        let base = u32::try_from(positions.len()).unwrap();
        positions.push(Point3::new(x - 0.1, -0.1, 0.0));
        positions.push(Point3::new(x + 0.1, -0.1, 0.0));
        positions.push(Point3::new(x, 0.2, 0.0));
        faces.push([base, base + 1, base + 2]);
    }
    TriMesh::from_parts(positions, faces)
}

fn layout_in(dir: &Path) -> DatasetLayout {
    let layout = DatasetLayout::new(
        dir.join("raw"),
        dir.join("remesh"),
        dir.join("labels"),
        dir.join("out"),
    );
    for d in [&layout.raw_dir, &layout.remesh_dir, &layout.label_dir] {
        fs::create_dir_all(d).unwrap();
    }
    layout
}

/// Write one labeled case: a 4-face raw mesh and two 2-face variants.
fn write_case(layout: &DatasetLayout, id: &str, shared_labels: Option<&[u32]>) {
    let raw = strip(&[0.0, 1.0, 2.0, 3.0]);
    save_obj(&raw, layout.raw_dir.join(format!("{id}.obj"))).unwrap();
    for v in 0..2 {
        let remesh = strip(&[0.4, 2.4]);
        save_obj(&remesh, layout.remesh_dir.join(format!("{id}-{v}.obj"))).unwrap();
    }
    if let Some(labels) = shared_labels {
        save_labels(labels, layout.label_dir.join(format!("{id}.seg"))).unwrap();
    }
}

#[test]
fn shared_labels_propagate_to_every_variant() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    write_case(&layout, "Case1", Some(&[5, 5, 7, 7]));

    let outcome = run(&layout).unwrap();
    assert_eq!(outcome.record_count(), 2);
    assert_eq!(outcome.skip_count(), 0);

    for v in 0..2 {
        let record =
            CorrespondenceRecord::load_json(layout.out_dir.join(format!("Case1-{v}.json")))
                .unwrap();
        assert_eq!(record.raw_labels, vec![5, 5, 7, 7]);
        assert_eq!(record.sub_labels, vec![5, 7]);
        assert_eq!(record.raw_to_sub.len(), 2);
    }
}

#[test]
fn per_variant_labels_derive_raw_labels() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    write_case(&layout, "Case1", None);
    save_labels(&[9, 3], layout.label_dir.join("Case1-0.seg")).unwrap();
    save_labels(&[2, 8], layout.label_dir.join("Case1-1.seg")).unwrap();

    let outcome = run(&layout).unwrap();
    assert_eq!(outcome.record_count(), 2);

    let record0 =
        CorrespondenceRecord::load_json(layout.out_dir.join("Case1-0.json")).unwrap();
    assert_eq!(record0.sub_labels, vec![9, 3]);
    assert_eq!(record0.raw_labels, vec![9, 9, 3, 3]);

    // Each variant derives its own raw labels; they need not agree.
    let record1 =
        CorrespondenceRecord::load_json(layout.out_dir.join("Case1-1.json")).unwrap();
    assert_eq!(record1.sub_labels, vec![2, 8]);
    assert_eq!(record1.raw_labels, vec![2, 2, 8, 8]);
}

#[test]
fn unlabeled_case_is_skipped_without_aborting_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    write_case(&layout, "Case1", Some(&[1, 1, 2, 2]));
    write_case(&layout, "Case2", None); // no label files at all
    write_case(&layout, "Case3", Some(&[3, 3, 4, 4]));

    let outcome = run(&layout).unwrap();
    assert_eq!(outcome.record_count(), 4); // two variants each for 1 and 3
    assert_eq!(outcome.skip_count(), 1);

    let skip = outcome.skips().next().unwrap();
    assert_eq!(skip.case, "Case2");
    assert!(matches!(
        skip.reason,
        AnnotateError::MissingLabelSource { .. }
    ));

    assert!(layout.out_dir.join("Case1-0.json").is_file());
    assert!(layout.out_dir.join("Case3-1.json").is_file());
    assert!(!layout.out_dir.join("Case2-0.json").exists());
}

#[test]
fn wrong_length_labels_skip_only_their_case() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    write_case(&layout, "Case1", Some(&[1, 2])); // 2 labels, 4 raw faces
    write_case(&layout, "Case2", Some(&[1, 2, 3, 4]));

    let outcome = run(&layout).unwrap();
    assert_eq!(outcome.record_count(), 2); // Case2's two variants
    assert_eq!(outcome.skip_count(), 2); // Case1's two variants
    assert!(outcome.skips().all(|skip| {
        skip.case == "Case1"
            && matches!(skip.reason, AnnotateError::LabelSizeMismatch { .. })
    }));
}

#[test]
fn corrupt_variant_mesh_skips_only_that_variant() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    write_case(&layout, "Case1", Some(&[1, 1, 2, 2]));
    fs::write(layout.remesh_dir.join("Case1-1.obj"), "v 0 0 0\nf 1 2 3\n").unwrap();

    let outcome = run(&layout).unwrap();
    assert_eq!(outcome.record_count(), 1);
    assert_eq!(outcome.skip_count(), 1);

    let skip = outcome.skips().next().unwrap();
    assert_eq!((skip.case.as_str(), skip.variant), ("Case1", Some(1)));
    assert!(matches!(skip.reason, AnnotateError::UnreadableMesh { .. }));
}

#[test]
fn missing_variant_mesh_is_not_reported() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    write_case(&layout, "Case1", Some(&[1, 1, 2, 2]));
    fs::remove_file(layout.remesh_dir.join("Case1-1.obj")).unwrap();

    let outcome = run(&layout).unwrap();
    // Variant 1 simply does not exist: one record, no skip notice.
    assert_eq!(outcome.record_count(), 1);
    assert_eq!(outcome.skip_count(), 0);
}

#[test]
fn discovery_then_manual_processing_matches_run() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout_in(dir.path());
    write_case(&layout, "Case1", Some(&[5, 5, 7, 7]));

    let cases = discover_cases(&layout).unwrap();
    assert_eq!(cases.len(), 1);
    let outcome = process_cases(&cases);
    assert_eq!(outcome.record_count(), 2);
    assert_eq!(outcome.outputs[0].records[0].record.sub_labels, vec![5, 7]);
}
