use std::fs;
use std::path::PathBuf;

use pm_app::{
    RunOptions, RunRequest, ensure_run, list_runs, load_design, load_run, save_design,
    write_reference_design,
};

fn scratch_design(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("pm_app_tests").join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("failed to create scratch dir");
    let path = dir.join("design.yaml");
    write_reference_design(&path).expect("failed to write reference design");
    path
}

#[test]
fn second_run_is_served_from_cache() {
    let path = scratch_design("cache");
    let request = RunRequest {
        design_path: &path,
        options: RunOptions::default(),
    };

    let first = ensure_run(&request).expect("first run failed");
    assert!(!first.loaded_from_cache);
    assert!(first.manifest.converged);

    let second = ensure_run(&request).expect("second run failed");
    assert!(second.loaded_from_cache);
    assert_eq!(second.run_id, first.run_id);
    assert_eq!(second.report, first.report);

    let runs = list_runs(&path).expect("failed to list runs");
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].run_id, first.run_id);

    let (manifest, report) = load_run(&path, &first.run_id).expect("failed to load run");
    assert_eq!(manifest.design_name, first.manifest.design_name);
    assert_eq!(report.state, first.report.state);
}

#[test]
fn strict_mode_gets_its_own_run_id() {
    let path = scratch_design("strict");
    let relaxed = ensure_run(&RunRequest {
        design_path: &path,
        options: RunOptions::default(),
    })
    .expect("relaxed run failed");
    let strict = ensure_run(&RunRequest {
        design_path: &path,
        options: RunOptions {
            strict: true,
            ..RunOptions::default()
        },
    })
    .expect("strict run failed");

    assert_ne!(relaxed.run_id, strict.run_id);
    assert_eq!(relaxed.report.state, strict.report.state);
    assert_eq!(list_runs(&path).unwrap().len(), 2);
}

#[test]
fn bypassing_the_cache_recomputes() {
    let path = scratch_design("no_cache");
    let options = RunOptions {
        use_cache: false,
        ..RunOptions::default()
    };
    let request = RunRequest {
        design_path: &path,
        options,
    };
    ensure_run(&request).expect("first run failed");
    let again = ensure_run(&request).expect("second run failed");
    assert!(!again.loaded_from_cache);
}

#[test]
fn unknown_run_is_reported() {
    let path = scratch_design("missing");
    let err = load_run(&path, "deadbeef").unwrap_err();
    assert!(matches!(err, pm_app::AppError::RunNotFound(_)));
}

#[test]
fn renamed_copy_reuses_run_under_its_own_name() {
    let path = scratch_design("renamed");
    let first = ensure_run(&RunRequest {
        design_path: &path,
        options: RunOptions::default(),
    })
    .expect("first run failed");

    let mut copy = load_design(&path).expect("failed to load design");
    copy.name = "renamed copy".to_string();
    let copy_path = path.with_file_name("copy.yaml");
    save_design(&copy_path, &copy).expect("failed to save copy");

    let second = ensure_run(&RunRequest {
        design_path: &copy_path,
        options: RunOptions::default(),
    })
    .expect("copy run failed");
    assert!(second.loaded_from_cache);
    assert_eq!(second.run_id, first.run_id);
    assert_eq!(second.manifest.design_name, "renamed copy");

    let (manifest, _) = load_run(&copy_path, &second.run_id).expect("failed to load run");
    assert_eq!(manifest.design_name, "renamed copy");
}
