use std::path::Path;

use super::*;

#[test]
fn accepts_only_json_trees() {
    let filter = TreeFileFilter::new(&[]).unwrap();

    assert!(filter.should_include(Path::new("trees/main.json")));
    assert!(filter.should_include(Path::new("trees/MAIN.JSON")));
    assert!(!filter.should_include(Path::new("src/main.js")));
    assert!(!filter.should_include(Path::new("Makefile")));
}

#[test]
fn excluded_directories_are_skipped() {
    let filter = TreeFileFilter::new(&[
        "**/node_modules/**".to_string(),
        "**/fixtures/**".to_string(),
    ])
    .unwrap();

    assert!(filter.should_include(Path::new("out/app.json")));
    assert!(!filter.should_include(Path::new("node_modules/pkg/tree.json")));
    assert!(!filter.should_include(Path::new("test/fixtures/bad.json")));
}

#[test]
fn relative_glob_matches_paths_walked_from_dot() {
    let filter = TreeFileFilter::new(&["vendor/**".to_string()]).unwrap();

    assert!(!filter.should_include(Path::new("./vendor/b.json")));
    assert!(!filter.should_include(Path::new("vendor/b.json")));
    assert!(filter.should_include(Path::new("./src/vendor.json")));
}

#[test]
fn minified_trees_excluded_by_name() {
    let filter = TreeFileFilter::new(&["*.min.json".to_string()]).unwrap();

    assert!(filter.should_include(Path::new("app.json")));
    assert!(!filter.should_include(Path::new("app.min.json")));
}

#[test]
fn bad_glob_is_named_in_error() {
    let err = exclude_set(&["ok/**".to_string(), "[invalid".to_string()])
        .err()
        .unwrap();

    match err {
        TreeGuardError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "[invalid"),
        other => panic!("unexpected error: {other}"),
    }
}
