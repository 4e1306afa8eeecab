use std::path::Path;

use naivelog::harness::check_dir;

#[test]
fn test_program_fixtures() {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/programs");
    let reports = check_dir(&dir).unwrap();
    assert_eq!(reports.len(), 6);

    for report in &reports {
        assert!(
            report.passed(),
            "{}: missing {:?}, unexpected {:?}",
            report.path.display(),
            report.missing,
            report.unexpected
        );
    }
}
