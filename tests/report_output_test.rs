// ==========================================
// Report output integration tests
// ==========================================


use lesson_audit::report::{
    CLASS_OVERLAPS_FILE, DUPLICATE_PAIRS_FILE, HOUR_MISMATCHES_FILE, SUMMARY_FILE,
    TEACHER_OVERLAPS_FILE,
};
use lesson_audit::{AuditConfig, AuditOrchestrator, ReportAssembler};
use std::fs;
use test_helpers::{sample_register, write_register_csv};

#[test]
fn test_report_files_from_register() {
    let input = write_register_csv(&sample_register());
    let out = tempfile::tempdir().unwrap();

    let report = AuditOrchestrator::new(AuditConfig::default())
        .run_file(input.path())
        .unwrap();
    let written = ReportAssembler::new(out.path()).write(&report).unwrap();

    for name in [
        HOUR_MISMATCHES_FILE,
        DUPLICATE_PAIRS_FILE,
        TEACHER_OVERLAPS_FILE,
        CLASS_OVERLAPS_FILE,
        SUMMARY_FILE,
    ] {
        assert!(written.contains(&out.path().join(name)), "{} not written", name);
    }

    let duplicates = fs::read_to_string(out.path().join(DUPLICATE_PAIRS_FILE)).unwrap();
    let lines: Vec<&str> = duplicates.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[1],
        "2,3,2024-03-05,RSSMRA80A01H501U,09:00,11:00,Milano,Storia,Geografia"
    );

    let teacher = fs::read_to_string(out.path().join(TEACHER_OVERLAPS_FILE)).unwrap();
    assert!(teacher
        .lines()
        .nth(1)
        .unwrap()
        .starts_with("TEACHER,2024-03-05,RSSMRA80A01H501U,2,3"));

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.path().join(SUMMARY_FILE)).unwrap())
            .unwrap();
    assert_eq!(summary["run_id"], report.run_id.as_str());
    assert_eq!(summary["summary"]["total_records"], 5);
    assert_eq!(summary["summary"]["hour_mismatches"], 1);
}

#[test]
fn test_report_json_roundtrips_through_serde() {
    let input = write_register_csv(&sample_register());
    let report = AuditOrchestrator::new(AuditConfig::default())
        .run_file(input.path())
        .unwrap();

    let json = serde_json::to_string(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["class_overlaps"][0]["grouping"], "CLASS");
    assert_eq!(value["duplicate_pairs"][0]["date"], "2024-03-05");
}
