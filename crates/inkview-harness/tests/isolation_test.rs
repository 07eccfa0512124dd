//! Integration test: per-case failure isolation.
//!
//! Validates that:
//! 1. K failing cases among N produce exactly K failures and N-K passes,
//!    wherever the failures sit in the order.
//! 2. A panicking case is contained and later cases still run.
//! 3. The external sink observes every result, in execution order.
//!
//! Run: cargo test -p inkview-harness --test isolation_test

use inkview_harness::check::expect_eq;
use inkview_harness::{CaseStatus, CollectSink, Runner, TestCase, ViewerEnv};

fn passing(name: &str) -> TestCase {
    TestCase::sync(name.to_owned(), |cx| {
        cx.pass();
        Ok(())
    })
}

fn failing(name: &str) -> TestCase {
    TestCase::sync(name.to_owned(), |_cx| expect_eq(1, 2))
}

#[test]
fn failure_counts_match_regardless_of_position() {
    // Failures at the front, middle, and back of a 6-case run.
    for failing_at in [vec![0, 1], vec![2, 4], vec![4, 5]] {
        let cases: Vec<TestCase> = (0..6)
            .map(|i| {
                if failing_at.contains(&i) {
                    failing(&format!("case_{i}"))
                } else {
                    passing(&format!("case_{i}"))
                }
            })
            .collect();

        let report = Runner::new(ViewerEnv::new()).run(cases, &mut CollectSink::new());
        assert_eq!(report.total, 6);
        assert_eq!(report.failed, 2, "failing at {failing_at:?}");
        assert_eq!(report.passed, 4, "failing at {failing_at:?}");
    }
}

#[test]
fn panic_is_contained_to_its_case() {
    let cases = vec![
        passing("before"),
        TestCase::sync("explodes", |_cx| panic!("component blew up")),
        passing("after"),
    ];

    let report = Runner::new(ViewerEnv::new()).run(cases, &mut CollectSink::new());
    assert_eq!(report.passed, 2);
    assert_eq!(report.errored, 1);
    assert_eq!(report.results[1].status, CaseStatus::Errored);
    assert!(
        report.results[1]
            .detail
            .as_deref()
            .unwrap()
            .contains("component blew up")
    );
    assert_eq!(report.results[2].status, CaseStatus::Passed);
}

#[test]
fn sink_receives_every_result_in_order() {
    let mut sink = CollectSink::new();
    let report = Runner::new(ViewerEnv::new()).run(
        vec![passing("a"), failing("b"), passing("c")],
        &mut sink,
    );

    let names: Vec<&str> = sink.results().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(sink.results().len(), report.total);
}

#[test]
fn completing_without_the_success_signal_fails() {
    let report = Runner::new(ViewerEnv::new()).run(
        vec![TestCase::sync("silent", |_cx| Ok(()))],
        &mut CollectSink::new(),
    );
    assert_eq!(report.failed, 1);
}
