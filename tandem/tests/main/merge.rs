use std::cell::Cell;
use tandem::*;

fn never(called: &Cell<bool>) -> impl FnOnce() -> Outcome + '_ {
    move || {
        called.set(true);
        Outcome::success()
    }
}

#[test]
fn local_failure_short_circuits() {
    let called = Cell::new(false);
    let local = Outcome::mismatch("bad total", "10", "9");

    assert_eq!(merge(local.clone(), never(&called)), local);
    assert!(!called.get());
}

#[test]
fn local_error_short_circuits() {
    let called = Cell::new(false);
    let local = Outcome::error("could not read input");

    assert_eq!(merge(local.clone(), never(&called)), local);
    assert!(!called.get());
}

#[test]
fn skipped_local_prefixes_the_remote_text() {
    let local = Outcome::skip(EXCLUDED, "No local execution time");

    assert_eq!(
        merge(local.clone(), || Outcome::failure("remote").annotate("count", 3)),
        Outcome::Failure {
            message: "remote".into(),
            expected: "No local execution time\ncount: 3".into(),
            actual: String::new(),
            stack_trace: vec![],
        }
    );
    assert_eq!(
        merge(local, || Outcome::skip(EXCLUDED, "No cluster execution time")),
        Outcome::skip(EXCLUDED, "No local execution time\nNo cluster execution time")
    );
}

#[test]
fn local_success_runs_the_remote_attempt() {
    let called = Cell::new(false);
    let outcome = merge(Outcome::success(), || {
        called.set(true);
        Outcome::error("cluster down")
    });

    assert!(called.get());
    assert_eq!(outcome, Outcome::error("cluster down"));
}

#[test]
fn conjunction_of_successes_lists_both() {
    assert_eq!(
        conjunction(Outcome::success(), Outcome::success()),
        Outcome::success()
    );
    assert_eq!(
        conjunction(
            Outcome::success_with_message("local: 1ms"),
            Outcome::success_with_message("cluster: 2s")
        ),
        Outcome::success_with_message("local: 1ms\ncluster: 2s")
    );
    assert_eq!(
        conjunction(Outcome::success(), Outcome::success_with_message("only")),
        Outcome::success_with_message("only")
    );
}

#[test]
fn conjunction_first_failure_wins() {
    let first = Outcome::failure("first");
    let second = Outcome::error("second");

    assert_eq!(conjunction(first.clone(), second.clone()), first);
    assert_eq!(conjunction(Outcome::success(), second.clone()), second);
    assert_eq!(
        conjunction(Outcome::skip("later", ""), first.clone()),
        first
    );
}

#[test]
fn conjunction_with_a_skip_passes() {
    let skipped = Outcome::skip(EXCLUDED, "No cluster execution time");

    assert_eq!(
        conjunction(Outcome::success_with_message("ok"), skipped.clone()),
        Outcome::success_with_message("ok\nNo cluster execution time")
    );
    assert_eq!(
        conjunction(skipped.clone(), Outcome::success_with_message("ok")),
        Outcome::success_with_message("No cluster execution time\nok")
    );
    assert_eq!(
        conjunction(Outcome::success(), skipped.clone()),
        Outcome::success_with_message("No cluster execution time")
    );
    assert_eq!(
        conjunction(Outcome::success(), Outcome::skip(EXCLUDED, "")),
        Outcome::success()
    );
}

#[test]
fn conjunction_of_skips_stays_skipped() {
    assert_eq!(
        conjunction(
            Outcome::skip(EXCLUDED, "No local execution time"),
            Outcome::skip(EXCLUDED, "No cluster execution time")
        ),
        Outcome::skip(EXCLUDED, "No local execution time\nNo cluster execution time")
    );
}

#[test]
fn remote_errors_keep_their_message_after_a_local_skip() {
    let local = Outcome::skip(EXCLUDED, "No local execution time");

    assert_eq!(
        merge(local, || Outcome::error("Panicked: boom")),
        Outcome::error("Panicked: boom")
    );
}
