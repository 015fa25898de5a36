use tandem::*;

#[test]
fn annotate_appends_a_line() {
    let outcome = Outcome::skip(EXCLUDED, "No local execution time").annotate("Note", "later");
    assert_eq!(outcome.expected(), "No local execution time\nNote: later");
    assert!(outcome.skipped());

    let outcome = Outcome::success().annotate("Local execution time", "1.000 ms");
    assert_eq!(outcome, Outcome::success_with_message("Local execution time: 1.000 ms"));
}

#[test]
fn annotate_keeps_the_verdict() {
    let failure = Outcome::mismatch("not equal", "3", "2").annotate("Cluster execution time", "2 s");
    match &failure {
        Outcome::Failure {
            message,
            expected,
            actual,
            ..
        } => {
            assert_eq!(message, "not equal");
            assert_eq!(expected, "3\nCluster execution time: 2 s");
            assert_eq!(actual, "2");
        }
        other => panic!("expected a failure, got {}", other),
    }

    let error = Outcome::error("boom").annotate("t", "1");
    assert_eq!(error.verdict(), Verdict::Errored);
    assert_eq!(error.expected(), "boom\nt: 1");
}

#[test]
fn annotate_twice_is_annotate_once_with_both_lines() {
    let base = Outcome::success_with_message("ran");
    let twice = base
        .clone()
        .annotate("Local execution time", "5 ms")
        .annotate("Local execution time", "5 ms");
    let once = base.update_expected(|text| {
        format!("{}\nLocal execution time: 5 ms\nLocal execution time: 5 ms", text)
    });
    assert_eq!(twice, once);
}

#[test]
fn map_skipped_reason_only_touches_skips() {
    let skipped =
        Outcome::skip(EXCLUDED, "local").map_skipped_reason(|e| format!("{} and remote", e));
    assert_eq!(skipped, Outcome::skip(EXCLUDED, "local and remote"));

    let failure = Outcome::failure("no").map_skipped_reason(|_| String::from("changed"));
    assert_eq!(failure, Outcome::failure("no"));

    let success = Outcome::success().map_skipped_reason(|_| String::from("changed"));
    assert_eq!(success, Outcome::success());
}

#[test]
fn results_convert_to_outcomes() {
    let ok: anyhow::Result<u32> = Ok(42);
    assert_eq!(Outcome::from(ok), Outcome::success());

    let err: anyhow::Result<()> = Err(anyhow::anyhow!("disk on fire"));
    let outcome = Outcome::from(err);
    assert_eq!(outcome.verdict(), Verdict::Errored);
    assert_eq!(outcome.expected(), "disk on fire");

    assert_eq!(Outcome::from(()), Outcome::success());
}

fn fails_with_macro() -> anyhow::Result<()> {
    tandem::fail!("counts differ", expected: 3, actual: 2);
}

fn skips_with_macro() -> anyhow::Result<()> {
    tandem::skip!("no-data", "input was empty");
}

fn fails_after_question_mark() -> anyhow::Result<()> {
    let err: Result<(), ExampleError> = Err(ExampleError::fail("early"));
    err?;
    Ok(())
}

#[test]
fn example_errors_select_the_outcome() {
    assert_eq!(
        Outcome::from(fails_with_macro()),
        Outcome::mismatch("counts differ", "3", "2")
    );
    assert_eq!(
        Outcome::from(skips_with_macro()),
        Outcome::skip("no-data", "input was empty")
    );
    assert_eq!(Outcome::from(fails_after_question_mark()), Outcome::failure("early"));
}

#[test]
fn stats_count_verdicts() {
    let mut stat = Stat::default();
    stat.add(&Outcome::success())
        .add(&Outcome::failure("f"))
        .add(&Outcome::error("e"))
        .add(&Outcome::skip(EXCLUDED, ""))
        .add(&Outcome::success());

    assert_eq!(
        stat,
        Stat {
            passed: 2,
            failed: 1,
            errors: 1,
            skipped: 1,
            total: 5,
        }
    );
}

#[test]
fn verdicts_are_ordered_by_priority() {
    assert!(Verdict::Skipped < Verdict::Passed);
    assert!(Verdict::Passed < Verdict::Failed);
    assert!(Verdict::Failed < Verdict::Errored);
    assert!(Verdict::Errored.failed());
    assert!(!Verdict::Skipped.passed());
}
