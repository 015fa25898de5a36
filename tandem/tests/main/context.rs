use crate::{provider, settings, Calls};
use std::sync::Arc;
use tandem::*;

fn passing(calls: &Calls) -> impl Fn(&Environment) -> Outcome + '_ {
    move |env| {
        calls.record(env);
        Outcome::success()
    }
}

#[test]
fn without_mode_tokens_nothing_runs() {
    for tokens in [&[][..], &["fast"][..], &["localhost", "clusters"][..]] {
        let calls = Calls::default();
        let local = ExecutionContext::local(settings(tokens), provider(true));
        let remote = ExecutionContext::remote(settings(tokens), provider(true));

        assert_eq!(
            local.run(passing(&calls)),
            Outcome::skip(EXCLUDED, "No local execution time")
        );
        assert_eq!(
            remote.run(|_| -> Outcome { panic!("must not run") }),
            Outcome::skip(EXCLUDED, "No cluster execution time")
        );
        assert!(calls.all().is_empty());
    }
}

#[test]
fn hadoop_runs_both_modes() {
    let calls = Calls::default();
    let local = ExecutionContext::local(settings(&["hadoop"]), provider(true));
    let remote = ExecutionContext::remote(settings(&["hadoop"]), provider(true));

    assert_eq!(local.run(passing(&calls)), Outcome::success());
    assert_eq!(remote.run(passing(&calls)), Outcome::success());
    assert_eq!(calls.all(), vec![false, true]);
}

#[test]
fn local_failure_never_reaches_the_cluster() {
    let calls = Calls::default();
    let context = ExecutionContext::local_then_remote(settings(&["hadoop"]), provider(true));

    let outcome = context.run(|env| {
        calls.record(env);
        Outcome::mismatch("wrong count", "3", "2")
    });

    assert_eq!(outcome, Outcome::mismatch("wrong count", "3", "2"));
    assert_eq!(calls.local(), 1);
    assert_eq!(calls.remote(), 0);
}

#[test]
fn local_error_never_reaches_the_cluster() {
    let calls = Calls::default();
    let context = ExecutionContext::local_then_remote(settings(&["hadoop"]), provider(true));

    let outcome = context.run(|env| -> anyhow::Result<()> {
        calls.record(env);
        anyhow::bail!("no input")
    });

    assert_eq!(outcome.verdict(), Verdict::Errored);
    assert_eq!(calls.all(), vec![false]);
}

#[test]
fn skipped_local_hands_over_to_the_cluster() {
    let calls = Calls::default();
    let context = ExecutionContext::local_then_remote(settings(&["cluster"]), provider(true));

    let outcome = context.run(|env| {
        calls.record(env);
        Outcome::success_with_message("ran on the cluster")
    });

    assert_eq!(
        outcome,
        Outcome::success_with_message("No local execution time\nran on the cluster")
    );
    assert_eq!(calls.all(), vec![true]);
}

#[test]
fn skipped_local_and_skipped_remote_explain_both() {
    let context = ExecutionContext::local_then_remote(settings(&[]), provider(true));
    let outcome = context.run(|_| Outcome::success());

    assert_eq!(
        outcome,
        Outcome::skip(EXCLUDED, "No local execution time\nNo cluster execution time")
    );
}

#[test]
fn both_pass_in_order() {
    let calls = Calls::default();
    let context = ExecutionContext::local_then_remote(settings(&["local", "cluster"]), provider(true));

    assert_eq!(context.run(passing(&calls)), Outcome::success());
    // local strictly first, each exactly once
    assert_eq!(calls.all(), vec![false, true]);
}

#[test]
fn remote_failure_fails_the_example() {
    let context = ExecutionContext::local_then_remote(settings(&["hadoop"]), provider(true));
    let outcome = context.run(|env| {
        if env.is_remote() {
            Outcome::failure("only fails on the cluster")
        } else {
            Outcome::success()
        }
    });

    assert_eq!(outcome, Outcome::failure("only fails on the cluster"));
}

#[test]
fn local_pass_with_cluster_excluded_passes() {
    let context = ExecutionContext::local_then_remote(settings(&["local"]), provider(true));

    let outcome = context.run(|_| Outcome::success());
    assert!(outcome.passed(), "{}", outcome);
    assert_eq!(
        outcome,
        Outcome::success_with_message("No cluster execution time")
    );

    let outcome = context.run(|_| Outcome::success_with_message("local ok"));
    assert_eq!(
        outcome,
        Outcome::success_with_message("local ok\nNo cluster execution time")
    );
}

#[test]
fn missing_cluster_is_an_error() {
    let calls = Calls::default();
    let context = ExecutionContext::remote(settings(&["cluster"]), provider(false));

    let outcome = context.run(passing(&calls));
    assert_eq!(outcome.verdict(), Verdict::Errored);
    assert!(outcome
        .expected()
        .starts_with("Could not create the remote environment"));
    assert!(calls.all().is_empty());
}

#[test]
fn assertion_panics_are_failures() {
    let context = ExecutionContext::local(settings(&["local"]), provider(false));
    let outcome = context.run(|_| {
        assert_eq!(1 + 1, 3);
    });

    match outcome {
        Outcome::Failure {
            message,
            expected,
            actual,
            ..
        } => {
            assert!(message.starts_with("assertion"), "{}", message);
            assert_eq!(expected, "3");
            assert_eq!(actual, "2");
        }
        other => panic!("expected a failure, got {}", other),
    }
}

#[test]
fn other_panics_are_errors() {
    let context = ExecutionContext::local(settings(&["local"]), provider(false));
    let outcome = context.run(|_| -> Outcome { panic!("index out of range") });

    assert_eq!(outcome, Outcome::error("Panicked: index out of range"));
}

#[test]
fn times_are_annotated_when_asked() {
    let timed = Arc::new(Settings {
        filters: ["hadoop"].iter().copied().collect(),
        show_times: true,
    });
    let context = ExecutionContext::local_then_remote(timed, provider(true));
    let outcome = context.run(|_| Outcome::success());

    assert!(outcome.passed());
    let lines: Vec<_> = outcome.expected().lines().collect();
    assert_eq!(lines.len(), 2, "{:?}", lines);
    assert!(lines[0].starts_with("Local execution time: "));
    assert!(lines[1].starts_with("Cluster execution time: "));

    let untimed = ExecutionContext::local(settings(&["hadoop"]), provider(true));
    assert_eq!(untimed.run(|_| Outcome::success()), Outcome::success());
}

#[test]
fn every_attempt_gets_a_fresh_environment() {
    let context = ExecutionContext::local_then_remote(settings(&["hadoop"]), provider(true));
    let seen = parking_lot::Mutex::new(vec![]);

    let outcome = context.run(|env| -> anyhow::Result<()> {
        // a value left behind by the local attempt must not be visible remotely
        let count = env.config().increment("runs", 1)?;
        seen.lock().push((env.id(), count, env.config().get(MODE_KEY)));
        Ok(())
    });

    assert!(outcome.passed());
    let seen = seen.into_inner();
    assert_eq!(seen.len(), 2);
    assert_ne!(seen[0].0, seen[1].0);
    assert_eq!(seen[0].1, 1);
    assert_eq!(seen[1].1, 1);
    assert_eq!(seen[0].2.as_deref(), Some("local"));
    assert_eq!(seen[1].2.as_deref(), Some("cluster"));
}

#[test]
fn modes_know_if_they_are_remote() {
    assert!(!ExecutionContext::local(settings(&[]), provider(false)).is_remote());
    assert!(ExecutionContext::remote(settings(&[]), provider(false)).is_remote());
    assert!(ExecutionContext::local_then_remote(settings(&[]), provider(false)).is_remote());
}

#[test]
fn remote_error_after_local_skip_keeps_its_message() {
    let context = ExecutionContext::local_then_remote(settings(&["cluster"]), provider(true));
    let outcome = context.run(|_| -> Outcome { panic!("boom") });
    assert_eq!(outcome, Outcome::error("Panicked: boom"));

    let context = ExecutionContext::local_then_remote(settings(&["cluster"]), provider(false));
    let outcome = context.run(|_| Outcome::success());
    assert_eq!(outcome.verdict(), Verdict::Errored);
    assert!(outcome
        .expected()
        .starts_with("Could not create the remote environment"));
}
