//! Folding a local outcome and a later remote outcome into one.

use crate::outcome::{append_line, Outcome};
use tracing::debug;

/// Combine the local attempt of an example with its remote attempt.
///
/// `remote` is only called when the local attempt did not fail:
///
/// * a local failure or error is returned as is, and the remote attempt never happens;
/// * a skipped local attempt hands over to the remote attempt, whose `expected` text is prefixed
///   with the local explanation. An error has no `expected` text and is returned untouched;
/// * a local success is combined with the remote outcome by [`conjunction`].
pub fn merge<F>(local: Outcome, remote: F) -> Outcome
where
    F: FnOnce() -> Outcome,
{
    match local {
        Outcome::Failure { .. } | Outcome::Error { .. } => {
            debug!(verdict = %local.verdict(), "local attempt failed; not running remotely");
            local
        }
        Outcome::Skipped { expected, .. } => {
            debug!("local attempt skipped; running remotely");
            match remote() {
                error @ Outcome::Error { .. } => error,
                outcome => outcome.update_expected(|text| format!("{}\n{}", expected, text)),
            }
        }
        Outcome::Success { .. } => {
            debug!("local attempt passed; running remotely");
            conjunction(local, remote())
        }
    }
}

/// Both outcomes must pass for the result to pass.
///
/// The first failure or error wins, keeping its own text. Otherwise the result is a success
/// whenever either side passed: a skipped side only contributes its explanation, as another line
/// of the success message. Two skips stay skipped.
pub fn conjunction(first: Outcome, second: Outcome) -> Outcome {
    if first.failed() {
        return first;
    }
    if second.failed() {
        return second;
    }

    match (first, second) {
        (Outcome::Success { message: a }, Outcome::Success { message: b }) => {
            let message = match (a, b) {
                (None, None) => None,
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (Some(a), Some(b)) => Some(append_line(a, &b)),
            };
            Outcome::Success { message }
        }
        (first, second) if first.passed() || second.passed() => {
            let mut text = first.expected().to_string();
            if !second.expected().is_empty() {
                text = append_line(text, second.expected());
            }
            if text.is_empty() {
                Outcome::success()
            } else {
                Outcome::success_with_message(text)
            }
        }
        (first, second) => {
            let prefix = first.expected().to_string();
            prefix_text(second, prefix)
        }
    }
}

fn prefix_text(outcome: Outcome, prefix: String) -> Outcome {
    if prefix.is_empty() {
        return outcome;
    }
    outcome.update_expected(|text| {
        if text.is_empty() {
            prefix
        } else {
            append_line(prefix, &text)
        }
    })
}
