//! Example outcomes

use crate::example::ExampleError;
use std::fmt;
use std::sync::Arc;

/// The result of one execution attempt of an example body.
///
/// Outcomes are never modified in place. The transforms below consume the outcome and return a new
/// one, so a value handed to a reporter is exactly what the execution produced.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The body ran and passed
    Success {
        /// Optional human-readable message. This is the reporting text for a success.
        message: Option<String>,
    },
    /// The body ran and an assertion did not hold
    Failure {
        /// What went wrong
        message: String,
        /// What the body expected to see. Also the reporting text for a failure.
        expected: String,
        /// What the body actually saw
        actual: String,
        /// Where the failure happened, innermost first. May be empty.
        stack_trace: Vec<String>,
    },
    /// The body (or the environment it needed) failed unexpectedly
    Error {
        /// Description of the error. Also the reporting text for an error.
        message: String,
        /// The underlying error, if there is one
        cause: Option<Arc<anyhow::Error>>,
    },
    /// The body was not executed
    Skipped {
        /// Machine-readable reason, e.g. `"excluded"`
        reason: String,
        /// Free-form explanation for the report
        expected: String,
    },
}

/// Reason attached to outcomes skipped by the run gate
pub const EXCLUDED: &str = "excluded";

/// Summary of an outcome, for counting and prioritizing. Ordered from lowest priority (Skipped)
/// to highest (Errored).
#[derive(Copy, Clone, Debug, PartialOrd, PartialEq, Ord, Eq, Hash)]
pub enum Verdict {
    /// The example was skipped or excluded
    Skipped,
    /// The example passed
    Passed,
    /// The example failed
    Failed,
    /// The example raised an error
    Errored,
}

impl Verdict {
    /// The verdict passed
    pub fn passed(&self) -> bool {
        *self == Verdict::Passed
    }

    /// The verdict is skipped
    pub fn skipped(&self) -> bool {
        *self == Verdict::Skipped
    }

    /// The verdict is a failure or an error
    pub fn failed(&self) -> bool {
        matches!(self, Verdict::Failed | Verdict::Errored)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Verdict::Skipped => "skipped",
            Verdict::Passed => "passed",
            Verdict::Failed => "failed",
            Verdict::Errored => "error",
        };

        f.write_str(msg)
    }
}

/// A summary of how many examples passed/failed/skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stat {
    /// number of passing examples
    pub passed: usize,
    /// number of failed examples
    pub failed: usize,
    /// number of examples with errors
    pub errors: usize,
    /// number of skipped examples
    pub skipped: usize,
    /// total number of examples
    pub total: usize,
}

impl Stat {
    /// Count one more outcome
    pub fn add(&mut self, outcome: &Outcome) -> &mut Self {
        self.total += 1;
        match outcome.verdict() {
            Verdict::Passed => self.passed += 1,
            Verdict::Failed => self.failed += 1,
            Verdict::Errored => self.errors += 1,
            Verdict::Skipped => self.skipped += 1,
        }
        self
    }
}

impl Outcome {
    /// A success with no message
    pub fn success() -> Self {
        Outcome::Success { message: None }
    }

    /// A success with a message
    pub fn success_with_message<M: Into<String>>(message: M) -> Self {
        Outcome::Success {
            message: Some(message.into()),
        }
    }

    /// A failure with only a message
    pub fn failure<M: Into<String>>(message: M) -> Self {
        Outcome::Failure {
            message: message.into(),
            expected: String::new(),
            actual: String::new(),
            stack_trace: vec![],
        }
    }

    /// An expected-versus-actual failure
    pub fn mismatch<M, E, A>(message: M, expected: E, actual: A) -> Self
    where
        M: Into<String>,
        E: Into<String>,
        A: Into<String>,
    {
        Outcome::Failure {
            message: message.into(),
            expected: expected.into(),
            actual: actual.into(),
            stack_trace: vec![],
        }
    }

    /// An error with only a message
    pub fn error<M: Into<String>>(message: M) -> Self {
        Outcome::Error {
            message: message.into(),
            cause: None,
        }
    }

    /// An error built from an `anyhow::Error`. The message is the full context chain.
    pub fn error_from(err: anyhow::Error) -> Self {
        Outcome::Error {
            message: format!("{:#}", err),
            cause: Some(Arc::new(err)),
        }
    }

    /// A skipped outcome
    pub fn skip<R: Into<String>, E: Into<String>>(reason: R, expected: E) -> Self {
        Outcome::Skipped {
            reason: reason.into(),
            expected: expected.into(),
        }
    }

    /// The verdict for this outcome
    pub fn verdict(&self) -> Verdict {
        match self {
            Outcome::Success { .. } => Verdict::Passed,
            Outcome::Failure { .. } => Verdict::Failed,
            Outcome::Error { .. } => Verdict::Errored,
            Outcome::Skipped { .. } => Verdict::Skipped,
        }
    }

    /// Return true if the outcome passed
    pub fn passed(&self) -> bool {
        self.verdict().passed()
    }

    /// Return true if the outcome was skipped
    pub fn skipped(&self) -> bool {
        self.verdict().skipped()
    }

    /// Return true if the outcome is a failure or an error
    pub fn failed(&self) -> bool {
        self.verdict().failed()
    }

    /// The text a reporter shows alongside the verdict.
    pub fn expected(&self) -> &str {
        match self {
            Outcome::Success { message } => message.as_deref().unwrap_or(""),
            Outcome::Failure { expected, .. } => expected,
            Outcome::Error { message, .. } => message,
            Outcome::Skipped { expected, .. } => expected,
        }
    }

    /// Transform the reporting text of any variant. The verdict is unchanged.
    pub fn update_expected<F: FnOnce(String) -> String>(self, f: F) -> Self {
        match self {
            Outcome::Success { message } => Outcome::Success {
                message: Some(f(message.unwrap_or_default())),
            },
            Outcome::Failure {
                message,
                expected,
                actual,
                stack_trace,
            } => Outcome::Failure {
                message,
                expected: f(expected),
                actual,
                stack_trace,
            },
            Outcome::Error { message, cause } => Outcome::Error {
                message: f(message),
                cause,
            },
            Outcome::Skipped { reason, expected } => Outcome::Skipped {
                reason,
                expected: f(expected),
            },
        }
    }

    /// Append `"<prefix>: <extra>"` to the reporting text, on its own line if there is already
    /// text. Used for execution times.
    pub fn annotate<P: fmt::Display, E: fmt::Display>(self, prefix: P, extra: E) -> Self {
        let line = format!("{}: {}", prefix, extra);
        self.update_expected(|text| append_line(text, &line))
    }

    /// Transform the `expected` text of a `Skipped` outcome. Identity for everything else.
    pub fn map_skipped_reason<F: FnOnce(String) -> String>(self, f: F) -> Self {
        match self {
            Outcome::Skipped { reason, expected } => Outcome::Skipped {
                reason,
                expected: f(expected),
            },
            other => other,
        }
    }
}

/// Join `line` onto `text` with a newline, unless `text` is empty.
pub(crate) fn append_line(mut text: String, line: &str) -> String {
    if !text.is_empty() {
        text.push('\n');
    }
    text.push_str(line);
    text
}

impl PartialEq for Outcome {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Outcome::Success { message: a }, Outcome::Success { message: b }) => a == b,
            (
                Outcome::Failure {
                    message: m1,
                    expected: e1,
                    actual: a1,
                    stack_trace: s1,
                },
                Outcome::Failure {
                    message: m2,
                    expected: e2,
                    actual: a2,
                    stack_trace: s2,
                },
            ) => m1 == m2 && e1 == e2 && a1 == a2 && s1 == s2,
            // causes are compared by their rendering; anyhow::Error has no equality
            (
                Outcome::Error {
                    message: m1,
                    cause: c1,
                },
                Outcome::Error {
                    message: m2,
                    cause: c2,
                },
            ) => {
                m1 == m2
                    && c1.as_ref().map(|c| format!("{:#}", c))
                        == c2.as_ref().map(|c| format!("{:#}", c))
            }
            (
                Outcome::Skipped {
                    reason: r1,
                    expected: e1,
                },
                Outcome::Skipped {
                    reason: r2,
                    expected: e2,
                },
            ) => r1 == r2 && e1 == e2,
            _ => false,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verdict())?;

        match self {
            Outcome::Success { message: None } => (),
            Outcome::Success { message: Some(m) } => write!(f, " ({})", m)?,
            Outcome::Failure {
                message,
                expected,
                actual,
                ..
            } => {
                write!(f, " ({})", message)?;
                if !expected.is_empty() || !actual.is_empty() {
                    write!(f, " expected: {:?}, actual: {:?}", expected, actual)?;
                }
            }
            Outcome::Error { message, .. } => write!(f, " ({})", message)?,
            Outcome::Skipped { reason, expected } => {
                write!(f, " ({})", reason)?;
                if !expected.is_empty() {
                    write!(f, " {}", expected)?;
                }
            }
        }

        Ok(())
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::success()
    }
}

impl From<()> for Outcome {
    fn from(_: ()) -> Self {
        Self::success()
    }
}

/// `Ok` is a success. An [`ExampleError`] becomes the outcome it carries, and any other error
/// becomes [`Outcome::Error`].
impl<T> From<anyhow::Result<T>> for Outcome {
    fn from(result: anyhow::Result<T>) -> Self {
        match result {
            Ok(_) => Self::success(),
            Err(err) => match err.downcast::<ExampleError>() {
                Ok(e) => e.into_outcome(),
                Err(e) => Self::error_from(e),
            },
        }
    }
}
