//! Misc things for implementing example bodies

use crate::outcome::Outcome;
use std::error::Error;
use std::fmt;

/// A special error type that may be returned from an example body to select a specific
/// [`Outcome`] instead of the default [`Outcome::Error`].
///
/// Bodies that return `anyhow::Result` are converted with `Outcome::from`. Plain errors become
/// errors; this type lets a body fail an assertion or skip itself while still using `?`.
pub struct ExampleError {
    outcome: Outcome,
}

impl fmt::Debug for ExampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.outcome, f)
    }
}

impl fmt::Display for ExampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.outcome, f)
    }
}

impl Error for ExampleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.outcome {
            Outcome::Error {
                cause: Some(cause), ..
            } => Some(&***cause),
            _ => None,
        }
    }
}

impl From<Outcome> for ExampleError {
    fn from(outcome: Outcome) -> Self {
        Self { outcome }
    }
}

impl ExampleError {
    /// Fail the example with a message
    pub fn fail<M: Into<String>>(message: M) -> Self {
        Outcome::failure(message).into()
    }

    /// Fail the example, recording what was expected and what was seen instead
    pub fn mismatch<M, E, A>(message: M, expected: E, actual: A) -> Self
    where
        M: Into<String>,
        E: Into<String>,
        A: Into<String>,
    {
        Outcome::mismatch(message, expected, actual).into()
    }

    /// Skip the example. The reason should be short and machine readable.
    pub fn skip<R: Into<String>, E: Into<String>>(reason: R, expected: E) -> Self {
        Outcome::skip(reason, expected).into()
    }

    /// Report an error with a string message
    pub fn error<M: Into<String>>(message: M) -> Self {
        Outcome::error(message).into()
    }

    /// The outcome this error stands for
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Unwrap into the outcome this error stands for
    pub fn into_outcome(self) -> Outcome {
        self.outcome
    }
}

/// Fail the example. Note that an `assert!` or returning an ordinary error also ends the
/// example, as a failure or an error respectively.
#[macro_export]
macro_rules! fail {
    ($msg:expr) => {{
        return ::std::result::Result::Err($crate::example::ExampleError::fail($msg).into());
    }};
    ($msg:expr, expected: $expected:expr, actual: $actual:expr) => {{
        return ::std::result::Result::Err(
            $crate::example::ExampleError::mismatch(
                $msg,
                ::std::string::ToString::to_string(&$expected),
                ::std::string::ToString::to_string(&$actual),
            )
            .into(),
        );
    }};
}

/// Skip the example.
#[macro_export]
macro_rules! skip {
    ($reason:expr) => {{
        return ::std::result::Result::Err(
            $crate::example::ExampleError::skip($reason, "").into(),
        );
    }};
    ($reason:expr, $expected:expr) => {{
        return ::std::result::Result::Err(
            $crate::example::ExampleError::skip($reason, $expected).into(),
        );
    }};
}
