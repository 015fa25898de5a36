//! Helpers for dealing with panics in example bodies.
//!
//! `assert!` and friends are the normal way to check things in Rust, so an assertion panic is a
//! [`Outcome::Failure`]. Anything else that panics is an [`Outcome::Error`].

use crate::outcome::Outcome;
use lazy_static::lazy_static;
use regex::Regex;
use std::any::Any;
use std::ffi::{OsStr, OsString};
use std::panic::{catch_unwind, AssertUnwindSafe};

lazy_static! {
    // `assert_eq!` output, old and new formats:
    //   assertion failed: `(left == right)`\n  left: `1`,\n right: `2`
    //   assertion `left == right` failed\n  left: 1\n right: 2
    static ref LEFT: Regex = Regex::new(r"(?m)^\s*left:\s*`?(.*?)`?,?$").unwrap();
    static ref RIGHT: Regex = Regex::new(r"(?m)^\s*right:\s*`?(.*?)`?$").unwrap();
}

/// Wraps a body so that calling it can never unwind into the caller.
pub struct PanicToOutcome<F>(F);

impl<R, F> From<F> for PanicToOutcome<F>
where
    R: Into<Outcome>,
    F: FnOnce() -> R,
{
    fn from(func: F) -> Self {
        Self(func)
    }
}

impl<R, F> PanicToOutcome<F>
where
    R: Into<Outcome>,
    F: FnOnce() -> R,
{
    /// Call the body, converting its result or its panic into an outcome
    pub fn call_once(self) -> Outcome {
        let Self(func) = self;
        // The body only sees its own environment, which is dropped with it, so nothing observes
        // a half-updated value after an unwind.
        match catch_unwind(AssertUnwindSafe(func)) {
            Ok(r) => r.into(),
            Err(panic) => to_outcome(panic),
        }
    }
}

fn to_outcome(panic: Box<dyn Any + Send + 'static>) -> Outcome {
    let msg = panic_message(panic.as_ref());
    if !msg.starts_with("assertion") {
        return Outcome::error(format!("Panicked: {}", msg));
    }

    let capture = |re: &Regex| {
        re.captures(&msg)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    };
    let actual = capture(&LEFT);
    let expected = capture(&RIGHT);
    let message = msg.lines().next().unwrap_or_default().to_string();

    Outcome::mismatch(message, expected, actual)
}

fn panic_message(panic: &(dyn Any + Send + 'static)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else if let Some(msg) = panic.downcast_ref::<&OsStr>() {
        msg.to_string_lossy().into_owned()
    } else if let Some(msg) = panic.downcast_ref::<OsString>() {
        msg.to_string_lossy().into_owned()
    } else {
        String::from("(No message available)")
    }
}
