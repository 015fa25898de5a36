//! Decides whether a local or remote attempt may run at all, given the active filters.

use crate::outcome::{Outcome, EXCLUDED};
use std::collections::BTreeSet;
use std::fmt;

/// Enables both local and remote execution
pub const HADOOP: &str = "hadoop";
/// Enables remote execution only
pub const CLUSTER: &str = "cluster";
/// Enables local execution only
pub const LOCAL: &str = "local";

/// Where a single attempt runs
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContextKind {
    /// In-process, with a local environment
    Local,
    /// On the cluster, with a remote environment
    Remote,
}

impl ContextKind {
    /// Name used in report text
    pub fn label(&self) -> &'static str {
        match self {
            ContextKind::Local => "local",
            ContextKind::Remote => "cluster",
        }
    }

    /// Prefix for the execution time annotation
    pub fn time_label(&self) -> &'static str {
        match self {
            ContextKind::Local => "Local execution time",
            ContextKind::Remote => "Cluster execution time",
        }
    }

    /// Is this the remote kind?
    pub fn is_remote(&self) -> bool {
        *self == ContextKind::Remote
    }
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The currently enabled inclusion tokens. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    tokens: BTreeSet<String>,
}

impl<S: Into<String>> FromIterator<S> for Filters {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Filters {
    /// An empty filter set. Nothing is allowed to run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Is `token` enabled?
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// All enabled tokens, sorted
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Number of enabled tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// No tokens at all?
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// May an attempt of `kind` run under `filters`?
///
/// `hadoop` opts in to both kinds; `local` and `cluster` opt in to one each. With none of them,
/// nothing runs.
pub fn allowed(kind: ContextKind, filters: &Filters) -> bool {
    let specific = match kind {
        ContextKind::Local => LOCAL,
        ContextKind::Remote => CLUSTER,
    };
    filters.contains(HADOOP) || filters.contains(specific)
}

/// The outcome of an attempt the gate did not allow
pub fn excluded(kind: ContextKind) -> Outcome {
    Outcome::skip(EXCLUDED, format!("No {} execution time", kind.label()))
}
