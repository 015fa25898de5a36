//! Events sent to reporters

use crate::context::Mode;
use crate::outcome::Outcome;
use crate::suite::Example;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

/// The final outcome of one example, with timing
#[derive(Debug, Clone)]
pub struct Report {
    /// Name of the example
    pub name: String,
    /// Where the example ran
    pub mode: Mode,
    /// The merged outcome of every attempt
    pub outcome: Outcome,
    /// When the example started
    pub started: DateTime<Utc>,
    /// When the example finished
    pub ended: DateTime<Utc>,
    /// How long the example took, from a monotonic clock
    pub elapsed: Duration,
}

/// An event sent to reporters
#[derive(Debug, Clone)]
pub enum Event {
    /// An example has started
    Started(Arc<Example>),
    /// An example has finished
    Finished(Arc<Report>),
}
