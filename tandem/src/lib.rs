#![warn(missing_docs)]

//! Tandem: one example body, local or on a cluster
//! ================================================
//!
//! Tandem runs test examples in a local environment, in a remote (cluster) environment, or first
//! locally and then remotely, and folds the attempts into a single [`Outcome`]:
//!
//! 1. **Location agnostic**: an example body receives an [`Environment`] and never needs to know
//!    where it runs.
//! 2. **Opt-in**: command line filters decide which attempts may run at all. `--include hadoop`
//!    enables both, `--include local` and `--include cluster` one each. Without them, every
//!    attempt is skipped as excluded.
//! 3. **Cheap first**: [`Mode::LocalThenRemote`] only pays for the remote attempt when the local
//!    attempt did not already fail.
//!
//! Execution times are added to outcomes when a token such as `scoobi.times` is given, and the
//! log verbosity is picked from a token such as `scoobi.verbose.fine`.

extern crate self as tandem;
pub mod context;
pub mod environment;
pub mod event;
pub mod example;
pub mod gate;
pub mod id;
pub mod level;
pub mod logging;
pub mod merge;
pub mod options;
pub mod outcome;
#[doc(hidden)]
pub mod panic;
#[doc(hidden)]
pub mod reexport;
pub mod reporter;
pub mod runner;
pub mod suite;
pub mod timer;
pub mod top;

pub use context::*;
pub use environment::*;
pub use event::*;
pub use example::*;
pub use gate::{allowed, excluded, ContextKind, Filters};
pub use id::*;
pub use level::*;
pub use merge::*;
pub use options::*;
pub use outcome::*;
pub use panic::*;
pub use reporter::*;
pub use runner::*;
pub use suite::{Body, Example, ExampleEntry};
pub use timer::*;
pub use top::*;
