//! Execution contexts: where, and how many times, an example body runs.
//!
//! A context is stateless apart from the options and the environment provider it was built
//! with. Each call to [`ExecutionContext::run`] gets fresh environments, and never lets a panic or
//! an error escape: everything ends up in the returned [`Outcome`].

use crate::environment::{Environment, EnvironmentProvider};
use crate::gate::{self, ContextKind, Filters};
use crate::merge::merge;
use crate::options::TestOptions;
use crate::outcome::Outcome;
use crate::panic::PanicToOutcome;
use crate::timer::{format_duration, Timer};
use anyhow::Context as _;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info_span};

/// Where an example runs
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Once, in a local environment
    Local,
    /// Once, in a remote environment
    Remote,
    /// Locally, then remotely unless the local attempt failed
    LocalThenRemote,
}

impl Mode {
    /// May this mode run on the cluster?
    pub fn is_remote(&self) -> bool {
        !matches!(self, Mode::Local)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Local => "local",
            Mode::Remote => "cluster",
            Mode::LocalThenRemote => "local, then cluster",
        };
        f.write_str(name)
    }
}

/// The settings an execution context needs from the test options
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Enabled inclusion tokens
    pub filters: Filters,
    /// Annotate outcomes with execution times
    pub show_times: bool,
}

impl From<&TestOptions> for Settings {
    fn from(options: &TestOptions) -> Self {
        Self {
            filters: options.filters.clone(),
            show_times: options.show_times,
        }
    }
}

/// Runs example bodies according to a [`Mode`]
#[derive(Clone)]
pub struct ExecutionContext {
    mode: Mode,
    settings: Arc<Settings>,
    provider: Arc<dyn EnvironmentProvider>,
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("mode", &self.mode)
            .field("settings", &self.settings)
            .finish()
    }
}

impl ExecutionContext {
    /// A context for `mode`
    pub fn new(
        mode: Mode,
        settings: Arc<Settings>,
        provider: Arc<dyn EnvironmentProvider>,
    ) -> Self {
        Self {
            mode,
            settings,
            provider,
        }
    }

    /// Run once, locally
    pub fn local(settings: Arc<Settings>, provider: Arc<dyn EnvironmentProvider>) -> Self {
        Self::new(Mode::Local, settings, provider)
    }

    /// Run once, remotely
    pub fn remote(settings: Arc<Settings>, provider: Arc<dyn EnvironmentProvider>) -> Self {
        Self::new(Mode::Remote, settings, provider)
    }

    /// Run locally, then remotely
    pub fn local_then_remote(
        settings: Arc<Settings>,
        provider: Arc<dyn EnvironmentProvider>,
    ) -> Self {
        Self::new(Mode::LocalThenRemote, settings, provider)
    }

    /// The mode of this context
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// May this context run on the cluster? Useful to skip staging remote artifacts.
    pub fn is_remote(&self) -> bool {
        self.mode.is_remote()
    }

    /// Run `body` according to the mode. The local and remote attempts of
    /// [`Mode::LocalThenRemote`] run one after the other, never concurrently.
    pub fn run<F, R>(&self, body: F) -> Outcome
    where
        F: Fn(&Environment) -> R,
        R: Into<Outcome>,
    {
        match self.mode {
            Mode::Local => self.attempt(ContextKind::Local, &body),
            Mode::Remote => self.attempt(ContextKind::Remote, &body),
            Mode::LocalThenRemote => merge(self.attempt(ContextKind::Local, &body), || {
                self.attempt(ContextKind::Remote, &body)
            }),
        }
    }

    /// One gated, timed attempt
    fn attempt<F, R>(&self, kind: ContextKind, body: &F) -> Outcome
    where
        F: Fn(&Environment) -> R,
        R: Into<Outcome>,
    {
        let span = info_span!("attempt", kind = %kind);
        let _enter = span.enter();

        if !gate::allowed(kind, &self.settings.filters) {
            debug!("excluded by filters");
            return gate::excluded(kind);
        }

        let mut timer = Timer::start();
        let outcome = match self.environment(kind) {
            Ok(env) => PanicToOutcome::from(|| body(&env)).call_once(),
            Err(e) => Outcome::error_from(e),
        };
        let elapsed = timer.stop();
        debug!(verdict = %outcome.verdict(), elapsed = %format_duration(elapsed), "attempt done");

        if self.settings.show_times {
            outcome.annotate(kind.time_label(), format_duration(elapsed))
        } else {
            outcome
        }
    }

    fn environment(&self, kind: ContextKind) -> anyhow::Result<Environment> {
        match kind {
            ContextKind::Local => self
                .provider
                .local_environment()
                .context("Could not create the local environment"),
            ContextKind::Remote => self
                .provider
                .remote_environment()
                .context("Could not create the remote environment"),
        }
    }
}
