#![warn(missing_docs)]

//! Tandem: run one example body locally, on a cluster, or both

use crate::*;

use crate::logging;
use async_broadcast as broadcast;
use clap::App;
use futures::future::join_all;
use futures::join;
use std::sync::Arc;
use tracing::debug;

/// Keeps the default panic hook from printing a message for every failed assertion
struct PanicSilencer {
    hook: Option<Box<dyn Fn(&std::panic::PanicInfo<'_>) + Sync + Send + 'static>>,
}

impl Drop for PanicSilencer {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            if let Some(hook) = self.hook.take() {
                std::panic::set_hook(hook);
            }
        }
    }
}

impl PanicSilencer {
    pub fn new() -> Self {
        let hook = Some(std::panic::take_hook());
        std::panic::set_hook(Box::new(|_| {}));
        Self { hook }
    }
}

/// Top level tester
pub struct Tandem {
    silence_panics: bool,
    examples: Vec<Example>,
    provider: Arc<dyn EnvironmentProvider>,
    runner: Box<dyn Runner>,
    reporters: Vec<Box<dyn Reporter>>,
    options: Arc<TestOptions>,
}

impl Tandem {
    /// Create a [`TandemBuilder`] to customize this instance.
    pub fn builder() -> TandemBuilder {
        TandemBuilder::new()
    }

    /// The options this instance was built with
    pub fn options(&self) -> &Arc<TestOptions> {
        &self.options
    }

    /// Run every example. The return value is based on the reporters: an error if any reporter
    /// failed, which the plain reporter does when an example failed.
    pub async fn run(self) -> anyhow::Result<()> {
        let Tandem {
            silence_panics,
            examples,
            provider,
            runner,
            reporters,
            options,
        } = self;

        // disable "thread ... panicked" message at every assertion failure
        let _silence = if silence_panics {
            Some(PanicSilencer::new())
        } else {
            None
        };

        let (events_tx, events_rx) = broadcast::broadcast(256);
        let runner = runner.run(examples, options.clone(), provider, events_tx);

        // launch reporters
        let reporters = join_all(
            reporters
                .into_iter()
                .map(|r| r.report(options.clone(), events_rx.clone())),
        );

        // Let them all run to completion
        drop(events_rx);
        let (_, results) = join!(runner, reporters);

        // Return the result, from reporters
        results.into_iter().find(Result::is_err).unwrap_or(Ok(()))
    }
}

/// A builder for [`Tandem`]
pub struct TandemBuilder {
    silence_panics: bool,
    init_logging: bool,
    registered: bool,
    options_builder: TestOptionsBuilder,
    examples: Vec<Example>,
    provider: Option<Arc<dyn EnvironmentProvider>>,
    runner: Box<dyn Runner>,
    reporters: Vec<Box<dyn Reporter>>,
}

impl Default for TandemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TandemBuilder {
    /// Create a new [`TandemBuilder`]
    pub fn new() -> Self {
        Self {
            silence_panics: true,
            init_logging: true,
            registered: true,
            options_builder: TestOptionsBuilder::new(),
            examples: vec![],
            provider: None,
            runner: Box::new(StandardRunner::new()),
            reporters: vec![],
        }
    }

    /// Create a [`Tandem`] test runner using the process command line. This will reset the
    /// builder to its default state.
    pub fn build(&mut self) -> anyhow::Result<Tandem> {
        self.build_with_app(App::new("Tandem"))
    }

    /// Create a [`Tandem`] test runner using a specified set of command line arguments. Extra
    /// command line arguments registered via [`ExtraOptionsFunc`] will be added. This resets the
    /// builder to its default state.
    pub fn build_with_app(&mut self, app: App<'static, '_>) -> anyhow::Result<Tandem> {
        self.build_with_app_from(app, &mut std::env::args_os())
    }

    /// As `build_with_app`, but allows you to specify your own command line arguments.
    pub fn build_with_app_from<I, T>(
        &mut self,
        app: App<'static, '_>,
        iter: I,
    ) -> anyhow::Result<Tandem>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        if self.reporters.is_empty() {
            self.command_line_reporter();
        }

        let mut obj = Self::new();
        std::mem::swap(&mut obj, self);
        let TandemBuilder {
            silence_panics,
            init_logging,
            registered,
            options_builder,
            mut examples,
            provider,
            runner,
            reporters,
        } = obj;

        let options = Arc::new(options_builder.build_with_app_from(app, iter)?);
        if init_logging {
            logging::init(options.level);
        }

        if registered {
            examples.extend(suite::registered());
        }

        let provider = match provider {
            Some(p) => p,
            None => Arc::new(StandardProvider::from_options(&options)),
        };

        debug!(
            examples = examples.len(),
            level = %options.level,
            show_times = options.show_times,
            "tandem built"
        );

        Ok(Tandem {
            silence_panics,
            examples,
            provider,
            runner,
            reporters,
            options,
        })
    }

    #[doc(hidden)]
    /// Leave the default hook that prints information about panics. Generally this isn't what you
    /// want, because it will spam the output every time an assert! fails.
    pub fn silence_panics(&mut self, silence: bool) -> &mut Self {
        self.silence_panics = silence;
        self
    }

    /// Install a `tracing` subscriber at the verbosity requested on the command line. Default is
    /// true; turn it off if the application installs its own subscriber.
    pub fn init_logging(&mut self, init: bool) -> &mut Self {
        self.init_logging = init;
        self
    }

    /// Include examples registered with [`crate::example!`]. Default is true.
    pub fn registered_examples(&mut self, include: bool) -> &mut Self {
        self.registered = include;
        self
    }

    /// Set the overall title of the test. Used to customize reporter output.
    pub fn title<T: Into<String>>(&mut self, title: T) -> &mut Self {
        self.options_builder.title(title);
        self
    }

    /// Set the namespace marker of verbosity and timing tokens. Default is `scoobi`.
    pub fn namespace<T: Into<String>>(&mut self, namespace: T) -> &mut Self {
        self.options_builder.namespace(namespace);
        self
    }

    /// Add an example
    pub fn example<N, F, R>(&mut self, name: N, mode: Mode, body: F) -> &mut Self
    where
        N: Into<String>,
        F: Fn(&Environment) -> R + Send + Sync + 'static,
        R: Into<Outcome>,
    {
        self.examples.push(Example::new(name, mode, body));
        self
    }

    /// Use a custom environment provider. If none is given, a [`StandardProvider`] is built from
    /// the command line.
    pub fn provider<P: EnvironmentProvider + 'static>(&mut self, provider: P) -> &mut Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Add a custom runner. If no custom runner is added, the default runner will be used.
    pub fn runner<T: Runner + 'static>(&mut self, runner: T) -> &mut Self {
        self.runner = Box::new(runner);
        self
    }

    /// Add a custom reporter. Multiple reporters may be added. If no reporters are added, the
    /// command line will be examined to find a reporter (choosing a default if needed).
    pub fn reporter<T: Reporter + 'static>(&mut self, reporter: T) -> &mut Self {
        self.reporters.push(Box::new(reporter));
        self
    }

    /// Explicitly add reporters from the command line. Additional reporters may still be added in
    /// addition to the default.
    pub fn command_line_reporter(&mut self) -> &mut Self {
        self.reporter(CommandLineReporter::default())
    }
}
