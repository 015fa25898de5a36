use super::Runner;
use crate::context::{ExecutionContext, Settings};
use crate::environment::EnvironmentProvider;
use crate::event::{Event, Report};
use crate::options::TestOptions;
use crate::outcome::{Outcome, EXCLUDED};
use crate::suite::Example;
use crate::timer::Timer;
use async_broadcast as broadcast;
use async_std::task;
use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tracing::{info, warn};

/// The standard test runner. Every example runs on its own blocking task, so examples run
/// concurrently while each example's attempts stay sequential.
pub struct StandardRunner {}

#[async_trait]
impl Runner for StandardRunner {
    async fn run(
        self: Box<Self>,
        examples: Vec<Example>,
        options: Arc<TestOptions>,
        provider: Arc<dyn EnvironmentProvider>,
        events: broadcast::Sender<Event>,
    ) {
        if let Err(e) = self.execute(examples, options, provider, events).await {
            warn!("Reporters went away before the run finished: {}", e);
        }
    }
}

impl Default for StandardRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardRunner {
    /// Create a new `StandardRunner`
    pub fn new() -> Self {
        Self {}
    }

    async fn execute(
        self,
        examples: Vec<Example>,
        options: Arc<TestOptions>,
        provider: Arc<dyn EnvironmentProvider>,
        events: broadcast::Sender<Event>,
    ) -> Result<(), broadcast::SendError<Event>> {
        let settings = Arc::new(Settings::from(options.as_ref()));
        info!(
            examples = examples.len(),
            filters = ?settings.filters.iter().collect::<Vec<_>>(),
            "starting test run"
        );

        let mut pending = examples
            .into_iter()
            .map(|example| {
                let context =
                    ExecutionContext::new(example.mode(), settings.clone(), provider.clone());
                let selected = options.includes(example.name()) && !options.excludes(example.name());
                Self::run_example(example, context, selected, &events)
            })
            .collect::<FuturesUnordered<_>>();

        while let Some(result) = pending.next().await {
            result?;
        }

        info!("test run finished");
        Ok(())
    }

    async fn run_example(
        example: Example,
        context: ExecutionContext,
        selected: bool,
        events: &broadcast::Sender<Event>,
    ) -> Result<(), broadcast::SendError<Event>> {
        let example = Arc::new(example);
        events.broadcast(Event::Started(example.clone())).await?;

        let mut timer = Timer::start();
        let outcome = if selected {
            // spawn a blocking task. Bodies are ordinary blocking code, and one slow body should
            // not hold up the others.
            let body = example.clone();
            task::spawn_blocking(move || context.run(|env| body.call(env))).await
        } else {
            Outcome::skip(EXCLUDED, "Not selected by --name/--exclude")
        };
        let elapsed = timer.stop();

        let report = Report {
            name: example.name().to_string(),
            mode: example.mode(),
            outcome,
            started: timer.started,
            ended: timer.ended,
            elapsed,
        };
        events.broadcast(Event::Finished(Arc::new(report))).await?;
        Ok(())
    }
}
