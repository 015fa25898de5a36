//! A reporter that creates other reporters based on the command line. Reporters that wish to
//! participate need to register a [`ReporterEntry`] via `inventory::submit!`

use super::{DefaultReporter, Reporter};
use crate::event::Event;
use crate::options::{ExtraOptionsFunc, TestOptions};
use async_broadcast as broadcast;
use async_trait::async_trait;
use clap::{App, Arg};
use futures::future::join_all;
use std::sync::Arc;

/// A reporter that creates other reporters based on the command line (`--reporter NAME`).
#[derive(Default)]
pub struct CommandLineReporter;

fn choose_reporter<'a>(app: App<'static, 'a>) -> App<'static, 'a> {
    app.arg(
        Arg::with_name("reporters")
            .multiple(true)
            .short("r")
            .long("reporter")
            .takes_value(true)
            .number_of_values(1)
            .value_name("NAME")
            .help("Add a reporter. If no reporter is given, a default reporter will be used"),
    )
}

inventory::submit! { ExtraOptionsFunc::from(choose_reporter) }

/// A reporter entry, selectable by name from the command line
pub struct ReporterEntry {
    /// Name given to `--reporter`
    pub name: &'static str,
    /// Creates the reporter
    pub func: fn(name: &str, options: &TestOptions) -> anyhow::Result<Box<dyn Reporter>>,
}

inventory::collect!(ReporterEntry);

#[async_trait]
impl Reporter for CommandLineReporter {
    async fn report(
        self: Box<Self>,
        options: Arc<TestOptions>,
        events: broadcast::Receiver<Event>,
    ) -> anyhow::Result<()> {
        // launch all sub-reporters
        let futs: Vec<_> = make_reporters(&options)?
            .into_iter()
            .map(|r| {
                let e = events.clone();
                let o = options.clone();
                async move { r.report(o, e).await }
            })
            .collect();
        drop(events);

        // await and return the first error
        join_all(futs)
            .await
            .into_iter()
            .find(Result::is_err)
            .unwrap_or(Ok(()))
    }
}

fn make_reporters(options: &TestOptions) -> anyhow::Result<Vec<Box<dyn Reporter>>> {
    let requested = match options.opts.values_of("reporters") {
        Some(r) => r,
        None => return Ok(vec![Box::new(DefaultReporter::default())]),
    };

    let entries: Vec<_> = inventory::iter::<ReporterEntry>.into_iter().collect();
    let mut reporters = vec![];
    for req in requested {
        let reporter = match entries.iter().find(|e| e.name == req) {
            Some(e) => (e.func)(req, options)?,
            None => anyhow::bail!("No such reporter {}", req),
        };
        reporters.push(reporter);
    }

    Ok(reporters)
}
