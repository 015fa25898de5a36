//! A simple text based output
use super::command_line::ReporterEntry;
use super::Reporter;
use crate::event::{Event, Report};
use crate::options::{ExtraOptionsFunc, TestOptions};
use crate::outcome::{Outcome, Stat};
use crate::timer::format_duration;
use anyhow;
use async_broadcast as broadcast;
use async_std::io::{stdout, Stdout};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clap::{App, Arg};
use futures::io::{AllowStdIo, AsyncWrite, AsyncWriteExt};
use futures::stream::StreamExt;
use std::fs;
use std::io;
use std::io::Write;
use std::sync::Arc;

/// Reporter that prints simple text output to a stream
pub struct PlainReporter<T: AsyncWrite> {
    out: T,
}

fn make_plain(_name: &str, options: &TestOptions) -> anyhow::Result<Box<dyn Reporter>> {
    match options.opts.value_of_os("output") {
        Some(path) => Ok(Box::new(PlainReporter::from(fs::File::create(path)?))),
        None => Ok(Box::new(PlainReporter::default())),
    }
}

inventory::submit! {
    ReporterEntry {
        name: "plain",
        func: make_plain,
    }
}

fn plain_options<'a>(app: App<'static, 'a>) -> App<'static, 'a> {
    app.arg(
        Arg::with_name("output")
            .short("o")
            .long("output")
            .value_name("FILE")
            .takes_value(true)
            .help("Output file for text output. Default is stdout."),
    )
}

inventory::submit! { ExtraOptionsFunc::from(plain_options) }

impl<T: AsyncWrite + Send + Sync + 'static> From<T> for PlainReporter<T> {
    fn from(out: T) -> Self {
        Self { out }
    }
}

impl<T: Write + Send + Sync + 'static> From<T> for PlainReporter<AllowStdIo<T>> {
    fn from(out: T) -> Self {
        Self {
            out: AllowStdIo::new(out),
        }
    }
}

impl Default for PlainReporter<Stdout> {
    fn default() -> Self {
        Self::from(stdout())
    }
}

#[async_trait]
impl<T: AsyncWrite + Send + Sync + 'static> Reporter for PlainReporter<T> {
    async fn report(
        self: Box<Self>,
        options: Arc<TestOptions>,
        events: broadcast::Receiver<Event>,
    ) -> anyhow::Result<()> {
        self.execute(&options.title, events).await
    }
}

impl<T: AsyncWrite + Send + Sync + 'static> PlainReporter<T> {
    async fn execute(
        self,
        title: &str,
        mut events: broadcast::Receiver<Event>,
    ) -> anyhow::Result<()> {
        let out = self.out;
        futures::pin_mut!(out);

        out.write_all(format!("{}\n\n", title).as_ref()).await?;

        let mut stat = Stat::default();
        let mut first: Option<DateTime<Utc>> = None;
        let mut last: Option<DateTime<Utc>> = None;

        // print examples as they complete
        while let Some(event) = events.next().await {
            if let Event::Finished(report) = event {
                stat.add(&report.outcome);
                first = Some(first.map_or(report.started, |t| t.min(report.started)));
                last = Some(last.map_or(report.ended, |t| t.max(report.ended)));
                print_report(&mut out, &report).await?;
            }
        }

        out.write_all(
            format!(
                "{} examples: {} passed, {} failed, {} errors, {} skipped\n",
                stat.total, stat.passed, stat.failed, stat.errors, stat.skipped,
            )
            .as_ref(),
        )
        .await?;

        let took = match (first, last) {
            (Some(first), Some(last)) => {
                format_duration((last - first).max(chrono::Duration::zero()))
            }
            _ => format_duration(chrono::Duration::zero()),
        };
        out.write_all(format!("Took {}\n\n", took).as_ref()).await?;
        out.flush().await?;

        // overall return code
        if stat.failed + stat.errors > 0 {
            anyhow::bail!("Test run failed");
        } else {
            Ok(())
        }
    }
}

async fn print_report<T: AsyncWrite + std::marker::Unpin>(
    out: &mut T,
    report: &Report,
) -> io::Result<()> {
    let outcome = &report.outcome;
    out.write_all(
        format!(
            "{}\t# {} [{}] {}\n",
            report.name,
            outcome.verdict(),
            report.mode,
            format_duration(report.elapsed),
        )
        .as_ref(),
    )
    .await?;

    let details = match outcome {
        Outcome::Success { message } => message.clone().unwrap_or_default(),
        Outcome::Failure {
            message,
            expected,
            actual,
            stack_trace,
        } => {
            let mut text = message.clone();
            if !actual.is_empty() {
                text.push_str(&format!("\nactual: {}", actual));
            }
            if !expected.is_empty() {
                text.push_str(&format!("\nexpected: {}", expected));
            }
            for frame in stack_trace {
                text.push_str(&format!("\n  at {}", frame));
            }
            text
        }
        Outcome::Error { message, .. } => message.clone(),
        Outcome::Skipped { reason, expected } if expected.is_empty() => reason.clone(),
        Outcome::Skipped { reason, expected } => format!("{}\n{}", reason, expected),
    };

    if !details.is_empty() {
        out.write_all(textwrap::indent(&details, "  ").as_bytes())
            .await?;
        out.write_all("\n".as_ref()).await?;
    }

    Ok(())
}
