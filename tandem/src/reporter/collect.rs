//! A trivial reporter that grabs every report
use super::Reporter;
use crate::event::{Event, Report};
use crate::options::TestOptions;
use anyhow;
use async_broadcast as broadcast;
use async_trait::async_trait;
use futures::channel::oneshot;
use futures::StreamExt;
use std::sync::Arc;

/// A reporter that just sends the reports somewhere, in completion order. Often useful for tests
/// or custom follow-on processing.
pub struct Collect {
    dest: oneshot::Sender<Vec<Arc<Report>>>,
}

impl Collect {
    /// Create a new `Collect` object and a corresponding receiver for the reports
    pub fn new() -> (Self, oneshot::Receiver<Vec<Arc<Report>>>) {
        let (tx, rx) = oneshot::channel();
        (Self { dest: tx }, rx)
    }
}

#[async_trait]
impl Reporter for Collect {
    async fn report(
        self: Box<Self>,
        _options: Arc<TestOptions>,
        mut events: broadcast::Receiver<Event>,
    ) -> anyhow::Result<()> {
        let mut reports = vec![];

        while let Some(event) = events.next().await {
            if let Event::Finished(report) = event {
                reports.push(report);
            }
        }

        let _ = self.dest.send(reports);
        Ok(())
    }
}
