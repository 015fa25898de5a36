//! Test Runner

use crate::environment::EnvironmentProvider;
use crate::event::Event;
use crate::options::TestOptions;
use crate::suite::Example;
use async_broadcast as broadcast;
use async_trait::async_trait;
use std::sync::Arc;

mod standard;
pub use standard::*;

/// A runner executes examples and sends their reports to a [`crate::reporter::Reporter`].
#[async_trait]
pub trait Runner: Send + Sync {
    /// Run the examples
    async fn run(
        self: Box<Self>,
        examples: Vec<Example>,
        options: Arc<TestOptions>,
        provider: Arc<dyn EnvironmentProvider>,
        events: broadcast::Sender<Event>,
    );
}
