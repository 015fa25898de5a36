//! Environment handles passed to example bodies, and the providers that build them.
//!
//! The orchestrator never looks inside an [`Environment`] except to ask whether it is remote. It
//! builds a fresh one for every attempt, so the local and remote runs of one example never share
//! a configuration.

use crate::id::next_id;
use crate::options::TestOptions;
use anyhow::Context as _;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Configuration key holding the execution mode
pub const MODE_KEY: &str = "tandem.mode";
/// Configuration key holding the cluster address, for remote environments
pub const CLUSTER_KEY: &str = "tandem.cluster";

/// String key/value configuration. Cloning shares the underlying map; use [`Self::snapshot`] for
/// an independent copy.
#[derive(Clone, Default)]
pub struct Configuration {
    values: Arc<Mutex<BTreeMap<String, String>>>,
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.values.lock().iter()).finish()
    }
}

impl Configuration {
    /// An empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    /// Set a value, returning the previous one
    pub fn set<K: Into<String>, V: Into<String>>(&self, key: K, value: V) -> Option<String> {
        self.values.lock().insert(key.into(), value.into())
    }

    /// Add `by` to the integer stored at `key` (0 if missing) and return the new value. A value
    /// that is not an integer is an error and is left unchanged.
    pub fn increment(&self, key: &str, by: i64) -> anyhow::Result<i64> {
        let mut values = self.values.lock();
        let current = match values.get(key) {
            None => 0,
            Some(v) => v
                .parse::<i64>()
                .with_context(|| format!("Configuration value {}={:?} is not an integer", key, v))?,
        };
        let next = current.wrapping_add(by);
        values.insert(key.to_string(), next.to_string());
        Ok(next)
    }

    /// Copy every entry of `other` into this configuration, overwriting existing keys
    pub fn merge(&self, other: &Configuration) {
        if Arc::ptr_eq(&self.values, &other.values) {
            return;
        }
        let theirs = other.values.lock().clone();
        self.values.lock().extend(theirs);
    }

    /// An independent copy of this configuration
    pub fn snapshot(&self) -> Self {
        Self {
            values: Arc::new(Mutex::new(self.values.lock().clone())),
        }
    }
}

/// An opaque handle to a local or remote execution environment
#[derive(Debug)]
pub struct Environment {
    id: u32,
    remote: bool,
    config: Configuration,
}

impl Environment {
    /// A local environment over `config`
    pub fn local(config: Configuration) -> Self {
        config.set(MODE_KEY, "local");
        Self {
            id: next_id(),
            remote: false,
            config,
        }
    }

    /// A remote environment over `config`
    pub fn remote(config: Configuration) -> Self {
        config.set(MODE_KEY, "cluster");
        Self {
            id: next_id(),
            remote: true,
            config,
        }
    }

    /// Does this environment execute on the cluster?
    pub fn is_remote(&self) -> bool {
        self.remote
    }

    /// Unique identifier of this environment
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Configuration for this environment only
    pub fn config(&self) -> &Configuration {
        &self.config
    }
}

/// Builds environment handles on demand. Either call may fail; the failure is reported as the
/// attempt's [`crate::Outcome::Error`].
pub trait EnvironmentProvider: Send + Sync {
    /// A fresh local environment
    fn local_environment(&self) -> anyhow::Result<Environment>;
    /// A fresh remote environment
    fn remote_environment(&self) -> anyhow::Result<Environment>;
}

/// The default provider. Local environments are always available; remote environments need a
/// cluster address.
#[derive(Debug, Clone, Default)]
pub struct StandardProvider {
    base: Configuration,
    cluster: Option<String>,
}

impl StandardProvider {
    /// A provider with an empty base configuration and no cluster
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider configured from the command line (`--cluster`)
    pub fn from_options(options: &TestOptions) -> Self {
        let mut provider = Self::new();
        provider.cluster = options.cluster.clone();
        provider
    }

    /// Entries copied into every environment this provider builds
    pub fn base(&self) -> &Configuration {
        &self.base
    }

    /// Set the cluster that remote environments point at
    pub fn cluster<S: Into<String>>(&mut self, address: S) -> &mut Self {
        self.cluster = Some(address.into());
        self
    }
}

impl EnvironmentProvider for StandardProvider {
    fn local_environment(&self) -> anyhow::Result<Environment> {
        let env = Environment::local(self.base.snapshot());
        debug!(id = env.id(), "local environment ready");
        Ok(env)
    }

    fn remote_environment(&self) -> anyhow::Result<Environment> {
        let cluster = match &self.cluster {
            Some(c) => c,
            None => anyhow::bail!("No cluster configured for remote execution (use --cluster)"),
        };
        let config = self.base.snapshot();
        config.set(CLUSTER_KEY, cluster.as_str());
        let env = Environment::remote(config);
        debug!(id = env.id(), cluster = %cluster, "remote environment ready");
        Ok(env)
    }
}
