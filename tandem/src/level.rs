//! Verbosity levels, and extracting them from command line tokens.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

/// Namespace marker that prefixes verbosity tokens, e.g. `scoobi.verbose.fine`
pub const DEFAULT_NAMESPACE: &str = "scoobi";

/// Segment that marks a token as a verbosity request
const VERBOSE: &str = "verbose";

/// Verbosity, from least to most output. The default is [`Level::Info`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// No output at all
    Off,
    /// Serious failures only
    Severe,
    /// Potential problems
    Warning,
    /// Informational messages
    Info,
    /// Configuration details
    Config,
    /// Tracing information
    Fine,
    /// More detailed tracing
    Finer,
    /// Most detailed tracing
    Finest,
    /// Everything
    All,
}

impl Default for Level {
    fn default() -> Self {
        Level::Info
    }
}

/// A string that is not the name of a [`Level`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown verbosity level {0:?}")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "OFF" => Level::Off,
            "SEVERE" => Level::Severe,
            "WARNING" => Level::Warning,
            "INFO" => Level::Info,
            "CONFIG" => Level::Config,
            "FINE" => Level::Fine,
            "FINER" => Level::Finer,
            "FINEST" => Level::Finest,
            "ALL" => Level::All,
            _ => return Err(ParseLevelError(s.to_string())),
        })
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Off => "OFF",
            Level::Severe => "SEVERE",
            Level::Warning => "WARNING",
            Level::Info => "INFO",
            Level::Config => "CONFIG",
            Level::Fine => "FINE",
            Level::Finer => "FINER",
            Level::Finest => "FINEST",
            Level::All => "ALL",
        };
        f.write_str(name)
    }
}

impl From<Level> for LevelFilter {
    fn from(level: Level) -> Self {
        match level {
            Level::Off => LevelFilter::OFF,
            Level::Severe => LevelFilter::ERROR,
            Level::Warning => LevelFilter::WARN,
            Level::Info => LevelFilter::INFO,
            Level::Config | Level::Fine => LevelFilter::DEBUG,
            Level::Finer | Level::Finest | Level::All => LevelFilter::TRACE,
        }
    }
}

/// Extracts a [`Level`] from a single dotted token such as `scoobi.verbose.fine`.
#[derive(Debug, Clone)]
pub struct LevelParser {
    namespace: String,
}

impl Default for LevelParser {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl LevelParser {
    /// A parser that ignores `namespace` segments
    pub fn new<S: Into<String>>(namespace: S) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// The namespace marker this parser ignores
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Does `token` ask for a verbosity level at all?
    pub fn is_verbosity_token(&self, token: &str) -> bool {
        token.starts_with(self.namespace.as_str()) && token.contains(VERBOSE)
    }

    /// Parse a level out of `token`. The first segment that names a level wins; anything else,
    /// including an empty token, gives the default level. Never fails.
    pub fn parse(&self, token: &str) -> Level {
        token
            .split('.')
            .filter(|segment| *segment != self.namespace && *segment != VERBOSE)
            .find_map(|segment| segment.parse().ok())
            .unwrap_or_default()
    }
}

/// Parse `token` with the default namespace. See [`LevelParser::parse`].
pub fn parse_level(token: &str) -> Level {
    LevelParser::default().parse(token)
}
