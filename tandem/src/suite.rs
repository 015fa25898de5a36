//! Registry of examples

use crate::context::Mode;
use crate::environment::Environment;
use crate::outcome::Outcome;
use std::fmt;
use std::sync::Arc;

/// The body of an example
pub type Body = dyn Fn(&Environment) -> Outcome + Send + Sync + 'static;

/// A named example body and the mode it runs in
#[derive(Clone)]
pub struct Example {
    name: String,
    mode: Mode,
    body: Arc<Body>,
}

impl fmt::Debug for Example {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Example")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .finish()
    }
}

impl Example {
    /// Create an example. The body may return anything convertible to an [`Outcome`], e.g.
    /// `()` or `anyhow::Result<T>`.
    pub fn new<N, F, R>(name: N, mode: Mode, body: F) -> Self
    where
        N: Into<String>,
        F: Fn(&Environment) -> R + Send + Sync + 'static,
        R: Into<Outcome>,
    {
        Self {
            name: name.into(),
            mode,
            body: Arc::new(move |env: &Environment| body(env).into()),
        }
    }

    /// The example's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the example runs
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Run the body once, in `env`
    pub fn call(&self, env: &Environment) -> Outcome {
        (self.body)(env)
    }
}

/// A statically registered example. You may prefer using the [`crate::example!`] macro.
pub struct ExampleEntry {
    /// Name of the example
    pub name: &'static str,
    /// Where the example runs
    pub mode: Mode,
    /// The body
    pub func: fn(&Environment) -> Outcome,
}

inventory::collect!(ExampleEntry);

impl From<&ExampleEntry> for Example {
    fn from(entry: &ExampleEntry) -> Self {
        Example::new(entry.name, entry.mode, entry.func)
    }
}

/// All statically registered examples, sorted by name
pub fn registered() -> Vec<Example> {
    let mut examples: Vec<Example> = inventory::iter::<ExampleEntry>
        .into_iter()
        .map(Example::from)
        .collect();
    examples.sort_by(|a, b| a.name.cmp(&b.name));
    examples
}

/// Register an example to run with every [`crate::Tandem`] instance. The function takes an
/// [`Environment`] and may return anything convertible to an [`Outcome`].
///
/// ```ignore
/// fn counts_words(env: &Environment) -> anyhow::Result<()> {
///     let count = word_count(env, "a b c")?;
///     if count != 3 {
///         tandem::fail!("wrong count", expected: 3, actual: count);
///     }
///     Ok(())
/// }
/// tandem::example!(LocalThenRemote, "counts words", counts_words);
/// ```
#[macro_export]
macro_rules! example {
    ($mode:ident, $name:expr, $func:path) => {
        const _: () = {
            use $crate::reexport::inventory;

            fn call(env: &$crate::environment::Environment) -> $crate::outcome::Outcome {
                $crate::outcome::Outcome::from($func(env))
            }

            inventory::submit! {
                $crate::suite::ExampleEntry {
                    name: $name,
                    mode: $crate::context::Mode::$mode,
                    func: call,
                }
            }
        };
    };
}
