//! Top level test configuration, from the command line
use crate::gate::Filters;
use crate::level::{Level, LevelParser, DEFAULT_NAMESPACE};
use anyhow::Context as _;
use clap::{App, Arg, ArgMatches};
use regex::{Regex, RegexSet, RegexSetBuilder};

/// Global test information
pub struct TestOptions {
    /// Command line arguments passed to this test run
    pub opts: ArgMatches<'static>,
    /// Title of the test run. An arbitrary value that may be used by reporters.
    pub title: String,
    /// Enabled inclusion tokens, from `--include`
    pub filters: Filters,
    /// Requested verbosity
    pub level: Level,
    /// Annotate outcomes with execution times
    pub show_times: bool,
    /// Address of the cluster for remote environments, from `--cluster`
    pub cluster: Option<String>,
    /// Names of examples to include. Note that an empty set means include everything
    pub included: RegexSet,
    /// Names of examples to exclude. Note that an empty set means exclude nothing
    pub excluded: RegexSet,
}

impl TestOptions {
    /// Creates a [`TestOptionsBuilder`]
    pub fn builder() -> TestOptionsBuilder {
        TestOptionsBuilder::new()
    }

    /// Creates a default set of test options from the process command line
    pub fn new() -> anyhow::Result<Self> {
        Self::builder().build()
    }

    /// Explicitly includes an example by name
    pub fn includes(&self, name: &str) -> bool {
        self.included.is_empty() || self.included.is_match(name)
    }

    /// Explicitly excludes an example by name
    pub fn excludes(&self, name: &str) -> bool {
        self.excluded.is_match(name)
    }
}

/// A hook that can add command line arguments, e.g. for a custom environment provider.
///
/// Examples:
///
/// ```
/// use clap::{App, Arg};
/// use tandem::ExtraOptionsFunc;
///
/// fn my_hook<'a>(app: App<'static, 'a>) -> App<'static, 'a> {
///     app.arg(Arg::with_name("my_option")
///             .long("my_option")
///             .takes_value(true))
/// }
/// inventory::submit! { ExtraOptionsFunc::from(my_hook) }
/// ```
pub struct ExtraOptionsFunc {
    make_options: Box<dyn for<'a> Fn(App<'static, 'a>) -> App<'static, 'a>>,
}

impl<F> From<F> for ExtraOptionsFunc
where
    F: for<'a> Fn(App<'static, 'a>) -> App<'static, 'a> + 'static,
{
    fn from(func: F) -> Self {
        let make_options = Box::new(func);
        Self { make_options }
    }
}

inventory::collect!(ExtraOptionsFunc);

/// Builder for [`TestOptions`]
pub struct TestOptionsBuilder {
    title: String,
    namespace: String,
}

impl Default for TestOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestOptionsBuilder {
    /// Create a new [`TestOptionsBuilder`]
    pub fn new() -> Self {
        Self {
            title: String::from("Tandem"),
            namespace: String::from(DEFAULT_NAMESPACE),
        }
    }

    /// Set the test title. This is an abitrary value used when generating output.
    pub fn title<T: Into<String>>(&mut self, title: T) -> &mut Self {
        self.title = title.into();
        self
    }

    /// Set the namespace marker of verbosity and timing tokens. Default is `scoobi`.
    pub fn namespace<T: Into<String>>(&mut self, namespace: T) -> &mut Self {
        self.namespace = namespace.into();
        self
    }

    /// Create the test options with default command line arguments
    pub fn build(self) -> anyhow::Result<TestOptions> {
        self.build_with_app(App::new("Tandem"))
    }

    /// Add the base options
    fn add_base_options<'a>(app: App<'static, 'a>) -> App<'static, 'a> {
        app.arg(
            Arg::with_name("include")
                .short("i")
                .long("include")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .value_name("TOKENS")
                .help("Enable execution modes: hadoop (all), local, cluster. Comma separated."),
        )
        .arg(
            Arg::with_name("cluster")
                .short("c")
                .long("cluster")
                .takes_value(true)
                .value_name("ADDRESS")
                .help("Cluster used for remote execution"),
        )
        .arg(
            Arg::with_name("name")
                .short("n")
                .long("name")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .value_name("REGEX")
                .help("Only run examples that match REGEX"),
        )
        .arg(
            Arg::with_name("exclude")
                .short("e")
                .long("exclude")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .value_name("REGEX")
                .help("Don't run examples that match REGEX"),
        )
        .arg(
            Arg::with_name("arguments")
                .multiple(true)
                .value_name("ARGS")
                .help("Extra tokens, e.g. scoobi.verbose.fine.times"),
        )
    }

    /// Parse the name filters
    fn parse_name_options(opts: &ArgMatches<'static>) -> anyhow::Result<(RegexSet, RegexSet)> {
        let included: Vec<_> = match opts.values_of("name") {
            None => vec![],
            Some(values) => values.collect(),
        };
        let included = RegexSetBuilder::new(included)
            .case_insensitive(true)
            .build()
            .with_context(|| "Bad --name pattern")?;

        let excluded: Vec<_> = match opts.values_of("exclude") {
            None => vec![],
            Some(values) => values.collect(),
        };
        let excluded = RegexSetBuilder::new(excluded)
            .case_insensitive(true)
            .build()
            .with_context(|| "Bad --exclude pattern")?;

        Ok((included, excluded))
    }

    /// Create the test options with custom command line arguments. Any registered
    /// [`ExtraOptionsFunc`]s will still be added to `app`.
    pub fn build_with_app(self, app: App<'static, '_>) -> anyhow::Result<TestOptions> {
        self.build_with_app_from(app, &mut std::env::args_os())
    }

    /// As `build_with_app` but allows you to specify the command line yourself.
    pub fn build_with_app_from<I, T>(
        self,
        mut app: App<'static, '_>,
        iter: I,
    ) -> anyhow::Result<TestOptions>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let Self { title, namespace } = self;

        app = Self::add_base_options(app);
        for extra in inventory::iter::<ExtraOptionsFunc> {
            app = (extra.make_options)(app);
        }

        let opts = app.get_matches_from_safe(iter)?;
        let (included, excluded) = Self::parse_name_options(&opts)?;

        let filters: Filters = opts
            .values_of("include")
            .into_iter()
            .flatten()
            .flat_map(|v| v.split(','))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();

        let tokens: Vec<&str> = filters
            .iter()
            .chain(opts.values_of("arguments").into_iter().flatten())
            .collect();

        let parser = LevelParser::new(namespace.as_str());
        let level = tokens
            .iter()
            .find(|t| parser.is_verbosity_token(t))
            .map(|t| parser.parse(t))
            .unwrap_or_default();

        let times = Regex::new(&format!("^{}.*times", regex::escape(&namespace)))
            .with_context(|| format!("Bad namespace {:?}", namespace))?;
        let show_times = tokens.iter().any(|t| times.is_match(t));

        let cluster = opts.value_of("cluster").map(String::from);

        Ok(TestOptions {
            opts,
            title,
            filters,
            level,
            show_times,
            cluster,
            included,
            excluded,
        })
    }
}
