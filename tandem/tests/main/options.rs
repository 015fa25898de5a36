use crate::options;
use tandem::*;

#[test]
fn defaults() {
    let opts = options("prog");

    assert!(opts.filters.is_empty());
    assert_eq!(opts.level, Level::Info);
    assert!(!opts.show_times);
    assert_eq!(opts.cluster, None);
    assert!(opts.includes("anything"));
    assert!(!opts.excludes("anything"));
}

#[test]
fn includes_are_comma_separated_and_repeatable() {
    let opts = options("prog -i local,hadoop --include cluster");
    let tokens: Vec<_> = opts.filters.iter().collect();

    assert_eq!(tokens, vec!["cluster", "hadoop", "local"]);
}

#[test]
fn level_and_times_from_tokens() {
    let opts = options("prog -i hadoop,scoobi.verbose.fine");
    assert_eq!(opts.level, Level::Fine);
    assert!(!opts.show_times);

    let opts = options("prog scoobi.verbose.warning.times");
    assert_eq!(opts.level, Level::Warning);
    assert!(opts.show_times);

    let opts = options("prog scoobi.times");
    assert_eq!(opts.level, Level::Info);
    assert!(opts.show_times);

    // the namespace marker has to come first
    let opts = options("prog times.scoobi verbose.fine");
    assert_eq!(opts.level, Level::Info);
    assert!(!opts.show_times);
}

#[test]
fn custom_namespace() {
    let args = ["prog", "-i", "local", "crunch.verbose.all.times", "scoobi.verbose.off"];
    let mut builder = TestOptions::builder();
    builder.namespace("crunch");
    let opts = builder
        .build_with_app_from(clap::App::new("tandem-test"), args)
        .unwrap();

    assert_eq!(opts.level, Level::All);
    assert!(opts.show_times);
}

#[test]
fn cluster_address() {
    let opts = options("prog --cluster hdfs://namenode:8020");
    assert_eq!(opts.cluster.as_deref(), Some("hdfs://namenode:8020"));

    let provider = StandardProvider::from_options(&opts);
    let env = provider.remote_environment().unwrap();
    assert_eq!(
        env.config().get(CLUSTER_KEY).as_deref(),
        Some("hdfs://namenode:8020")
    );
}

#[test]
fn name_selection() {
    let opts = options("prog -n word -n ^join -e slow");

    assert!(opts.includes("Word count"));
    assert!(opts.includes("join tables"));
    assert!(!opts.includes("a join"));
    assert!(opts.excludes("slow word count"));
    assert!(!opts.excludes("word count"));
}

#[test]
fn bad_patterns_are_errors() {
    let result = TestOptions::builder()
        .build_with_app_from(clap::App::new("tandem-test"), vec!["prog", "-n", "(unclosed"]);
    assert!(result.is_err());
}
