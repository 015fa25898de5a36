use tandem::*;

fn word_count(env: &Environment) -> anyhow::Result<usize> {
    let text = env
        .config()
        .get("input")
        .ok_or_else(|| anyhow::anyhow!("no input configured"))?;
    Ok(text.split_whitespace().count())
}

fn counts_words(env: &Environment) -> anyhow::Result<()> {
    env.config().set("input", "the quick brown fox");
    let count = word_count(env)?;
    if count != 4 {
        tandem::fail!("wrong word count", expected: 4, actual: count);
    }
    Ok(())
}

tandem::example!(LocalThenRemote, "counts words locally and on the cluster", counts_words);

fn counts_nothing_without_input(env: &Environment) -> anyhow::Result<()> {
    if env.config().get("input").is_none() {
        tandem::skip!("no-input", "Nothing to count");
    }
    word_count(env)?;
    Ok(())
}

tandem::example!(Local, "skips without input", counts_nothing_without_input);

fn counts_with_assertions(env: &Environment) {
    env.config().set("input", "a b");
    assert_eq!(word_count(env).unwrap(), 2);
}

tandem::example!(LocalThenRemote, "counts with assertions", counts_with_assertions);
