use assert_cmd::Command;

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("utf-8 stdout")
}

fn news_lens() -> Command {
    let mut cmd = Command::cargo_bin("news-lens").expect("binary exists");
    cmd.env_remove("WORDNET_DIR")
        .env_remove("GNEWS_API_KEY")
        .env_remove("NEWS_API_KEY")
        .env_remove("NEWS_PROVIDER")
        .env("RUST_LOG", "error");
    cmd
}

#[test]
fn cli_help_runs() {
    news_lens().arg("--help").assert().success();
}

#[test]
fn analyze_short_text_keeps_it_as_summary() {
    let stdout = stdout_of(
        news_lens()
            .args(["analyze", "--no-lexical", "--json"])
            .write_stdin("Short note."),
    );
    assert!(stdout.contains("\"summary\": \"Short note.\""), "{stdout}");
}

#[test]
fn define_without_lexicon_reports_nothing_found() {
    let stdout = stdout_of(news_lens().args(["define", "good"]));
    assert!(stdout.contains("No definitions found"), "{stdout}");
}

#[test]
fn headlines_without_key_prints_api_error() {
    let stdout = stdout_of(
        news_lens()
            .env("NEWS_PROVIDER", "gnews")
            .args(["headlines", "--no-lexical"]),
    );
    assert!(stdout.contains("API Error: missing API key"), "{stdout}");
}

#[test]
fn summary_count_outside_range_is_rejected() {
    news_lens()
        .args(["analyze", "--summary-count", "9"])
        .write_stdin("Short note.")
        .assert()
        .failure();
}
