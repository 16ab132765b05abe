//! End-to-end tests for the file based pipeline

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wordtally_core::{
    count_words_in_file, Config, Error, Normalization, Pipeline, StopWordSource,
    TrailingRowPolicy, WordEntry,
};

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn config_with_stop_words(stop_words: &Path) -> Config {
    Config::builder()
        .row_delimiter("\n")
        .stop_words(StopWordSource::file(stop_words))
        .build()
        .unwrap()
}

#[test]
fn test_good_bad_ok_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(
        &temp_dir,
        "responses.tsv",
        "Text Response\ngood good bad\nBAD! ok\n",
    );
    let stop_words = write_file(&temp_dir, "stopwords.txt", "ok\n");

    let report = Pipeline::new(config_with_stop_words(&stop_words))
        .run_file(&input)
        .unwrap();

    assert_eq!(
        report.words,
        vec![WordEntry::new("good", 2), WordEntry::new("bad", 2)]
    );
    assert_eq!(report.stats.records, 2);
    assert_eq!(report.stats.tokens, 5);
    assert_eq!(report.stats.stop_words_removed, 1);
}

#[test]
fn test_stages_can_be_run_one_by_one() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(
        &temp_dir,
        "responses.tsv",
        "Id\tText Response\n1\tfast delivery\n2\tslow delivery\n",
    );
    let stop_words = write_file(&temp_dir, "stopwords.txt", "slow\n");
    let pipeline = Pipeline::new(config_with_stop_words(&stop_words));

    let records = pipeline.parse_file(&input).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].get("Id"), Some("2"));

    let table = pipeline.tally(&records).unwrap();
    assert_eq!(table.count("delivery"), 2);

    let filtered = pipeline.filter(table).unwrap();
    assert!(filtered.iter().all(|e| e.word != "slow"));

    let ranked = pipeline.rank(filtered);
    assert_eq!(ranked[0], WordEntry::new("delivery", 2));
}

#[test]
fn test_header_only_file_gives_empty_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(&temp_dir, "responses.tsv", "Id\tText Response\n");
    let stop_words = write_file(&temp_dir, "stopwords.txt", "the\n");
    let pipeline = Pipeline::new(config_with_stop_words(&stop_words));

    let records = pipeline.parse_file(&input).unwrap();
    assert!(records.is_empty());

    let table = pipeline.tally(&records).unwrap();
    assert!(table.is_empty());
    assert!(pipeline.filter(table).unwrap().is_empty());
}

#[test]
fn test_empty_file_gives_empty_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(&temp_dir, "empty.tsv", "");
    let stop_words = write_file(&temp_dir, "stopwords.txt", "the\n");

    let words = count_words_in_file(&input, &config_with_stop_words(&stop_words)).unwrap();
    assert!(words.is_empty());
}

#[test]
fn test_missing_target_field_contributes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(&temp_dir, "responses.tsv", "Id\tComment\n1\tlovely\n");
    let stop_words = write_file(&temp_dir, "stopwords.txt", "");

    let report = Pipeline::new(config_with_stop_words(&stop_words))
        .run_file(&input)
        .unwrap();
    assert_eq!(report.stats.records, 1);
    assert!(report.words.is_empty());
}

#[test]
fn test_custom_target_field() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(&temp_dir, "responses.tsv", "Id\tComment\n1\tlovely lovely day\n");
    let stop_words = write_file(&temp_dir, "stopwords.txt", "");
    let config = Config::builder()
        .row_delimiter("\n")
        .target_field("Comment")
        .stop_words(StopWordSource::file(&stop_words))
        .build()
        .unwrap();

    let words = count_words_in_file(&input, &config).unwrap();
    assert_eq!(
        words,
        vec![WordEntry::new("lovely", 2), WordEntry::new("day", 1)]
    );
}

#[test]
fn test_missing_input_file_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("missing.tsv");

    let result = Pipeline::new(Config::default()).run_file(&input);
    match result {
        Err(Error::NotFound { path }) => assert_eq!(path, input),
        other => panic!("Expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_missing_stop_word_file_is_resource_unavailable() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(&temp_dir, "responses.tsv", "Text Response\nhello\n");
    let stop_words = temp_dir.path().join("nope.txt");

    let result = Pipeline::new(config_with_stop_words(&stop_words)).run_file(&input);
    assert!(matches!(result, Err(Error::ResourceUnavailable { .. })));
}

#[test]
fn test_windows_line_endings() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(
        &temp_dir,
        "responses.tsv",
        "Id\tText Response\r\n1\tcrisp apples\r\n2\tcrisp pears\r\n",
    );
    let stop_words = write_file(&temp_dir, "stopwords.txt", "");
    let config = Config::builder()
        .row_delimiter("\r\n")
        .chunk_size(5)
        .stop_words(StopWordSource::file(&stop_words))
        .build()
        .unwrap();

    let words = count_words_in_file(&input, &config).unwrap();
    assert_eq!(
        words,
        vec![
            WordEntry::new("crisp", 2),
            WordEntry::new("apples", 1),
            WordEntry::new("pears", 1),
        ]
    );
}

#[test]
fn test_byte_order_mark_is_not_part_of_header() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(&temp_dir, "responses.tsv", "\u{FEFF}Text Response\nbright\n");
    let stop_words = write_file(&temp_dir, "stopwords.txt", "");

    let words = count_words_in_file(&input, &config_with_stop_words(&stop_words)).unwrap();
    assert_eq!(words, vec![WordEntry::new("bright", 1)]);
}

#[test]
fn test_truncated_final_row_policies() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(
        &temp_dir,
        "responses.tsv",
        "Id\tText Response\n1\tcomplete row\n2",
    );
    let stop_words = write_file(&temp_dir, "stopwords.txt", "");

    let run = |policy| {
        let config = Config::builder()
            .row_delimiter("\n")
            .trailing_row(policy)
            .stop_words(StopWordSource::file(&stop_words))
            .build()
            .unwrap();
        Pipeline::new(config).run_file(&input)
    };

    let dropped = run(TrailingRowPolicy::Drop).unwrap();
    assert_eq!(dropped.stats.records, 1);

    let emitted = run(TrailingRowPolicy::Emit).unwrap();
    assert_eq!(emitted.stats.records, 2);
    assert_eq!(emitted.stats.tokens, 2);

    match run(TrailingRowPolicy::Error) {
        Err(err @ Error::Parse { row: 3, .. }) => assert!(err.is_parse_error()),
        other => panic!("Expected parse error at row 3, got {other:?}"),
    }
}

#[test]
fn test_hyphen_apostrophe_policy_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_file(
        &temp_dir,
        "responses.tsv",
        "Text Response\nWe'll see a well-known face\n",
    );
    let stop_words = write_file(&temp_dir, "stopwords.txt", "we'll\na\n");
    let config = Config::builder()
        .row_delimiter("\n")
        .normalization(Normalization::AlphanumericHyphenApostrophe)
        .stop_words(StopWordSource::file(&stop_words))
        .build()
        .unwrap();

    let words = count_words_in_file(&input, &config).unwrap();
    let words: Vec<_> = words.iter().map(|e| e.word.as_str()).collect();
    assert_eq!(words, vec!["see", "well-known", "face"]);
}
