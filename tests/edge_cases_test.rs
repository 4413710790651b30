/// Edge case integration tests
///
/// These tests cover malformed input, unusual command contents and large histories
mod common;

use std::io::Cursor;

use common::{CacheDirBuilder, RecordBuilder, numbered_history};
use zsh_autocomplete::Engine;
use zsh_autocomplete::index_storage::{MergeDecision, load_cache};
use zsh_autocomplete::indexer::MAX_COMMAND_LENGTH;

#[test]
fn test_edge_case_blank_lines_and_crlf_in_piped_history() {
    let cache = CacheDirBuilder::new();
    let stdin = "ls -la\r\n\r\n   \n\ngit status\r\ngit status\n";

    let (engine, report) = Engine::initialize(cache.cache_file(), Some(Cursor::new(stdin)));

    assert_eq!(report.fresh_count, 3, "Blank lines must not be stored");
    assert_eq!(engine.store().iter().collect::<Vec<_>>(), vec!["ls -la", "git status", "git status"]);
    assert_eq!(engine.index().total_commands(), 2);
    assert_eq!(engine.index().entry("git status").unwrap().frequency, 2);
}

#[test]
fn test_edge_case_duplicates_persist_one_line_per_history_entry() {
    let cache = CacheDirBuilder::new();
    let (_, report) =
        Engine::initialize(cache.cache_file(), Some(Cursor::new("make\nmake\nmake test\n")));
    assert_eq!(report.decision, MergeDecision::UseFresh);

    let lines: Vec<String> = cache.read_cache().lines().map(|l| l.to_string()).collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("make|2|"));
    assert_eq!(lines[0], lines[1]);

    // Reload restores, rather than sums, the duplicated counts
    let engine = Engine::from_cache(cache.cache_file());
    assert_eq!(engine.index().entry("make").unwrap().frequency, 2);
}

#[test]
fn test_edge_case_pipe_in_command_round_trips() {
    let cache = CacheDirBuilder::new();
    let mut engine = Engine::from_cache(cache.cache_file());
    engine.record_usage("cat log.txt | grep ERROR | wc -l").unwrap();
    engine.record_usage("cat log.txt | grep ERROR | wc -l").unwrap();

    let engine = Engine::from_cache(cache.cache_file());
    let entry = engine.index().entry("cat log.txt | grep ERROR | wc -l").unwrap();
    assert_eq!(entry.frequency, 2);
    assert_eq!(engine.best_completion("cat"), Some("cat log.txt | grep ERROR | wc -l"));
}

#[test]
fn test_edge_case_malformed_cache_lines_skipped() {
    let cache = CacheDirBuilder::new().with_cache(
        "good one|4|1700000000\n\
         \n\
         |9|1700000000\n\
         overflow|1|99999999999999999\n\
         bare command without fields\n\
         good two|1|1700000000\n",
    );

    let loaded = load_cache(&cache.cache_file()).unwrap();

    assert_eq!(loaded.skipped, 2);
    assert_eq!(
        loaded.store.iter().collect::<Vec<_>>(),
        vec!["good one", "bare command without fields", "good two"]
    );
    assert_eq!(loaded.index.entry("good one").unwrap().frequency, 4);
    assert_eq!(loaded.index.entry("bare command without fields").unwrap().frequency, 1);
}

#[test]
fn test_edge_case_non_ascii_commands() {
    let cache = CacheDirBuilder::new();
    let stdin = "echo 'héllo wörld'\nls 日本語\n";
    let (engine, _) = Engine::initialize(cache.cache_file(), Some(Cursor::new(stdin)));

    // Non-ASCII bytes are skipped in the trie path, the command text is kept
    assert_eq!(engine.best_completion("echo"), Some("echo 'héllo wörld'"));
    assert_eq!(engine.best_completion("ls "), Some("ls 日本語"));
    // A prefix containing non-ASCII never matches the trie
    assert_eq!(engine.best_completion("echo 'hé"), None);

    // Navigation works on the raw strings
    let step = engine.navigate("ls 日", zsh_autocomplete::Direction::Older, -1);
    assert_eq!(step.text, "ls 日本語");

    // And the cache round-trips them
    let reloaded = Engine::from_cache(cache.cache_file());
    assert_eq!(reloaded.store().iter().collect::<Vec<_>>(), vec!["echo 'héllo wörld'", "ls 日本語"]);
    assert_eq!(reloaded.index().total_commands(), 2);
}

#[test]
fn test_edge_case_oversized_command_kept_in_history_only() {
    let cache = CacheDirBuilder::new();
    let long = format!("echo {}", "x".repeat(MAX_COMMAND_LENGTH));
    let stdin = format!("{}\nls\n", long);
    let (engine, _) = Engine::initialize(cache.cache_file(), Some(Cursor::new(stdin)));

    assert_eq!(engine.store().len(), 2);
    assert_eq!(engine.index().total_commands(), 1);
    assert_eq!(engine.best_completion("echo"), None);
    // Still reachable through navigation
    assert_eq!(engine.navigate("echo", zsh_autocomplete::Direction::Older, -1).text, long);
}

#[test]
fn test_edge_case_large_history() {
    let cache = CacheDirBuilder::new();
    let stdin = numbered_history("command", 10_000);
    let (engine, report) = Engine::initialize(cache.cache_file(), Some(Cursor::new(stdin)));

    assert_eq!(report.fresh_count, 10_000);
    assert_eq!(engine.index().total_commands(), 10_000);

    let reloaded = Engine::from_cache(cache.cache_file());
    assert_eq!(reloaded.store().len(), 10_000);
    assert_eq!(reloaded.navigate("command-999", zsh_autocomplete::Direction::Older, -1).text, "command-9999");
}

#[test]
fn test_edge_case_equal_counts_keep_cache() {
    let cache = CacheDirBuilder::new()
        .with_records(&[RecordBuilder::new("kept-a"), RecordBuilder::new("kept-b")]);

    let (engine, report) = Engine::initialize(cache.cache_file(), Some(Cursor::new("x\ny\n")));

    assert_eq!(report.decision, MergeDecision::UseCache);
    assert!(engine.index().search("kept-"));
}

#[test]
fn test_edge_case_invalid_utf8_cache_line_keeps_other_records() {
    let mut content: Vec<u8> =
        (0..50).flat_map(|i| format!("cmd-{}|2|1700000000\n", i).into_bytes()).collect();
    content.extend_from_slice(b"echo caf\xe9|1|1700000000\n");
    let cache = CacheDirBuilder::new().with_cache_bytes(&content);

    let mut engine = Engine::from_cache(cache.cache_file());
    assert_eq!(engine.store().len(), 51);
    assert_eq!(engine.index().entry("cmd-0").unwrap().frequency, 2);

    assert!(engine.record_usage("ls").unwrap());

    let persisted = cache.read_cache();
    assert_eq!(persisted.lines().count(), 52);
    assert!(persisted.starts_with("cmd-0|2|1700000000\n"));
    assert!(persisted.lines().any(|l| l.starts_with("ls|1|")));
}
