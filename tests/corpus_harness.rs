//! Corpus loading integration harness.
//!
//! # What this covers
//!
//! - End-to-end load of a realistic `posts.json` from disk, including
//!   posts with missing fields and HTML-escaped text.
//! - Typed errors for unreadable files and malformed JSON.
//! - Source resolution precedence: CLI override beats the configured site.
//! - Topic-pill derivation from tag frequency.
//!
//! # Running
//!
//! ```sh
//! cargo test --test corpus_harness
//! ```

mod common;
use common::*;

use postfind_core::config::Config;
use postfind_core::corpus::{self, CorpusError, Source};

fn write_corpus(dir: &tempfile::TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn loads_a_realistic_posts_json_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_corpus(&dir, "posts.json", SAMPLE_POSTS_JSON);

    let source = Source::parse(&path).unwrap();
    let posts = corpus::load(&source).unwrap();

    assert_eq!(posts.len(), 4);
    assert_eq!(posts[0].title, "Go basics");
    // Escaped text is stored verbatim; un-escaping happens at render time.
    assert_eq!(posts[2].title, "Tips &amp; tricks for web servers");
    // The draft post has no date/excerpt/content/tags.
    assert_eq!(posts[3].tags, "");
    assert_eq!(posts[3].content, "");
}

#[test]
fn malformed_json_is_a_typed_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_corpus(&dir, "broken.json", "{ not json ]");

    let source = Source::parse(&path).unwrap();
    assert!(matches!(corpus::load(&source), Err(CorpusError::Json(_))));
}

#[test]
fn missing_file_is_a_typed_error() {
    let source = Source::parse("/definitely/not/here/posts.json").unwrap();
    assert!(matches!(corpus::load(&source), Err(CorpusError::Io(_))));
}

#[test]
fn cli_override_beats_the_configured_site() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_corpus(&dir, "posts.json", SAMPLE_POSTS_JSON);

    let mut config = Config::defaults();
    config.site.base_url = "https://blog.example.com".to_string();

    let source = corpus::resolve(Some(&path), &config).unwrap();
    let posts = corpus::load(&source).unwrap();
    assert_eq!(posts.len(), 4);
}

#[test]
fn top_tags_rank_the_sample_corpus() {
    let posts = sample_corpus();
    assert_eq!(
        corpus::top_tags(&posts, 3),
        vec!["go", "programming", "rust"]
    );
    // Asking for more tags than exist returns them all.
    assert_eq!(corpus::top_tags(&posts, 20).len(), 5);
}

#[test]
fn builder_corpus_round_trips_through_the_matcher() {
    // Not a file test, but the seam the loader feeds: a built corpus must
    // behave like a parsed one.
    let posts = build_corpus(10);
    let hits = postfind_core::search("common", &posts);
    assert_eq!(hits.len(), 10);
    assert_hits_subset_of_corpus(&hits, &posts);
}
