//! Static corpora used across harnesses.

use postfind_core::Post;

/// A `posts.json` document the way a site generator actually emits one:
/// HTML-escaped ampersands, a post with missing fields, uneven tag spacing.
pub const SAMPLE_POSTS_JSON: &str = r#"[
  {
    "title": "Go basics",
    "url": "/2023/10/go-basics/",
    "date": "October 3, 2023",
    "excerpt": "Goroutines, channels &amp; the scheduler.",
    "content": "Goroutines and channels are the heart of Go concurrency.",
    "tags": "go, programming"
  },
  {
    "title": "Rust intro",
    "url": "/2024/01/rust-intro/",
    "date": "January 12, 2024",
    "excerpt": "A first look at ownership.",
    "content": "Ownership and borrowing keep systems code safe.",
    "tags": "rust,systems"
  },
  {
    "title": "Tips &amp; tricks for web servers",
    "url": "/2024/02/web-servers/",
    "date": "February 2, 2024",
    "excerpt": "Writing HTTP servers in Go.",
    "content": "Writing HTTP servers in Go with the standard library.",
    "tags": "go,web,programming"
  },
  {
    "title": "Untitled draft",
    "url": "/drafts/untitled/"
  }
]"#;

/// Parse [`SAMPLE_POSTS_JSON`] into a corpus.
pub fn sample_corpus() -> Vec<Post> {
    serde_json::from_str(SAMPLE_POSTS_JSON).expect("sample corpus must be valid JSON")
}
