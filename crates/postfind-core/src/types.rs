//! Core types for postfind-core.
//!
//! The only shared data structure is the [`Post`] record as exported by the
//! site generator into `posts.json`.

use serde::Deserialize;

/// A single blog post as it appears in the `posts.json` corpus.
///
/// Every field is optional in the source document; missing fields
/// deserialize to the empty string so the matcher stays total — an absent
/// tag field is an empty tag list, an absent title never contains anything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Post {
    /// Post title, possibly HTML-escaped by the generator.
    #[serde(default)]
    pub title: String,
    /// Site-relative or absolute path of the post. The only identity a post
    /// has.
    #[serde(default)]
    pub url: String,
    /// Publication date as a display string; postfind never parses it.
    #[serde(default)]
    pub date: String,
    /// Short teaser text, possibly HTML-escaped by the generator.
    #[serde(default)]
    pub excerpt: String,
    /// Full post body as plain text.
    #[serde(default)]
    pub content: String,
    /// Comma-separated tag list, e.g. `"go,programming"`.
    #[serde(default)]
    pub tags: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
