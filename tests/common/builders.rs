//! Test builders — ergonomic constructors for [`Post`] records and corpora.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use postfind_core::Post;

// ---------------------------------------------------------------------------
// PostBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Post`] test fixtures.
///
/// # Example
///
/// ```rust
/// let post = PostBuilder::new("Go basics")
///     .tags("go,programming")
///     .content("Goroutines and channels.")
///     .build();
/// ```
pub struct PostBuilder {
    title: String,
    url: String,
    date: String,
    excerpt: String,
    content: String,
    tags: String,
}

impl PostBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        let slug = title.to_lowercase().replace(' ', "-");
        Self {
            url: format!("/posts/{slug}/"),
            title,
            date: "January 1, 2024".to_string(),
            excerpt: String::new(),
            content: String::new(),
            tags: String::new(),
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    pub fn build(self) -> Post {
        Post {
            title: self.title,
            url: self.url,
            date: self.date,
            excerpt: self.excerpt,
            content: self.content,
            tags: self.tags,
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// Build a post with only a title and tags.
pub fn tagged_post(title: &str, tags: &str) -> Post {
    PostBuilder::new(title).tags(tags).build()
}

/// Build a corpus of `n` posts cycling through a small tag set. Every post
/// carries the tag `common`, so broad queries exercise the result cap.
pub fn build_corpus(n: usize) -> Vec<Post> {
    const TAGS: &[&str] = &["go", "rust", "web"];
    (0..n)
        .map(|i| {
            PostBuilder::new(format!("Post {i}"))
                .tags(format!("common,{}", TAGS[i % TAGS.len()]))
                .content(format!("Body text for post number {i}."))
                .build()
        })
        .collect()
}
