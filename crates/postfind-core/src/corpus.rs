//! Corpus loading — the one-shot fetch of `posts.json`.
//!
//! The corpus is loaded exactly once, before the UI starts, and never
//! mutated afterwards. A source is either a local file or an HTTP(S) URL;
//! resolution prefers an explicit CLI override, then the configured site.

use crate::config::Config;
use crate::search;
use crate::types::Post;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Where the `posts.json` corpus comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Remote(Url),
}

impl Source {
    /// Interpret a raw CLI/config string: anything starting with `http://`
    /// or `https://` is a remote URL, everything else a local path.
    pub fn parse(raw: &str) -> Result<Self, CorpusError> {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            let url = Url::parse(raw).map_err(|_| CorpusError::BadUrl(raw.to_string()))?;
            Ok(Source::Remote(url))
        } else {
            Ok(Source::File(PathBuf::from(raw)))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Remote(url) => write!(f, "{url}"),
        }
    }
}

/// Errors raised while resolving or loading the corpus.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("no corpus source configured; pass --posts or set [site] base_url in config.toml")]
    NoSource,
    #[error("invalid corpus URL: {0}")]
    BadUrl(String),
    #[error("failed to read corpus file")]
    Io(#[from] std::io::Error),
    #[error("failed to fetch corpus")]
    Http(#[from] reqwest::Error),
    #[error("failed to parse corpus JSON")]
    Json(#[from] serde_json::Error),
}

/// Resolve the corpus source. An explicit CLI value wins; otherwise the
/// configured site `base_url` is joined with `posts_path`.
pub fn resolve(cli_posts: Option<&str>, config: &Config) -> Result<Source, CorpusError> {
    if let Some(raw) = cli_posts {
        return Source::parse(raw);
    }

    let base = config.site.base_url.trim();
    if base.is_empty() {
        return Err(CorpusError::NoSource);
    }
    let url = Url::parse(base)
        .and_then(|base| base.join(&config.site.posts_path))
        .map_err(|_| CorpusError::BadUrl(base.to_string()))?;
    Ok(Source::Remote(url))
}

/// Load and deserialize the corpus from a resolved source.
pub fn load(source: &Source) -> Result<Vec<Post>, CorpusError> {
    let posts: Vec<Post> = match source {
        Source::File(path) => {
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str(&raw)?
        }
        Source::Remote(url) => {
            let raw = reqwest::blocking::get(url.clone())?
                .error_for_status()?
                .text()?;
            serde_json::from_str(&raw)?
        }
    };
    tracing::debug!(source = %source, posts = posts.len(), "corpus loaded");
    Ok(posts)
}

/// The `n` most frequent normalized tags across the corpus — the default
/// topic-pill terms when the config lists none.
///
/// Ties break by tag name so the strip is deterministic across runs.
pub fn top_tags(corpus: &[Post], n: usize) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for post in corpus {
        for tag in search::split_tags(&post.tags) {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.into_iter().take(n).map(|(tag, _)| tag).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
