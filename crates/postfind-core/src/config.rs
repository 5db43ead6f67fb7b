//! Configuration types for postfind.
//!
//! [`Config::load`] reads `~/.config/postfind/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[site]
# Root URL of the blog, e.g. "https://blog.example.com". Used to locate the
# posts.json corpus and to build shareable search links.
base_url   = ""
posts_path = "/assets/js/posts.json"

[ui]
show_excerpts = true
pill_count    = 8

[pills]
# Explicit topic-pill terms. When empty, the most frequent tags in the
# corpus are used instead.
topics = []
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from
/// `~/.config/postfind/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub pills: PillsConfig,
}

/// `[site]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_posts_path")]
    pub posts_path: String,
}

fn default_posts_path() -> String { "/assets/js/posts.json".to_string() }

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            posts_path: default_posts_path(),
        }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_show_excerpts")]
    pub show_excerpts: bool,
    #[serde(default = "default_pill_count")]
    pub pill_count: usize,
}

fn default_show_excerpts() -> bool { true }
fn default_pill_count() -> usize { 8 }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_excerpts: default_show_excerpts(),
            pill_count: default_pill_count(),
        }
    }
}

/// `[pills]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PillsConfig {
    #[serde(default)]
    pub topics: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/postfind/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("postfind")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.site.base_url, "");
        assert_eq!(cfg.site.posts_path, "/assets/js/posts.json");
        assert!(cfg.ui.show_excerpts);
        assert_eq!(cfg.ui.pill_count, 8);
        assert!(cfg.pills.topics.is_empty());
    }
}
