//! postfind TUI — ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use postfind_core::{config::Config, corpus, link};
use url::Url;

/// Everything the binary resolved from the command line.
#[derive(Debug, Default)]
pub struct Options {
    /// `--posts` override: path or URL of the corpus.
    pub posts: Option<String>,
    /// Startup query from `--query`, or extracted from `--link`.
    pub startup_query: Option<String>,
}

/// Load config, corpus, and theme, then start the application shell.
///
/// Corpus resolution and loading happen before the alternate screen opens,
/// so failures print as ordinary errors.
pub fn run(options: Options) -> anyhow::Result<()> {
    let config = Config::load().unwrap_or_else(|_| Config::defaults());
    let theme = theme::Theme::load_default();

    let source = corpus::resolve(options.posts.as_deref(), &config)?;
    let posts = corpus::load(&source)?;
    tracing::debug!(source = %source, posts = posts.len(), "starting UI");

    let share_base = share_base(&config, &source);
    App::new(posts, config, theme, share_base, options.startup_query).run()
}

/// Where share links point: the configured site base URL, or the site root
/// of a remote corpus URL when no base is configured.
fn share_base(config: &Config, source: &corpus::Source) -> Option<Url> {
    let configured = config.site.base_url.trim();
    if !configured.is_empty() {
        if let Ok(url) = Url::parse(configured) {
            return Some(url);
        }
    }
    match source {
        corpus::Source::Remote(url) => Some(link::site_root(url)),
        corpus::Source::File(_) => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
