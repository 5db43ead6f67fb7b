use clap::Parser;

#[derive(Parser)]
#[command(name = "postfind", about = "postfind — terminal search for a static blog's post archive")]
struct Cli {
    /// Path or URL of the posts.json corpus (overrides the configured site).
    #[arg(long, value_name = "PATH_OR_URL")]
    posts: Option<String>,

    /// Run this search immediately after the corpus loads.
    #[arg(short, long, conflicts_with = "link")]
    query: Option<String>,

    /// Shared search link; its `q` parameter becomes the startup query.
    #[arg(long, value_name = "URL")]
    link: Option<String>,

    /// Write debug logs to /tmp/postfind-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/postfind-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("postfind debug log started — tail -f /tmp/postfind-debug.log");
    }

    // An unreadable `q` parameter is "no query", never an error.
    let startup_query = cli
        .query
        .or_else(|| cli.link.as_deref().and_then(postfind_core::link::query_param));

    postfind_tui::run(postfind_tui::Options {
        posts: cli.posts,
        startup_query,
    })
}
