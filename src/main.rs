use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tweetnotes::app::{self, App};
use tweetnotes::config::Config;
use tweetnotes::logging::{self, LogTarget};
use tweetnotes::ui::view_model::Projection;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "tweetnotes: read tweets alongside their annotations",
    long_about = None
)]
struct Cli {
    /// Path to a config file (defaults to the user config directory).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL serving /data/recent-tweets.json and /data/annotations.json.
    #[arg(long)]
    base_url: Option<String>,

    /// Read the JSON files from a local directory instead of over HTTP.
    #[arg(long, conflicts_with = "base_url")]
    data_dir: Option<PathBuf>,

    /// How tweets and annotations are paired up for display.
    #[arg(long, value_enum)]
    projection: Option<Projection>,

    /// Print the rendered list to stdout once both fetches settle, then exit.
    #[arg(long)]
    print: bool,

    /// Wrap width used by --print.
    #[arg(long, default_value_t = 100)]
    width: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let target = if cli.print {
        LogTarget::Stderr
    } else {
        LogTarget::default_file()
    };
    logging::init_tracing(&target)?;

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(base_url) = cli.base_url {
        config.data.base_url = base_url;
        config.data.data_dir = None;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = Some(data_dir);
    }
    if let Some(projection) = cli.projection {
        config.display.projection = projection;
    }

    tracing::debug!(?config, "configuration loaded");
    let fetcher = config.data.build_fetcher();

    if cli.print {
        let text = app::snapshot(fetcher, config.display, cli.width)
            .await
            .context("failed to render snapshot")?;
        print!("{}", text);
        return Ok(());
    }

    App::new(config.display).run(fetcher).await
}
