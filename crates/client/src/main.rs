//! Wallbrowse CLI: browse wallpapers through the search proxy.

use clap::Parser;

use wallbrowse_client::{ClientError, WallpaperClient};
use wallbrowse_core::search::SearchFilters;
use wallbrowse_core::wallpaper::SearchPage;

/// Browse catalog wallpapers from the terminal.
#[derive(Parser)]
#[command(name = "wallbrowse", version, about)]
struct Cli {
    /// Base URL of the search proxy
    #[arg(long, env = "WALLBROWSE_URL", default_value = "http://localhost:3000")]
    base_url: String,

    /// Page number (1-indexed)
    #[arg(long, default_value = "1")]
    page: u32,

    /// Seed pinning the random ordering across pages
    #[arg(long)]
    seed: Option<String>,

    /// Free-text search query
    #[arg(long)]
    q: Option<String>,

    /// Resolution filter, e.g. 1920x1080
    #[arg(long)]
    resolutions: Option<String>,

    /// Category mask (general, anime, people), e.g. 110
    #[arg(long)]
    categories: Option<String>,

    /// Output the page as JSON instead of human-readable text
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn filters(&self) -> SearchFilters {
        let mut filters = SearchFilters::default().with_page(self.page);
        if let Some(seed) = &self.seed {
            filters = filters.with_seed(seed.as_str());
        }
        if let Some(q) = &self.q {
            filters = filters.with_query(q.as_str());
        }
        if let Some(resolutions) = &self.resolutions {
            filters = filters.with_resolutions(resolutions.as_str());
        }
        if let Some(categories) = &self.categories {
            filters = filters.with_categories(categories.as_str());
        }
        filters
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wallbrowse_client=warn".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = WallpaperClient::new(cli.base_url.as_str())?;

    match client.fetch_wallpapers(&cli.filters()).await {
        Ok(page) if cli.json => {
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        Ok(page) => print_page(&page),
        Err(e) => {
            eprintln!("could not load wallpapers: {e}");
            if e.is_transient() {
                eprintln!("try again in a moment");
            }
            std::process::exit(exit_code(&e));
        }
    }

    Ok(())
}

fn print_page(page: &SearchPage) {
    if page.is_empty() {
        println!("no wallpapers found");
        return;
    }

    for wallpaper in &page.data {
        println!(
            "{:<8} {:>11} {:<8} {}",
            wallpaper.id, wallpaper.resolution, wallpaper.category, wallpaper.url
        );
    }

    let meta = &page.meta;
    print!(
        "page {}/{} ({} total)",
        meta.current_page, meta.last_page, meta.total
    );
    if let Some(seed) = &meta.seed {
        print!(", seed {seed}");
    }
    println!();

    if page.has_next_page() {
        let mut hint = format!("more: --page {}", meta.current_page + 1);
        if let Some(seed) = &meta.seed {
            hint.push_str(&format!(" --seed {seed}"));
        }
        println!("{hint}");
    }
}

fn exit_code(err: &ClientError) -> i32 {
    match err {
        ClientError::Network(_) => 2,
        ClientError::Fetch { .. } | ClientError::Decode(_) => 1,
    }
}
