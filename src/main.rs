use anyhow::Context;
use clap::{Parser, Subcommand};
use content_collector::{
    feed_view, feed_view_by_category, merged_view, Category, CollectorManager, Config, FetchConfig,
    SnapshotStore,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "content-collector", about = "Collects and snapshots content from a configured author roster")]
struct Cli {
    /// Path to the author roster
    #[arg(long, default_value = "config.json", global = true)]
    config: PathBuf,

    /// Directory holding snapshot documents
    #[arg(long, default_value = "data", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a collection pass over all enabled authors and write snapshots
    Collect {
        /// Keep only items published today
        #[arg(long)]
        today_only: bool,

        /// Per-author item cap (defaults to the configured value)
        #[arg(long)]
        max_items: Option<usize>,
    },
    /// Print the merged current view, newest items first
    View {
        /// Restrict to one category
        #[arg(long)]
        category: Option<Category>,
    },
    /// List the configured authors
    Authors,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Collect {
            today_only,
            max_items,
        } => collect(&cli.config, &cli.data_dir, today_only, max_items).await,
        Command::View { category } => view(&cli.data_dir, category),
        Command::Authors => authors(&cli.config),
    }
}

async fn collect(
    config_path: &PathBuf,
    data_dir: &PathBuf,
    today_only: bool,
    max_items: Option<usize>,
) -> anyhow::Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    let fetch_config = FetchConfig {
        timeout_seconds: config.settings.request_timeout_seconds,
        ..FetchConfig::default()
    };
    let max_items = max_items.unwrap_or(config.settings.max_items_per_author);

    let manager = CollectorManager::from_config(&config, &fetch_config)?;
    info!(collectors = manager.collector_count(), "initialized collectors");

    let results = if today_only {
        manager.collect_today_only(max_items).await
    } else {
        manager.collect_all(max_items).await
    };

    let store = SnapshotStore::new(data_dir.clone())?;
    let artifacts = store.save_run(&results, today_only)?;

    if let Some(snapshot_path) = &artifacts.snapshot {
        println!("snapshot: {}", snapshot_path.display());
    }
    println!("today:    {}", artifacts.today.display());
    println!("summary:  {}", artifacts.summary.display());
    println!("per-author files: {}", artifacts.author_files.len());

    let successful = results.iter().filter(|r| r.success).count();
    println!(
        "{successful}/{} authors succeeded, {} items collected",
        results.len(),
        results.iter().map(|r| r.items.len()).sum::<usize>()
    );
    for result in results.iter().filter(|r| !r.success) {
        println!(
            "  failed: {} ({})",
            result.author_name,
            result.error_message.as_deref().unwrap_or("unknown")
        );
    }
    Ok(())
}

fn view(data_dir: &PathBuf, category: Option<Category>) -> anyhow::Result<()> {
    let store = SnapshotStore::new(data_dir.clone())?;
    let Some(snapshot) = merged_view(&store)? else {
        println!("no snapshots collected yet");
        return Ok(());
    };

    let feed = match category {
        Some(category) => feed_view_by_category(&snapshot, category),
        None => feed_view(&snapshot),
    };

    println!(
        "{} items from {} authors ({} failed)",
        feed.len(),
        snapshot.total_authors,
        snapshot.failed_authors
    );
    for entry in &feed {
        let marker = if entry.from_history { " [stale]" } else { "" };
        println!(
            "[{}] {} by {} ({}){}",
            entry.item.category, entry.item.title, entry.item.author_name, entry.formatted_date,
            marker
        );
        println!("    {}", entry.item.url);
    }
    Ok(())
}

fn authors(config_path: &PathBuf) -> anyhow::Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    for author in &config.authors {
        let state = if author.enabled { "enabled" } else { "disabled" };
        println!("{} [{}] ({state})", author.name, author.category);
        println!("    {}", author.url);
    }
    Ok(())
}
