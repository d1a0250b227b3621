pub mod collector;
pub mod collectors;
pub mod config;
pub mod fetcher;
pub mod manager;
pub mod merge;
pub mod model;
pub mod storage;
pub mod types;
pub mod utils;

pub use collector::{Collect, FeedUrl};
pub use collectors::{create_collector, NewsCollector, PodcastCollector, VideoCollector};
pub use config::{Config, Settings};
pub use fetcher::Fetcher;
pub use manager::CollectorManager;
pub use merge::{feed_view, feed_view_by_category, merged_view, FeedItem};
pub use model::{CollectionResult, ContentItem, Snapshot};
pub use storage::{sanitize_filename, summary_report, RunArtifacts, SnapshotStore, SummaryReport};
pub use types::{Author, Category, CollectorError, FetchConfig, Result};
