use crate::collector::{Collect, FeedUrl};
use crate::collectors::{
    entry_content_id, entry_description, entry_link, entry_media_thumbnail, entry_publish_date,
    entry_title, run_collect,
};
use crate::fetcher::Fetcher;
use crate::model::{CollectionResult, ContentItem};
use crate::types::{Author, Category, FetchConfig, Result};
use crate::utils::time::format_duration;
use async_trait::async_trait;
use feed_rs::model::{Entry, Feed};
use tracing::warn;
use url::Url;

/// Collects podcast episodes from a show's RSS feed.
pub struct PodcastCollector {
    author: Author,
    fetcher: Fetcher,
    feed_url: FeedUrl,
}

impl PodcastCollector {
    pub fn new(author: Author, config: FetchConfig) -> Result<Self> {
        let feed_url = resolve_feed_url(&author.url);
        Ok(Self {
            author,
            fetcher: Fetcher::new(config)?,
            feed_url,
        })
    }

    pub fn map_feed(&self, feed: &Feed, max_items: usize) -> Vec<ContentItem> {
        // Show-level artwork is the fallback when an episode has none of
        // its own.
        let channel_image = feed
            .logo
            .as_ref()
            .or(feed.icon.as_ref())
            .map(|image| image.uri.clone());

        feed.entries
            .iter()
            .filter_map(|entry| self.map_entry(entry, channel_image.as_deref()))
            .take(max_items)
            .collect()
    }

    fn map_entry(&self, entry: &Entry, channel_image: Option<&str>) -> Option<ContentItem> {
        let title = entry_title(entry)?;
        let link = entry_link(entry)?;

        let cover = entry_media_thumbnail(entry).or_else(|| channel_image.map(String::from));
        let duration = entry
            .media
            .iter()
            .filter_map(|media| media.duration)
            .next()
            .map(format_duration);

        let item = ContentItem::new(
            title,
            link.clone(),
            self.author.name.clone(),
            self.author.url.clone(),
            Category::Podcast,
        );
        match item {
            Ok(item) => Some(
                item.with_description(entry_description(entry))
                    .with_publish_date(entry_publish_date(entry))
                    .with_cover_image_url(cover)
                    .with_duration(duration)
                    .with_content_id(Some(entry_content_id(entry, &link))),
            ),
            Err(e) => {
                warn!(author = %self.author.name, %link, error = %e, "skipping entry");
                None
            }
        }
    }
}

#[async_trait]
impl Collect for PodcastCollector {
    fn author(&self) -> &Author {
        &self.author
    }

    fn feed_url(&self) -> &FeedUrl {
        &self.feed_url
    }

    async fn collect(&self, max_items: usize) -> CollectionResult {
        run_collect(&self.author, &self.fetcher, &self.feed_url, |feed| {
            self.map_feed(feed, max_items)
        })
        .await
    }
}

/// URLs that already point at a feed are used as-is; otherwise the common
/// `/feed/` suffix is tried. No page scraping for feed discovery.
pub fn resolve_feed_url(author_url: &str) -> FeedUrl {
    let lowered = author_url.to_lowercase();
    let candidate = if lowered.contains("feed") || lowered.contains("rss") {
        author_url.to_string()
    } else {
        format!("{}/feed/", author_url.trim_end_matches('/'))
    };

    match Url::parse(&candidate) {
        Ok(url) => FeedUrl::Resolved(url),
        Err(e) => FeedUrl::Unresolved {
            reason: format!("invalid feed URL {candidate}: {e}"),
        },
    }
}
