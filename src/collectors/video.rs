use crate::collector::{Collect, FeedUrl};
use crate::collectors::{
    entry_content_id, entry_description, entry_link, entry_media_thumbnail, entry_publish_date,
    entry_title, run_collect,
};
use crate::fetcher::Fetcher;
use crate::model::{CollectionResult, ContentItem};
use crate::types::{Author, Category, FetchConfig, Result};
use async_trait::async_trait;
use feed_rs::model::{Entry, Feed};
use tracing::warn;
use url::Url;

/// Collects a YouTube channel through its RSS feed.
pub struct VideoCollector {
    author: Author,
    fetcher: Fetcher,
    feed_url: FeedUrl,
}

impl VideoCollector {
    pub fn new(author: Author, config: FetchConfig) -> Result<Self> {
        let feed_url = resolve_feed_url(&author.url);
        Ok(Self {
            author,
            fetcher: Fetcher::new(config)?,
            feed_url,
        })
    }

    /// Maps feed entries into items, skipping unmappable ones, until
    /// `max_items` items have been produced.
    pub fn map_feed(&self, feed: &Feed, max_items: usize) -> Vec<ContentItem> {
        feed.entries
            .iter()
            .filter_map(|entry| self.map_entry(entry))
            .take(max_items)
            .collect()
    }

    fn map_entry(&self, entry: &Entry) -> Option<ContentItem> {
        let title = entry_title(entry)?;
        let link = entry_link(entry)?;

        let video_id = video_id_from_entry(entry, &link);
        // Channels reliably expose maxresdefault even when the feed itself
        // carries no media thumbnail.
        let thumbnail = entry_media_thumbnail(entry).or_else(|| {
            video_id
                .as_deref()
                .map(|id| format!("https://i.ytimg.com/vi/{id}/maxresdefault.jpg"))
        });
        let views = entry
            .media
            .iter()
            .filter_map(|media| media.community.as_ref())
            .filter_map(|community| community.stats_views)
            .next();

        let item = ContentItem::new(
            title,
            link.clone(),
            self.author.name.clone(),
            self.author.url.clone(),
            Category::Video,
        );
        match item {
            Ok(item) => Some(
                item.with_description(entry_description(entry))
                    .with_publish_date(entry_publish_date(entry))
                    .with_thumbnail_url(thumbnail)
                    .with_views(views)
                    .with_content_id(Some(
                        video_id.unwrap_or_else(|| entry_content_id(entry, &link)),
                    )),
            ),
            Err(e) => {
                warn!(author = %self.author.name, %link, error = %e, "skipping entry");
                None
            }
        }
    }
}

#[async_trait]
impl Collect for VideoCollector {
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

/// Derives the channel feed endpoint from the configured channel URL.
///
/// Supported shapes are an explicit `feeds/videos.xml` URL and the
/// `/channel/<id>` page URL. Handle (`@name`) and vanity URLs would need
/// page scraping to resolve, which is out of scope, so they come back
/// unresolved and fail cleanly at collect time.
pub fn resolve_feed_url(author_url: &str) -> FeedUrl {
    let url = match Url::parse(author_url) {
        Ok(url) => url,
        Err(e) => {
            return FeedUrl::Unresolved {
                reason: format!("invalid channel URL {author_url}: {e}"),
            }
        }
    };

    if url.path().ends_with("/feeds/videos.xml") {
        return FeedUrl::Resolved(url);
    }

    let channel_id = url.path_segments().and_then(|segments| {
        let mut segments = segments;
        segments
            .by_ref()
            .find(|segment| *segment == "channel")
            .and_then(|_| segments.next())
            .filter(|id| !id.is_empty())
            .map(|id| id.to_string())
    });

    match channel_id {
        Some(id) => {
            match Url::parse(&format!(
                "https://www.youtube.com/feeds/videos.xml?channel_id={id}"
            )) {
                Ok(feed) => FeedUrl::Resolved(feed),
                Err(e) => FeedUrl::Unresolved {
                    reason: format!("cannot build feed URL for channel {id}: {e}"),
                },
            }
        }
        None => FeedUrl::Unresolved {
            reason: format!("cannot determine channel id from URL: {author_url}"),
        },
    }
}

/// Stable video id, preferring the feed's `yt:video:<id>` entry id over
/// parsing the watch URL.
pub fn video_id_from_entry(entry: &Entry, link: &str) -> Option<String> {
    if let Some(id) = entry.id.strip_prefix("yt:video:") {
        if !id.is_empty() {
            return Some(id.to_string());
        }
    }
    video_id_from_url(link)
}

pub fn video_id_from_url(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;

    if let Some((_, id)) = url.query_pairs().find(|(key, _)| key == "v") {
        if !id.is_empty() {
            return Some(id.into_owned());
        }
    }

    let segments: Vec<&str> = url.path_segments()?.collect();
    if url.host_str() == Some("youtu.be") {
        return segments
            .first()
            .filter(|id| !id.is_empty())
            .map(|id| id.to_string());
    }
    segments
        .iter()
        .position(|segment| *segment == "embed" || *segment == "shorts")
        .and_then(|position| segments.get(position + 1))
        .map(|id| id.to_string())
}
