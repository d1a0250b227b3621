//! Source-specific collector variants and the dispatch that builds them.
//!
//! All variants share the same entry mapping policy: entries without a
//! non-empty title or link are skipped, the description is the richest
//! available text field stripped of HTML and truncated, the publish date
//! falls back from `published` to `updated`, and the content id falls back
//! from the feed's entry id to the entry's own URL.

pub mod news;
pub mod podcast;
pub mod video;

pub use news::NewsCollector;
pub use podcast::PodcastCollector;
pub use video::VideoCollector;

use crate::collector::{Collect, FeedUrl};
use crate::fetcher::Fetcher;
use crate::model::{CollectionResult, ContentItem};
use crate::types::{Author, Category, FetchConfig, Result};
use crate::utils::{html, text};
use chrono::{DateTime, Utc};
use feed_rs::model::{Entry, Feed};
use tracing::warn;

/// Builds the collector variant responsible for the author's category.
pub fn create_collector(author: &Author, config: &FetchConfig) -> Result<Box<dyn Collect>> {
    Ok(match author.category {
        Category::Video => Box::new(VideoCollector::new(author.clone(), config.clone())?),
        Category::Podcast => Box::new(PodcastCollector::new(author.clone(), config.clone())?),
        Category::News => Box::new(NewsCollector::new(author.clone(), config.clone())?),
    })
}

/// Shared fetch-parse-map pass behind every variant's `collect`.
///
/// Every failure mode for the whole pass becomes a failed result; `map` is
/// expected to skip (not fail on) individually unmappable entries.
pub(crate) async fn run_collect<F>(
    author: &Author,
    fetcher: &Fetcher,
    feed_url: &FeedUrl,
    map: F,
) -> CollectionResult
where
    F: FnOnce(&Feed) -> Vec<ContentItem>,
{
    let url = match feed_url {
        FeedUrl::Resolved(url) => url,
        FeedUrl::Unresolved { reason } => {
            warn!(author = %author.name, %reason, "feed URL unresolved");
            return CollectionResult::failure(author, reason.clone());
        }
    };

    let body = match fetcher.fetch_text(url.as_str()).await {
        Ok(body) => body,
        Err(e) => return CollectionResult::failure(author, e.to_string()),
    };

    let feed = match feed_rs::parser::parse(body.as_bytes()) {
        Ok(feed) => feed,
        Err(e) => {
            return CollectionResult::failure(author, format!("feed parse error: {e}"));
        }
    };

    if feed.entries.is_empty() {
        return CollectionResult::failure(author, "feed contains no entries");
    }

    let items = map(&feed);
    if items.is_empty() {
        return CollectionResult::failure(author, "no valid items");
    }
    CollectionResult::success(author, items)
}

const MAX_DESCRIPTION_CHARS: usize = 500;

pub(crate) fn entry_title(entry: &Entry) -> Option<String> {
    let title = entry.title.as_ref()?.content.trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

pub(crate) fn entry_link(entry: &Entry) -> Option<String> {
    let href = entry.links.first()?.href.trim();
    if href.is_empty() {
        None
    } else {
        Some(href.to_string())
    }
}

/// Richest available text, HTML-stripped and capped at 500 characters.
pub(crate) fn entry_description(entry: &Entry) -> String {
    let raw = entry
        .summary
        .as_ref()
        .map(|summary| summary.content.clone())
        .or_else(|| entry.content.as_ref().and_then(|c| c.body.clone()))
        .unwrap_or_default();

    if raw.is_empty() {
        return raw;
    }
    text::truncate_chars(html::strip_tags(&raw).trim(), MAX_DESCRIPTION_CHARS)
}

pub(crate) fn entry_publish_date(entry: &Entry) -> Option<DateTime<Utc>> {
    entry.published.or(entry.updated)
}

pub(crate) fn entry_content_id(entry: &Entry, link: &str) -> String {
    if entry.id.trim().is_empty() {
        link.to_string()
    } else {
        entry.id.clone()
    }
}

/// First thumbnail declared in the entry's media metadata.
pub(crate) fn entry_media_thumbnail(entry: &Entry) -> Option<String> {
    entry
        .media
        .iter()
        .flat_map(|media| media.thumbnails.iter())
        .map(|thumbnail| thumbnail.image.uri.clone())
        .next()
}

/// First image-typed media content object.
pub(crate) fn entry_media_image(entry: &Entry) -> Option<String> {
    entry
        .media
        .iter()
        .flat_map(|media| media.content.iter())
        .filter(|content| {
            content
                .content_type
                .as_ref()
                .map(|mime| mime.type_() == "image")
                .unwrap_or(false)
        })
        .filter_map(|content| content.url.as_ref().map(|url| url.to_string()))
        .next()
}
