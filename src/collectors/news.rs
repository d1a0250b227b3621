use crate::collector::{Collect, FeedUrl};
use crate::collectors::{
    entry_content_id, entry_description, entry_link, entry_media_image, entry_media_thumbnail,
    entry_publish_date, entry_title, run_collect,
};
use crate::fetcher::Fetcher;
use crate::model::{CollectionResult, ContentItem};
use crate::types::{Author, Category, FetchConfig, Result};
use crate::utils::html;
use async_trait::async_trait;
use feed_rs::model::{Entry, Feed};
use tracing::warn;
use url::Url;

/// Collects news and blog posts from an RSS or Atom feed.
pub struct NewsCollector {
    author: Author,
    fetcher: Fetcher,
    feed_url: FeedUrl,
}

impl NewsCollector {
    pub fn new(author: Author, config: FetchConfig) -> Result<Self> {
        let feed_url = resolve_feed_url(&author.url);
        Ok(Self {
            author,
            fetcher: Fetcher::new(config)?,
            feed_url,
        })
    }

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

        // Candidate order: explicit media metadata first, then the first
        // inline image in the summary body.
        let cover = entry_media_thumbnail(entry)
            .or_else(|| entry_media_image(entry))
            .or_else(|| {
                entry
                    .summary
                    .as_ref()
                    .and_then(|summary| html::first_image_src(&summary.content, &link))
            });
        let tags: Vec<String> = entry
            .categories
            .iter()
            .map(|category| category.term.clone())
            .collect();

        let item = ContentItem::new(
            title,
            link.clone(),
            self.author.name.clone(),
            self.author.url.clone(),
            Category::News,
        );
        match item {
            Ok(item) => Some(
                item.with_description(entry_description(entry))
                    .with_publish_date(entry_publish_date(entry))
                    .with_cover_image_url(cover)
                    .with_tags(tags)
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
impl Collect for NewsCollector {
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

/// Same policy as the podcast variant, with `atom` also accepted as a
/// feed marker.
pub fn resolve_feed_url(author_url: &str) -> FeedUrl {
    let lowered = author_url.to_lowercase();
    let is_feed = ["feed", "rss", "atom"]
        .iter()
        .any(|marker| lowered.contains(marker));
    let candidate = if is_feed {
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
