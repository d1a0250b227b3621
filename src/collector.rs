use crate::model::CollectionResult;
use crate::types::Author;
use async_trait::async_trait;
use url::Url;

/// Outcome of locating an author's canonical feed endpoint, computed once at
/// collector construction. An unresolved URL is not an error at build time;
/// `collect` turns it into a failed result when the collector actually runs.
#[derive(Debug, Clone)]
pub enum FeedUrl {
    Resolved(Url),
    Unresolved { reason: String },
}

impl FeedUrl {
    pub fn resolved(&self) -> Option<&Url> {
        match self {
            FeedUrl::Resolved(url) => Some(url),
            FeedUrl::Unresolved { .. } => None,
        }
    }
}

/// Capability for collecting one author's content for one run.
///
/// `collect` never returns an error: every fetch, parse, or mapping failure
/// for the whole pass is folded into a failed [`CollectionResult`] so a bad
/// author cannot abort the run. Collectors are used by one task at a time
/// and are not required to be safe for concurrent reuse.
#[async_trait]
pub trait Collect: Send + Sync {
    fn author(&self) -> &Author;

    /// Where this collector will fetch from, if resolution succeeded.
    fn feed_url(&self) -> &FeedUrl;

    /// Fetch and map up to `max_items` entries from the author's source.
    async fn collect(&self, max_items: usize) -> CollectionResult;

    /// Like `collect`, but keeps only items published today. Failures pass
    /// through unchanged.
    async fn collect_today_only(&self, max_items: usize) -> CollectionResult {
        let mut result = self.collect(max_items).await;
        if result.success {
            result.retain_today();
        }
        result
    }
}
