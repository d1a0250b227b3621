use crate::model::{ContentItem, Snapshot};
use crate::storage::SnapshotStore;
use crate::types::Result;
use crate::utils::time::relative_time;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Assembles the current view from the store: newest snapshot as baseline,
/// backfilled per author from older snapshots wherever the baseline shows a
/// failure.
///
/// Precedence is newest-wins unless failed, else first historical success
/// wins; because the scan runs newest-to-oldest, the most recent historical
/// success is the one taken. Backfilled results are tagged `from_history`
/// with the donor snapshot's collection time so readers can show staleness.
/// An empty store (or an unreadable newest snapshot) is the "no data" state,
/// not an error; unreadable older snapshots are skipped, degrading to "no
/// backfill available".
pub fn merged_view(store: &SnapshotStore) -> Result<Option<Snapshot>> {
    let files = store.list_collection_files()?;
    let Some((latest, history)) = files.split_first() else {
        return Ok(None);
    };

    let mut view = match store.load_snapshot(latest) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(file = %latest.display(), error = %e, "newest snapshot unreadable");
            return Ok(None);
        }
    };

    let mut pending: HashSet<String> = view
        .results
        .iter()
        .filter(|result| !result.success)
        .map(|result| result.author_name.clone())
        .collect();

    if pending.is_empty() {
        return Ok(Some(view));
    }

    for old_file in history {
        if pending.is_empty() {
            break;
        }

        let old_snapshot = match store.load_snapshot(old_file) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(file = %old_file.display(), error = %e, "skipping unreadable snapshot");
                continue;
            }
        };

        for historical in old_snapshot.results {
            if !historical.success || !pending.contains(&historical.author_name) {
                continue;
            }

            debug!(
                author = %historical.author_name,
                donor = %old_file.display(),
                items = historical.items.len(),
                "backfilling failed author from history"
            );

            pending.remove(&historical.author_name);
            view.results
                .retain(|result| result.author_name != historical.author_name);

            let mut replacement = historical;
            replacement.from_history = true;
            replacement.history_collected_at = Some(old_snapshot.collected_at);
            view.results.push(replacement);
        }
    }

    if !pending.is_empty() {
        info!(
            unresolved = pending.len(),
            "some failed authors have no historical success"
        );
    }

    // Recomputed rather than adjusted in place: a snapshot file from another
    // writer can carry counters that disagree with its results.
    view.total_authors = view.results.len();
    view.successful_authors = view.results.iter().filter(|r| r.success).count();
    view.failed_authors = view.total_authors - view.successful_authors;
    view.total_items = view
        .results
        .iter()
        .filter(|r| r.success)
        .map(|r| r.items.len())
        .sum();
    Ok(Some(view))
}

/// One renderable entry in the flattened feed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    #[serde(flatten)]
    pub item: ContentItem,
    pub formatted_date: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub from_history: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_collected_at: Option<DateTime<Utc>>,
}

/// Flattens all successful results into one feed: newest publish date
/// first, items without a date last, provenance carried through from the
/// merge.
pub fn feed_view(view: &Snapshot) -> Vec<FeedItem> {
    let mut feed: Vec<FeedItem> = view
        .results
        .iter()
        .filter(|result| result.success)
        .flat_map(|result| {
            result.items.iter().map(|item| FeedItem {
                item: item.clone(),
                formatted_date: relative_time(item.publish_date),
                from_history: result.from_history,
                history_collected_at: result.history_collected_at,
            })
        })
        .collect();

    feed.sort_by(|a, b| b.item.publish_date.cmp(&a.item.publish_date));
    feed
}

/// `feed_view` restricted to one category.
pub fn feed_view_by_category(view: &Snapshot, category: crate::types::Category) -> Vec<FeedItem> {
    feed_view(view)
        .into_iter()
        .filter(|entry| entry.item.category == category)
        .collect()
}
