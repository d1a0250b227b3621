use crate::model::{CollectionResult, Snapshot};
use crate::types::{Category, CollectorError, Result};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};

/// Append-only directory of JSON snapshot documents.
///
/// One file per run plus derived documents (today-only, per-author,
/// summary). Files are never edited after creation; listing orders by file
/// modification time, newest first.
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes the full run snapshot as `collection_<YYYYMMDD>_<HHMMSS>.json`.
    pub fn save_results(&self, results: &[CollectionResult]) -> Result<PathBuf> {
        let filename = format!("collection_{}.json", run_timestamp());
        self.save_snapshot(results.to_vec(), &filename)
    }

    /// Writes the artifact set for one run.
    ///
    /// A today-only run carries a filtered view of each author, so it must
    /// not become a `collection_` snapshot: the merge reads those as full-run
    /// ground truth, and a filtered one would shadow everything an author
    /// published before today. Only complete runs extend the collection
    /// stream; the today/summary/per-author documents are written either way.
    pub fn save_run(&self, results: &[CollectionResult], today_only: bool) -> Result<RunArtifacts> {
        let snapshot = if today_only {
            None
        } else {
            Some(self.save_results(results)?)
        };
        Ok(RunArtifacts {
            snapshot,
            today: self.save_today_only(results)?,
            summary: self.save_summary(results)?,
            author_files: self.save_by_author(results)?,
        })
    }

    /// Writes the per-author today-only subset as `today_<YYYYMMDD>.json`.
    /// Authors with no items published today are left out entirely.
    pub fn save_today_only(&self, results: &[CollectionResult]) -> Result<PathBuf> {
        let today_results: Vec<CollectionResult> = results
            .iter()
            .filter(|result| result.success)
            .filter_map(|result| {
                let mut filtered = result.clone();
                filtered.retain_today();
                (!filtered.items.is_empty()).then_some(filtered)
            })
            .collect();

        let filename = format!("today_{}.json", Local::now().format("%Y%m%d"));
        self.save_snapshot(today_results, &filename)
    }

    /// Writes one `<sanitized-author>_<timestamp>.json` per successful
    /// non-empty result. Returns author name to path mappings.
    pub fn save_by_author(&self, results: &[CollectionResult]) -> Result<Vec<(String, PathBuf)>> {
        let timestamp = run_timestamp();
        let mut saved = Vec::new();

        for result in results {
            if !result.success || result.items.is_empty() {
                continue;
            }
            let filename = format!(
                "{}_{timestamp}.json",
                sanitize_filename(&result.author_name)
            );
            let path = self.write_json(&filename, result)?;
            saved.push((result.author_name.clone(), path));
        }
        Ok(saved)
    }

    /// Writes the run summary as `summary_<YYYYMMDD>_<HHMMSS>.json`.
    pub fn save_summary(&self, results: &[CollectionResult]) -> Result<PathBuf> {
        let filename = format!("summary_{}.json", run_timestamp());
        self.write_json(&filename, &summary_report(results))
    }

    fn save_snapshot(&self, results: Vec<CollectionResult>, filename: &str) -> Result<PathBuf> {
        let snapshot = Snapshot::from_results(results);
        let path = self.write_json(filename, &snapshot)?;
        info!(file = %path.display(), items = snapshot.total_items, "snapshot written");
        Ok(path)
    }

    /// Serializes to a `.tmp` sibling, then renames into place so a listing
    /// reader can never observe a partially written document.
    fn write_json<T: Serialize>(&self, filename: &str, value: &T) -> Result<PathBuf> {
        let path = self.dir.join(filename);
        let tmp_path = self.dir.join(format!("{filename}.tmp"));

        let body = serde_json::to_vec_pretty(value)?;
        fs::write(&tmp_path, body)
            .and_then(|_| fs::rename(&tmp_path, &path))
            .map_err(|e| {
                CollectorError::Storage(format!("failed to write {}: {e}", path.display()))
            })?;

        debug!(file = %path.display(), "wrote document");
        Ok(path)
    }

    /// Files whose names start with `prefix` and end with `.json`, ordered
    /// by modification time descending.
    pub fn list_files(&self, prefix: &str) -> Result<Vec<PathBuf>> {
        let mut files: Vec<(SystemTime, PathBuf)> = Vec::new();

        for dir_entry in fs::read_dir(&self.dir)? {
            let dir_entry = dir_entry?;
            let path = dir_entry.path();
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if !name.starts_with(prefix) || !name.ends_with(".json") {
                continue;
            }
            let modified = dir_entry
                .metadata()
                .and_then(|metadata| metadata.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            files.push((modified, path));
        }

        files.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(files.into_iter().map(|(_, path)| path).collect())
    }

    /// Full-run snapshots, newest first.
    pub fn list_collection_files(&self) -> Result<Vec<PathBuf>> {
        self.list_files("collection_")
    }

    pub fn latest_collection_file(&self) -> Result<Option<PathBuf>> {
        Ok(self.list_collection_files()?.into_iter().next())
    }

    /// Loads one snapshot document. Read or decode failures surface as
    /// storage errors; callers decide whether to degrade.
    pub fn load_snapshot(&self, path: &Path) -> Result<Snapshot> {
        let raw = fs::read_to_string(path).map_err(|e| {
            CollectorError::Storage(format!("failed to read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            CollectorError::Storage(format!("failed to decode {}: {e}", path.display()))
        })
    }
}

/// Paths written by [`SnapshotStore::save_run`]. `snapshot` is `None` for
/// today-only runs.
#[derive(Debug)]
pub struct RunArtifacts {
    pub snapshot: Option<PathBuf>,
    pub today: PathBuf,
    pub summary: PathBuf,
    pub author_files: Vec<(String, PathBuf)>,
}

fn run_timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Replaces filesystem-hostile characters with `_`, trims surrounding
/// whitespace, and caps the length at 100 characters.
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect();
    sanitized.trim().chars().take(100).collect()
}

/// Aggregated report over one run's results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub summary: SummaryTotals,
    pub by_category: BTreeMap<Category, CategoryStats>,
    pub successful_authors: Vec<String>,
    pub failed_authors: Vec<FailedAuthor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    pub total_authors: usize,
    pub successful_authors: usize,
    pub failed_authors: usize,
    pub total_items: usize,
    pub today_items: usize,
    pub collection_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub authors: usize,
    pub items: usize,
    pub today_items: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedAuthor {
    pub name: String,
    pub error: String,
}

/// Pure summary construction; writing it out is [`SnapshotStore::save_summary`].
pub fn summary_report(results: &[CollectionResult]) -> SummaryReport {
    let successful: Vec<&CollectionResult> = results.iter().filter(|r| r.success).collect();
    let failed: Vec<&CollectionResult> = results.iter().filter(|r| !r.success).collect();

    let mut by_category: BTreeMap<Category, CategoryStats> = BTreeMap::new();
    for result in &successful {
        let stats = by_category.entry(result.category).or_default();
        stats.authors += 1;
        stats.items += result.items.len();
        stats.today_items += result.today_items().count();
    }

    SummaryReport {
        summary: SummaryTotals {
            total_authors: results.len(),
            successful_authors: successful.len(),
            failed_authors: failed.len(),
            total_items: successful.iter().map(|r| r.items.len()).sum(),
            today_items: successful.iter().map(|r| r.today_items().count()).sum(),
            collection_time: Utc::now(),
        },
        by_category,
        successful_authors: successful.iter().map(|r| r.author_name.clone()).collect(),
        failed_authors: failed
            .iter()
            .map(|r| FailedAuthor {
                name: r.author_name.clone(),
                error: r.error_message.clone().unwrap_or_default(),
            })
            .collect(),
    }
}
