use crate::collector::Collect;
use crate::collectors::create_collector;
use crate::config::Config;
use crate::model::CollectionResult;
use crate::types::{Author, Category, FetchConfig, Result};
use tracing::{info, warn};

/// Drives every enabled author's collector for one run.
///
/// Collectors are held in configured author order and the result list always
/// matches that order; a failing author contributes a failed result instead
/// of aborting the traversal.
pub struct CollectorManager {
    collectors: Vec<Box<dyn Collect>>,
}

impl CollectorManager {
    /// One collector per enabled author, in the roster's order.
    pub fn from_config(config: &Config, fetch_config: &FetchConfig) -> Result<Self> {
        let collectors = config
            .enabled_authors()
            .map(|author| create_collector(author, fetch_config))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { collectors })
    }

    pub fn from_collectors(collectors: Vec<Box<dyn Collect>>) -> Self {
        Self { collectors }
    }

    pub fn collector_count(&self) -> usize {
        self.collectors.len()
    }

    pub fn authors(&self) -> impl Iterator<Item = &Author> {
        self.collectors.iter().map(|collector| collector.author())
    }

    /// Collects every author sequentially. Always returns one result per
    /// collector, in order.
    pub async fn collect_all(&self, max_items: usize) -> Vec<CollectionResult> {
        let total = self.collectors.len();
        info!(authors = total, "starting collection run");

        let mut results = Vec::with_capacity(total);
        for (index, collector) in self.collectors.iter().enumerate() {
            let author = collector.author();
            info!(
                author = %author.name,
                category = %author.category,
                index = index + 1,
                total,
                "collecting"
            );

            let result = collector.collect(max_items).await;
            if result.success {
                info!(
                    author = %author.name,
                    items = result.items.len(),
                    today = result.today_items().count(),
                    "collected"
                );
            } else {
                warn!(
                    author = %author.name,
                    error = result.error_message.as_deref().unwrap_or("unknown"),
                    "collection failed"
                );
            }
            results.push(result);
        }

        log_run_summary(&results);
        results
    }

    /// Same traversal as `collect_all`, keeping only today's items per
    /// author.
    pub async fn collect_today_only(&self, max_items: usize) -> Vec<CollectionResult> {
        let total = self.collectors.len();
        info!(authors = total, "starting today-only collection run");

        let mut results = Vec::with_capacity(total);
        for collector in &self.collectors {
            let result = collector.collect_today_only(max_items).await;
            results.push(result);
        }

        log_run_summary(&results);
        results
    }

    /// Targeted single-author collection. An unknown author yields a failed
    /// result naming it, matching the per-author isolation contract.
    pub async fn collect_author(&self, name: &str, max_items: usize) -> CollectionResult {
        match self
            .collectors
            .iter()
            .find(|collector| collector.author().name == name)
        {
            Some(collector) => collector.collect(max_items).await,
            None => CollectionResult::failure(
                &Author {
                    name: name.to_string(),
                    url: String::new(),
                    category: Category::News,
                    enabled: false,
                },
                format!("no collector configured for author: {name}"),
            ),
        }
    }
}

fn log_run_summary(results: &[CollectionResult]) {
    let successful = results.iter().filter(|r| r.success).count();
    let total_items: usize = results.iter().map(|r| r.items.len()).sum();
    let today_items: usize = results.iter().map(|r| r.today_items().count()).sum();
    info!(
        successful,
        failed = results.len() - successful,
        total_items,
        today_items,
        "collection run finished"
    );

    for result in results.iter().filter(|r| !r.success) {
        warn!(
            author = %result.author_name,
            error = result.error_message.as_deref().unwrap_or("unknown"),
            "author failed this run"
        );
    }
}
