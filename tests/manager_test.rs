use async_trait::async_trait;
use chrono::{Duration, Utc};
use content_collector::{
    Author, Category, Collect, CollectionResult, CollectorManager, ContentItem, FeedUrl,
};

fn author(name: &str, category: Category) -> Author {
    Author {
        name: name.to_string(),
        url: format!("https://example.com/{name}"),
        category,
        enabled: true,
    }
}

fn item(author: &Author, title: &str, days_ago: i64) -> ContentItem {
    ContentItem::new(
        title,
        format!("https://example.com/{}/{title}", author.name),
        author.name.clone(),
        author.url.clone(),
        author.category,
    )
    .unwrap()
    .with_publish_date(Some(Utc::now() - Duration::days(days_ago)))
}

/// Deterministic collector standing in for a network-backed variant.
struct StubCollector {
    author: Author,
    feed_url: FeedUrl,
    outcome: Outcome,
}

enum Outcome {
    Items(Vec<ContentItem>),
    Error(String),
}

impl StubCollector {
    fn succeeding(author: Author, items: Vec<ContentItem>) -> Self {
        Self {
            feed_url: FeedUrl::Unresolved {
                reason: "stub".to_string(),
            },
            author,
            outcome: Outcome::Items(items),
        }
    }

    fn failing(author: Author, message: &str) -> Self {
        Self {
            feed_url: FeedUrl::Unresolved {
                reason: "stub".to_string(),
            },
            author,
            outcome: Outcome::Error(message.to_string()),
        }
    }
}

#[async_trait]
impl Collect for StubCollector {
    fn author(&self) -> &Author {
        &self.author
    }

    fn feed_url(&self) -> &FeedUrl {
        &self.feed_url
    }

    async fn collect(&self, max_items: usize) -> CollectionResult {
        match &self.outcome {
            Outcome::Items(items) => CollectionResult::success(
                &self.author,
                items.iter().take(max_items).cloned().collect(),
            ),
            Outcome::Error(message) => CollectionResult::failure(&self.author, message.clone()),
        }
    }
}

#[tokio::test]
async fn one_failing_author_does_not_abort_the_run() {
    let alice = author("alice", Category::News);
    let bob = author("bob", Category::Video);
    let carol = author("carol", Category::Podcast);

    let manager = CollectorManager::from_collectors(vec![
        Box::new(StubCollector::succeeding(
            alice.clone(),
            vec![item(&alice, "a1", 0), item(&alice, "a2", 1)],
        )),
        Box::new(StubCollector::failing(bob.clone(), "connection refused")),
        Box::new(StubCollector::succeeding(
            carol.clone(),
            vec![item(&carol, "c1", 2)],
        )),
    ]);

    let results = manager.collect_all(10).await;

    assert_eq!(results.len(), 3, "every author yields exactly one result");
    let names: Vec<&str> = results.iter().map(|r| r.author_name.as_str()).collect();
    assert_eq!(names, vec!["alice", "bob", "carol"], "configured order");

    assert!(results[0].success);
    assert_eq!(results[0].items.len(), 2);
    assert!(!results[1].success);
    assert_eq!(
        results[1].error_message.as_deref(),
        Some("connection refused")
    );
    assert!(results[2].success);
}

#[tokio::test]
async fn collect_all_respects_the_item_cap() {
    let alice = author("alice", Category::News);
    let items: Vec<ContentItem> = (0..8)
        .map(|n| item(&alice, &format!("post-{n}"), n))
        .collect();

    let manager = CollectorManager::from_collectors(vec![Box::new(StubCollector::succeeding(
        alice, items,
    ))]);

    let results = manager.collect_all(3).await;
    assert_eq!(results[0].items.len(), 3);
}

#[tokio::test]
async fn collect_today_only_filters_per_author_and_passes_failures_through() {
    let alice = author("alice", Category::News);
    let bob = author("bob", Category::Video);

    let manager = CollectorManager::from_collectors(vec![
        Box::new(StubCollector::succeeding(
            alice.clone(),
            vec![
                item(&alice, "fresh", 0),
                item(&alice, "stale", 3),
                item(&alice, "undated", 0).with_publish_date(None),
            ],
        )),
        Box::new(StubCollector::failing(bob, "timeout")),
    ]);

    let results = manager.collect_today_only(10).await;

    assert!(results[0].success);
    let titles: Vec<&str> = results[0].items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["fresh"]);
    assert_eq!(results[0].total_items, 1);

    assert!(!results[1].success);
    assert_eq!(results[1].error_message.as_deref(), Some("timeout"));
}

#[tokio::test]
async fn collect_author_reports_unknown_authors_as_failures() {
    let alice = author("alice", Category::News);
    let manager = CollectorManager::from_collectors(vec![Box::new(StubCollector::succeeding(
        alice.clone(),
        vec![item(&alice, "a1", 0)],
    ))]);

    let known = manager.collect_author("alice", 10).await;
    assert!(known.success);

    let unknown = manager.collect_author("nobody", 10).await;
    assert!(!unknown.success);
    assert!(unknown
        .error_message
        .as_deref()
        .unwrap_or_default()
        .contains("nobody"));
}
