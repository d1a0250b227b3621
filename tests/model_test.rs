use chrono::{Duration, Utc};
use content_collector::{Author, Category, CollectionResult, ContentItem, Snapshot};

fn author(name: &str, category: Category) -> Author {
    Author {
        name: name.to_string(),
        url: format!("https://example.com/{name}"),
        category,
        enabled: true,
    }
}

fn item(title: &str) -> ContentItem {
    ContentItem::new(
        title,
        "https://example.com/post/1",
        "Example Author",
        "https://example.com",
        Category::News,
    )
    .unwrap()
}

#[test]
fn content_item_rejects_invalid_fields() {
    let err = ContentItem::new(
        "  ",
        "https://example.com/a",
        "Author",
        "https://example.com",
        Category::News,
    )
    .unwrap_err();
    assert!(err.to_string().contains("title"));

    let err = ContentItem::new(
        "Title",
        "ftp://example.com/a",
        "Author",
        "https://example.com",
        Category::News,
    )
    .unwrap_err();
    assert!(err.to_string().contains("url"));

    let err = ContentItem::new(
        "Title",
        "https://example.com/a",
        "",
        "https://example.com",
        Category::News,
    )
    .unwrap_err();
    assert!(err.to_string().contains("author_name"));
}

#[test]
fn content_item_round_trips_through_json() {
    let original = item("A Post")
        .with_description("A plain description")
        .with_publish_date(Some(Utc::now()))
        .with_thumbnail_url(Some("https://example.com/thumb.jpg".to_string()))
        .with_images(vec!["https://example.com/a.png".to_string()])
        .with_duration(Some("1:02:03".to_string()))
        .with_views(Some(1234))
        .with_tags(vec!["rust".to_string()])
        .with_content_id(Some("guid-1".to_string()));

    let json = serde_json::to_string(&original).unwrap();
    let decoded: ContentItem = serde_json::from_str(&json).unwrap();
    assert_eq!(original, decoded);
}

#[test]
fn content_item_json_uses_camel_case_and_omits_absent_optionals() {
    let value = serde_json::to_value(item("A Post")).unwrap();
    let object = value.as_object().unwrap();

    assert!(object.contains_key("authorName"));
    assert!(object.contains_key("collectedAt"));
    assert_eq!(object["category"], "News");
    assert!(!object.contains_key("publishDate"));
    assert!(!object.contains_key("thumbnailUrl"));
    assert!(!object.contains_key("images"));
}

#[test]
fn collection_result_round_trips_through_json() {
    let success = CollectionResult::success(
        &author("alice", Category::Video),
        vec![item("One"), item("Two")],
    );
    let decoded: CollectionResult =
        serde_json::from_str(&serde_json::to_string(&success).unwrap()).unwrap();
    assert_eq!(success, decoded);

    let failure = CollectionResult::failure(&author("bob", Category::Podcast), "feed unreachable");
    let decoded: CollectionResult =
        serde_json::from_str(&serde_json::to_string(&failure).unwrap()).unwrap();
    assert_eq!(failure, decoded);
}

#[test]
fn failure_results_carry_a_message_and_no_items() {
    let failure = CollectionResult::failure(&author("bob", Category::Podcast), "boom");
    assert!(!failure.success);
    assert!(failure.items.is_empty());
    assert_eq!(failure.error_message.as_deref(), Some("boom"));

    let success = CollectionResult::success(&author("alice", Category::News), vec![item("One")]);
    assert!(success.success);
    assert_eq!(success.total_items, 1);
    assert!(success.error_message.is_none());
}

#[test]
fn today_items_excludes_old_and_undated_items() {
    let today = item("today").with_publish_date(Some(Utc::now()));
    let last_week = item("old").with_publish_date(Some(Utc::now() - Duration::days(7)));
    let undated = item("undated");

    let result = CollectionResult::success(
        &author("alice", Category::News),
        vec![today, last_week, undated],
    );

    let titles: Vec<&str> = result.today_items().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["today"]);
    // The view is restartable.
    assert_eq!(result.today_items().count(), 1);
}

#[test]
fn primary_image_prefers_thumbnail() {
    let both = item("x")
        .with_thumbnail_url(Some("https://example.com/t.jpg".to_string()))
        .with_cover_image_url(Some("https://example.com/c.jpg".to_string()));
    assert_eq!(both.primary_image(), Some("https://example.com/t.jpg"));

    let cover_only = item("y").with_cover_image_url(Some("https://example.com/c.jpg".to_string()));
    assert_eq!(cover_only.primary_image(), Some("https://example.com/c.jpg"));
    assert_eq!(item("z").primary_image(), None);
}

#[test]
fn snapshot_counters_only_count_successes() {
    let results = vec![
        CollectionResult::success(&author("alice", Category::News), vec![item("a"), item("b")]),
        CollectionResult::failure(&author("bob", Category::Video), "nope"),
    ];
    let snapshot = Snapshot::from_results(results);

    assert_eq!(snapshot.total_authors, 2);
    assert_eq!(snapshot.successful_authors, 1);
    assert_eq!(snapshot.failed_authors, 1);
    assert_eq!(snapshot.total_items, 2);

    let decoded: Snapshot =
        serde_json::from_str(&serde_json::to_string(&snapshot).unwrap()).unwrap();
    assert_eq!(snapshot, decoded);
}
