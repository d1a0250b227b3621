use content_collector::{Category, Config};
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.json");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn loads_roster_in_file_order() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"{
            "authors": [
                {"name": "Alice", "url": "https://alice.example/feed/", "category": "News"},
                {"name": "Bob", "url": "https://youtube.com/channel/UCbob", "category": "Video", "enabled": false},
                {"name": "Carol", "url": "https://carol.example/podcast/", "category": "Podcast"}
            ],
            "settings": {"max_items_per_author": 5}
        }"#,
    );

    let config = Config::load(&path).unwrap();
    assert_eq!(config.authors.len(), 3);
    assert_eq!(config.settings.max_items_per_author, 5);
    assert_eq!(config.settings.check_interval_minutes, 60, "defaulted");
    assert_eq!(config.settings.request_timeout_seconds, 30, "defaulted");

    let enabled: Vec<&str> = config
        .enabled_authors()
        .map(|author| author.name.as_str())
        .collect();
    assert_eq!(enabled, vec!["Alice", "Carol"]);

    let news: Vec<&str> = config
        .authors_by_category(Category::News)
        .map(|author| author.name.as_str())
        .collect();
    assert_eq!(news, vec!["Alice"]);
}

#[test]
fn invalid_authors_are_skipped_not_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"{
            "authors": [
                {"name": "Good", "url": "https://good.example/feed/", "category": "News"},
                {"name": "Bad", "url": "not-a-url", "category": "News"},
                {"name": "   ", "url": "https://blank.example/", "category": "Video"}
            ]
        }"#,
    );

    let config = Config::load(&path).unwrap();
    let names: Vec<&str> = config.authors.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Good"]);
}

#[test]
fn empty_roster_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"{"authors": [{"name": "Bad", "url": "nope", "category": "News"}]}"#,
    );
    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("no valid authors"));
}

#[test]
fn missing_file_and_bad_json_are_config_errors() {
    let dir = TempDir::new().unwrap();

    let err = Config::load(dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("not found"));

    let path = write_config(&dir, "{ this is not json");
    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("invalid config"));
}

#[test]
fn zero_valued_settings_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"{
            "authors": [{"name": "A", "url": "https://a.example/feed/", "category": "News"}],
            "settings": {"max_items_per_author": 0}
        }"#,
    );
    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("max_items_per_author"));
}
