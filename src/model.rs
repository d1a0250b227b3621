use crate::types::{Author, Category, CollectorError, Result};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// One normalized piece of published content (a video, an episode, or a post).
///
/// Built once per feed entry and never mutated afterwards; the only post-hoc
/// annotation allowed is the history provenance added on its parent
/// [`CollectionResult`] during a merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub title: String,
    pub url: String,
    pub author_name: String,
    pub author_url: String,
    pub category: Category,

    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    pub collected_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
}

impl ContentItem {
    /// Validates the required fields and stamps `collected_at`.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        author_name: impl Into<String>,
        author_url: impl Into<String>,
        category: Category,
    ) -> Result<Self> {
        let title = title.into();
        let url = url.into();
        let author_name = author_name.into();

        if title.trim().is_empty() {
            return Err(CollectorError::Validation {
                field: "title",
                message: "title must not be empty".to_string(),
            });
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(CollectorError::Validation {
                field: "url",
                message: format!("not an absolute http(s) URL: {url}"),
            });
        }
        if author_name.trim().is_empty() {
            return Err(CollectorError::Validation {
                field: "author_name",
                message: "author name must not be empty".to_string(),
            });
        }

        Ok(Self {
            title,
            url,
            author_name,
            author_url: author_url.into(),
            category,
            description: String::new(),
            publish_date: None,
            thumbnail_url: None,
            cover_image_url: None,
            images: Vec::new(),
            duration: None,
            views: None,
            tags: Vec::new(),
            collected_at: Utc::now(),
            content_id: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_publish_date(mut self, publish_date: Option<DateTime<Utc>>) -> Self {
        self.publish_date = publish_date;
        self
    }

    pub fn with_thumbnail_url(mut self, thumbnail_url: Option<String>) -> Self {
        self.thumbnail_url = thumbnail_url;
        self
    }

    pub fn with_cover_image_url(mut self, cover_image_url: Option<String>) -> Self {
        self.cover_image_url = cover_image_url;
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    pub fn with_duration(mut self, duration: Option<String>) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_views(mut self, views: Option<u64>) -> Self {
        self.views = views;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_content_id(mut self, content_id: Option<String>) -> Self {
        self.content_id = content_id;
        self
    }

    /// Whether the publish date falls on today's local calendar date.
    /// Items without a publish date are never "today".
    pub fn is_today(&self) -> bool {
        match self.publish_date {
            Some(date) => date.with_timezone(&Local).date_naive() == Local::now().date_naive(),
            None => false,
        }
    }

    /// Thumbnail if present, else the cover image.
    pub fn primary_image(&self) -> Option<&str> {
        self.thumbnail_url
            .as_deref()
            .or(self.cover_image_url.as_deref())
    }
}

/// Outcome of collecting one author's content in one run.
///
/// `success == false` implies `items` is empty and `error_message` is set;
/// the constructors are the only way to build one, so the invariant holds by
/// construction. `from_history` / `history_collected_at` are written only by
/// the snapshot merge when a failed entry is replaced by a historical one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResult {
    pub author_name: String,
    pub author_url: String,
    pub category: Category,
    pub success: bool,
    #[serde(default)]
    pub items: Vec<ContentItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub collected_at: DateTime<Utc>,
    #[serde(default)]
    pub total_items: usize,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub from_history: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_collected_at: Option<DateTime<Utc>>,
}

impl CollectionResult {
    pub fn success(author: &Author, items: Vec<ContentItem>) -> Self {
        let total_items = items.len();
        Self {
            author_name: author.name.clone(),
            author_url: author.url.clone(),
            category: author.category,
            success: true,
            items,
            error_message: None,
            collected_at: Utc::now(),
            total_items,
            from_history: false,
            history_collected_at: None,
        }
    }

    pub fn failure(author: &Author, message: impl Into<String>) -> Self {
        Self {
            author_name: author.name.clone(),
            author_url: author.url.clone(),
            category: author.category,
            success: false,
            items: Vec::new(),
            error_message: Some(message.into()),
            collected_at: Utc::now(),
            total_items: 0,
            from_history: false,
            history_collected_at: None,
        }
    }

    /// Lazy view of the items published on today's local calendar date.
    pub fn today_items(&self) -> impl Iterator<Item = &ContentItem> {
        self.items.iter().filter(|item| item.is_today())
    }

    /// Replaces `items` with the today-filtered subset.
    pub fn retain_today(&mut self) {
        self.items.retain(|item| item.is_today());
        self.total_items = self.items.len();
    }
}

/// Persisted record of one collection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub collected_at: DateTime<Utc>,
    pub total_authors: usize,
    pub successful_authors: usize,
    pub failed_authors: usize,
    pub total_items: usize,
    pub results: Vec<CollectionResult>,
}

impl Snapshot {
    pub fn from_results(results: Vec<CollectionResult>) -> Self {
        let successful_authors = results.iter().filter(|r| r.success).count();
        let total_items = results
            .iter()
            .filter(|r| r.success)
            .map(|r| r.items.len())
            .sum();
        Self {
            collected_at: Utc::now(),
            total_authors: results.len(),
            successful_authors,
            failed_authors: results.len() - successful_authors,
            total_items,
            results,
        }
    }
}
