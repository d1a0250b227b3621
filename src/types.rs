use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content category for a configured author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Video,
    Podcast,
    News,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Video, Category::Podcast, Category::News];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Video => "Video",
            Category::Podcast => "Podcast",
            Category::News => "News",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CollectorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Video" | "video" => Ok(Category::Video),
            "Podcast" | "podcast" => Ok(Category::Podcast),
            "News" | "news" => Ok(Category::News),
            other => Err(CollectorError::Validation {
                field: "category",
                message: format!("unknown category: {other}"),
            }),
        }
    }
}

/// One configured content source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub url: String,
    pub category: Category,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Author {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CollectorError::Validation {
                field: "name",
                message: "author name must not be empty".to_string(),
            });
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(CollectorError::Validation {
                field: "url",
                message: format!("not an absolute http(s) URL: {}", self.url),
            });
        }
        Ok(())
    }
}

/// HTTP behavior shared by all collectors built for one run.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    #[error("invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed parse error: {0}")]
    Parse(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("config error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CollectorError>;
