/// HTML cleanup helpers shared by the collectors.
///
/// These are synchronous on purpose: `scraper`'s DOM is not `Send`, so its
/// values must never live across an await point.
pub mod html {
    use scraper::{Html, Selector};
    use url::Url;

    /// Strips tags and collapses whitespace, returning plain text.
    pub fn strip_tags(html: &str) -> String {
        let fragment = Html::parse_fragment(html);
        fragment
            .root_element()
            .text()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// First `<img src>` in the fragment, resolved against `base` when the
    /// src is relative.
    pub fn first_image_src(html: &str, base: &str) -> Option<String> {
        let fragment = Html::parse_fragment(html);
        let selector = Selector::parse("img[src]").ok()?;
        let src = fragment
            .select(&selector)
            .next()
            .and_then(|img| img.value().attr("src"))?;

        if src.starts_with("http://") || src.starts_with("https://") {
            return Some(src.to_string());
        }
        let base = Url::parse(base).ok()?;
        base.join(src).ok().map(|url| url.to_string())
    }
}

pub mod text {
    /// Truncates to `max_chars` characters (not bytes) with a trailing
    /// ellipsis marker when anything was cut.
    pub fn truncate_chars(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
            None => text.to_string(),
        }
    }
}

pub mod time {
    use chrono::{DateTime, Local, Utc};

    /// Human-readable "time ago" label for feed rendering.
    pub fn relative_time(date: Option<DateTime<Utc>>) -> String {
        let Some(date) = date else {
            return "unknown".to_string();
        };

        let delta = Utc::now().signed_duration_since(date);
        if delta.num_seconds() < 0 {
            return date.with_timezone(&Local).format("%Y-%m-%d").to_string();
        }

        match delta.num_days() {
            0 => {
                if delta.num_hours() == 0 {
                    format!("{} minutes ago", delta.num_minutes())
                } else {
                    format!("{} hours ago", delta.num_hours())
                }
            }
            1 => "yesterday".to_string(),
            2..=6 => format!("{} days ago", delta.num_days()),
            _ => date.with_timezone(&Local).format("%Y-%m-%d").to_string(),
        }
    }

    /// `H:MM:SS` (or `M:SS` under an hour), for media durations.
    pub fn format_duration(duration: std::time::Duration) -> String {
        let total = duration.as_secs();
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;
        if hours > 0 {
            format!("{hours}:{minutes:02}:{seconds:02}")
        } else {
            format!("{minutes}:{seconds:02}")
        }
    }
}
