use chrono::{DateTime, Local, Utc};

/// Relative age of a post as shown next to its author.
pub fn format_time_ago(now: DateTime<Utc>, created_at: DateTime<Utc>) -> String {
    let hours = (now - created_at).num_seconds().div_euclid(3600);

    if hours < 1 {
        return "just now".to_string();
    }
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    let days = hours / 24;
    if days < 7 {
        return format!("{}d ago", days);
    }
    format_calendar_date(created_at)
}

/// Local calendar date, `M/D/YYYY`.
pub fn format_calendar_date(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%-m/%-d/%Y").to_string()
}

/// "1 question", "3 questions".
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
