//! Text helpers for the page: escaping, relative time, digit grouping.

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;

/// Replaces `& < > " '` with their entity equivalents.
///
/// Every occurrence is replaced, so the output can be inserted into both
/// element content and quoted attribute values.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Formats the time elapsed between `created_at` and `now` as a short
/// label such as `"just now"`, `"5m ago"` or `"2mo ago"`.
///
/// Units are floored, months are 30 days, and timestamps in the future
/// read as `"just now"`.
#[must_use]
pub fn relative_time(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(created_at).num_seconds();
    if seconds < MINUTE {
        "just now".to_string()
    } else if seconds < HOUR {
        format!("{}m ago", seconds / MINUTE)
    } else if seconds < DAY {
        format!("{}h ago", seconds / HOUR)
    } else if seconds < MONTH {
        format!("{}d ago", seconds / DAY)
    } else {
        format!("{}mo ago", seconds / MONTH)
    }
}

/// Formats a count with `,` between every group of three digits.
#[must_use]
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
