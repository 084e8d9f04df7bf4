//! View-state helpers shared by the rendering layer.

use chrono::{DateTime, NaiveDate};

/// Badge classes for an application status chip. Unknown statuses fall back
/// to the neutral gray style.
#[must_use]
pub fn status_class(status: &str) -> &'static str {
    match status.to_lowercase().as_str() {
        "pending" => "bg-amber-100 text-amber-700",
        "approved" => "bg-green-100 text-green-700",
        "rejected" => "bg-red-100 text-red-700",
        _ => "bg-gray-100 text-gray-700",
    }
}

/// Renders an API timestamp or plain date as e.g. `Mar 05, 2026`.
/// Accepts RFC 3339 timestamps and `YYYY-MM-DD` dates.
#[must_use]
pub fn format_date(value: &str) -> Option<String> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.format("%b %d, %Y").to_string());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.format("%b %d, %Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_class_maps_known_statuses() {
        assert_eq!(status_class("pending"), "bg-amber-100 text-amber-700");
        assert_eq!(status_class("Approved"), "bg-green-100 text-green-700");
        assert_eq!(status_class("REJECTED"), "bg-red-100 text-red-700");
        assert_eq!(status_class("archived"), "bg-gray-100 text-gray-700");
    }

    #[test]
    fn format_date_handles_timestamps_and_dates() {
        assert_eq!(
            format_date("2026-03-05T08:30:00Z").as_deref(),
            Some("Mar 05, 2026")
        );
        assert_eq!(format_date("2026-03-05").as_deref(), Some("Mar 05, 2026"));
        assert_eq!(format_date("yesterday"), None);
    }
}
