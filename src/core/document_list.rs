//! Sidebar document list: filtering, highlighting and date labels

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use super::document::{DocumentId, DocumentSummary};

/// Documents fetched from the store, as shown in the sidebar
#[derive(Debug, Clone, Default)]
pub struct DocumentList {
    items: Vec<DocumentSummary>,
    /// Search box content
    pub filter: String,
    active: Option<DocumentId>,
    loading: bool,
    failed: bool,
}

impl DocumentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the list as being refreshed
    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// Replace the items with a fresh listing
    pub fn set_items(&mut self, items: Vec<DocumentSummary>) {
        self.items = items;
        self.loading = false;
        self.failed = false;
    }

    /// The listing could not be fetched
    pub fn set_failed(&mut self) {
        self.loading = false;
        self.failed = true;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn items(&self) -> &[DocumentSummary] {
        &self.items
    }

    pub fn set_active(&mut self, id: Option<DocumentId>) {
        self.active = id;
    }

    pub fn is_active(&self, id: &DocumentId) -> bool {
        self.active.as_ref() == Some(id)
    }

    /// Items whose title contains the filter, case-insensitively
    pub fn visible(&self) -> impl Iterator<Item = &DocumentSummary> {
        let needle = self.filter.trim().to_lowercase();
        self.items
            .iter()
            .filter(move |doc| needle.is_empty() || doc.display_title().to_lowercase().contains(&needle))
    }
}

/// Parse the timestamp formats the store is known to send
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Human label for a document timestamp relative to `now`
pub fn relative_date(value: &str, now: NaiveDateTime) -> String {
    let Some(date) = parse_timestamp(value) else {
        return String::new();
    };

    let days = (now - date).num_days().abs();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        _ if date.year() == now.year() => date.format("%-d %b").to_string(),
        _ => date.format("%-d %b %Y").to_string(),
    }
}

/// Display label for the account type reported at login
pub fn account_label(user_type: &str) -> &'static str {
    match user_type {
        "premium" => "Premium account",
        "enterprise" => "Enterprise account",
        _ => "Free account",
    }
}
