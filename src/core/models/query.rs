use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use super::event_record::EventRecord;
use crate::core::errors::{LogError, Result};

/// Page size used when neither the caller nor config.toml sets one.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Optional predicates applied before pagination. All present fields are
/// ANDed; an absent field places no constraint on its dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    /// Case-insensitive substring over action, user id, IP and details.
    pub search: Option<String>,
    /// Exact match on `action`.
    pub action: Option<String>,
    /// Inclusive lower bound, from 00:00:00 on this day.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound, up to 23:59:59 on this day.
    pub date_to: Option<NaiveDate>,
}

impl FilterSpec {
    /// Build a filter, treating blank text fields as absent.
    pub fn new(
        search: Option<&str>,
        action: Option<&str>,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Self {
        Self {
            search: non_blank(search),
            action: non_blank(action),
            date_from,
            date_to,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.action.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    /// Whether `record` passes every present filter dimension.
    pub fn matches(&self, record: &EventRecord) -> bool {
        if let Some(action) = &self.action
            && record.action != *action
        {
            return false;
        }

        if let Some(from) = self.date_from
            && record.timestamp < from.and_time(NaiveTime::default())
        {
            return false;
        }

        if let Some(to) = self.date_to
            && record.timestamp > to.and_time(end_of_day())
        {
            return false;
        }

        if let Some(search) = &self.search
            && !record.search_haystack().contains(&search.to_lowercase())
        {
            return false;
        }

        true
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or_default()
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Which slice of the filtered, sorted records to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

impl PageRequest {
    /// Validate a page request coming from the presentation layer.
    ///
    /// A page below 1 is clamped to 1. A page size of zero or less is a
    /// caller contract violation.
    pub fn new(page: i64, page_size: i64) -> Result<Self> {
        if page_size <= 0 {
            return Err(LogError::InvalidArgument {
                detail: format!("page size must be greater than zero, got {page_size}"),
            });
        }

        Ok(Self {
            page: usize::try_from(page.max(1)).unwrap_or(usize::MAX),
            page_size: usize::try_from(page_size).unwrap_or(usize::MAX),
        })
    }

    /// 1-based page number.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Zero-based index of the first record on this page. Saturates
    /// instead of overflowing for absurd page numbers.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of matching records, newest first, plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub records: Vec<EventRecord>,
    /// Number of records passing the filter, before slicing.
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::event_record::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;

    fn record(ts: &str, action: &str) -> EventRecord {
        EventRecord::new(
            NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).unwrap(),
            action,
        )
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn blank_text_filters_are_absent() {
        let filter = FilterSpec::new(Some("   "), Some(""), None, None);
        assert!(filter.is_empty());
    }

    #[test]
    fn text_filters_are_trimmed() {
        let filter = FilterSpec::new(Some(" 192.168 "), Some(" login_success\n"), None, None);
        assert_eq!(filter.search.as_deref(), Some("192.168"));
        assert_eq!(filter.action.as_deref(), Some("login_success"));
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(FilterSpec::default().matches(&record("1999-12-31 23:59:59", "anything")));
    }

    #[test]
    fn action_filter_is_exact_and_case_sensitive() {
        let filter = FilterSpec::new(None, Some("login"), None, None);
        assert!(filter.matches(&record("2024-01-01 10:00:00", "login")));
        assert!(!filter.matches(&record("2024-01-01 10:00:00", "login_success")));
        assert!(!filter.matches(&record("2024-01-01 10:00:00", "LOGIN")));
    }

    #[test]
    fn date_bounds_cover_whole_days() {
        let filter = FilterSpec::new(None, None, Some(day("2024-01-02")), Some(day("2024-01-04")));

        assert!(!filter.matches(&record("2024-01-01 23:59:59", "x")));
        assert!(filter.matches(&record("2024-01-02 00:00:00", "x")));
        assert!(filter.matches(&record("2024-01-04 23:59:59", "x")));
        assert!(!filter.matches(&record("2024-01-05 00:00:00", "x")));
    }

    #[test]
    fn inverted_date_range_matches_nothing() {
        let filter = FilterSpec::new(None, None, Some(day("2024-01-05")), Some(day("2024-01-01")));
        assert!(!filter.matches(&record("2024-01-03 12:00:00", "x")));
    }

    #[test]
    fn search_is_case_insensitive() {
        let mut r = record("2024-01-01 10:00:00", "complaint_resolved");
        r.ip_address = Some("192.168.0.4".into());

        assert!(FilterSpec::new(Some("COMPLAINT"), None, None, None).matches(&r));
        assert!(FilterSpec::new(Some("192.168"), None, None, None).matches(&r));
        assert!(!FilterSpec::new(Some("inventory"), None, None, None).matches(&r));
    }

    #[test]
    fn search_does_not_look_at_user_agent() {
        let mut r = record("2024-01-01 10:00:00", "login_success");
        r.user_agent = Some("Firefox".into());

        assert!(!FilterSpec::new(Some("firefox"), None, None, None).matches(&r));
    }

    #[test]
    fn page_request_rejects_non_positive_size() {
        assert!(matches!(
            PageRequest::new(1, 0),
            Err(LogError::InvalidArgument { .. })
        ));
        assert!(matches!(
            PageRequest::new(1, -5),
            Err(LogError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn page_request_clamps_page_to_one() {
        let req = PageRequest::new(-3, 10).unwrap();
        assert_eq!(req.page(), 1);
        assert_eq!(req.offset(), 0);

        assert_eq!(PageRequest::new(0, 10).unwrap().page(), 1);
    }

    #[test]
    fn page_request_offset() {
        assert_eq!(PageRequest::new(3, 20).unwrap().offset(), 40);
        assert_eq!(PageRequest::new(i64::MAX, i64::MAX).unwrap().offset(), usize::MAX);
    }

    #[test]
    fn default_page_request() {
        let req = PageRequest::default();
        assert_eq!(req.page(), 1);
        assert_eq!(req.page_size(), DEFAULT_PAGE_SIZE);
    }
}
