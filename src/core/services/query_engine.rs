use std::collections::BTreeSet;

use crate::core::errors::Result;
use crate::core::models::event_record::EventRecord;
use crate::core::models::query::{FilterSpec, PageRequest, QueryResult};
use crate::core::traits::event_store::EventSource;

/// Filters, sorts and paginates activity log records in memory.
///
/// Stateless: every call works only on the records it is handed, so the
/// same inputs always produce the same page.
pub struct QueryEngine;

impl QueryEngine {
    /// Run a query over an already-read sequence of records.
    ///
    /// - **Filter**: every present dimension of `filter` must match.
    /// - **Sort**: newest `timestamp` first. Records sharing a timestamp
    ///   keep reverse input order, so the later-appended one comes first.
    /// - **Page**: `total_count` is taken before slicing; a page past the
    ///   end is empty rather than an error.
    pub fn query<I>(&self, records: I, filter: &FilterSpec, page: PageRequest) -> QueryResult
    where
        I: IntoIterator<Item = EventRecord>,
    {
        let mut matched: Vec<(usize, EventRecord)> = records
            .into_iter()
            .enumerate()
            .filter(|(_, record)| filter.matches(record))
            .collect();

        matched.sort_by(|(pos_a, a), (pos_b, b)| {
            b.timestamp.cmp(&a.timestamp).then(pos_b.cmp(pos_a))
        });

        let total_count = matched.len();
        let total_pages = total_count.div_ceil(page.page_size());

        let records = matched
            .into_iter()
            .skip(page.offset())
            .take(page.page_size())
            .map(|(_, record)| record)
            .collect();

        QueryResult {
            records,
            total_count,
            total_pages,
            page: page.page(),
            page_size: page.page_size(),
        }
    }

    /// Read everything from `source`, then run [`QueryEngine::query`].
    ///
    /// Storage failures abort the query; no partial page is returned.
    pub fn query_source(
        &self,
        source: &dyn EventSource,
        filter: &FilterSpec,
        page: PageRequest,
    ) -> Result<QueryResult> {
        let records = source.records()?.collect::<Result<Vec<_>>>()?;
        Ok(self.query(records, filter, page))
    }

    /// Sorted, de-duplicated action names present in `source`.
    pub fn distinct_actions(&self, source: &dyn EventSource) -> Result<Vec<String>> {
        let mut actions = BTreeSet::new();
        for record in source.records()? {
            actions.insert(record?.action);
        }
        Ok(actions.into_iter().collect())
    }
}
