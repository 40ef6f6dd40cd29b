//! Offset-based pagination
//!
//! CacheFly list endpoints return at most `limit` records starting at
//! `offset`, together with a `meta.count` total that some endpoints leave at
//! zero. [`collect_pages`] walks such an endpoint until it is exhausted and
//! returns every record in upstream order.
//!
//! Collection is all-or-nothing: a failed page, or an elapsed timeout,
//! discards whatever was accumulated and fails the whole operation.

use std::future::Future;
use std::time::Duration;

use log::debug;

use crate::config::api;
use crate::error::{CacheFlyError, Result};

/// Filters forwarded unchanged to every page request of one collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilters {
    /// Free-text search (`search`)
    pub search: Option<String>,
    /// Status filter (`status`)
    pub status: Option<String>,
    /// Type filter (`type`)
    pub kind: Option<String>,
    /// Response shape (`responseType`, e.g. "shallow")
    pub response_type: Option<String>,
}

impl ListFilters {
    /// Query string pairs for the filters that are set, in a fixed order
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(search) = self.search.as_deref() {
            pairs.push(("search", search));
        }
        if let Some(status) = self.status.as_deref() {
            pairs.push(("status", status));
        }
        if let Some(kind) = self.kind.as_deref() {
            pairs.push(("type", kind));
        }
        if let Some(response_type) = self.response_type.as_deref() {
            pairs.push(("responseType", response_type));
        }
        pairs
    }

    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }
}

/// Options for one list operation
#[derive(Debug, Clone, PartialEq)]
pub struct ListOptions {
    /// Offset of the first record to fetch
    pub offset: u32,
    /// Records requested per page (always > 0)
    pub limit: u32,
    pub filters: ListFilters,
    /// Deadline for the whole collection, not for a single page
    pub timeout: Option<Duration>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            offset: api::DEFAULT_OFFSET,
            limit: api::DEFAULT_PAGE_SIZE,
            filters: ListFilters::default(),
            timeout: None,
        }
    }
}

impl ListOptions {
    /// Build options from user-supplied offset and limit
    ///
    /// A missing or non-positive offset starts at the beginning, a missing or
    /// non-positive limit uses the default page size.
    pub fn from_raw(offset: Option<i64>, limit: Option<i64>) -> Self {
        let offset = match offset {
            Some(o) if o > 0 => u32::try_from(o).unwrap_or(u32::MAX),
            _ => api::DEFAULT_OFFSET,
        };
        let limit = match limit {
            Some(l) if l > 0 => u32::try_from(l).unwrap_or(u32::MAX),
            _ => api::DEFAULT_PAGE_SIZE,
        };

        Self {
            offset,
            limit,
            ..Self::default()
        }
    }

    pub fn with_filters(mut self, filters: ListFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// One page request handed to the page-fetching capability
#[derive(Debug, Clone, Copy)]
pub struct PageRequest<'a> {
    pub offset: u32,
    pub limit: u32,
    pub filters: &'a ListFilters,
}

/// One page returned by the upstream
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total reported by the server; 0 means unknown
    pub total: u32,
}

/// Result of a finished collection
#[derive(Debug, Clone)]
pub struct Collected<T> {
    pub items: Vec<T>,
    /// First non-zero total reported by the server, or 0 if none was
    pub total: u32,
}

/// Collect every record of a paginated listing
///
/// `fetch_page` is called with strictly increasing offsets, one request at a
/// time, each advancing by the number of records the previous page returned.
/// Collection stops on an empty page, on a short page (fewer than `limit`
/// records), or once the offset reaches a known non-zero total.
///
/// `context` names what is being listed and ends up in error messages.
pub async fn collect_pages<'a, T, F, Fut>(
    options: &'a ListOptions,
    context: &str,
    fetch_page: F,
) -> Result<Collected<T>>
where
    F: FnMut(PageRequest<'a>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    match options.timeout {
        Some(deadline) => tokio::time::timeout(deadline, run_collection(options, context, fetch_page))
            .await
            .map_err(|_| CacheFlyError::Timeout(context.to_string()))?,
        None => run_collection(options, context, fetch_page).await,
    }
}

async fn run_collection<'a, T, F, Fut>(
    options: &'a ListOptions,
    context: &str,
    mut fetch_page: F,
) -> Result<Collected<T>>
where
    F: FnMut(PageRequest<'a>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut accumulated: Vec<T> = Vec::new();
    let mut offset = options.offset;
    let mut total = 0u32;
    let mut pages = 0u32;

    loop {
        let request = PageRequest {
            offset,
            limit: options.limit,
            filters: &options.filters,
        };

        let page = fetch_page(request)
            .await
            .map_err(|e| CacheFlyError::FetchFailed {
                context: context.to_string(),
                offset,
                source: Box::new(e),
            })?;
        pages += 1;

        if total == 0 {
            total = page.total;
        }

        let fetched = page.items.len();
        accumulated.extend(page.items);
        offset = offset.saturating_add(u32::try_from(fetched).unwrap_or(u32::MAX));

        debug!(
            "{}: page {} returned {} items (offset now {}, total {})",
            context, pages, fetched, offset, total
        );

        if is_last_page(fetched, options.limit, offset, total) {
            break;
        }
    }

    debug!(
        "Collected {} {} in {} page(s)",
        accumulated.len(),
        context,
        pages
    );

    Ok(Collected {
        items: accumulated,
        total,
    })
}

/// Termination check applied after every page
fn is_last_page(fetched: usize, limit: u32, offset: u32, total: u32) -> bool {
    fetched == 0 || fetched < limit as usize || (total > 0 && offset >= total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::future::ready;

    /// In-memory upstream that honours offset/limit and records every request
    struct FakeUpstream {
        records: Vec<u32>,
        reported_total: u32,
        calls: Vec<(u32, u32, ListFilters)>,
    }

    impl FakeUpstream {
        fn new(count: u32, reported_total: u32) -> Self {
            Self {
                records: (1..=count).collect(),
                reported_total,
                calls: Vec::new(),
            }
        }

        fn page(&mut self, request: PageRequest<'_>) -> Result<Page<u32>> {
            self.calls
                .push((request.offset, request.limit, request.filters.clone()));
            let start = (request.offset as usize).min(self.records.len());
            let end = (start + request.limit as usize).min(self.records.len());
            Ok(Page {
                items: self.records[start..end].to_vec(),
                total: self.reported_total,
            })
        }
    }

    fn options(limit: i64) -> ListOptions {
        ListOptions::from_raw(None, Some(limit))
    }

    fn page(items: &[u32], total: u32) -> Result<Page<u32>> {
        Ok(Page {
            items: items.to_vec(),
            total,
        })
    }

    #[test]
    fn test_from_raw_defaults() {
        let opts = ListOptions::from_raw(None, None);
        assert_eq!(opts.offset, 0);
        assert_eq!(opts.limit, api::DEFAULT_PAGE_SIZE);
        assert!(opts.filters.is_empty());
        assert!(opts.timeout.is_none());
    }

    #[test]
    fn test_from_raw_non_positive_values_use_defaults() {
        let opts = ListOptions::from_raw(Some(-5), Some(0));
        assert_eq!(opts.offset, 0);
        assert_eq!(opts.limit, 100);

        let opts = ListOptions::from_raw(Some(0), Some(-1));
        assert_eq!(opts.offset, 0);
        assert_eq!(opts.limit, 100);
    }

    #[test]
    fn test_from_raw_keeps_positive_values() {
        let opts = ListOptions::from_raw(Some(40), Some(25));
        assert_eq!(opts.offset, 40);
        assert_eq!(opts.limit, 25);
    }

    #[test]
    fn test_query_pairs_order_and_skipping() {
        let filters = ListFilters {
            search: Some("cdn".to_string()),
            status: None,
            kind: Some("WEB".to_string()),
            response_type: Some("shallow".to_string()),
        };
        assert_eq!(
            filters.query_pairs(),
            vec![("search", "cdn"), ("type", "WEB"), ("responseType", "shallow")]
        );
    }

    #[test]
    fn test_is_last_page() {
        assert!(is_last_page(0, 10, 0, 0));
        assert!(is_last_page(3, 10, 3, 0));
        assert!(is_last_page(10, 10, 20, 20));
        assert!(!is_last_page(10, 10, 10, 0));
        assert!(!is_last_page(10, 10, 10, 25));
    }

    #[tokio::test]
    async fn test_example_five_records_limit_two() {
        let mut upstream = FakeUpstream::new(5, 5);
        let opts = options(2);

        let collected = collect_pages(&opts, "numbers", |req| ready(upstream.page(req)))
            .await
            .unwrap();

        assert_eq!(collected.items, vec![1, 2, 3, 4, 5]);
        assert_eq!(collected.total, 5);
        let offsets: Vec<u32> = upstream.calls.iter().map(|c| c.0).collect();
        assert_eq!(offsets, vec![0, 2, 4]);
        assert!(upstream.calls.iter().all(|c| c.1 == 2));
    }

    #[tokio::test]
    async fn test_total_based_termination_exact_multiple() {
        // 6 records, limit 3: the total stops the loop without an empty page
        let mut upstream = FakeUpstream::new(6, 6);
        let opts = options(3);

        let collected = collect_pages(&opts, "numbers", |req| ready(upstream.page(req)))
            .await
            .unwrap();

        assert_eq!(collected.items.len(), 6);
        assert_eq!(upstream.calls.len(), 2);
    }

    #[tokio::test]
    async fn test_total_based_termination_ceil() {
        for (total, limit) in [(7u32, 3i64), (1, 100), (250, 100), (9, 1)] {
            let mut upstream = FakeUpstream::new(total, total);
            let opts = options(limit);

            let collected = collect_pages(&opts, "numbers", |req| ready(upstream.page(req)))
                .await
                .unwrap();

            let expected_calls = (total as usize).div_ceil(limit as usize);
            assert_eq!(collected.items.len(), total as usize);
            assert_eq!(upstream.calls.len(), expected_calls);
        }
    }

    #[tokio::test]
    async fn test_unknown_total_full_last_page_needs_empty_page() {
        // 4 records, limit 2, no total: third request sees the empty page
        let mut upstream = FakeUpstream::new(4, 0);
        let opts = options(2);

        let collected = collect_pages(&opts, "numbers", |req| ready(upstream.page(req)))
            .await
            .unwrap();

        assert_eq!(collected.items, vec![1, 2, 3, 4]);
        assert_eq!(collected.total, 0);
        assert_eq!(upstream.calls.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_total_short_page_terminates() {
        let mut upstream = FakeUpstream::new(5, 0);
        let opts = options(2);

        let collected = collect_pages(&opts, "numbers", |req| ready(upstream.page(req)))
            .await
            .unwrap();

        assert_eq!(collected.items.len(), 5);
        assert_eq!(upstream.calls.len(), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_on_nth_empty_page() {
        let mut script: VecDeque<Result<Page<u32>>> = VecDeque::from(vec![
            page(&[1, 2], 0),
            page(&[3, 4], 0),
            page(&[5, 6], 0),
            page(&[], 0),
            page(&[99], 0),
        ]);
        let mut calls = 0;
        let opts = options(2);

        let collected = collect_pages(&opts, "numbers", |_req| {
            calls += 1;
            ready(script.pop_front().unwrap())
        })
        .await
        .unwrap();

        assert_eq!(calls, 4);
        assert_eq!(collected.items, vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn test_offsets_advance_by_returned_count() {
        // A short-but-not-last page is impossible with the short-page rule,
        // so use a large limit and check offsets follow the item counts.
        let mut script: VecDeque<Result<Page<u32>>> = VecDeque::from(vec![
            page(&[1, 2, 3], 10),
            page(&[4, 5, 6], 10),
            page(&[7, 8, 9], 10),
            page(&[10], 10),
        ]);
        let mut offsets = Vec::new();
        let opts = options(3);

        let collected = collect_pages(&opts, "numbers", |req| {
            offsets.push(req.offset);
            ready(script.pop_front().unwrap())
        })
        .await
        .unwrap();

        assert_eq!(offsets, vec![0, 3, 6, 9]);
        assert_eq!(collected.items.len(), 10);
    }

    #[tokio::test]
    async fn test_initial_offset_is_honoured() {
        let mut upstream = FakeUpstream::new(10, 10);
        let opts = ListOptions::from_raw(Some(6), Some(2));

        let collected = collect_pages(&opts, "numbers", |req| ready(upstream.page(req)))
            .await
            .unwrap();

        assert_eq!(collected.items, vec![7, 8, 9, 10]);
        let offsets: Vec<u32> = upstream.calls.iter().map(|c| c.0).collect();
        assert_eq!(offsets, vec![6, 8]);
    }

    #[tokio::test]
    async fn test_error_short_circuits() {
        let mut script: VecDeque<Result<Page<u32>>> = VecDeque::from(vec![
            page(&[1, 2], 6),
            Err(CacheFlyError::Api {
                status: 500,
                message: "Internal error".to_string(),
            }),
            page(&[5, 6], 6),
        ]);
        let mut calls = 0;
        let opts = options(2);

        let result = collect_pages(&opts, "log targets", |_req| {
            calls += 1;
            ready(script.pop_front().unwrap())
        })
        .await;

        assert_eq!(calls, 2);
        match result {
            Err(CacheFlyError::FetchFailed {
                context,
                offset,
                source,
            }) => {
                assert_eq!(context, "log targets");
                assert_eq!(offset, 2);
                assert!(source.to_string().contains("Internal error"));
            }
            other => panic!("Expected FetchFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_on_first_page() {
        let opts = options(2);
        let result: Result<Collected<u32>> = collect_pages(&opts, "users", |_req| {
            ready(Err(CacheFlyError::Api {
                status: 401,
                message: "Unauthorized".to_string(),
            }))
        })
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().contains("offset 0"));
    }

    #[tokio::test]
    async fn test_filters_passed_unchanged() {
        let mut upstream = FakeUpstream::new(7, 7);
        let filters = ListFilters {
            search: Some("edge".to_string()),
            status: Some("ACTIVE".to_string()),
            kind: None,
            response_type: None,
        };
        let opts = options(2).with_filters(filters.clone());

        collect_pages(&opts, "services", |req| ready(upstream.page(req)))
            .await
            .unwrap();

        assert_eq!(upstream.calls.len(), 4);
        assert!(upstream.calls.iter().all(|c| c.2 == filters));
    }

    #[tokio::test]
    async fn test_empty_first_page() {
        let mut upstream = FakeUpstream::new(0, 0);
        let opts = options(50);

        let collected = collect_pages(&opts, "origins", |req| ready(upstream.page(req)))
            .await
            .unwrap();

        assert!(collected.items.is_empty());
        assert_eq!(collected.total, 0);
        assert_eq!(upstream.calls.len(), 1);
    }

    #[tokio::test]
    async fn test_stale_total_larger_than_data() {
        // Server claims 10 but only has 3: the short page ends the loop
        let mut upstream = FakeUpstream::new(3, 10);
        let opts = options(5);

        let collected = collect_pages(&opts, "numbers", |req| ready(upstream.page(req)))
            .await
            .unwrap();

        assert_eq!(collected.items.len(), 3);
        assert_eq!(collected.total, 10);
        assert_eq!(upstream.calls.len(), 1);
    }

    #[tokio::test]
    async fn test_first_non_zero_total_is_kept() {
        let mut script: VecDeque<Result<Page<u32>>> = VecDeque::from(vec![
            page(&[1, 2], 0),
            page(&[3, 4], 6),
            page(&[5, 6], 4),
        ]);
        let opts = options(2);

        let collected = collect_pages(&opts, "numbers", |_req| ready(script.pop_front().unwrap()))
            .await
            .unwrap();

        assert_eq!(collected.items.len(), 6);
        assert_eq!(collected.total, 6);
    }

    #[tokio::test]
    async fn test_timeout_discards_partial_results() {
        let opts = options(1).with_timeout(Duration::from_millis(20));

        let result: Result<Collected<u32>> = collect_pages(&opts, "services", |req| {
            let offset = req.offset;
            async move {
                tokio::time::sleep(Duration::from_millis(15)).await;
                Ok(Page {
                    items: vec![offset],
                    total: 0,
                })
            }
        })
        .await;

        match result {
            Err(CacheFlyError::Timeout(context)) => assert_eq!(context, "services"),
            other => panic!("Expected Timeout, got {:?}", other),
        }
    }
}
