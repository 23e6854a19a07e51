//! Paging for list endpoints.

/// Optional paging controls for list operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQueryOptions {
    /// Upper bound hint; the server may return fewer items.
    pub best_effort_limit: Option<u32>,
    /// Key returned by the previous page.
    pub pagination_key: Option<String>,
}

impl ListQueryOptions {
    #[must_use]
    pub fn limit(limit: u32) -> Self {
        Self {
            best_effort_limit: Some(limit),
            pagination_key: None,
        }
    }

    #[must_use]
    pub fn next_page(mut self, key: impl Into<String>) -> Self {
        self.pagination_key = Some(key.into());
        self
    }

    /// Query-string pairs (`bestEffortLimit`, `paginationKey`) for the set options.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.best_effort_limit {
            query.push(("bestEffortLimit".to_string(), limit.to_string()));
        }
        if let Some(key) = &self.pagination_key {
            query.push(("paginationKey".to_string(), key.clone()));
        }
        query
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<T> {
    pub results: Vec<T>,
    pub pagination_key: Option<String>,
}

impl<T> QueryResult<T> {
    #[must_use]
    pub fn new(results: Vec<T>, pagination_key: Option<String>) -> Self {
        Self {
            results,
            pagination_key,
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), None)
    }

    /// Whether another page can be fetched with [`pagination_key`](Self::pagination_key).
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.pagination_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_no_query_pairs_by_default() {
        assert!(ListQueryOptions::default().to_query().is_empty());
    }

    #[test]
    fn should_produce_limit_and_pagination_key() {
        let opts = ListQueryOptions::limit(10).next_page("200/2");
        assert_eq!(
            opts.to_query(),
            vec![
                ("bestEffortLimit".to_string(), "10".to_string()),
                ("paginationKey".to_string(), "200/2".to_string()),
            ]
        );
    }

    #[test]
    fn should_report_has_next_only_with_pagination_key() {
        let last: QueryResult<u8> = QueryResult::new(vec![1], None);
        assert!(!last.has_next());
        let more: QueryResult<u8> = QueryResult::new(vec![1], Some("k".into()));
        assert!(more.has_next());
        assert!(QueryResult::<u8>::empty().results.is_empty());
    }
}
