use crate::constants::{DEFAULT_PAGE, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use crate::marshal::wire_enum;
use crate::time::Timestamp;

wire_enum! {
    /// Ordering of list results by creation time.
    pub enum SortOrder as "sort order" {
        Ascending => "asc",
        Descending => "desc",
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Ascending
    }
}

/// Filter and paging parameters accepted by every list operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page index
    pub page: u32,
    /// Page size, clamped to `1..=MAX_PAGE_LIMIT` when sent
    pub limit: u32,
    pub created_before: Option<Timestamp>,
    pub created_after: Option<Timestamp>,
    pub updated_before: Option<Timestamp>,
    pub updated_after: Option<Timestamp>,
    /// Archived records are dropped from results unless this is set
    pub include_archived: bool,
    pub sort_by: SortOrder,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_LIMIT,
            created_before: None,
            created_after: None,
            updated_before: None,
            updated_after: None,
            include_archived: false,
            sort_by: SortOrder::default(),
        }
    }
}

impl ListQuery {
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn including_archived(mut self) -> Self {
        self.include_archived = true;
        self
    }

    pub fn sorted(mut self, order: SortOrder) -> Self {
        self.sort_by = order;
        self
    }

    pub fn created_between(mut self, after: Option<Timestamp>, before: Option<Timestamp>) -> Self {
        self.created_after = after;
        self.created_before = before;
        self
    }

    pub fn updated_between(mut self, after: Option<Timestamp>, before: Option<Timestamp>) -> Self {
        self.updated_after = after;
        self.updated_before = before;
        self
    }

    /// Query string pairs in the order the server documents them.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.max(1).to_string()),
            (
                "limit".to_string(),
                self.limit.clamp(1, MAX_PAGE_LIMIT).to_string(),
            ),
        ];
        let bounds = [
            ("createdBefore", &self.created_before),
            ("createdAfter", &self.created_after),
            ("updatedBefore", &self.updated_before),
            ("updatedAfter", &self.updated_after),
        ];
        for (key, value) in bounds {
            if let Some(ts) = value {
                pairs.push((key.to_string(), ts.to_string()));
            }
        }
        pairs.push((
            "includeArchived".to_string(),
            self.include_archived.to_string(),
        ));
        pairs.push(("sortBy".to_string(), self.sort_by.to_string()));
        pairs
    }
}
