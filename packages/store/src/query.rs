//! List queries: pagination, sort keys, and field-equality filters.

use serde::{Deserialize, Serialize};

/// Sort key for newest-first listings.
pub const NEWEST_FIRST: &str = "-created";

/// Default page size used by the backend when none is given.
pub const DEFAULT_PER_PAGE: u32 = 30;

/// A field-equality predicate, rendered in the backend's filter syntax.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    pub field: String,
    pub value: String,
}

impl Filter {
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// `category = "Coffee"`, with quotes and backslashes in the value escaped.
    pub fn to_expression(&self) -> String {
        let escaped = self.value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("{} = \"{}\"", self.field, escaped)
    }

    /// Whether a JSON record satisfies the predicate.
    pub fn matches(&self, record: &serde_json::Value) -> bool {
        match record.get(&self.field) {
            Some(serde_json::Value::String(s)) => *s == self.value,
            Some(other) => other.to_string() == self.value,
            None => self.value.is_empty(),
        }
    }
}

/// One request for a page of records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
    /// Sort expression such as `-created`.
    pub sort: Option<String>,
    pub filter: Option<Filter>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            sort: None,
            filter: None,
        }
    }
}

impl ListQuery {
    /// First page sorted newest first.
    pub fn newest_first() -> Self {
        Self::default().with_sort(NEWEST_FIRST)
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Query-string pairs in the backend's naming.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("perPage", self.per_page.to_string()),
        ];
        if let Some(sort) = &self.sort {
            params.push(("sort", sort.clone()));
        }
        if let Some(filter) = &self.filter {
            params.push(("filter", filter.to_expression()));
        }
        params
    }
}

/// A page of records as returned by a list call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<R> {
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub items: Vec<R>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_escapes_quotes() {
        let filter = Filter::equals("category", r#"Say "hi""#);
        assert_eq!(filter.to_expression(), r#"category = "Say \"hi\"""#);
    }

    #[test]
    fn params_include_sort_and_filter() {
        let query = ListQuery::newest_first()
            .with_per_page(50)
            .with_filter(Filter::equals("category", "Coffee"));
        let params = query.to_params();
        assert!(params.contains(&("page", "1".to_string())));
        assert!(params.contains(&("perPage", "50".to_string())));
        assert!(params.contains(&("sort", "-created".to_string())));
        assert!(params.contains(&("filter", "category = \"Coffee\"".to_string())));
    }

    #[test]
    fn filter_matches_json_fields() {
        let filter = Filter::equals("category", "Coffee");
        assert!(filter.matches(&serde_json::json!({"category": "Coffee"})));
        assert!(!filter.matches(&serde_json::json!({"category": "Tea"})));
        assert!(!filter.matches(&serde_json::json!({})));
    }
}
