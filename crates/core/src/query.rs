//! OData-style list queries
//!
//! A [`Query`] carries only what the caller supplied. Absent parameters
//! are omitted from the query string, never defaulted.
//!
//! | Field | Parameter | Format |
//! |-------|-----------|--------|
//! | `filter` | `$filter` | passed through |
//! | `select` | `$select` | comma-joined field names |
//! | `order_by` | `$orderby` | passed through |
//! | `top` | `$top` | decimal |
//!
//! Values are not percent-encoded here; the transport encodes them when
//! it builds the request URL.

/// Parameters of a list query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// `$filter` expression
    pub filter: Option<String>,
    /// `$select` field list
    pub select: Option<Vec<String>>,
    /// `$orderby` expression
    pub order_by: Option<String>,
    /// `$top` row limit
    pub top: Option<u32>,
}

impl Query {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `$filter` expression
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Set the `$select` field list
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Set the `$orderby` expression
    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    /// Set the `$top` row limit
    pub fn top(mut self, top: u32) -> Self {
        self.top = Some(top);
        self
    }

    /// Check whether no parameter is set
    pub fn is_empty(&self) -> bool {
        self.params().is_empty()
    }

    /// Parameters in emission order
    ///
    /// An empty `select` list is treated as absent.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(4);
        if let Some(filter) = &self.filter {
            params.push(("$filter", filter.clone()));
        }
        if let Some(select) = self.select.as_ref().filter(|s| !s.is_empty()) {
            params.push(("$select", select.join(",")));
        }
        if let Some(order_by) = &self.order_by {
            params.push(("$orderby", order_by.clone()));
        }
        if let Some(top) = self.top {
            params.push(("$top", top.to_string()));
        }
        params
    }

    /// Query string without the leading `?`
    pub fn to_query_string(&self) -> String {
        self.params()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}
