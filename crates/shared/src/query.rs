//! Read-query model for the remote store: which collection, which columns and
//! which ordering, rendered in the PostgREST query-string dialect.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.field, self.direction.as_str())
    }
}

/// A whole-collection read: every column, one ordering field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionQuery {
    pub collection: String,
    pub order: OrderBy,
}

impl CollectionQuery {
    pub fn new(collection: impl Into<String>, order: OrderBy) -> Self {
        Self {
            collection: collection.into(),
            order,
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![("select", "*".to_string()), ("order", self.order.to_string())]
    }
}
