//! Filter predicates applied to product queries.

/// Comparison operator for a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Equal,
    LessThan,
}

impl std::fmt::Display for FilterOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterOp::Equal => write!(f, "="),
            FilterOp::LessThan => write!(f, "<"),
        }
    }
}

/// A single key/operator/value predicate restricting a product query.
///
/// Filters are built per request, never persisted, and composed conjunctively
/// by the storage layer in the order supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub key: String,
    pub value: String,
    pub op: FilterOp,
}

impl Filter {
    #[must_use]
    pub fn equal(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            op: FilterOp::Equal,
        }
    }

    #[must_use]
    pub fn less_than(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            op: FilterOp::LessThan,
        }
    }
}
