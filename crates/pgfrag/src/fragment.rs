//! The common builder result.

use std::fmt;

use tokio_postgres::types::ToSql;

use crate::param::{Bindings, count_placeholders, placeholder};
use crate::value::Value;

/// A parameterized SQL fragment and its ordered bind values.
///
/// The fragment references every value by position (`$1..$n`), and
/// `values.len()` equals the number of placeholders. An empty fragment means
/// the builder had nothing to emit.
///
/// # Example
/// ```ignore
/// let (set_cols, mut values) = pgfrag::partial_update(data, &mapping)?.into_parts();
/// let handle_idx = pgfrag::placeholder(values.len() + 1);
/// values.push(handle.into());
/// let sql = format!("UPDATE companies SET {set_cols} WHERE handle = {handle_idx}");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryFragment {
    pub fragment: String,
    pub values: Vec<Value>,
}

impl QueryFragment {
    pub(crate) fn new(fragment: String, bindings: Bindings) -> Self {
        Self {
            fragment,
            values: bindings.into_values(),
        }
    }

    /// A fragment with no text and no values.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the fragment has no text.
    pub fn is_empty(&self) -> bool {
        self.fragment.is_empty()
    }

    /// The fragment text.
    pub fn as_str(&self) -> &str {
        &self.fragment
    }

    /// The fragment text, or `None` when there is no filter to apply.
    pub fn where_clause(&self) -> Option<&str> {
        (!self.is_empty()).then_some(self.fragment.as_str())
    }

    /// Index the caller should use for the next value appended after this fragment.
    pub fn next_index(&self) -> usize {
        self.values.len() + 1
    }

    /// Rendered form of [`next_index`](Self::next_index), e.g. `$3`.
    pub fn next_placeholder(&self) -> String {
        placeholder(self.next_index())
    }

    /// Number of placeholder markers in the fragment text.
    pub fn placeholder_count(&self) -> usize {
        count_placeholders(&self.fragment)
    }

    /// Get all values as references for tokio-postgres.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.values.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
    }

    /// Split into the fragment text and its values.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.fragment, self.values)
    }
}

impl fmt::Display for QueryFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fragment)
    }
}
