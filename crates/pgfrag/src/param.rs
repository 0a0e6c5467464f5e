//! Placeholder-index bookkeeping shared by all builders.

use tokio_postgres::types::ToSql;

use crate::value::Value;

/// Render the positional placeholder for a 1-based index.
pub fn placeholder(index: usize) -> String {
    format!("${index}")
}

/// Ordered list of bound values.
///
/// A value's placeholder index is the list length right after it was pushed,
/// so indices stay 1-based and contiguous no matter which inputs were skipped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bindings {
    values: Vec<Value>,
}

impl Bindings {
    /// Create an empty list.
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Add a value and return its 1-based index.
    pub fn push(&mut self, value: impl Into<Value>) -> usize {
        self.values.push(value.into());
        self.values.len()
    }

    /// Add a value and return its rendered placeholder (`$n`).
    pub fn bind(&mut self, value: impl Into<Value>) -> String {
        placeholder(self.push(value))
    }

    /// Number of bound values, which is also the last placeholder index.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing has been bound yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in placeholder order.
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    /// Consume the list, returning values in placeholder order.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Get all values as references for tokio-postgres.
    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.values.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
    }
}

/// Count `$<digits>` markers in `sql` that are not part of an identifier.
///
/// Text inside `"..."` identifiers and `'...'` literals is skipped, so a
/// quoted column such as `"price $1"` contributes nothing.
pub fn count_placeholders(sql: &str) -> usize {
    let bytes = sql.as_bytes();
    let mut count = 0;
    let mut quote = None;
    for (i, &b) in bytes.iter().enumerate() {
        // A doubled quote closes and reopens, which leaves the state unchanged.
        match quote {
            Some(open) if b == open => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'$' => {
                let in_ident = i > 0 && {
                    let prev = bytes[i - 1];
                    prev == b'_' || prev == b'$' || prev.is_ascii_alphanumeric()
                };
                let has_digit = bytes.get(i + 1).is_some_and(u8::is_ascii_digit);
                if has_digit && !in_ident {
                    count += 1;
                }
            }
            None => {}
        }
    }
    count
}
