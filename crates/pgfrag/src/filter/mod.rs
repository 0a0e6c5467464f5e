//! Criteria filters rendered as `WHERE` fragments.
//!
//! Each criteria type declares one ordered table of [`FilterField`]s. The
//! table is the single source of truth for which keys are recognized, what
//! predicate each one emits and in which order predicates appear;
//! [`build_filter`] walks it once.
//!
//! # Example
//!
//! ```ignore
//! use pgfrag::{ColumnMapping, CompanyFilter, Criteria};
//!
//! let filter: CompanyFilter = serde_json::from_str(r#"{"maxEmployees": 500}"#)?;
//! let frag = filter.build(&ColumnMapping::new())?;
//! assert_eq!(frag.fragment, "WHERE num_employees < $1");
//! ```

mod company;
mod job;


pub use company::CompanyFilter;
pub use job::JobFilter;

use crate::error::FragResult;
use crate::fragment::QueryFragment;
use crate::mapping::ColumnMapping;
use crate::param::Bindings;
use crate::trace;
use crate::value::Value;

/// Comparison operator of a filter predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    /// Case-insensitive LIKE (PostgreSQL ILIKE)
    Ilike,
}

impl CompareOp {
    /// SQL operator text.
    pub fn as_sql(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Ilike => "ILIKE",
        }
    }
}

/// One recognized criteria key and the predicate it produces.
pub struct FilterField<C> {
    /// Criteria key as it appears in the request (`nameLike`).
    pub key: &'static str,
    /// Logical field looked up in the [`ColumnMapping`].
    pub field: &'static str,
    /// Column used when the mapping has no entry for `field`.
    pub column: &'static str,
    pub op: CompareOp,
    /// Bound value for this key, or `None` when the key imposes no constraint.
    pub value: fn(&C) -> Option<Value>,
}

impl<C> std::fmt::Debug for FilterField<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterField")
            .field("key", &self.key)
            .field("field", &self.field)
            .field("column", &self.column)
            .field("op", &self.op)
            .finish()
    }
}

/// A criteria object with a fixed, closed set of recognized keys.
pub trait Criteria: Sized + 'static {
    /// Builder name used in log events.
    const NAME: &'static str;

    /// Recognized keys in evaluation order.
    const FIELDS: &'static [FilterField<Self>];

    /// Cross-field checks, run before any predicate is built.
    fn validate(&self) -> FragResult<()> {
        Ok(())
    }

    /// Recognized criteria keys in evaluation order.
    fn recognized_keys() -> impl Iterator<Item = &'static str> {
        Self::FIELDS.iter().map(|f| f.key)
    }

    /// Render this criteria object as a `WHERE` fragment.
    fn build(&self, mapping: &ColumnMapping) -> FragResult<QueryFragment> {
        build_filter(self, mapping)
    }
}

/// Build the `WHERE` fragment for `criteria`.
///
/// Keys are visited in [`Criteria::FIELDS`] order; each present key adds one
/// predicate whose placeholder index is the value count after binding it.
/// With no present keys the fragment is empty so the caller can omit the
/// clause entirely.
pub fn build_filter<C: Criteria>(criteria: &C, mapping: &ColumnMapping) -> FragResult<QueryFragment> {
    match render(criteria, mapping) {
        Ok(frag) => {
            trace::built(C::NAME, &frag);
            Ok(frag)
        }
        Err(err) => {
            trace::rejected(C::NAME, &err);
            Err(err)
        }
    }
}

fn render<C: Criteria>(criteria: &C, mapping: &ColumnMapping) -> FragResult<QueryFragment> {
    criteria.validate()?;

    let mut present = Vec::new();
    for entry in C::FIELDS {
        if let Some(value) = (entry.value)(criteria) {
            present.push((mapping.column_or(entry.field, entry.column)?, entry.op, value));
        }
    }
    if present.is_empty() {
        return Ok(QueryFragment::empty());
    }

    let mut bindings = Bindings::new();
    let predicates: Vec<String> = present
        .into_iter()
        .map(|(column, op, value)| format!("{column} {} {}", op.as_sql(), bindings.bind(value)))
        .collect();

    Ok(QueryFragment::new(format!("WHERE {}", predicates.join(" AND ")), bindings))
}

/// Wrap a search term for a case-insensitive substring match.
pub(crate) fn contains_pattern(term: &str) -> Value {
    Value::Text(format!("%{term}%"))
}
