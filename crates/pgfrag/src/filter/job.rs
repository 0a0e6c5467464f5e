//! Job listing filter.

use serde::{Deserialize, Serialize};

use super::{CompareOp, Criteria, FilterField, contains_pattern};
use crate::value::Value;

/// Criteria for listing jobs.
///
/// Recognized keys: `title`, `minSalary`, `hasEquity`. `hasEquity: true`
/// keeps only jobs with non-zero equity; `false` behaves exactly like an
/// absent key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobFilter {
    pub title: Option<String>,
    pub min_salary: Option<i64>,
    pub has_equity: Option<bool>,
}

impl JobFilter {
    /// Criteria with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring match on the title.
    pub fn title(mut self, term: impl Into<String>) -> Self {
        self.title = Some(term.into());
        self
    }

    /// Salary strictly above `min`.
    pub fn min_salary(mut self, min: i64) -> Self {
        self.min_salary = Some(min);
        self
    }

    /// `true` keeps only jobs with non-zero equity.
    pub fn has_equity(mut self, has_equity: bool) -> Self {
        self.has_equity = Some(has_equity);
        self
    }
}

impl Criteria for JobFilter {
    const NAME: &'static str = "job_filter";

    const FIELDS: &'static [FilterField<Self>] = &[
        FilterField {
            key: "title",
            field: "title",
            column: "title",
            op: CompareOp::Ilike,
            value: title,
        },
        FilterField {
            key: "minSalary",
            field: "salary",
            column: "salary",
            op: CompareOp::Gt,
            value: min_salary,
        },
        FilterField {
            key: "hasEquity",
            field: "equity",
            column: "equity",
            op: CompareOp::Gt,
            value: has_equity,
        },
    ];
}

fn title(j: &JobFilter) -> Option<Value> {
    j.title.as_deref().map(contains_pattern)
}

fn min_salary(j: &JobFilter) -> Option<Value> {
    j.min_salary.map(Value::Int)
}

fn has_equity(j: &JobFilter) -> Option<Value> {
    (j.has_equity == Some(true)).then_some(Value::Int(0))
}
