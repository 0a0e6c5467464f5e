//! Company listing filter.

use serde::{Deserialize, Serialize};

use super::{CompareOp, Criteria, FilterField, contains_pattern};
use crate::error::{FragError, FragResult};
use crate::value::Value;

/// Criteria for listing companies.
///
/// Recognized keys: `nameLike`, `minEmployees`, `maxEmployees`. Both bounds
/// are exclusive. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyFilter {
    pub name_like: Option<String>,
    pub min_employees: Option<i64>,
    pub max_employees: Option<i64>,
}

impl CompanyFilter {
    /// Criteria with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring match on the name.
    pub fn name_like(mut self, term: impl Into<String>) -> Self {
        self.name_like = Some(term.into());
        self
    }

    /// Strictly more than `min` employees.
    pub fn min_employees(mut self, min: i64) -> Self {
        self.min_employees = Some(min);
        self
    }

    /// Strictly fewer than `max` employees.
    pub fn max_employees(mut self, max: i64) -> Self {
        self.max_employees = Some(max);
        self
    }
}

impl Criteria for CompanyFilter {
    const NAME: &'static str = "company_filter";

    const FIELDS: &'static [FilterField<Self>] = &[
        FilterField {
            key: "nameLike",
            field: "name",
            column: "name",
            op: CompareOp::Ilike,
            value: name_like,
        },
        FilterField {
            key: "minEmployees",
            field: "numEmployees",
            column: "num_employees",
            op: CompareOp::Gt,
            value: min_employees,
        },
        FilterField {
            key: "maxEmployees",
            field: "numEmployees",
            column: "num_employees",
            op: CompareOp::Lt,
            value: max_employees,
        },
    ];

    fn validate(&self) -> FragResult<()> {
        match (self.min_employees, self.max_employees) {
            (Some(min), Some(max)) if min > max => Err(FragError::InvalidRange { min, max }),
            _ => Ok(()),
        }
    }
}

fn name_like(c: &CompanyFilter) -> Option<Value> {
    c.name_like.as_deref().map(contains_pattern)
}

fn min_employees(c: &CompanyFilter) -> Option<Value> {
    c.min_employees.map(Value::Int)
}

fn max_employees(c: &CompanyFilter) -> Option<Value> {
    c.max_employees.map(Value::Int)
}
