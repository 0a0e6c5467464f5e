//! Logical field name → physical column name aliases.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::FragResult;
use crate::ident::Ident;

/// Alias table from API-facing field names to storage column names.
///
/// Fields without an entry resolve to themselves.
///
/// # Example
/// ```ignore
/// let mapping = ColumnMapping::new().with("firstName", "first_name");
/// assert_eq!(mapping.resolve("firstName"), "first_name");
/// assert_eq!(mapping.resolve("age"), "age");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping {
    columns: BTreeMap<String, String>,
}

impl ColumnMapping {
    /// Create an empty (identity) mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an alias (builder style).
    pub fn with(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.insert(field, column);
        self
    }

    /// Add or replace the alias for `field`.
    pub fn insert(&mut self, field: impl Into<String>, column: impl Into<String>) {
        self.columns.insert(field.into(), column.into());
    }

    /// Aliases for the `companies` table.
    pub fn companies() -> Self {
        Self::new()
            .with("numEmployees", "num_employees")
            .with("logoUrl", "logo_url")
    }

    /// Aliases for the `jobs` table.
    pub fn jobs() -> Self {
        Self::new().with("companyHandle", "company_handle")
    }

    /// Mapped column for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.columns.get(field).map(String::as_str)
    }

    /// Column for `field`, falling back to the field name itself.
    pub fn resolve<'a>(&'a self, field: &'a str) -> &'a str {
        self.get(field).unwrap_or(field)
    }

    /// Validated SQL text of the column for `field`.
    ///
    /// A mapped column must parse as an identifier. An unmapped field is used
    /// as written when it parses, and otherwise as one quoted column name.
    pub fn column_for(&self, field: &str) -> FragResult<String> {
        let ident = match self.get(field) {
            Some(column) => Ident::parse(column)?,
            None => Ident::parse(field).or_else(|_| Ident::quoted(field))?,
        };
        Ok(ident.to_sql())
    }

    /// Validated SQL text of the column for `field`, falling back to `default`
    /// instead of the field name.
    pub fn column_or(&self, field: &str, default: &str) -> FragResult<String> {
        Ident::parse(self.get(field).unwrap_or(default)).map(|ident| ident.to_sql())
    }

    /// Number of aliases.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether every field resolves to itself.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Aliases as `(field, column)` pairs, sorted by field.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|(f, c)| (f.as_str(), c.as_str()))
    }
}

impl<F: Into<String>, C: Into<String>> FromIterator<(F, C)> for ColumnMapping {
    fn from_iter<I: IntoIterator<Item = (F, C)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (field, column) in iter {
            mapping.insert(field, column);
        }
        mapping
    }
}

impl<const N: usize> From<[(&str, &str); N]> for ColumnMapping {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FragError;

    #[test]
    fn unmapped_fields_resolve_to_themselves() {
        let mapping = ColumnMapping::from([("firstName", "first_name")]);
        assert_eq!(mapping.resolve("firstName"), "first_name");
        assert_eq!(mapping.resolve("age"), "age");
        assert_eq!(mapping.column_for("age").unwrap(), "age");
    }

    #[test]
    fn column_or_prefers_the_mapping_over_the_default() {
        let mapping = ColumnMapping::new().with("numEmployees", "headcount");
        assert_eq!(mapping.column_or("numEmployees", "num_employees").unwrap(), "headcount");
        assert_eq!(mapping.column_or("name", "name").unwrap(), "name");
    }

    #[test]
    fn hostile_names_fail_validation() {
        let mapping = ColumnMapping::new().with("x", "x; DELETE FROM jobs");
        assert!(matches!(mapping.column_for("x"), Err(FragError::InvalidIdentifier(_))));
        assert!(matches!(mapping.column_for(""), Err(FragError::InvalidIdentifier(_))));
    }

    #[test]
    fn unparseable_unmapped_fields_are_quoted() {
        let mapping = ColumnMapping::new();
        assert_eq!(mapping.column_for("first name").unwrap(), r#""first name""#);
        assert_eq!(mapping.column_for("a=1--").unwrap(), r#""a=1--""#);
        assert_eq!(mapping.column_for(r#""Logo URL""#).unwrap(), r#""Logo URL""#);
        assert_eq!(mapping.column_for("public.jobs").unwrap(), "public.jobs");
    }

    #[test]
    fn presets_match_table_columns() {
        let companies = ColumnMapping::companies();
        assert_eq!(companies.resolve("numEmployees"), "num_employees");
        assert_eq!(companies.resolve("logoUrl"), "logo_url");
        assert_eq!(companies.resolve("description"), "description");
        assert_eq!(ColumnMapping::jobs().resolve("companyHandle"), "company_handle");
    }

    #[test]
    fn deserializes_from_a_plain_json_object() {
        let mapping: ColumnMapping =
            serde_json::from_str(r#"{"numEmployees": "num_employees"}"#).unwrap();
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get("numEmployees"), Some("num_employees"));
    }
}
