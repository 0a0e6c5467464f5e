//! Partial-update `SET` fragments.

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

use crate::error::{FragError, FragResult};
use crate::fragment::QueryFragment;
use crate::mapping::ColumnMapping;
use crate::param::Bindings;
use crate::trace;
use crate::value::Value;

/// Fields to update, in insertion order.
///
/// Setting a field twice replaces its value and keeps its original position.
/// `Value::Null` is a real value: it is bound, not skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateData {
    fields: Vec<(String, Value)>,
}

impl UpdateData {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field (builder style).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Set a field, replacing an earlier value in place.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(f, _)| *f == field) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((field, value)),
        }
    }

    /// Value set for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.iter().find(|(f, _)| f == field).map(|(_, v)| v)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field has been set.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(f, v)| (f.as_str(), v))
    }

    /// Build from a JSON object, keeping its key order.
    ///
    /// Arrays and objects fail with [`FragError::NonScalar`] naming the field.
    pub fn from_json(object: serde_json::Map<String, serde_json::Value>) -> FragResult<Self> {
        let mut data = Self::new();
        for (field, json) in object {
            let Ok(value) = Value::try_from(json) else {
                return Err(FragError::NonScalar { field });
            };
            data.insert(field, value);
        }
        Ok(data)
    }
}

impl<F: Into<String>, V: Into<Value>> FromIterator<(F, V)> for UpdateData {
    fn from_iter<I: IntoIterator<Item = (F, V)>>(iter: I) -> Self {
        let mut data = Self::new();
        for (field, value) in iter {
            data.insert(field, value);
        }
        data
    }
}

impl<'de> Deserialize<'de> for UpdateData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UpdateDataVisitor;

        impl<'de> Visitor<'de> for UpdateDataVisitor {
            type Value = UpdateData;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of field names to scalar values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<UpdateData, A::Error> {
                let mut data = UpdateData::new();
                while let Some((field, value)) = map.next_entry::<String, Value>()? {
                    data.insert(field, value);
                }
                Ok(data)
            }
        }

        deserializer.deserialize_map(UpdateDataVisitor)
    }
}

/// Build the `SET` fragment for a partial update.
///
/// The i-th field becomes `<column> = $i`, with its column taken from
/// `mapping` (or the field name when unmapped). Fails with
/// [`FragError::EmptyUpdate`] when `data` has no fields, and with
/// [`FragError::InvalidIdentifier`] when a mapped column is not a valid SQL
/// identifier or a field name is empty. An unmapped field that is not a plain
/// identifier is quoted (`"first name" = $1`).
///
/// # Example
/// ```ignore
/// let data = UpdateData::new().set("firstName", "Aliya").set("age", 32);
/// let frag = partial_update(data, &ColumnMapping::from([("firstName", "first_name")]))?;
/// assert_eq!(frag.fragment, "first_name = $1, age = $2");
/// ```
pub fn partial_update(data: UpdateData, mapping: &ColumnMapping) -> FragResult<QueryFragment> {
    match build_set(data, mapping) {
        Ok(frag) => {
            trace::built("partial_update", &frag);
            Ok(frag)
        }
        Err(err) => {
            trace::rejected("partial_update", &err);
            Err(err)
        }
    }
}

fn build_set(data: UpdateData, mapping: &ColumnMapping) -> FragResult<QueryFragment> {
    if data.is_empty() {
        return Err(FragError::EmptyUpdate);
    }

    // Resolve every column first so a bad name leaves nothing half-built.
    let columns = data
        .fields
        .iter()
        .map(|(field, _)| mapping.column_for(field))
        .collect::<FragResult<Vec<_>>>()?;

    let mut bindings = Bindings::new();
    let set_parts: Vec<String> = columns
        .into_iter()
        .zip(data.fields)
        .map(|(column, (_, value))| format!("{column} = {}", bindings.bind(value)))
        .collect();

    Ok(QueryFragment::new(set_parts.join(", "), bindings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_aliases_and_numbers_in_order() {
        let data = UpdateData::new().set("firstName", "Aliya").set("age", 32);
        let mapping = ColumnMapping::from([("firstName", "first_name")]);

        let frag = partial_update(data, &mapping).unwrap();

        assert_eq!(frag.fragment, "first_name = $1, age = $2");
        assert_eq!(frag.values, vec![Value::from("Aliya"), Value::Int(32)]);
    }

    #[test]
    fn empty_data_is_rejected() {
        let err = partial_update(UpdateData::new(), &ColumnMapping::companies()).unwrap_err();
        assert_eq!(err, FragError::EmptyUpdate);
    }

    #[test]
    fn nulls_are_bound_not_dropped() {
        let data = UpdateData::new()
            .set("title", "New")
            .set("salary", Value::Null)
            .set("equity", None::<f64>);

        let frag = partial_update(data, &ColumnMapping::new()).unwrap();

        assert_eq!(frag.fragment, "title = $1, salary = $2, equity = $3");
        assert_eq!(frag.values, vec![Value::from("New"), Value::Null, Value::Null]);
    }

    #[test]
    fn hostile_field_names_stay_one_quoted_column() {
        let data = UpdateData::new()
            .set("name", "ok")
            .set("name = 'x', is_admin", true);

        let frag = partial_update(data, &ColumnMapping::new()).unwrap();
        assert_eq!(frag.fragment, r#"name = $1, "name = 'x', is_admin" = $2"#);
        assert_eq!(frag.placeholder_count(), 2);
    }

    #[test]
    fn keys_with_spaces_become_quoted_columns() {
        let data = UpdateData::new().set("first name", "Aliya").set("age", 32);
        let frag = partial_update(data, &ColumnMapping::new()).unwrap();
        assert_eq!(frag.fragment, r#""first name" = $1, age = $2"#);
    }

    #[test]
    fn bad_names_fail_before_binding() {
        let data = UpdateData::new().set("name", "ok").set("", 1);
        let err = partial_update(data, &ColumnMapping::new()).unwrap_err();
        assert!(matches!(err, FragError::InvalidIdentifier(_)));

        let mapping = ColumnMapping::new().with("x", "x; DELETE FROM jobs");
        let err = partial_update(UpdateData::new().set("x", 1), &mapping).unwrap_err();
        assert!(matches!(err, FragError::InvalidIdentifier(_)));
    }

    #[test]
    fn setting_twice_keeps_first_position() {
        let data = UpdateData::new().set("a", 1).set("b", 2).set("a", 3);
        let frag = partial_update(data, &ColumnMapping::new()).unwrap();
        assert_eq!(frag.fragment, "a = $1, b = $2");
        assert_eq!(frag.values, vec![Value::Int(3), Value::Int(2)]);
    }

    #[test]
    fn json_input_keeps_key_order() {
        let data: UpdateData =
            serde_json::from_str(r#"{"numEmployees": 12, "logoUrl": null, "description": "d"}"#)
                .unwrap();
        let frag = partial_update(data, &ColumnMapping::companies()).unwrap();
        assert_eq!(frag.fragment, "num_employees = $1, logo_url = $2, description = $3");

        let object = json!({"name": "n", "handle": "h"});
        let serde_json::Value::Object(object) = object else {
            unreachable!()
        };
        let data = UpdateData::from_json(object).unwrap();
        assert_eq!(data.iter().map(|(f, _)| f).collect::<Vec<_>>(), ["name", "handle"]);
    }

    #[test]
    fn nested_json_values_are_refused() {
        let mut object = serde_json::Map::new();
        object.insert("tags".into(), json!(["a"]));
        let err = UpdateData::from_json(object).unwrap_err();
        assert!(matches!(&err, FragError::NonScalar { field } if field == "tags"));
        assert!(err.is_client_error());
        assert!(serde_json::from_str::<UpdateData>(r#"{"tags": {"a": 1}}"#).is_err());
    }
}
