//! Per-entity column mappings loaded from TOML.
//!
//! ```toml
//! [entities.companies]
//! numEmployees = "num_employees"
//! logoUrl = "logo_url"
//!
//! [entities.jobs]
//! companyHandle = "company_handle"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FragError, FragResult};
use crate::ident::Ident;
use crate::mapping::ColumnMapping;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingConfig {
    #[serde(default)]
    pub entities: BTreeMap<String, ColumnMapping>,
}

impl MappingConfig {
    /// Built-in mappings for `companies` and `jobs`.
    pub fn with_presets() -> Self {
        let mut entities = BTreeMap::new();
        entities.insert("companies".to_string(), ColumnMapping::companies());
        entities.insert("jobs".to_string(), ColumnMapping::jobs());
        Self { entities }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> FragResult<Self> {
        let config: Self = toml::from_str(raw)
            .map_err(|e| FragError::config(format!("failed to parse mapping config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> FragResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            FragError::config(format!("failed to read mapping config {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Every mapped column must be a valid identifier.
    pub fn validate(&self) -> FragResult<()> {
        for (entity, mapping) in &self.entities {
            for (field, column) in mapping.iter() {
                Ident::parse(column).map_err(|e| {
                    FragError::config(format!("entities.{entity}.{field}: {e}"))
                })?;
            }
        }
        Ok(())
    }

    /// Configured mapping for `entity`, if any.
    pub fn get(&self, entity: &str) -> Option<&ColumnMapping> {
        self.entities.get(entity)
    }

    /// Mapping for `entity`; unknown entities get an empty (identity) mapping.
    pub fn mapping(&self, entity: &str) -> ColumnMapping {
        self.get(entity).cloned().unwrap_or_default()
    }

    /// Overlay `other` on top of this config, entity by entity.
    pub fn merge(mut self, other: MappingConfig) -> Self {
        for (entity, mapping) in other.entities {
            let slot = self.entities.entry(entity).or_default();
            for (field, column) in mapping.iter() {
                slot.insert(field, column);
            }
        }
        self
    }
}
