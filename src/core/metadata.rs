//! Field-level metadata
//!
//! Structured annotations attached to one field of a dataset, analysis or
//! dashboard, keyed by `(source_type, source_id, field_name)`.

use super::assets::{Tag, merge_tags};
use crate::utils::error::{PortalError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How sensitive the data in a field is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataClassification {
    Public,
    #[default]
    Internal,
    Confidential,
    Restricted,
}

impl fmt::Display for DataClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DataClassification::Public => "PUBLIC",
            DataClassification::Internal => "INTERNAL",
            DataClassification::Confidential => "CONFIDENTIAL",
            DataClassification::Restricted => "RESTRICTED",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for DataClassification {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "PUBLIC" => Ok(DataClassification::Public),
            "INTERNAL" => Ok(DataClassification::Internal),
            "CONFIDENTIAL" => Ok(DataClassification::Confidential),
            "RESTRICTED" => Ok(DataClassification::Restricted),
            other => Err(PortalError::validation(format!(
                "Unknown classification '{}'",
                other
            ))),
        }
    }
}

/// Metadata stored for a single field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldMetadata {
    pub description: Option<String>,
    pub business_glossary: Option<String>,
    pub classification: DataClassification,
    pub pii: bool,
    pub pii_categories: Vec<String>,
    pub data_quality_score: Option<f64>,
    pub lineage_notes: Option<String>,
    pub tags: Vec<Tag>,
}

impl FieldMetadata {
    /// Checked before every write
    pub fn validate(&self) -> Result<()> {
        if let Some(score) = self.data_quality_score {
            if !(0.0..=100.0).contains(&score) {
                return Err(PortalError::validation(format!(
                    "Data quality score must be between 0 and 100, got {}",
                    score
                )));
            }
        }

        if let Some(tag) = self.tags.iter().find(|t| !t.is_valid()) {
            return Err(PortalError::validation(format!(
                "Tag '{}={}' needs both a key and a value",
                tag.key, tag.value
            )));
        }

        if !self.pii && !self.pii_categories.is_empty() {
            return Err(PortalError::validation(
                "PII categories require the field to be flagged as PII",
            ));
        }

        Ok(())
    }

    /// Overlay `new` onto the field's tags, last write wins per key
    pub fn merge_tags(&mut self, new: &[Tag]) {
        self.tags = merge_tags(&self.tags, new);
    }

    /// Confidential or restricted data, or anything flagged as PII
    pub fn is_sensitive(&self) -> bool {
        self.pii || self.classification.is_sensitive()
    }
}

impl DataClassification {
    pub fn is_sensitive(&self) -> bool {
        matches!(
            self,
            DataClassification::Confidential | DataClassification::Restricted
        )
    }
}
