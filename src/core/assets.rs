//! BI asset, folder and tag types

use crate::utils::error::PortalError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of asset that can be targeted by a bulk action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Dashboard,
    Analysis,
    Dataset,
    Datasource,
}

impl AssetType {
    /// Lowercase name used in tag and metadata endpoint paths
    pub fn resource_type(&self) -> &'static str {
        match self {
            AssetType::Dashboard => "dashboard",
            AssetType::Analysis => "analysis",
            AssetType::Dataset => "dataset",
            AssetType::Datasource => "datasource",
        }
    }

    /// Uppercase name the folder-membership endpoint expects
    pub fn member_type(&self) -> String {
        self.resource_type().to_uppercase()
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource_type())
    }
}

impl FromStr for AssetType {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dashboard" => Ok(AssetType::Dashboard),
            "analysis" => Ok(AssetType::Analysis),
            "dataset" => Ok(AssetType::Dataset),
            "datasource" => Ok(AssetType::Datasource),
            other => Err(PortalError::validation(format!(
                "Unknown asset type '{}'",
                other
            ))),
        }
    }
}

/// A selected asset targeted by a bulk action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRef {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
}

impl AssetRef {
    pub fn new(asset_type: AssetType, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            asset_type,
        }
    }
}

/// Parses `type:id[:name]`; the name defaults to the id and may contain `:`
impl FromStr for AssetRef {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let asset_type: AssetType = parts.next().unwrap_or_default().parse()?;
        let id = parts
            .next()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                PortalError::validation(format!("Asset '{}' must look like type:id[:name]", s))
            })?;
        let name = parts
            .next()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(id);

        Ok(AssetRef::new(asset_type, id, name))
    }
}

/// Who a folder is shared with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SharingModel {
    Account,
    Namespace,
    Private,
}

/// A container assets can be added to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub sharing_model: SharingModel,
}

impl Folder {
    /// Only shared folders are offered as bulk-add targets
    pub fn is_shared(&self) -> bool {
        !matches!(self.sharing_model, SharingModel::Private)
    }
}

/// A key-value label on an asset or a field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Both key and value are non-blank
    pub fn is_valid(&self) -> bool {
        !self.key.trim().is_empty() && !self.value.trim().is_empty()
    }

    fn trimmed(&self) -> Self {
        Tag::new(self.key.trim(), self.value.trim())
    }
}

/// Parses `key=value`; only the first `=` separates
impl FromStr for Tag {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| PortalError::validation(format!("Tag '{}' must look like key=value", s)))?;
        Ok(Tag::new(key.trim(), value.trim()))
    }
}

/// Keep the rows a user filled in completely, trimmed
pub fn valid_tags(rows: &[Tag]) -> Vec<Tag> {
    rows.iter()
        .filter(|tag| tag.is_valid())
        .map(Tag::trimmed)
        .collect()
}

/// Merge `new` into `existing`, last write wins per key.
///
/// Keys keep the position of their first appearance: existing keys first in
/// their original order, then keys only present in `new`.
pub fn merge_tags(existing: &[Tag], new: &[Tag]) -> Vec<Tag> {
    let mut merged: Vec<Tag> = Vec::with_capacity(existing.len() + new.len());

    for tag in existing.iter().chain(new.iter()) {
        match merged.iter_mut().find(|t| t.key == tag.key) {
            Some(slot) => slot.value = tag.value.clone(),
            None => merged.push(tag.clone()),
        }
    }

    merged
}
