//! Asset list helpers: search, tag filtering and pagination

use super::assets::{AssetRef, AssetType, Tag};
use crate::utils::error::PortalError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One row of an asset list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl AssetSummary {
    /// Case-insensitive substring match over name, id and tags.
    /// A blank term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&term)
            || self.id.to_lowercase().contains(&term)
            || self.tags.iter().any(|t| {
                t.key.to_lowercase().contains(&term) || t.value.to_lowercase().contains(&term)
            })
    }

    pub fn to_asset_ref(&self) -> AssetRef {
        AssetRef::new(self.asset_type, self.id.clone(), self.name.clone())
    }
}

/// Select assets carrying a tag key, optionally with a given value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    pub key: String,
    pub value: Option<String>,
}

impl TagFilter {
    pub fn matches(&self, asset: &AssetSummary) -> bool {
        asset.tags.iter().any(|tag| {
            tag.key.eq_ignore_ascii_case(&self.key)
                && self
                    .value
                    .as_ref()
                    .is_none_or(|v| tag.value.eq_ignore_ascii_case(v))
        })
    }
}

/// Parses `key` or `key=value`
impl FromStr for TagFilter {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = match s.split_once('=') {
            Some((key, value)) => (key.trim(), Some(value.trim())),
            None => (s.trim(), None),
        };
        if key.is_empty() {
            return Err(PortalError::validation(format!(
                "Tag filter '{}' needs a key",
                s
            )));
        }

        Ok(TagFilter {
            key: key.to_string(),
            value: value.filter(|v| !v.is_empty()).map(str::to_string),
        })
    }
}

/// One page of a list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next: bool,
}

/// Slice `items` into 1-based pages. `page` and `page_size` are clamped to 1.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);

    let start = (page - 1).saturating_mul(page_size).min(total_items);
    let end = start.saturating_add(page_size).min(total_items);

    Page {
        items: items[start..end].to_vec(),
        page,
        page_size,
        total_items,
        total_pages,
        has_next: page < total_pages,
    }
}

/// Apply the search term and tag filter, keeping input order
pub fn filter_assets(
    items: &[AssetSummary],
    search: Option<&str>,
    tag_filter: Option<&TagFilter>,
) -> Vec<AssetSummary> {
    items
        .iter()
        .filter(|a| search.is_none_or(|term| a.matches_search(term)))
        .filter(|a| tag_filter.is_none_or(|f| f.matches(a)))
        .cloned()
        .collect()
}
