//! External BI service APIs
//!
//! Bulk actions only talk to the service through these traits. The HTTP
//! implementation lives in [`http`]; tests substitute mocks or fakes.

pub mod http;

pub use http::HttpPortalClient;

use crate::core::assets::{AssetType, Folder, Tag};
use crate::core::catalog::AssetSummary;
use crate::core::metadata::FieldMetadata;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Body of an add-member call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderMember {
    /// Uppercase asset type, e.g. `DASHBOARD`
    pub member_type: String,
    pub member_id: String,
}

impl FolderMember {
    pub fn new(asset_type: AssetType, member_id: impl Into<String>) -> Self {
        Self {
            member_type: asset_type.member_type(),
            member_id: member_id.into(),
        }
    }
}

/// Folder membership endpoints
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FolderApi: Send + Sync {
    async fn list_folders(&self) -> Result<Vec<Folder>>;

    async fn add_member(&self, folder_id: &str, member: FolderMember) -> Result<()>;
}

/// Resource tag and field metadata endpoints
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagApi: Send + Sync {
    async fn get_resource_tags(&self, resource_type: &str, asset_id: &str) -> Result<Vec<Tag>>;

    /// Replaces the full tag set
    async fn update_resource_tags(
        &self,
        resource_type: &str,
        asset_id: &str,
        tags: Vec<Tag>,
    ) -> Result<()>;

    async fn get_field_metadata(
        &self,
        source_type: &str,
        source_id: &str,
        field_name: &str,
    ) -> Result<FieldMetadata>;

    async fn update_field_metadata(
        &self,
        source_type: &str,
        source_id: &str,
        field_name: &str,
        metadata: FieldMetadata,
    ) -> Result<()>;
}

/// Asset listing
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetApi: Send + Sync {
    async fn list_assets(&self, asset_type: AssetType) -> Result<Vec<AssetSummary>>;
}
