//! HTTP client for the BI service

use super::{AssetApi, FolderApi, FolderMember, TagApi};
use crate::config::ApiConfig;
use crate::core::assets::{AssetType, Folder, Tag};
use crate::core::catalog::AssetSummary;
use crate::core::metadata::FieldMetadata;
use crate::utils::error::{PortalError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

#[derive(Deserialize)]
struct FolderList {
    folders: Vec<Folder>,
}

#[derive(Serialize, Deserialize)]
struct TagSet {
    tags: Vec<Tag>,
}

#[derive(Deserialize)]
struct AssetList {
    assets: Vec<AssetSummary>,
}

/// Implements every service API over one pooled `reqwest` client
#[derive(Clone)]
pub struct HttpPortalClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpPortalClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| PortalError::config(format!("Invalid base URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(PortalError::config(format!(
                "Base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(concat!("bi-portal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PortalError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Base URL with each segment appended and percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PortalError::config("Base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_status(status, &body))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "GET");
        let response = self.send(self.client.get(url)).await?;
        response.json::<T>().await.map_err(map_transport_error)
    }
}

#[async_trait]
impl FolderApi for HttpPortalClient {
    async fn list_folders(&self) -> Result<Vec<Folder>> {
        let url = self.endpoint(&["folders"])?;
        let list: FolderList = self.get_json(url).await?;
        Ok(list.folders)
    }

    async fn add_member(&self, folder_id: &str, member: FolderMember) -> Result<()> {
        let url = self.endpoint(&["folders", folder_id, "members"])?;
        debug!(%url, member_id = %member.member_id, "POST");
        self.send(self.client.post(url).json(&member)).await?;
        Ok(())
    }
}

#[async_trait]
impl TagApi for HttpPortalClient {
    async fn get_resource_tags(&self, resource_type: &str, asset_id: &str) -> Result<Vec<Tag>> {
        let url = self.endpoint(&["tags", resource_type, asset_id])?;
        let set: TagSet = self.get_json(url).await?;
        Ok(set.tags)
    }

    async fn update_resource_tags(
        &self,
        resource_type: &str,
        asset_id: &str,
        tags: Vec<Tag>,
    ) -> Result<()> {
        let url = self.endpoint(&["tags", resource_type, asset_id])?;
        debug!(%url, count = tags.len(), "PUT");
        self.send(self.client.put(url).json(&TagSet { tags })).await?;
        Ok(())
    }

    async fn get_field_metadata(
        &self,
        source_type: &str,
        source_id: &str,
        field_name: &str,
    ) -> Result<FieldMetadata> {
        let url = self.endpoint(&["metadata", source_type, source_id, "fields", field_name])?;
        match self.get_json(url).await {
            Err(PortalError::NotFound(_)) => Ok(FieldMetadata::default()),
            other => other,
        }
    }

    async fn update_field_metadata(
        &self,
        source_type: &str,
        source_id: &str,
        field_name: &str,
        metadata: FieldMetadata,
    ) -> Result<()> {
        metadata.validate()?;
        let url = self.endpoint(&["metadata", source_type, source_id, "fields", field_name])?;
        debug!(%url, "PUT");
        self.send(self.client.put(url).json(&metadata)).await?;
        Ok(())
    }
}

#[async_trait]
impl AssetApi for HttpPortalClient {
    async fn list_assets(&self, asset_type: AssetType) -> Result<Vec<AssetSummary>> {
        let mut url = self.endpoint(&["assets"])?;
        url.query_pairs_mut()
            .append_pair("type", asset_type.resource_type());
        let list: AssetList = self.get_json(url).await?;
        Ok(list.assets)
    }
}

impl std::fmt::Debug for HttpPortalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPortalClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Map a non-2xx response to an error.
///
/// The message is the JSON body's `message` field when present, otherwise the
/// raw body, otherwise the status reason.
pub fn map_status(status: StatusCode, body: &str) -> PortalError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());
    let message = if message.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    } else {
        message
    };

    match status.as_u16() {
        401 => PortalError::Auth(message),
        403 => PortalError::AccessDenied(message),
        404 => PortalError::NotFound(message),
        429 => PortalError::RateLimit(message),
        code => PortalError::api(code, message),
    }
}

fn map_transport_error(e: reqwest::Error) -> PortalError {
    if e.is_timeout() {
        PortalError::Timeout(e.to_string())
    } else if e.is_connect() {
        PortalError::network(e.to_string())
    } else {
        PortalError::HttpClient(e)
    }
}
