//! In-memory service fakes
//!
//! Unlike mocks these keep state, so a test can assert on what the service
//! holds after a batch.

use async_trait::async_trait;
use bi_portal::core::assets::{Folder, SharingModel, Tag};
use bi_portal::core::metadata::FieldMetadata;
use bi_portal::{FolderApi, FolderMember, PortalError, Result, TagApi};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Notify;

/// Holds one asset's call until the test releases it
#[derive(Clone, Default)]
pub struct Gate {
    pub reached: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl Gate {
    async fn pass(&self) {
        self.reached.notify_one();
        self.release.notified().await;
    }
}

#[derive(Default)]
pub struct FakeFolderApi {
    folders: Vec<Folder>,
    list_error: Option<String>,
    failures: HashMap<String, String>,
    gate: Option<(String, Gate)>,
    calls: Mutex<Vec<(String, FolderMember)>>,
}

impl FakeFolderApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_folder(mut self, id: &str, name: &str, sharing_model: SharingModel) -> Self {
        self.folders.push(Folder {
            id: id.to_string(),
            name: name.to_string(),
            sharing_model,
        });
        self
    }

    pub fn failing_list(mut self, message: &str) -> Self {
        self.list_error = Some(message.to_string());
        self
    }

    /// Reject adding `member_id` with an access-denied message
    pub fn rejecting(mut self, member_id: &str, message: &str) -> Self {
        self.failures
            .insert(member_id.to_string(), message.to_string());
        self
    }

    pub fn gated(mut self, member_id: &str, gate: Gate) -> Self {
        self.gate = Some((member_id.to_string(), gate));
        self
    }

    pub fn calls(&self) -> Vec<(String, FolderMember)> {
        self.calls.lock().clone()
    }

    pub fn member_ids(&self) -> Vec<String> {
        self.calls().into_iter().map(|(_, m)| m.member_id).collect()
    }
}

#[async_trait]
impl FolderApi for FakeFolderApi {
    async fn list_folders(&self) -> Result<Vec<Folder>> {
        match &self.list_error {
            Some(message) => Err(PortalError::network(message.clone())),
            None => Ok(self.folders.clone()),
        }
    }

    async fn add_member(&self, folder_id: &str, member: FolderMember) -> Result<()> {
        self.calls
            .lock()
            .push((folder_id.to_string(), member.clone()));

        if let Some((id, gate)) = &self.gate {
            if *id == member.member_id {
                gate.pass().await;
            }
        }

        match self.failures.get(&member.member_id) {
            Some(message) => Err(PortalError::access_denied(message.clone())),
            None => Ok(()),
        }
    }
}

/// Tag store keyed by `(resource_type, asset_id)`
#[derive(Default)]
pub struct FakeTagApi {
    tags: Mutex<HashMap<(String, String), Vec<Tag>>>,
    fields: Mutex<HashMap<(String, String, String), FieldMetadata>>,
    read_failures: HashMap<String, String>,
    write_failures: HashMap<String, String>,
    gate: Option<(String, Gate)>,
    writes: Mutex<Vec<String>>,
}

impl FakeTagApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags(self, resource_type: &str, asset_id: &str, tags: Vec<Tag>) -> Self {
        self.tags
            .lock()
            .insert((resource_type.to_string(), asset_id.to_string()), tags);
        self
    }

    pub fn failing_read(mut self, asset_id: &str, message: &str) -> Self {
        self.read_failures
            .insert(asset_id.to_string(), message.to_string());
        self
    }

    pub fn failing_write(mut self, asset_id: &str, message: &str) -> Self {
        self.write_failures
            .insert(asset_id.to_string(), message.to_string());
        self
    }

    /// Hold the tag read for `asset_id` until the gate is released
    pub fn gated(mut self, asset_id: &str, gate: Gate) -> Self {
        self.gate = Some((asset_id.to_string(), gate));
        self
    }

    pub fn tags_of(&self, resource_type: &str, asset_id: &str) -> Vec<Tag> {
        self.tags
            .lock()
            .get(&(resource_type.to_string(), asset_id.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    /// Asset ids written, in call order
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().clone()
    }
}

#[async_trait]
impl TagApi for FakeTagApi {
    async fn get_resource_tags(&self, resource_type: &str, asset_id: &str) -> Result<Vec<Tag>> {
        if let Some((id, gate)) = &self.gate {
            if id == asset_id {
                gate.pass().await;
            }
        }
        if let Some(message) = self.read_failures.get(asset_id) {
            return Err(PortalError::api(500, message.clone()));
        }
        Ok(self.tags_of(resource_type, asset_id))
    }

    async fn update_resource_tags(
        &self,
        resource_type: &str,
        asset_id: &str,
        tags: Vec<Tag>,
    ) -> Result<()> {
        self.writes.lock().push(asset_id.to_string());
        if let Some(message) = self.write_failures.get(asset_id) {
            return Err(PortalError::api(409, message.clone()));
        }
        self.tags
            .lock()
            .insert((resource_type.to_string(), asset_id.to_string()), tags);
        Ok(())
    }

    async fn get_field_metadata(
        &self,
        source_type: &str,
        source_id: &str,
        field_name: &str,
    ) -> Result<FieldMetadata> {
        let key = (
            source_type.to_string(),
            source_id.to_string(),
            field_name.to_string(),
        );
        Ok(self.fields.lock().get(&key).cloned().unwrap_or_default())
    }

    async fn update_field_metadata(
        &self,
        source_type: &str,
        source_id: &str,
        field_name: &str,
        metadata: FieldMetadata,
    ) -> Result<()> {
        let key = (
            source_type.to_string(),
            source_id.to_string(),
            field_name.to_string(),
        );
        self.fields.lock().insert(key, metadata);
        Ok(())
    }
}
