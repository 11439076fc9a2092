//! CLI command implementations

pub mod assets;
pub mod bulk;
pub mod field_metadata;
pub mod folders;
mod progress;

use anyhow::Result;
use bi_portal::{HttpPortalClient, PortalConfig};
use std::sync::Arc;

fn client(config: &PortalConfig) -> Result<Arc<HttpPortalClient>> {
    Ok(Arc::new(HttpPortalClient::new(&config.api)?))
}
