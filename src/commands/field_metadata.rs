//! Field metadata commands

use anyhow::Result;
use bi_portal::core::assets::Tag;
use bi_portal::core::metadata::{DataClassification, FieldMetadata};
use bi_portal::{PortalConfig, TagApi};
use clap::Args;

/// Identifies one field
#[derive(Args)]
pub struct FieldArgs {
    /// Source type, e.g. dataset
    #[arg(long)]
    pub source_type: String,

    #[arg(long)]
    pub source_id: String,

    #[arg(long)]
    pub field: String,
}

/// Values to change; `None` and empty lists keep what is stored
pub struct FieldUpdate {
    pub description: Option<String>,
    pub glossary: Option<String>,
    pub classification: Option<DataClassification>,
    pub pii: Option<bool>,
    pub pii_categories: Vec<String>,
    pub quality_score: Option<f64>,
    pub lineage: Option<String>,
    pub tags: Vec<Tag>,
}

impl FieldUpdate {
    pub fn apply(self, metadata: &mut FieldMetadata) {
        if let Some(description) = self.description {
            metadata.description = Some(description);
        }
        if let Some(glossary) = self.glossary {
            metadata.business_glossary = Some(glossary);
        }
        if let Some(classification) = self.classification {
            metadata.classification = classification;
        }
        if let Some(pii) = self.pii {
            metadata.pii = pii;
            if !pii {
                metadata.pii_categories.clear();
            }
        }
        if !self.pii_categories.is_empty() {
            metadata.pii_categories = self.pii_categories;
        }
        if let Some(score) = self.quality_score {
            metadata.data_quality_score = Some(score);
        }
        if let Some(lineage) = self.lineage {
            metadata.lineage_notes = Some(lineage);
        }
        metadata.merge_tags(&self.tags);
    }
}

pub async fn get(config: &PortalConfig, field: &FieldArgs) -> Result<()> {
    let client = super::client(config)?;
    let metadata = client
        .get_field_metadata(&field.source_type, &field.source_id, &field.field)
        .await?;
    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(())
}

pub async fn set(config: &PortalConfig, field: &FieldArgs, update: FieldUpdate) -> Result<()> {
    let client = super::client(config)?;
    let mut metadata = client
        .get_field_metadata(&field.source_type, &field.source_id, &field.field)
        .await?;

    update.apply(&mut metadata);
    metadata.validate()?;

    client
        .update_field_metadata(&field.source_type, &field.source_id, &field.field, metadata)
        .await?;
    println!("Updated {}/{}/{}", field.source_type, field.source_id, field.field);
    Ok(())
}
