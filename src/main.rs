//! Portal CLI
//!
//! Drives the bulk dialogs and catalog helpers against a BI service.

#![allow(missing_docs)]

use bi_portal::PortalConfig;
use bi_portal::core::assets::{AssetRef, AssetType, Tag};
use bi_portal::core::catalog::TagFilter;
use bi_portal::core::metadata::DataClassification;
use bi_portal::utils::logging::init_logging;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

#[derive(Parser)]
#[command(name = "portal")]
#[command(author, version, about = "BI asset portal CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the YAML configuration file
    #[arg(long, global = true, env = "PORTAL_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the shared folders assets can be added to
    Folders,

    /// List assets of one type
    Assets {
        /// Asset type (dashboard, analysis, dataset, datasource)
        #[arg(long = "type", default_value = "dashboard")]
        asset_type: AssetType,

        /// Case-insensitive search over name, id and tags
        #[arg(long)]
        search: Option<String>,

        /// Only assets carrying this tag (`key` or `key=value`)
        #[arg(long)]
        tag: Option<TagFilter>,

        #[arg(long, default_value = "1")]
        page: usize,

        #[arg(long, default_value = "25")]
        page_size: usize,
    },

    /// Add assets to a shared folder
    AddToFolder {
        /// Target folder id
        #[arg(long)]
        folder: String,

        /// Asset as `type:id[:name]`, repeatable
        #[arg(long = "asset", required = true)]
        assets: Vec<AssetRef>,
    },

    /// Merge tags into each asset's tag set
    Tag {
        /// Tag as `key=value`, repeatable
        #[arg(long = "tag", required = true)]
        tags: Vec<Tag>,

        /// Asset as `type:id[:name]`, repeatable
        #[arg(long = "asset", required = true)]
        assets: Vec<AssetRef>,
    },

    /// Read or write metadata for one field
    FieldMetadata {
        #[command(subcommand)]
        action: FieldMetadataAction,
    },
}

#[derive(Subcommand)]
enum FieldMetadataAction {
    /// Print a field's metadata as JSON
    Get {
        #[command(flatten)]
        field: commands::field_metadata::FieldArgs,
    },

    /// Update a field's metadata, keeping anything not given
    Set {
        #[command(flatten)]
        field: commands::field_metadata::FieldArgs,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        glossary: Option<String>,

        #[arg(long)]
        classification: Option<DataClassification>,

        /// Flag the field as holding personal data
        #[arg(long)]
        pii: Option<bool>,

        /// PII category, repeatable
        #[arg(long = "pii-category")]
        pii_categories: Vec<String>,

        /// Data quality score between 0 and 100
        #[arg(long)]
        quality_score: Option<f64>,

        #[arg(long)]
        lineage: Option<String>,

        /// Tag as `key=value`, repeatable; merged into the field's tags
        #[arg(long = "tag")]
        tags: Vec<Tag>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match PortalConfig::load(cli.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli.command, &config).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns false when a batch finished with failures
async fn run(command: Commands, config: &PortalConfig) -> anyhow::Result<bool> {
    match command {
        Commands::Folders => commands::folders::execute(config).await?,
        Commands::Assets {
            asset_type,
            search,
            tag,
            page,
            page_size,
        } => {
            commands::assets::execute(
                config,
                asset_type,
                search.as_deref(),
                tag.as_ref(),
                page,
                page_size,
            )
            .await?
        }
        Commands::AddToFolder { folder, assets } => {
            return commands::bulk::add_to_folder(config, &folder, assets).await;
        }
        Commands::Tag { tags, assets } => {
            return commands::bulk::tag(config, tags, assets).await;
        }
        Commands::FieldMetadata { action } => match action {
            FieldMetadataAction::Get { field } => {
                commands::field_metadata::get(config, &field).await?
            }
            FieldMetadataAction::Set {
                field,
                description,
                glossary,
                classification,
                pii,
                pii_categories,
                quality_score,
                lineage,
                tags,
            } => {
                let update = commands::field_metadata::FieldUpdate {
                    description,
                    glossary,
                    classification,
                    pii,
                    pii_categories,
                    quality_score,
                    lineage,
                    tags,
                };
                commands::field_metadata::set(config, &field, update).await?
            }
        },
    }
    Ok(true)
}
