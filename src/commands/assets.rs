//! Assets command

use anyhow::Result;
use bi_portal::core::assets::AssetType;
use bi_portal::core::catalog::{TagFilter, filter_assets, paginate};
use bi_portal::{AssetApi, PortalConfig};

pub async fn execute(
    config: &PortalConfig,
    asset_type: AssetType,
    search: Option<&str>,
    tag: Option<&TagFilter>,
    page: usize,
    page_size: usize,
) -> Result<()> {
    let client = super::client(config)?;
    let assets = client.list_assets(asset_type).await?;
    let matching = filter_assets(&assets, search, tag);
    let page = paginate(&matching, page, page_size);

    for asset in &page.items {
        let tags: Vec<String> = asset
            .tags
            .iter()
            .map(|t| format!("{}={}", t.key, t.value))
            .collect();
        println!("{}\t{}\t{}", asset.id, asset.name, tags.join(","));
    }
    println!(
        "Page {} of {} ({} matching)",
        page.page,
        page.total_pages.max(1),
        page.total_items
    );
    Ok(())
}
