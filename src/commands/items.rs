use anyhow::{Context, Result};
use xsolla_sdk::{Config, StoreClient, VirtualItem};

pub async fn run(json: bool) -> Result<()> {
    let config = Config::load()?;
    let store = StoreClient::from_config(&config)?;

    let spinner = super::spinner("Fetching virtual items...");
    let result = store.fetch_virtual_items().await;
    spinner.finish_and_clear();

    let catalog = result.context("Failed to fetch virtual items")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    let project_id = store.settings().effective_project_id();

    if catalog.items.is_empty() {
        println!("No virtual items in project {}", project_id);
        return Ok(());
    }

    println!(
        "Project {}: {} virtual item{}",
        project_id,
        catalog.items.len(),
        if catalog.items.len() == 1 { "" } else { "s" }
    );
    println!();

    for item in &catalog.items {
        println!("  {} - {}  [{}]", item.sku, item.name, format_price(item));
    }
    println!();

    Ok(())
}

fn format_price(item: &VirtualItem) -> String {
    if item.is_free {
        return "free".to_string();
    }

    if let Some(price) = &item.price {
        return format!("{} {}", price.amount, price.currency);
    }

    match item.default_virtual_price() {
        Some(vp) => format!("{} {}", vp.amount, vp.sku),
        None => "no price".to_string(),
    }
}
