use anyhow::{Context, Result};
use xsolla_sdk::{Config, StoreClient};

pub async fn run(sku: String, auth_token: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let store = StoreClient::from_config(&config)?;

    let auth_token = match auth_token.or_else(|| {
        std::env::var("XSOLLA_AUTH_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
    }) {
        Some(token) => token,
        None => rpassword::prompt_password("User token (JWT): ")
            .context("Failed to read user token")?,
    };

    if auth_token.trim().is_empty() {
        anyhow::bail!("A user token is required. Pass --auth-token or set XSOLLA_AUTH_TOKEN");
    }

    let spinner = super::spinner(&format!("Requesting payment token for {}...", sku));
    let result = store.fetch_payment_token(auth_token.trim(), &sku).await;
    spinner.finish_and_clear();

    let token = result.with_context(|| format!("Failed to fetch payment token for '{}'", sku))?;

    println!("Payment token: {}", token.token);
    if let Some(order_id) = token.order_id {
        println!("Order ID:      {}", order_id);
    }
    println!(
        "Mode:          {}",
        if store.is_sandbox() { "sandbox" } else { "live" }
    );

    Ok(())
}
