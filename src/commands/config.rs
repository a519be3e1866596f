use anyhow::Result;
use xsolla_sdk::Config;

pub fn run(action: &crate::ConfigAction) -> Result<()> {
    use crate::ConfigAction;

    match action {
        ConfigAction::Show => show_config(),
        ConfigAction::Set { key, value } => set_config(key, value),
        ConfigAction::Validate => validate_config(),
        ConfigAction::Schema => show_schema(),
        ConfigAction::Path => {
            println!("{}", Config::default_path()?.display());
            Ok(())
        }
    }
}

fn show_config() -> Result<()> {
    let config = Config::load()?;
    let config_path = Config::default_path()?;

    println!();
    println!("  Config file: {}", config_path.display());
    println!();

    println!("┌─ Login ──────────────────────────────────────────────────────────────");
    println!("│  Project ID:          {}", or_unset(config.login.effective_project_id()));
    println!("│  Login ID:            {}", or_unset(config.login.effective_login_id()));
    println!("│  Callback URL:        {}", or_unset(&config.login.callback_url));
    println!("│  User data storage:   {}", config.login.user_data_storage);
    println!("│  JWT validation URL:  {}", or_unset(&config.login.jwt_validation_url));
    println!(
        "│  Account linking:     {}",
        format_bool(config.login.use_cross_platform_account_linking)
    );
    if config.login.use_cross_platform_account_linking {
        println!("│    Platform:          {}", config.login.platform);
        println!(
            "│    Platform account:  {}",
            or_unset(&config.login.platform_account_id)
        );
        println!(
            "│    Linking URL:       {}",
            or_unset(&config.login.account_linking_url)
        );
        println!(
            "│    Platform auth URL: {}",
            or_unset(&config.login.platform_authentication_url)
        );
    }
    println!("└──────────────────────────────────────────────────────────────────────");
    println!();

    println!("┌─ Store ──────────────────────────────────────────────────────────────");
    println!("│  Project ID:          {}", or_unset(config.store.effective_project_id()));
    println!("│  Sandbox:             {}", format_bool(config.store.enable_sandbox));
    println!(
        "│  Sandbox in shipping: {}",
        format_bool(config.store.enable_sandbox_in_shipping_build)
    );
    println!("│  Payment UI theme:    {}", config.store.payment_interface_theme);
    println!(
        "│  Platform browser:    {}",
        format_bool(config.store.use_platform_browser)
    );
    println!("│  Build for Steam:     {}", format_bool(config.store.build_for_steam));
    println!("└──────────────────────────────────────────────────────────────────────");
    println!();

    println!("┌─ API ────────────────────────────────────────────────────────────────");
    println!("│  Store URL:           {}", config.api.store_url);
    if config.api.timeout_seconds > 0 {
        println!("│  Timeout:             {}s", config.api.timeout_seconds);
    } else {
        println!("│  Timeout:             none");
    }
    println!(
        "│  Engine:              {} {}",
        config.engine.name, config.engine.version
    );
    println!(
        "│  Build:               {}",
        if config.engine.shipping { "shipping" } else { "development" }
    );
    println!("└──────────────────────────────────────────────────────────────────────");
    println!();

    println!("Modify settings:");
    println!("   xsolla config set <key> <value>");
    println!();

    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;

    config.set(key, value)?;
    config.save()?;

    println!("  ✓ {} = \"{}\"", key, value);

    let issues = config.validate();
    if !issues.is_empty() {
        println!();
        println!("  ⚠ Configuration still has {} issue(s):", issues.len());
        for issue in &issues {
            println!("    • {}", issue);
        }
    }

    Ok(())
}

fn validate_config() -> Result<()> {
    let config = Config::load()?;
    let issues = config.validate();

    if issues.is_empty() {
        println!("✓ Configuration is valid");
        return Ok(());
    }

    println!("Found {} issue(s):", issues.len());
    for issue in &issues {
        println!("  • {}", issue);
    }
    println!();

    anyhow::bail!("Invalid configuration")
}

fn show_schema() -> Result<()> {
    let schema = Config::schema();
    let width = schema.iter().map(|s| s.key.len()).max().unwrap_or(0);

    for spec in &schema {
        println!(
            "{:width$}  {:<34}  {}",
            spec.key,
            format!("<{}>", spec.kind),
            spec.description,
            width = width
        );
    }

    Ok(())
}

fn format_bool(value: bool) -> &'static str {
    if value {
        "enabled"
    } else {
        "disabled"
    }
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() {
        "<not set>"
    } else {
        value
    }
}
