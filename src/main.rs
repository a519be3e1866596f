use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::EnvFilter;

mod commands;

/// xsolla - Inspect Xsolla project settings and call the Store API
#[derive(Parser)]
#[command(name = "xsolla")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List virtual items of the configured store project
    Items {
        /// Print the decoded catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch a payment token for an item
    Token {
        /// Item SKU (e.g., big_rocket)
        sku: String,

        /// User JWT (falls back to XSOLLA_AUTH_TOKEN, then a prompt)
        #[arg(long)]
        auth_token: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., store.project_id)
        key: String,
        /// Configuration value
        value: String,
    },

    /// Check the configuration for missing or invalid values
    Validate,

    /// List recognized configuration keys
    Schema,

    /// Print the config file path
    Path,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Commands::Items { json } => commands::items::run(json).await,
        Commands::Token { sku, auth_token } => commands::token::run(sku, auth_token).await,
        Commands::Config { action } => commands::config::run(&action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "xsolla", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
