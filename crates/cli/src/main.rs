//! MM Catalog CLI - query and price-comparison tools for the two
//! MM Mega Market platforms.
//!
//! # Usage
//!
//! ```bash
//! # Search the retail platform
//! mm-cli search "gạo st25"
//!
//! # Search both platforms, cheapest first
//! mm-cli search "dầu ăn" -p both -s price_asc
//!
//! # Compare retail and wholesale prices
//! mm-cli compare "nước mắm" --max-results 10
//!
//! # Authenticate against the wholesale platform
//! mm-cli login -u khach@example.com -p 'secret'
//!
//! # Dump every result page as JSON
//! mm-cli export "mì gói" -p b2c > mi-goi.json
//! ```
//!
//! # Commands
//!
//! - `search` - Search one or both platforms
//! - `compare` - Pair up retail and wholesale listings and diff prices
//! - `stores` - List known stores
//! - `details` - Look up a single product by SKU
//! - `export` - Walk every result page and emit JSON
//! - `login` / `logout` / `auth-status` - Wholesale session management

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use mm_catalog_engine::{Catalog, Config};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "mm-cli")]
#[command(author, version, about = "MM Mega Market catalog tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search one or both platforms
    Search {
        /// Search term
        term: String,

        /// Platform to query (`b2c`, `b2b` or `both`)
        #[arg(short, long, default_value = "b2c")]
        platform: String,

        /// 1-based result page
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Results per page (values over 50 are clamped)
        #[arg(long, default_value_t = 24)]
        page_size: u32,

        /// Sort key (`relevance`, `price_asc`, `price_desc`, `name_asc`, `name_desc`)
        #[arg(short, long, default_value = "relevance")]
        sort: String,

        /// Store code to select before searching
        #[arg(long)]
        store: Option<String>,
    },
    /// Compare retail and wholesale prices for a term
    Compare {
        /// Search term
        term: String,

        /// Maximum number of comparison records
        #[arg(short, long, default_value_t = 20)]
        max_results: u32,

        /// Store code to select before comparing
        #[arg(long)]
        store: Option<String>,
    },
    /// List known stores
    Stores {
        /// Region filter (`north`, `central`, `south` or `all`)
        #[arg(short, long, default_value = "all")]
        region: String,
    },
    /// Look up a single product by exact SKU
    Details {
        /// Product SKU
        sku: String,

        /// Platform to query (`b2c` or `b2b`)
        #[arg(short, long, default_value = "b2c")]
        platform: String,

        /// Store code to select before the lookup
        #[arg(long)]
        store: Option<String>,
    },
    /// Walk every result page for a term and emit JSON on stdout
    Export {
        /// Search term
        term: String,

        /// Platform to query (`b2c` or `b2b`)
        #[arg(short, long, default_value = "b2c")]
        platform: String,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<u32>,

        /// Store code to select before exporting
        #[arg(long)]
        store: Option<String>,
    },
    /// Authenticate against the wholesale platform
    Login {
        /// Wholesale account email
        #[arg(short, long)]
        username: String,

        /// Wholesale account password
        #[arg(short, long)]
        password: String,
    },
    /// Drop the wholesale token and revoke it server-side
    Logout,
    /// Show the wholesale authentication state
    AuthStatus {
        /// Also check the token against the platform
        #[arg(long)]
        verify: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let catalog = Catalog::new(config);
    catalog.bootstrap().await;

    if let Err(e) = run(&catalog, cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(catalog: &Catalog, cli: Cli) -> mm_catalog_engine::Result<()> {
    match cli.command {
        Commands::Search {
            term,
            platform,
            page,
            page_size,
            sort,
            store,
        } => {
            commands::session::select_store(catalog, store.as_deref()).await?;
            commands::search::search(catalog, &term, &platform, page, page_size, &sort).await?;
        }
        Commands::Compare {
            term,
            max_results,
            store,
        } => {
            commands::session::select_store(catalog, store.as_deref()).await?;
            commands::compare::compare(catalog, &term, max_results).await?;
        }
        Commands::Stores { region } => {
            commands::stores::list(catalog, &region)?;
        }
        Commands::Details {
            sku,
            platform,
            store,
        } => {
            commands::session::select_store(catalog, store.as_deref()).await?;
            commands::search::details(catalog, &sku, &platform).await?;
        }
        Commands::Export {
            term,
            platform,
            max_pages,
            store,
        } => {
            commands::session::select_store(catalog, store.as_deref()).await?;
            commands::search::export(catalog, &term, &platform, max_pages).await?;
        }
        Commands::Login { username, password } => {
            commands::session::login(catalog, &username, &password).await?;
        }
        Commands::Logout => {
            commands::session::logout(catalog).await;
        }
        Commands::AuthStatus { verify } => {
            commands::session::auth_status(catalog, verify).await?;
        }
    }
    Ok(())
}
