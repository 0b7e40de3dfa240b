//! QKart CLI - drive the headless storefront from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog, optionally filtered
//! qkart products
//! qkart products --search phone
//!
//! # Debounced live search: type, pause, results appear
//! qkart watch
//!
//! # Account management
//! qkart register -u criodo -p secret1
//! qkart login -u criodo -p secret1
//! qkart logout
//!
//! # Cart (requires a login)
//! qkart cart show
//! qkart cart add v4sLtEcMpzabRyfx
//! qkart cart set v4sLtEcMpzabRyfx 3
//! ```
//!
//! The backend endpoint comes from `QKART_ENDPOINT`; the session persists
//! in the configured session file between invocations, like the browser's
//! local storage did between page loads.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};

use qkart_storefront::app::StorefrontApp;
use qkart_storefront::config::StorefrontConfig;
use qkart_storefront::notify::{Notifier, Severity};
use qkart_storefront::session::FileSessionStore;

mod commands;

#[derive(Parser)]
#[command(name = "qkart")]
#[command(author, version, about = "QKart storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog, optionally filtered by a search term
    Products {
        /// Search term to filter by
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Live debounced search over lines read from stdin
    Watch,
    /// Create an account
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Log in and persist the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Destroy the persisted session
    Logout,
    /// Inspect or mutate the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the reconciled cart and its order total
    Show,
    /// Add one unit of a product (rejected if already in the cart)
    Add {
        /// Product ID from the catalog listing
        product_id: String,
    },
    /// Set the absolute quantity of a line item (0 deletes it)
    Set {
        /// Product ID from the catalog listing
        product_id: String,
        /// New absolute quantity
        qty: u32,
    },
}

/// Notifier that prints notifications the way the UI popped snackbars.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    #[allow(clippy::print_stdout)]
    fn notify(&self, severity: Severity, message: &str) {
        let tag = match severity {
            Severity::Success => "ok",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        println!("[{tag}] {message}");
    }
}

#[tokio::main]
async fn main() {
    // Default to info for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "qkart=info,qkart_storefront=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let mut app = StorefrontApp::new(
        &config,
        Box::new(FileSessionStore::new(config.session_file.clone())),
        Arc::new(ConsoleNotifier),
    )?;

    match cli.command {
        Commands::Products { search } => commands::catalog::products(&mut app, search).await,
        Commands::Watch => commands::catalog::watch(&mut app).await?,
        Commands::Register { username, password } => {
            commands::auth::register(&mut app, username, password).await;
        }
        Commands::Login { username, password } => {
            commands::auth::login(&mut app, username, password).await;
        }
        Commands::Logout => commands::auth::logout(&mut app),
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&mut app).await,
            CartAction::Add { product_id } => {
                commands::cart::add(&mut app, &product_id).await;
            }
            CartAction::Set { product_id, qty } => {
                commands::cart::set(&mut app, &product_id, qty).await;
            }
        },
    }
    Ok(())
}
