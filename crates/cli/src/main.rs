//! Agrimart CLI - Cart and catalog tools.
//!
//! # Usage
//!
//! ```bash
//! # List products
//! agrimart catalog list
//!
//! # Work with the local cart
//! agrimart cart add 1 5kg
//! agrimart cart show
//! agrimart cart clear --store /tmp/agrimart
//! ```
//!
//! # Commands
//!
//! - `cart` - Show and edit the cart kept in the store directory
//! - `catalog list` - List products and sizes

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use agrimart_core::{CartStore, FileStore};
use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "agrimart")]
#[command(author, version, about = "Agrimart CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show and edit the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Inspect the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

/// Where the cart snapshot lives.
#[derive(Args)]
struct StoreArgs {
    /// Directory holding the cart snapshot
    #[arg(long = "store", env = "AGRIMART_CART_DIR", default_value = ".agrimart")]
    dir: PathBuf,
}

/// Where products come from.
#[derive(Args)]
struct CatalogArgs {
    /// YAML product list (defaults to the built-in catalog)
    #[arg(long = "catalog")]
    path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show {
        #[command(flatten)]
        store: StoreArgs,
    },
    /// Add one unit of a product size
    Add {
        /// Product id
        product_id: String,
        /// Size label (e.g. 5kg)
        size: String,
        #[command(flatten)]
        store: StoreArgs,
        #[command(flatten)]
        catalog: CatalogArgs,
    },
    /// Set the quantity of a cart line
    Update {
        /// Product id
        product_id: String,
        /// Size label
        size: String,
        /// New quantity (at least 1)
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
        #[command(flatten)]
        store: StoreArgs,
    },
    /// Remove a cart line
    Remove {
        /// Product id
        product_id: String,
        /// Size label
        size: String,
        #[command(flatten)]
        store: StoreArgs,
    },
    /// Empty the cart
    Clear {
        #[command(flatten)]
        store: StoreArgs,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products and their sizes
    List {
        #[command(flatten)]
        catalog: CatalogArgs,
    },
}

fn main() {
    dotenvy::dotenv().ok();

    // Command output goes through tracing, so default to info
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn open_cart(store: StoreArgs) -> CartStore<FileStore> {
    tracing::debug!(dir = %store.dir.display(), "Opening cart store");
    CartStore::hydrate(FileStore::new(store.dir))
}

fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show { store } => commands::cart::show(&open_cart(store)),
            CartAction::Add {
                product_id,
                size,
                store,
                catalog,
            } => {
                let catalog = commands::catalog::load(catalog.path.as_deref())?;
                commands::cart::add(&mut open_cart(store), &catalog, &product_id, &size)?;
            }
            CartAction::Update {
                product_id,
                size,
                quantity,
                store,
            } => commands::cart::update(&mut open_cart(store), &product_id, &size, quantity)?,
            CartAction::Remove {
                product_id,
                size,
                store,
            } => commands::cart::remove(&mut open_cart(store), &product_id, &size)?,
            CartAction::Clear { store } => commands::cart::clear(&mut open_cart(store))?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::List { catalog } => {
                let catalog = commands::catalog::load(catalog.path.as_deref())?;
                commands::catalog::list(&catalog);
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_update_with_negative_quantity() {
        let cli = Cli::try_parse_from([
            "agrimart", "cart", "update", "1", "5kg", "-1", "--store", "/tmp/cart",
        ])
        .unwrap_or_else(|e| panic!("{e}"));
        let Commands::Cart {
            action: CartAction::Update { quantity, store, .. },
        } = cli.command
        else {
            panic!("expected cart update");
        };
        assert_eq!(quantity, -1);
        assert_eq!(store.dir, PathBuf::from("/tmp/cart"));
    }
}
