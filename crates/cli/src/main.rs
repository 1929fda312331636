//! Wardrobe CLI - Browse the clothing catalog and manage a cart.
//!
//! # Usage
//!
//! ```bash
//! # List womens tops, cheapest first
//! wardrobe browse --gender womens --category Tops --sort price
//!
//! # Show a product with related items
//! wardrobe show 3
//!
//! # Add a variant to the cart, then price it
//! wardrobe cart add 3 --size M --color Grey --quantity 2
//! wardrobe summary --method express --destination US
//!
//! # Drop the cached catalog and fetch it again
//! wardrobe refresh
//! ```
//!
//! # Commands
//!
//! - `browse` - Filtered, sorted product list
//! - `facets` - Available filter values
//! - `featured` - Home page products
//! - `show` - Product details and related products
//! - `cart` - Show or change the cart
//! - `summary` - Price the cart for a shipping method and destination
//! - `checkout` - Complete the order and empty the cart
//! - `refresh` - Refetch the catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wardrobe_core::{Destination, ShippingMethod, SortDirection, SortField};
use wardrobe_storefront::{
    AppError, CatalogClient, CatalogError, FileStore, StoreError, Storefront,
    StorefrontConfig, invalidate_catalog_cache,
};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "wardrobe")]
#[command(author, version, about = "Browse the clothing catalog and manage your cart")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products with filters and sorting applied
    Browse {
        /// Gender to include (repeatable)
        #[arg(long)]
        gender: Vec<String>,

        /// Category to include (repeatable)
        #[arg(long)]
        category: Vec<String>,

        /// Size to include (repeatable)
        #[arg(long)]
        size: Vec<String>,

        /// Color name to include (repeatable)
        #[arg(long)]
        color: Vec<String>,

        /// Sort field (`name`, `price`, `category`)
        #[arg(long)]
        sort: Option<SortField>,

        /// Sort direction (`asc`, `desc`)
        #[arg(long)]
        direction: Option<SortDirection>,
    },
    /// Show the values available for each filter
    Facets,
    /// Show the featured products
    Featured,
    /// Show one product and related products
    Show {
        /// Product ID
        id: String,
    },
    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Price the cart
    Summary {
        #[command(flatten)]
        shipping: ShippingArgs,
    },
    /// Complete the order and empty the cart
    Checkout {
        #[command(flatten)]
        shipping: ShippingArgs,
    },
    /// Drop the cached catalog and fetch it again
    Refresh,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add a product variant
    Add {
        /// Product ID
        id: String,

        #[arg(short, long)]
        size: String,

        #[arg(short, long)]
        color: String,

        /// Quantity; anything below one counts as one
        #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
        quantity: String,
    },
    /// Add one of the product's first size and color
    QuickAdd {
        /// Product ID
        id: String,
    },
    /// Change the quantity of a line
    Update {
        /// Product ID
        id: String,

        #[arg(short, long)]
        size: String,

        #[arg(short, long)]
        color: String,

        /// New quantity; anything below one counts as one
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },
    /// Remove a line
    Remove {
        /// Product ID
        id: String,

        #[arg(short, long)]
        size: String,

        #[arg(short, long)]
        color: String,
    },
}

#[derive(clap::Args)]
struct ShippingArgs {
    /// Shipping method (`standard`, `express`, `priority`)
    #[arg(short, long, default_value = "standard")]
    method: ShippingMethod,

    /// Destination (`CA`, `US`, `INTL`)
    #[arg(short, long, default_value = "CA")]
    destination: Destination,
}

/// Errors surfaced by a command.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("Could not create catalog client: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Could not open state file: {0}")]
    Store(#[from] StoreError),

    #[error("Output error: {0}")]
    Io(#[from] io::Error),
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let _ = writeln!(io::stderr(), "wardrobe: {e}");
            std::process::exit(2);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wardrobe_storefront=info,wardrobe_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, &config).await {
        if let CliError::App(app) = &e {
            app.report();
            let _ = writeln!(io::stderr(), "wardrobe: {}", app.user_message());
        } else {
            tracing::error!("Command failed: {e}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), CliError> {
    let mut store = FileStore::open(config.state_path.clone())?;
    if matches!(cli.command, Commands::Refresh) {
        let dropped = invalidate_catalog_cache(&mut store)?;
        tracing::debug!(dropped, "Catalog cache invalidated");
    }

    let client = CatalogClient::new(config)?;
    let mut storefront = Storefront::open(store, &client).await?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match cli.command {
        Commands::Browse {
            gender,
            category,
            size,
            color,
            sort,
            direction,
        } => commands::browse::list(
            &mut storefront,
            &mut out,
            &commands::browse::Selection {
                gender,
                category,
                size,
                color,
                sort,
                direction,
            },
        ),
        Commands::Facets => commands::browse::facets(&storefront, &mut out),
        Commands::Featured => commands::browse::featured(&storefront, &mut out),
        Commands::Show { id } => commands::browse::show(&storefront, &mut out, &id),
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&storefront, &mut out),
            CartAction::Add {
                id,
                size,
                color,
                quantity,
            } => commands::cart::add(&mut storefront, &mut out, &id, &size, &color, &quantity),
            CartAction::QuickAdd { id } => commands::cart::quick_add(&mut storefront, &mut out, &id),
            CartAction::Update {
                id,
                size,
                color,
                quantity,
            } => commands::cart::update(&mut storefront, &mut out, &id, &size, &color, &quantity),
            CartAction::Remove { id, size, color } => {
                commands::cart::remove(&mut storefront, &mut out, &id, &size, &color)
            }
        },
        Commands::Summary { shipping } => commands::checkout::summary(
            &storefront,
            &mut out,
            shipping.method,
            shipping.destination,
        ),
        Commands::Checkout { shipping } => commands::checkout::checkout(
            &mut storefront,
            &mut out,
            shipping.method,
            shipping.destination,
        ),
        Commands::Refresh => commands::browse::refreshed(&storefront, &mut out),
    };

    render::notices(&mut out, &storefront.take_notices())?;
    result
}
