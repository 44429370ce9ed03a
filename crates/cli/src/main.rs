//! ReThread CLI - browse, buy and sell from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! rethread products list --category women --price 500-1000 --sort price-low
//! rethread products show 3
//!
//! # Manage the cart
//! rethread cart add 3 --quantity 2
//! rethread cart show
//!
//! # Sign in and sell
//! rethread login --name "Asha Rao" --email asha@example.com --role seller
//! rethread seller listings --status active
//! ```
//!
//! # Commands
//!
//! - `products` - List, search and show catalog products
//! - `cart` - Show and change the persisted cart
//! - `checkout` - Place a simulated order for the cart
//! - `login` / `logout` / `whoami` - Simulated session
//! - `seller` - Seller dashboard and listing submission
//! - `admin` - Moderation queue

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rethread_core::{Condition, Role};
use rethread_storefront::catalog::{FilterSpec, PriceRange, SortKey};
use rethread_storefront::config::{LogFormat, StorefrontConfig};
use rethread_storefront::services::StatusFilter;
use rethread_storefront::store::KeyValueStore;
use rethread_storefront::{AppError, Storefront};

mod commands;

#[derive(Parser)]
#[command(name = "rethread")]
#[command(author, version, about = "ReThread second-hand marketplace")]
struct Cli {
    /// Store file (overrides `RETHREAD_STORE_PATH`)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for everything in the cart
    Checkout(commands::checkout::CheckoutArgs),
    /// Sign in (simulated)
    Login {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Role (`buyer`, `seller`, `both`, `admin`)
        #[arg(short, long, default_value = "buyer")]
        role: Role,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Seller tools
    Seller {
        #[command(subcommand)]
        action: SellerAction,
    },
    /// Admin tools
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products matching filters
    List(ListArgs),
    /// Show one product
    Show {
        /// Product id
        id: String,
    },
    /// Show featured products
    Featured {
        /// Maximum number to show
        #[arg(short, long, default_value_t = 6)]
        limit: usize,
    },
    /// Show the available filter choices
    Filters,
}

#[derive(clap::Args)]
struct ListArgs {
    /// Department (`women`, `men`, `kids`, `accessories`)
    #[arg(long)]
    category: Option<String>,

    /// Price bucket such as `500-1000` or `5000-`
    #[arg(long)]
    price: Option<PriceRange>,

    /// Condition; repeat to allow several
    #[arg(long)]
    condition: Vec<Condition>,

    /// Size; repeat to allow several
    #[arg(long)]
    size: Vec<String>,

    /// Color; repeat to allow several
    #[arg(long)]
    color: Vec<String>,

    /// Brand; repeat to allow several
    #[arg(long)]
    brand: Vec<String>,

    /// Free-text search over name, description and brand
    #[arg(short, long)]
    search: Option<String>,

    /// Sort order (`newest`, `price-low`, `price-high`, `popular`)
    #[arg(long, default_value = "newest")]
    sort: SortKey,
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart lines and totals
    Show,
    /// Add a product
    Add {
        /// Product id
        id: String,

        /// Quantity to add
        #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
        quantity: String,
    },
    /// Replace a line's quantity
    Set {
        /// Product id
        id: String,

        /// New quantity (at least 1)
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },
    /// Remove a line
    Remove {
        /// Product id
        id: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum SellerAction {
    /// Show your listings
    Listings {
        /// `all`, `active`, `pending` or `sold`
        #[arg(long, default_value = "all")]
        status: StatusFilter,

        /// Search over name and description
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Submit a new listing for review
    Submit(commands::seller::SubmitArgs),
}

#[derive(Subcommand)]
enum AdminAction {
    /// Show the moderation queue
    Queue {
        /// `all`, `pending`, `active` or `rejected`
        #[arg(long, default_value = "pending")]
        status: StatusFilter,

        /// Search over name and seller
        #[arg(short, long, default_value = "")]
        search: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_format);

    if let Some(path) = cli.store.clone() {
        config.store_path = path;
    }
    tracing::debug!(store = %config.store_path.display(), "Opening store");
    let storefront = Storefront::open(config);

    let result: Result<(), Box<dyn std::error::Error>> =
        run(cli, &storefront).await.map_err(Into::into);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output stays pipeable.
fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let is_json = format == LogFormat::Json;
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run<S: KeyValueStore>(cli: Cli, storefront: &Storefront<S>) -> Result<(), AppError> {
    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List(args) => {
                let mut spec = FilterSpec::new().sort(args.sort);
                if let Some(category) = args.category {
                    spec = spec.category(category);
                }
                if let Some(price) = args.price {
                    spec = spec.price(price);
                }
                if let Some(search) = args.search {
                    spec = spec.search(search);
                }
                spec = args.condition.into_iter().fold(spec, |s, c| s.condition(c));
                spec = args.size.into_iter().fold(spec, |s, v| s.size(v));
                spec = args.color.into_iter().fold(spec, |s, v| s.color(v));
                spec = args.brand.into_iter().fold(spec, |s, v| s.brand(v));
                commands::products::list(storefront, &spec);
            }
            ProductsAction::Show { id } => commands::products::show(storefront, &id)?,
            ProductsAction::Featured { limit } => commands::products::featured(storefront, limit),
            ProductsAction::Filters => commands::products::filters(),
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(storefront)?,
            CartAction::Add { id, quantity } => commands::cart::add(storefront, &id, &quantity)?,
            CartAction::Set { id, quantity } => {
                commands::cart::set(storefront, &id, &quantity)?;
            }
            CartAction::Remove { id } => commands::cart::remove(storefront, &id)?,
            CartAction::Clear => commands::cart::clear(storefront)?,
        },
        Commands::Checkout(args) => commands::checkout::run(storefront, args).await?,
        Commands::Login { name, email, role } => {
            commands::session::login(storefront, &name, &email, role)?;
        }
        Commands::Logout => commands::session::logout(storefront)?,
        Commands::Whoami => commands::session::whoami(storefront)?,
        Commands::Seller { action } => match action {
            SellerAction::Listings { status, search } => {
                commands::seller::listings(storefront, status, &search)?;
            }
            SellerAction::Submit(args) => commands::seller::submit(storefront, args).await?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Queue { status, search } => {
                commands::admin::queue(storefront, status, &search)?;
            }
        },
    }
    Ok(())
}
