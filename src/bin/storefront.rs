//! Storefront Command Line Interface
//!
//! Terminal client for the burger storefront API.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog, optionally one category
//! storefront ingredients --category bun
//!
//! # Public order feed
//! storefront feed
//!
//! # Log in, assemble a burger and place the order
//! storefront order --email me@example.com --password secret \
//!     --bun 643d69a5c3f7b9001cfa093c --filling 643d69a5c3f7b9001cfa0941
//! ```

use anyhow::{anyhow, bail, Context, Result};
use burger_builder::api::MemoryCredentialStore;
use burger_builder::burger_types::{IngredientCategory, IngredientId};
use burger_builder::{
    HttpBurgerApi, PlaceOrderOutcome, Store, Storefront, StorefrontConfig, UuidIdGenerator,
};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(version = "0.1.0")]
#[command(about = "Browse the burger catalog and place orders")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: json or pretty (default)
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,

    /// API base URL (overrides BURGER_API_URL)
    #[arg(long, global = true, env = "BURGER_API_URL")]
    api_url: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// List purchasable ingredients
    Ingredients {
        /// Only this category: bun, main or sauce
        #[arg(short, long)]
        category: Option<IngredientCategory>,
    },

    /// Show the public order feed
    Feed,

    /// Log in, build a burger and submit it
    Order {
        #[arg(long, env = "BURGER_EMAIL")]
        email: String,

        #[arg(long, env = "BURGER_PASSWORD")]
        password: String,

        /// Catalog id of the bun
        #[arg(long)]
        bun: String,

        /// Catalog ids of the fillings, in stacking order
        #[arg(long = "filling")]
        fillings: Vec<String>,
    },
}

// =============================================================================
// MAIN
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "burger_builder=info,storefront=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = StorefrontConfig::from_env().context("Failed to load configuration")?;
    if let Some(url) = &cli.api_url {
        config.api_base_url = burger_builder::config::parse_base_url(url)?;
    }

    let api = HttpBurgerApi::new(&config, Arc::new(MemoryCredentialStore::new()))?;
    let store = Arc::new(Store::new(Arc::new(UuidIdGenerator)));
    let storefront = Storefront::new(store, Arc::new(api), config.routes.clone());

    match cli.command {
        Commands::Ingredients { category } => {
            cmd_ingredients(&storefront, category, cli.format).await
        }
        Commands::Feed => cmd_feed(&storefront, cli.format).await,
        Commands::Order {
            email,
            password,
            bun,
            fillings,
        } => cmd_order(&storefront, &email, &password, &bun, &fillings, cli.format).await,
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

async fn cmd_ingredients(
    storefront: &Storefront,
    category: Option<IngredientCategory>,
    format: OutputFormat,
) -> Result<()> {
    storefront
        .load_ingredients()
        .await
        .context("Failed to load ingredients")?;

    let state = storefront.state();
    let items: Vec<_> = state
        .ingredients
        .items
        .iter()
        .filter(|i| category.map_or(true, |c| i.category == c))
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&items)?),
        OutputFormat::Pretty => {
            for item in items {
                println!(
                    "{:<26} {:<6} {:>6}  {}",
                    item.id.as_str(),
                    item.category.as_str(),
                    item.price.to_string(),
                    item.name
                );
            }
        }
    }
    Ok(())
}

async fn cmd_feed(storefront: &Storefront, format: OutputFormat) -> Result<()> {
    let page = storefront
        .load_feed()
        .await
        .context("Failed to load the order feed")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&page)?),
        OutputFormat::Pretty => {
            println!("Total: {}  Today: {}", page.total, page.total_today);
            for order in &page.orders {
                let placed = order
                    .created_at
                    .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                println!(
                    "#{:<8} {:<8} {:<16} {}",
                    order.number,
                    order.status.as_str(),
                    placed,
                    order.name
                );
            }
        }
    }
    Ok(())
}

async fn cmd_order(
    storefront: &Storefront,
    email: &str,
    password: &str,
    bun: &str,
    fillings: &[String],
    format: OutputFormat,
) -> Result<()> {
    storefront
        .load_ingredients()
        .await
        .context("Failed to load ingredients")?;
    storefront
        .login(email, password, None)
        .await
        .context("Login failed")?;

    let state = storefront.state();
    let lookup = |id: &str| {
        state
            .ingredient(&IngredientId::from(id))
            .cloned()
            .ok_or_else(|| anyhow!("Unknown ingredient '{}'", id))
    };

    let bun = lookup(bun)?;
    if !bun.is_bun() {
        bail!("'{}' is a {}, not a bun", bun.id, bun.category);
    }
    let store = storefront.store();
    store.add_ingredient(bun);
    for id in fillings {
        store.add_ingredient(lookup(id.as_str())?);
    }
    let total = storefront.state().total_price();

    match storefront.place_order().await {
        PlaceOrderOutcome::Submitted(order) => {
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&order)?),
                OutputFormat::Pretty => {
                    println!("Order #{} placed: {} ({})", order.number, order.name, total)
                }
            }
            Ok(())
        }
        PlaceOrderOutcome::Refused(e) | PlaceOrderOutcome::Failed(e) => Err(e.into()),
        PlaceOrderOutcome::Ignored => bail!("An order is already being submitted"),
        PlaceOrderOutcome::Redirect(redirect) => {
            bail!("Not signed in (would redirect to {})", redirect.to)
        }
    }
}
