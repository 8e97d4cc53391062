mod cart;
mod compare;
mod search;

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use storefront_core::{AppConfig, FieldMapping, Refinement};
use storefront_gateway::StorefrontClient;
use storefront_session::{EventSink, Storefront, StorefrontEvent, StorefrontSettings};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storefront-cli")]
#[command(about = "Drive a storefront search session from the command line")]
struct Cli {
    /// Effective account id, overriding `STOREFRONT_EFFECTIVE_ACCOUNT_ID`
    #[arg(long, global = true)]
    account: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search the catalog and print the results view
    Search {
        /// Free-text search term
        #[arg(long)]
        term: Option<String>,

        /// Category to search in (defaults to the landing category)
        #[arg(long)]
        category: Option<String>,

        /// 1-based page to show
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        page: i32,

        /// Facet filter as `NAME=VALUE[,VALUE...]`; repeatable
        #[arg(long = "refine", value_parser = search::parse_refinement)]
        refinements: Vec<Refinement>,
    },
    /// Print the current cart summary
    Cart,
    /// Add a product to the cart
    AddToCart {
        product_id: String,

        #[arg(long, default_value_t = 1)]
        quantity: u32,

        /// Product name used in notifications (defaults to the id)
        #[arg(long)]
        name: Option<String>,
    },
    /// Stage products for comparison and print the comparison cards
    Compare {
        #[arg(required = true)]
        product_ids: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = storefront_core::load_app_config().context("failed to load configuration")?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let (storefront, mut events) = build_storefront(&config, cli.account.as_deref())?;

    let result = match cli.command {
        Commands::Search {
            term,
            category,
            page,
            refinements,
        } => {
            search::run_search(
                &storefront,
                search::SearchArgs {
                    term,
                    category,
                    page,
                    refinements,
                },
            )
            .await
        }
        Commands::Cart => cart::run_cart(&storefront).await,
        Commands::AddToCart {
            product_id,
            quantity,
            name,
        } => {
            let name = name.as_deref().unwrap_or(&product_id);
            cart::run_add_to_cart(&storefront, &product_id, name, quantity).await
        }
        Commands::Compare { product_ids } => compare::run_compare(&storefront, &product_ids).await,
    };

    print_events(&mut events)?;
    result
}

fn build_storefront(
    config: &AppConfig,
    account_override: Option<&str>,
) -> anyhow::Result<(Storefront, UnboundedReceiver<StorefrontEvent>)> {
    let field_mapping = load_field_mapping(config)?;

    let client = StorefrontClient::new(
        &config.base_url,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("failed to build storefront client")?;

    let mut settings = StorefrontSettings::from_config(config, field_mapping);
    if let Some(account) = account_override {
        settings.effective_account_id = Some(account.to_owned());
    }

    tracing::info!(
        env = ?config.env,
        community_id = %settings.community_id,
        layout = %settings.layout,
        "storefront session ready"
    );

    let (sink, events) = EventSink::channel();
    Ok((Storefront::new(Arc::new(client), settings, sink), events))
}

fn load_field_mapping(config: &AppConfig) -> anyhow::Result<Option<FieldMapping>> {
    let Some(path) = config.field_mapping_path.as_deref() else {
        return Ok(None);
    };
    let mapping = storefront_core::load_field_mapping(path)
        .with_context(|| format!("failed to load field mapping from {}", path.display()))?;
    tracing::debug!(fields = mapping.fields.len(), "loaded field mapping");
    Ok(Some(mapping))
}

/// Prints every event the session raised, one JSON object per line.
fn print_events(events: &mut UnboundedReceiver<StorefrontEvent>) -> anyhow::Result<()> {
    while let Ok(event) = events.try_recv() {
        println!("{}", serde_json::to_string(&event)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests;
