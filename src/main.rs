//! Inmomarket server
//!
//! Binary entry point: loads configuration, brings up the market store and
//! its snapshot files, optionally seeds demo data, and serves the REST API
//! until a shutdown signal lands.

use clap::Parser;
use inmomarket::auth::{NewAccount, TokenKeys};
use inmomarket::catalog::CatalogService;
use inmomarket::config::{generate_default_config, Config, LoggingConfig};
use inmomarket::listings::{ListingService, PropertyDraft};
use inmomarket::store::{MarketStore, Role, StoreConfig};
use inmomarket::visits::VisitService;
use inmomarket::{api, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "inmomarket", version, about = "Real-estate marketplace service")]
struct Cli {
    /// Path to a TOML config file (default locations are tried otherwise)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed demo accounts, catalog and listings into an empty store
    #[arg(long)]
    seed: bool,

    /// Print a commented default config file and exit
    #[arg(long)]
    print_default_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    init_tracing(&config.logging);
    tracing::info!("Inmomarket v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(MarketStore::new(StoreConfig {
        data_dir: PathBuf::from(&config.store.data_dir),
        snapshots_enabled: config.store.snapshots_enabled,
    }));
    store.load_snapshots().await?;

    if cli.seed {
        if store.users().is_empty().await {
            seed_demo_data(&store).await?;
        } else {
            tracing::warn!("Store already has accounts; skipping demo seed");
        }
    }

    let stats = store.stats().await;
    tracing::info!("Store ready: {}", stats);

    let keys = TokenKeys::new(&config.auth.jwt_secret, config.auth.token_ttl_hours);
    let api_config = api::ApiConfig::new(config.api.host.clone(), config.api.port);
    let state = AppState::new(Arc::clone(&store), keys, api_config.clone());

    api::serve(state, &api_config).await?;

    store.save_snapshots().await?;
    tracing::info!("Inmomarket shutdown complete");
    Ok(())
}

/// Initialize the tracing subscriber from the logging config.
/// RUST_LOG wins over the configured level when set.
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("inmomarket={}", logging.level)),
    );

    if logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Populate an empty store with one account per role, a small catalog and a
/// listed property with an open visit window.
async fn seed_demo_data(store: &Arc<MarketStore>) -> anyhow::Result<()> {
    tracing::info!("Seeding demo data...");

    let auth = inmomarket::auth::AuthService::new(
        Arc::clone(store),
        // Seed-time tokens are discarded; the key does not matter here
        TokenKeys::new("seed", 1),
    );
    let catalog = CatalogService::new(Arc::clone(store));
    let listings = ListingService::new(Arc::clone(store));
    let visits = VisitService::new(Arc::clone(store));

    let account = |email: &str, name: &str, role| NewAccount {
        email: email.to_string(),
        password: "Secreto123".to_string(),
        full_name: name.to_string(),
        phone: "3001234567".to_string(),
        role,
        birth_date: None,
    };

    auth.register(account("admin@inmomarket.test", "Administración", Role::Admin))
        .await?;
    let (seller, _) = auth
        .register(account("vendedor@inmomarket.test", "Vendedor Uno", Role::Seller))
        .await?;
    auth.register(account("comprador@inmomarket.test", "Comprador Uno", Role::Buyer))
        .await?;

    let casa = catalog.create_category("Casa", "Casas unifamiliares").await?;
    let apartamento = catalog
        .create_category("Apartamento", "Apartamentos y aparta-estudios")
        .await?;
    catalog.create_category("Oficina", "Espacios comerciales").await?;

    let antioquia = catalog
        .create_location("Medellín", "Área metropolitana", "Antioquia", "")
        .await?;
    let cundinamarca = catalog
        .create_location("Bogotá", "Distrito capital", "Cundinamarca", "")
        .await?;

    let poblado = listings
        .create_property(
            seller.id,
            PropertyDraft {
                name: "Casa en El Poblado".to_string(),
                description: "Tres habitaciones, balcón y garaje doble".to_string(),
                rooms: 3,
                baths: 2,
                price: 650_000_000,
                category_id: casa.id,
                location_id: antioquia.id,
            },
        )
        .await?;
    listings
        .create_property(
            seller.id,
            PropertyDraft {
                name: "Apartamento en Chapinero".to_string(),
                description: "Dos habitaciones, cerca al transporte".to_string(),
                rooms: 2,
                baths: 1,
                price: 420_000_000,
                category_id: apartamento.id,
                location_id: cundinamarca.id,
            },
        )
        .await?;

    let start = chrono::Utc::now() + chrono::Duration::days(1);
    visits
        .create_schedule(seller.id, poblado.id, start, start + chrono::Duration::hours(2), None)
        .await?;

    tracing::info!(
        "Demo data ready: log in with admin@inmomarket.test / Secreto123 (or vendedor@, comprador@)"
    );
    Ok(())
}
