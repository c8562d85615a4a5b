use std::sync::Arc;

use anyhow::Context;
use symbols_core::views::{CategoriesViewModel, FavoritesViewModel};
use symbols_core::{
    ChangeNotifier, FavoriteStoreTrait, IndexPath, InMemoryFavoriteStore, StaticCatalog,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

const SAMPLE_CATALOG: &str = include_str!("../data/sample_catalog.json");

pub struct AppState {
    pub catalog: StaticCatalog,
    pub notifier: ChangeNotifier,
    pub store: Arc<dyn FavoriteStoreTrait>,
}

/// Counts reported at the end of a scripted session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub favorited: usize,
    pub deleted: usize,
    pub remaining: usize,
}

pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs() {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn load_catalog(config: &Config) -> anyhow::Result<StaticCatalog> {
    let catalog = match &config.catalog_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read catalog {}", path.display()))?;
            StaticCatalog::from_json(&json)
                .with_context(|| format!("Failed to parse catalog {}", path.display()))?
        }
        None => StaticCatalog::from_json(SAMPLE_CATALOG).context("Invalid sample catalog")?,
    };
    tracing::info!(
        "Catalog loaded: {} categories, {} symbols",
        catalog.category_count(),
        catalog.symbol_count()
    );
    Ok(catalog)
}

/// Loads the catalog and spawns the store. Must run inside a Tokio runtime.
pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let catalog = load_catalog(config)?;
    let notifier = ChangeNotifier::new();
    let store: Arc<dyn FavoriteStoreTrait> = Arc::new(InMemoryFavoriteStore::spawn_with_config(
        Arc::new(notifier.clone()),
        config.store_config(),
    ));
    tracing::info!(
        "Favorite store started (latency {:?}, mailbox {})",
        config.store_latency,
        config.mailbox_capacity
    );

    Ok(AppState {
        catalog,
        notifier,
        store,
    })
}

/// Favorites the first symbol of every category from its detail screen,
/// then deletes every other favorites section in one batch.
pub async fn run_session(state: &AppState) -> anyhow::Result<SessionSummary> {
    let categories =
        CategoriesViewModel::new(&state.catalog, Arc::clone(&state.store), &state.notifier)?;
    let favorites = FavoritesViewModel::new(Arc::clone(&state.store), &state.notifier);
    categories.reload().await?;

    let mut favorited = 0;
    for section in 0..categories.section_count() {
        if categories.item_count(section) == 0 {
            continue;
        }
        let detail = categories.detail(IndexPath::new(section, 0))?;
        if detail.is_favorite() {
            continue;
        }
        detail
            .toggle_favorite()
            .await
            .with_context(|| format!("Failed to favorite {}", detail.symbol().name))?;
        favorited += 1;
        tracing::info!(
            "{} in {}: button now reads \"{}\"",
            detail.symbol().name,
            detail.key().category_name,
            detail.button_title()
        );
    }
    log_categories(&categories);

    favorites.reload().await?;
    print_favorites(&favorites);

    let selection: Vec<IndexPath> = (0..favorites.section_count())
        .step_by(2)
        .map(|section| IndexPath::new(section, 0))
        .collect();
    favorites
        .delete_favorites(&selection)
        .await
        .context("Batch delete failed")?;
    tracing::info!("Deleted {} favorites", selection.len());
    print_favorites(&favorites);

    let changed = categories.reload().await?;
    tracing::info!("Categories reconciled, {} flags changed", changed);
    log_categories(&categories);

    let remaining = state
        .store
        .get_all()
        .await?
        .values()
        .map(Vec::len)
        .sum();

    Ok(SessionSummary {
        favorited,
        deleted: selection.len(),
        remaining,
    })
}

fn log_categories(categories: &CategoriesViewModel) {
    for category in categories.categories() {
        let names: Vec<&str> = category
            .symbols
            .iter()
            .filter(|s| s.is_favorite)
            .map(|s| s.name.as_str())
            .collect();
        tracing::info!(
            "[{}] {}/{} favorite: {:?}",
            category.name,
            names.len(),
            category.symbols.len(),
            names
        );
    }
}

fn print_favorites(favorites: &FavoritesViewModel) {
    if favorites.is_empty() {
        println!("No favorites");
        return;
    }
    for (key, symbols) in favorites.favorites() {
        println!("{} ({})", key.category_name, key.icon_name);
        for symbol in symbols {
            println!("  {}", symbol.name);
        }
    }
}
