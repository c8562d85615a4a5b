use std::collections::HashSet;

use log::debug;

use crate::catalog::Category;
use crate::events::FavoriteEvent;
use crate::favorites::{favorite_names, FavoriteCollection};

/// Rewrites every flag in `categories` from a full store snapshot.
///
/// Categories join favorites by category name. Every symbol listed under the
/// matching key is marked, every other symbol is cleared, so a category with
/// several favorites gets all of them. Returns the number of flags changed.
pub fn reconcile_all(categories: &mut [Category], favorites: &FavoriteCollection) -> usize {
    let mut changed = 0;

    for category in categories.iter_mut() {
        let names: HashSet<&str> = favorite_names(favorites, &category.name).collect();

        for symbol in category.symbols.iter_mut() {
            let is_favorite = names.contains(symbol.name.as_str());
            if symbol.is_favorite != is_favorite {
                symbol.is_favorite = is_favorite;
                changed += 1;
            }
        }
    }

    debug!("Full reconciliation changed {} favorite flags", changed);
    changed
}

/// Sets the flag on every symbol called `name`, in every category.
///
/// Change events do not say which category they came from, so all name
/// matches are updated. Returns the number of flags changed.
pub fn apply_event(categories: &mut [Category], name: &str, is_favorite: bool) -> usize {
    let mut changed = 0;
    for symbol in categories
        .iter_mut()
        .flat_map(|category| category.symbols.iter_mut())
        .filter(|symbol| symbol.name == name)
    {
        if symbol.is_favorite != is_favorite {
            symbol.is_favorite = is_favorite;
            changed += 1;
        }
    }
    changed
}

pub fn apply_favorite_event(categories: &mut [Category], event: &FavoriteEvent) -> usize {
    apply_event(categories, &event.symbol().name, event.is_favorite())
}
