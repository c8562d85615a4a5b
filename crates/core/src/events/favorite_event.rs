//! Favorite event types.

use serde::{Deserialize, Serialize};

use crate::catalog::Symbol;

/// Events emitted by the favorite store after a successful mutation.
///
/// The payload is the symbol only. Subscribers cannot tell which category
/// changed and must apply the event to every symbol with the same name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FavoriteEvent {
    /// A symbol was saved as a favorite.
    FavoriteAdded {
        #[serde(with = "symbol_payload")]
        symbol: Symbol,
    },

    /// A symbol was removed from the favorites.
    FavoriteRemoved {
        #[serde(with = "symbol_payload")]
        symbol: Symbol,
    },
}

// Catalog files list symbols as bare names; event payloads keep the flag too.
mod symbol_payload {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::catalog::{Symbol, SymbolName};

    #[derive(Serialize, Deserialize)]
    struct SymbolPayload {
        name: SymbolName,
        is_favorite: bool,
    }

    pub fn serialize<S: Serializer>(symbol: &Symbol, serializer: S) -> Result<S::Ok, S::Error> {
        SymbolPayload {
            name: symbol.name.clone(),
            is_favorite: symbol.is_favorite,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Symbol, D::Error> {
        let payload = SymbolPayload::deserialize(deserializer)?;
        Ok(Symbol::new(payload.name).with_favorite(payload.is_favorite))
    }
}

impl FavoriteEvent {
    /// Creates a FavoriteAdded event.
    pub fn added(symbol: Symbol) -> Self {
        Self::FavoriteAdded { symbol }
    }

    /// Creates a FavoriteRemoved event.
    pub fn removed(symbol: Symbol) -> Self {
        Self::FavoriteRemoved { symbol }
    }

    pub fn symbol(&self) -> &Symbol {
        match self {
            Self::FavoriteAdded { symbol } | Self::FavoriteRemoved { symbol } => symbol,
        }
    }

    /// The favorite flag the event asks subscribers to apply.
    pub fn is_favorite(&self) -> bool {
        matches!(self, Self::FavoriteAdded { .. })
    }
}
