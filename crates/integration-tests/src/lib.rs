//! Integration tests for the museum cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p museum-cart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - UI event sequences through a session, end to end
//! - `persistence` - file-backed storage, corrupted records, key versioning
//!
//! Shared fixtures live here so both suites build carts the same way.

use museum_cart::{CartSession, CartStore, MemoryStorage, PricingConfig, RecordStorage};

/// A catalog entry as the shop page lists it.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub price: &'static str,
}

/// The shop page's catalog used across tests.
pub const CATALOG: [CatalogEntry; 4] = [
    CatalogEntry {
        id: "poster",
        name: "Gallery Poster",
        price: "30",
    },
    CatalogEntry {
        id: "pin",
        name: "Enamel Pin",
        price: "10",
    },
    CatalogEntry {
        id: "bowl",
        name: "Glazed Bowl",
        price: "60",
    },
    CatalogEntry {
        id: "print",
        name: "Archival Print",
        price: "120",
    },
];

/// Look up a catalog entry by id.
///
/// # Panics
///
/// Panics if `id` is not in [`CATALOG`].
#[must_use]
#[allow(clippy::panic)]
pub fn entry(id: &str) -> CatalogEntry {
    CATALOG
        .iter()
        .find(|e| e.id == id)
        .copied()
        .unwrap_or_else(|| panic!("unknown catalog id {id}"))
}

/// A session over in-memory storage with default pricing.
#[must_use]
pub fn memory_session(storage: &MemoryStorage) -> CartSession<&MemoryStorage> {
    CartSession::new(CartStore::new(storage), PricingConfig::default())
}

/// Select catalog item `id` `times` times.
///
/// # Panics
///
/// Panics if the catalog entry fails validation or the cart cannot be saved.
#[allow(clippy::expect_used)]
pub fn select<S: RecordStorage>(session: &CartSession<S>, id: &str, times: u32) {
    let e = entry(id);
    for _ in 0..times {
        session
            .select_item(e.id, e.name, e.price, None)
            .expect("select catalog item");
    }
}
