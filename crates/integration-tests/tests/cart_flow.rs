//! End-to-end cart flows through a session.
//!
//! These tests drive the same sequence of UI events the shop pages emit
//! (select, remove, clear, membership toggle) and check what the cart panel
//! and the catalog badges would show afterwards.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use museum_cart::pricing::always;
use museum_cart::{
    AppliedDiscount, CartView, DiscountChoice, DiscountOffer, ItemId, MemoryStorage,
    RecordStorage, StorageKey,
};
use museum_cart_integration_tests::{CATALOG, memory_session, select};

fn id(s: &str) -> ItemId {
    ItemId::parse(s).unwrap()
}

fn catalog_ids() -> Vec<ItemId> {
    CATALOG.iter().map(|e| id(e.id)).collect()
}

// =============================================================================
// Invoice Scenarios
// =============================================================================

#[test]
fn test_volume_discount_invoice() {
    let storage = MemoryStorage::new();
    let session = memory_session(&storage);
    select(&session, "poster", 2);
    select(&session, "pin", 1);

    let CartView::Filled { rows, summary } = session.view(&mut always(None)) else {
        panic!("expected a filled cart");
    };

    assert_eq!(rows.len(), 2);
    assert_eq!(summary.item_subtotal, "$70.00");
    assert_eq!(summary.volume_discount, "($3.50)");
    assert_eq!(summary.taxable_subtotal, "$91.50");
    assert_eq!(summary.tax_amount, "$9.33");
    assert_eq!(summary.total, "$100.83");
}

#[test]
fn test_member_with_volume_requires_one_prompt_per_render() {
    let storage = MemoryStorage::new();
    let mut session = memory_session(&storage);
    select(&session, "bowl", 1);
    session.set_member(true);

    let mut offers: Vec<DiscountOffer> = Vec::new();
    let mut answers = [Some(DiscountChoice::Volume), Some(DiscountChoice::Member), None].into_iter();
    let mut decider = |offer: &DiscountOffer| {
        offers.push(*offer);
        answers.next().flatten()
    };

    let applied: Vec<(AppliedDiscount, String)> = (0..3)
        .map(|_| match session.view(&mut decider) {
            CartView::Filled { summary, .. } => (summary.applied, summary.taxable_subtotal),
            CartView::Empty { .. } => panic!("expected a filled cart"),
        })
        .collect();

    assert_eq!(offers.len(), 3);
    assert_eq!(offers[0].member.to_string(), "$9.00");
    assert_eq!(offers[0].volume.to_string(), "$3.00");
    assert_eq!(applied[0], (AppliedDiscount::Volume, "$82.00".to_string()));
    assert_eq!(applied[1], (AppliedDiscount::Member, "$76.00".to_string()));
    assert_eq!(applied[2], (AppliedDiscount::None, "$85.00".to_string()));
}

#[test]
fn test_member_below_volume_tier_is_not_prompted() {
    let storage = MemoryStorage::new();
    let mut session = memory_session(&storage);
    select(&session, "pin", 2);
    session.set_member(true);

    let mut prompted = false;
    let view = session.view(&mut |_: &DiscountOffer| {
        prompted = true;
        None
    });

    let CartView::Filled { summary, .. } = view else {
        panic!("expected a filled cart");
    };
    assert!(!prompted);
    assert_eq!(summary.applied, AppliedDiscount::Member);
    assert_eq!(summary.member_discount, "($3.00)");
}

#[test]
fn test_top_tier_volume_discount() {
    let storage = MemoryStorage::new();
    let session = memory_session(&storage);
    select(&session, "print", 2);

    let CartView::Filled { summary, .. } = session.view(&mut always(None)) else {
        panic!("expected a filled cart");
    };
    assert_eq!(summary.item_subtotal, "$240.00");
    assert_eq!(summary.volume_discount, "($36.00)");
}

#[test]
fn test_largest_price_at_largest_quantity_renders() {
    let storage = MemoryStorage::new();
    storage
        .write(
            &StorageKey::default(),
            r#"[{"id":"gem","name":"Gem","price":"1000000000","qty":4294967295},
                {"id":"crown","name":"Crown","price":"1000000000","qty":4294967295}]"#,
        )
        .unwrap();
    let mut session = memory_session(&storage);
    session.set_member(true);

    let view = session.view(&mut always(Some(DiscountChoice::Member)));

    let CartView::Filled { summary, .. } = view else {
        panic!("expected a filled cart");
    };
    assert_eq!(summary.item_subtotal, "$8589934590000000000.00");
    assert_eq!(summary.applied, AppliedDiscount::Member);
}

// =============================================================================
// Empty State
// =============================================================================

#[test]
fn test_removing_everything_shows_empty_state() {
    let storage = MemoryStorage::new();
    let session = memory_session(&storage);
    select(&session, "pin", 1);
    session.remove_one(&id("pin")).unwrap();

    let view = session.view(&mut |_: &DiscountOffer| -> Option<DiscountChoice> {
        panic!("no prompt for an empty cart")
    });
    assert_eq!(view, CartView::empty());
}

#[test]
fn test_clear_resets_membership_and_cart() {
    let storage = MemoryStorage::new();
    let mut session = memory_session(&storage);
    select(&session, "bowl", 3);
    session.set_member(true);

    session.clear_all().unwrap();

    assert!(!session.is_member());
    assert!(session.view(&mut always(None)).is_empty());
    assert!(session.badges(&catalog_ids()).iter().all(|b| b.text.is_none()));
}

// =============================================================================
// Badge Consistency
// =============================================================================

#[test]
fn test_badges_track_every_mutation_across_surfaces() {
    let storage = MemoryStorage::new();
    let cart_panel = memory_session(&storage);
    let shop_grid = memory_session(&storage);
    let ids = catalog_ids();

    select(&shop_grid, "poster", 1);
    select(&cart_panel, "poster", 1);
    select(&cart_panel, "pin", 1);

    let texts: Vec<String> = shop_grid
        .badges(&ids)
        .iter()
        .map(|b| b.display_text().to_string())
        .collect();
    assert_eq!(texts, ["Qty: 2", "Qty: 1", "", ""]);

    cart_panel.remove_one(&id("poster")).unwrap();
    cart_panel.remove_one(&id("pin")).unwrap();

    let texts: Vec<String> = shop_grid
        .badges(&ids)
        .iter()
        .map(|b| b.display_text().to_string())
        .collect();
    assert_eq!(texts, ["Qty: 1", "", "", ""]);
}

#[test]
fn test_row_add_reuses_stored_metadata() {
    let storage = MemoryStorage::new();
    let session = memory_session(&storage);
    session
        .select_item("poster", "Gallery Poster", "30", Some("img/poster.jpg"))
        .unwrap();

    let line = session.cart().get(&id("poster")).cloned().unwrap();
    let cart = session.add_one(line.to_candidate()).unwrap();

    let line = cart.get(&id("poster")).unwrap();
    assert_eq!(line.quantity, 2);
    assert_eq!(line.image.as_deref(), Some("img/poster.jpg"));
}
