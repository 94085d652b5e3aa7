//! Command handlers.
//!
//! Each handler maps one UI event onto a [`CartSession`] call and writes the
//! result to `out`. Handlers never cache the cart; they read what the session
//! returns or loads.

mod prompt;

use std::io::Write;

use museum_cart::view::badge_text;
use museum_cart::{CartError, CartSession, CartView, DiscountDecider, ItemId, RecordStorage};
use thiserror::Error;

pub use prompt::StdinPrompt;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output format for `show` and `badges`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Text,
    Json,
}

impl Output {
    pub const fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

fn parse_id(id: &str) -> Result<ItemId, CartError> {
    Ok(ItemId::parse(id)?)
}

/// Handle "item selected".
pub fn add<S: RecordStorage>(
    session: &CartSession<S>,
    out: &mut impl Write,
    id: &str,
    name: &str,
    price: &str,
    image: Option<&str>,
) -> Result<(), CommandError> {
    let cart = session.select_item(id, name, price, image)?;
    let id = parse_id(id)?;
    let badge = badge_text(&cart, &id).unwrap_or_default();
    match cart.get(&id) {
        Some(line) => writeln!(out, "Added to cart: {} ({badge})", line.name)?,
        None => writeln!(out, "Added to cart: {id}")?,
    }
    Ok(())
}

/// Handle "remove".
pub fn remove<S: RecordStorage>(
    session: &CartSession<S>,
    out: &mut impl Write,
    id: &str,
) -> Result<(), CommandError> {
    let id = parse_id(id)?;
    let before = session.cart().quantity_of(&id);
    let cart = session.remove_one(&id)?;
    match (before, badge_text(&cart, &id)) {
        (0, _) => writeln!(out, "{id} is not in the cart")?,
        (_, Some(badge)) => writeln!(out, "Removed one {id} ({badge})")?,
        (_, None) => writeln!(out, "Removed {id}")?,
    }
    Ok(())
}

/// Handle "clear".
pub fn clear<S: RecordStorage>(
    session: &mut CartSession<S>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    session.clear_all()?;
    writeln!(out, "Cart cleared.")?;
    Ok(())
}

/// Render the cart panel.
pub fn show<S: RecordStorage>(
    session: &CartSession<S>,
    out: &mut impl Write,
    decider: &mut impl DiscountDecider,
    output: Output,
) -> Result<(), CommandError> {
    let view = session.view(decider);
    if output == Output::Json {
        serde_json::to_writer_pretty(&mut *out, &view)?;
        writeln!(out)?;
        return Ok(());
    }

    match view {
        CartView::Empty { message } => writeln!(out, "{message}")?,
        CartView::Filled { rows, summary } => {
            for row in &rows {
                writeln!(out, "{}", row.label())?;
            }
            writeln!(out)?;
            write!(out, "{}", summary.summary_text())?;
        }
    }
    Ok(())
}

/// Render quantity badges for catalog entries.
pub fn badges<S: RecordStorage>(
    session: &CartSession<S>,
    out: &mut impl Write,
    ids: &[String],
    output: Output,
) -> Result<(), CommandError> {
    let ids = ids
        .iter()
        .map(|id| parse_id(id))
        .collect::<Result<Vec<_>, _>>()?;
    let badges = session.badges(&ids);

    if output == Output::Json {
        serde_json::to_writer_pretty(&mut *out, &badges)?;
        writeln!(out)?;
        return Ok(());
    }

    for badge in &badges {
        writeln!(out, "{}: {}", badge.id, badge.display_text())?;
    }
    Ok(())
}
