//! Cart lines and the cart view.
//!
//! # Actor Framework
//! [`CartLine`] implements the [`ActorEntity`](bakery_actor::ActorEntity) trait, so the cart is
//! owned by a [`ResourceActor`](bakery_actor::ResourceActor) that persists it after every change.
//!
//! See [`impl ActorEntity for CartLine`](#impl-ActorEntity-for-CartLine) for details on:
//! - Creation parameters ([`CartLineCreate`])
//! - Update parameters ([`CartLineUpdate`])
//! - Custom actions ([`CartLineAction`](crate::cart_actor::CartLineAction))

use crate::model::menu::{MenuItem, Money};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use uuid::Uuid;

/// Cart-scoped identifier of a line. Distinct from the menu item id so the same item can sit in
/// the cart several times with different configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartLineId(pub Uuid);

impl CartLineId {
    /// A fresh random (v4) id.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for CartLineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for CartLineId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// One configured entry in the cart.
///
/// Serialized flat: the menu item's fields sit next to `cartId`, `option`, `batches` and `notes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub cart_id: CartLineId,
    #[serde(flatten)]
    pub item: MenuItem,
    /// Chosen flavor; empty for items without options.
    pub option: String,
    /// Never below 1.
    pub batches: u32,
    pub notes: String,
}

impl CartLine {
    pub fn subtotal(&self) -> Money {
        self.item.price_per_batch.times(self.batches)
    }

    /// `"Muffins (Blueberry)"`, or just the name for items without options.
    pub fn title(&self) -> String {
        if self.option.is_empty() {
            self.item.name.clone()
        } else {
            format!("{} ({})", self.item.name, self.option)
        }
    }
}

/// `"1 batch"`, `"3 batches"`.
pub fn batches_label(count: u32) -> String {
    if count == 1 {
        "1 batch".to_string()
    } else {
        format!("{count} batches")
    }
}

/// DTO for adding a line to the cart.
#[derive(Debug, Clone)]
pub struct CartLineCreate {
    pub item: MenuItem,
    pub option: String,
    pub batches: u32,
    pub notes: String,
}

/// DTO for editing a line in place.
#[derive(Debug, Clone, Default)]
pub struct CartLineUpdate {
    pub notes: Option<String>,
}

/// The cart as the views see it: lines in insertion order plus derived totals.
///
/// Totals are computed on every call, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of batch counts; the number on the cart badge. Saturates at `u32::MAX`.
    pub fn total_count(&self) -> u32 {
        self.lines
            .iter()
            .map(|l| l.batches)
            .fold(0, u32::saturating_add)
    }

    pub fn total_price(&self) -> Money {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::menu::Menu;

    fn line(item: &str, option: &str, batches: u32) -> CartLine {
        CartLine {
            cart_id: CartLineId::random(),
            item: Menu::standard().find(item).cloned().unwrap(),
            option: option.to_string(),
            batches,
            notes: String::new(),
        }
    }

    #[test]
    fn test_totals() {
        let cart = Cart::from(vec![
            line("muffins", "Blueberry", 2),
            line("cinnamon", "", 1),
            line("scones", "", 3),
        ]);

        assert_eq!(cart.total_count(), 6);
        assert_eq!(
            cart.total_price(),
            Money::dollars(36) + Money::dollars(36) + Money::dollars(48)
        );
        assert!(Cart::default().total_price() == Money::ZERO);
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let cart = Cart::from(vec![
            line("cinnamon", "", 3_000_000_000),
            line("cinnamon", "", 3_000_000_000),
        ]);

        assert_eq!(cart.total_count(), u32::MAX);
        assert_eq!(
            cart.total_price(),
            Money::dollars(36).times(3_000_000_000) + Money::dollars(36).times(3_000_000_000)
        );
    }

    #[test]
    fn test_line_json_is_flat_camel_case() {
        let mut muffins = line("muffins", "Blueberry", 2);
        muffins.notes = "no paper liners".into();
        let json = serde_json::to_value(&muffins).unwrap();

        assert_eq!(json["cartId"], muffins.cart_id.to_string());
        assert_eq!(json["id"], "muffins");
        assert_eq!(json["name"], "Muffins");
        assert_eq!(json["option"], "Blueberry");
        assert_eq!(json["batches"], 2);
        assert_eq!(json["notes"], "no paper liners");
        assert_eq!(json["options"][0], "Blueberry");

        let back: CartLine = serde_json::from_value(json).unwrap();
        assert_eq!(back, muffins);
    }

    #[test]
    fn test_labels() {
        assert_eq!(batches_label(1), "1 batch");
        assert_eq!(batches_label(4), "4 batches");
        assert_eq!(line("danishes", "Raspberry", 1).title(), "Cream Cheese Danishes (Raspberry)");
        assert_eq!(line("scones", "", 1).title(), "White Chocolate Scones");
    }

    #[test]
    fn test_cart_line_id_parses_from_display() {
        let id = CartLineId::random();
        assert_eq!(id.to_string().parse::<CartLineId>().unwrap(), id);
        assert!("not-a-uuid".parse::<CartLineId>().is_err());
    }
}
