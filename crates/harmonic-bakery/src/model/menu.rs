//! The menu: what the bakery sells, one batch at a time.
//!
//! The catalog is fixed at startup ([`Menu::standard`]) and never mutated. Cart lines embed a
//! full copy of the [`MenuItem`] they were configured from, so the menu is only consulted while
//! browsing and configuring.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display};
use std::iter::Sum;
use std::ops::Add;

/// Stable identifier of a menu item (`"muffins"`, `"scones"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(String);

impl MenuItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MenuItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MenuItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// An amount of US dollars, held as whole cents.
///
/// Displayed the way the storefront prints prices: `$18` for whole dollars, `$16.50` otherwise.
/// Serialized as a number of dollars (`18`, `16.5`), which is what the bakery reads in the
/// order JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn dollars(dollars: u64) -> Self {
        Self(dollars * 100)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Price of `count` units at this unit price.
    pub fn times(self, count: u32) -> Money {
        Money(self.0.saturating_mul(u64::from(count)))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_u64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.0 as f64 / 100.0)
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let dollars = f64::deserialize(deserializer)?;
        if !dollars.is_finite() || dollars < 0.0 {
            return Err(D::Error::custom(format!("invalid price {dollars}")));
        }
        Ok(Money((dollars * 100.0).round() as u64))
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (dollars, cents) = (self.0 / 100, self.0 % 100);
        if cents == 0 {
            write!(f, "${dollars}")
        } else {
            write!(f, "${dollars}.{cents:02}")
        }
    }
}

/// A purchasable item.
///
/// # Options
/// `options` is `None` for items without variants. When present it is non-empty, and a cart line
/// for this item must name one of its entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    /// Units in one batch (6 muffins, 12 rolls).
    pub batch_size: u32,
    pub price_per_batch: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub description: String,
    pub ingredients: String,
    pub image: String,
}

impl MenuItem {
    pub fn has_options(&self) -> bool {
        self.options.as_ref().is_some_and(|o| !o.is_empty())
    }

    /// The declared options, empty for items without variants.
    pub fn option_list(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }

    pub fn accepts_option(&self, option: &str) -> bool {
        self.option_list().iter().any(|o| o == option)
    }

    /// Heading used in listings, e.g. `"6 Muffins"`.
    pub fn batch_label(&self) -> String {
        format!("{} {}", self.batch_size, self.name)
    }
}

/// The fixed catalog, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// The bakery's standing menu.
    pub fn standard() -> Self {
        Self::new(vec![
            item(
                "muffins",
                "Muffins",
                6,
                Money::dollars(18),
                &["Blueberry", "Strawberry", "Raspberry", "Chocolate Chip", "Banana Nut"],
                "Soft, bakery-style muffins made fresh.",
                "Flour, sugar, eggs, milk, butter, fruit",
                "/Images/Menu/blueberry-muffins-square.jpg",
            ),
            item(
                "danishes",
                "Cream Cheese Danishes",
                6,
                Money::dollars(18),
                &["Blueberry", "Strawberry", "Raspberry"],
                "Flaky pastry with sweet cream cheese filling.",
                "Flour, butter, cream cheese, sugar, eggs",
                "/Images/Menu/199-blueberry-cream-cheese-danish-3-768x1024.jpg",
            ),
            item(
                "cinnamon",
                "Cinnamon Rolls",
                12,
                Money::dollars(36),
                &[],
                "Soft rolls with cinnamon sugar swirl.",
                "Flour, yeast, cinnamon, sugar, butter",
                "/Images/Menu/cinnamonbun_800x.jpg",
            ),
            item(
                "scones",
                "White Chocolate Scones",
                6,
                Money::dollars(16),
                &[],
                "Tender scones with white chocolate",
                "Flour, cream, butter, white chocolate",
                "/Images/Menu/Scones.jpeg",
            ),
        ])
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn get(&self, id: &MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Looks an item up by id or display name, ignoring case.
    pub fn find(&self, query: &str) -> Option<&MenuItem> {
        let query = query.trim();
        self.items.iter().find(|item| {
            item.id.as_str().eq_ignore_ascii_case(query) || item.name.eq_ignore_ascii_case(query)
        })
    }
}

#[allow(clippy::too_many_arguments)]
fn item(
    id: &str,
    name: &str,
    batch_size: u32,
    price_per_batch: Money,
    options: &[&str],
    description: &str,
    ingredients: &str,
    image: &str,
) -> MenuItem {
    MenuItem {
        id: MenuItemId::new(id),
        name: name.to_string(),
        batch_size,
        price_per_batch,
        options: (!options.is_empty()).then(|| options.iter().map(|o| o.to_string()).collect()),
        description: description.to_string(),
        ingredients: ingredients.to_string(),
        image: image.to_string(),
    }
}
