//! The navigable sections of the storefront.

use std::fmt::{self, Display};

/// Where the user is. The configuration overlay and the confirmation overlay sit on top of a
/// section rather than being sections themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Section {
    #[default]
    Home,
    Menu,
    Contact,
    Cart,
}

impl Section {
    /// Navigation order. The cart is reached through the badge, not the nav bar.
    pub const NAV: [Section; 3] = [Section::Home, Section::Menu, Section::Contact];

    pub fn title(self) -> &'static str {
        match self {
            Section::Home => "HOME",
            Section::Menu => "MENU",
            Section::Contact => "CONTACT",
            Section::Cart => "CART",
        }
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
