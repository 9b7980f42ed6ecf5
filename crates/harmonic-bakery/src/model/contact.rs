//! Fixed storefront copy: who the bakery is and how to reach it.

pub const BAKERY_NAME: &str = "Harmonic Bakery";
pub const TAGLINE: &str = "Family owned, Handcrafted, Locally sourced pastry's and such";
pub const LOCATION: &str = "Out of Dripping Springs Texas";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactInfo {
    pub email: &'static str,
    pub phone: &'static str,
}

pub const CONTACT: ContactInfo = ContactInfo {
    email: "micahepps777@gmail.com",
    phone: "+1 (435) 324-1209",
};
