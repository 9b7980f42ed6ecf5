//! # Harmonic Bakery CLI
//!
//! Every invocation is one storefront session: the cart is restored from its snapshot at start
//! and written back after each change.
//!
//! ```bash
//! harmonic-bakery menu
//! harmonic-bakery add muffins --option Blueberry --quantity 2
//! harmonic-bakery cart
//! harmonic-bakery order --name Ada --email ada@example.com --pickup 2026-05-03T10:30
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=info` to see the actor at work.

use anyhow::{bail, Context};
use bakery_actor::tracing::setup_tracing;
use chrono::Utc;
use clap::{Parser, Subcommand};
use harmonic_bakery::config::StorefrontConfig;
use harmonic_bakery::configure::{FlowError, OPTION_REQUIRED};
use harmonic_bakery::lifecycle::Storefront;
use harmonic_bakery::model::{
    batches_label, Cart, CartLineId, MenuItem, Section, BAKERY_NAME, CONTACT, LOCATION, TAGLINE,
};
use harmonic_bakery::order::{parse_pickup_time, Fulfillment, OrderForm, ReadyOrder};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "harmonic-bakery", version)]
#[command(about = "Order fresh pastries from Harmonic Bakery")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// The home page
    Home,
    /// List everything on the menu
    Menu,
    /// Details of one menu item
    Show { item: String },
    /// How to reach the bakery
    Contact,
    /// Configure an item and add it to the cart
    Add {
        item: String,
        /// Flavor, for items that come in several
        #[arg(short, long)]
        option: Option<String>,
        /// Number of batches
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// Review the cart
    Cart,
    /// Remove a line from the cart
    Remove { cart_id: CartLineId },
    /// Change a line's batch count by DELTA (never below 1)
    Adjust {
        cart_id: CartLineId,
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },
    /// Replace a line's notes
    Notes { cart_id: CartLineId, notes: String },
    /// Send the cart as an order
    Order {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Deliver instead of picking up
        #[arg(long)]
        delivery: bool,
        #[arg(long, default_value = "")]
        address: String,
        /// Local time, YYYY-MM-DDTHH:MM
        #[arg(long)]
        pickup: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    let config =
        StorefrontConfig::resolve(cli.config.as_deref()).context("Failed to load configuration")?;
    info!(storage_dir = %config.storage_dir.display(), "Configuration loaded");

    let storefront = Storefront::start(config);
    let result = run(&storefront, cli.command.unwrap_or(Command::Home)).await;
    storefront.shutdown().await?;
    result
}

async fn run(storefront: &Storefront, command: Command) -> anyhow::Result<()> {
    let cart = &storefront.cart_client;
    match command {
        Command::Home => {
            print_nav(Section::Home, cart.total_count().await?);
            println!("{TAGLINE}");
            println!("{LOCATION}");
        }
        Command::Menu => {
            print_nav(Section::Menu, cart.total_count().await?);
            for item in storefront.menu.items() {
                println!(
                    "{:<10} {:<28} {} per batch",
                    item.id,
                    item.batch_label(),
                    item.price_per_batch
                );
            }
        }
        Command::Show { item } => {
            let item = find_item(storefront, &item)?;
            println!("{}", item.batch_label());
            println!("{} per batch", item.price_per_batch);
            println!("{}", item.description);
            println!("Ingredients: {}", item.ingredients);
            if item.has_options() {
                println!("Flavors: {}", item.option_list().join(", "));
            }
        }
        Command::Contact => {
            print_nav(Section::Contact, cart.total_count().await?);
            println!("Email: {}", CONTACT.email);
            println!("Phone: {}", CONTACT.phone);
        }
        Command::Add {
            item,
            option,
            quantity,
            notes,
        } => {
            let item = find_item(storefront, &item)?;
            let mut flow = storefront.configure();
            flow.open(item);
            if let Some(option) = option {
                flow.select_option(&canonical_option(item, &option))?;
            }
            flow.set_quantity(quantity)?;
            flow.set_notes(&notes)?;

            match flow.commit().await {
                Ok(id) => {
                    let batches = flow.draft().map_or(quantity, |d| d.quantity());
                    println!("Added! {} x {} ({id})", batches_label(batches), item.name);
                }
                Err(FlowError::MissingOption) => {
                    bail!("{OPTION_REQUIRED} Choose one of: {}", item.option_list().join(", "))
                }
                Err(e) => return Err(e.into()),
            }
            println!("Cart: {}", cart.total_count().await?);
        }
        Command::Cart => print_cart(&cart.cart().await?),
        Command::Remove { cart_id } => {
            cart.remove_line(cart_id).await?;
            print_cart(&cart.cart().await?);
        }
        Command::Adjust { cart_id, delta } => {
            let batches = cart.adjust_quantity(cart_id, delta).await?;
            println!("{}", batches_label(batches));
        }
        Command::Notes { cart_id, notes } => {
            let line = cart.set_notes(cart_id, &notes).await?;
            println!("{}: \"{}\"", line.title(), line.notes);
        }
        Command::Order {
            name,
            email,
            delivery,
            address,
            pickup,
        } => {
            let form = OrderForm {
                name,
                email,
                fulfillment: if delivery {
                    Fulfillment::Delivery
                } else {
                    Fulfillment::Pickup
                },
                address,
                pickup_time: Some(parse_pickup_time(&pickup)?),
            };
            if let Some(note) = form.delivery_note() {
                println!("{note}");
            }

            let now = Utc::now();
            let policy = storefront.pickup_policy();
            let order = ReadyOrder::prepare(form, cart.cart().await?, now, &policy)?;
            let confirmation = storefront.submitter().submit(order).await?;

            println!("{}", confirmation.title);
            println!("{}", confirmation.message);
        }
    }
    Ok(())
}

fn print_nav(current: Section, badge: u32) {
    let tabs: Vec<String> = Section::NAV
        .iter()
        .map(|s| {
            if *s == current {
                format!("[{s}]")
            } else {
                s.to_string()
            }
        })
        .collect();
    println!("{BAKERY_NAME}  {}  CART({badge})", tabs.join(" "));
    println!();
}

fn print_cart(cart: &Cart) {
    print_nav(Section::Cart, cart.total_count());
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for line in cart.lines() {
        println!(
            "{}  {:<36} {:<12} {}",
            line.cart_id,
            line.title(),
            batches_label(line.batches),
            line.subtotal()
        );
        if !line.notes.is_empty() {
            println!("    \"{}\"", line.notes);
        }
    }
    println!("Total: {}", cart.total_price());
}

fn find_item<'a>(storefront: &'a Storefront, query: &str) -> anyhow::Result<&'a MenuItem> {
    match storefront.menu.find(query) {
        Some(item) => Ok(item),
        None => {
            let ids: Vec<&str> = storefront.menu.items().iter().map(|i| i.id.as_str()).collect();
            bail!("No menu item {query:?}. Try one of: {}", ids.join(", "))
        }
    }
}

/// Matches a typed flavor against the item's options ignoring case.
fn canonical_option(item: &MenuItem, typed: &str) -> String {
    item.option_list()
        .iter()
        .find(|o| o.eq_ignore_ascii_case(typed.trim()))
        .cloned()
        .unwrap_or_else(|| typed.to_string())
}
