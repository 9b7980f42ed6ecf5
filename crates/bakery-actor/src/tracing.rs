//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide subscriber: structured `tracing` events in the
//! compact format, filtered by `RUST_LOG`, written to stderr so that a CLI's stdout stays clean.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: restore, startup, shutdown (with the store size)
//! - **Entity Operations**: Create, Get, List, Update, Delete, Action, Clear
//! - **Snapshots**: writes at `debug`, failures at `warn`
//! - **Client calls**: `#[instrument]` spans named after the client method
//!
//! ## Usage Examples
//!
//! ```bash
//! # Only problems
//! RUST_LOG=warn harmonic-bakery cart
//!
//! # Actor operations
//! RUST_LOG=info harmonic-bakery add muffins --option Blueberry
//!
//! # Full payloads
//! RUST_LOG=debug harmonic-bakery add muffins --option Blueberry
//! ```
//!
//! With `RUST_LOG=info` an add looks like:
//!
//! ```text
//! INFO Restored entity_type="CartLine" found=1 size=1
//! INFO Actor started entity_type="CartLine" size=1
//! INFO add_line: Created entity_type="CartLine" id=4b0c... size=2
//! ```

/// Initializes the subscriber. Call once, at the start of `main`.
///
/// Without `RUST_LOG` only warnings and errors are shown.
pub fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false) // entity_type already says where an event comes from
        .compact()
        .init();
}
