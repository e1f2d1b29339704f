//! # Observability & Tracing
//!
//! Every controller logs with structured fields instead of formatted strings, so one filter
//! works across all screens:
//!
//! - `entity_type`: the entity label (`category`, `product`, ...).
//! - `id`: the record a request targets.
//! - `size`: collection length after a change.
//!
//! ## What Gets Traced
//!
//! - **Controller lifecycle**: `Controller started` and `Shutdown` with the final size.
//! - **Requests**: `Load issued`, `Create`, `Update`, `Remove` at debug level with payloads.
//! - **Outcomes**: `Loaded`, `Created`, `Updated`, `Deleted` at info, failures at warn.
//! - **Notices**: every success/failure notice is also an event.
//!
//! ## Usage
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run -p admin-console
//!
//! # Payloads and discarded fetches
//! RUST_LOG=debug cargo run -p admin-console
//! ```
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Controller started entity_type="category" mount=Load
//! INFO Loaded entity_type="category" size=3
//! INFO Updated entity_type="category" id=65f0c1
//! INFO Success notice=Category updated successfully!
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` overrides the default `info` filter.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type identifies the controller
        .compact()
        .init();
}
