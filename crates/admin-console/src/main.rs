//! Demo run against the configured API: log in, load every screen, shut down.
//!
//! ```bash
//! ADMIN_USERNAME=admin ADMIN_PASSWORD=secret RUST_LOG=info cargo run -p admin-console
//! ```

use admin_console::{Backend, Console, ConsoleConfig, ConsoleError};
use resource_sync::tracing::setup_tracing;
use resource_sync::ScreenClient;
use tracing::{info, Instrument};

fn credential(key: &str) -> Result<String, ConsoleError> {
    std::env::var(key).map_err(|_| ConsoleError::Config(format!("{} is not set", key)))
}

#[tokio::main]
async fn main() -> Result<(), ConsoleError> {
    setup_tracing();

    let config = ConsoleConfig::from_env()?;
    let username = credential("ADMIN_USERNAME")?;
    let password = credential("ADMIN_PASSWORD")?;

    let console = Console::start(config.clone(), Backend::http(&config)?);

    let span = tracing::info_span!("login");
    let greeting = console
        .login(&username, &password)
        .instrument(span)
        .await?;
    info!(%greeting, "Logged in");

    let categories = console.categories()?.list().await?;
    let products = console.products()?.list().await?;
    let offers = console.offers()?.list().await?;
    info!(
        categories = categories.len(),
        products = products.len(),
        offers = offers.len(),
        "Lists loaded"
    );

    let orders = console.orders()?;
    if orders.load().await.is_ok() {
        for order in orders.orders().await {
            info!(
                id = %order.id,
                total = %order.formatted_total(),
                payment = %order.payment_method,
                "Order"
            );
        }
    }

    let mut profile = console.profile()?;
    if profile.load().await.is_ok() {
        info!(username = %profile.form().username, "Profile");
    }

    for dataset in console.dashboard()? {
        let total: u32 = dataset.values.iter().sum();
        info!(chart = dataset.label, kind = ?dataset.kind, total, "Dashboard");
    }

    for notice in console.notifier().visible() {
        info!(level = ?notice.level, message = %notice.message, "Notice");
    }

    console.shutdown().await
}
