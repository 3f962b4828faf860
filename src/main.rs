mod bus;
mod components;
mod config;
mod error;
mod shutdown;
mod startup;

use components::calendar_overlay::surface;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting addevent helper");

    // Load configuration
    let config = startup::load_config().await?;

    // The standalone binary runs without an embedded widget; embedders
    // call startup::start_helper with their own surface instead
    startup::start_helper(config, surface::detached()).await
}
