use crate::bus::NotificationBus;
use crate::components::calendar_overlay::surface::SharedSurface;
use crate::components::calendar_overlay::CalendarOverlay;
use crate::components::event_submission::EventSubmission;
use crate::components::ComponentManager;
use crate::config::Config;
use crate::error::Error;
use crate::shutdown;
use std::sync::Arc;
use tokio::sync::{oneshot, RwLock};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Wire the bus and components and run until a termination signal.
///
/// `surface` is the embedder's bridge to the rendered widget. The
/// standalone binary passes a detached surface, which leaves the
/// overlay inert while the submission pipeline runs; embedders pass
/// their own implementation to light up the overlay.
pub async fn start_helper(
    config: Arc<RwLock<Config>>,
    surface: SharedSurface,
) -> miette::Result<()> {
    let bus = NotificationBus::new();

    // Initialize component manager; the submission pipeline registers
    // first so its bus subscription exists before any control can fire
    let mut component_manager = ComponentManager::new(Arc::clone(&config));
    component_manager.register(EventSubmission::new());
    component_manager.register(CalendarOverlay::new());

    // Create a shared component manager
    let component_manager = Arc::new(component_manager);

    if let Err(e) = component_manager
        .init_all(&bus, Arc::clone(&config), Arc::clone(&surface))
        .await
    {
        error!("Failed to initialize components: {:?}", e);
    }

    // Create shutdown channel
    let (shutdown_send, shutdown_recv) = oneshot::channel();

    // Clone component manager for shutdown handler
    let shutdown_components = Arc::clone(&component_manager);

    // Spawn signal handler task
    tokio::spawn(async move {
        shutdown::handle_signals(shutdown_send, shutdown_components).await;
    });

    info!("Helper running; waiting for submissions");
    let _ = shutdown_recv.await;
    info!("Received shutdown signal, stopping helper");

    Ok(())
}
