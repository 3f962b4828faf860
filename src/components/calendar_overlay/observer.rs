use super::actor::CalendarOverlayActorHandle;
use super::surface::{SharedSurface, SurfaceEvent};
use crate::config::Config;
use std::sync::Arc;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, warn};

/// Start the widget observer.
///
/// Waits out the startup delay, locates the container once, then turns
/// every burst of subtree mutations into a single injection pass after
/// the settling delay. If the container cannot be found the observer
/// warns once and stays inert for the rest of the session; otherwise
/// the subscription is never torn down.
pub fn start_observer(
    surface: SharedSurface,
    config: Arc<RwLock<Config>>,
    overlay: CalendarOverlayActorHandle,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let (selector, startup_delay, settle_delay) = {
            let config = config.read().await;
            (
                config.container_selector.clone(),
                config.observer_startup_delay(),
                config.mutation_settle_delay(),
            )
        };

        // Let the widget finish its own asynchronous first render
        sleep(startup_delay).await;

        if !surface.container_present(&selector) {
            warn!(
                "Could not find widget container {:?} to observe; controls will not follow re-renders",
                selector
            );
            return;
        }

        let mut events = surface.subscribe();
        debug!("Widget observer attached to {:?}", selector);

        loop {
            match events.recv().await {
                Ok(SurfaceEvent::Mutated) => {
                    // The widget may re-render several times per logical
                    // update; coalesce the burst before injecting
                    sleep(settle_delay).await;
                    loop {
                        match events.try_recv() {
                            Ok(_) | Err(TryRecvError::Lagged(_)) => continue,
                            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
                        }
                    }

                    if let Err(e) = overlay.inject_controls().await {
                        error!("Injection pass failed: {}", e);
                    }
                }
                // Clicks are the overlay actor's concern
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    debug!("Observer lagged behind {} surface events", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
