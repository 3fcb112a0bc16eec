use crate::store::SessionStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

/// Spawn a periodic task that sweeps expired sessions.
///
/// Opt-in: the store never schedules this itself, and manual
/// [`SessionStore::sweep`] calls keep working alongside it. Aborting
/// the returned handle stops the task.
pub fn spawn_sweeper(store: Arc<SessionStore>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; skip it so a fresh store
        // is not swept at startup.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = store.sweep();
            if removed > 0 {
                info!(removed, "periodic sweep removed expired sessions");
            }
        }
    })
}
