//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::ServerConfig;

/// Editors fire several notify events per save; events inside this window
/// collapse into one reload.
const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// A watcher that monitors the configuration file for changes.
///
/// Only configs that pass validation are forwarded; a broken edit keeps the
/// running configuration in place.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<ServerConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<ServerConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for events to be delivered.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();
        let mut last_reload: Option<Instant> = None;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        if !debounced(&mut last_reload, DEBOUNCE_WINDOW) {
                            return;
                        }
                        tracing::info!("Config file change detected, reloading");
                        match load_config(&path) {
                            Ok(new_config) => {
                                let _ = tx.send(new_config);
                            }
                            Err(e) => {
                                tracing::error!(
                                    error = %e,
                                    "Failed to reload config, keeping current configuration"
                                );
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

/// Record an event and report whether it falls outside the debounce window.
fn debounced(last: &mut Option<Instant>, window: Duration) -> bool {
    if last.is_some_and(|t| t.elapsed() < window) {
        return false;
    }
    *last = Some(Instant::now());
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_of_events_collapses_into_one_reload() {
        let window = Duration::from_millis(50);
        let mut last = None;

        assert!(debounced(&mut last, window));
        assert!(!debounced(&mut last, window));
        assert!(!debounced(&mut last, window));

        std::thread::sleep(Duration::from_millis(60));
        assert!(debounced(&mut last, window));
    }
}
