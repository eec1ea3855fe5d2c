use std::process;

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{error, info};

/// Listens for SIGINT and, on Unix, SIGTERM.
pub struct ShutdownManager {
    /// Name of the first signal received
    pub rx: mpsc::Receiver<&'static str>,
}

impl ShutdownManager {
    /// Create a new ShutdownManager and setup signal handlers
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(1);

        let tx_clone = tx.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    let _ = tx_clone.send("SIGINT").await;
                }
                Err(err) => {
                    error!("error listening for ctrl+c: {}", err);
                }
            }
        });

        #[cfg(unix)]
        {
            tokio::spawn(async move {
                use tokio::signal::unix::{SignalKind, signal};

                match signal(SignalKind::terminate()) {
                    Ok(mut term_signal) => {
                        term_signal.recv().await;
                        let _ = tx.send("SIGTERM").await;
                    }
                    Err(err) => {
                        error!("error installing SIGTERM handler: {}", err);
                    }
                }
            });
        }

        ShutdownManager { rx }
    }

    /// Exit the process once a signal arrives. The pipeline keeps no state worth flushing, so
    /// nothing is awaited before exiting.
    pub fn exit_on_signal(mut self) -> JoinHandle<()> {
        tokio::spawn(async move {
            if let Some(signal) = self.rx.recv().await {
                info!(signal, "closing app at user's signal");
                process::exit(0);
            }
        })
    }
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}
