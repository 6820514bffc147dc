use std::{io, sync::Arc, thread};

use log::{info, warn};

/// Stops a running `Server::run` loop from another thread.
#[derive(Clone)]
pub struct ShutdownHandle {
    pub(crate) http: Arc<tiny_http::Server>,
}

impl ShutdownHandle {
    /// Unblocks the accept loop. Sessions already running keep their threads
    /// until the process exits.
    pub fn shutdown(&self) {
        self.http.unblock();
    }
}

/// Trips `handle` on the first Ctrl-C (SIGINT).
///
/// The signal is awaited on a small single-threaded tokio runtime living on
/// its own thread; the server itself stays synchronous.
pub fn shutdown_on_ctrl_c(handle: ShutdownHandle) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    thread::Builder::new()
        .name("ctrl-c".to_owned())
        .spawn(move || {
            runtime.block_on(async {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        info!("received interrupt");
                        handle.shutdown();
                    }
                    Err(e) => warn!("cannot listen for ctrl-c: {e}"),
                }
            });
        })?;
    Ok(())
}
