//! Backend access: payload types, the HTTP client and the worker thread
//! that runs requests off the UI thread.
//!
//! The UI sends `ApiCmd` values in and drains `ApiEvent` values out once
//! per loop iteration; nothing here blocks the terminal.

mod client;
mod error;
mod types;
mod worker;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::*;
pub use worker::{ApiCmd, ApiEvent};

use std::sync::Mutex;
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;

use worker::spawn_api_thread;

/// Owning handle for the API worker thread.
pub struct ApiHandle {
    tx: Sender<ApiCmd>,
    events: mpsc::Receiver<ApiEvent>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl ApiHandle {
    pub fn new(client: ApiClient) -> Self {
        let (tx, cmd_rx) = mpsc::channel::<ApiCmd>();
        let (event_tx, events) = mpsc::channel::<ApiEvent>();

        let join = spawn_api_thread(client, cmd_rx, event_tx);

        Self {
            tx,
            events,
            join: Mutex::new(Some(join)),
        }
    }

    pub fn send(&self, cmd: ApiCmd) -> Result<(), mpsc::SendError<ApiCmd>> {
        self.tx.send(cmd)
    }

    /// A cloned command sender for components that issue their own
    /// fire-and-forget calls.
    pub fn sender(&self) -> Sender<ApiCmd> {
        self.tx.clone()
    }

    /// Next pending event, if any. Never blocks.
    pub fn try_recv(&self) -> Option<ApiEvent> {
        self.events.try_recv().ok()
    }

    /// Ask the worker to finish its queue and join it.
    pub fn quit(&self) {
        let _ = self.send(ApiCmd::Quit);
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

#[cfg(test)]
mod tests;
