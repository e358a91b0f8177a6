use std::sync::Arc;

use log::debug;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::controller::{Resolution, Ticket};
use crate::model::RouteRequest;
use crate::service::RouteService;

/// Runs issued requests on a tokio runtime and queues their resolutions
/// for the UI loop.
pub struct Dispatcher {
    service: Arc<dyn RouteService>,
    handle: Handle,
    tx: UnboundedSender<Resolution>,
    rx: UnboundedReceiver<Resolution>,
}

impl Dispatcher {
    pub fn new(service: Arc<dyn RouteService>, handle: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            service,
            handle,
            tx,
            rx,
        }
    }

    /// Spawns exactly one service call for `ticket`.
    pub fn dispatch(&self, ticket: Ticket, request: RouteRequest) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let outcome = service.optimize(request).await;
            if tx.send(Resolution { ticket, outcome }).is_err() {
                debug!("request {} resolved after shutdown", ticket.id());
            }
        });
    }

    /// Takes the next queued resolution without blocking.
    pub fn try_next(&mut self) -> Option<Resolution> {
        self.rx.try_recv().ok()
    }

    /// Waits for the next resolution.
    pub async fn next(&mut self) -> Option<Resolution> {
        self.rx.recv().await
    }
}
