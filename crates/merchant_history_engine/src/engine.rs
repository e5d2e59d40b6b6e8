use std::sync::{mpsc, Arc, Mutex};
use std::thread::{self, JoinHandle};

use history_logging::{history_error, history_warn};

use crate::fetch::{ParcelDataSource, UserDataSource};
use crate::session::SessionTerminator;
use crate::{EngineEvent, ParcelMode, RequestId};

enum EngineCommand {
    LoadPastParcels,
    FetchSnapshot {
        request_id: RequestId,
        tracking_number: String,
    },
    Logout,
}

#[derive(Clone)]
struct Collaborators {
    users: Arc<dyn UserDataSource>,
    parcels: Arc<dyn ParcelDataSource>,
    session: Arc<dyn SessionTerminator>,
}

/// Runs data-source requests on a background tokio runtime.
///
/// Every command becomes its own task: nothing is cancelled or sequenced, so
/// overlapping snapshot requests report back in completion order.
pub struct EngineHandle {
    cmd_tx: Mutex<Option<mpsc::Sender<EngineCommand>>>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl EngineHandle {
    pub fn new(
        users: Arc<dyn UserDataSource>,
        parcels: Arc<dyn ParcelDataSource>,
        session: Arc<dyn SessionTerminator>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let collaborators = Collaborators {
            users,
            parcels,
            session,
        };

        let worker = thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    history_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            let mut in_flight = Vec::new();
            while let Ok(command) = cmd_rx.recv() {
                let collaborators = collaborators.clone();
                let event_tx = event_tx.clone();
                in_flight.retain(|task: &tokio::task::JoinHandle<()>| !task.is_finished());
                in_flight.push(runtime.spawn(async move {
                    handle_command(&collaborators, command, event_tx).await;
                }));
            }
            // Let in-flight requests (notably logout) finish before the runtime drops.
            runtime.block_on(futures_util::future::join_all(in_flight));
        });

        Self {
            cmd_tx: Mutex::new(Some(cmd_tx)),
            event_rx: Mutex::new(event_rx),
            worker: Mutex::new(Some(worker)),
        }
    }

    pub fn load_past_parcels(&self) {
        self.send(EngineCommand::LoadPastParcels);
    }

    pub fn fetch_snapshot(&self, request_id: RequestId, tracking_number: impl Into<String>) {
        self.send(EngineCommand::FetchSnapshot {
            request_id,
            tracking_number: tracking_number.into(),
        });
    }

    pub fn logout(&self) {
        self.send(EngineCommand::Logout);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Stops accepting commands and waits until every in-flight request has finished.
    pub fn shutdown(&self) {
        if let Ok(mut cmd_tx) = self.cmd_tx.lock() {
            cmd_tx.take();
        }
        let worker = self.worker.lock().ok().and_then(|mut worker| worker.take());
        if let Some(worker) = worker {
            if worker.join().is_err() {
                history_error!("Engine worker panicked during shutdown");
            }
        }
    }

    fn send(&self, command: EngineCommand) {
        let sent = match self.cmd_tx.lock() {
            Ok(cmd_tx) => cmd_tx
                .as_ref()
                .is_some_and(|cmd_tx| cmd_tx.send(command).is_ok()),
            Err(_) => false,
        };
        if !sent {
            history_warn!("Engine is stopped; command dropped");
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn handle_command(
    collaborators: &Collaborators,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::LoadPastParcels => EngineEvent::PastParcelsLoaded {
            result: collaborators.users.fetch_past_parcels().await,
        },
        EngineCommand::FetchSnapshot {
            request_id,
            tracking_number,
        } => {
            let result = collaborators
                .parcels
                .fetch_parcel(&tracking_number, ParcelMode::Data)
                .await;
            EngineEvent::SnapshotLoaded {
                request_id,
                tracking_number,
                result,
            }
        }
        EngineCommand::Logout => {
            // The outcome is not reported back; the view is already leaving.
            if let Err(err) = collaborators.session.logout().await {
                history_warn!("Logout failed: {}", err);
            }
            EngineEvent::LoggedOut
        }
    };
    let _ = event_tx.send(event);
}
