use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use history_logging::{history_info, history_warn};
use merchant_history_core::{Effect, Msg, ParcelSnapshot};
use merchant_history_engine::{EngineEvent, EngineHandle, ParcelRecord};

use super::app::AppInput;
use super::sinks::{NavigationSink, NotificationSink};

pub struct EffectRunner {
    engine: Arc<EngineHandle>,
    notifier: Box<dyn NotificationSink>,
    navigator: Arc<dyn NavigationSink>,
}

impl EffectRunner {
    pub fn new(
        engine: Arc<EngineHandle>,
        notifier: Box<dyn NotificationSink>,
        navigator: Arc<dyn NavigationSink>,
    ) -> Self {
        Self {
            engine,
            notifier,
            navigator,
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadPastParcels => self.engine.load_past_parcels(),
                Effect::FetchSnapshot {
                    request_id,
                    identifier,
                } => {
                    history_info!("FetchSnapshot request_id={} id={}", request_id, identifier);
                    self.engine.fetch_snapshot(request_id, identifier);
                }
                Effect::Notify(notification) => self.notifier.notify(&notification),
                Effect::Navigate { route } => self.navigator.go_to(&route),
                Effect::Logout => {
                    history_info!("Logout requested");
                    self.engine.logout();
                }
            }
        }
    }

    /// Forwards engine events to the app loop until it stops listening.
    pub fn spawn_event_loop(&self, input_tx: mpsc::Sender<AppInput>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            match engine.try_recv() {
                Some(event) => {
                    let Some(msg) = map_event(event) else {
                        continue;
                    };
                    if input_tx.send(AppInput::Dispatch(msg)).is_err() {
                        break;
                    }
                }
                None => thread::sleep(Duration::from_millis(20)),
            }
        });
    }
}

fn map_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::PastParcelsLoaded { result } => Some(Msg::PastParcelsLoaded(
            result.map_err(|err| err.to_string()),
        )),
        EngineEvent::SnapshotLoaded {
            request_id,
            tracking_number,
            result,
        } => {
            if let Err(err) = &result {
                history_warn!("Parcel {} failed: {}", tracking_number, err.kind);
            }
            Some(Msg::SnapshotFetched {
                request_id,
                identifier: tracking_number,
                result: result.map(map_record).map_err(|err| err.message),
            })
        }
        EngineEvent::LoggedOut => {
            history_info!("Logout finished");
            None
        }
    }
}

fn map_record(record: ParcelRecord) -> ParcelSnapshot {
    ParcelSnapshot {
        address: record.address,
        recipient: record.recipient,
        location: record.location,
        information: record.information,
        visual_cue: record.visual_cue,
        location_history: record.location_history,
        information_history: record.information_history,
        cue_history: record.cue_history,
        time_delivered: record.time_delivered,
    }
}
