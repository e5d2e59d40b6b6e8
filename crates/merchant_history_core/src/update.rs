use history_logging::{history_debug, history_info, history_warn};

use crate::{
    notification, ClientState, Effect, HistoryState, Lifecycle, Msg, HOME_ROUTE,
    INVALID_REQUEST_ROUTE,
};

/// Pure update function: applies a message to the view state and the injected
/// client state, and returns the effects the platform must run.
pub fn update(
    mut state: HistoryState,
    client: &mut ClientState,
    msg: Msg,
) -> (HistoryState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted { merchant_session } => {
            if state.lifecycle() != Lifecycle::Unmounted {
                return (state, Vec::new());
            }
            if merchant_session {
                state.set_lifecycle(Lifecycle::Active);
                vec![Effect::LoadPastParcels]
            } else {
                history_info!("Session is not a merchant session; redirecting");
                state.set_lifecycle(Lifecycle::Redirected);
                vec![Effect::Navigate {
                    route: INVALID_REQUEST_ROUTE.to_string(),
                }]
            }
        }
        Msg::PastParcelsLoaded(Ok(identifiers)) => {
            history_debug!("Loaded {} past parcels", identifiers.len());
            state.set_past_identifiers(identifiers);
            Vec::new()
        }
        Msg::PastParcelsLoaded(Err(message)) => {
            // Not surfaced to the user; the dropdown simply stays empty.
            history_warn!("Failed to load past parcels: {}", message);
            Vec::new()
        }
        Msg::ToggleListClicked => {
            if state.is_active() {
                state.toggle_list();
            }
            Vec::new()
        }
        Msg::ParcelChosen(identifier) => {
            // Only entries of the open dropdown can be picked.
            if !state.is_active() || !state.is_choosable(&identifier) {
                history_debug!("Ignoring choice of {} outside the open list", identifier);
                return (state, Vec::new());
            }
            let request_id = state.begin_selection(identifier.clone());
            vec![Effect::FetchSnapshot {
                request_id,
                identifier,
            }]
        }
        Msg::SnapshotFetched {
            request_id,
            identifier,
            result,
        } => {
            // Last resolution wins: an older request landing after a newer one
            // still overwrites state.
            if request_id < state.last_request_id() {
                history_debug!(
                    "Snapshot request {} for {} resolved after newer request {}",
                    request_id,
                    identifier,
                    state.last_request_id()
                );
            }
            match result {
                Ok(snapshot) => {
                    client.record_found(identifier);
                    state.set_snapshot(Some(snapshot));
                    Vec::new()
                }
                Err(message) => {
                    history_warn!("Snapshot fetch for {} failed: {}", identifier, message);
                    client.clear_parcel_id();
                    state.set_snapshot(None);
                    vec![Effect::Notify(notification::snapshot_failure(message))]
                }
            }
        }
        Msg::LogoutClicked => {
            if !state.is_active() {
                return (state, Vec::new());
            }
            state.set_lifecycle(Lifecycle::Leaving);
            vec![Effect::Logout]
        }
        Msg::ReturnHomeClicked => {
            if !state.is_active() {
                return (state, Vec::new());
            }
            state.set_lifecycle(Lifecycle::Leaving);
            vec![Effect::Navigate {
                route: HOME_ROUTE.to_string(),
            }]
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
