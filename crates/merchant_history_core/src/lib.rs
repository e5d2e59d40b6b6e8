//! Merchant history core: pure state machine for the parcel history view.
mod client;
mod effect;
mod msg;
mod notification;
mod state;
mod update;
mod view_model;

pub use client::{ClientContext, ClientState};
pub use effect::Effect;
pub use msg::Msg;
pub use notification::{
    snapshot_failure, Notification, Position, Severity, HOME_ROUTE, INVALID_REQUEST_ROUTE,
    NOTIFICATION_DURATION,
};
pub use state::{
    HistoryState, Lifecycle, ListVisibility, ParcelIdentifier, ParcelSnapshot, RequestId,
};
pub use update::update;
pub use view_model::{HistoryViewModel, SEARCH_PLACEHOLDER};
