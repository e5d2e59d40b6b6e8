use crate::{Notification, ParcelIdentifier, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the current-user data source for the `pastParcels` field.
    LoadPastParcels,
    FetchSnapshot {
        request_id: RequestId,
        identifier: ParcelIdentifier,
    },
    Notify(Notification),
    Navigate { route: String },
    Logout,
}
