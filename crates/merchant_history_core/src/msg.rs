use crate::{ParcelIdentifier, ParcelSnapshot, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// View mounted; carries the outcome of the merchant session check.
    Mounted { merchant_session: bool },
    /// Current-user data source answered the `pastParcels` request.
    PastParcelsLoaded(Result<Vec<ParcelIdentifier>, String>),
    /// User clicked the dropdown button.
    ToggleListClicked,
    /// User picked an identifier from the dropdown.
    ParcelChosen(ParcelIdentifier),
    /// Parcel data source answered a snapshot request.
    SnapshotFetched {
        request_id: RequestId,
        identifier: ParcelIdentifier,
        result: Result<ParcelSnapshot, String>,
    },
    LogoutClicked,
    ReturnHomeClicked,
    /// Leaves the state untouched and emits nothing.
    NoOp,
}
