//! Merchant history engine: data sources, local session and effect execution.
mod engine;
mod fetch;
mod session;
mod types;

pub use engine::EngineHandle;
pub use fetch::{
    FetchSettings, HttpDataSource, ParcelDataSource, UserDataSource, PAST_PARCELS_FIELD,
};
pub use session::{
    LocalSessionStore, SessionError, SessionRecord, SessionTerminator, SessionValidator,
};
pub use types::{
    DataSourceError, EngineEvent, FailureKind, ParcelMode, ParcelRecord, RequestId,
};
