use std::fmt;

use serde::Deserialize;

pub type RequestId = u64;

/// Parcel record as served by the parcel data source.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParcelRecord {
    pub address: String,
    pub recipient: String,
    pub location: String,
    pub information: String,
    pub visual_cue: String,
    pub location_history: Vec<String>,
    pub information_history: Vec<String>,
    pub cue_history: Vec<String>,
    pub time_delivered: Option<String>,
}

/// Shape of the parcel data requested from the parcel data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParcelMode {
    Data,
}

impl ParcelMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ParcelMode::Data => "data",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PastParcelsLoaded {
        result: Result<Vec<String>, DataSourceError>,
    },
    SnapshotLoaded {
        request_id: RequestId,
        tracking_number: String,
        result: Result<ParcelRecord, DataSourceError>,
    },
    LoggedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSourceError {
    pub kind: FailureKind,
    pub message: String,
}

impl DataSourceError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for DataSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

impl std::error::Error for DataSourceError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
