use std::time::Duration;

pub const INVALID_REQUEST_ROUTE: &str = "/InvalidRequest?_Redirect";
pub const HOME_ROUTE: &str = "/";

/// How long a transient notification stays up before it expires on its own.
pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(3000);

const SNAPSHOT_FAILURE_TITLE: &str = "Something went wrong...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub duration: Duration,
    pub dismissible: bool,
    pub position: Position,
}

/// Toast raised when a parcel snapshot cannot be fetched.
pub fn snapshot_failure(message: impl Into<String>) -> Notification {
    Notification {
        title: SNAPSHOT_FAILURE_TITLE.to_string(),
        message: message.into(),
        severity: Severity::Error,
        duration: NOTIFICATION_DURATION,
        dismissible: true,
        position: Position::Top,
    }
}
