use std::sync::Mutex;

use chrono::{DateTime, Local, TimeDelta};
use history_logging::history_info;
use merchant_history_core::{Notification, Position, Severity};

pub trait NotificationSink {
    fn notify(&self, notification: &Notification);
}

pub trait NavigationSink {
    fn go_to(&self, route: &str);
}

/// Prints toasts to stdout.
pub struct TerminalNotifier;

impl NotificationSink for TerminalNotifier {
    fn notify(&self, notification: &Notification) {
        println!("{}", format_notification(notification, Local::now()));
    }
}

pub fn format_notification(notification: &Notification, now: DateTime<Local>) -> String {
    let severity = match notification.severity {
        Severity::Info => "info",
        Severity::Warning => "warning",
        Severity::Error => "error",
    };
    let anchor = match notification.position {
        Position::Top => "^",
        Position::Bottom => "v",
    };
    let duration = TimeDelta::from_std(notification.duration).unwrap_or(TimeDelta::zero());
    let expires = (now + duration).format("%H:%M:%S");
    let dismiss = if notification.dismissible {
        ", dismissible"
    } else {
        ""
    };
    format!(
        "{anchor} [{severity}] {}: {} (until {expires}{dismiss})",
        notification.title, notification.message
    )
}

/// Remembers the last route the view navigated to.
#[derive(Default)]
pub struct RouteRecorder {
    route: Mutex<Option<String>>,
}

impl RouteRecorder {
    pub fn current(&self) -> Option<String> {
        self.route.lock().ok().and_then(|route| route.clone())
    }
}

impl NavigationSink for RouteRecorder {
    fn go_to(&self, route: &str) {
        history_info!("Navigating to {}", route);
        if let Ok(mut current) = self.route.lock() {
            *current = Some(route.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};
    use merchant_history_core::snapshot_failure;

    use super::{format_notification, NavigationSink, RouteRecorder};

    #[test]
    fn snapshot_failure_toast_shows_message_and_expiry() {
        let now = Local.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let line = format_notification(&snapshot_failure("not found"), now);
        assert_eq!(
            line,
            "^ [error] Something went wrong...: not found (until 12:00:03, dismissible)"
        );
    }

    #[test]
    fn recorder_keeps_last_route() {
        let recorder = RouteRecorder::default();
        assert_eq!(recorder.current(), None);
        recorder.go_to("/");
        recorder.go_to("/InvalidRequest?_Redirect");
        assert_eq!(
            recorder.current().as_deref(),
            Some("/InvalidRequest?_Redirect")
        );
    }
}
