use std::sync::{Arc, Mutex};

/// Client-wide parcel fields shared with other views for the lifetime of a session.
pub type ClientContext = Arc<Mutex<ClientState>>;

/// Cross-view parcel state. Writes go through the accessors so the found flag and the
/// active identifier are always changed together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientState {
    parcel_is_found: bool,
    parcel_id: String,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_context(self) -> ClientContext {
        Arc::new(Mutex::new(self))
    }

    pub fn record_found(&mut self, parcel_id: impl Into<String>) {
        self.parcel_is_found = true;
        self.parcel_id = parcel_id.into();
    }

    /// Forget the active identifier. The found flag is left as is; readers must
    /// treat it as stale once the identifier is empty (see [`Self::active_parcel`]).
    pub fn clear_parcel_id(&mut self) {
        self.parcel_id.clear();
    }

    pub fn parcel_is_found(&self) -> bool {
        self.parcel_is_found
    }

    pub fn parcel_id(&self) -> &str {
        &self.parcel_id
    }

    /// The identifier of the parcel currently found, if any.
    pub fn active_parcel(&self) -> Option<&str> {
        if self.parcel_is_found && !self.parcel_id.is_empty() {
            Some(&self.parcel_id)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ClientState;

    #[test]
    fn record_found_sets_both_fields() {
        let mut client = ClientState::new();
        client.record_found("TRK1");
        assert!(client.parcel_is_found());
        assert_eq!(client.parcel_id(), "TRK1");
        assert_eq!(client.active_parcel(), Some("TRK1"));
    }

    #[test]
    fn clearing_keeps_stale_flag_but_hides_active_parcel() {
        let mut client = ClientState::new();
        client.record_found("TRK1");
        client.clear_parcel_id();
        assert!(client.parcel_is_found());
        assert_eq!(client.parcel_id(), "");
        assert_eq!(client.active_parcel(), None);
    }

    #[test]
    fn fresh_state_has_nothing_active() {
        let client = ClientState::new();
        assert!(!client.parcel_is_found());
        assert_eq!(client.active_parcel(), None);
    }
}
