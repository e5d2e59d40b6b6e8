use crate::view_model::{HistoryViewModel, SEARCH_PLACEHOLDER};

/// Opaque tracking number issued for a parcel.
pub type ParcelIdentifier = String;

/// Monotonic tag attached to every snapshot request issued by the view.
pub type RequestId = u64;

/// Parcel record as of fetch time. Replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParcelSnapshot {
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListVisibility {
    /// The user has not opened or closed the dropdown yet.
    #[default]
    Unknown,
    Shown,
    Hidden,
}

impl ListVisibility {
    pub fn toggled(self) -> Self {
        match self {
            ListVisibility::Unknown | ListVisibility::Hidden => ListVisibility::Shown,
            ListVisibility::Shown => ListVisibility::Hidden,
        }
    }

    pub fn is_shown(self) -> bool {
        self == ListVisibility::Shown
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Unmounted,
    Active,
    /// Session guard rejected the session; nothing else is initialized.
    Redirected,
    /// Logout or return-home was issued; the view is about to unmount.
    Leaving,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryState {
    lifecycle: Lifecycle,
    list_visibility: ListVisibility,
    past_identifiers: Option<Vec<ParcelIdentifier>>,
    selected: Option<ParcelIdentifier>,
    snapshot: Option<ParcelSnapshot>,
    last_request_id: RequestId,
    dirty: bool,
}

impl HistoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> HistoryViewModel {
        let dropdown = match (&self.past_identifiers, self.list_visibility.is_shown()) {
            (Some(identifiers), true) => Some(identifiers.clone()),
            _ => None,
        };
        HistoryViewModel {
            lifecycle: self.lifecycle,
            list_visibility: self.list_visibility,
            search_label: self
                .selected
                .clone()
                .unwrap_or_else(|| SEARCH_PLACEHOLDER.to_string()),
            dropdown,
            snapshot: self.snapshot.clone(),
            dirty: self.dirty,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn list_visibility(&self) -> ListVisibility {
        self.list_visibility
    }

    pub fn past_identifiers(&self) -> Option<&[ParcelIdentifier]> {
        self.past_identifiers.as_deref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn snapshot(&self) -> Option<&ParcelSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn last_request_id(&self) -> RequestId {
        self.last_request_id
    }

    /// Returns whether anything changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    /// Whether `identifier` is an entry of the currently open dropdown.
    pub(crate) fn is_choosable(&self, identifier: &str) -> bool {
        self.list_visibility.is_shown()
            && self
                .past_identifiers
                .as_ref()
                .is_some_and(|identifiers| identifiers.iter().any(|id| id == identifier))
    }

    pub(crate) fn set_lifecycle(&mut self, lifecycle: Lifecycle) {
        self.lifecycle = lifecycle;
        self.dirty = true;
    }

    pub(crate) fn toggle_list(&mut self) {
        self.list_visibility = self.list_visibility.toggled();
        self.dirty = true;
    }

    pub(crate) fn set_past_identifiers(&mut self, identifiers: Vec<ParcelIdentifier>) {
        self.past_identifiers = Some(identifiers);
        self.dirty = true;
    }

    /// Select `identifier`, close the dropdown and allocate the id of the fetch
    /// that must follow.
    pub(crate) fn begin_selection(&mut self, identifier: ParcelIdentifier) -> RequestId {
        self.selected = Some(identifier);
        self.list_visibility = ListVisibility::Hidden;
        self.last_request_id += 1;
        self.dirty = true;
        self.last_request_id
    }

    pub(crate) fn set_snapshot(&mut self, snapshot: Option<ParcelSnapshot>) {
        self.snapshot = snapshot;
        self.dirty = true;
    }
}
