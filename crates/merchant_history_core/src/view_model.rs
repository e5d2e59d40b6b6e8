use crate::{Lifecycle, ListVisibility, ParcelIdentifier, ParcelSnapshot};

/// Search bar text while nothing is selected.
pub const SEARCH_PLACEHOLDER: &str = "Select a Parcel...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryViewModel {
    pub lifecycle: Lifecycle,
    pub list_visibility: ListVisibility,
    pub search_label: String,
    /// Dropdown entries; `None` while the list is hidden or not loaded.
    pub dropdown: Option<Vec<ParcelIdentifier>>,
    pub snapshot: Option<ParcelSnapshot>,
    pub dirty: bool,
}
