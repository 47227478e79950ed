//! Application state and types.

use std::time::Duration;

use wifidrop_core::record::{NewWifiCredential, WifiCredential, filter_by_network};

use crate::store::StoreError;

/// How long a record stays marked as "just copied".
pub const COPY_MARK_TTL: Duration = Duration::from_secs(2);

/// Application mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Network list with live search.
    Browse,
    /// Creation form overlay.
    AddForm,
    /// Blocking success acknowledgment after an insert.
    SubmitNotice,
}

/// Form inputs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    NetworkName,
    Password,
    BusinessName,
    City,
    State,
    Country,
}

impl FormField {
    pub const ALL: [Self; 6] = [
        Self::NetworkName,
        Self::Password,
        Self::BusinessName,
        Self::City,
        Self::State,
        Self::Country,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::NetworkName => "Network Name",
            Self::Password => "Password",
            Self::BusinessName => "Business Name",
            Self::City => "City (Optional)",
            Self::State => "State (Optional)",
            Self::Country => "Country (Optional)",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::NetworkName => Self::Password,
            Self::Password => Self::BusinessName,
            Self::BusinessName => Self::City,
            Self::City => Self::State,
            Self::State => Self::Country,
            Self::Country => Self::NetworkName,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::NetworkName => Self::Country,
            Self::Password => Self::NetworkName,
            Self::BusinessName => Self::Password,
            Self::City => Self::BusinessName,
            Self::State => Self::City,
            Self::Country => Self::State,
        }
    }
}

/// User-edited, not-yet-submitted values for a pending credential.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftCredential {
    pub network_name: String,
    pub password: String,
    pub business_name: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

impl DraftCredential {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::NetworkName => &self.network_name,
            FormField::Password => &self.password,
            FormField::BusinessName => &self.business_name,
            FormField::City => &self.city,
            FormField::State => &self.state,
            FormField::Country => &self.country,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::NetworkName => &mut self.network_name,
            FormField::Password => &mut self.password,
            FormField::BusinessName => &mut self.business_name,
            FormField::City => &mut self.city,
            FormField::State => &mut self.state,
            FormField::Country => &mut self.country,
        }
    }

    /// The three required inputs are filled (the required-attribute analog;
    /// location fields stay optional).
    pub fn is_complete(&self) -> bool {
        !self.network_name.is_empty()
            && !self.password.is_empty()
            && !self.business_name.is_empty()
    }

    /// The insert payload: every field as typed, empty strings included.
    pub fn to_record(&self) -> NewWifiCredential {
        NewWifiCredential {
            network_name: self.network_name.clone(),
            password: self.password.clone(),
            business_name: self.business_name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            country: self.country.clone(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Completion events reported back to the interaction loop by spawned work.
#[derive(Debug)]
pub enum StoreEvent {
    /// A fetch-all finished.
    Loaded(Result<Vec<WifiCredential>, StoreError>),
    /// An insert finished.
    Inserted(Result<WifiCredential, StoreError>),
    /// A copy marker's two-second window elapsed.
    CopyMarkExpired { id: i64 },
}

/// TUI application state.
///
/// Owned and mutated only by the interaction loop; spawned store calls and
/// timers report back as [`StoreEvent`]s.
pub struct App {
    pub mode: AppMode,
    /// The fetched/appended list, in store order.
    pub records: Vec<WifiCredential>,
    /// Free-text search term, edited live in Browse mode.
    pub search: String,
    /// Selection index into the filtered view.
    pub selected: usize,
    pub draft: DraftCredential,
    /// Focused form input while the creation form is open.
    pub focus: FormField,
    /// Record whose password was copied within the last two seconds.
    pub copied_id: Option<i64>,
    pub status: String,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            mode: AppMode::Browse,
            records: Vec::new(),
            search: String::new(),
            selected: 0,
            draft: DraftCredential::default(),
            focus: FormField::NetworkName,
            copied_id: None,
            status: "Up/Down select | Enter copy password | Ctrl+N add network | Ctrl+C quit"
                .to_string(),
            should_quit: false,
        }
    }

    /// Records matching the current search term, in store order.
    ///
    /// A pure projection recomputed per render; never mutates the list and
    /// never touches the store.
    pub fn filtered(&self) -> Vec<&WifiCredential> {
        filter_by_network(&self.records, &self.search)
    }

    /// The currently selected record in the filtered view.
    pub fn selected_record(&self) -> Option<&WifiCredential> {
        let filtered = self.filtered();
        filtered
            .get(self.selected.min(filtered.len().saturating_sub(1)))
            .copied()
    }

    pub fn select_next(&mut self) {
        let len = self.filtered().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Clamp the selection after the list or the search term changed.
    fn clamp_selection(&mut self) {
        let len = self.filtered().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Live-edit the search term.
    pub fn push_search(&mut self, c: char) {
        self.search.push(c);
        self.clamp_selection();
    }

    pub fn pop_search(&mut self) {
        self.search.pop();
        self.clamp_selection();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.clamp_selection();
    }

    /// Open the creation form (gated behind an explicit action, like the
    /// original's "Add new network" toggle).
    pub fn open_form(&mut self) {
        self.mode = AppMode::AddForm;
        self.focus = FormField::NetworkName;
    }

    /// Close the form without submitting. Draft values are kept.
    pub fn close_form(&mut self) {
        self.mode = AppMode::Browse;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Mark `id` as just copied. The caller arms the expiry timer.
    pub fn mark_copied(&mut self, id: i64) {
        self.copied_id = Some(id);
    }

    /// Dismiss the blocking success acknowledgment.
    pub fn dismiss_notice(&mut self) {
        if self.mode == AppMode::SubmitNotice {
            self.mode = AppMode::Browse;
        }
    }

    /// Process a completion event from spawned store work or a timer.
    pub fn handle_store_event(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::Loaded(Ok(rows)) => {
                // A later-arriving load overwrites wholesale: last write wins.
                self.records = rows;
                self.clamp_selection();
            }
            StoreEvent::Loaded(Err(e)) => {
                tracing::error!(error = %e, "Failed to fetch credentials");
                self.status = format!("Error fetching networks: {e}");
            }
            StoreEvent::Inserted(Ok(record)) => {
                // Appended at the end regardless of any display order.
                self.records.push(record);
                self.draft.clear();
                self.focus = FormField::NetworkName;
                self.mode = AppMode::SubmitNotice;
            }
            StoreEvent::Inserted(Err(e)) => {
                // Draft fields stay as typed; the list is untouched.
                tracing::error!(error = %e, "Failed to add credential");
                self.status = format!("Error adding network: {e}");
            }
            StoreEvent::CopyMarkExpired { id } => {
                // A stale timer must not clear a marker it did not set.
                if self.copied_id == Some(id) {
                    self.copied_id = None;
                }
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, network_name: &str, password: &str) -> WifiCredential {
        WifiCredential {
            id,
            network_name: network_name.to_string(),
            password: password.to_string(),
            business_name: None,
            city: None,
            state: None,
            country: None,
        }
    }

    fn store_err() -> StoreError {
        StoreError::Api {
            status: 500,
            message: "Internal Server Error".to_string(),
        }
    }

    #[test]
    fn new_app_state() {
        let app = App::new();
        assert_eq!(app.mode, AppMode::Browse);
        assert!(app.records.is_empty());
        assert!(app.search.is_empty());
        assert!(app.copied_id.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn load_replaces_list_in_store_order() {
        let mut app = App::new();
        app.handle_store_event(StoreEvent::Loaded(Ok(vec![
            record(1, "CafeNet", "brew123"),
            record(2, "LibraryWifi", "quiet456"),
        ])));
        let ids: Vec<i64> = app.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn second_load_overwrites_wholesale() {
        let mut app = App::new();
        app.handle_store_event(StoreEvent::Loaded(Ok(vec![record(1, "CafeNet", "x")])));
        app.handle_store_event(StoreEvent::Loaded(Ok(vec![
            record(3, "ParkWifi", "y"),
            record(4, "PlazaWifi", "z"),
        ])));
        // Last write wins; the earlier list is not merged in.
        let ids: Vec<i64> = app.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn load_failure_leaves_list_empty_and_reports() {
        let mut app = App::new();
        app.handle_store_event(StoreEvent::Loaded(Err(store_err())));
        assert!(app.records.is_empty());
        assert!(app.status.contains("Error fetching"));
    }

    #[test]
    fn insert_success_appends_clears_draft_and_blocks() {
        let mut app = App::new();
        app.handle_store_event(StoreEvent::Loaded(Ok(vec![record(1, "CafeNet", "x")])));
        app.mode = AppMode::AddForm;
        app.draft.network_name = "ParkWifi".to_string();
        app.draft.password = "open".to_string();
        app.draft.business_name = "CityPark".to_string();

        let mut created = record(3, "ParkWifi", "open");
        created.business_name = Some("CityPark".to_string());
        app.handle_store_event(StoreEvent::Inserted(Ok(created.clone())));

        assert_eq!(app.records.len(), 2);
        assert_eq!(app.records.last(), Some(&created));
        assert_eq!(app.draft, DraftCredential::default());
        assert_eq!(app.focus, FormField::NetworkName);
        assert_eq!(app.mode, AppMode::SubmitNotice);
    }

    #[test]
    fn insert_failure_preserves_draft_and_list() {
        let mut app = App::new();
        app.handle_store_event(StoreEvent::Loaded(Ok(vec![record(1, "CafeNet", "x")])));
        app.mode = AppMode::AddForm;
        app.draft.network_name = "ParkWifi".to_string();
        app.draft.password = "open".to_string();
        app.draft.business_name = "CityPark".to_string();
        let draft_before = app.draft.clone();

        app.handle_store_event(StoreEvent::Inserted(Err(store_err())));

        assert_eq!(app.records.len(), 1);
        assert_eq!(app.draft, draft_before);
        assert_eq!(app.mode, AppMode::AddForm);
        assert!(app.status.contains("Error adding"));
    }

    #[test]
    fn overlapping_inserts_append_in_arrival_order() {
        // No disabled-during-submit guard exists: two in-flight inserts
        // both land, in the order their completions arrive.
        let mut app = App::new();
        app.handle_store_event(StoreEvent::Inserted(Ok(record(5, "First", "a"))));
        app.dismiss_notice();
        app.handle_store_event(StoreEvent::Inserted(Ok(record(6, "Second", "b"))));
        let ids: Vec<i64> = app.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 6]);
    }

    #[test]
    fn copy_marker_clears_when_its_window_elapses() {
        let mut app = App::new();
        app.mark_copied(1);
        assert_eq!(app.copied_id, Some(1));
        app.handle_store_event(StoreEvent::CopyMarkExpired { id: 1 });
        assert!(app.copied_id.is_none());
    }

    #[test]
    fn stale_timer_cannot_clear_a_newer_marker() {
        // Copy A, then copy B within A's window: A's expiry is a no-op and
        // B's expiry clears the marker. No marker survives both windows.
        let mut app = App::new();
        app.mark_copied(1);
        app.mark_copied(2);
        app.handle_store_event(StoreEvent::CopyMarkExpired { id: 1 });
        assert_eq!(app.copied_id, Some(2));
        app.handle_store_event(StoreEvent::CopyMarkExpired { id: 2 });
        assert!(app.copied_id.is_none());
    }

    #[test]
    fn recopying_the_same_record_keeps_the_id_rule() {
        // The rule is id-based: re-copying the same record does not extend
        // the first timer's window.
        let mut app = App::new();
        app.mark_copied(1);
        app.mark_copied(1);
        app.handle_store_event(StoreEvent::CopyMarkExpired { id: 1 });
        assert!(app.copied_id.is_none());
    }

    #[test]
    fn filter_projects_without_mutating() {
        let mut app = App::new();
        app.handle_store_event(StoreEvent::Loaded(Ok(vec![
            record(1, "CafeNet", "brew123"),
            record(2, "LibraryWifi", "quiet456"),
        ])));
        app.search = "cafe".to_string();
        let filtered = app.filtered();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
        // The underlying list is untouched.
        assert_eq!(app.records.len(), 2);

        app.clear_search();
        assert_eq!(app.filtered().len(), 2);
    }

    #[test]
    fn selection_clamps_when_search_narrows() {
        let mut app = App::new();
        app.handle_store_event(StoreEvent::Loaded(Ok(vec![
            record(1, "CafeNet", "x"),
            record(2, "LibraryWifi", "y"),
            record(3, "ParkWifi", "z"),
        ])));
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 2);

        for c in "cafe".chars() {
            app.push_search(c);
        }
        assert_eq!(app.selected, 0);
        assert_eq!(app.selected_record().map(|r| r.id), Some(1));
    }

    #[test]
    fn selection_bounds() {
        let mut app = App::new();
        assert!(app.selected_record().is_none());
        app.select_next();
        app.select_prev();
        assert_eq!(app.selected, 0);

        app.handle_store_event(StoreEvent::Loaded(Ok(vec![
            record(1, "A", "x"),
            record(2, "B", "y"),
        ])));
        app.select_next();
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn form_open_close_keeps_draft() {
        let mut app = App::new();
        app.open_form();
        assert_eq!(app.mode, AppMode::AddForm);
        app.draft.network_name = "Half-typed".to_string();
        app.close_form();
        assert_eq!(app.mode, AppMode::Browse);
        assert_eq!(app.draft.network_name, "Half-typed");
    }

    #[test]
    fn focus_cycles_through_all_fields() {
        let mut app = App::new();
        app.open_form();
        for _ in 0..FormField::ALL.len() {
            app.focus_next();
        }
        assert_eq!(app.focus, FormField::NetworkName);
        app.focus_prev();
        assert_eq!(app.focus, FormField::Country);
    }

    #[test]
    fn draft_requires_network_password_and_business() {
        let mut draft = DraftCredential::default();
        assert!(!draft.is_complete());
        draft.network_name = "CafeNet".to_string();
        draft.password = "brew123".to_string();
        assert!(!draft.is_complete());
        draft.business_name = "Corner Cafe".to_string();
        assert!(draft.is_complete());
    }

    #[test]
    fn draft_to_record_carries_every_field_as_typed() {
        let mut draft = DraftCredential::default();
        draft.network_name = "ParkWifi".to_string();
        draft.password = "open".to_string();
        draft.business_name = "CityPark".to_string();
        let rec = draft.to_record();
        assert_eq!(rec.network_name, "ParkWifi");
        assert_eq!(rec.city, "");
        assert_eq!(rec.state, "");
        assert_eq!(rec.country, "");
    }

    #[test]
    fn dismiss_notice_only_leaves_submit_notice() {
        let mut app = App::new();
        app.dismiss_notice();
        assert_eq!(app.mode, AppMode::Browse);
        app.mode = AppMode::SubmitNotice;
        app.dismiss_notice();
        assert_eq!(app.mode, AppMode::Browse);
    }

    #[test]
    fn full_share_scenario() {
        // Load two records, search, then share a third one.
        let mut app = App::new();
        app.handle_store_event(StoreEvent::Loaded(Ok(vec![
            record(1, "CafeNet", "brew123"),
            record(2, "LibraryWifi", "quiet456"),
        ])));
        assert_eq!(app.records.len(), 2);

        for c in "cafe".chars() {
            app.push_search(c);
        }
        let filtered: Vec<i64> = app.filtered().iter().map(|r| r.id).collect();
        assert_eq!(filtered, vec![1]);
        app.clear_search();

        app.open_form();
        app.draft.network_name = "ParkWifi".to_string();
        app.draft.password = "open".to_string();
        app.draft.business_name = "CityPark".to_string();

        let mut created = record(3, "ParkWifi", "open");
        created.business_name = Some("CityPark".to_string());
        app.handle_store_event(StoreEvent::Inserted(Ok(created)));

        assert_eq!(app.records.len(), 3);
        assert_eq!(app.records.last().map(|r| r.id), Some(3));
        assert_eq!(app.draft, DraftCredential::default());
        assert_eq!(app.mode, AppMode::SubmitNotice);
    }
}
