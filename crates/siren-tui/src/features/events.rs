//! List view state.
//!
//! Accumulates feed items in arrival order and presents them sorted by
//! creation time, newest first. The list is append-only for the lifetime of
//! the session; only the sort order is recomputed.

use siren_core::gateway::EventResponse;

/// State of the event list.
#[derive(Debug, Default)]
pub struct EventsState {
    /// Held responses, in arrival order.
    ///
    /// No de-duplication: a refresh probe can append an id the feed also
    /// delivers, and both entries are kept.
    responses: Vec<EventResponse>,
    /// Cursor into the sorted presentation order.
    pub selected: usize,
}

impl EventsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one response. Never reorders or replaces existing entries.
    pub fn push(&mut self, response: EventResponse) {
        self.responses.push(response);
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Returns the held responses sorted by descending creation time.
    ///
    /// The sort is stable: entries with equal timestamps keep arrival order.
    pub fn sorted(&self) -> Vec<&EventResponse> {
        let mut items: Vec<&EventResponse> = self.responses.iter().collect();
        items.sort_by(|a, b| b.event.created.cmp(&a.event.created));
        items
    }

    /// The response under the cursor, in sorted order.
    pub fn selected_response(&self) -> Option<&EventResponse> {
        self.sorted().get(self.selected).copied()
    }

    /// The id the refresh heuristic probes next: one past the largest held
    /// id, or 1 when nothing is held. Brittle if ids are not dense.
    pub fn next_probe_id(&self) -> i64 {
        self.responses
            .iter()
            .map(|r| r.event.id)
            .max()
            .map_or(1, |max| max + 1)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.responses.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Clamps the cursor after the list grows or the view re-renders.
    pub fn clamp_selection(&mut self) {
        if !self.responses.is_empty() && self.selected >= self.responses.len() {
            self.selected = self.responses.len() - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use siren_core::gateway::{Delivery, EmergencyEvent, EventResponse};

    use super::*;

    fn response(id: i64, created_minute: u32, title: &str) -> EventResponse {
        EventResponse {
            event: EmergencyEvent {
                id,
                created: Utc.with_ymd_and_hms(2024, 3, 1, 12, created_minute, 0).unwrap(),
                title: title.to_string(),
                category: String::new(),
                location: String::new(),
                summary: String::new(),
            },
            delivery: Delivery {
                receipt: format!("r-{id}"),
                acknowledgements_path: format!("/api/events/{id}/acknowledgements"),
            },
        }
    }

    #[test]
    fn test_sorted_is_newest_first() {
        let mut state = EventsState::new();
        state.push(response(1, 5, "old"));
        state.push(response(2, 30, "new"));
        state.push(response(3, 15, "mid"));

        let titles: Vec<&str> = state.sorted().iter().map(|r| r.event.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_sorted_is_permutation_of_held() {
        let mut state = EventsState::new();
        for (id, minute) in [(5, 3), (9, 1), (7, 7), (2, 7)] {
            state.push(response(id, minute, "x"));
        }
        let mut ids: Vec<i64> = state.sorted().iter().map(|r| r.event.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![2, 5, 7, 9]);
    }

    #[test]
    fn test_equal_timestamps_keep_arrival_order() {
        let mut state = EventsState::new();
        state.push(response(10, 20, "first"));
        state.push(response(11, 20, "second"));

        let titles: Vec<&str> = state.sorted().iter().map(|r| r.event.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn test_duplicate_ids_are_kept() {
        let mut state = EventsState::new();
        state.push(response(4, 1, "feed copy"));
        state.push(response(4, 1, "refresh copy"));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_next_probe_id() {
        let mut state = EventsState::new();
        assert_eq!(state.next_probe_id(), 1);

        for id in [5, 7, 9] {
            state.push(response(id, 0, "x"));
        }
        assert_eq!(state.next_probe_id(), 10);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut state = EventsState::new();
        state.push(response(1, 0, "only"));

        state.select_prev();
        assert_eq!(state.selected, 0);
        state.select_next();
        assert_eq!(state.selected, 0);

        state.push(response(2, 1, "more"));
        state.select_next();
        assert_eq!(state.selected, 1);
    }
}
