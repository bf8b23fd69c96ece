//! Filter state ownership: raw text buffers, debounced commits, and the
//! consumer notification contract.

mod debounce;

pub use debounce::Debouncer;

use crate::models::PropertyFilters;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

/// Quiet period after the last keystroke before text fields commit.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

type FilterCallback = Arc<dyn Fn(PropertyFilters) + Send + Sync>;

struct FilterState {
    is_expanded: bool,
    name_input: String,
    address_input: String,
    filters: PropertyFilters,
}

/// Owns transient filter field values and the last committed filter object.
///
/// Free-text fields (name, address) buffer keystrokes and commit on the
/// trailing edge of a 500 ms debounce window; every other field commits
/// immediately. Each commit replaces the filter object wholesale and
/// notifies the consumer callback, when one is attached, outside the state
/// lock.
pub struct FilterController {
    state: Arc<Mutex<FilterState>>,
    debouncer: Debouncer,
    on_change: Option<FilterCallback>,
}

impl FilterController {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FilterState {
                is_expanded: false,
                name_input: String::new(),
                address_input: String::new(),
                filters: PropertyFilters::with_defaults(),
            })),
            debouncer: Debouncer::new(DEBOUNCE_DELAY),
            on_change: None,
        }
    }

    /// Attach the consumer callback invoked with every committed filter
    /// object.
    pub fn on_change(mut self, callback: impl Fn(PropertyFilters) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(callback));
        self
    }

    pub fn is_expanded(&self) -> bool {
        self.state.lock().unwrap().is_expanded
    }

    pub fn toggle_expanded(&self) {
        let mut state = self.state.lock().unwrap();
        state.is_expanded = !state.is_expanded;
    }

    pub fn name_input(&self) -> String {
        self.state.lock().unwrap().name_input.clone()
    }

    pub fn address_input(&self) -> String {
        self.state.lock().unwrap().address_input.clone()
    }

    /// The last committed filter object.
    pub fn filters(&self) -> PropertyFilters {
        self.state.lock().unwrap().filters.clone()
    }

    /// Update the name buffer; commits after the debounce window.
    pub fn set_name_input(&self, value: impl Into<String>) {
        self.state.lock().unwrap().name_input = value.into();
        self.schedule_text_commit();
    }

    /// Update the address buffer; commits after the debounce window.
    pub fn set_address_input(&self, value: impl Into<String>) {
        self.state.lock().unwrap().address_input = value.into();
        self.schedule_text_commit();
    }

    pub fn set_min_price(&self, value: Option<u64>) {
        self.commit_with(|filters| filters.min_price = value);
    }

    pub fn set_max_price(&self, value: Option<u64>) {
        self.commit_with(|filters| filters.max_price = value);
    }

    pub fn set_page(&self, value: Option<u32>) {
        self.commit_with(|filters| filters.page = value);
    }

    pub fn set_page_size(&self, value: Option<u32>) {
        self.commit_with(|filters| filters.page_size = value);
    }

    /// UI price-range shortcut: commits both bounds at once.
    pub fn price_shortcut(&self, min: Option<u64>, max: Option<u64>) {
        self.commit_with(|filters| {
            filters.min_price = min;
            filters.max_price = max;
        });
    }

    /// Reset buffers and committed filters to the defaults. Always
    /// notifies, even when already at defaults.
    pub fn clear(&self) {
        let cleared = PropertyFilters::with_defaults();
        {
            let mut state = self.state.lock().unwrap();
            state.name_input.clear();
            state.address_input.clear();
            state.filters = cleared.clone();
        }
        self.notify(cleared);
    }

    /// Immediate commit for discrete fields: copy, mutate, replace, notify.
    fn commit_with(&self, mutate: impl FnOnce(&mut PropertyFilters)) {
        let committed = {
            let mut state = self.state.lock().unwrap();
            let mut filters = state.filters.clone();
            mutate(&mut filters);
            state.filters = filters.clone();
            filters
        };
        self.notify(committed);
    }

    fn notify(&self, filters: PropertyFilters) {
        if let Some(callback) = &self.on_change {
            callback(filters);
        }
    }

    fn schedule_text_commit(&self) {
        let state = self.state.clone();
        let on_change = self.on_change.clone();

        self.debouncer.call(move || {
            let committed = {
                let mut state = state.lock().unwrap();

                // Compare buffers against the committed fields; empty and
                // unset mean the same thing.
                let committed_name = state.filters.name.clone().unwrap_or_default();
                let committed_address = state.filters.address.clone().unwrap_or_default();
                if state.name_input == committed_name && state.address_input == committed_address {
                    debug!("Debounce fired with unchanged buffers; skipping commit");
                    return;
                }

                let filters = PropertyFilters {
                    name: (!state.name_input.is_empty()).then(|| state.name_input.clone()),
                    address: (!state.address_input.is_empty())
                        .then(|| state.address_input.clone()),
                    ..state.filters.clone()
                };
                state.filters = filters.clone();
                filters
            };

            if let Some(callback) = &on_change {
                callback(committed);
            }
        });
    }
}

impl Default for FilterController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    fn recording_controller() -> (FilterController, Arc<Mutex<Vec<PropertyFilters>>>) {
        let commits: Arc<Mutex<Vec<PropertyFilters>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = commits.clone();
        let controller = FilterController::new()
            .on_change(move |filters| sink.lock().unwrap().push(filters));
        (controller, commits)
    }

    #[tokio::test(start_paused = true)]
    async fn keystroke_burst_commits_once_on_the_trailing_edge() {
        let (controller, commits) = recording_controller();

        for input in ["C", "Ca", "Cas", "Casa"] {
            controller.set_name_input(input);
            settle().await;
            advance(Duration::from_millis(100)).await;
        }

        // Last keystroke was 100 ms ago; the 500 ms window is still open.
        advance(Duration::from_millis(300)).await;
        settle().await;
        assert!(commits.lock().unwrap().is_empty());

        advance(Duration::from_millis(101)).await;
        settle().await;

        let commits = commits.lock().unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].name, Some("Casa".to_string()));
        assert_eq!(commits[0].page, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_is_a_no_op_when_buffers_match_committed_filters() {
        let (controller, commits) = recording_controller();

        controller.set_name_input("Casa");
        settle().await;
        advance(Duration::from_millis(501)).await;
        settle().await;
        assert_eq!(commits.lock().unwrap().len(), 1);

        // Same value typed again: timer fires, nothing changed, no commit.
        controller.set_name_input("Casa");
        settle().await;
        advance(Duration::from_millis(501)).await;
        settle().await;
        assert_eq!(commits.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_a_text_field_commits_unset() {
        let (controller, commits) = recording_controller();

        controller.set_name_input("Casa");
        settle().await;
        advance(Duration::from_millis(501)).await;
        settle().await;

        controller.set_name_input("");
        settle().await;
        advance(Duration::from_millis(501)).await;
        settle().await;

        let commits = commits.lock().unwrap();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[1].name, None);
    }

    #[tokio::test]
    async fn discrete_fields_commit_synchronously() {
        let (controller, commits) = recording_controller();

        controller.set_page_size(Some(50));
        {
            let commits = commits.lock().unwrap();
            assert_eq!(commits.len(), 1);
            assert_eq!(commits[0].page_size, Some(50));
        }

        controller.set_min_price(None);
        let commits = commits.lock().unwrap();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[1].min_price, None);
    }

    #[tokio::test]
    async fn price_shortcut_commits_both_bounds_at_once() {
        let (controller, commits) = recording_controller();

        controller.price_shortcut(Some(0), Some(2_500_000));

        let commits = commits.lock().unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].min_price, Some(0));
        assert_eq!(commits[0].max_price, Some(2_500_000));
        assert_eq!(commits[0].page, Some(1));
        assert_eq!(commits[0].page_size, Some(20));
    }

    #[tokio::test]
    async fn clear_resets_to_defaults_and_always_notifies() {
        let (controller, commits) = recording_controller();

        controller.set_min_price(Some(100));
        controller.set_name_input("Casa");
        controller.clear();

        assert_eq!(controller.name_input(), "");
        assert_eq!(controller.filters(), PropertyFilters::with_defaults());
        assert_eq!(commits.lock().unwrap().len(), 2);

        // Already at defaults; clear still notifies.
        controller.clear();
        let commits = commits.lock().unwrap();
        assert_eq!(commits.len(), 3);
        assert_eq!(*commits.last().unwrap(), PropertyFilters::with_defaults());
    }

    #[tokio::test]
    async fn toggle_expanded_flips_only_the_panel_state() {
        let (controller, commits) = recording_controller();

        assert!(!controller.is_expanded());
        controller.toggle_expanded();
        assert!(controller.is_expanded());
        controller.toggle_expanded();
        assert!(!controller.is_expanded());
        assert!(commits.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn works_without_a_callback() {
        let controller = FilterController::new();
        controller.set_page(Some(3));
        assert_eq!(controller.filters().page, Some(3));
    }
}
