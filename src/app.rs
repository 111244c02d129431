//! Application state and navigation logic.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use probwatch_core::{Observation, SeriesBuffer, ValueRange};

use crate::data::{export_series, SeriesStats};
use crate::prefs::{PreferenceStore, Preferences};
use crate::source::ObservationSource;
use crate::ui::{Theme, ThemeMode};

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// The current view/tab in the TUI.
///
/// Observation detail is shown as an overlay (controlled by
/// `App::show_detail_overlay`) rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Time-series chart with threshold markers.
    Chart,
    /// Table of observations, newest first.
    History,
    /// Per-band counts and value statistics.
    Stats,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Chart => View::History,
            View::History => View::Stats,
            View::Stats => View::Chart,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Chart => View::Stats,
            View::History => View::Chart,
            View::Stats => View::History,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Chart => "Chart",
            View::History => "History",
            View::Stats => "Stats",
        }
    }

    /// Position in the tab bar.
    pub fn index(&self) -> usize {
        match self {
            View::Chart => 0,
            View::History => 1,
            View::Stats => 2,
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Data source
    source: Box<dyn ObservationSource>,
    pub series: SeriesBuffer,
    pub stats: SeriesStats,
    /// Value axis used by the chart.
    pub value_range: ValueRange,
    pub load_error: Option<String>,
    pub last_updated: Option<Instant>,

    // Navigation state (History view)
    pub selected_index: usize,

    // UI
    pub theme: Theme,
    prefs: Option<PreferenceStore>,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from `source` into `series`.
    pub fn new(source: Box<dyn ObservationSource>, series: SeriesBuffer, mode: ThemeMode) -> Self {
        Self {
            running: true,
            current_view: View::Chart,
            show_help: false,
            show_detail_overlay: false,
            source,
            series,
            stats: SeriesStats::default(),
            value_range: ValueRange::default(),
            load_error: None,
            last_updated: None,
            selected_index: 0,
            theme: Theme::for_mode(mode),
            prefs: None,
            status_message: None,
        }
    }

    /// Persist theme changes to `store`.
    pub fn with_preferences(mut self, store: PreferenceStore) -> Self {
        self.prefs = Some(store);
        self
    }

    /// Plot values against `range` instead of 0..100.
    pub fn with_value_range(mut self, range: ValueRange) -> Self {
        self.value_range = range;
        self
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_MESSAGE_TTL => Some(msg),
            _ => None,
        }
    }

    /// Drain the source into the history buffer.
    ///
    /// Returns the number of observations received.
    pub fn reload_data(&mut self) -> usize {
        let received = self.source.poll();
        let count = received.len();

        for obs in received {
            self.series.push(obs);
        }

        if count > 0 {
            self.stats = SeriesStats::from_observations(self.series.iter());
            self.last_updated = Some(Instant::now());
            self.load_error = None;
            self.clamp_selection();
        } else if let Some(err) = self.source.error() {
            self.load_error = Some(err.to_string());
        }

        count
    }

    /// The newest observation, if any.
    pub fn latest(&self) -> Option<&Observation> {
        self.series.latest()
    }

    /// The observation under the History cursor.
    pub fn selected_observation(&self) -> Option<&Observation> {
        self.series.get(self.selected_index)
    }

    fn clamp_selection(&mut self) {
        let max = self.series.len().saturating_sub(1);
        self.selected_index = self.selected_index.min(max);
    }

    /// Switch to the next view (cycles through Chart → History → Stats).
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down (towards older observations) by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.series.len().saturating_sub(1);
        self.selected_index = (self.selected_index + n).min(max);
    }

    /// Move selection up (towards newer observations) by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_index = self.selected_index.saturating_sub(n);
    }

    /// Jump to the newest observation.
    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    /// Jump to the oldest observation.
    pub fn select_last(&mut self) {
        self.selected_index = self.series.len().saturating_sub(1);
    }

    /// Open the detail overlay for the selected observation.
    pub fn enter_detail(&mut self) {
        if self.current_view == View::History && self.selected_observation().is_some() {
            self.show_detail_overlay = true;
        }
    }

    /// Navigate back: close overlay first, then go to the Chart.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
            return;
        }
        self.current_view = View::Chart;
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Switch between light and dark, saving the choice if a store is set.
    pub fn toggle_theme(&mut self) {
        let mode = self.theme.mode.toggled();
        self.theme = Theme::for_mode(mode);
        tracing::info!(theme = %mode, "theme changed");

        let Some(store) = &self.prefs else {
            self.set_status_message(format!("Theme: {}", mode));
            return;
        };
        let saved = store.save(&Preferences { theme: Some(mode) });
        match saved {
            Ok(()) => self.set_status_message(format!("Theme: {}", mode)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to save theme preference");
                self.set_status_message(format!("Theme: {} (not saved: {})", mode, e));
            }
        }
    }

    /// Drop all history; new observations keep arriving.
    pub fn clear_history(&mut self) {
        self.series.clear();
        self.stats = SeriesStats::default();
        self.selected_index = 0;
        self.show_detail_overlay = false;
        self.set_status_message("History cleared".to_string());
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export current history to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        if self.series.is_empty() {
            anyhow::bail!("No data to export");
        }
        export_series(&self.series, path)
    }
}
