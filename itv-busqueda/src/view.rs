//! Rendering ports: everything the search page controller does to the
//! screen goes through these traits.

use std::time::Duration;

use crate::types::{Estacion, LatLon};
use crate::markers::{Bounds, MarkerState};

/// Number of columns in the results table.
pub const RESULT_COLUMNS: usize = 7;

pub const NO_RESULTS_ROW: &str = "No se encontraron estaciones con los criterios indicados";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Network failure or a non-success response.
    Error,
    /// Nothing went wrong, but there's nothing to show either.
    Info
}

/// How long each kind of banner stays up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BannerTimings {
    pub error: Duration,
    pub info: Duration
}
impl Default for BannerTimings {
    fn default() -> Self {
        Self {
            error: Duration::from_secs(6),
            info: Duration::from_secs(5)
        }
    }
}
impl BannerTimings {
    pub fn for_severity(&self, sev: Severity) -> Duration {
        match sev {
            Severity::Error => self.error,
            Severity::Info => self.info
        }
    }
}

/// A dismissible message box, hidden again after `hide_after`.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub hide_after: Duration
}

/// The Leaflet side of the page.
pub trait MapView {
    /// Handle for a plotted marker.
    type Marker;

    /// Removes every marker from the map.
    fn clear_markers(&mut self);
    /// Plots a marker for `station` at `at`.
    fn add_marker(&mut self, station: &Estacion, at: LatLon, state: MarkerState) -> Self::Marker;
    fn set_marker_state(&mut self, marker: &Self::Marker, state: MarkerState);
    /// Draws a marker above all others.
    fn bring_to_front(&mut self, marker: &Self::Marker);
    fn fit_bounds(&mut self, bounds: Bounds);
}

/// The rest of the page: results table, banners and filter inputs.
pub trait SearchView: MapView {
    /// Replaces the table body. An empty slice means a single placeholder
    /// row spanning `RESULT_COLUMNS`.
    fn render_table(&mut self, rows: &[Estacion]);
    /// Shows a banner, replacing any banner of the same severity.
    fn show_banner(&mut self, banner: Banner);
    fn hide_banners(&mut self);
    /// Empties the four filter inputs.
    fn reset_filter_inputs(&mut self);
}
