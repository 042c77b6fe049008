//! Search page controller.
//!
//! Owns the full station list and the marker registry, and turns backend
//! responses into calls on a `SearchView`.

use itv_util::rest::RpcError;
use std::collections::BTreeSet;
use log::*;

use crate::api::StationBackend;
use crate::markers::{Bounds, MarkerRegistry, MarkerState};
use crate::types::{Estacion, SearchFilter};
use crate::view::{Banner, BannerTimings, SearchView, Severity};

pub const LOAD_ERROR_TITLE: &str = "Error inicial";
pub const LOAD_ERROR_MESSAGE: &str = "No se pudieron cargar las estaciones ITV.";
pub const SEARCH_ERROR_TITLE: &str = "Error en la búsqueda";
pub const SEARCH_ERROR_MESSAGE: &str = "No fue posible obtener los datos solicitados.";
pub const NO_RESULTS_TITLE: &str = "Sin resultados";
pub const NO_RESULTS_MESSAGE: &str = "No se han encontrado estaciones con los criterios indicados.";

/// Identifies one issued request. Only the latest ticket of each kind gets
/// its response applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    kind: TicketKind,
    seq: u64
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TicketKind {
    LoadAll,
    Search
}

/// What happened to a response handed to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The view now reflects the response.
    Applied,
    /// The request failed; an error banner is up and nothing else changed.
    Failed,
    /// A newer request of the same kind was issued; the response was dropped.
    Stale
}

/// Page-global state, kept out of the view so it can be inspected.
#[derive(Debug)]
pub struct ViewState<M> {
    /// Result of the last successful full load.
    pub estaciones: Vec<Estacion>,
    pub markers: MarkerRegistry<M>,
    /// Ids currently drawn highlighted.
    pub highlighted: BTreeSet<i64>
}
impl<M> Default for ViewState<M> {
    fn default() -> Self {
        Self {
            estaciones: vec![],
            markers: MarkerRegistry::new(),
            highlighted: BTreeSet::new()
        }
    }
}

pub struct SearchPage<B, V> where V: SearchView {
    backend: B,
    view: V,
    state: ViewState<V::Marker>,
    timings: BannerTimings,
    load_seq: u64,
    search_seq: u64
}

impl<B, V> SearchPage<B, V> where B: StationBackend, V: SearchView {
    pub fn new(backend: B, view: V, timings: BannerTimings) -> Self {
        Self {
            backend, view, timings,
            state: ViewState::default(),
            load_seq: 0,
            search_seq: 0
        }
    }
    pub fn view(&self) -> &V {
        &self.view
    }
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
    pub fn state(&self) -> &ViewState<V::Marker> {
        &self.state
    }
    pub fn into_view(self) -> V {
        self.view
    }

    fn banner(&mut self, severity: Severity, title: &str, message: &str) {
        let hide_after = self.timings.for_severity(severity);
        self.view.show_banner(Banner {
            severity,
            title: title.into(),
            message: message.into(),
            hide_after
        });
    }
    fn is_current(&self, t: Ticket) -> bool {
        match t.kind {
            TicketKind::LoadAll => t.seq == self.load_seq,
            TicketKind::Search => t.seq == self.search_seq
        }
    }

    /// Issues a ticket for a full load.
    pub fn begin_load_all(&mut self) -> Ticket {
        self.load_seq += 1;
        Ticket { kind: TicketKind::LoadAll, seq: self.load_seq }
    }
    /// Applies the response to a full load: replaces the dataset, replots
    /// every marker, fits the viewport, and renders the whole table.
    pub fn apply_load_all(&mut self, t: Ticket, res: Result<Vec<Estacion>, RpcError>) -> Outcome {
        if !self.is_current(t) {
            debug!("dropping stale full load #{}", t.seq);
            return Outcome::Stale;
        }
        let estaciones = match res {
            Ok(e) => e,
            Err(e) => {
                warn!("Loading all stations failed: {}", e);
                self.banner(Severity::Error, LOAD_ERROR_TITLE, LOAD_ERROR_MESSAGE);
                return Outcome::Failed;
            }
        };
        info!("loaded {} stations", estaciones.len());
        self.plot_all(&estaciones);
        self.view.render_table(&estaciones);
        self.state.estaciones = estaciones;
        Outcome::Applied
    }
    /// Fetches and shows every station.
    pub fn load_all(&mut self) -> Outcome {
        let t = self.begin_load_all();
        let res = self.backend.all_stations();
        self.apply_load_all(t, res)
    }

    fn plot_all(&mut self, estaciones: &[Estacion]) {
        self.view.clear_markers();
        self.state.markers.clear();
        self.state.highlighted.clear();
        let mut plotted = vec![];
        for st in estaciones {
            let at = match st.coords() {
                Some(c) => c,
                None => {
                    debug!("station {} has no coordinates; not plotting", st.id);
                    continue;
                }
            };
            // first marker for an id wins
            if self.state.markers.contains(st.id) {
                warn!("duplicate station id {} in full load; not plotting it again", st.id);
                continue;
            }
            let marker = self.view.add_marker(st, at, MarkerState::Normal);
            self.state.markers.insert(st.id, marker);
            plotted.push(at);
        }
        if let Some(b) = Bounds::from_points(plotted) {
            self.view.fit_bounds(b);
        }
    }

    /// Issues a ticket for a filtered search, hiding any banners.
    pub fn begin_search(&mut self) -> Ticket {
        self.view.hide_banners();
        self.search_seq += 1;
        Ticket { kind: TicketKind::Search, seq: self.search_seq }
    }
    /// Applies a search response: the table shows exactly the results, and
    /// their markers are highlighted.
    pub fn apply_search(&mut self, t: Ticket, res: Result<Vec<Estacion>, RpcError>) -> Outcome {
        if !self.is_current(t) {
            debug!("dropping stale search #{}", t.seq);
            return Outcome::Stale;
        }
        let results = match res {
            Ok(r) => r,
            Err(e) => {
                warn!("Station search failed: {}", e);
                self.banner(Severity::Error, SEARCH_ERROR_TITLE, SEARCH_ERROR_MESSAGE);
                return Outcome::Failed;
            }
        };
        info!("search matched {} stations", results.len());
        self.view.render_table(&results);
        self.highlight(&results);
        if results.is_empty() {
            self.banner(Severity::Info, NO_RESULTS_TITLE, NO_RESULTS_MESSAGE);
        }
        Outcome::Applied
    }
    pub fn search(&mut self, filter: &SearchFilter) -> Outcome {
        let t = self.begin_search();
        let res = self.backend.search_stations(filter);
        self.apply_search(t, res)
    }

    /// Draws the markers of `results` highlighted and on top, and every
    /// other marker normally. Results without a marker are skipped.
    pub fn highlight(&mut self, results: &[Estacion]) {
        let view = &mut self.view;
        for (_, m) in self.state.markers.iter() {
            view.set_marker_state(m, MarkerState::Normal);
        }
        self.state.highlighted.clear();
        for st in results {
            if let Some(m) = self.state.markers.get(st.id) {
                view.set_marker_state(m, MarkerState::Highlighted);
                view.bring_to_front(m);
                self.state.highlighted.insert(st.id);
            }
        }
    }

    /// Empties the filter, shows every station again, and unhighlights
    /// every marker. Searches still in flight are dropped when they land.
    pub fn clear(&mut self) {
        self.search_seq += 1;
        self.view.reset_filter_inputs();
        self.view.render_table(&self.state.estaciones);
        self.highlight(&[]);
    }
}
