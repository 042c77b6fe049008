//! A `SearchView` that keeps the page in memory and renders it to HTML.

use handlebars::Handlebars;
use serde_derive::Serialize;

use crate::errors::*;
use crate::markers::{self, Bounds, MarkerState, MarkerStyle, MarkerTooltip};
use crate::tmpl::TemplateContext;
use crate::types::{Estacion, LatLon, SearchFilter};
use crate::view::{self, Banner, MapView, SearchView, Severity};

/// One row of the results table. Blank fields render as empty cells.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StationRow {
    pub nombre: String,
    pub tipo: String,
    pub direccion: String,
    pub localidad: String,
    pub codigo_postal: String,
    pub provincia: String,
    pub descripcion: String
}
impl StationRow {
    pub fn for_station(st: &Estacion) -> Self {
        let s = |f: &Option<String>| f.clone().unwrap_or_default();
        Self {
            nombre: s(&st.nombre),
            tipo: s(&st.tipo),
            direccion: s(&st.direccion),
            localidad: s(&st.localidad_nombre),
            codigo_postal: s(&st.codigo_postal),
            provincia: s(&st.provincia_nombre),
            descripcion: s(&st.descripcion)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlottedMarker {
    pub id: i64,
    pub at: LatLon,
    pub state: MarkerState,
    /// Draw order; higher is on top.
    pub z: u64,
    pub tooltip: MarkerTooltip
}

#[derive(Serialize)]
struct ResultsView<'a> {
    empty: bool,
    columns: usize,
    placeholder: &'static str,
    rows: &'a [StationRow]
}
#[derive(Serialize)]
struct BannerView<'a> {
    prefix: &'static str,
    visible: bool,
    title: &'a str,
    message: &'a str,
    hide_after_ms: u64
}
#[derive(Serialize)]
struct MarkerJs<'a> {
    lat: f64,
    lon: f64,
    style: MarkerStyle,
    tooltip: &'a str
}
#[derive(Serialize)]
struct PageView {
    error_box: String,
    info_box: String,
    tbody: String,
    center: LatLon,
    zoom: u8,
    markers_json: String,
    has_bounds: bool,
    bounds: Bounds,
    padding: u32
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct HtmlView {
    /// `None` until the table has been rendered once.
    rows: Option<Vec<StationRow>>,
    markers: Vec<PlottedMarker>,
    next_z: u64,
    bounds: Option<Bounds>,
    error_box: Option<Banner>,
    info_box: Option<Banner>,
    /// What the filter inputs currently hold.
    pub inputs: SearchFilter
}

impl HtmlView {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn rows(&self) -> Option<&[StationRow]> {
        self.rows.as_ref().map(|r| &r[..])
    }
    pub fn markers(&self) -> &[PlottedMarker] {
        &self.markers
    }
    pub fn marker(&self, id: i64) -> Option<&PlottedMarker> {
        self.markers.iter().find(|m| m.id == id)
    }
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }
    pub fn banner(&self, sev: Severity) -> Option<&Banner> {
        match sev {
            Severity::Error => self.error_box.as_ref(),
            Severity::Info => self.info_box.as_ref()
        }
    }

    /// Contents of `#results-tbody`.
    pub fn render_tbody(&self, hbs: &Handlebars) -> BusquedaResult<String> {
        let rows = self.rows().unwrap_or(&[]);
        TemplateContext::fragment("results", ResultsView {
            empty: rows.is_empty(),
            columns: view::RESULT_COLUMNS,
            placeholder: view::NO_RESULTS_ROW,
            rows
        }).render(hbs)
    }
    pub fn render_tooltip(&self, hbs: &Handlebars, tooltip: &MarkerTooltip) -> BusquedaResult<String> {
        TemplateContext::fragment("tooltip", tooltip).render(hbs)
    }
    fn render_banner(&self, hbs: &Handlebars, sev: Severity) -> BusquedaResult<String> {
        let prefix = match sev {
            Severity::Error => "error",
            Severity::Info => "info"
        };
        let body = match self.banner(sev) {
            Some(b) => BannerView {
                prefix,
                visible: true,
                title: &b.title,
                message: &b.message,
                hide_after_ms: b.hide_after.as_secs() * 1000 + u64::from(b.hide_after.subsec_millis())
            },
            None => BannerView {
                prefix,
                visible: false,
                title: "",
                message: "",
                hide_after_ms: 0
            }
        };
        TemplateContext::fragment("banner", body).render(hbs)
    }
    /// Marker data for Leaflet, in draw order, safe to inline in a `<script>`.
    pub fn markers_json(&self, hbs: &Handlebars) -> BusquedaResult<String> {
        let mut ordered: Vec<&PlottedMarker> = self.markers.iter().collect();
        ordered.sort_by_key(|m| m.z);
        let tooltips = ordered.iter()
            .map(|m| self.render_tooltip(hbs, &m.tooltip))
            .collect::<BusquedaResult<Vec<String>>>()?;
        let js = ordered.iter()
            .zip(tooltips.iter())
            .map(|(m, t)| MarkerJs {
                lat: m.at.lat,
                lon: m.at.lon,
                style: m.state.style(),
                tooltip: t
            })
            .collect::<Vec<_>>();
        let ret = serde_json::to_string(&js)?;
        Ok(ret.replace('<', "\\u003c"))
    }
    /// The whole page: banners, map and results table.
    pub fn render_page(&self, hbs: &Handlebars) -> BusquedaResult<String> {
        TemplateContext {
            template: "page",
            title: "Búsqueda de estaciones ITV".into(),
            body: PageView {
                error_box: self.render_banner(hbs, Severity::Error)?,
                info_box: self.render_banner(hbs, Severity::Info)?,
                tbody: self.render_tbody(hbs)?,
                center: markers::MAP_CENTER,
                zoom: markers::MAP_ZOOM,
                markers_json: self.markers_json(hbs)?,
                has_bounds: self.bounds.is_some(),
                bounds: self.bounds.unwrap_or(Bounds::around(markers::MAP_CENTER)),
                padding: markers::FIT_PADDING_PX
            }
        }.render(hbs)
    }
}

impl MapView for HtmlView {
    /// Index into `markers()`.
    type Marker = usize;

    fn clear_markers(&mut self) {
        self.markers.clear();
        self.bounds = None;
    }
    fn add_marker(&mut self, station: &Estacion, at: LatLon, state: MarkerState) -> usize {
        self.next_z += 1;
        self.markers.push(PlottedMarker {
            id: station.id,
            at, state,
            z: self.next_z,
            tooltip: MarkerTooltip::for_station(station)
        });
        self.markers.len() - 1
    }
    fn set_marker_state(&mut self, marker: &usize, state: MarkerState) {
        if let Some(m) = self.markers.get_mut(*marker) {
            m.state = state;
        }
    }
    fn bring_to_front(&mut self, marker: &usize) {
        self.next_z += 1;
        let z = self.next_z;
        if let Some(m) = self.markers.get_mut(*marker) {
            m.z = z;
        }
    }
    fn fit_bounds(&mut self, bounds: Bounds) {
        self.bounds = Some(bounds);
    }
}

impl SearchView for HtmlView {
    fn render_table(&mut self, rows: &[Estacion]) {
        self.rows = Some(rows.iter().map(StationRow::for_station).collect());
    }
    fn show_banner(&mut self, banner: Banner) {
        match banner.severity {
            Severity::Error => self.error_box = Some(banner),
            Severity::Info => self.info_box = Some(banner)
        }
    }
    fn hide_banners(&mut self) {
        self.error_box = None;
        self.info_box = None;
    }
    fn reset_filter_inputs(&mut self) {
        self.inputs = SearchFilter::default();
    }
}
