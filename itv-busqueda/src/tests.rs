use itv_util::rest::RpcError;
use itv_util::test_server::OneShot;
use std::cell::{Cell, RefCell};

use crate::ctx::*;
use crate::html::HtmlView;
use crate::markers::{MarkerState, ESTILO_RESALTADO};
use crate::tmpl::handlebars_init;
use crate::types::*;
use crate::api::{BusquedaClient, SearchMethod, StationBackend};
use crate::config::Config;
use crate::view::{BannerTimings, Severity};

fn station(id: i64, nombre: &str, localidad: &str, coords: Option<(f64, f64)>) -> Estacion {
    Estacion {
        id,
        nombre: Some(nombre.into()),
        tipo: Some("FIJA".into()),
        direccion: None,
        codigo_postal: Some("46001".into()),
        latitud: coords.map(|c| c.0),
        longitud: coords.map(|c| c.1),
        descripcion: None,
        horario: None,
        contacto: None,
        url: None,
        localidad_nombre: Some(localidad.into()),
        provincia_nombre: Some("Valencia".into())
    }
}

fn dataset() -> Vec<Estacion> {
    vec![
        station(1, "ITV Valencia", "Valencia", Some((39.47, -0.37))),
        station(2, "ITV Alzira", "Alzira", Some((39.15, -0.43))),
        station(3, "ITV Movil", "Valencia", None),
        station(4, "ITV Gandia", "Gandia", Some((38.97, -0.18)))
    ]
}

fn remote_500() -> RpcError {
    RpcError::RemoteError {
        service: "busqueda",
        code: 500,
        error: "Error interno al acceder a la base de datos".into()
    }
}

#[derive(Default)]
struct FakeBackend {
    stations: Vec<Estacion>,
    fail_all: bool,
    fail_search: bool,
    calls: Cell<usize>,
    last_filter: RefCell<Option<SearchFilter>>
}
impl FakeBackend {
    fn with(stations: Vec<Estacion>) -> Self {
        Self { stations, ..Default::default() }
    }
}
impl StationBackend for FakeBackend {
    fn all_stations(&self) -> Result<Vec<Estacion>, RpcError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail_all {
            return Err(remote_500());
        }
        Ok(self.stations.clone())
    }
    fn search_stations(&self, filter: &SearchFilter) -> Result<Vec<Estacion>, RpcError> {
        self.calls.set(self.calls.get() + 1);
        *self.last_filter.borrow_mut() = Some(filter.clone());
        if self.fail_search {
            return Err(remote_500());
        }
        let wanted = filter.query_pairs().into_iter()
            .find(|&(k, _)| k == "localidad")
            .map(|(_, v)| v.to_lowercase());
        Ok(self.stations.iter()
           .filter(|s| match wanted {
               Some(ref w) => s.localidad_nombre.as_ref().map(|l| l.to_lowercase()) == Some(w.clone()),
               None => true
           })
           .cloned()
           .collect())
    }
}

fn by_locality(l: &str) -> SearchFilter {
    SearchFilter {
        localidad: Some(l.into()),
        ..Default::default()
    }
}

fn loaded_page(backend: &FakeBackend) -> SearchPage<&FakeBackend, HtmlView> {
    let mut page = SearchPage::new(backend, HtmlView::new(), BannerTimings::default());
    assert_eq!(page.load_all(), Outcome::Applied);
    page
}

/// Marker states by id, plus ids in draw order (bottom to top).
fn visual(v: &HtmlView) -> (Vec<(i64, MarkerState)>, Vec<i64>) {
    let mut states: Vec<_> = v.markers().iter().map(|m| (m.id, m.state)).collect();
    states.sort();
    let mut order: Vec<_> = v.markers().iter().collect();
    order.sort_by_key(|m| m.z);
    (states, order.into_iter().map(|m| m.id).collect())
}

#[test]
fn blank_filter_sends_nothing() {
    let f = SearchFilter {
        localidad: Some("   ".into()),
        codigo_postal: Some("".into()),
        provincia: None,
        tipo: None
    };
    assert!(f.is_blank());
    assert!(f.query_pairs().is_empty());
    assert!(SearchFilter::default().is_blank());
}

#[test]
fn filter_trims_and_orders_pairs() {
    let f = SearchFilter {
        localidad: Some(" Valencia ".into()),
        codigo_postal: None,
        provincia: Some("Valencia".into()),
        tipo: Some("MOVIL".into())
    };
    assert_eq!(f.query_pairs(), vec![
        ("localidad", "Valencia"),
        ("provincia", "Valencia"),
        ("tipo", "MOVIL")
    ]);
    let body = serde_json::to_value(f.body()).unwrap();
    assert_eq!(body, serde_json::json!({
        "localidad": "Valencia",
        "codigoPostal": null,
        "provincia": "Valencia",
        "tipo": "MOVIL"
    }));
}

#[test]
fn station_decodes_with_nulls() {
    let data = r#"[{
        "id": 12,
        "nombre": "Estación ITV de Valencia",
        "tipo": "FIJA",
        "direccion": null,
        "codigoPostal": "46001",
        "longitud": -0.376288,
        "latitud": 39.469907,
        "localidadNombre": "Valencia",
        "provinciaNombre": "Valencia"
    }, {
        "id": 13,
        "nombre": "ITV móvil",
        "latitud": null
    }]"#;
    let st: Vec<Estacion> = serde_json::from_str(data).unwrap();
    assert_eq!(st[0].coords(), Some(LatLon { lat: 39.469907, lon: -0.376288 }));
    assert_eq!(st[0].codigo_postal.as_ref().map(|s| &s[..]), Some("46001"));
    assert_eq!(st[1].coords(), None);
    assert_eq!(st[1].tipo, None);
}

#[test]
fn load_all_plots_only_mappable_stations() {
    let backend = FakeBackend::with(dataset());
    let page = loaded_page(&backend);
    let ids: Vec<i64> = page.state().markers.ids().collect();
    assert_eq!(ids, vec![1, 2, 4]);
    assert!(!page.state().markers.contains(3));
    assert_eq!(page.view().rows().unwrap().len(), 4);
    assert_eq!(page.state().estaciones.len(), 4);

    let b = page.view().bounds().unwrap();
    assert_eq!((b.south, b.north), (38.97, 39.47));
    assert_eq!((b.west, b.east), (-0.43, -0.18));
    assert!(page.view().markers().iter().all(|m| m.state == MarkerState::Normal));
}

#[test]
fn load_all_rebuilds_registry() {
    let backend = FakeBackend::with(dataset());
    let mut page = loaded_page(&backend);
    page.search(&by_locality("valencia"));
    assert_eq!(page.load_all(), Outcome::Applied);
    assert_eq!(page.state().markers.len(), 3);
    assert_eq!(page.view().markers().len(), 3);
    assert!(page.state().highlighted.is_empty());
}

#[test]
fn load_failure_shows_error_banner() {
    let backend = FakeBackend { fail_all: true, ..FakeBackend::with(dataset()) };
    let mut page = SearchPage::new(&backend, HtmlView::new(), BannerTimings::default());
    assert_eq!(page.load_all(), Outcome::Failed);
    let b = page.view().banner(Severity::Error).unwrap();
    assert_eq!(b.title, LOAD_ERROR_TITLE);
    assert_eq!(b.message, LOAD_ERROR_MESSAGE);
    assert_eq!(b.hide_after.as_secs(), 6);
    assert!(page.view().rows().is_none());
    assert!(page.state().markers.is_empty());
    assert_eq!(backend.calls.get(), 1);
}

#[test]
fn search_highlights_matches_and_raises_them() {
    let backend = FakeBackend::with(dataset());
    let mut page = loaded_page(&backend);
    assert_eq!(page.search(&by_locality("Valencia")), Outcome::Applied);

    // station 3 matches but has no marker; it still shows in the table
    let rows = page.view().rows().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].nombre, "ITV Movil");

    let v = page.view();
    assert_eq!(v.marker(1).unwrap().state, MarkerState::Highlighted);
    assert_eq!(v.marker(1).unwrap().state.style(), ESTILO_RESALTADO);
    assert_eq!(v.marker(2).unwrap().state, MarkerState::Normal);
    assert_eq!(v.marker(4).unwrap().state, MarkerState::Normal);
    let (_, order) = visual(v);
    assert_eq!(order.last(), Some(&1));
    assert_eq!(page.state().highlighted.iter().cloned().collect::<Vec<_>>(), vec![1]);
}

#[test]
fn highlighting_twice_is_idempotent() {
    let backend = FakeBackend::with(dataset());
    let mut page = loaded_page(&backend);
    let results = vec![dataset()[0].clone(), dataset()[3].clone()];
    page.highlight(&results);
    let first = visual(page.view());
    page.highlight(&results);
    assert_eq!(visual(page.view()), first);
}

#[test]
fn empty_search_is_info_not_error() {
    let backend = FakeBackend::with(dataset());
    let mut page = loaded_page(&backend);
    assert_eq!(page.search(&by_locality("Teruel")), Outcome::Applied);
    assert!(page.view().banner(Severity::Error).is_none());
    let info = page.view().banner(Severity::Info).unwrap();
    assert_eq!(info.title, NO_RESULTS_TITLE);
    assert_eq!(info.hide_after.as_secs(), 5);
    assert!(page.view().markers().iter().all(|m| m.state == MarkerState::Normal));

    let hbs = handlebars_init().unwrap();
    let tbody = page.view().render_tbody(&hbs).unwrap();
    assert_eq!(tbody.matches("<tr>").count(), 1);
    assert!(tbody.contains("colspan=\"7\""));
    assert!(tbody.contains("No se encontraron estaciones con los criterios indicados"));
}

#[test]
fn failed_search_leaves_view_alone() {
    let backend = FakeBackend::with(dataset());
    let mut page = loaded_page(&backend);
    page.search(&by_locality("Alzira"));
    let before = page.view().clone();

    let failing = FakeBackend { fail_search: true, ..FakeBackend::with(dataset()) };
    let mut page = SearchPage::new(&failing, before.clone(), BannerTimings::default());
    assert_eq!(page.search(&by_locality("Valencia")), Outcome::Failed);
    let b = page.view().banner(Severity::Error).unwrap();
    assert_eq!(b.title, SEARCH_ERROR_TITLE);
    assert_eq!(b.message, SEARCH_ERROR_MESSAGE);
    assert_eq!(page.view().rows(), before.rows());
    assert_eq!(page.view().markers(), before.markers());
}

#[test]
fn search_hides_previous_banners() {
    let backend = FakeBackend::with(dataset());
    let mut page = loaded_page(&backend);
    page.search(&by_locality("Teruel"));
    assert!(page.view().banner(Severity::Info).is_some());
    page.search(&by_locality("Gandia"));
    assert!(page.view().banner(Severity::Info).is_none());
}

#[test]
fn clear_restores_everything() {
    let backend = FakeBackend::with(dataset());
    let mut page = loaded_page(&backend);
    page.view_mut().inputs = by_locality("Valencia");
    page.search(&by_locality("Valencia"));
    page.clear();
    assert_eq!(page.view().inputs, SearchFilter::default());
    assert_eq!(page.view().rows().unwrap().len(), 4);
    assert!(page.view().markers().iter().all(|m| m.state == MarkerState::Normal));
    assert!(page.state().highlighted.is_empty());
    assert!(page.view().banner(Severity::Info).is_none());
}

#[test]
fn stale_search_is_dropped() {
    let backend = FakeBackend::with(dataset());
    let mut page = loaded_page(&backend);
    let older = page.begin_search();
    let newer = page.begin_search();
    let res = backend.search_stations(&by_locality("Gandia"));
    assert_eq!(page.apply_search(newer, res), Outcome::Applied);
    let after_newer = page.view().clone();

    let res = backend.search_stations(&by_locality("Valencia"));
    assert_eq!(page.apply_search(older, res), Outcome::Stale);
    assert_eq!(page.view(), &after_newer);
}

#[test]
fn clear_drops_search_in_flight() {
    let backend = FakeBackend::with(dataset());
    let mut page = loaded_page(&backend);
    let t = page.begin_search();
    page.clear();
    let res = backend.search_stations(&by_locality("Valencia"));
    assert_eq!(page.apply_search(t, res), Outcome::Stale);
    assert!(page.state().highlighted.is_empty());
}

#[test]
fn rendered_page_inlines_markers_safely() {
    let backend = FakeBackend::with(dataset());
    let mut page = loaded_page(&backend);
    page.search(&by_locality("Valencia"));
    let hbs = handlebars_init().unwrap();
    let json = page.view().markers_json(&hbs).unwrap();
    assert!(!json.contains('<'));
    let decoded: serde_json::Value = serde_json::from_str(&json).unwrap();
    let arr = decoded.as_array().unwrap();
    assert_eq!(arr.len(), 3);
    // highlighted marker is drawn last
    assert_eq!(arr[2]["style"]["fillColor"], "#f1c353");
    assert!(arr[2]["tooltip"].as_str().unwrap().contains("<strong>Dirección:</strong> N/A"));

    let html = page.view().render_page(&hbs).unwrap();
    assert!(html.contains("id=\"results-tbody\""));
    assert!(html.contains("map.fitBounds"));
    assert!(html.contains("id=\"error-box\" class=\"error-box hidden\""));
}

#[test]
fn duplicate_ids_plot_once() {
    let mut stations = dataset();
    stations.push(station(1, "ITV Valencia Sur", "Valencia", Some((39.0, -1.0))));
    let backend = FakeBackend::with(stations);
    let mut page = loaded_page(&backend);
    assert_eq!(page.state().markers.len(), 3);
    assert_eq!(page.view().markers().len(), 3);
    assert_eq!(page.view().rows().unwrap().len(), 5);
    assert_eq!(page.view().bounds().unwrap().west, -0.43);

    page.search(&by_locality("Valencia"));
    let ones: Vec<_> = page.view().markers().iter().filter(|m| m.id == 1).collect();
    assert_eq!(ones.len(), 1);
    assert_eq!(ones[0].state, MarkerState::Highlighted);
    assert_eq!(ones[0].at, LatLon { lat: 39.47, lon: -0.37 });
}

fn client_config(url: &str, search_method: SearchMethod) -> Config {
    Config {
        api_url: format!("{}/api/busqueda", url),
        search_method,
        ..Config::default()
    }
}

static ONE_STATION: &str = r#"[{"id": 7, "nombre": "ITV Alzira", "localidadNombre": "Alzira"}]"#;

#[test]
fn blank_filter_is_a_plain_get_either_way() {
    for &m in &[SearchMethod::Get, SearchMethod::Post] {
        let srv = OneShot::serve(200, "application/json", "[]");
        let cli = BusquedaClient::new(&client_config(&srv.url, m));
        let blank = SearchFilter {
            localidad: Some("  ".into()),
            ..Default::default()
        };
        assert!(cli.search_stations(&blank).unwrap().is_empty());
        let req = srv.request();
        assert_eq!(req.method, "GET");
        assert_eq!(req.path(), "/api/busqueda/estaciones");
        assert_eq!(req.query(), None);
        assert_eq!(req.body, "");
    }
}

#[test]
fn get_search_sends_trimmed_query() {
    let srv = OneShot::serve(200, "application/json", ONE_STATION);
    let cli = BusquedaClient::new(&client_config(&srv.url, SearchMethod::Get));
    let f = SearchFilter {
        localidad: Some(" Alzira ".into()),
        tipo: Some("FIJA".into()),
        ..Default::default()
    };
    let res = cli.search_stations(&f).unwrap();
    assert_eq!(res.len(), 1);
    assert_eq!(res[0].id, 7);
    let req = srv.request();
    assert_eq!(req.method, "GET");
    assert_eq!(req.path(), "/api/busqueda/estaciones");
    assert_eq!(req.query(), Some("localidad=Alzira&tipo=FIJA"));
    assert_eq!(req.header("accept"), Some("application/json"));
}

#[test]
fn post_search_sends_body_with_nulls() {
    let srv = OneShot::serve(200, "application/json", ONE_STATION);
    let cli = BusquedaClient::new(&client_config(&srv.url, SearchMethod::Post));
    let f = SearchFilter {
        provincia: Some("Valencia".into()),
        tipo: Some("MOVIL ".into()),
        ..Default::default()
    };
    assert_eq!(cli.search_stations(&f).unwrap().len(), 1);
    let req = srv.request();
    assert_eq!(req.method, "POST");
    assert_eq!(req.path(), "/api/busqueda/estaciones");
    assert_eq!(req.query(), None);
    let body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(body, serde_json::json!({
        "localidad": null,
        "codigoPostal": null,
        "provincia": "Valencia",
        "tipo": "MOVIL"
    }));
}

#[test]
fn server_error_shows_search_banner() {
    let srv = OneShot::serve(500, "text/plain", "Error interno");
    let cli = BusquedaClient::new(&client_config(&srv.url, SearchMethod::Get));
    let mut page = SearchPage::new(cli, HtmlView::new(), BannerTimings::default());
    assert_eq!(page.search(&by_locality("Valencia")), Outcome::Failed);
    srv.request();
    let b = page.view().banner(Severity::Error).unwrap();
    assert_eq!(b.message, SEARCH_ERROR_MESSAGE);
    assert!(page.view().rows().is_none());
}
