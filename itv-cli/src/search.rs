//! `estaciones` and `buscar`.

use clap::ArgMatches;
use failure::{Error, bail};
use itv_busqueda::api::BusquedaClient;
use itv_busqueda::config::Config;
use itv_busqueda::ctx::{Outcome, SearchPage};
use itv_busqueda::html::HtmlView;
use itv_busqueda::tmpl::handlebars_init;
use itv_busqueda::types::SearchFilter;
use itv_busqueda::view::Severity;
use itv_util::ConfigExt;

pub fn filter_from_args(opts: &ArgMatches) -> SearchFilter {
    let val = |name: &str| opts.value_of(name).map(|s| s.to_owned());
    SearchFilter {
        localidad: val("localidad"),
        codigo_postal: val("codigo-postal"),
        provincia: val("provincia"),
        tipo: val("tipo")
    }
}

fn print_view(view: &HtmlView) {
    for sev in &[Severity::Error, Severity::Info] {
        if let Some(b) = view.banner(*sev) {
            let tag = match sev {
                Severity::Error => "[!]",
                Severity::Info => "[i]"
            };
            println!("{} {}: {}", tag, b.title, b.message);
        }
    }
    let rows = match view.rows() {
        Some(r) => r,
        None => return
    };
    if rows.is_empty() {
        println!("    (no se encontraron estaciones)");
    }
    for r in rows {
        println!("    {} | {} | {} | {} | {}", r.nombre, r.tipo, r.localidad, r.codigo_postal, r.provincia);
    }
}

/// Loads every station and, with a filter, runs a search on top.
///
/// Returns the rendered page.
pub fn run(filter: Option<SearchFilter>) -> Result<String, Error> {
    let cfg = Config::load()?;
    let hbs = handlebars_init()?;
    let mut page = SearchPage::new(BusquedaClient::new(&cfg), HtmlView::new(), cfg.banner_timings());
    println!("[+] Loading stations from {}", cfg.api_url);
    let mut outcome = page.load_all();
    if let Some(f) = filter {
        if outcome == Outcome::Failed {
            print_view(page.view());
        }
        page.view_mut().inputs = f.clone();
        println!("[+] Searching");
        outcome = page.search(&f);
    }
    let st = page.state();
    println!("[+] {} stations loaded, {} plotted, {} highlighted",
             st.estaciones.len(), st.markers.len(), st.highlighted.len());
    print_view(page.view());
    let html = page.view().render_page(&hbs)?;
    if outcome == Outcome::Failed {
        bail!("request to the search backend failed");
    }
    Ok(html)
}
