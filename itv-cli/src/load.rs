//! `cargar` and `borrar`.

use clap::ArgMatches;
use failure::{Error, bail};
use itv_carga::api::CargaClient;
use itv_carga::config::Config;
use itv_carga::ctx::{CargaPage, Outcome};
use itv_carga::html::{HtmlView, Panel};
use itv_carga::tmpl::handlebars_init;
use itv_util::ConfigExt;
use std::io::{self, BufRead, Write};

fn ask(question: &str) -> bool {
    print!("{} [s/N] ", question);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    match line.trim().to_lowercase().as_str() {
        "s" | "si" | "sí" | "y" | "yes" => true,
        _ => false
    }
}

fn print_view(view: &HtmlView) {
    for a in view.alerts() {
        println!("[!] {}", a);
    }
    match *view.panel() {
        Panel::Placeholder => {},
        Panel::Success(ref m) => println!("[+] {}", m),
        Panel::Error(ref m) => println!("[!] {}", m),
        Panel::Summary(ref r) => {
            println!("[+] Correctos: {}  Reparados: {}  Rechazados: {}",
                     r.registros_correctos, r.registros_con_errores_reparados, r.registros_rechazados);
            for e in r.errores_reparados.iter() {
                println!("    reparado  | {} | {} | {} | {} | {}",
                         e.fuente.as_ref().map(|s| &s[..]).unwrap_or(""),
                         e.nombre.as_ref().map(|s| &s[..]).unwrap_or(""),
                         e.localidad.as_ref().map(|s| &s[..]).unwrap_or(""),
                         e.motivo.as_ref().map(|s| &s[..]).unwrap_or(""),
                         e.operacion.as_ref().map(|s| &s[..]).unwrap_or(""));
            }
            for e in r.errores_rechazados.iter() {
                println!("    rechazado | {} | {} | {} | {}",
                         e.fuente.as_ref().map(|s| &s[..]).unwrap_or(""),
                         e.nombre.as_ref().map(|s| &s[..]).unwrap_or(""),
                         e.localidad.as_ref().map(|s| &s[..]).unwrap_or(""),
                         e.motivo.as_ref().map(|s| &s[..]).unwrap_or(""));
            }
        }
    }
}

fn finish(page: CargaPage<CargaClient, HtmlView>, outcome: Outcome) -> Result<String, Error> {
    let hbs = handlebars_init()?;
    print_view(page.view());
    let html = page.view().render_page(&hbs)?;
    match outcome {
        Outcome::Failed => bail!("request to the ingestion backend failed"),
        Outcome::Rejected => bail!("no sources selected"),
        _ => Ok(html)
    }
}

pub fn cargar(opts: &ArgMatches) -> Result<String, Error> {
    let cfg = Config::load()?;
    let mut page = CargaPage::new(CargaClient::new(&cfg), HtmlView::new(), cfg.sources.clone());
    if opts.is_present("todas") {
        page.toggle_all(true);
    }
    if let Some(vals) = opts.values_of("fuente") {
        for v in vals {
            page.toggle_source(v, true);
        }
    }
    println!("[+] Loading from {}", cfg.api_url);
    let outcome = page.load();
    finish(page, outcome)
}

pub fn borrar(opts: &ArgMatches) -> Result<String, Error> {
    let cfg = Config::load()?;
    let view = if opts.is_present("yes") {
        HtmlView::with_confirmer(|_| true)
    }
    else {
        HtmlView::with_confirmer(ask)
    };
    let mut page = CargaPage::new(CargaClient::new(&cfg), view, cfg.sources.clone());
    let outcome = page.clear_store();
    if outcome == Outcome::Cancelled {
        println!("[+] Nothing deleted");
    }
    finish(page, outcome)
}
