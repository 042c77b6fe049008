//! Drives the ITV station search and data loading pages from a terminal.

pub mod search;
pub mod load;

use clap::{Arg, App, SubCommand, AppSettings};
use failure::Error;
use std::fs;

fn main() -> Result<(), Error> {
    let matches = App::new("itv-cli")
        .version(env!("CARGO_PKG_VERSION"))
        .author("eta <hi@theta.eu.org>")
        .about("Searches ITV stations and triggers data loads.")
        .setting(AppSettings::SubcommandRequired)
        .arg(Arg::with_name("verbose")
             .short("v")
             .long("verbose")
             .help("Log every request."))
        .arg(Arg::with_name("html")
             .long("html")
             .value_name("FILE")
             .help("Also write the rendered page to FILE.")
             .takes_value(true))
        .subcommand(SubCommand::with_name("estaciones")
                    .about("Loads and lists every station."))
        .subcommand(SubCommand::with_name("buscar")
                    .about("Loads every station, then highlights those matching a filter.")
                    .arg(Arg::with_name("localidad")
                         .long("localidad")
                         .value_name("LOCALIDAD")
                         .takes_value(true))
                    .arg(Arg::with_name("codigo-postal")
                         .long("codigo-postal")
                         .value_name("CP")
                         .takes_value(true))
                    .arg(Arg::with_name("provincia")
                         .long("provincia")
                         .value_name("PROVINCIA")
                         .takes_value(true))
                    .arg(Arg::with_name("tipo")
                         .long("tipo")
                         .value_name("TIPO")
                         .possible_values(&["FIJA", "MOVIL", "OTROS"])
                         .takes_value(true)))
        .subcommand(SubCommand::with_name("cargar")
                    .about("Triggers an ingestion run.")
                    .arg(Arg::with_name("fuente")
                         .short("f")
                         .long("fuente")
                         .value_name("FUENTE")
                         .help("Source to load from; repeat for several.")
                         .takes_value(true)
                         .multiple(true)
                         .number_of_values(1))
                    .arg(Arg::with_name("todas")
                         .long("todas")
                         .help("Load from every configured source.")))
        .subcommand(SubCommand::with_name("borrar")
                    .about("Deletes everything in the backend store.")
                    .arg(Arg::with_name("yes")
                         .short("y")
                         .long("yes")
                         .help("Don't ask for confirmation.")))
        .get_matches();
    let level = if matches.is_present("verbose") {
        log::LevelFilter::Debug
    }
    else {
        log::LevelFilter::Info
    };
    itv_util::setup_logging(level)?;
    let html = match matches.subcommand() {
        ("estaciones", _) => search::run(None)?,
        ("buscar", Some(opts)) => search::run(Some(search::filter_from_args(opts)))?,
        ("cargar", Some(opts)) => load::cargar(opts)?,
        ("borrar", Some(opts)) => load::borrar(opts)?,
        _ => unreachable!()
    };
    if let Some(path) = matches.value_of("html") {
        fs::write(path, html)?;
        println!("[+] Wrote page to {}", path);
    }
    Ok(())
}
