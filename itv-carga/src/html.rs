//! A `CargaView` that keeps the page in memory and renders it to HTML.

use handlebars::Handlebars;
use serde_derive::Serialize;

use crate::errors::*;
use crate::sources::SourceSelection;
use crate::tmpl::TemplateContext;
use crate::types::ResultadoCarga;
use crate::view::{self, CargaView};

/// What the results container currently holds.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Placeholder,
    Summary(ResultadoCarga),
    Success(String),
    Error(String)
}

#[derive(Serialize)]
struct MessageView<'a> {
    placeholder: bool,
    class: &'static str,
    text: &'a str
}
#[derive(Serialize)]
struct ErrorRow {
    fuente: String,
    nombre: String,
    localidad: String,
    motivo: String,
    operacion: String
}
#[derive(Serialize)]
struct SummaryView {
    correctos: u64,
    reparados: u64,
    rechazados: u64,
    has_errores_reparados: bool,
    errores_reparados: Vec<ErrorRow>,
    has_errores_rechazados: bool,
    errores_rechazados: Vec<ErrorRow>
}
impl SummaryView {
    fn new(r: &ResultadoCarga) -> Self {
        let s = |f: &Option<String>| f.clone().unwrap_or_default();
        let errores_reparados: Vec<ErrorRow> = r.errores_reparados.iter()
            .map(|e| ErrorRow {
                fuente: s(&e.fuente),
                nombre: s(&e.nombre),
                localidad: s(&e.localidad),
                motivo: s(&e.motivo),
                operacion: s(&e.operacion)
            })
            .collect();
        let errores_rechazados: Vec<ErrorRow> = r.errores_rechazados.iter()
            .map(|e| ErrorRow {
                fuente: s(&e.fuente),
                nombre: s(&e.nombre),
                localidad: s(&e.localidad),
                motivo: s(&e.motivo),
                operacion: String::new()
            })
            .collect();
        Self {
            correctos: r.registros_correctos,
            reparados: r.registros_con_errores_reparados,
            rechazados: r.registros_rechazados,
            has_errores_reparados: !errores_reparados.is_empty(),
            errores_reparados,
            has_errores_rechazados: !errores_rechazados.is_empty(),
            errores_rechazados
        }
    }
}
#[derive(Serialize)]
struct CheckboxView<'a> {
    id: &'a str,
    checked: bool
}
#[derive(Serialize)]
struct PageView<'a> {
    all: bool,
    sources: Vec<CheckboxView<'a>>,
    loading: bool,
    results: String
}

pub struct HtmlView {
    checkboxes: Option<SourceSelection>,
    loading: bool,
    panel: Panel,
    alerts: Vec<String>,
    questions: Vec<String>,
    confirmer: Option<Box<dyn FnMut(&str) -> bool>>
}

impl Default for HtmlView {
    fn default() -> Self {
        Self {
            checkboxes: None,
            loading: false,
            panel: Panel::Placeholder,
            alerts: vec![],
            questions: vec![],
            confirmer: None
        }
    }
}

impl HtmlView {
    /// A view that declines every confirmation.
    pub fn new() -> Self {
        Self::default()
    }
    /// A view that asks `f` whenever the controller wants confirmation.
    pub fn with_confirmer<F>(f: F) -> Self where F: FnMut(&str) -> bool + 'static {
        Self {
            confirmer: Some(Box::new(f)),
            ..Self::default()
        }
    }
    pub fn is_loading(&self) -> bool {
        self.loading
    }
    pub fn panel(&self) -> &Panel {
        &self.panel
    }
    pub fn checkboxes(&self) -> Option<&SourceSelection> {
        self.checkboxes.as_ref()
    }
    /// Every alert shown so far, oldest first.
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }
    /// Every confirmation asked so far, oldest first.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    fn render_message(&self, hbs: &Handlebars, placeholder: bool, class: &'static str, text: &str) -> CargaResult<String> {
        TemplateContext::fragment("message", MessageView {
            placeholder, class, text
        }).render(hbs)
    }
    /// Contents of `#results-container`.
    pub fn render_results(&self, hbs: &Handlebars) -> CargaResult<String> {
        match self.panel {
            Panel::Placeholder => self.render_message(hbs, true, "info-text", view::PLACEHOLDER),
            Panel::Success(ref m) => self.render_message(hbs, false, "success-message", m),
            Panel::Error(ref m) => self.render_message(hbs, false, "error-message", m),
            Panel::Summary(ref r) => TemplateContext::fragment("summary", SummaryView::new(r)).render(hbs)
        }
    }
    pub fn render_page(&self, hbs: &Handlebars) -> CargaResult<String> {
        let (all, sources): (bool, Vec<CheckboxView>) = match self.checkboxes {
            Some(ref sel) => (sel.all_checked(), sel.sources()
                              .map(|(id, checked)| CheckboxView { id, checked })
                              .collect()),
            None => (false, vec![])
        };
        TemplateContext {
            template: "page",
            title: "Carga de estaciones ITV".into(),
            body: PageView {
                all, sources,
                loading: self.loading,
                results: self.render_results(hbs)?
            }
        }.render(hbs)
    }
}

impl CargaView for HtmlView {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
    fn sync_checkboxes(&mut self, sel: &SourceSelection) {
        self.checkboxes = Some(sel.clone());
    }
    fn show_summary(&mut self, res: &ResultadoCarga) {
        self.panel = Panel::Summary(res.clone());
    }
    fn show_success(&mut self, msg: &str) {
        self.panel = Panel::Success(msg.into());
    }
    fn show_error(&mut self, msg: &str) {
        self.panel = Panel::Error(msg.into());
    }
    fn show_placeholder(&mut self) {
        self.panel = Panel::Placeholder;
    }
    fn alert(&mut self, msg: &str) {
        self.alerts.push(msg.into());
    }
    fn confirm(&mut self, question: &str) -> bool {
        self.questions.push(question.into());
        match self.confirmer {
            Some(ref mut f) => f(question),
            None => false
        }
    }
}
