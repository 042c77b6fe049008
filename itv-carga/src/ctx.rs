//! Data loading page controller.

use log::*;

use crate::api::IngestionBackend;
use crate::sources::SourceSelection;
use crate::view::{self, CargaView};

/// What a button press ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The request went out and the page shows its result.
    Applied,
    /// The request went out and failed; the page shows why.
    Failed,
    /// Nothing was selected; no request was sent.
    Rejected,
    /// The operator backed out at the confirmation; no request was sent.
    Cancelled
}

pub struct CargaPage<B, V> {
    backend: B,
    view: V,
    selection: SourceSelection
}

impl<B, V> CargaPage<B, V> where B: IngestionBackend, V: CargaView {
    /// Sets up the page with every source unchecked and the placeholder up.
    pub fn new<I, S>(backend: B, view: V, sources: I) -> Self where I: IntoIterator<Item = S>, S: Into<String> {
        let mut ret = Self {
            backend, view,
            selection: SourceSelection::new(sources)
        };
        ret.view.sync_checkboxes(&ret.selection);
        ret.view.show_placeholder();
        ret
    }
    pub fn view(&self) -> &V {
        &self.view
    }
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
    pub fn selection(&self) -> &SourceSelection {
        &self.selection
    }
    pub fn into_view(self) -> V {
        self.view
    }

    /// The "select all" box changed.
    pub fn toggle_all(&mut self, checked: bool) {
        self.selection.set_all(checked);
        self.view.sync_checkboxes(&self.selection);
    }
    /// One source box changed.
    pub fn toggle_source(&mut self, id: &str, checked: bool) {
        if !self.selection.set(id, checked) {
            warn!("no such source checkbox: {}", id);
        }
        self.view.sync_checkboxes(&self.selection);
    }
    pub fn selected_sources(&self) -> Vec<&str> {
        self.selection.selected()
    }

    /// Runs `f` with the loading state up, always taking it down again.
    fn with_loading<T, F>(&mut self, f: F) -> T where F: FnOnce(&B) -> T {
        self.view.set_loading(true);
        let ret = f(&self.backend);
        self.view.set_loading(false);
        ret
    }

    /// Triggers an ingestion run from the checked sources.
    pub fn load(&mut self) -> Outcome {
        let sources: Vec<String> = self.selection.selected()
            .into_iter()
            .map(|s| s.to_owned())
            .collect();
        if sources.is_empty() {
            info!("load requested with no sources selected");
            self.view.alert(view::SELECT_SOURCE_PROMPT);
            return Outcome::Rejected;
        }
        info!("loading from sources: {}", sources.join(", "));
        let res = self.with_loading(|b| {
            let refs: Vec<&str> = sources.iter().map(|s| s.as_str()).collect();
            b.load(&refs)
        });
        match res {
            Ok(r) => {
                info!("load done: {} ok, {} repaired, {} rejected",
                      r.registros_correctos, r.registros_con_errores_reparados, r.registros_rechazados);
                self.view.show_summary(&r);
                Outcome::Applied
            },
            Err(e) => {
                warn!("Loading data failed: {}", e);
                self.view.show_error(&format!("Error al cargar datos: {}", e));
                Outcome::Failed
            }
        }
    }

    /// Wipes the backend store, once the operator confirms.
    pub fn clear_store(&mut self) -> Outcome {
        if !self.view.confirm(view::CLEAR_STORE_QUESTION) {
            info!("clearing the store cancelled");
            return Outcome::Cancelled;
        }
        match self.with_loading(|b| b.clear_store()) {
            Ok(text) => {
                info!("store cleared: {}", text.trim());
                self.view.show_success(view::CLEAR_STORE_DONE);
                Outcome::Applied
            },
            Err(e) => {
                warn!("Clearing the store failed: {}", e);
                self.view.show_error(&format!("Error al borrar el almacén: {}", e));
                Outcome::Failed
            }
        }
    }

    /// Unchecks everything and puts the placeholder back.
    pub fn reset(&mut self) {
        self.selection.reset();
        self.view.sync_checkboxes(&self.selection);
        self.view.show_placeholder();
    }
}
