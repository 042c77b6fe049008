//! Rendering port for the data loading page.

use crate::sources::SourceSelection;
use crate::types::ResultadoCarga;

pub const SELECT_SOURCE_PROMPT: &str = "Por favor, selecciona al menos una fuente";
pub const CLEAR_STORE_QUESTION: &str = "¿Estás seguro de que deseas borrar todos los datos del almacén? Esta acción no se puede deshacer.";
pub const CLEAR_STORE_DONE: &str = "Almacén de datos borrado correctamente";
pub const PLACEHOLDER: &str = "Selecciona fuentes y haz clic en \"Cargar\" para empezar";

/// Everything the controller does to the page goes through here.
pub trait CargaView {
    /// Spinner on and results panel hidden, or the other way round.
    fn set_loading(&mut self, loading: bool);
    /// Mirrors the checkbox state onto the page.
    fn sync_checkboxes(&mut self, sel: &SourceSelection);
    /// Replaces the results panel with a run summary.
    fn show_summary(&mut self, res: &ResultadoCarga);
    fn show_success(&mut self, msg: &str);
    fn show_error(&mut self, msg: &str);
    /// Puts the results panel back to its initial prompt.
    fn show_placeholder(&mut self);
    /// Blocking notice the operator has to acknowledge.
    fn alert(&mut self, msg: &str);
    /// Asks a yes/no question; `true` means go ahead.
    fn confirm(&mut self, question: &str) -> bool;
}
