//! Talking to the ingestion backend.

use itv_util::rest::{RestClient, RpcError};
use itv_util::user_agent;

use crate::config::Config;
use crate::types::ResultadoCarga;

pub trait IngestionBackend {
    /// Runs an ingestion from the named sources.
    fn load(&self, sources: &[&str]) -> Result<ResultadoCarga, RpcError>;
    /// Wipes the backend store, returning its confirmation text.
    fn clear_store(&self) -> Result<String, RpcError>;
}

pub struct CargaClient {
    rpc: RestClient
}
impl CargaClient {
    pub fn new(cfg: &Config) -> Self {
        let rpc = RestClient::new(user_agent!(), "carga", cfg.api_url.clone());
        Self { rpc }
    }
}
impl IngestionBackend for CargaClient {
    fn load(&self, sources: &[&str]) -> Result<ResultadoCarga, RpcError> {
        let query = sources.iter()
            .map(|&s| ("fuentes", s))
            .collect::<Vec<_>>();
        self.rpc.get_json("/cargar", &query)
    }
    fn clear_store(&self) -> Result<String, RpcError> {
        self.rpc.delete_text("/borrar")
    }
}

impl<'a, T> IngestionBackend for &'a T where T: IngestionBackend {
    fn load(&self, sources: &[&str]) -> Result<ResultadoCarga, RpcError> {
        (**self).load(sources)
    }
    fn clear_store(&self) -> Result<String, RpcError> {
        (**self).clear_store()
    }
}
