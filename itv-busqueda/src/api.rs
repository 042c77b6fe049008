//! Talking to the search backend.

use itv_util::rest::{RestClient, RpcError};
use itv_util::user_agent;
use serde_derive::Deserialize;
use log::*;

use crate::config::Config;
use crate::types::{Estacion, SearchFilter};

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchMethod {
    /// `GET /estaciones?localidad=...`
    Get,
    /// `POST /estaciones` with a JSON body.
    Post
}
impl Default for SearchMethod {
    fn default() -> Self {
        SearchMethod::Get
    }
}

/// Something that can answer station queries.
pub trait StationBackend {
    /// The full, unfiltered station list.
    fn all_stations(&self) -> Result<Vec<Estacion>, RpcError>;
    /// Stations matching every non-blank field of `filter`.
    fn search_stations(&self, filter: &SearchFilter) -> Result<Vec<Estacion>, RpcError>;
}

pub struct BusquedaClient {
    rpc: RestClient,
    method: SearchMethod
}
impl BusquedaClient {
    pub fn new(cfg: &Config) -> Self {
        let rpc = RestClient::new(user_agent!(), "busqueda", cfg.api_url.clone());
        Self { rpc, method: cfg.search_method }
    }
}
impl StationBackend for BusquedaClient {
    fn all_stations(&self) -> Result<Vec<Estacion>, RpcError> {
        self.rpc.get_json("/estaciones", &[])
    }
    fn search_stations(&self, filter: &SearchFilter) -> Result<Vec<Estacion>, RpcError> {
        if filter.is_blank() {
            debug!("blank filter; falling back to the unfiltered list");
            return self.all_stations();
        }
        match self.method {
            SearchMethod::Get => self.rpc.get_json("/estaciones", &filter.query_pairs()),
            SearchMethod::Post => self.rpc.post_json("/estaciones", &filter.body())
        }
    }
}

impl<'a, T> StationBackend for &'a T where T: StationBackend {
    fn all_stations(&self) -> Result<Vec<Estacion>, RpcError> {
        (**self).all_stations()
    }
    fn search_stations(&self, filter: &SearchFilter) -> Result<Vec<Estacion>, RpcError> {
        (**self).search_stations(filter)
    }
}
