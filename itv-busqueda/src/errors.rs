//! Error handling.

pub use failure::Error;
use failure_derive::Fail;
use itv_util::impl_from_for_error;
use itv_util::rest::RpcError;
use handlebars::RenderError;
use serde_json::Error as JsonError;

#[derive(Fail, Debug)]
pub enum BusquedaError {
    /// Talking to the search backend failed.
    #[fail(display = "RPC: {}", _0)]
    Rpc(RpcError),
    /// Handlebars rendering error.
    #[fail(display = "handlebars: {}", _0)]
    Hbs(RenderError),
    /// Serializing marker data for the page failed.
    #[fail(display = "serde_json: {}", _0)]
    Json(JsonError)
}

impl_from_for_error!(BusquedaError,
                     RpcError => Rpc,
                     RenderError => Hbs,
                     JsonError => Json);

pub type BusquedaResult<T> = ::std::result::Result<T, BusquedaError>;
pub type Result<T, E = Error> = ::std::result::Result<T, E>;
