//! Error handling.

pub use failure::Error;
use failure_derive::Fail;
use itv_util::impl_from_for_error;
use itv_util::rest::RpcError;
use handlebars::RenderError;

#[derive(Fail, Debug)]
pub enum CargaError {
    /// Talking to the ingestion backend failed.
    #[fail(display = "RPC: {}", _0)]
    Rpc(RpcError),
    /// Handlebars rendering error.
    #[fail(display = "handlebars: {}", _0)]
    Hbs(RenderError)
}

impl_from_for_error!(CargaError,
                     RpcError => Rpc,
                     RenderError => Hbs);

pub type CargaResult<T> = ::std::result::Result<T, CargaError>;
pub type Result<T, E = Error> = ::std::result::Result<T, E>;
