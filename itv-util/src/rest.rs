//! Blocking JSON-over-HTTP client for the ITV backends.

use reqwest::{Client, RequestBuilder, Response};
use reqwest::Error as ReqwestError;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Method;
use failure_derive::Fail;
use serde::Serialize;
use serde::de::DeserializeOwned;
use log::*;

use crate::impl_from_for_error;

/// An error encountered after a call to a backend.
#[derive(Debug, Fail)]
pub enum RpcError {
    /// The remote entity was not found.
    #[fail(display = "not found (remote)")]
    RemoteNotFound,
    /// The remote service was unavailable.
    #[fail(display = "remote service unavailable")]
    RemoteServiceUnavailable,
    /// The remote service returned an error.
    #[fail(display = "{} error (code {}): {}", service, code, error)]
    RemoteError {
        /// Name of the backend responsible.
        service: &'static str,
        /// The HTTP status code returned.
        code: u16,
        /// The error text.
        error: String
    },
    /// reqwest error (transport failure, or a body that didn't decode).
    #[fail(display = "reqwest: {}", _0)]
    Reqwest(ReqwestError)
}
impl_from_for_error!(RpcError,
                     ReqwestError => Reqwest);

/// Joins a base URL and a path, tolerating a trailing slash on the base.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.is_empty() {
        base.to_owned()
    }
    else if path.starts_with('/') {
        format!("{}{}", base, path)
    }
    else {
        format!("{}/{}", base, path)
    }
}

#[derive(Clone)]
pub struct RestClient {
    pub base_url: String,
    pub user_agent: String,
    pub name: &'static str,
    pub cli: Client
}
impl RestClient {
    pub fn new(ua: String, name: &'static str, base_url: String) -> Self {
        let cli = Client::new();
        Self {
            user_agent: ua,
            name, base_url, cli
        }
    }
    fn request(&self, meth: Method, path: &str) -> RequestBuilder {
        let url = join_url(&self.base_url, path);
        debug!("RPC ({}): {} {}", self.name, meth, url);
        self.cli.request(meth, &url)
            .header(USER_AGENT, &self.user_agent as &str)
    }
    fn send(&self, req: RequestBuilder) -> Result<Response, RpcError> {
        let mut resp = req.send()?;
        let status = resp.status();
        debug!("RPC ({}): response code {}", self.name, status.as_u16());
        match status.as_u16() {
            404 => Err(RpcError::RemoteNotFound)?,
            503 => Err(RpcError::RemoteServiceUnavailable)?,
            _ => {}
        }
        if !status.is_success() {
            let text = resp.text()?;
            warn!("RPC ({}): request failed ({}): {}", self.name, status.as_u16(), text);
            Err(RpcError::RemoteError {
                service: self.name,
                code: status.as_u16(),
                error: text
            })?
        }
        Ok(resp)
    }
    /// `GET` a path with the given query pairs, decoding a JSON body.
    ///
    /// Keys may repeat; each pair becomes its own `key=value` parameter.
    pub fn get_json<U>(&self, path: &str, query: &[(&str, &str)]) -> Result<U, RpcError> where U: DeserializeOwned {
        let mut req = self.request(Method::GET, path)
            .header(ACCEPT, "application/json");
        if !query.is_empty() {
            req = req.query(query);
        }
        let mut resp = self.send(req)?;
        let ret: U = resp.json()?;
        Ok(ret)
    }
    /// `POST` a JSON body to a path, decoding a JSON body.
    pub fn post_json<B, U>(&self, path: &str, body: &B) -> Result<U, RpcError> where B: Serialize, U: DeserializeOwned {
        let req = self.request(Method::POST, path)
            .header(ACCEPT, "application/json")
            .json(body);
        let mut resp = self.send(req)?;
        let ret: U = resp.json()?;
        Ok(ret)
    }
    /// `DELETE` a path, returning the plain-text body.
    pub fn delete_text(&self, path: &str) -> Result<String, RpcError> {
        let req = self.request(Method::DELETE, path);
        let mut resp = self.send(req)?;
        Ok(resp.text()?)
    }
}
