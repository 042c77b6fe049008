//! Standard configuration module.

use serde_derive::Deserialize;
use itv_util::{ConfigExt, crate_name};
use std::time::Duration;

use crate::api::SearchMethod;
use crate::view::BannerTimings;

fn default_api_url() -> String {
    "http://localhost:9001/api/busqueda".into()
}
fn default_error_banner_secs() -> u64 {
    6
}
fn default_info_banner_secs() -> u64 {
    5
}

/// `itv-busqueda` configuration.
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Base URL of the search API (everything before `/estaciones`).
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Whether filtered searches go out as `GET` query parameters or a `POST` body.
    #[serde(default)]
    pub search_method: SearchMethod,
    #[serde(default = "default_error_banner_secs")]
    pub error_banner_secs: u64,
    #[serde(default = "default_info_banner_secs")]
    pub info_banner_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            search_method: SearchMethod::default(),
            error_banner_secs: default_error_banner_secs(),
            info_banner_secs: default_info_banner_secs()
        }
    }
}

impl Config {
    pub fn banner_timings(&self) -> BannerTimings {
        BannerTimings {
            error: Duration::from_secs(self.error_banner_secs),
            info: Duration::from_secs(self.info_banner_secs)
        }
    }
}

impl ConfigExt for Config {
    fn crate_name() -> &'static str {
        crate_name!()
    }
    fn env_prefix() -> &'static str {
        "ITV_BUSQUEDA"
    }
}
