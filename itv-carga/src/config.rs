//! Standard configuration module.

use serde_derive::Deserialize;
use itv_util::{ConfigExt, crate_name};

fn default_api_url() -> String {
    "http://localhost:9002/api/carga".into()
}
fn default_sources() -> Vec<String> {
    vec!["CV".into(), "CAT".into(), "GAL".into()]
}

/// `itv-carga` configuration.
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Base URL of the ingestion API (everything before `/cargar`).
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Source identifiers offered as checkboxes, in display order.
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            sources: default_sources()
        }
    }
}

impl ConfigExt for Config {
    fn crate_name() -> &'static str {
        crate_name!()
    }
    fn env_prefix() -> &'static str {
        "ITV_CARGA"
    }
}
