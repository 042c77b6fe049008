//! Wire types for the ingestion API.

use serde::de::{Deserialize, Deserializer};
use serde_derive::{Serialize, Deserialize};

/// Some backends send `null` instead of an empty list.
fn null_as_empty<'de, D, T>(d: D) -> Result<Vec<T>, D::Error> where D: Deserializer<'de>, T: Deserialize<'de> {
    let ret: Option<Vec<T>> = Option::deserialize(d)?;
    Ok(ret.unwrap_or_default())
}

/// A record that failed validation but was fixed up and accepted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ErrorReparado {
    pub fuente: Option<String>,
    pub nombre: Option<String>,
    pub localidad: Option<String>,
    pub motivo: Option<String>,
    /// What was done to repair it.
    pub operacion: Option<String>
}

/// A record that failed validation and was dropped.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ErrorRechazado {
    pub fuente: Option<String>,
    pub nombre: Option<String>,
    pub localidad: Option<String>,
    pub motivo: Option<String>
}

/// Outcome of one ingestion run, as counted by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResultadoCarga {
    #[serde(default)]
    pub registros_correctos: u64,
    #[serde(default)]
    pub registros_con_errores_reparados: u64,
    #[serde(default)]
    pub registros_rechazados: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub errores_reparados: Vec<ErrorReparado>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub errores_rechazados: Vec<ErrorRechazado>
}
