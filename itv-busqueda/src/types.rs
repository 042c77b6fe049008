//! Wire types for the search API.

use serde_derive::{Serialize, Deserialize};

/// A point on the map.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64
}

/// An ITV station, as returned by `GET /estaciones`.
///
/// Everything but `id` may come back `null`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Estacion {
    pub id: i64,
    pub nombre: Option<String>,
    /// `FIJA`, `MOVIL` or `OTROS`.
    pub tipo: Option<String>,
    pub direccion: Option<String>,
    pub codigo_postal: Option<String>,
    pub longitud: Option<f64>,
    pub latitud: Option<f64>,
    pub descripcion: Option<String>,
    pub horario: Option<String>,
    pub contacto: Option<String>,
    pub url: Option<String>,
    pub localidad_nombre: Option<String>,
    pub provincia_nombre: Option<String>
}
impl Estacion {
    /// Where to plot this station, if it can be plotted at all.
    ///
    /// Both coordinates have to be present and finite.
    pub fn coords(&self) -> Option<LatLon> {
        match (self.latitud, self.longitud) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                Some(LatLon { lat, lon })
            },
            _ => None
        }
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_ref()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

/// The contents of the four filter inputs.
///
/// Blank fields (after trimming) count as unset, and are never sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    pub localidad: Option<String>,
    pub codigo_postal: Option<String>,
    pub provincia: Option<String>,
    pub tipo: Option<String>
}

/// JSON body for the `POST /estaciones` variant; unset fields go out as `null`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchBody<'a> {
    pub localidad: Option<&'a str>,
    pub codigo_postal: Option<&'a str>,
    pub provincia: Option<&'a str>,
    pub tipo: Option<&'a str>
}

impl SearchFilter {
    /// Query parameters for the `GET` variant, in input order.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let fields = [
            ("localidad", &self.localidad),
            ("codigoPostal", &self.codigo_postal),
            ("provincia", &self.provincia),
            ("tipo", &self.tipo)
        ];
        fields.iter()
            .filter_map(|&(k, v)| non_blank(v).map(|v| (k, v)))
            .collect()
    }
    pub fn body(&self) -> SearchBody<'_> {
        SearchBody {
            localidad: non_blank(&self.localidad),
            codigo_postal: non_blank(&self.codigo_postal),
            provincia: non_blank(&self.provincia),
            tipo: non_blank(&self.tipo)
        }
    }
    /// True if no field would make it into a request.
    pub fn is_blank(&self) -> bool {
        self.query_pairs().is_empty()
    }
}
