//! Marker styles, tooltips and the id-to-marker registry.

use serde_derive::Serialize;
use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::types::{Estacion, LatLon};

/// Where the map starts before anything is loaded.
pub const MAP_CENTER: LatLon = LatLon { lat: 40.4168, lon: -3.7038 };
pub const MAP_ZOOM: u8 = 6;
/// Padding, in pixels, around the plotted stations when fitting the viewport.
pub const FIT_PADDING_PX: u32 = 50;

/// Leaflet `circleMarker` path options.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    pub radius: f64,
    pub color: &'static str,
    pub fill_color: &'static str,
    pub fill_opacity: f64
}

pub const ESTILO_NORMAL: MarkerStyle = MarkerStyle {
    radius: 6.0,
    color: "#3388ff",
    fill_color: "#3388ff",
    fill_opacity: 0.8
};

pub const ESTILO_RESALTADO: MarkerStyle = MarkerStyle {
    radius: 8.0,
    color: "#dc9606",
    fill_color: "#f1c353",
    fill_opacity: 0.95
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkerState {
    Normal,
    Highlighted
}
impl MarkerState {
    pub fn style(self) -> MarkerStyle {
        match self {
            MarkerState::Normal => ESTILO_NORMAL,
            MarkerState::Highlighted => ESTILO_RESALTADO
        }
    }
}

/// Text shown when hovering over a marker. Blank fields read `N/A`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MarkerTooltip {
    pub nombre: String,
    pub tipo: String,
    pub direccion: String,
    pub localidad: String,
    pub codigo_postal: String,
    pub provincia: String
}
impl MarkerTooltip {
    pub fn for_station(st: &Estacion) -> Self {
        fn or_na(f: &Option<String>) -> String {
            match f.as_ref().map(|s| s.trim()) {
                Some(s) if !s.is_empty() => s.to_owned(),
                _ => "N/A".into()
            }
        }
        Self {
            nombre: st.nombre.clone().unwrap_or_default(),
            tipo: or_na(&st.tipo),
            direccion: or_na(&st.direccion),
            localidad: or_na(&st.localidad_nombre),
            codigo_postal: or_na(&st.codigo_postal),
            provincia: or_na(&st.provincia_nombre)
        }
    }
}

/// Smallest box containing a set of points.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64
}
impl Bounds {
    pub fn around(p: LatLon) -> Self {
        Bounds { south: p.lat, west: p.lon, north: p.lat, east: p.lon }
    }
    pub fn extend(&mut self, p: LatLon) {
        self.south = self.south.min(p.lat);
        self.north = self.north.max(p.lat);
        self.west = self.west.min(p.lon);
        self.east = self.east.max(p.lon);
    }
    /// Returns `None` for no points.
    pub fn from_points<I: IntoIterator<Item = LatLon>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let mut ret = Bounds::around(iter.next()?);
        for p in iter {
            ret.extend(p);
        }
        Some(ret)
    }
}

/// Maps station ids to whatever handle the map hands back for their marker.
///
/// Holds one entry per plotted station; stations that can't be plotted
/// never get one.
#[derive(Debug)]
pub struct MarkerRegistry<M> {
    markers: BTreeMap<i64, M>
}
impl<M> Default for MarkerRegistry<M> {
    fn default() -> Self {
        Self { markers: BTreeMap::new() }
    }
}
impl<M> MarkerRegistry<M> {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn clear(&mut self) {
        self.markers.clear();
    }
    /// Registers a marker, returning the one it replaced (duplicate id).
    pub fn insert(&mut self, id: i64, marker: M) -> Option<M> {
        self.markers.insert(id, marker)
    }
    pub fn get(&self, id: i64) -> Option<&M> {
        self.markers.get(&id)
    }
    pub fn contains(&self, id: i64) -> bool {
        self.markers.contains_key(&id)
    }
    pub fn len(&self) -> usize {
        self.markers.len()
    }
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
    pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.markers.keys().cloned()
    }
    pub fn iter(&self) -> btree_map::Iter<'_, i64, M> {
        self.markers.iter()
    }
}
