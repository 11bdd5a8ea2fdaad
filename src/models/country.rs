//! Country reference data model

use serde::{Deserialize, Serialize};

/// Full country record as stored in the country directory
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Country {
    /// Common English name
    pub name: String,
    /// ISO 3166-1 alpha-2 code
    pub alpha2: String,
    /// ISO 3166-1 alpha-3 code
    pub alpha3: String,
    /// Capital city, empty for uninhabited territories
    pub capital: String,
    pub region: String,
    pub subregion: String,
    /// First-level administrative divisions
    pub provinces: Vec<String>,
    /// Wikipedia article URL
    pub wiki: String,
    /// Country boundary (GeoJSON geometry, `[lon, lat]` positions)
    pub geometry: Geometry,
}

/// Entry of the country listing
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CountrySummary {
    pub name: String,
    pub code: String,
}

impl From<&Country> for CountrySummary {
    fn from(country: &Country) -> Self {
        Self {
            name: country.name.clone(),
            code: country.alpha2.clone(),
        }
    }
}

/// GeoJSON position: `[longitude, latitude]`
pub type Position = [f64; 2];

/// Linear ring of positions, first and last equal
pub type Ring = Vec<Position>;

/// Boundary geometry in GeoJSON layout
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

impl Geometry {
    /// Outer ring of the first polygon of this geometry
    #[must_use]
    pub fn first_outer_ring(&self) -> Option<&Ring> {
        match self {
            Geometry::Polygon(rings) => rings.first(),
            Geometry::MultiPolygon(polygons) => polygons.first().and_then(|p| p.first()),
        }
    }

    /// Center of the bounding box of the first polygon's outer ring
    #[must_use]
    pub fn center(&self) -> Option<GeoPoint> {
        let ring = self.first_outer_ring()?;
        let first = ring.first()?;

        let (mut min_lon, mut min_lat) = (first[0], first[1]);
        let (mut max_lon, mut max_lat) = (first[0], first[1]);
        for [lon, lat] in ring.iter().skip(1) {
            min_lon = min_lon.min(*lon);
            max_lon = max_lon.max(*lon);
            min_lat = min_lat.min(*lat);
            max_lat = max_lat.max(*lat);
        }

        Some(GeoPoint {
            latitude: min_lat + (max_lat - min_lat) / 2.0,
            longitude: min_lon + (max_lon - min_lon) / 2.0,
        })
    }
}

/// A single point, serialized as `[lat, lon]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl Serialize for GeoPoint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.latitude, self.longitude].serialize(serializer)
    }
}
