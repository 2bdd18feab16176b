use serde::{Deserialize, Serialize};

use crate::domain::class::ClassDetails;
use crate::domain::types::{StudioId, de_decimal};

/// Mean earth radius in kilometres used for great-circle distances.
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Physical fitness location with its amenities and classes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Studio {
    pub id: StudioId,
    pub name: String,
    pub address: String,
    pub postal_code: String,
    #[serde(deserialize_with = "de_decimal")]
    pub lat: f64,
    #[serde(deserialize_with = "de_decimal")]
    pub long: f64,
    #[serde(default)]
    pub phone_num: Option<String>,
    #[serde(default)]
    pub images: Vec<StudioImage>,
    #[serde(default)]
    pub directions: Option<String>,
    #[serde(default)]
    pub classes: Vec<ClassDetails>,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
}

impl Studio {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.long)
    }

    /// Client-side route of the studio page.
    pub fn link(&self) -> String {
        format!("/studio/{}", self.id)
    }

    /// Amenities as `type (quantity)` joined by commas.
    pub fn amenities_summary(&self) -> String {
        self.amenities
            .iter()
            .map(|a| format!("{} ({})", a.kind, a.quantity))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Classes as `name (coach)` joined by commas.
    pub fn classes_summary(&self) -> String {
        self.classes
            .iter()
            .map(|c| format!("{} ({})", c.name, c.coach))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudioImage {
    pub path: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Amenity {
    #[serde(rename = "type")]
    pub kind: String,
    pub quantity: u32,
}

/// Latitude/longitude pair in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub long: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }

    /// Haversine distance to `other` in kilometres.
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_long = (other.long - self.long).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos()
                * other.lat.to_radians().cos()
                * (d_long / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
    }

    /// Latitude formatted with the six decimals the API expects.
    pub fn lat_param(&self) -> String {
        format!("{:.6}", self.lat)
    }

    /// Longitude formatted with the six decimals the API expects.
    pub fn long_param(&self) -> String {
        format!("{:.6}", self.long)
    }
}

impl Default for Coordinates {
    /// Downtown Toronto, the map's initial centre.
    fn default() -> Self {
        Self::new(43.6426, -79.3871)
    }
}

/// Studio annotated with its distance from the search origin.
#[derive(Clone, Debug, PartialEq)]
pub struct NearbyStudio {
    pub studio: Studio,
    /// Kilometres, rounded to one decimal. Unknown when the API geocoded the
    /// origin from a postal code.
    pub distance_km: Option<f64>,
}

impl NearbyStudio {
    pub fn new(studio: Studio, origin: &Coordinates) -> Self {
        let distance = origin.distance_km(&studio.coordinates());
        Self {
            studio,
            distance_km: Some((distance * 10.0).round() / 10.0),
        }
    }

    pub fn unmeasured(studio: Studio) -> Self {
        Self {
            studio,
            distance_km: None,
        }
    }

    pub fn distance_label(&self) -> Option<String> {
        self.distance_km.map(|km| format!("{km:.1} km"))
    }
}

/// Orders studios by increasing distance from `origin`.
pub fn sort_by_distance(studios: Vec<Studio>, origin: &Coordinates) -> Vec<NearbyStudio> {
    let mut nearby: Vec<NearbyStudio> = studios
        .into_iter()
        .map(|studio| NearbyStudio::new(studio, origin))
        .collect();
    nearby.sort_by(|a, b| {
        let (a, b) = (a.distance_km.unwrap_or(f64::MAX), b.distance_km.unwrap_or(f64::MAX));
        a.total_cmp(&b)
    });
    nearby
}
