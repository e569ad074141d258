use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    entities::Coordinates,
    error::Error,
    external::Geocoder,
};

const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~');

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Geometry {
    /// `[longitude, latitude]`
    #[serde(default)]
    coordinates: Vec<f64>,
}

impl FeatureCollection {
    fn first_match(&self) -> Option<Coordinates> {
        let geometry = self.features.first()?.geometry.as_ref()?;

        match geometry.coordinates.as_slice() {
            [lon, lat, ..] => Some(Coordinates::new(*lat, *lon)),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct MapboxGeocoder {
    client: reqwest::Client,
    api_base: String,
    access_token: Option<String>,
}

impl std::fmt::Debug for MapboxGeocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapboxGeocoder")
            .field("api_base", &self.api_base)
            .field("has_access_token", &self.access_token.is_some())
            .finish()
    }
}

impl MapboxGeocoder {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.mapbox_api_base.clone(),
            access_token: config.mapbox_access_token.clone(),
        }
    }

    fn url(&self, name: &str) -> String {
        format!(
            "https://{}/geocoding/v5/mapbox.places/{}.json",
            self.api_base,
            utf8_percent_encode(name, PATH_SEGMENT)
        )
    }
}

#[async_trait]
impl Geocoder for MapboxGeocoder {
    #[tracing::instrument(skip(self))]
    async fn resolve(&self, name: &str) -> Result<Option<Coordinates>, Error> {
        tracing::debug!("fetching coordinates");

        let res = self
            .client
            .get(self.url(name))
            .query(&[("access_token", self.access_token.as_deref().unwrap_or_default())])
            .query(&[("limit", 1)])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if status_code != 200 {
            tracing::error!(status_code, "could not find coordinates for '{}'", name);
            return Ok(None);
        }

        let data: FeatureCollection = res.json().await?;

        let coordinates = data.first_match();
        if coordinates.is_none() {
            tracing::error!("could not find coordinates for '{}'", name);
        }

        Ok(coordinates)
    }
}

#[test]
fn first_match_swaps_to_lat_lon() {
    let data: FeatureCollection = serde_json::from_value(serde_json::json!({
        "type": "FeatureCollection",
        "features": [
            {
                "place_name": "Berlin, Germany",
                "geometry": { "type": "Point", "coordinates": [13.38333, 52.51667] }
            },
            {
                "geometry": { "type": "Point", "coordinates": [0.0, 0.0] }
            }
        ]
    }))
    .unwrap();

    assert_eq!(data.first_match(), Some(Coordinates::new(52.51667, 13.38333)));
}

#[test]
fn first_match_without_features_is_none() {
    let data: FeatureCollection =
        serde_json::from_value(serde_json::json!({ "features": [] })).unwrap();
    assert_eq!(data.first_match(), None);

    let data: FeatureCollection = serde_json::from_value(serde_json::json!({
        "features": [{ "geometry": { "coordinates": [] } }]
    }))
    .unwrap();
    assert_eq!(data.first_match(), None);

    let data: FeatureCollection =
        serde_json::from_value(serde_json::json!({ "message": "Not Found" })).unwrap();
    assert_eq!(data.first_match(), None);
}

#[test]
fn url_encodes_the_name_as_one_segment() {
    let config = Config::default();
    let geocoder = MapboxGeocoder::new(&config);

    assert_eq!(
        geocoder.url("1600 Amphitheatre Pkwy/Mountain View"),
        "https://api.mapbox.com/geocoding/v5/mapbox.places/1600%20Amphitheatre%20Pkwy%2FMountain%20View.json"
    );
}
