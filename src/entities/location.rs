use geo_types::Point;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub coordinates: Coordinates,
}

impl Location {
    pub fn new(name: String, coordinates: Coordinates) -> Self {
        Self { name, coordinates }
    }
}

/// Decimal degrees, latitude first.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

impl From<Coordinates> for Point<f64> {
    fn from(coordinates: Coordinates) -> Self {
        Point::new(coordinates.lon, coordinates.lat)
    }
}

#[test]
fn coordinates_to_point_swaps_axes() {
    let point: Point<f64> = Coordinates::new(51.5, -0.12).into();

    assert_eq!(point.x(), -0.12);
    assert_eq!(point.y(), 51.5);
}

#[test]
fn coordinates_range_check() {
    assert!(Coordinates::new(90.0, -180.0).is_valid());
    assert!(!Coordinates::new(90.5, 0.0).is_valid());
    assert!(!Coordinates::new(0.0, 181.0).is_valid());
}
