// Shared value objects: coordinates, locations, currencies, transport modes

use serde::{Deserialize, Serialize};

use super::error::{check_not_blank, check_range, SchemaError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportationMethod {
    Car,
    PublicTransport,
    Walking,
    Bicycle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn validate(&self) -> Result<(), SchemaError> {
        check_range("latitude", self.latitude, -90.0, 90.0)?;
        check_range("longitude", self.longitude, -180.0, 180.0)
    }

    /// Great-circle distance in kilometers
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        haversine::distance(
            haversine::Location {
                latitude: self.latitude,
                longitude: self.longitude,
            },
            haversine::Location {
                latitude: other.latitude,
                longitude: other.longitude,
            },
            haversine::Units::Kilometers,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    /// Map-service short code, e.g. a Plus Code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plus_code: Option<String>,
    pub coordinates: Coordinates,
}

impl Location {
    pub fn validate(&self) -> Result<(), SchemaError> {
        check_not_blank("address", &self.address)?;
        self.coordinates.validate().map_err(|e| e.at("coordinates"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    /// ISO 4217 code, e.g. `USD`
    pub code: String,
    pub symbol: String,
    pub name: String,
}

impl Currency {
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.code.len() != 3 || !self.code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(SchemaError::format_mismatch(
                "code",
                format!("`{}` is not a 3-letter uppercase currency code", self.code),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SchemaErrorKind;

    #[test]
    fn test_transportation_method_serialization() {
        let json = serde_json::to_string(&TransportationMethod::PublicTransport).unwrap();
        assert_eq!(json, r#""PUBLIC_TRANSPORT""#);

        let method: TransportationMethod = serde_json::from_str(r#""BICYCLE""#).unwrap();
        assert_eq!(method, TransportationMethod::Bicycle);

        assert!(serde_json::from_str::<TransportationMethod>(r#""TELEPORT""#).is_err());
    }

    #[test]
    fn test_coordinates_bounds() {
        assert!(Coordinates { latitude: 90.0, longitude: -180.0 }.validate().is_ok());

        let err = Coordinates { latitude: 90.5, longitude: 0.0 }.validate().unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::OutOfRange);
        assert_eq!(err.field, "latitude");

        let err = Coordinates { latitude: 0.0, longitude: 181.0 }.validate().unwrap_err();
        assert_eq!(err.field, "longitude");
    }

    #[test]
    fn test_distance_km() {
        let paris = Coordinates { latitude: 48.8566, longitude: 2.3522 };
        let london = Coordinates { latitude: 51.5074, longitude: -0.1278 };
        let d = paris.distance_km(&london);
        assert!(d > 330.0 && d < 360.0, "unexpected distance {}", d);
        assert_eq!(paris.distance_km(&paris), 0.0);
    }

    #[test]
    fn test_location_requires_address() {
        let location = Location {
            address: "  ".to_string(),
            plus_code: None,
            coordinates: Coordinates { latitude: 0.0, longitude: 0.0 },
        };
        let err = location.validate().unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::MissingField);
        assert_eq!(err.field, "address");
    }

    #[test]
    fn test_location_nested_path() {
        let location = Location {
            address: "Av. Paulista, São Paulo".to_string(),
            plus_code: Some("34MP+FJ".to_string()),
            coordinates: Coordinates { latitude: -100.0, longitude: 0.0 },
        };
        let err = location.validate().unwrap_err();
        assert_eq!(err.field, "coordinates.latitude");
    }

    #[test]
    fn test_currency_code_shape() {
        let mut currency = Currency {
            code: "BRL".to_string(),
            symbol: "R$".to_string(),
            name: "Brazilian Real".to_string(),
        };
        assert!(currency.validate().is_ok());

        currency.code = "brl".to_string();
        assert_eq!(
            currency.validate().unwrap_err().kind,
            SchemaErrorKind::FormatMismatch
        );

        currency.code = "EURO".to_string();
        assert!(currency.validate().is_err());
    }
}
