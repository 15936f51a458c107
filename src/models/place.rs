// Places visited by a trip, with reviews, pictures and opening hours

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::base::Location;
use super::error::{check_http_url, check_not_blank, check_range, SchemaError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewAuthor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ReviewAuthor {
    pub fn validate(&self) -> Result<(), SchemaError> {
        if let Some(url) = &self.profile_url {
            check_http_url("profile_url", url)?;
        }
        if let Some(email) = &self.email {
            check_email("email", email)?;
        }
        Ok(())
    }
}

fn check_email(field: &str, value: &str) -> Result<(), SchemaError> {
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !value.contains(char::is_whitespace)
                && domain
                    .split('.')
                    .filter(|part| !part.is_empty())
                    .count()
                    >= 2
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(SchemaError::format_mismatch(
            field,
            format!("`{}` is not an email address", value),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub author: ReviewAuthor,
    /// 0 to 5 stars
    pub rating: f64,
    pub text: String,
    /// Two-letter language code
    pub language: String,
    pub publication_time: DateTime<Utc>,
}

impl Review {
    pub fn validate(&self) -> Result<(), SchemaError> {
        self.author.validate().map_err(|e| e.at("author"))?;
        check_range("rating", self.rating, 0.0, 5.0)?;
        if self.language.len() != 2 || !self.language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(SchemaError::format_mismatch(
                "language",
                format!("`{}` is not a 2-letter language code", self.language),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    pub url: String,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Picture {
    pub fn validate(&self) -> Result<(), SchemaError> {
        check_http_url("url", &self.url)?;
        if self.width == 0 {
            return Err(SchemaError::out_of_range("width", "must be greater than 0"));
        }
        if self.height == 0 {
            return Err(SchemaError::out_of_range("height", "must be greater than 0"));
        }
        Ok(())
    }
}

/// One open interval within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monday: Option<Vec<TimeRange>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<Vec<TimeRange>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<Vec<TimeRange>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thursday: Option<Vec<TimeRange>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friday: Option<Vec<TimeRange>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturday: Option<Vec<TimeRange>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunday: Option<Vec<TimeRange>>,
}

impl OpeningHours {
    fn days(&self) -> [(&'static str, &Option<Vec<TimeRange>>); 7] {
        [
            ("monday", &self.monday),
            ("tuesday", &self.tuesday),
            ("wednesday", &self.wednesday),
            ("thursday", &self.thursday),
            ("friday", &self.friday),
            ("saturday", &self.saturday),
            ("sunday", &self.sunday),
        ]
    }

    /// Every range must open before it closes, and ranges within a day must be ordered
    pub fn validate(&self) -> Result<(), SchemaError> {
        for (day, ranges) in self.days() {
            let Some(ranges) = ranges else { continue };

            let mut previous_close: Option<NaiveTime> = None;
            for (i, range) in ranges.iter().enumerate() {
                if range.open > range.close {
                    return Err(SchemaError::out_of_range(
                        format!("{}[{}]", day, i),
                        format!("opens at {} but closes at {}", range.open, range.close),
                    ));
                }
                if previous_close.is_some_and(|close| range.open < close) {
                    return Err(SchemaError::out_of_range(
                        format!("{}[{}]", day, i),
                        "ranges must be in chronological order",
                    ));
                }
                previous_close = Some(range.close);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub place_id: String,
    pub name: String,
    pub location: Location,
    /// Category tags such as `restaurant` or `museum`
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
    pub pictures: Vec<Picture>,
    pub ratings_total: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<OpeningHours>,
}

impl PlaceDetails {
    pub fn validate(&self) -> Result<(), SchemaError> {
        check_not_blank("place_id", &self.place_id)?;
        check_not_blank("name", &self.name)?;
        self.location.validate().map_err(|e| e.at("location"))?;

        if let Some(reviews) = &self.reviews {
            for (i, review) in reviews.iter().enumerate() {
                review
                    .validate()
                    .map_err(|e| e.at(&format!("[{}]", i)).at("reviews"))?;
            }
        }
        for (i, picture) in self.pictures.iter().enumerate() {
            picture
                .validate()
                .map_err(|e| e.at(&format!("[{}]", i)).at("pictures"))?;
        }
        if let Some(hours) = &self.opening_hours {
            hours.validate().map_err(|e| e.at("opening_hours"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, SchemaErrorKind};
    use serde_json::json;

    fn place_json() -> serde_json::Value {
        json!({
            "place_id": "ChIJ-goiania",
            "name": "Parque Vaca Brava",
            "location": {
                "address": "Av. T-10, Goiânia - GO, Brasil",
                "coordinates": { "latitude": -16.7064, "longitude": -49.2700 }
            },
            "types": ["park", "tourist_attraction"],
            "reviews": [{
                "author": { "name": "Ana", "email": "ana@example.com" },
                "rating": 4.5,
                "text": "Lovely lake walk",
                "language": "pt",
                "publication_time": "2024-05-01T10:00:00Z"
            }],
            "pictures": [{ "url": "https://example.com/lake.jpg", "width": 640, "height": 480 }],
            "ratings_total": 1200,
            "opening_hours": {
                "monday": [{ "open": "06:00:00", "close": "12:00:00" }, { "open": "14:00:00", "close": "22:00:00" }]
            }
        })
    }

    #[test]
    fn test_place_deserializes_and_validates() {
        let place: PlaceDetails = serde_json::from_value(place_json()).unwrap();
        assert!(place.validate().is_ok());
        assert_eq!(place.types.len(), 2);
        assert_eq!(place.opening_hours.as_ref().unwrap().monday.as_ref().unwrap().len(), 2);
        assert!(place.opening_hours.as_ref().unwrap().sunday.is_none());
    }

    #[test]
    fn test_review_rating_range() {
        let mut value = place_json();
        value["reviews"][0]["rating"] = json!(5.5);
        let place: PlaceDetails = serde_json::from_value(value).unwrap();
        let err = place.validate().unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::OutOfRange);
        assert_eq!(err.field, "reviews[0].rating");
    }

    #[test]
    fn test_review_language_code() {
        let mut value = place_json();
        value["reviews"][0]["language"] = json!("pt-BR");
        let place: PlaceDetails = serde_json::from_value(value).unwrap();
        assert_eq!(place.validate().unwrap_err().field, "reviews[0].language");
    }

    #[test]
    fn test_review_author_email() {
        let mut value = place_json();
        value["reviews"][0]["author"]["email"] = json!("not-an-email");
        let place: PlaceDetails = serde_json::from_value(value).unwrap();
        let err = place.validate().unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::FormatMismatch);
        assert_eq!(err.field, "reviews[0].author.email");
    }

    #[test]
    fn test_picture_dimensions() {
        let picture = Picture {
            url: "https://example.com/a.png".to_string(),
            width: 0,
            height: 10,
            description: None,
        };
        assert_eq!(picture.validate().unwrap_err().field, "width");
    }

    #[test]
    fn test_opening_hours_order() {
        let mut value = place_json();
        value["opening_hours"]["friday"] = json!([{ "open": "18:00:00", "close": "09:00:00" }]);
        let place: PlaceDetails = serde_json::from_value(value).unwrap();
        assert_eq!(place.validate().unwrap_err().field, "opening_hours.friday[0]");

        let mut value = place_json();
        value["opening_hours"]["monday"] = json!([
            { "open": "14:00:00", "close": "22:00:00" },
            { "open": "06:00:00", "close": "12:00:00" }
        ]);
        let place: PlaceDetails = serde_json::from_value(value).unwrap();
        assert_eq!(place.validate().unwrap_err().field, "opening_hours.monday[1]");
    }

    #[test]
    fn test_negative_ratings_total_is_out_of_range() {
        let mut value = place_json();
        value["ratings_total"] = json!(-1);
        let err: SchemaError = serde_json::from_value::<PlaceDetails>(value)
            .unwrap_err()
            .into();
        assert_eq!(err.kind, SchemaErrorKind::OutOfRange);
    }

    #[test]
    fn test_location_error_path() {
        let mut place: PlaceDetails = serde_json::from_value(place_json()).unwrap();
        place.location.coordinates = Coordinates { latitude: 0.0, longitude: 200.0 };
        assert_eq!(
            place.validate().unwrap_err().field,
            "location.coordinates.longitude"
        );
    }

    #[test]
    fn test_email_shapes() {
        assert!(check_email("email", "a@b.co").is_ok());
        assert!(check_email("email", "@b.co").is_err());
        assert!(check_email("email", "a@b").is_err());
        assert!(check_email("email", "a@@b.co").is_err());
        assert!(check_email("email", "a b@c.com").is_err());
    }
}
