// Sample payloads shared by unit tests

use serde_json::{json, Value};

use super::trip::TripSegment;

pub fn place_json(name: &str, latitude: f64, longitude: f64) -> Value {
    json!({
        "place_id": format!("place-{}", name.to_lowercase().replace(' ', "-")),
        "name": name,
        "location": {
            "address": format!("{}, Goiânia - GO, Brasil", name),
            "coordinates": { "latitude": latitude, "longitude": longitude }
        },
        "types": ["point_of_interest"],
        "pictures": [],
        "ratings_total": 10
    })
}

pub fn cost_json(amount: f64) -> Value {
    json!({
        "source_urls": ["https://prices.example.com"],
        "source_description": "Local averages",
        "estimated_cost": amount,
        "currency": { "code": "BRL", "symbol": "R$", "name": "Brazilian Real" },
        "cost_details": {
            "base_cost": amount,
            "time_cost": 0.0,
            "traffic_adjustment": 0.0,
            "fuel_price": 0.0,
            "fuel_consumption": 0.0
        }
    })
}

pub fn segment_json(from: &str, to: &str, depart_hour: u32, arrive_hour: u32) -> Value {
    json!({
        "start_point": place_json(from, -16.68, -49.25),
        "end_point": place_json(to, -16.70, -49.27),
        "departure_time": format!("2024-06-01T{:02}:00:00Z", depart_hour),
        "arrival_time": format!("2024-06-01T{:02}:30:00Z", arrive_hour),
        "cost_estimate": cost_json(15.0),
        "transportation_method": "CAR"
    })
}

pub fn segment(from: &str, to: &str, depart_hour: u32, arrive_hour: u32) -> TripSegment {
    serde_json::from_value(segment_json(from, to, depart_hour, arrive_hour))
        .expect("fixture segment must deserialize")
}

pub fn input_json() -> Value {
    json!({
        "itinerary": {
            "segments": [
                segment_json("Hotel Central", "Museu de Arte", 8, 8),
                segment_json("Museu de Arte", "Restaurante Sabor", 12, 12)
            ],
            "total_cost": cost_json(30.0),
            "total_duration": 4.5
        },
        "user_preferences": [
            { "category": "culture", "weight": 0.9 },
            { "category": "budget", "weight": 0.4 }
        ]
    })
}
