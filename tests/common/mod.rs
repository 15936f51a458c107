//! Shared fixtures for integration tests: itinerary payloads, a scripted
//! gateway and a loopback HTTP server standing in for the LLM provider.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tripvalidator::llm::{GatewayError, GenerateRequest, LlmGateway, TransportError};
use tripvalidator::models::TripValidatorInput;

pub fn place_json(name: &str, latitude: f64, longitude: f64) -> Value {
    json!({
        "place_id": format!("place-{}", name.to_lowercase().replace(' ', "-")),
        "name": name,
        "location": {
            "address": format!("{}, Goiânia", name),
            "coordinates": { "latitude": latitude, "longitude": longitude }
        },
        "types": ["point_of_interest"],
        "pictures": [],
        "ratings_total": 12
    })
}

pub fn cost_json(amount: f64) -> Value {
    json!({
        "source_urls": ["https://example.com/fares"],
        "source_description": "Local taxi fares",
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

pub fn segment_json(from: &str, to: &str, depart: &str, arrive: &str) -> Value {
    json!({
        "start_point": place_json(from, -16.68, -49.25),
        "end_point": place_json(to, -16.70, -49.27),
        "departure_time": depart,
        "arrival_time": arrive,
        "cost_estimate": cost_json(15.0),
        "transportation_method": "CAR"
    })
}

pub fn input_json() -> Value {
    json!({
        "itinerary": {
            "segments": [
                segment_json("Hotel Central", "Museu de Arte", "2024-06-01T08:00:00Z", "2024-06-01T08:30:00Z"),
                segment_json("Museu de Arte", "Restaurante Sabor", "2024-06-01T12:00:00Z", "2024-06-01T12:30:00Z")
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

pub fn sample_input() -> TripValidatorInput {
    TripValidatorInput::from_json(&input_json().to_string()).expect("fixture input is valid")
}

/// What the scripted gateway does when called
#[derive(Debug, Clone)]
pub enum StubReply {
    Text(String),
    Provider { status: u16, body: String },
    Refused,
    Slow(Duration, String),
}

/// Gateway that replays a fixed outcome and records every request
pub struct StubGateway {
    reply: StubReply,
    calls: Mutex<Vec<GenerateRequest>>,
}

impl StubGateway {
    pub fn new(reply: StubReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn text(reply: &str) -> Arc<Self> {
        Self::new(StubReply::Text(reply.to_string()))
    }

    pub fn calls(&self) -> Vec<GenerateRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for StubGateway {
    async fn send(&self, request: GenerateRequest) -> Result<String, GatewayError> {
        self.calls.lock().unwrap().push(request);
        match &self.reply {
            StubReply::Text(text) => Ok(text.clone()),
            StubReply::Provider { status, body } => Err(GatewayError::Provider {
                status: *status,
                body: body.clone(),
            }),
            StubReply::Refused => Err(GatewayError::Transport(TransportError::Connect(
                "connection refused".to_string(),
            ))),
            StubReply::Slow(delay, text) => {
                tokio::time::sleep(*delay).await;
                Ok(text.clone())
            }
        }
    }
}

/// Loopback HTTP/1.1 server answering every request with one canned response
pub struct FakeProvider {
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeProvider {
    pub async fn start(status: u16, body: impl Into<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let body = body.into();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = requests.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let body = body.clone();
                let seen = seen.clone();
                tokio::spawn(async move {
                    if let Some(raw) = serve_one(stream, status, &body).await {
                        seen.lock().unwrap().push(raw);
                    }
                });
            }
        });

        Self {
            url: format!("http://{}/v1/chat/completions", addr),
            requests,
        }
    }

    /// Raw text (head and body) of every request received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn serve_one(mut stream: TcpStream, status: u16, body: &str) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < head_end + content_length {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let reason = warp::http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown");
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).await.ok()?;
    stream.shutdown().await.ok();

    Some(String::from_utf8_lossy(&buf).to_string())
}

/// Address nothing is listening on
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/v1/chat/completions", addr)
}

/// Chat-completions body whose first choice carries `content`
pub fn chat_completion(content: &str) -> String {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}
