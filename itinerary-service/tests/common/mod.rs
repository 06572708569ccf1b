#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use itinerary_service::config::ItineraryConfig;
use itinerary_service::services::providers::{GenerationError, GenerationProvider};
use itinerary_service::startup::Application;
use serde_json::{json, Value};
use service_core::config::Config as CoreConfig;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn_with_provider(provider: Arc<dyn GenerationProvider>) -> Self {
        let config = test_config();

        let app = Application::build_with_provider(config, provider)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn post_itinerary(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/generate-itinerary", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_plan_form(&self, fields: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(format!("{}/plan", self.address))
            .form(fields)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Defaults everywhere except a loopback listener on a random port and the
/// crate's own static directory.
pub fn test_config() -> ItineraryConfig {
    let static_dir = format!("{}/static", env!("CARGO_MANIFEST_DIR"));
    ItineraryConfig::from_lookup(
        CoreConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        move |key| match key {
            "STATIC_DIR" => Some(static_dir.clone()),
            "GENERATION_STRATEGY" => Some("mock".to_string()),
            _ => None,
        },
    )
    .expect("Failed to build test configuration")
}

/// Provider double that records every prompt it receives.
pub struct StubProvider {
    response: Result<String, String>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl StubProvider {
    pub fn replying(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(text.into()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    pub fn failing(message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            response: Err(message.into()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        self.response
            .clone()
            .map_err(|message| GenerationError::Api {
                status: 503,
                body: message,
            })
    }
}

/// A model reply wrapping a two-day Tokyo plan with the given total.
pub fn fenced_itinerary(total_cost: f64) -> String {
    let plan = json!({
        "destination": "Tokyo",
        "duration": 3,
        "budget": 1000,
        "itinerary": [
            {
                "day": 1,
                "title": "Arrival",
                "activities": [
                    {"time": "14:00", "activity": "Check in", "cost": 150},
                    {"activity": "Stroll around Shinjuku", "notes": "Free"}
                ]
            }
        ],
        "budgetBreakdown": [
            {"category": "Accommodation", "amount": 450, "details": "3 nights"}
        ],
        "totalCost": total_cost
    });
    format!(
        "Here is your itinerary:\n```json\n{}\n```\nHave a great trip!",
        serde_json::to_string_pretty(&plan).unwrap()
    )
}

pub fn tokyo_request() -> Value {
    json!({
        "destination": "Tokyo",
        "duration": 3,
        "budget": 1000,
        "travelerType": "solo",
        "interests": []
    })
}

/// Serves `router` on a random loopback port and returns its base URL.
pub async fn spawn_fake_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake server");
    let address = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    address
}
