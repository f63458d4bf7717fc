#![allow(dead_code)]

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use performance_predictor::api;
use performance_predictor::oracle::ChatOracle;
use performance_predictor::prompt::Prompt;
use performance_predictor::PredictError;

/// Oracle that answers every prompt the same way and remembers what it saw.
pub struct CannedOracle {
    reply: Result<String, fn() -> PredictError>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<Prompt>>,
}

impl CannedOracle {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(err: fn() -> PredictError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(err),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<Prompt> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatOracle for CannedOracle {
    async fn complete(&self, prompt: &Prompt) -> Result<String, PredictError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.clone());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(make) => Err(make()),
        }
    }
}

/// Runs the predictor on an ephemeral port and returns its base URL.
pub fn spawn_predictor(oracle: Arc<dyn ChatOracle>) -> String {
    let data = web::Data::from(oracle);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .configure(api::configure)
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{addr}")
}

/// A stand-in chat-completion gateway with a fixed answer.
pub struct FakeGateway {
    status: u16,
    body: String,
    seen: Mutex<Vec<(Option<String>, Value)>>,
}

impl FakeGateway {
    pub fn new(status: u16, body: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.into(),
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Gateway reply whose single choice carries `content`.
    pub fn completing(content: &str) -> Arc<Self> {
        let body = serde_json::json!({
            "id": "chatcmpl-test",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": content } }
            ]
        });
        Self::new(200, body.to_string())
    }

    /// Authorization header and JSON body of every request received.
    pub fn seen(&self) -> Vec<(Option<String>, Value)> {
        self.seen.lock().unwrap().clone()
    }
}

async fn fake_completions(
    req: HttpRequest,
    body: web::Json<Value>,
    gateway: web::Data<FakeGateway>,
) -> HttpResponse {
    let auth = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    gateway.seen.lock().unwrap().push((auth, body.into_inner()));

    HttpResponse::build(StatusCode::from_u16(gateway.status).unwrap())
        .content_type("application/json")
        .body(gateway.body.clone())
}

/// Runs a fake gateway and returns its completions URL.
pub fn spawn_gateway(gateway: Arc<FakeGateway>) -> String {
    let data = web::Data::from(gateway);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/v1/chat/completions", web::post().to(fake_completions))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{addr}/v1/chat/completions")
}
