use actix_web::http::header::{self, HeaderName};
use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};
use tracing::{error, info};

use crate::error::PredictError;
use crate::extract::parse_reply;
use crate::model::StudentRecord;
use crate::oracle::ChatOracle;
use crate::prompt::Prompt;

pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Headers attached to every response from the prediction endpoint.
pub fn cors_headers() -> [(HeaderName, &'static str); 2] {
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
    ]
}

/// Prompt, one oracle call, then extraction. Nothing here is retried.
///
/// The reply object is returned as parsed so numbers keep their wire form.
pub async fn run_prediction(
    oracle: &dyn ChatOracle,
    record: &StudentRecord,
) -> Result<Map<String, Value>, PredictError> {
    let prompt = Prompt::for_student(record);
    let content = oracle.complete(&prompt).await?;
    parse_reply(&content)
}

async fn predict_performance(
    body: web::Json<StudentRecord>,
    oracle: web::Data<dyn ChatOracle>,
) -> Result<HttpResponse, PredictError> {
    let record = body.into_inner();

    match run_prediction(oracle.get_ref(), &record).await {
        Ok(result) => {
            info!(
                prediction = ?result.get("prediction"),
                confidence = ?result.get("confidence"),
                "prediction complete"
            );
            let mut builder = HttpResponse::Ok();
            for header in cors_headers() {
                builder.insert_header(header);
            }
            Ok(builder.json(result))
        }
        Err(err) => {
            error!(error = %err, "prediction error");
            Err(err)
        }
    }
}

// CORS preflight.
async fn preflight() -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    for header in cors_headers() {
        builder.insert_header(header);
    }
    builder.finish()
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().body("Student Performance Predictor is running!")
}

async fn serve_homepage() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| PredictError::InvalidRequest(err.to_string()).into())
}

/// Registers all routes. The caller provides the oracle as
/// `web::Data<dyn ChatOracle>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/predict-performance")
            .app_data(json_config())
            .route(web::post().to(predict_performance))
            .route(web::method(actix_web::http::Method::OPTIONS).to(preflight)),
    )
    .route("/health", web::get().to(health_check))
    .route("/", web::get().to(serve_homepage));
}
