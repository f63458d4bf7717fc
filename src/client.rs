//! Caller side of the prediction endpoint.
//!
//! `PredictionClient` validates a record and sends it. `PredictionSession`
//! wraps a client with an explicit `RequestState` so that at most one request
//! is outstanding.

use reqwest::Client;
use tracing::{error, info, warn};

use crate::error::ClientError;
use crate::model::{PredictionOutcome, PredictionResult, StudentRecord};
use crate::validation::validate;

pub const PREDICT_PATH: &str = "/predict-performance";

#[derive(Clone)]
pub struct PredictionClient {
    http: Client,
    endpoint: String,
}

impl PredictionClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), PREDICT_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Validates the record, then issues exactly one request for it.
    pub async fn predict(&self, record: &StudentRecord) -> Result<PredictionOutcome, ClientError> {
        check(record)?;
        self.send(record).await
    }

    async fn send(&self, record: &StudentRecord) -> Result<PredictionOutcome, ClientError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(record)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "prediction request failed");
                ClientError::Failed { status: None }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), %body, "prediction endpoint returned an error");
            return Err(ClientError::Failed {
                status: Some(status.as_u16()),
            });
        }

        let result: PredictionResult = response.json().await.map_err(|e| {
            error!(error = %e, "unreadable prediction response");
            ClientError::Failed {
                status: Some(status.as_u16()),
            }
        })?;

        // The endpoint does not echo the record, so the submitted one is used.
        let outcome = PredictionOutcome::new(result, record.clone());
        info!("{}", outcome.notice());
        Ok(outcome)
    }
}

fn check(record: &StudentRecord) -> Result<(), ClientError> {
    validate(record).map_err(|e| {
        warn!(field = e.field(), "{}", e);
        ClientError::from(e)
    })
}

/// Where a session is in its request lifecycle.
#[derive(Debug, Clone, Default)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
    Succeeded(PredictionOutcome),
    Failed(ClientError),
}

impl RequestState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }

    /// Moves to `InFlight`. Any previous result or failure is discarded.
    pub fn begin(&mut self) -> Result<(), ClientError> {
        if self.is_in_flight() {
            return Err(ClientError::Busy);
        }
        *self = Self::InFlight;
        Ok(())
    }

    pub fn outcome(&self) -> Option<&PredictionOutcome> {
        match self {
            Self::Succeeded(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Holds a state in `InFlight` until landed. If dropped before landing the
/// state falls back to `Idle`.
struct Flight<'a> {
    state: &'a mut RequestState,
}

impl<'a> Flight<'a> {
    fn begin(state: &'a mut RequestState) -> Result<Self, ClientError> {
        state.begin()?;
        Ok(Self { state })
    }

    fn land(
        mut self,
        result: Result<PredictionOutcome, ClientError>,
    ) -> Result<PredictionOutcome, ClientError> {
        *self.state = match &result {
            Ok(outcome) => RequestState::Succeeded(outcome.clone()),
            Err(err) => RequestState::Failed(err.clone()),
        };
        result
    }
}

impl Drop for Flight<'_> {
    fn drop(&mut self) {
        if self.state.is_in_flight() {
            *self.state = RequestState::Idle;
        }
    }
}

pub struct PredictionSession {
    client: PredictionClient,
    state: RequestState,
}

impl PredictionSession {
    pub fn new(client: PredictionClient) -> Self {
        Self {
            client,
            state: RequestState::Idle,
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Submits one record.
    ///
    /// A validation failure leaves the current state untouched. Otherwise the
    /// state goes through `InFlight` and ends as `Succeeded` or `Failed`.
    pub async fn submit(&mut self, record: StudentRecord) -> Result<PredictionOutcome, ClientError> {
        check(&record)?;

        let flight = Flight::begin(&mut self.state)?;
        let result = self.client.send(&record).await;
        flight.land(result)
    }
}
