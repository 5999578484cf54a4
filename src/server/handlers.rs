//! HTTP handlers for the screening routes.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::adapters::ArtifactSummary;
use crate::application::AssemblyError;
use crate::domain::Observation;
use crate::ports::{Classifier, Scaler};
use crate::GlyscreenError;

use super::AppState;

/// Successful screening answer.
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub result: String,
    pub message: String,
    pub advice: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Error body for every non-2xx answer.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Gender categories the encoder accepts, for the form dropdown.
#[derive(Debug, Serialize)]
pub struct GendersResponse {
    pub genders: Vec<String>,
}

/// Liveness answer with the loaded artifact digest.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub artifacts: ArtifactSummary,
}

/// `GET /` - the screening form.
pub async fn form_page() -> Html<&'static str> {
    Html(FORM_PAGE)
}

/// `GET /genders` - categories for the form dropdown.
pub async fn list_genders<S, C>(State(state): State<Arc<AppState<S, C>>>) -> Json<GendersResponse>
where
    S: Scaler + 'static,
    C: Classifier + 'static,
{
    Json(GendersResponse {
        genders: state.service.known_genders(),
    })
}

/// `GET /health` - liveness plus the loaded artifact digest.
pub async fn health<S, C>(State(state): State<Arc<AppState<S, C>>>) -> Json<HealthResponse>
where
    S: Scaler + 'static,
    C: Classifier + 'static,
{
    Json(HealthResponse {
        status: "ok",
        started_at: state.started_at,
        artifacts: state.summary.clone(),
    })
}

/// `POST /predict` - run the screening pipeline on one observation.
pub async fn predict<S, C>(
    State(state): State<Arc<AppState<S, C>>>,
    payload: Result<Json<Observation>, JsonRejection>,
) -> Response
where
    S: Scaler + 'static,
    C: Classifier + 'static,
{
    let Json(observation) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            tracing::debug!("Rejected request body: {rejection}");
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text());
        }
    };

    match state.service.predict(&observation) {
        Ok(prediction) => {
            let response = PredictionResponse {
                result: prediction.label.to_string(),
                message: format!("Diabetes Prediction: {}", prediction.label),
                advice: prediction.label.advice().to_string(),
                confidence: prediction.confidence,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => {
            let status = status_for(&err);
            if status.is_server_error() {
                tracing::error!("Prediction failed: {err}");
            } else {
                tracing::debug!("Rejected observation: {err}");
            }
            error_response(status, err.to_string())
        }
    }
}

/// Map pipeline errors onto status codes: caller mistakes answer 422,
/// artifact and math failures answer 500.
fn status_for(err: &GlyscreenError) -> StatusCode {
    match err {
        GlyscreenError::Validation(_)
        | GlyscreenError::Assembly(AssemblyError::UnknownCategory(_)) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

const FORM_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<title>Diabetes Screening</title>
<style>
  body { font-family: sans-serif; max-width: 480px; margin: 40px auto; }
  label { display: block; margin-top: 12px; }
  input, select { width: 100%; padding: 6px; margin-top: 4px; }
  button { margin-top: 16px; padding: 8px 24px; }
  .optional { color: #666; font-size: 0.85em; }
  #result { margin-top: 20px; padding: 12px; display: none; }
  #result.yes { background: #fde8e8; }
  #result.no { background: #e8f5e9; }
</style>
</head>
<body>
<h2>Diabetes Screening</h2>
<form id="screening">
  <label>Age <input name="age" type="number" min="1" max="120" required></label>
  <label>Gender <select name="gender" id="gender" required></select></label>
  <label>HbA1c (%) <input name="hba1c" type="number" step="0.1" min="0" max="20" required></label>
  <label>BMI <span class="optional">(optional)</span> <input name="bmi" type="number" step="0.1"></label>
  <label>Cholesterol <span class="optional">(optional)</span> <input name="cholesterol" type="number" step="0.1"></label>
  <label>Triglycerides <span class="optional">(optional)</span> <input name="triglycerides" type="number" step="0.1"></label>
  <button type="submit">Predict</button>
</form>
<div id="result"></div>
<script>
fetch('/genders')
  .then(function (r) { return r.json(); })
  .then(function (body) {
    var select = document.getElementById('gender');
    body.genders.forEach(function (g) {
      var option = document.createElement('option');
      option.value = g;
      option.textContent = g;
      select.appendChild(option);
    });
  });

document.getElementById('screening').addEventListener('submit', function (event) {
  event.preventDefault();
  var form = new FormData(event.target);
  var payload = {
    age: parseInt(form.get('age'), 10),
    gender: form.get('gender'),
    hba1c: parseFloat(form.get('hba1c'))
  };
  ['bmi', 'cholesterol', 'triglycerides'].forEach(function (field) {
    var value = form.get(field);
    if (value) { payload[field] = parseFloat(value); }
  });

  fetch('/predict', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(payload)
  })
    .then(function (r) { return r.json(); })
    .then(function (body) {
      var result = document.getElementById('result');
      result.style.display = 'block';
      if (body.error) {
        result.className = '';
        result.textContent = body.error;
        return;
      }
      result.className = body.result === 'Yes' ? 'yes' : 'no';
      var text = body.message + ' - ' + body.advice;
      if (body.confidence !== undefined) {
        text += ' (confidence ' + body.confidence.toFixed(1) + '%)';
      }
      result.textContent = text;
    });
});
</script>
</body>
</html>
"#;
