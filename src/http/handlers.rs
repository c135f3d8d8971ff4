//! JSON API handlers.

use axum::{body::Bytes, extract::State, response::Html, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::request::lenient_json;
use crate::http::response::ApiResult;
use crate::http::server::AppState;
use crate::zones::{Levels, Measurement, ZoneError, ZoneState};

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Deserialize)]
struct MeasurePayload {
    db: Option<f64>,
    rms: Option<f64>,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.index_html.to_string())
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn get_levels(State(state): State<AppState>) -> Json<Levels> {
    Json(state.zones.levels())
}

pub async fn set_levels(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Levels>> {
    let payload = lenient_json(&body);
    let levels = state.zones.update_levels(&payload)?;
    Ok(Json(levels))
}

pub async fn get_state(State(state): State<AppState>) -> Json<ZoneState> {
    Json(state.zones.state())
}

pub async fn update_state(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<ZoneState>> {
    let payload = lenient_json(&body);
    let label = payload
        .get("label")
        .and_then(Value::as_str)
        .ok_or(ZoneError::InvalidLabel)?;

    Ok(Json(state.zones.record_label(label)?))
}

pub async fn reset_state(State(state): State<AppState>) -> Json<ZoneState> {
    Json(state.zones.reset())
}

/// Classify a reading given as `{"db": f}` or `{"rms": f}`; `db` wins if both are set.
pub async fn measure(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Measurement>> {
    let payload = lenient_json(&body);
    let reading =
        MeasurePayload::deserialize(&payload).map_err(|_| ZoneError::InvalidMeasurement)?;

    let measurement = match (reading.db, reading.rms) {
        (Some(db), _) => state.zones.record_measurement(db)?,
        (None, Some(rms)) => state.zones.record_rms(rms)?,
        (None, None) => return Err(ZoneError::InvalidMeasurement.into()),
    };
    Ok(Json(measurement))
}
