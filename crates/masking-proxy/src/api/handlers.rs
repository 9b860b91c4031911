//! HTTP request handlers.

use super::types::{
    CreateRideForm, HealthResponse, InboundCallQuery, InboundMessageForm, OverviewResponse,
};
use super::AppState;
use crate::error::RelayError;
use crate::registrar::{self, RideRequest};
use crate::resolver;
use axum::extract::{Form, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;

/// Plain-text answer when no eligible number remains for a pair. Served
/// with HTTP 200; the booking form shows it verbatim.
const EXHAUSTED_MESSAGE: &str = "No number available! Please extend your pool.";

/// Fixed acknowledgment for the SMS webhook. The carrier never parses it.
const WEBHOOK_ACK: &str = "OK";

/// Operational overview of the record set.
pub async fn overview(State(state): State<AppState>) -> Json<OverviewResponse> {
    let records = state.records.read().await;

    Json(OverviewResponse {
        proxy_numbers: records.proxy_numbers().to_vec(),
        rides: records.ride_summaries(),
        customers: records.customers().to_vec(),
        drivers: records.drivers().to_vec(),
    })
}

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let records = state.records.read().await;
    let carrier_healthy = state.notifier.health_check().await;

    Json(HealthResponse {
        status: "ok".to_string(),
        customers: records.customers().len(),
        drivers: records.drivers().len(),
        proxy_numbers: records.proxy_numbers().len(),
        rides: records.rides().len(),
        carrier_healthy,
    })
}

/// Register a ride and notify both parties.
pub async fn create_ride(
    State(state): State<AppState>,
    Form(form): Form<CreateRideForm>,
) -> Result<Response, RelayError> {
    let request = RideRequest {
        customer_id: form.customer,
        driver_id: form.driver,
        start: form.start,
        destination: form.destination,
        datetime: form.datetime,
    };

    match registrar::create_ride(
        &state.records,
        &state.store,
        state.notifier.as_ref(),
        request,
    )
    .await
    {
        Ok(_ride) => Ok(Redirect::to("/").into_response()),
        // Exhaustion is an instruction to the operator, not an error
        // status.
        Err(RelayError::PoolExhausted) => Ok((StatusCode::OK, EXHAUSTED_MESSAGE).into_response()),
        Err(e) => Err(e),
    }
}

/// Inbound SMS webhook.
///
/// Always acknowledges with a fixed body, whatever the match outcome; the
/// carrier ignores response bodies and a generic answer leaks nothing to
/// the remote party.
pub async fn inbound_message(
    State(state): State<AppState>,
    Form(form): Form<InboundMessageForm>,
) -> &'static str {
    resolver::relay_message(
        &state.records,
        state.notifier.as_ref(),
        &form.originator,
        &form.payload,
        &form.recipient,
    )
    .await;

    WEBHOOK_ACK
}

/// Inbound voice webhook. Answers with call-control markup.
pub async fn inbound_voice(
    State(state): State<AppState>,
    Query(query): Query<InboundCallQuery>,
) -> Response {
    let instruction =
        resolver::resolve_call(&state.records, &query.source, &query.destination).await;

    (
        [(header::CONTENT_TYPE, "application/xml")],
        instruction.to_xml(),
    )
        .into_response()
}
