//! API request and response types.

use ride_store::{Customer, Driver, ProxyNumber, RideSummary};
use serde::{Deserialize, Serialize};

/// `POST /createride` form body, as submitted by the booking form.
#[derive(Debug, Deserialize)]
pub struct CreateRideForm {
    pub customer: u64,
    pub driver: u64,
    pub start: String,
    pub destination: String,
    pub datetime: String,
}

/// `POST /webhook` form body, as delivered by the SMS carrier.
#[derive(Debug, Deserialize)]
pub struct InboundMessageForm {
    pub originator: String,
    pub payload: String,
    pub recipient: String,
}

/// `GET /webhook-voice` query, as delivered by the voice carrier.
#[derive(Debug, Deserialize)]
pub struct InboundCallQuery {
    pub source: String,
    pub destination: String,
}

/// Operational overview of everything the relay knows.
#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub proxy_numbers: Vec<ProxyNumber>,
    pub rides: Vec<RideSummary>,
    pub customers: Vec<Customer>,
    pub drivers: Vec<Driver>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub customers: usize,
    pub drivers: usize,
    pub proxy_numbers: usize,
    pub rides: usize,
    pub carrier_healthy: bool,
}
