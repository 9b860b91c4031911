//! Record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer who books rides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    pub id: u64,
    pub name: String,
    /// Real number; never shown to drivers.
    pub phone_number: String,
}

/// A driver who accepts rides. Structurally a mirror of [`Customer`], but
/// the two are never matched against each other.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Driver {
    pub id: u64,
    pub name: String,
    /// Real number; never shown to customers.
    pub phone_number: String,
}

/// A carrier-leased number used as the stand-in originator and recipient
/// for both parties of a ride.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProxyNumber {
    pub id: u64,
    pub phone_number: String,
}

/// One reservation of a proxy number for a customer/driver pair. Created
/// once by the registrar, never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ride {
    pub id: u64,
    pub start: String,
    pub destination: String,
    /// Scheduled pickup time, kept as the caller-supplied text.
    pub datetime: String,
    pub customer_id: u64,
    pub driver_id: u64,
    pub proxy_number_id: u64,
    /// When the ride was registered.
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by the registrar when appending a ride.
#[derive(Debug, Clone)]
pub struct NewRide {
    pub start: String,
    pub destination: String,
    pub datetime: String,
    pub customer_id: u64,
    pub driver_id: u64,
    pub proxy_number_id: u64,
}

/// The three phone numbers of a matched ride, as needed for relaying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideContacts {
    pub customer_number: String,
    pub driver_number: String,
    pub proxy_number: String,
}

impl RideContacts {
    /// The other party's number, given the sender's. `None` when the source
    /// is neither party; unreachable after a proxy+party match, but the
    /// guard stays.
    pub fn counterpart_of(&self, source_number: &str) -> Option<&str> {
        if source_number == self.customer_number {
            Some(&self.driver_number)
        } else if source_number == self.driver_number {
            Some(&self.customer_number)
        } else {
            None
        }
    }
}

/// Ride joined with the party names and the proxy number, for listings.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RideSummary {
    pub customer: String,
    pub driver: String,
    pub start: String,
    pub destination: String,
    pub datetime: String,
    pub number: String,
}
