//! The in-memory record set and its routing queries.

use crate::types::{
    Customer, Driver, NewRide, ProxyNumber, Ride, RideContacts, RideSummary,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Every record the relay knows about.
///
/// Collections keep insertion order, and all matching is first-hit in that
/// order. When several rides fit an inbound (source, proxy) pair, the first
/// registered one wins; there is no recency policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Records {
    #[serde(default)]
    customers: Vec<Customer>,
    #[serde(default)]
    drivers: Vec<Driver>,
    #[serde(default)]
    proxy_numbers: Vec<ProxyNumber>,
    #[serde(default)]
    rides: Vec<Ride>,
}

impl Records {
    /// Create an empty record set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_customer(&mut self, customer: Customer) {
        self.customers.push(customer);
    }

    pub fn add_driver(&mut self, driver: Driver) {
        self.drivers.push(driver);
    }

    pub fn add_proxy_number(&mut self, proxy_number: ProxyNumber) {
        self.proxy_numbers.push(proxy_number);
    }

    /// Look up a customer by id.
    pub fn customer(&self, id: u64) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Look up a driver by id.
    pub fn driver(&self, id: u64) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.id == id)
    }

    /// Look up a proxy number by id.
    pub fn proxy_number(&self, id: u64) -> Option<&ProxyNumber> {
        self.proxy_numbers.iter().find(|p| p.id == id)
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    /// The proxy number pool, in provisioning order.
    pub fn proxy_numbers(&self) -> &[ProxyNumber] {
        &self.proxy_numbers
    }

    pub fn rides(&self) -> &[Ride] {
        &self.rides
    }

    /// Proxy number ids already bound to a ride involving the given
    /// customer or the given driver, regardless of the other party.
    pub fn used_proxy_ids(&self, customer_id: u64, driver_id: u64) -> HashSet<u64> {
        self.rides
            .iter()
            .filter(|r| r.customer_id == customer_id || r.driver_id == driver_id)
            .map(|r| r.proxy_number_id)
            .collect()
    }

    /// Append a ride, assigning the next id.
    pub fn insert_ride(&mut self, new_ride: NewRide) -> Ride {
        let id = self.rides.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let ride = Ride {
            id,
            start: new_ride.start,
            destination: new_ride.destination,
            datetime: new_ride.datetime,
            customer_id: new_ride.customer_id,
            driver_id: new_ride.driver_id,
            proxy_number_id: new_ride.proxy_number_id,
            created_at: Utc::now(),
        };
        self.rides.push(ride.clone());
        ride
    }

    /// The contacts of a ride whose proxy number equals `proxy_number` and
    /// where `party_number` is either party's real number. First inserted
    /// ride wins when several match. Rides with a missing referent are
    /// skipped, as an inner join would drop them.
    pub fn find_ride_by_proxy_and_party(
        &self,
        proxy_number: &str,
        party_number: &str,
    ) -> Option<RideContacts> {
        self.rides.iter().find_map(|r| {
            let proxy = self.proxy_number(r.proxy_number_id)?;
            if proxy.phone_number != proxy_number {
                return None;
            }
            let customer = self.customer(r.customer_id)?;
            let driver = self.driver(r.driver_id)?;
            if customer.phone_number == party_number || driver.phone_number == party_number {
                Some(RideContacts {
                    customer_number: customer.phone_number.clone(),
                    driver_number: driver.phone_number.clone(),
                    proxy_number: proxy.phone_number.clone(),
                })
            } else {
                None
            }
        })
    }

    /// Rides joined with party names and the proxy number, in registration
    /// order.
    pub fn ride_summaries(&self) -> Vec<RideSummary> {
        self.rides
            .iter()
            .filter_map(|r| {
                Some(RideSummary {
                    customer: self.customer(r.customer_id)?.name.clone(),
                    driver: self.driver(r.driver_id)?.name.clone(),
                    start: r.start.clone(),
                    destination: r.destination.clone(),
                    datetime: r.datetime.clone(),
                    number: self.proxy_number(r.proxy_number_id)?.phone_number.clone(),
                })
            })
            .collect()
    }
}
