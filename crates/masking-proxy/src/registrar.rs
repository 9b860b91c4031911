//! Ride registration.

use crate::allocator;
use crate::error::RelayError;
use crate::notify::Notifier;
use ride_store::{NewRide, Records, Ride, Store};
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Caller-supplied ride details.
#[derive(Debug, Clone)]
pub struct RideRequest {
    pub customer_id: u64,
    pub driver_id: u64,
    pub start: String,
    pub destination: String,
    pub datetime: String,
}

/// Create a ride: resolve both parties, reserve a proxy number, persist the
/// ride, then text both sides their instructions.
///
/// The availability check and the insert happen under one write guard, so
/// two concurrent registrations can never double-book a proxy number. The
/// notifications happen after the guard is dropped and are advisory:
/// delivery failures are logged and the ride stands.
pub async fn create_ride(
    records: &RwLock<Records>,
    store: &Store,
    notifier: &dyn Notifier,
    request: RideRequest,
) -> Result<Ride, RelayError> {
    let (ride, customer, driver, proxy_number) = {
        let mut records = records.write().await;

        let customer = records
            .customer(request.customer_id)
            .cloned()
            .ok_or(RelayError::UnknownCustomer(request.customer_id))?;
        let driver = records
            .driver(request.driver_id)
            .cloned()
            .ok_or(RelayError::UnknownDriver(request.driver_id))?;

        let proxy = allocator::allocate(&records, customer.id, driver.id)
            .ok_or(RelayError::PoolExhausted)?;

        let ride = records.insert_ride(NewRide {
            start: request.start,
            destination: request.destination,
            datetime: request.datetime,
            customer_id: customer.id,
            driver_id: driver.id,
            proxy_number_id: proxy.id,
        });

        store.save(&records).await?;

        (ride, customer, driver, proxy.phone_number)
    };

    info!(
        ride = ride.id,
        customer = customer.id,
        driver = driver.id,
        proxy = %proxy_number,
        "Ride registered"
    );

    let to_customer = format!(
        "{} will pick you up at {}. Reply to this message or call this number to contact the driver.",
        driver.name, ride.datetime
    );
    if let Err(e) = notifier
        .send(&proxy_number, &customer.phone_number, &to_customer)
        .await
    {
        warn!(recipient = %customer.phone_number, error = %e, "Failed to notify customer");
    }

    let to_driver = format!(
        "{} will wait for you at {}. Reply to this message or call this number to contact the customer.",
        customer.name, ride.datetime
    );
    if let Err(e) = notifier
        .send(&proxy_number, &driver.phone_number, &to_driver)
        .await
    {
        warn!(recipient = %driver.phone_number, error = %e, "Failed to notify driver");
    }

    Ok(ride)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{MockNotifier, TransportError};
    use ride_store::{Customer, Driver, ProxyNumber};

    fn seeded() -> RwLock<Records> {
        let mut records = Records::new();
        records.add_customer(Customer {
            id: 1,
            name: "A".into(),
            phone_number: "100".into(),
        });
        records.add_driver(Driver {
            id: 1,
            name: "B".into(),
            phone_number: "200".into(),
        });
        records.add_proxy_number(ProxyNumber {
            id: 1,
            phone_number: "900".into(),
        });
        RwLock::new(records)
    }

    fn request() -> RideRequest {
        RideRequest {
            customer_id: 1,
            driver_id: 1,
            start: "X".into(),
            destination: "Y".into(),
            datetime: "2024-01-01T10:00".into(),
        }
    }

    #[tokio::test]
    async fn test_create_ride_notifies_both_parties() {
        let records = seeded();
        let store = Store::memory();

        let mut notifier = MockNotifier::new();
        notifier
            .expect_send()
            .withf(|originator, recipient, body| {
                originator == "900"
                    && recipient == "100"
                    && body == "B will pick you up at 2024-01-01T10:00. Reply to this message or call this number to contact the driver."
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        notifier
            .expect_send()
            .withf(|originator, recipient, body| {
                originator == "900"
                    && recipient == "200"
                    && body == "A will wait for you at 2024-01-01T10:00. Reply to this message or call this number to contact the customer."
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let ride = create_ride(&records, &store, &notifier, request())
            .await
            .unwrap();

        assert_eq!(ride.proxy_number_id, 1);
        assert_eq!(records.read().await.rides().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_customer_sends_nothing() {
        let records = seeded();
        let store = Store::memory();
        let notifier = MockNotifier::new();

        let mut req = request();
        req.customer_id = 99;
        let result = create_ride(&records, &store, &notifier, req).await;

        assert!(matches!(result, Err(RelayError::UnknownCustomer(99))));
        assert!(records.read().await.rides().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_driver_sends_nothing() {
        let records = seeded();
        let store = Store::memory();
        let notifier = MockNotifier::new();

        let mut req = request();
        req.driver_id = 99;
        let result = create_ride(&records, &store, &notifier, req).await;

        assert!(matches!(result, Err(RelayError::UnknownDriver(99))));
    }

    #[tokio::test]
    async fn test_second_ride_for_same_pair_is_exhausted() {
        let records = seeded();
        let store = Store::memory();

        let mut notifier = MockNotifier::new();
        notifier.expect_send().times(2).returning(|_, _, _| Ok(()));

        create_ride(&records, &store, &notifier, request())
            .await
            .unwrap();
        let result = create_ride(&records, &store, &notifier, request()).await;

        assert!(matches!(result, Err(RelayError::PoolExhausted)));
        assert_eq!(records.read().await.rides().len(), 1);
    }

    #[tokio::test]
    async fn test_delivery_failure_does_not_unwind_the_ride() {
        let records = seeded();
        let store = Store::memory();

        let mut notifier = MockNotifier::new();
        notifier
            .expect_send()
            .times(2)
            .returning(|_, _, _| Err(TransportError::Unreachable("test outage".into())));

        let result = create_ride(&records, &store, &notifier, request()).await;

        assert!(result.is_ok());
        assert_eq!(records.read().await.rides().len(), 1);
    }
}
