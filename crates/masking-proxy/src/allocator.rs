//! Proxy number allocation.

use ride_store::{ProxyNumber, Records};

/// Pick a proxy number never used in any ride involving this customer or
/// this driver, so neither party sees a number recur across unrelated
/// rides. Returns `None` when the pool holds no eligible number for the
/// pair; callers treat that as an expected outcome, not a fault.
///
/// Any eligible number is acceptable; this takes the first in pool order.
pub fn allocate(records: &Records, customer_id: u64, driver_id: u64) -> Option<ProxyNumber> {
    let used = records.used_proxy_ids(customer_id, driver_id);
    records
        .proxy_numbers()
        .iter()
        .find(|p| !used.contains(&p.id))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ride_store::{Customer, Driver, NewRide};

    fn seeded(proxy_count: u64) -> Records {
        let mut records = Records::new();
        for id in 1..=3 {
            records.add_customer(Customer {
                id,
                name: format!("Customer {}", id),
                phone_number: format!("1{:02}", id),
            });
            records.add_driver(Driver {
                id,
                name: format!("Driver {}", id),
                phone_number: format!("2{:02}", id),
            });
        }
        for id in 1..=proxy_count {
            records.add_proxy_number(ProxyNumber {
                id,
                phone_number: format!("9{:02}", id),
            });
        }
        records
    }

    fn book(records: &mut Records, customer_id: u64, driver_id: u64, proxy_number_id: u64) {
        records.insert_ride(NewRide {
            start: "A".into(),
            destination: "B".into(),
            datetime: "2024-01-01T10:00".into(),
            customer_id,
            driver_id,
            proxy_number_id,
        });
    }

    #[test]
    fn test_fresh_pair_gets_first_number() {
        let records = seeded(2);

        let proxy = allocate(&records, 1, 1).unwrap();

        assert_eq!(proxy.id, 1);
    }

    #[test]
    fn test_number_used_by_customer_is_skipped() {
        let mut records = seeded(2);
        // Customer 1 already saw proxy 1, with a different driver.
        book(&mut records, 1, 2, 1);

        let proxy = allocate(&records, 1, 1).unwrap();

        assert_eq!(proxy.id, 2);
    }

    #[test]
    fn test_number_used_by_driver_is_skipped() {
        let mut records = seeded(2);
        // Driver 1 already saw proxy 1, with a different customer.
        book(&mut records, 2, 1, 1);

        let proxy = allocate(&records, 1, 1).unwrap();

        assert_eq!(proxy.id, 2);
    }

    #[test]
    fn test_unrelated_ride_does_not_block() {
        let mut records = seeded(1);
        book(&mut records, 2, 2, 1);

        let proxy = allocate(&records, 1, 1).unwrap();

        assert_eq!(proxy.id, 1);
    }

    #[test]
    fn test_exhaustion_returns_none() {
        let mut records = seeded(2);
        book(&mut records, 1, 2, 1);
        book(&mut records, 2, 1, 2);

        // Proxy 1 is blocked by customer 1, proxy 2 by driver 1.
        assert!(allocate(&records, 1, 1).is_none());
    }

    #[test]
    fn test_allocation_never_conflicts_with_existing_rides() {
        let mut records = seeded(3);
        book(&mut records, 1, 1, 1);
        book(&mut records, 1, 2, 2);

        let proxy = allocate(&records, 1, 3).unwrap();

        for ride in records.rides() {
            assert!(
                ride.proxy_number_id != proxy.id
                    || (ride.customer_id != 1 && ride.driver_id != 3)
            );
        }
    }
}
