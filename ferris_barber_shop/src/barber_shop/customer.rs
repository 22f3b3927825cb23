use std::{thread, time::Duration};

use rand::Rng;

use super::config::TimeRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Customer {
    haircut_duration: Duration,
}

impl Customer {
    pub fn new(haircut_duration: Duration) -> Self {
        Customer { haircut_duration }
    }

    pub fn get_haircut_duration(&self) -> Duration {
        self.haircut_duration
    }
}

/// Blocks for a random arrival delay and returns the customer that walked in.
pub fn random_customer_appears<R: Rng + ?Sized>(
    rng: &mut R,
    arrival_delay: &TimeRange,
    haircut_duration: &TimeRange,
) -> Customer {
    thread::sleep(arrival_delay.sample(rng));
    Customer::new(haircut_duration.sample(rng))
}
