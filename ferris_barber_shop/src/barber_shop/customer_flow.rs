//! The stream of customers arriving at the shop.
//!
//! Customers keep walking in at random intervals. Each one looks at the waiting room while
//! holding the waiting room lock and the shop lifecycle lock, in that order, and either sits
//! down or leaves. A closed shop wins over a full waiting room, and the first customer that finds
//! the shop closed ends the stream.

use rand::Rng;
use tracing::debug;

use super::{
    config::TimeRange,
    customer::random_customer_appears,
    events::{EventSink, ShopEvent},
    handler::BarberShop,
    waiting_room::Admission,
};
use crate::BarberShopError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArrivalStats {
    pub joined: usize,
    pub turned_away_no_seats: usize,
    pub turned_away_closed: usize,
}

impl ArrivalStats {
    fn record(&mut self, admission: Admission, sink: &dyn EventSink) {
        match admission {
            Admission::Joined { waiting } => {
                self.joined += 1;
                sink.report(ShopEvent::CustomerJoined { waiting });
            }
            Admission::NoSeats => {
                self.turned_away_no_seats += 1;
                sink.report(ShopEvent::CustomerLeftNoSeats);
            }
            Admission::ShopClosed => {
                self.turned_away_closed += 1;
                sink.report(ShopEvent::CustomerLeftShopClosed);
            }
        }
    }

    pub fn total(&self) -> usize {
        self.joined + self.turned_away_no_seats + self.turned_away_closed
    }
}

pub fn customer_flow<R: Rng + ?Sized>(
    shop: &BarberShop,
    arrival_delay: &TimeRange,
    haircut_duration: &TimeRange,
    rng: &mut R,
    sink: &dyn EventSink,
) -> Result<ArrivalStats, BarberShopError> {
    let mut stats = ArrivalStats::default();

    loop {
        let customer = random_customer_appears(rng, arrival_delay, haircut_duration);

        let mut room = shop.get_waiting_room().lock()?;
        let closed = shop.get_lifecycle().lock()?;
        sink.report(ShopEvent::CustomerChecksWaitingRoom {
            free_chairs: room.free_chairs(),
        });

        let admission = if *closed {
            Admission::ShopClosed
        } else {
            room.admit(customer)
        };
        stats.record(admission, sink);

        if *closed {
            debug!(
                "[Customer] No more customers today, {} arrived.",
                stats.total()
            );
            return Ok(stats);
        }
    }
}
