//! This module contains the barber: its status and the loop it runs until the shop closes.
//!
//! Every round the barber looks at the waiting room holding both the waiting room lock and the
//! barber status lock, always in that order. An empty room means going to sleep, unless the shop
//! is already closed, in which case the day is over. The actual sleeping happens while blocked
//! on `WaitingRoom::take_next`, without holding any lock.

use std::{
    sync::{Mutex, MutexGuard},
    thread,
};

use tracing::debug;

use super::{
    events::{EventSink, ShopEvent},
    handler::BarberShop,
    waiting_room::NextCustomer,
};
use crate::BarberShopError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarberStatus {
    #[default]
    Awake,
    Sleeping,
}

#[derive(Debug, Default)]
pub struct Barber {
    status: Mutex<BarberStatus>,
}

impl Barber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> Result<MutexGuard<'_, BarberStatus>, BarberShopError> {
        self.status
            .lock()
            .map_err(|err| BarberShopError::PoisonedLock(err.to_string()))
    }

    pub fn get_status(&self) -> Result<BarberStatus, BarberShopError> {
        Ok(*self.lock()?)
    }
}

/// Runs the barber until the shop is closed and the waiting room is empty.
/// Returns the number of haircuts done.
pub fn barber_flow(shop: &BarberShop, sink: &dyn EventSink) -> Result<usize, BarberShopError> {
    let mut haircuts_done = 0;

    loop {
        {
            let room = shop.get_waiting_room().lock()?;
            let mut status = shop.get_barber().lock()?;
            sink.report(ShopEvent::BarberChecksWaitingRoom {
                waiting: room.occupancy(),
            });

            if room.occupancy() == 0 {
                if shop.get_lifecycle().is_closed()? {
                    sink.report(ShopEvent::BarberGoesHome);
                    return Ok(haircuts_done);
                }
                sink.report(ShopEvent::BarberFallsAsleep);
                *status = BarberStatus::Sleeping;
            }
        }

        let customer = match shop.get_waiting_room().take_next()? {
            NextCustomer::Customer(customer) => customer,
            NextCustomer::Closed => {
                debug!("[Barber] Waiting room closed while sleeping.");
                sink.report(ShopEvent::BarberGoesHome);
                return Ok(haircuts_done);
            }
        };

        {
            let mut status = shop.get_barber().lock()?;
            if *status == BarberStatus::Sleeping {
                sink.report(ShopEvent::CustomerWakesBarber);
                *status = BarberStatus::Awake;
            }
        }

        sink.report(ShopEvent::HaircutStarted {
            duration_millis: customer.get_haircut_duration().as_millis() as u64,
        });
        thread::sleep(customer.get_haircut_duration());
        sink.report(ShopEvent::HaircutFinished);
        haircuts_done += 1;
    }
}
