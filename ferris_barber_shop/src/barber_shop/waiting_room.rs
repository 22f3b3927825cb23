//! This module contains the `WaitingRoom`, the bounded FIFO of customers waiting for the barber.
//!
//! Admission never blocks: a customer either sits down or is told why not. Taking the next
//! customer does block, until someone sits down or the room gets closed. Once closed, the
//! customers already seated are still handed out and only then `NextCustomer::Closed` is returned.

use std::{
    collections::VecDeque,
    sync::{Condvar, Mutex, MutexGuard},
};

use super::customer::Customer;
use crate::BarberShopError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Joined { waiting: usize },
    NoSeats,
    ShopClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextCustomer {
    Customer(Customer),
    Closed,
}

#[derive(Debug, Default)]
struct Chairs {
    queue: VecDeque<Customer>,
    closed: bool,
}

#[derive(Debug)]
pub struct WaitingRoom {
    capacity: usize,
    chairs: Mutex<Chairs>,
    customer_seated: Condvar,
}

/// Exclusive access to the waiting room, held while inspecting or admitting.
pub struct WaitingRoomGuard<'a> {
    capacity: usize,
    chairs: MutexGuard<'a, Chairs>,
    customer_seated: &'a Condvar,
}

impl WaitingRoomGuard<'_> {
    pub fn occupancy(&self) -> usize {
        self.chairs.queue.len()
    }

    pub fn free_chairs(&self) -> usize {
        self.capacity.saturating_sub(self.chairs.queue.len())
    }

    pub fn is_closed(&self) -> bool {
        self.chairs.closed
    }

    pub fn admit(&mut self, customer: Customer) -> Admission {
        if self.chairs.closed {
            return Admission::ShopClosed;
        }
        if self.free_chairs() == 0 {
            return Admission::NoSeats;
        }
        self.chairs.queue.push_back(customer);
        self.customer_seated.notify_one();
        Admission::Joined {
            waiting: self.chairs.queue.len(),
        }
    }
}

impl WaitingRoom {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            chairs: Mutex::new(Chairs {
                queue: VecDeque::with_capacity(capacity),
                closed: false,
            }),
            customer_seated: Condvar::new(),
        }
    }

    pub fn get_capacity(&self) -> usize {
        self.capacity
    }

    pub fn lock(&self) -> Result<WaitingRoomGuard<'_>, BarberShopError> {
        let chairs = self
            .chairs
            .lock()
            .map_err(|err| BarberShopError::PoisonedLock(err.to_string()))?;
        Ok(WaitingRoomGuard {
            capacity: self.capacity,
            chairs,
            customer_seated: &self.customer_seated,
        })
    }

    pub fn try_admit(&self, customer: Customer) -> Result<Admission, BarberShopError> {
        Ok(self.lock()?.admit(customer))
    }

    pub fn take_next(&self) -> Result<NextCustomer, BarberShopError> {
        let chairs = self
            .chairs
            .lock()
            .map_err(|err| BarberShopError::PoisonedLock(err.to_string()))?;
        let mut chairs = self
            .customer_seated
            .wait_while(chairs, |chairs| chairs.queue.is_empty() && !chairs.closed)
            .map_err(|err| BarberShopError::PoisonedLock(err.to_string()))?;

        Ok(match chairs.queue.pop_front() {
            Some(customer) => NextCustomer::Customer(customer),
            None => NextCustomer::Closed,
        })
    }

    /// Returns `true` only for the call that actually closed the room.
    pub fn close(&self) -> Result<bool, BarberShopError> {
        let mut room = self.lock()?;
        let was_open = !room.chairs.closed;
        room.chairs.closed = true;
        room.customer_seated.notify_all();
        Ok(was_open)
    }

    pub fn occupancy(&self) -> Result<usize, BarberShopError> {
        Ok(self.lock()?.occupancy())
    }

    pub fn is_closed(&self) -> Result<bool, BarberShopError> {
        Ok(self.lock()?.is_closed())
    }
}

#[cfg(test)]
mod tests_waiting_room {

    use super::*;

    use std::{
        error::Error,
        sync::{mpsc::channel, Arc},
        thread,
        time::Duration,
    };

    fn customer(millis: u64) -> Customer {
        Customer::new(Duration::from_millis(millis))
    }

    #[test]
    fn test01_second_customer_finds_no_seats() -> Result<(), BarberShopError> {
        let room = WaitingRoom::new(1);
        assert_eq!(
            room.try_admit(customer(1))?,
            Admission::Joined { waiting: 1 }
        );
        assert_eq!(room.try_admit(customer(2))?, Admission::NoSeats);
        assert_eq!(room.occupancy()?, 1);
        Ok(())
    }

    #[test]
    fn test02_no_admission_after_close() -> Result<(), BarberShopError> {
        let room = WaitingRoom::new(5);
        room.close()?;
        for millis in 0..10 {
            assert_eq!(room.try_admit(customer(millis))?, Admission::ShopClosed);
        }
        assert_eq!(room.occupancy()?, 0);
        Ok(())
    }

    #[test]
    fn test03_customers_are_taken_in_arrival_order() -> Result<(), BarberShopError> {
        let room = WaitingRoom::new(3);
        room.try_admit(customer(1))?;
        room.try_admit(customer(2))?;
        room.try_admit(customer(3))?;

        assert_eq!(room.take_next()?, NextCustomer::Customer(customer(1)));
        assert_eq!(room.take_next()?, NextCustomer::Customer(customer(2)));
        assert_eq!(room.take_next()?, NextCustomer::Customer(customer(3)));
        Ok(())
    }

    #[test]
    fn test04_closed_room_is_drained_before_closed_signal() -> Result<(), BarberShopError> {
        let room = WaitingRoom::new(2);
        room.try_admit(customer(1))?;
        room.try_admit(customer(2))?;
        room.close()?;

        assert_eq!(room.take_next()?, NextCustomer::Customer(customer(1)));
        assert_eq!(room.take_next()?, NextCustomer::Customer(customer(2)));
        assert_eq!(room.take_next()?, NextCustomer::Closed);
        assert_eq!(room.take_next()?, NextCustomer::Closed);
        Ok(())
    }

    #[test]
    fn test05_closing_twice_is_harmless() -> Result<(), BarberShopError> {
        let room = WaitingRoom::new(1);
        room.try_admit(customer(1))?;
        assert!(room.close()?);
        assert!(!room.close()?);
        assert!(room.is_closed()?);
        assert_eq!(room.take_next()?, NextCustomer::Customer(customer(1)));
        assert_eq!(room.take_next()?, NextCustomer::Closed);
        Ok(())
    }

    #[test]
    fn test06_close_wakes_up_blocked_taker() -> Result<(), Box<dyn Error>> {
        let room = Arc::new(WaitingRoom::new(1));
        let (tx, rx) = channel();
        let taker_room = room.clone();
        let taker = thread::spawn(move || {
            let _ = tx.send(taker_room.take_next());
        });

        thread::sleep(Duration::from_millis(20));
        assert!(rx.try_recv().is_err());
        room.close()?;

        let next = rx.recv_timeout(Duration::from_secs(2))??;
        assert_eq!(next, NextCustomer::Closed);
        taker.join().map_err(|_| "taker thread panicked")?;
        Ok(())
    }

    #[test]
    fn test07_admission_wakes_up_blocked_taker() -> Result<(), Box<dyn Error>> {
        let room = Arc::new(WaitingRoom::new(1));
        let (tx, rx) = channel();
        let taker_room = room.clone();
        let taker = thread::spawn(move || {
            let _ = tx.send(taker_room.take_next());
        });

        thread::sleep(Duration::from_millis(20));
        room.try_admit(customer(7))?;

        let next = rx.recv_timeout(Duration::from_secs(2))??;
        assert_eq!(next, NextCustomer::Customer(customer(7)));
        taker.join().map_err(|_| "taker thread panicked")?;
        Ok(())
    }

    #[test]
    fn test08_capacity_holds_with_concurrent_arrivals() -> Result<(), Box<dyn Error>> {
        let room = Arc::new(WaitingRoom::new(3));
        let arrivals: Vec<_> = (0..4)
            .map(|_| {
                let room = room.clone();
                thread::spawn(move || -> Result<usize, BarberShopError> {
                    let mut joined = 0;
                    for millis in 0..50 {
                        if let Admission::Joined { waiting } = room.try_admit(customer(millis))? {
                            assert!(waiting <= 3);
                            joined += 1;
                        }
                        assert!(room.occupancy()? <= 3);
                    }
                    Ok(joined)
                })
            })
            .collect();

        let mut joined = 0;
        for arrival in arrivals {
            joined += arrival.join().map_err(|_| "arrival thread panicked")??;
        }
        assert_eq!(joined, 3);
        assert_eq!(room.occupancy()?, 3);
        Ok(())
    }
}
