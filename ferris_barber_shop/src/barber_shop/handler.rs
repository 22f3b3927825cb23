//! This module contains the logic for opening the barber shop.
//! It starts the shutdown timer, the barber thread and the customers thread, and waits for all
//! of them to finish before reporting how the day went.

use super::{
    barber::{self, Barber},
    config::ShopConfig,
    customer_flow::{self, ArrivalStats},
    events::EventSink,
    lifecycle::ShopLifecycle,
    shutdown,
    waiting_room::WaitingRoom,
};
use crate::BarberShopError;
use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};
use tracing::{error, info};

/// State shared by the barber, the customers and the shutdown timer.
#[derive(Debug)]
pub struct BarberShop {
    waiting_room: WaitingRoom,
    barber: Barber,
    lifecycle: ShopLifecycle,
}

impl BarberShop {
    pub fn new(waiting_room_capacity: usize) -> Self {
        Self {
            waiting_room: WaitingRoom::new(waiting_room_capacity),
            barber: Barber::new(),
            lifecycle: ShopLifecycle::new(),
        }
    }

    pub fn get_waiting_room(&self) -> &WaitingRoom {
        &self.waiting_room
    }

    pub fn get_barber(&self) -> &Barber {
        &self.barber
    }

    pub fn get_lifecycle(&self) -> &ShopLifecycle {
        &self.lifecycle
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ShopReport {
    pub customers_served: usize,
    pub customers_joined: usize,
    pub turned_away_no_seats: usize,
    pub turned_away_closed: usize,
}

pub fn start(
    config: ShopConfig,
    sink: Arc<dyn EventSink>,
) -> Result<ShopReport, BarberShopError> {
    info!(
        "[BarberShop] Opening with {} waiting room chairs for {:?}.",
        config.waiting_room_capacity, config.open_time
    );
    let shop = Arc::new(BarberShop::new(config.waiting_room_capacity));

    let shutdown_handle = shutdown::schedule_closing(shop.clone(), config.open_time, sink.clone());
    let barber_handle = start_barber(shop.clone(), sink.clone());
    let customers_handle = start_customers(shop, &config, sink);

    let customers_served = join_worker(barber_handle, "barber");
    let arrivals = join_worker(customers_handle, "customers");
    let closing = join_worker(shutdown_handle, "shutdown");

    let customers_served = customers_served?;
    let arrivals = arrivals?;
    closing?;

    Ok(ShopReport {
        customers_served,
        customers_joined: arrivals.joined,
        turned_away_no_seats: arrivals.turned_away_no_seats,
        turned_away_closed: arrivals.turned_away_closed,
    })
}

fn start_barber(
    shop: Arc<BarberShop>,
    sink: Arc<dyn EventSink>,
) -> JoinHandle<Result<usize, BarberShopError>> {
    thread::spawn(move || barber::barber_flow(&shop, sink.as_ref()))
}

fn start_customers(
    shop: Arc<BarberShop>,
    config: &ShopConfig,
    sink: Arc<dyn EventSink>,
) -> JoinHandle<Result<ArrivalStats, BarberShopError>> {
    let arrival_delay = config.arrival_delay;
    let haircut_duration = config.haircut_duration;
    thread::spawn(move || {
        let mut rng = rand::thread_rng();
        customer_flow::customer_flow(
            &shop,
            &arrival_delay,
            &haircut_duration,
            &mut rng,
            sink.as_ref(),
        )
    })
}

fn join_worker<T>(
    handle: JoinHandle<Result<T, BarberShopError>>,
    name: &str,
) -> Result<T, BarberShopError> {
    handle
        .join()
        .map_err(|_| {
            error!("[BarberShop] The {} thread panicked.", name);
            BarberShopError::ThreadPanicked(format!("Error joining {} thread.", name))
        })?
        .map_err(|err| {
            error!("[BarberShop] The {} thread failed: {}", name, err);
            err
        })
}
