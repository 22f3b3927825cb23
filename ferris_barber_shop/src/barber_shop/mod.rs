//! The barber shop: the waiting room, the barber, the customers and the closing timer.

pub mod barber;
pub mod config;
pub mod constants;
pub mod customer;
pub mod customer_flow;
pub mod events;
pub mod handler;
pub mod lifecycle;
pub mod shutdown;
pub mod waiting_room;
