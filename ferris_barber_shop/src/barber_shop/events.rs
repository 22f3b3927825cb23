//! Narration of everything that happens in the shop.
//!
//! The barber and the customers report a `ShopEvent` on every step they take. Nothing in the
//! shop depends on what the sink does with them: the default one logs them, the json one prints
//! them one per line and the recording one keeps them around so they can be inspected later.

use serde::Serialize;
use std::sync::{Mutex, PoisonError};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ShopEvent {
    BarberChecksWaitingRoom { waiting: usize },
    BarberFallsAsleep,
    CustomerWakesBarber,
    HaircutStarted { duration_millis: u64 },
    HaircutFinished,
    BarberGoesHome,
    CustomerChecksWaitingRoom { free_chairs: usize },
    CustomerJoined { waiting: usize },
    CustomerLeftNoSeats,
    CustomerLeftShopClosed,
    ShopClosed,
}

/// Best effort output for shop events. Reporting never fails nor blocks the shop for long.
pub trait EventSink: Send + Sync {
    fn report(&self, event: ShopEvent);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNarrator;

impl EventSink for TracingNarrator {
    fn report(&self, event: ShopEvent) {
        match event {
            ShopEvent::BarberChecksWaitingRoom { waiting } => {
                info!("[Barber] Checks the waiting room, {} waiting.", waiting)
            }
            ShopEvent::BarberFallsAsleep => info!("[Barber] No customers, time to sleep!"),
            ShopEvent::CustomerWakesBarber => info!("[Customer] Wakes the barber up."),
            ShopEvent::HaircutStarted { duration_millis } => {
                info!("[Barber] Starts to cut hair ({}ms).", duration_millis)
            }
            ShopEvent::HaircutFinished => info!("[Barber] Haircut finished!"),
            ShopEvent::BarberGoesHome => info!("[Barber] Shop closed! Time to go home."),
            ShopEvent::CustomerChecksWaitingRoom { free_chairs } => info!(
                "[Customer] Checks the waiting room, {} free chairs.",
                free_chairs
            ),
            ShopEvent::CustomerJoined { waiting } => info!(
                "[Customer] Joins the waiting room, {} waiting now.",
                waiting
            ),
            ShopEvent::CustomerLeftNoSeats => {
                info!("[Customer] Leaves because there are no seats available.")
            }
            ShopEvent::CustomerLeftShopClosed => {
                info!("[Customer] Leaves because the shop is closed.")
            }
            ShopEvent::ShopClosed => info!("[Shutdown] The shop is now closed."),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonNarrator;

impl EventSink for JsonNarrator {
    fn report(&self, event: ShopEvent) {
        match serde_json::to_string(&event) {
            Ok(line) => println!("{}", line),
            Err(err) => warn!("[JsonNarrator] Could not serialize {:?}: {}", event, err),
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingNarrator {
    events: Mutex<Vec<ShopEvent>>,
}

impl RecordingNarrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<ShopEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self, event: &ShopEvent) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|recorded| *recorded == event)
            .count()
    }
}

impl EventSink for RecordingNarrator {
    fn report(&self, event: ShopEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

#[cfg(test)]
mod tests_events {

    use super::*;

    #[test]
    fn test01_events_serialize_with_tag() -> Result<(), serde_json::Error> {
        assert_eq!(
            serde_json::to_string(&ShopEvent::CustomerJoined { waiting: 1 })?,
            r#"{"event":"customer_joined","waiting":1}"#
        );
        assert_eq!(
            serde_json::to_string(&ShopEvent::BarberFallsAsleep)?,
            r#"{"event":"barber_falls_asleep"}"#
        );
        Ok(())
    }

    #[test]
    fn test02_recording_narrator_keeps_order() {
        let narrator = RecordingNarrator::new();
        narrator.report(ShopEvent::ShopClosed);
        narrator.report(ShopEvent::CustomerLeftShopClosed);
        narrator.report(ShopEvent::CustomerLeftShopClosed);

        assert_eq!(
            narrator.get_events(),
            vec![
                ShopEvent::ShopClosed,
                ShopEvent::CustomerLeftShopClosed,
                ShopEvent::CustomerLeftShopClosed
            ]
        );
        assert_eq!(narrator.count(&ShopEvent::CustomerLeftShopClosed), 2);
    }
}
