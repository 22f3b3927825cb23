//! Closing of the shop once the opening time is over.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};

use tracing::{debug, info};

use super::{
    events::{EventSink, ShopEvent},
    handler::BarberShop,
};
use crate::BarberShopError;

/// Flips the lifecycle flag and then closes the waiting room, so a barber sleeping on an empty
/// room is woken up with the closed signal. Both locks are taken one after the other, never
/// together. Returns `true` only for the call that actually closed the shop.
pub fn close_shop(shop: &BarberShop, sink: &dyn EventSink) -> Result<bool, BarberShopError> {
    let newly_closed = shop.get_lifecycle().close()?;
    if newly_closed {
        sink.report(ShopEvent::ShopClosed);
    } else {
        debug!("[Shutdown] The shop was already closed.");
    }
    shop.get_waiting_room().close()?;
    Ok(newly_closed)
}

pub fn schedule_closing(
    shop: Arc<BarberShop>,
    open_time: Duration,
    sink: Arc<dyn EventSink>,
) -> JoinHandle<Result<(), BarberShopError>> {
    thread::spawn(move || {
        debug!("[Shutdown] Closing the shop in {:?}.", open_time);
        thread::sleep(open_time);
        info!("[Shutdown] Time is up, closing the shop.");
        close_shop(&shop, sink.as_ref())?;
        Ok(())
    })
}

#[cfg(test)]
mod tests_shutdown {

    use super::*;
    use crate::barber_shop::events::RecordingNarrator;

    use std::{error::Error, time::Instant};

    #[test]
    fn test01_closing_twice_reports_once() -> Result<(), BarberShopError> {
        let shop = BarberShop::new(2);
        let narrator = RecordingNarrator::new();

        assert!(close_shop(&shop, &narrator)?);
        assert!(!close_shop(&shop, &narrator)?);

        assert!(shop.get_lifecycle().is_closed()?);
        assert!(shop.get_waiting_room().is_closed()?);
        assert_eq!(narrator.get_events(), vec![ShopEvent::ShopClosed]);
        Ok(())
    }

    #[test]
    fn test02_scheduled_closing_waits_for_open_time() -> Result<(), Box<dyn Error>> {
        let shop = Arc::new(BarberShop::new(1));
        let narrator = Arc::new(RecordingNarrator::new());
        let start = Instant::now();

        let closing = schedule_closing(shop.clone(), Duration::from_millis(40), narrator.clone());
        assert!(!shop.get_lifecycle().is_closed()?);
        closing.join().map_err(|_| "shutdown thread panicked")??;

        assert!(start.elapsed() >= Duration::from_millis(40));
        assert!(shop.get_lifecycle().is_closed()?);
        assert!(shop.get_waiting_room().is_closed()?);
        assert_eq!(narrator.count(&ShopEvent::ShopClosed), 1);
        Ok(())
    }
}
