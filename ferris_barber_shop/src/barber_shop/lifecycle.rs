use std::sync::{Mutex, MutexGuard};

use crate::BarberShopError;

/// Open/closed state of the shop. It goes from open to closed once and never back.
#[derive(Debug, Default)]
pub struct ShopLifecycle {
    closed: Mutex<bool>,
}

impl ShopLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// The guard derefs to the `closed` flag.
    pub fn lock(&self) -> Result<MutexGuard<'_, bool>, BarberShopError> {
        self.closed
            .lock()
            .map_err(|err| BarberShopError::PoisonedLock(err.to_string()))
    }

    pub fn is_closed(&self) -> Result<bool, BarberShopError> {
        Ok(*self.lock()?)
    }

    /// Returns `true` only for the call that actually closed the shop.
    pub fn close(&self) -> Result<bool, BarberShopError> {
        let mut closed = self.lock()?;
        let was_open = !*closed;
        *closed = true;
        Ok(was_open)
    }
}

#[cfg(test)]
mod tests_lifecycle {

    use super::*;

    #[test]
    fn test01_shop_starts_open() -> Result<(), BarberShopError> {
        assert!(!ShopLifecycle::new().is_closed()?);
        Ok(())
    }

    #[test]
    fn test02_closing_twice_is_harmless() -> Result<(), BarberShopError> {
        let lifecycle = ShopLifecycle::new();
        assert!(lifecycle.close()?);
        assert!(!lifecycle.close()?);
        assert!(lifecycle.is_closed()?);
        Ok(())
    }
}
