//! Configuration of a barber shop run.

use std::{str::FromStr, time::Duration};

use rand::Rng;

use super::constants::*;
use crate::BarberShopError;

/// Bounded interval from which arrival delays and haircut durations are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    min: Duration,
    max: Duration,
}

impl TimeRange {
    pub fn new(min: Duration, max: Duration) -> Result<Self, BarberShopError> {
        if min > max {
            return Err(BarberShopError::ArgsParsingError(format!(
                "Invalid time range: {:?} is greater than {:?}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn from_millis(min: u64, max: u64) -> Result<Self, BarberShopError> {
        Self::new(Duration::from_millis(min), Duration::from_millis(max))
    }

    pub fn fixed(duration: Duration) -> Self {
        Self {
            min: duration,
            max: duration,
        }
    }

    pub fn get_min(&self) -> Duration {
        self.min
    }

    pub fn get_max(&self) -> Duration {
        self.max
    }

    /// Uniform draw, both bounds included.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = BarberShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            TEXT_OUTPUT => Ok(OutputFormat::Text),
            JSON_OUTPUT => Ok(OutputFormat::Json),
            _ => Err(BarberShopError::ArgsParsingError(format!(
                "Unknown output format: {}. Available formats: {}, {}.",
                s, TEXT_OUTPUT, JSON_OUTPUT
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    pub waiting_room_capacity: usize,
    pub open_time: Duration,
    pub arrival_delay: TimeRange,
    pub haircut_duration: TimeRange,
    pub output: OutputFormat,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            waiting_room_capacity: DEFAULT_WAITING_ROOM_CAPACITY,
            open_time: Duration::from_millis(DEFAULT_OPEN_TIME_MILLIS),
            arrival_delay: TimeRange {
                min: Duration::from_millis(DEFAULT_MIN_ARRIVAL_DELAY_MILLIS),
                max: Duration::from_millis(DEFAULT_MAX_ARRIVAL_DELAY_MILLIS),
            },
            haircut_duration: TimeRange {
                min: Duration::from_millis(DEFAULT_MIN_HAIRCUT_MILLIS),
                max: Duration::from_millis(DEFAULT_MAX_HAIRCUT_MILLIS),
            },
            output: OutputFormat::default(),
        }
    }
}
