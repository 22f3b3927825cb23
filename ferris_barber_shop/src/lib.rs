//! Ferris Barber Shop is an application that simulates the classic "sleeping barber" problem.
//!
//! A single barber serves the customers that manage to sit in a bounded waiting room, while a
//! steady stream of customers keeps arriving at random intervals. When the waiting room is empty
//! the barber falls asleep until the next customer wakes the barber up, and customers that find
//! no free chair simply leave.
//!
//! After the configured opening time the shop closes: no more customers are admitted, the barber
//! finishes the customers that were already waiting and then both the barber and the customers
//! threads finish.

pub mod barber_shop;

use std::{error::Error, fmt, sync::Arc, time::Duration};

use barber_shop::{
    config::{OutputFormat, ShopConfig, TimeRange},
    constants::*,
    events::{EventSink, JsonNarrator, TracingNarrator},
};
use tracing::{error, info, warn};

#[derive(Debug, PartialEq, Eq)]
pub enum BarberShopError {
    ArgsParsingError(String),
    PoisonedLock(String),
    ThreadPanicked(String),
    SystemError(String),
}

impl fmt::Display for BarberShopError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
impl Error for BarberShopError {}

fn init_logger() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn usage() {
    warn!("Usage: cargo run -p ferris_barber_shop -- -s <seats> -t <open_time_ms> -a <max_arrival_delay_ms> -c <max_haircut_ms> -o <text|json>");
}

fn parse_millis(flag: &str, value: &str) -> Result<u64, BarberShopError> {
    let millis = value.parse::<u64>().map_err(|err| {
        error!("[BarberShop] Invalid value for {}: {}", flag, err);
        BarberShopError::ArgsParsingError(format!("Invalid value for {}", flag))
    })?;
    if millis == 0 {
        error!("[BarberShop] Invalid value for {}: {}", flag, millis);
        return Err(BarberShopError::ArgsParsingError(format!(
            "Invalid value for {}",
            flag
        )));
    }
    Ok(millis)
}

/// Builds the shop configuration out of `flag value` pairs. Missing flags keep their defaults.
pub fn parse_args(args: Vec<String>) -> Result<ShopConfig, BarberShopError> {
    let mut config = ShopConfig::default();

    if args.is_empty() {
        info!(
            "[BarberShop] No arguments provided, using defaults: \n[SEATS: {}]  [OPEN TIME: {}ms]",
            DEFAULT_WAITING_ROOM_CAPACITY, DEFAULT_OPEN_TIME_MILLIS
        );
        return Ok(config);
    }

    if args.len() % 2 != 0 {
        error!("[BarberShop] Invalid arguments");
        usage();
        return Err(BarberShopError::ArgsParsingError(String::from(
            "Invalid argument.",
        )));
    }

    for arg in args.chunks_exact(2) {
        let (flag, value) = (arg[0].as_str(), arg[1].as_str());
        match flag {
            SEATS_FLAG => {
                info!("[BarberShop] Waiting room seats given: {}", value);
                config.waiting_room_capacity = value.parse::<usize>().map_err(|err| {
                    error!("[BarberShop] Invalid number of seats: {}", err);
                    BarberShopError::ArgsParsingError(String::from("Invalid number of seats"))
                })?;
                if config.waiting_room_capacity == 0 {
                    error!("[BarberShop] Invalid number of seats: 0");
                    return Err(BarberShopError::ArgsParsingError(String::from(
                        "Invalid number of seats",
                    )));
                }
            }
            OPEN_TIME_FLAG => {
                info!("[BarberShop] Open time given: {}ms", value);
                config.open_time = Duration::from_millis(parse_millis(flag, value)?);
            }
            ARRIVAL_DELAY_FLAG => {
                info!("[BarberShop] Max arrival delay given: {}ms", value);
                config.arrival_delay = TimeRange::from_millis(
                    DEFAULT_MIN_ARRIVAL_DELAY_MILLIS,
                    parse_millis(flag, value)?,
                )?;
            }
            HAIRCUT_DURATION_FLAG => {
                info!("[BarberShop] Max haircut duration given: {}ms", value);
                config.haircut_duration = TimeRange::from_millis(
                    DEFAULT_MIN_HAIRCUT_MILLIS,
                    parse_millis(flag, value)?,
                )?;
            }
            OUTPUT_FLAG => {
                info!("[BarberShop] Output format given: {}", value);
                config.output = value.parse::<OutputFormat>()?;
            }
            _ => {
                error!("[BarberShop] Invalid argument: {}", flag);
                usage();
                return Err(BarberShopError::ArgsParsingError(String::from(
                    "Invalid argument.",
                )));
            }
        }
    }

    Ok(config)
}

pub fn run() -> Result<(), BarberShopError> {
    init_logger();
    let config = parse_args(std::env::args().skip(1).collect())?;
    let sink: Arc<dyn EventSink> = match config.output {
        OutputFormat::Text => Arc::new(TracingNarrator),
        OutputFormat::Json => Arc::new(JsonNarrator),
    };

    let report = barber_shop::handler::start(config, sink)?;
    info!(
        "[BarberShop] Day finished. Served: {}, joined: {}, left without seat: {}, left at closing: {}",
        report.customers_served,
        report.customers_joined,
        report.turned_away_no_seats,
        report.turned_away_closed
    );
    Ok(())
}
