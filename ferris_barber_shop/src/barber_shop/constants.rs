pub const DEFAULT_WAITING_ROOM_CAPACITY: usize = 1;
pub const DEFAULT_OPEN_TIME_MILLIS: u64 = 800;

pub const DEFAULT_MIN_ARRIVAL_DELAY_MILLIS: u64 = 0;
pub const DEFAULT_MAX_ARRIVAL_DELAY_MILLIS: u64 = 30;
pub const DEFAULT_MIN_HAIRCUT_MILLIS: u64 = 1;
pub const DEFAULT_MAX_HAIRCUT_MILLIS: u64 = 20;

// ==================== FLAGS ====================
pub const SEATS_FLAG: &str = "-s";
pub const OPEN_TIME_FLAG: &str = "-t";
pub const ARRIVAL_DELAY_FLAG: &str = "-a";
pub const HAIRCUT_DURATION_FLAG: &str = "-c";
pub const OUTPUT_FLAG: &str = "-o";

pub const TEXT_OUTPUT: &str = "text";
pub const JSON_OUTPUT: &str = "json";
