use std::time::Duration;

pub const API_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
pub const FTP_TIMEOUT: Duration = Duration::from_secs(60);

pub const READ_INTERVAL: Duration = Duration::from_secs(30 * 60);
pub const SHUTDOWN_POLL_INTERVAL: Duration = Duration::from_millis(500);

pub const SENSOR_API_BASE_URL: &str = "https://api.purpleair.com/v1/sensors";
pub const FTP_PORT: u16 = 21;
pub const OUTPUT_DIR: &str = "data";
