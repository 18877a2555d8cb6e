pub const PURPLE_AIR_API_KEY: &str = "PURPLE_AIR_API_KEY";
pub const PURPLE_AIR_SENSOR_ID: &str = "PURPLE_AIR_SENSOR_ID";
pub const PURPLE_AIR_READ_KEY: &str = "PURPLE_AIR_READ_KEY";
pub const PURPLE_AIR_API_BASE_URL: &str = "PURPLE_AIR_API_BASE_URL";

pub const FTP_HOST: &str = "FTP_HOST";
pub const FTP_PORT: &str = "FTP_PORT";
pub const FTP_USER: &str = "FTP_USER";
pub const FTP_PASSWORD: &str = "FTP_PASSWORD";

pub const OUTPUT_DIR: &str = "OUTPUT_DIR";
