#![allow(dead_code)]

pub const SAMPLE_BODY: &str = r#"
{
    "api_version": "V1.0.14-0.0.57",
    "time_stamp": 1730557800,
    "data_time_stamp": 1730557780,
    "sensor": {
        "sensor_index": 237037,
        "name": "Test sensor",
        "pm2.5": 12.34,
        "temperature": 21.6,
        "humidity": 48.2,
        "rssi": -67
    }
}
"#;

pub const ERROR_BODY: &str = r#"
{
    "api_version": "V1.0.14-0.0.57",
    "error": "InternalServerError",
    "description": "An unexpected error occurred."
}
"#;
