use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// One reading obtained from the sensor API.
///
/// The numeric fields are `None` if the sensor response omitted them or
/// carried a non-numeric value; whether that is acceptable is decided by
/// the consumer (the CSV formatter treats it as an error).
#[derive(Clone, Debug, PartialEq)]
pub struct SensorReading {
    pub pm2_5: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub observed_at: DateTime<Utc>,
}

impl SensorReading {
    pub fn from_sensor_fields(fields: &Map<String, Value>, observed_at: DateTime<Utc>) -> Self {
        SensorReading {
            pm2_5: fields.get("pm2.5").and_then(Value::as_f64),
            temperature: fields.get("temperature").and_then(Value::as_f64),
            humidity: fields.get("humidity").and_then(Value::as_f64),
            observed_at,
        }
    }
}
