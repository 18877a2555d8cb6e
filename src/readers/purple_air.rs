use std::io;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::SensorApiConfig;
use crate::constants::defaults;
use crate::data_mgmt::models::SensorReading;
use crate::helpers;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("sensor API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("sensor API request failed: {0}")]
    Transport(Box<ureq::Error>),
    #[error("could not read sensor API response: {0}")]
    Body(#[from] io::Error),
    #[error("could not parse sensor API response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),
}

#[derive(Debug, Deserialize)]
struct SensorDocument {
    sensor: Map<String, Value>,
}

fn get_ureq_agent() -> Result<ureq::Agent, FetchError> {
    Ok(ureq::AgentBuilder::new()
        .tls_connector(Arc::new(native_tls::TlsConnector::new()?))
        .timeout(defaults::API_REQUEST_TIMEOUT)
        .build())
}

/// Fetch the current reading for the configured sensor.
///
/// Issues a single GET request; there is no retry. A non-2xx response
/// fails with the status code and response body included in the error.
pub fn fetch_reading(config: &SensorApiConfig) -> Result<SensorReading, FetchError> {
    log::info!(
        "Requesting reading for sensor {} from {}",
        config.sensor_id,
        config.base_url
    );
    let result = request_reading(config);
    if let Err(e) = &result {
        log::error!("Sensor reading request failed: {e}");
    }
    result
}

fn request_reading(config: &SensorApiConfig) -> Result<SensorReading, FetchError> {
    let agent = get_ureq_agent()?;
    let url = format!(
        "{}/{}",
        config.base_url.trim_end_matches('/'),
        config.sensor_id
    );
    let mut request = agent
        .get(&url)
        .set("X-API-Key", &config.api_key)
        .set("Accept", "application/json");
    if let Some(read_key) = &config.read_key {
        request = request.query("read_key", read_key);
    }

    let response = match request.call() {
        Ok(response) => response,
        Err(ureq::Error::Status(status, response)) => {
            let body = response.into_string().unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }
        Err(e) => return Err(FetchError::Transport(Box::new(e))),
    };

    let observed_at = helpers::now_utc();
    let body = response.into_string()?;
    log::debug!("Sensor API response: {body}");

    let document: SensorDocument = serde_json::from_str(&body)?;
    let reading = SensorReading::from_sensor_fields(&document.sensor, observed_at);
    log::info!("Successfully received sensor reading");
    Ok(reading)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENSOR_ID: &str = "237037";
    const API_KEY: &str = "test-api-key";
    const SAMPLE_BODY: &str =
        r#"{"api_version": "V1.0.14", "sensor": {"pm2.5": 12.34, "temperature": 21.6, "humidity": 48.2}}"#;

    fn sensor_config(base_url: String, read_key: Option<&str>) -> SensorApiConfig {
        SensorApiConfig {
            base_url,
            sensor_id: SENSOR_ID.to_string(),
            api_key: API_KEY.to_string(),
            read_key: read_key.map(String::from),
        }
    }

    #[test]
    fn test_fetch_reading() {
        let mut server = mockito::Server::new();
        let m = server
            .mock("GET", "/237037")
            .match_header("X-API-Key", API_KEY)
            .match_header("Accept", "application/json")
            .with_body(SAMPLE_BODY)
            .expect(1)
            .create();

        let reading = fetch_reading(&sensor_config(server.url(), None)).unwrap();
        assert_eq!(reading.pm2_5, Some(12.34));
        assert_eq!(reading.temperature, Some(21.6));
        assert_eq!(reading.humidity, Some(48.2));
        m.assert();
    }

    #[test]
    fn test_read_key_passed_as_query_param() {
        let mut server = mockito::Server::new();
        let m = server
            .mock("GET", "/237037")
            .match_query(mockito::Matcher::UrlEncoded(
                "read_key".into(),
                "secret".into(),
            ))
            .with_body(SAMPLE_BODY)
            .expect(1)
            .create();

        fetch_reading(&sensor_config(server.url(), Some("secret"))).unwrap();
        m.assert();
    }

    #[test]
    fn test_error_status_includes_code_and_body() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/237037")
            .with_status(500)
            .with_body(r#"{"error": "InternalError"}"#)
            .create();

        let err = fetch_reading(&sensor_config(server.url(), None)).unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500, .. }));
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("InternalError"));
    }

    #[test]
    fn test_invalid_json_fails_parse() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/237037")
            .with_body("this is not JSON")
            .create();

        let err = fetch_reading(&sensor_config(server.url(), None)).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn test_missing_sensor_object_fails_parse() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/237037")
            .with_body(r#"{"api_version": "V1.0.14"}"#)
            .create();

        let err = fetch_reading(&sensor_config(server.url(), None)).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn test_connection_refused_fails_transport() {
        // Nothing listens on this address
        let config = sensor_config("http://127.0.0.1:1".to_string(), None);
        let err = fetch_reading(&config).unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
