use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::Config;
use crate::data_mgmt::csv::{self, FormatError, OutputFile};
use crate::interfaces::ftp::{self, FtpConnection, UploadError};
use crate::readers::purple_air::{self, FetchError};

#[derive(Error, Debug)]
pub enum CycleError {
    #[error("sensor fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("CSV formatting failed: {0}")]
    Format(#[from] FormatError),
    #[error("FTP upload failed: {0}")]
    Upload(#[from] UploadError),
}

/// One full fetch → format → persist → upload cycle.
pub fn run_cycle(config: &Config) -> Result<OutputFile, CycleError> {
    run_cycle_with(config, |path| {
        let mut conn = FtpConnection::new(&config.ftp);
        ftp::upload_file(&mut conn, path)
    })
}

/// The cycle with an injected upload step, strictly sequential: the
/// reader completes before the formatter starts, and the formatter
/// completes before the uploader starts.
pub fn run_cycle_with<U>(config: &Config, upload: U) -> Result<OutputFile, CycleError>
where
    U: FnOnce(&Path) -> Result<(), UploadError>,
{
    log::info!("Starting data collection cycle");

    let reading = purple_air::fetch_reading(&config.sensor)?;
    log::info!(
        "Sensor reading: pm2.5={:?} temperature={:?} humidity={:?}",
        reading.pm2_5,
        reading.temperature,
        reading.humidity
    );

    let output = csv::format_and_write(&reading, &config.output_dir)?;

    // Read the file back for diagnostic visibility before upload
    match fs::read_to_string(&output.path) {
        Ok(content) => log::debug!("File content before upload:\n{content}"),
        Err(e) => log::warn!("Could not re-read {}: {e}", output.path.display()),
    }

    upload(&output.path)?;

    log::info!("Data collection cycle completed successfully");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use crate::config::{FtpConfig, SensorApiConfig};

    const SAMPLE_BODY: &str =
        r#"{"sensor": {"pm2.5": 12.34, "temperature": 21.6, "humidity": 48.2}}"#;

    fn test_config(base_url: String, output_dir: PathBuf) -> Config {
        Config {
            sensor: SensorApiConfig {
                base_url,
                sensor_id: "237037".to_string(),
                api_key: "test-api-key".to_string(),
                read_key: None,
            },
            ftp: FtpConfig {
                host: "ftp.example.org".to_string(),
                port: 21,
                user: "testuser".to_string(),
                password: "testpwd".to_string(),
            },
            output_dir,
        }
    }

    #[test]
    fn test_successful_cycle_uploads_written_file() {
        let mut server = mockito::Server::new();
        let _m = server.mock("GET", "/237037").with_body(SAMPLE_BODY).create();
        let outdir = tempfile::tempdir().unwrap();
        let config = test_config(server.url(), outdir.path().to_path_buf());

        let uploaded = Mutex::new(None);
        let output = run_cycle_with(&config, |path| {
            *uploaded.lock().unwrap() = Some(path.to_path_buf());
            Ok(())
        })
        .unwrap();

        let uploaded = uploaded.into_inner().unwrap().unwrap();
        assert_eq!(uploaded, output.path);
        let content = fs::read_to_string(&output.path).unwrap();
        assert_eq!(
            content,
            format!(
                "Time,PM2.5 (ug/m3),Temperature (°C),Humidity (%)\n{},12.3,21.6,48.2",
                output.record.timestamp
            )
        );
    }

    #[test]
    fn test_fetch_failure_writes_no_file_and_skips_upload() {
        let mut server = mockito::Server::new();
        let _m = server.mock("GET", "/237037").with_status(500).create();
        let outdir = tempfile::tempdir().unwrap();
        let config = test_config(server.url(), outdir.path().to_path_buf());

        let err = run_cycle_with(&config, |_| {
            panic!("upload must not be attempted after a failed fetch")
        })
        .unwrap_err();

        assert!(matches!(err, CycleError::Fetch(_)));
        assert_eq!(fs::read_dir(outdir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_upload_failure_leaves_file_on_disk() {
        let mut server = mockito::Server::new();
        let _m = server.mock("GET", "/237037").with_body(SAMPLE_BODY).create();
        let outdir = tempfile::tempdir().unwrap();
        let config = test_config(server.url(), outdir.path().to_path_buf());

        let err = run_cycle_with(&config, |_| {
            Err(UploadError::Socket(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "530 Login incorrect",
            )))
        })
        .unwrap_err();

        assert!(matches!(err, CycleError::Upload(_)));
        assert_eq!(fs::read_dir(outdir.path()).unwrap().count(), 1);
    }
}
