use std::fs::File;
use std::io::{self, Read};
use std::net::ToSocketAddrs;
use std::path::{Path, PathBuf};

use suppaftp::types::FileType;
use suppaftp::{FtpError, FtpStream};
use thiserror::Error;

use crate::config::FtpConfig;
use crate::constants::defaults;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error(transparent)]
    Ftp(#[from] FtpError),
    #[error("could not resolve FTP host {host}: {source}")]
    HostResolution { host: String, source: io::Error },
    #[error("FTP socket error: {0}")]
    Socket(io::Error),
    #[error("not connected")]
    NotConnected,
    #[error("could not read local file {}: {source}", .path.display())]
    LocalFile { path: PathBuf, source: io::Error },
    #[error("local path {} has no usable file name", .0.display())]
    Path(PathBuf),
}

/// A single-use FTP control connection. One is opened per upload and
/// closed on every exit path; connections are never reused across cycles.
pub trait FtpTransport {
    fn connect(&mut self) -> Result<(), UploadError>;
    fn transfer(&mut self, filename: &str, data: &mut dyn Read) -> Result<u64, UploadError>;
    fn quit(&mut self) -> Result<(), UploadError>;
}

pub struct FtpConnection {
    host: String,
    port: u16,
    user: String,
    password: String,
    ftp_stream: Option<FtpStream>,
}

impl FtpConnection {
    pub fn new(config: &FtpConfig) -> FtpConnection {
        FtpConnection {
            host: config.host.clone(),
            port: config.port,
            user: config.user.clone(),
            password: config.password.clone(),
            ftp_stream: None,
        }
    }
}

impl FtpTransport for FtpConnection {
    fn connect(&mut self) -> Result<(), UploadError> {
        let resolution_err = |source| UploadError::HostResolution {
            host: self.host.clone(),
            source,
        };
        let addr = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(resolution_err)?
            .next()
            .ok_or_else(|| {
                resolution_err(io::Error::new(io::ErrorKind::NotFound, "no address found"))
            })?;

        let mut ftp_stream = FtpStream::connect_timeout(addr, defaults::FTP_TIMEOUT)?;
        ftp_stream
            .get_ref()
            .set_read_timeout(Some(defaults::FTP_TIMEOUT))
            .map_err(UploadError::Socket)?;
        ftp_stream
            .get_ref()
            .set_write_timeout(Some(defaults::FTP_TIMEOUT))
            .map_err(UploadError::Socket)?;
        ftp_stream.login(&self.user, &self.password)?;
        ftp_stream.set_passive_nat_workaround(true);
        ftp_stream.transfer_type(FileType::Binary)?;
        log::info!("FTP connection to {}:{} established", self.host, self.port);
        self.ftp_stream = Some(ftp_stream);
        Ok(())
    }

    fn transfer(&mut self, filename: &str, mut data: &mut dyn Read) -> Result<u64, UploadError> {
        self.ftp_stream
            .as_mut()
            .ok_or(UploadError::NotConnected)?
            .put_file(filename, &mut data)
            .map_err(Into::into)
    }

    fn quit(&mut self) -> Result<(), UploadError> {
        if let Some(mut ftp_stream) = self.ftp_stream.take() {
            ftp_stream.quit()?;
        }
        Ok(())
    }
}

/// Upload a local file to the remote root directory under its base name.
///
/// The connection is closed exactly once whether the transfer succeeds or
/// fails; the local file is left untouched regardless of outcome.
pub fn upload_file<T: FtpTransport>(
    transport: &mut T,
    local_path: &Path,
) -> Result<(), UploadError> {
    let filename = local_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| UploadError::Path(local_path.to_path_buf()))?;
    let mut file = File::open(local_path).map_err(|source| UploadError::LocalFile {
        path: local_path.to_path_buf(),
        source,
    })?;

    let result = match transport.connect() {
        Ok(()) => transport.transfer(filename, &mut file).map(|bytes| {
            log::debug!("Transferred {bytes} bytes as {filename}");
        }),
        Err(e) => Err(e),
    };
    if let Err(e) = transport.quit() {
        log::warn!("Error closing FTP connection: {e}");
    }

    match &result {
        Ok(()) => {
            log::info!("Upload of {filename} completed");
            println!("\n SUCCESS: Data successfully transferred to remote endpoint\n");
        }
        Err(e) => {
            log::error!("Upload of {filename} failed: {e}");
            println!("\n ERROR: Failed to transfer data to remote endpoint\n");
        }
    }
    result
}
