use crate::err::StartupError;
use std::env;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8000;

/// Checked in order when a directory is requested.
pub const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

pub const FILE_BUFFER_SIZE: usize = 64 * 1024;

/// Pause before accepting again after running out of descriptors.
pub const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub root: PathBuf,
}

impl Config {
    /// Serve the directory holding the running executable, and make it the working directory.
    pub fn from_current_exe() -> Result<Self, StartupError> {
        let exe = env::current_exe().map_err(StartupError::ExecutableDir)?;
        let dir = exe
            .parent()
            .map(PathBuf::from)
            .ok_or_else(|| StartupError::ExecutableDir(std::io::ErrorKind::NotFound.into()))?;
        env::set_current_dir(&dir).map_err(|source| StartupError::RootDir {
            path: dir.clone(),
            source,
        })?;
        Self::new(DEFAULT_PORT, dir)
    }

    pub fn new(port: u16, root: PathBuf) -> Result<Self, StartupError> {
        let root = root
            .canonicalize()
            .and_then(|root| {
                // reading the directory once up front surfaces permission problems at startup
                std::fs::read_dir(&root)?;
                Ok(root)
            })
            .map_err(|source| StartupError::RootDir {
                path: root.clone(),
                source,
            })?;
        Ok(Self { port, root })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }
}
