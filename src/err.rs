use std::fmt::{self, Debug, Display};
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

pub type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

pub struct DisplayError(Error);

impl Debug for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<T: Into<Error>> From<T> for DisplayError {
    fn from(display: T) -> Self {
        DisplayError(display.into())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to locate executable directory: {0}")]
    ExecutableDir(#[source] io::Error),
    #[error("Root directory {} is not usable: {source}", path.display())]
    RootDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}

pub trait IoErrorExt {
    fn applies_to(&self) -> AppliesTo;
}

impl IoErrorExt for io::Error {
    fn applies_to(&self) -> AppliesTo {
        match self.kind() {
            io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset => AppliesTo::Connection,
            io::ErrorKind::OutOfMemory => AppliesTo::Resources,
            _ if is_resource_exhaustion(self) => AppliesTo::Resources,
            _ => AppliesTo::Listener,
        }
    }
}

#[cfg(unix)]
fn is_resource_exhaustion(e: &io::Error) -> bool {
    matches!(
        e.raw_os_error(),
        Some(libc::EMFILE | libc::ENFILE | libc::ENOBUFS | libc::ENOMEM)
    )
}

#[cfg(not(unix))]
fn is_resource_exhaustion(_: &io::Error) -> bool {
    false
}

pub enum AppliesTo {
    Connection,
    /// Out of descriptors or buffers; clears up as connections close.
    Resources,
    Listener,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_error_names_address() {
        let err = StartupError::Bind {
            addr: "0.0.0.0:8000".parse().unwrap(),
            source: io::Error::from(io::ErrorKind::AddrInUse),
        };
        assert!(err.to_string().starts_with("Failed to bind 0.0.0.0:8000: "));
    }

    #[test]
    fn reset_connections_do_not_stop_listener() {
        let reset = io::Error::from(io::ErrorKind::ConnectionReset);
        assert!(matches!(reset.applies_to(), AppliesTo::Connection));
        let other = io::Error::from(io::ErrorKind::PermissionDenied);
        assert!(matches!(other.applies_to(), AppliesTo::Listener));
    }

    #[cfg(unix)]
    #[test]
    fn descriptor_exhaustion_is_temporary() {
        for code in [libc::EMFILE, libc::ENFILE, libc::ENOBUFS, libc::ENOMEM] {
            let e = io::Error::from_raw_os_error(code);
            assert!(matches!(e.applies_to(), AppliesTo::Resources), "{}", e);
        }
        let e = io::Error::from_raw_os_error(libc::EBADF);
        assert!(matches!(e.applies_to(), AppliesTo::Listener));
    }
}
