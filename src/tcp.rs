use crate::config::ACCEPT_BACKOFF;
use crate::err::{AppliesTo, IoErrorExt, StartupError};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::time::sleep;

/// Source of incoming connections.
pub trait Accept {
    fn accept(
        &mut self,
    ) -> impl Future<Output = Result<(TcpStream, SocketAddr), io::Error>> + Send;
}

impl Accept for TcpListener {
    fn accept(
        &mut self,
    ) -> impl Future<Output = Result<(TcpStream, SocketAddr), io::Error>> + Send {
        TcpListener::accept(self)
    }
}

pub fn bind(addr: SocketAddr) -> Result<TcpListener, StartupError> {
    let bind = || {
        let socket = match addr {
            SocketAddr::V4(_) => TcpSocket::new_v4()?,
            SocketAddr::V6(_) => TcpSocket::new_v6()?,
        };
        // on windows this would let a second server steal the port
        #[cfg(unix)]
        socket.set_reuseaddr(true)?;
        socket.bind(addr)?;
        socket.listen(1024)
    };
    bind().map_err(|source| StartupError::Bind { addr, source })
}

pub async fn accept(listener: &mut impl Accept) -> Result<(TcpStream, SocketAddr), io::Error> {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                if let Err(e) = stream.set_nodelay(true) {
                    log::debug!("Failed to set nodelay for {}: {}", addr, e);
                }
                return Ok((stream, addr));
            }
            Err(e) => match e.applies_to() {
                AppliesTo::Connection => log::debug!("Aborted connection dropped: {}", e),
                AppliesTo::Resources => {
                    log::warn!("Failed to accept, retrying in {:?}: {}", ACCEPT_BACKOFF, e);
                    sleep(ACCEPT_BACKOFF).await;
                }
                AppliesTo::Listener => return Err(e),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn second_bind_on_same_port_fails() {
        let first = bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = first.local_addr().unwrap();

        match bind(addr) {
            Err(StartupError::Bind { addr: failed, source }) => {
                assert_eq!(failed, addr);
                assert_eq!(source.kind(), io::ErrorKind::AddrInUse);
            }
            Ok(_) => panic!("second listener bound to {}", addr),
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    #[tokio::test]
    async fn port_is_reusable_after_close() {
        let first = bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = first.local_addr().unwrap();
        drop(first);

        bind(addr).unwrap();
    }

    #[tokio::test]
    async fn accept_returns_peer() {
        let mut listener = bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();

        let connect = tokio::spawn(async move { TcpStream::connect(addr).await.unwrap() });
        let (stream, peer) = accept(&mut listener).await.unwrap();
        let client = connect.await.unwrap();

        assert_eq!(peer, client.local_addr().unwrap());
        assert!(stream.nodelay().unwrap());
    }
}
