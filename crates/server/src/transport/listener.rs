use super::Connection;
use crate::error::{Result, ServerError};
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use tracing::{info, warn};

/// Pending connections the kernel queues before `accept`.
pub const LISTEN_BACKLOG: i32 = 20;

/// Listening socket; hands out one [`Connection`] per accepted client.
pub struct Listener {
    inner: TcpListener,
}

impl Listener {
    pub fn bind(host: &str, port: u16) -> Result<Self> {
        let addr = format!("{host}:{port}");
        let bind_error = |source: io::Error| ServerError::Bind {
            addr: addr.clone(),
            source,
        };

        let resolved = (host, port)
            .to_socket_addrs()
            .map_err(bind_error)?
            .next()
            .ok_or_else(|| {
                bind_error(io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    "host resolved to no addresses",
                ))
            })?;
        let inner = listen_socket(resolved, LISTEN_BACKLOG).map_err(bind_error)?;

        info!("listening on {} (backlog {})", addr, LISTEN_BACKLOG);
        Ok(Self { inner })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.inner.local_addr()?)
    }

    /// Block until a client connects. Accept failures are logged and yield
    /// `None` so the caller can keep serving.
    pub fn accept(&self) -> Option<Connection<TcpStream>> {
        match self.inner.accept() {
            Ok((stream, _)) => Some(Connection::from_tcp(stream)),
            Err(e) => {
                warn!("accept failed: {}", e);
                None
            }
        }
    }
}

fn listen_socket(addr: SocketAddr, backlog: i32) -> io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(backlog)?;
    Ok(socket.into())
}
