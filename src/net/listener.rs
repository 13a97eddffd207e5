// src/net/listener.rs

//! Non-blocking acceptor implementing the `Listener` capability.

use std::io;
use std::net::{SocketAddr, TcpListener};

use tracing::{debug, warn};

use crate::mux::Listener;
use crate::net::session::TcpSession;

/// Wraps a bound `TcpListener` behind the pending/accept capability pair.
///
/// The OS gives no "is a connection waiting" query for a plain listener, so
/// `has_pending` eagerly accepts into a one-deep buffer and `accept` hands
/// the buffered session out.
pub struct TcpSlotListener {
    inner: TcpListener,
    pending: Option<TcpSession>,
}

impl TcpSlotListener {
    pub fn new(inner: TcpListener) -> io::Result<Self> {
        inner.set_nonblocking(true)?;
        Ok(Self {
            inner,
            pending: None,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.inner.local_addr()
    }

    /// Pulls at most one connection off the OS backlog into the buffer.
    fn poll_accept(&mut self) {
        if self.pending.is_some() {
            return;
        }
        match self.inner.accept() {
            Ok((stream, peer)) => match TcpSession::new(stream, peer) {
                Ok(session) => {
                    debug!(%peer, "inbound connection buffered");
                    self.pending = Some(session);
                }
                Err(e) => warn!(%peer, error = %e, "failed to prepare inbound socket"),
            },
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {}
            Err(e) => warn!(error = %e, "accept failed"),
        }
    }
}

impl Listener for TcpSlotListener {
    type Conn = TcpSession;

    fn has_pending(&mut self) -> bool {
        self.poll_accept();
        self.pending.is_some()
    }

    fn accept(&mut self) -> Option<TcpSession> {
        self.poll_accept();
        self.pending.take()
    }
}
