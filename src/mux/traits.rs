// src/mux/traits.rs

//! Capability traits at the seam between the multiplexer core and its
//! collaborators. The core never touches sockets directly; tests drive it
//! with in-memory fakes and production wires in the `net` backend.

use std::io;

use crate::mux::dispatcher::ActionCode;

/// A source of inbound connections.
pub trait Listener {
    type Conn: Connection;

    /// Reports whether an inbound connection is waiting to be seated.
    fn has_pending(&mut self) -> bool;

    /// Yields one pending connection, if any.
    fn accept(&mut self) -> Option<Self::Conn>;
}

/// One seated client connection. All queries are non-blocking.
pub trait Connection {
    fn is_alive(&self) -> bool;

    /// Reports whether buffered bytes are ready, without consuming them.
    fn bytes_available(&self) -> bool;

    /// Drains everything currently buffered. `Ok` with an empty vector means
    /// nothing was ready after all.
    fn read_available(&mut self) -> io::Result<Vec<u8>>;

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()>;

    /// Shuts the connection down. Dropping an occupied slot also releases the
    /// underlying resource; `close` exists so liveness flips immediately.
    fn close(&mut self);
}

/// Translates one received message into an action code.
///
/// Must be fast: it runs synchronously inside the receive pass, and no other
/// slot is serviced until it returns.
pub trait Decode {
    fn decode(&self, message: &str) -> ActionCode;
}

impl<F> Decode for F
where
    F: Fn(&str) -> ActionCode,
{
    fn decode(&self, message: &str) -> ActionCode {
        self(message)
    }
}
