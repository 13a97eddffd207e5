// src/mux/mod.rs

//! The multiplexer core: slot allocation, request receiving, and action
//! dispatch, run as three plain synchronous passes per polling cycle.

mod allocator;
mod dispatcher;
mod receiver;
mod slot;
mod traits;

// Publicly re-export the primary types from the sub-modules.
pub use allocator::{GREETING, seat_pending};
pub use dispatcher::{ActionCode, DispatchTable, dispatch_actions};
pub use receiver::{DISCONNECT_SENTINEL, receive_requests};
pub use slot::{ClientSlot, ConnectionTable};
pub use traits::{Connection, Decode, Listener};

/// Owns everything one polling cycle touches: the listener, the connection
/// table, the caller's decoder, and the dispatch table.
///
/// The table is the only shared mutable state and is reachable through this
/// struct alone, so cycles are single-writer by construction.
pub struct Multiplexer<L: Listener, D: Decode> {
    listener: L,
    table: ConnectionTable<L::Conn>,
    decoder: D,
    dispatch: DispatchTable,
}

impl<L: Listener, D: Decode> Multiplexer<L, D> {
    pub fn new(listener: L, max_clients: usize, decoder: D, dispatch: DispatchTable) -> Self {
        Self {
            listener,
            table: ConnectionTable::new(max_clients),
            decoder,
            dispatch,
        }
    }

    /// Runs one full cycle over every slot: seat, receive, dispatch, in that
    /// order. Handlers run synchronously; nothing else is serviced until the
    /// cycle returns.
    pub fn poll_cycle(&mut self) {
        seat_pending(&mut self.listener, &mut self.table);
        receive_requests(&mut self.table, &self.decoder);
        dispatch_actions(&mut self.table, &mut self.dispatch);
    }

    pub fn table(&self) -> &ConnectionTable<L::Conn> {
        &self.table
    }
}
