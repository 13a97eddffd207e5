// src/mux/slot.rs

//! The connection table: a fixed-capacity, index-stable set of client slots.

use crate::mux::dispatcher::ActionCode;
use crate::mux::traits::Connection;

/// One fixed-index seat holding at most one connection plus the action
/// decoded from its last message.
///
/// Write discipline: the connection is replaced only by the seating pass,
/// and `pending_action` is written only by the receive pass and cleared by
/// the dispatch pass (or by the receive pass's own per-cycle reset).
pub struct ClientSlot<C> {
    connection: Option<C>,
    pending_action: ActionCode,
}

impl<C: Connection> ClientSlot<C> {
    fn vacant() -> Self {
        Self {
            connection: None,
            pending_action: ActionCode::NONE,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.connection.is_some()
    }

    /// True when the slot holds a connection that still reports itself alive.
    pub fn is_live(&self) -> bool {
        self.connection.as_ref().is_some_and(Connection::is_alive)
    }

    pub fn connection(&self) -> Option<&C> {
        self.connection.as_ref()
    }

    pub fn connection_mut(&mut self) -> Option<&mut C> {
        self.connection.as_mut()
    }

    pub fn pending_action(&self) -> ActionCode {
        self.pending_action
    }

    pub fn set_action(&mut self, code: ActionCode) {
        self.pending_action = code;
    }

    pub fn clear_action(&mut self) {
        self.pending_action = ActionCode::NONE;
    }

    /// Seats a new connection, closing whatever occupied the slot before.
    pub fn seat(&mut self, conn: C) -> &mut C {
        if let Some(old) = self.connection.as_mut() {
            old.close();
        }
        self.connection.insert(conn)
    }

    /// Closes and removes the connection. The pending action is left alone;
    /// the receive pass owns its lifecycle.
    pub fn vacate(&mut self) {
        if let Some(mut conn) = self.connection.take() {
            conn.close();
        }
    }
}

/// Fixed-size, insertion-ordered table of client slots. The length is set at
/// construction and never changes; a slot's index identifies the client for
/// the lifetime of its connection.
pub struct ConnectionTable<C> {
    slots: Vec<ClientSlot<C>>,
}

impl<C: Connection> ConnectionTable<C> {
    /// Creates a table of `capacity` vacant slots.
    pub fn new(capacity: usize) -> Self {
        let slots = (0..capacity).map(|_| ClientSlot::vacant()).collect();
        Self { slots }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Lowest index whose slot is empty or holds a dead connection, i.e. the
    /// seat the next inbound client gets.
    pub fn first_reusable(&self) -> Option<usize> {
        self.slots.iter().position(|slot| !slot.is_live())
    }

    /// Number of slots currently holding a live connection.
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_live()).count()
    }

    pub fn slot(&self, index: usize) -> Option<&ClientSlot<C>> {
        self.slots.get(index)
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut ClientSlot<C>> {
        self.slots.get_mut(index)
    }

    pub fn slots(&self) -> &[ClientSlot<C>] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [ClientSlot<C>] {
        &mut self.slots
    }
}
