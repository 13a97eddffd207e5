// src/mux/allocator.rs

//! Seating pass: moves at most one pending inbound connection into the
//! connection table per cycle.

use tracing::{debug, warn};

use crate::mux::slot::ConnectionTable;
use crate::mux::traits::{Connection, Listener};

/// Greeting sent once over every freshly seated connection.
pub const GREETING: &str = "Connected!";

/// Runs the seating pass.
///
/// With a connection pending, the lowest-index empty-or-dead slot receives it
/// (a dead occupant is closed first) and the greeting is written to it. One
/// seat per cycle: further pending connections wait for later cycles. With
/// every slot live, the accepted handle is dropped and the prospective client
/// receives nothing; the table is not mutated and no error is surfaced.
///
/// With nothing pending, one stray backlog connection (if any) is accepted
/// and closed immediately so the accept queue cannot grow while idle.
pub fn seat_pending<L: Listener>(listener: &mut L, table: &mut ConnectionTable<L::Conn>) {
    if listener.has_pending() {
        let Some(conn) = listener.accept() else {
            return;
        };
        let Some(index) = table.first_reusable() else {
            warn!(
                capacity = table.capacity(),
                "all slots occupied; dropping inbound connection"
            );
            return;
        };
        let Some(slot) = table.slot_mut(index) else {
            return;
        };
        if let Err(e) = slot.seat(conn).write_all(GREETING.as_bytes()) {
            warn!(slot = index, error = %e, "greeting write failed; releasing slot");
            slot.vacate();
            return;
        }
        debug!(slot = index, "client seated");
    } else if let Some(mut stray) = listener.accept() {
        // Idle housekeeping, mirroring the seating branch's one-per-cycle
        // budget: drain a single stray attempt and hang up.
        stray.close();
        debug!("stray connection attempt closed");
    }
}
