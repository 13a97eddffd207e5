// src/mux/receiver.rs

//! Receive pass: drains each live slot's buffered bytes into one message,
//! echoes it back, and decodes it into the slot's pending action.

use std::io;

use tracing::{debug, info, warn};

use crate::mux::slot::ConnectionTable;
use crate::mux::traits::{Connection, Decode};

/// Byte-exact client message that tears the slot down without decoding.
pub const DISCONNECT_SENTINEL: &str = "Disconnect!";

/// Runs the receive pass over every slot.
///
/// Each slot's pending action is reset first, unconditionally: an action the
/// dispatcher did not consume last cycle is lost, so dispatch must run every
/// cycle. A message is whatever arrived since the last poll; the wire has no
/// framing, so a command split across two reads shows up as two messages.
///
/// A failing slot (read or echo error) is released and the pass moves on;
/// one client's failure never blocks the others.
pub fn receive_requests<C: Connection, D: Decode>(table: &mut ConnectionTable<C>, decoder: &D) {
    for (index, slot) in table.slots_mut().iter_mut().enumerate() {
        slot.clear_action();

        let drained = match slot.connection_mut() {
            Some(conn) => drain_and_echo(conn),
            None => continue,
        };

        match drained {
            Ok(None) => {}
            Ok(Some(raw)) => {
                if raw == DISCONNECT_SENTINEL.as_bytes() {
                    info!(slot = index, "client requested disconnect");
                    slot.vacate();
                    continue;
                }
                let message = String::from_utf8_lossy(&raw);
                let code = decoder.decode(&message);
                debug!(slot = index, code = code.get(), message = %message, "message decoded");
                slot.set_action(code);
            }
            Err(e) => {
                warn!(slot = index, error = %e, "receive failed; releasing slot");
                slot.vacate();
            }
        }
    }
}

/// Drains and echoes one connection's buffered bytes. `Ok(None)` means the
/// connection was quiet this cycle. The echo goes out before any sentinel or
/// decode handling, so the sender can use the mirrored bytes as a receipt.
fn drain_and_echo<C: Connection>(conn: &mut C) -> io::Result<Option<Vec<u8>>> {
    if !conn.is_alive() || !conn.bytes_available() {
        return Ok(None);
    }
    let raw = conn.read_available()?;
    if raw.is_empty() {
        return Ok(None);
    }
    conn.write_all(&raw)?;
    Ok(Some(raw))
}
