// src/mux/dispatcher.rs

//! Dispatch pass: the ordered action table and the per-slot scan that fires
//! the first matching handler.

use tracing::trace;

use crate::core::MuxError;
use crate::mux::slot::ConnectionTable;
use crate::mux::traits::Connection;

/// Numeric result of decoding one client message. Opaque to the core: only
/// equality against dispatch-table triggers matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionCode(u32);

impl ActionCode {
    /// The reserved "nothing pending" code. Never triggers a handler and is
    /// rejected at registration time.
    pub const NONE: ActionCode = ActionCode(0);

    pub const fn new(code: u32) -> Self {
        ActionCode(code)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

struct DispatchEntry {
    trigger: ActionCode,
    handler: Box<dyn FnMut() + Send>,
}

/// Ordered list of (trigger, handler) pairs. Order is significant: the first
/// entry whose trigger equals a slot's pending action wins, so an earlier
/// entry permanently shadows a later one with the same trigger. The list
/// length is the end marker; there is no sentinel entry.
#[derive(Default)]
pub struct DispatchTable {
    entries: Vec<DispatchEntry>,
}

impl std::fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchTable")
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl DispatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. Registering the reserved `ActionCode::NONE` is an
    /// error: a real command must never decode to it.
    pub fn register(
        &mut self,
        trigger: ActionCode,
        handler: impl FnMut() + Send + 'static,
    ) -> Result<&mut Self, MuxError> {
        if trigger == ActionCode::NONE {
            return Err(MuxError::ReservedActionCode);
        }
        self.entries.push(DispatchEntry {
            trigger,
            handler: Box::new(handler),
        });
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Runs the dispatch pass: for every slot with a pending action, invokes the
/// first matching handler synchronously, clears the action, and stops
/// scanning that slot. An unmatched code is a silent no-op and is left in
/// place for the next receive pass to reset, so running this twice without
/// an intervening receive is a no-op the second time for matched codes.
pub fn dispatch_actions<C: Connection>(
    table: &mut ConnectionTable<C>,
    dispatch: &mut DispatchTable,
) {
    for (index, slot) in table.slots_mut().iter_mut().enumerate() {
        let pending = slot.pending_action();
        if pending == ActionCode::NONE {
            continue;
        }
        for entry in dispatch.entries.iter_mut() {
            if entry.trigger == pending {
                trace!(slot = index, code = pending.get(), "dispatching action");
                (entry.handler)();
                slot.clear_action();
                break;
            }
        }
    }
}
