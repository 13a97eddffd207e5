mod common;

use common::{FakeConnection, FakeListener};
use proptest::prelude::*;
use slotmux::mux::{
    ActionCode, ConnectionTable, DispatchTable, GREETING, dispatch_actions, seat_pending,
};

proptest! {
    /// Whatever the live/dead occupancy pattern, a new connection lands in
    /// the lowest non-live slot (or is dropped when every slot is live), and
    /// the table length never changes.
    #[test]
    fn seating_picks_lowest_non_live_slot(pattern in proptest::collection::vec(any::<bool>(), 1..16)) {
        let mut table: ConnectionTable<FakeConnection> = ConnectionTable::new(pattern.len());
        for (i, live) in pattern.iter().enumerate() {
            let conn = FakeConnection::new();
            if !live {
                conn.kill();
            }
            table.slot_mut(i).unwrap().seat(conn);
        }

        let expected = pattern.iter().position(|live| !live);
        prop_assert_eq!(table.first_reusable(), expected);

        let mut listener = FakeListener::new();
        let incoming = FakeConnection::new();
        listener.enqueue(incoming.clone());
        seat_pending(&mut listener, &mut table);

        match expected {
            Some(index) => {
                prop_assert_eq!(incoming.written(), GREETING.as_bytes().to_vec());
                prop_assert!(table.slot(index).unwrap().is_live());
            }
            None => prop_assert!(incoming.written().is_empty()),
        }
        prop_assert_eq!(table.capacity(), pattern.len());
    }

    /// After one dispatch pass, exactly the codes with a registered trigger
    /// are cleared; everything else is untouched.
    #[test]
    fn dispatch_clears_exactly_matched_codes(codes in proptest::collection::vec(0u32..8, 1..12)) {
        let mut table: ConnectionTable<FakeConnection> = ConnectionTable::new(codes.len());
        for (i, code) in codes.iter().enumerate() {
            table.slot_mut(i).unwrap().set_action(ActionCode::new(*code));
        }

        let mut dispatch = DispatchTable::new();
        for trigger in [2u32, 4, 6] {
            dispatch.register(ActionCode::new(trigger), || {}).unwrap();
        }

        dispatch_actions(&mut table, &mut dispatch);

        for (i, code) in codes.iter().enumerate() {
            let pending = table.slot(i).unwrap().pending_action();
            if [0u32, 2, 4, 6].contains(code) {
                prop_assert_eq!(pending, ActionCode::NONE);
            } else {
                prop_assert_eq!(pending, ActionCode::new(*code));
            }
        }
    }
}
