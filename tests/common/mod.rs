// tests/common/mod.rs

//! Shared in-memory fakes for driving the multiplexer core without sockets.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use slotmux::mux::{Connection, Listener};

#[derive(Default)]
struct FakeState {
    alive: bool,
    inbound: VecDeque<Vec<u8>>,
    written: Vec<u8>,
    closed: bool,
    fail_next_read: bool,
}

/// A scripted connection. Clones share state, so a test can keep a probe
/// handle after the connection itself moves into the table.
#[derive(Clone)]
pub struct FakeConnection {
    state: Rc<RefCell<FakeState>>,
}

impl FakeConnection {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(FakeState {
                alive: true,
                ..FakeState::default()
            })),
        }
    }

    /// Queues bytes as if they arrived from the peer.
    pub fn push_message(&self, bytes: &[u8]) {
        self.state.borrow_mut().inbound.push_back(bytes.to_vec());
    }

    /// Everything the multiplexer wrote to this connection so far.
    pub fn written(&self) -> Vec<u8> {
        self.state.borrow().written.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.state.borrow().closed
    }

    /// Simulates the peer going away without a clean close.
    pub fn kill(&self) {
        self.state.borrow_mut().alive = false;
    }

    pub fn fail_next_read(&self) {
        self.state.borrow_mut().fail_next_read = true;
    }
}

impl Connection for FakeConnection {
    fn is_alive(&self) -> bool {
        let state = self.state.borrow();
        state.alive && !state.closed
    }

    fn bytes_available(&self) -> bool {
        let state = self.state.borrow();
        !state.inbound.is_empty() || state.fail_next_read
    }

    fn read_available(&mut self) -> io::Result<Vec<u8>> {
        let mut state = self.state.borrow_mut();
        if state.fail_next_read {
            state.fail_next_read = false;
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "scripted"));
        }
        // Everything queued counts as "arrived since the last poll".
        let mut out = Vec::new();
        while let Some(chunk) = state.inbound.pop_front() {
            out.extend_from_slice(&chunk);
        }
        Ok(out)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.state.borrow_mut().written.extend_from_slice(buf);
        Ok(())
    }

    fn close(&mut self) {
        let mut state = self.state.borrow_mut();
        state.closed = true;
        state.alive = false;
    }
}

/// A scripted listener. `queue` holds connections that count as pending;
/// `stray` is only ever handed out by `accept`, modelling the race where a
/// connection lands in the backlog between the pending check and the accept.
#[derive(Default)]
pub struct FakeListener {
    queue: VecDeque<FakeConnection>,
    stray: Option<FakeConnection>,
}

impl FakeListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, conn: FakeConnection) {
        self.queue.push_back(conn);
    }

    pub fn set_stray(&mut self, conn: FakeConnection) {
        self.stray = Some(conn);
    }
}

impl Listener for FakeListener {
    type Conn = FakeConnection;

    fn has_pending(&mut self) -> bool {
        !self.queue.is_empty()
    }

    fn accept(&mut self) -> Option<FakeConnection> {
        self.queue.pop_front().or_else(|| self.stray.take())
    }
}
