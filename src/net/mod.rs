// src/net/mod.rs

//! std-socket backend implementing the multiplexer's listener and connection
//! capabilities, plus the fallible listener bring-up.

mod bringup;
mod listener;
mod session;

pub use bringup::bind_with_retry;
pub use listener::TcpSlotListener;
pub use session::TcpSession;
