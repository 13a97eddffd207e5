// src/lib.rs

pub mod config;
pub mod core;
pub mod mux;
pub mod net;
pub mod server;

// Re-export
pub use crate::core::MuxError;
