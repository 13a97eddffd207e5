// src/core/mod.rs

pub mod errors;

pub use errors::MuxError;
