#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
extern crate thiserror;

mod bridge;
mod guard;
mod resolver;

pub mod discovery;
pub mod errors;
pub mod platform;
pub mod service;

pub use bridge::RecordStream;
pub use guard::MulticastGuard;

/// Default buffer capacity of a session's record stream.
pub const DEFAULT_STREAM_CAPACITY: usize = 64;

#[cfg(test)]
mod tests;
