//! Per-incident chat socket.

mod socket;

#[cfg(test)]
mod tests;

pub use socket::{ChatEvent, ChatSocket};
