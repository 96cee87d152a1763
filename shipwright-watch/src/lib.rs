//! Polling monitor runtime: interval sync cycles + cycle log + rotation.

mod error;
pub mod log_rotation;
mod runtime;

pub use error::WatchError;
pub use runtime::{run, start_blocking, CycleRecord, WatchOptions};
