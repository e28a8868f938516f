//! Command implementations

pub mod session;

pub use session::{SessionOptions, run_session};
