//! Application lifecycle
//!
//! - `startup`: storage and shared state
//! - `server`: HTTP server and graceful shutdown

pub mod server;
pub mod startup;

pub use server::run_server;
