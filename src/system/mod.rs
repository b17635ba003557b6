//! System-level modules
//!
//! - Logging initialization
//! - Shutdown signal handling

pub mod logging;
pub mod shutdown;
