pub mod session;

pub use session::{SessionGuard, SessionUser};
