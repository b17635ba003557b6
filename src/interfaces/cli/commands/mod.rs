mod config_gen;
mod user_management;

pub use config_gen::config_generate;
pub use user_management::{add_user, list_users, set_password};
