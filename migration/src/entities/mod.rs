pub mod qr_code;
pub mod scan_log;
pub mod user;

pub use qr_code::Entity as QrCodeEntity;
pub use scan_log::Entity as ScanLogEntity;
pub use user::Entity as UserEntity;
