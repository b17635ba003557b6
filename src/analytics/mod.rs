//! Scan analytics
//!
//! Pure aggregation over the scan rows of a single QR code. Nothing here
//! touches storage; [`crate::services::AnalyticsService`] fetches the window
//! and hands the rows to [`build_report`].

pub mod browser;
pub mod device;
pub mod report;

pub use browser::browser_family;
pub use device::{DeviceType, classify_device};
pub use report::{
    AnalyticsReport, BrowserShare, DailyCount, DeviceShare, RecentScan, browser_breakdown,
    build_report, daily_histogram, device_breakdown, recent_scans,
};
