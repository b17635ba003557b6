//! QRMatic - self-hosted QR code generator
//!
//! Static QR codes encode their target URL directly. Dynamic QR codes
//! encode a short `/r/{code}` redirect, so their target can change after
//! printing and every scan is logged for analytics.
//!
//! # Architecture
//! - `api`: HTTP routes, session guard and page templates
//! - `services`: QR management, rendering, auth and analytics services
//! - `analytics`: pure scan aggregation
//! - `storage`: SeaORM storage backend
//! - `config`: static configuration
//! - `interfaces`: CLI commands
//! - `runtime`: server startup and shutdown
//! - `system`: logging and signal handling

pub mod analytics;
pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
