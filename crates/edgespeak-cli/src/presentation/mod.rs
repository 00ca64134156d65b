//! Shared CLI presentation utilities.
//!
//! Format-only: no domain transforms. Everything rendered here comes from
//! core types (`LoadingView`, `Notification`, `PerformanceState`).

pub mod loading;
pub mod notifications;
pub mod tables;

pub use loading::{LoadingSpinner, spinner_message};
pub use notifications::{format_notification, print_events};
pub use tables::{print_separator, truncate_string};
