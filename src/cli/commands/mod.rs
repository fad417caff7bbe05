//! CLI command implementations

pub mod utils;

pub mod completions;
pub mod config;
pub mod costs;
pub mod dashboard;
pub mod export;
pub mod factors;
pub mod features;
pub mod report;
pub mod roi;
pub mod summary;
pub mod timeline;
pub mod verify;
