//! stackcmp: Microsoft Stack vs Azure Power Apps comparison dashboard
//!
//! Fixed comparison tables, an ROI estimator and CSV export, presented as
//! terminal views.

pub mod cli;
pub mod core;
pub mod entities;
