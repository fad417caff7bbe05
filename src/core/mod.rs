//! Core module - comparison data, estimator and supporting services

pub mod config;
pub mod dataset;
pub mod entity;
pub mod estimator;
pub mod export;
pub mod style;

pub use config::Config;
pub use entity::{Entity, Stack};
pub use estimator::{estimate, ComplexityTier, EstimatorError, EstimatorInput, EstimatorOutput};
pub use export::{ExportError, TableKind, TableRecords};
pub use style::{Scale, Theme, Tone};
