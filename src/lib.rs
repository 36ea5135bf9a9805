//! # Trailmap
//!
//! Offline raster map acquisition and calibration toolkit.
//!
//! This library turns external tile directory trees and downloaded archives
//! into calibrated map descriptors usable for coordinate lookups. It covers
//! the acquisition pipeline only: the calibration engine, the map descriptor
//! model, the directory scanner, the archive codec, and the cancellable
//! download executor. Rendering and UI concerns live elsewhere.

pub mod archive;
pub mod calibration;
pub mod core;
pub mod map;
pub mod prelude;
pub mod scan;
pub mod transfer;

// Re-export public API
pub use crate::core::{
    bounds::MapBounds,
    geo::{LatLng, Point},
    projection::{projection_named, MercatorProjection, Projection},
};

pub use crate::calibration::{
    calibrate, calibrate_auto, CalibrationError, CalibrationMethod, CalibrationPoint,
};

pub use crate::map::{
    descriptor::{Calibration, Level, MapDescriptor, Provider, Size, TileSize},
    entities::{Marker, Route, RouteIdentity, Track, TrackPoint},
};

pub use crate::scan::{MapScanner, ScanCandidate};

pub use crate::archive::{unzip, zip, UnzipEvent, ZipEvent};

pub use crate::transfer::{DownloadEvent, DownloadHandle, Progress, TransferExecutor};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] ::zip::result::ZipError),

    #[error("Calibration error: {0}")]
    Calibration(#[from] CalibrationError),

    #[error("Invalid map descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Transfer error: {0}")]
    Transfer(String),
}

/// Error type alias for convenience
pub type Error = MapError;
