//! # exif-pair
//!
//! Pairs photographs from a dual-sensor rig (one RGB camera, one radiometric
//! thermal camera) by comparing the capture metadata embedded in each file.
//!
//! ## What it does
//! - **Scan** a directory of paired images and report how far each pair
//!   diverges on GPS position, altitude and capture time
//! - **Find pairs** between the RGB and radiometric populations, either by
//!   filename pattern or by nearest-neighbor metadata matching under
//!   caller-supplied tolerance windows
//! - **Score** a produced pairing against a trusted reference pairing
//!
//! ## Architecture
//! The library is split into a core engine (UI-agnostic) and presentation layers:
//! - `core` - tag extraction, comparison, matching and aggregation
//! - `events` - event-driven progress reporting
//! - `error` - user-friendly error types
//! - `cli` - command-line interface

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{PairFinderError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
