//! # Core Module
//!
//! The UI-agnostic pairing and delta-analysis engine.
//!
//! ## Modules
//! - `tags` - normalized per-image metadata records
//! - `extract` - EXIF tag extraction and radiometric detection
//! - `comparator` - pairwise tag comparison with delta recording
//! - `aggregate` - delta accumulation and scan reports
//! - `matcher` - pattern-based and metric-based pair finding
//! - `scorer` - accuracy scoring against a reference pairing
//! - `scanner` - flat directory listing
//! - `pipeline` - orchestrates the scan and matching workflows
//! - `exporter` - JSON import/export of pairings and reports

pub mod aggregate;
pub mod comparator;
pub mod exporter;
pub mod extract;
pub mod matcher;
pub mod pipeline;
pub mod scanner;
pub mod scorer;
pub mod tags;

// Re-export commonly used types
pub use aggregate::{DeltaAccumulator, DirScanReport};
pub use comparator::TagComparison;
pub use extract::{ExifTagReader, TagReader};
pub use matcher::{ImagePair, ImageRole, MatchCriteria, NOT_FOUND};
pub use scorer::ScoringResult;
pub use tags::{NamedImage, TagAttribute, TagSet};
