//! # exif-pair CLI
//!
//! Command-line interface for the RGB/radiometric photo pairing tool.
//!
//! ## Usage
//! ```bash
//! exif-pair scan-dir ~/flights/2024-06-01
//! exif-pair find-pairs ~/flights/2024-06-01 --mode metric --datetime-within 5
//! ```

mod cli;

use exif_pair::Result;

fn main() -> Result<()> {
    exif_pair::init_tracing();
    cli::run()
}
