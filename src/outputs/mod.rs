//! Output generation for the assembled snapshot.
//!
//! # Submodules
//!
//! - [`json`]: Writes the [`crate::models::Snapshot`] as the single
//!   `news.json` file the dashboard loads
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! └── news.json
//! ```

pub mod json;
