//! High-level entry crate for the `geocam` coverage planning toolbox.
//!
//! Re-exports the core geometry ([`core`]) and the planner-file store
//! ([`store`]). Typical flow: load a labeled configuration set, pick one
//! configuration, compute its coverage, and hand the series to whatever
//! renders or inspects them.
//!
//! ```no_run
//! use geocam::store::ConfigSet;
//! use geocam::core::compute_coverage;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let set = ConfigSet::load_path("cameras.json")?;
//! for record in &set.records {
//!     let report = compute_coverage(&record.config);
//!     for zoom in &report.zooms {
//!         println!(
//!             "{} @ zoom {}: {} footprint samples",
//!             record.label,
//!             zoom.zoom,
//!             zoom.footprint.len()
//!         );
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub use geocam_core as core;
pub use geocam_store as store;

pub use geocam_core::{
    apply_edit, compute_coverage, Configuration, CoverageReport, Edit, EditModes,
};
pub use geocam_store::{ConfigSet, LabeledConfig, StoreError};
