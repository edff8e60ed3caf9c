//! Core geometry for planning pan/tilt camera coverage of a planar surface.
//!
//! This crate contains:
//! - the [`Configuration`] value object (camera, lens and mounting
//!   parameters with documented defaults),
//! - derived optics conversions (focal length in mm, field of view, and
//!   their inverses) in [`optics`],
//! - a pure edit reducer for live configuration editing in [`edit`],
//! - the coverage engine in [`coverage`]: per-pixel ground footprint
//!   versus range, top-down covered area, and vertical visibility bands
//!   under roll uncertainty, per evaluated zoom.
//!
//! Everything here is a deterministic function of a `Configuration`; there
//! is no I/O and no retained state between calls.

/// Camera and mounting configuration.
pub mod config;
/// Footprint, top-down and visibility-band computation.
pub mod coverage;
/// Pure edit reducer for configuration editing.
pub mod edit;
/// Scalar and linear algebra type aliases.
pub mod math;
/// Focal length and field-of-view conversions.
pub mod optics;

pub use config::{Axis, ConfigError, Configuration};
pub use coverage::{
    compute_coverage, BandSample, CoverageReport, FootprintSample, TopDownPoint, VisibilityBands,
    ZoomCoverage,
};
pub use edit::{apply_edit, Edit, EditModes};
pub use math::{Pt2, Real, Vec2};
pub use optics::{
    field_of_view_deg, focal_from_fov_deg, focal_length_mm, fov_deg, half_fov_rad, AxisOptics,
    DerivedOptics,
};
